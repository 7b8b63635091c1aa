use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};

use crate::controllers::facility_controller::FacilityController;
use crate::dto::api_response::ApiResponse;
use crate::dto::facility_dto::{
    AreaWithSpots, CreateAreaRequest, CreateFacilitySpotRequest, FacilityAssignmentQuery,
    UpsertFacilityAssignmentRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::facility::{FacilityArea, FacilityAssignment, FacilitySpot};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_facility_router() -> Router<AppState> {
    Router::new()
        .route("/areas", get(list_areas).post(create_area))
        .route("/areas/:id", delete(delete_area))
        .route("/areas/:id/spots", post(create_spot))
        .route("/spots/:id", delete(delete_spot))
        .route("/assignments", get(list_assignments).put(upsert_assignment))
        .route("/assignments/:id", delete(delete_assignment))
}

async fn list_areas(State(state): State<AppState>) -> Result<Json<Vec<AreaWithSpots>>, AppError> {
    let controller = FacilityController::new(state.pool.clone());
    let response = controller.list_areas().await?;
    Ok(Json(response))
}

async fn create_area(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateAreaRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FacilityArea>>), AppError> {
    let controller = FacilityController::new(state.pool.clone());
    let response = controller.create_area(&user, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn delete_area(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = FacilityController::new(state.pool.clone());
    let response = controller.delete_area(&user, id).await?;
    Ok(Json(response))
}

async fn create_spot(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<CreateFacilitySpotRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FacilitySpot>>), AppError> {
    let controller = FacilityController::new(state.pool.clone());
    let response = controller.create_spot(&user, id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn delete_spot(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = FacilityController::new(state.pool.clone());
    let response = controller.delete_spot(&user, id).await?;
    Ok(Json(response))
}

async fn list_assignments(
    State(state): State<AppState>,
    Query(query): Query<FacilityAssignmentQuery>,
) -> Result<Json<Vec<FacilityAssignment>>, AppError> {
    let controller = FacilityController::new(state.pool.clone());
    let response = controller.list_assignments(query).await?;
    Ok(Json(response))
}

async fn upsert_assignment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<UpsertFacilityAssignmentRequest>,
) -> Result<Json<ApiResponse<FacilityAssignment>>, AppError> {
    let controller = FacilityController::new(state.pool.clone());
    let response = controller.upsert_assignment(&user, request).await?;
    Ok(Json(response))
}

async fn delete_assignment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = FacilityController::new(state.pool.clone());
    let response = controller.delete_assignment(&user, id).await?;
    Ok(Json(response))
}
