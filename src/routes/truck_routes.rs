use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};

use crate::controllers::truck_controller::TruckController;
use crate::dto::api_response::ApiResponse;
use crate::dto::belt_dto::DateQuery;
use crate::dto::truck_dto::{
    BeltWalkFixRequest, BeltWalkFixResponse, BeltWalkRequest, BeltWalkResponse, CreateTruckRequest,
    MoveToAvailableRequest, MoveToOutOfServiceRequest, SpotAssignmentRequest,
    SpotAssignmentResponse, TruckFilters, UpdateTruckRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::assignment::TruckSpotDetail;
use crate::models::truck::Truck;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_truck_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trucks).post(create_truck))
        .route("/:id", put(update_truck))
        .route("/spot-assignments", get(list_spot_assignments).post(assign_to_spot))
        .route("/spot-assignments/:id", delete(unassign_spot))
        .route("/:id/move-to-available", post(move_to_available))
        .route("/:id/move-to-out-of-service", post(move_to_out_of_service))
        .route("/:id/retire", post(retire_truck))
        .route("/belt-walk", post(belt_walk))
        .route("/belt-walk/fix", post(belt_walk_fix))
}

async fn list_trucks(
    State(state): State<AppState>,
    Query(filters): Query<TruckFilters>,
) -> Result<Json<Vec<Truck>>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn create_truck(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateTruckRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Truck>>), AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_truck(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateTruckRequest>,
) -> Result<Json<ApiResponse<Truck>>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn list_spot_assignments(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<TruckSpotDetail>>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.list_spot_assignments(&query.date).await?;
    Ok(Json(response))
}

async fn assign_to_spot(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<SpotAssignmentRequest>,
) -> Result<Json<ApiResponse<SpotAssignmentResponse>>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.assign_to_spot(&user, request).await?;
    Ok(Json(response))
}

async fn unassign_spot(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Truck>>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.unassign_spot(&user, id).await?;
    Ok(Json(response))
}

async fn move_to_available(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<MoveToAvailableRequest>,
) -> Result<Json<ApiResponse<Truck>>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.move_to_available(&user, id, request).await?;
    Ok(Json(response))
}

async fn move_to_out_of_service(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<MoveToOutOfServiceRequest>,
) -> Result<Json<ApiResponse<Truck>>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.move_to_out_of_service(&user, id, request).await?;
    Ok(Json(response))
}

async fn retire_truck(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Truck>>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.retire(&user, id).await?;
    Ok(Json(response))
}

async fn belt_walk(
    State(state): State<AppState>,
    Json(request): Json<BeltWalkRequest>,
) -> Result<Json<BeltWalkResponse>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.belt_walk(request).await?;
    Ok(Json(response))
}

async fn belt_walk_fix(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<BeltWalkFixRequest>,
) -> Result<Json<ApiResponse<BeltWalkFixResponse>>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.belt_walk_fix(&user, request).await?;
    Ok(Json(response))
}
