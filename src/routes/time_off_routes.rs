use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Extension, Json, Router,
};

use crate::controllers::time_off_controller::TimeOffController;
use crate::dto::api_response::ApiResponse;
use crate::dto::belt_dto::DateQuery;
use crate::dto::time_off_dto::{
    BalanceQuery, BalanceResponse, CoverageResponse, CreateTimeOffRangeRequest,
    CreateTimeOffRequest, TimeOffFilters, TimeOffRangeResponse, UpdateTimeOffStatusRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::time_off::{TimeOff, TimeOffDetail};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_time_off_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_time_off).post(create_time_off))
        .route("/range", post(create_time_off_range))
        .route("/balance", get(balance))
        .route("/coverage-needs", get(coverage_needs))
        .route("/:id/status", patch(update_status))
        .route("/:id", delete(delete_time_off))
}

async fn list_time_off(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<TimeOffFilters>,
) -> Result<Json<Vec<TimeOffDetail>>, AppError> {
    let controller = TimeOffController::new(state.pool.clone());
    let response = controller.list(&user, filters).await?;
    Ok(Json(response))
}

async fn create_time_off(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateTimeOffRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TimeOff>>), AppError> {
    let controller = TimeOffController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn create_time_off_range(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateTimeOffRangeRequest>,
) -> Result<Json<ApiResponse<TimeOffRangeResponse>>, AppError> {
    let controller = TimeOffController::new(state.pool.clone());
    let response = controller.create_range(&user, request).await?;
    Ok(Json(response))
}

async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateTimeOffStatusRequest>,
) -> Result<Json<ApiResponse<TimeOff>>, AppError> {
    let controller = TimeOffController::new(state.pool.clone());
    let response = controller.update_status(&user, id, request).await?;
    Ok(Json(response))
}

async fn delete_time_off(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = TimeOffController::new(state.pool.clone());
    let response = controller.delete(&user, id).await?;
    Ok(Json(response))
}

async fn balance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<BalanceResponse>, AppError> {
    let controller = TimeOffController::new(state.pool.clone());
    let response = controller.balance(&user, query).await?;
    Ok(Json(response))
}

async fn coverage_needs(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<CoverageResponse>, AppError> {
    let controller = TimeOffController::new(state.pool.clone());
    let response = controller.coverage_needs(&query.date).await?;
    Ok(Json(response))
}
