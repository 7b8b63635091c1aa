use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Extension, Json, Router,
};

use crate::controllers::belt_controller::BeltController;
use crate::dto::api_response::ApiResponse;
use crate::dto::belt_dto::{BeltDayView, BeltWithSpots, CreateSpotRequest, DateQuery, RouteOverrideRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::belt::Spot;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_belt_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_belts))
        .route("/assignments", get(all_belts_day))
        .route("/:id/assignments", get(belt_day))
        .route("/:id/spots", post(create_spot))
}

pub fn create_spot_router() -> Router<AppState> {
    Router::new().route("/:id/route-override", patch(set_route_override))
}

async fn list_belts(State(state): State<AppState>) -> Result<Json<Vec<BeltWithSpots>>, AppError> {
    let controller = BeltController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn all_belts_day(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<BeltDayView>>, AppError> {
    let controller = BeltController::new(state.pool.clone());
    let response = controller.day_view(&query.date, None).await?;
    Ok(Json(response))
}

async fn belt_day(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<DateQuery>,
) -> Result<Json<BeltDayView>, AppError> {
    let controller = BeltController::new(state.pool.clone());
    let view = controller
        .day_view(&query.date, Some(id))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound(format!("Belt with id '{}' not found", id)))?;
    Ok(Json(view))
}

async fn create_spot(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<CreateSpotRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Spot>>), AppError> {
    let controller = BeltController::new(state.pool.clone());
    let response = controller.create_spot(&user, id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn set_route_override(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<RouteOverrideRequest>,
) -> Result<Json<ApiResponse<Spot>>, AppError> {
    let controller = BeltController::new(state.pool.clone());
    let response = controller.set_route_override(&user, id, request).await?;
    Ok(Json(response))
}
