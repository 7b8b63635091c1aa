use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::briefing_controller::BriefingController;
use crate::dto::api_response::ApiResponse;
use crate::dto::belt_dto::DateQuery;
use crate::dto::briefing_dto::{BriefingResponse, UpsertBriefingRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_briefing_router() -> Router<AppState> {
    Router::new().route("/", get(get_briefing).put(upsert_briefing))
}

async fn get_briefing(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<BriefingResponse>, AppError> {
    let controller = BriefingController::new(state.pool.clone());
    let response = controller.get(&query.date).await?;
    Ok(Json(response))
}

async fn upsert_briefing(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<UpsertBriefingRequest>,
) -> Result<Json<ApiResponse<BriefingResponse>>, AppError> {
    let controller = BriefingController::new(state.pool.clone());
    let response = controller.upsert(&user, request).await?;
    Ok(Json(response))
}
