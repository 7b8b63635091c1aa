use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};

use crate::controllers::invite_controller::InviteController;
use crate::dto::api_response::ApiResponse;
use crate::dto::invite_dto::{CreateInviteRequest, InviteResponse, InviteValidationResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Validación del token, accesible sin login
pub fn create_public_invite_router() -> Router<AppState> {
    // El segmento comparte nombre con `/:id` del router protegido
    Router::new().route("/:id/validate", get(validate_invite))
}

pub fn create_invite_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_invites).post(create_invite))
        .route("/:id", delete(delete_invite))
}

async fn validate_invite(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<InviteValidationResponse>, AppError> {
    let controller = InviteController::new(&state);
    let response = controller.validate(&token).await?;
    Ok(Json(response))
}

async fn list_invites(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<InviteResponse>>, AppError> {
    let controller = InviteController::new(&state);
    let response = controller.list_pending(&user).await?;
    Ok(Json(response))
}

async fn create_invite(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateInviteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<InviteResponse>>), AppError> {
    let controller = InviteController::new(&state);
    let response = controller.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn delete_invite(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = InviteController::new(&state);
    let response = controller.delete(&user, id).await?;
    Ok(Json(response))
}
