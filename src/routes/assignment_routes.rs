use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};

use crate::controllers::assignment_controller::AssignmentController;
use crate::dto::api_response::ApiResponse;
use crate::dto::assignment_dto::{
    ApplyTemplateRequest, ApplyTemplateResponse, AssignmentQuery, AssignmentResponse,
    TemplateQuery, UpsertAssignmentRequest, UpsertTemplateRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::assignment::{AssignmentDetail, TemplateAssignment};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_assignment_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_assignments).post(upsert_assignment))
        .route("/apply-template", post(apply_template))
        .route("/:id", delete(delete_assignment))
}

pub fn create_template_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_templates).put(upsert_template))
        .route("/:id", delete(delete_template))
}

async fn list_assignments(
    State(state): State<AppState>,
    Query(query): Query<AssignmentQuery>,
) -> Result<Json<Vec<AssignmentDetail>>, AppError> {
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn upsert_assignment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<UpsertAssignmentRequest>,
) -> Result<Json<ApiResponse<AssignmentResponse>>, AppError> {
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.upsert(&user, request).await?;
    Ok(Json(response))
}

async fn delete_assignment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.delete(&user, id).await?;
    Ok(Json(response))
}

async fn apply_template(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<ApplyTemplateRequest>,
) -> Result<Json<ApiResponse<ApplyTemplateResponse>>, AppError> {
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.apply_template(&user, request).await?;
    Ok(Json(response))
}

async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
) -> Result<Json<Vec<TemplateAssignment>>, AppError> {
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.list_templates(query).await?;
    Ok(Json(response))
}

async fn upsert_template(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<UpsertTemplateRequest>,
) -> Result<Json<ApiResponse<TemplateAssignment>>, AppError> {
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.upsert_template(&user, request).await?;
    Ok(Json(response))
}

async fn delete_template(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AssignmentController::new(state.pool.clone());
    let response = controller.delete_template(&user, id).await?;
    Ok(Json(response))
}
