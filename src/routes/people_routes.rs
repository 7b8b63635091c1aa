use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::people_controller::PeopleController;
use crate::dto::api_response::ApiResponse;
use crate::dto::people_dto::{CreateUserRequest, PeopleFilters, UpdateUserRequest, UserResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_people_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_people).post(create_person))
        .route("/:id", get(get_person).put(update_person).delete(deactivate_person))
}

async fn list_people(
    State(state): State<AppState>,
    Query(filters): Query<PeopleFilters>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let controller = PeopleController::new(&state);
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, AppError> {
    let controller = PeopleController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_person(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    let controller = PeopleController::new(&state);
    let response = controller.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_person(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = PeopleController::new(&state);
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn deactivate_person(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = PeopleController::new(&state);
    let response = controller.deactivate(&user, id).await?;
    Ok(Json(response))
}
