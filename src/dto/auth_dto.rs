use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::people_dto::UserResponse;

// Login request; `username` acepta también el email
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(length(min = 1, max = 200))]
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

// Alta de usuario a partir de una invitación
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub token: Uuid,
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 8, max = 200))]
    pub password: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 8, max = 200))]
    pub new_password: String,
}
