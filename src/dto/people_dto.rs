use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::{AccessLevel, User, UserRole};

// Response de usuario (sin password)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
    pub access_level: AccessLevel,
    pub employee_id: Option<String>,
    pub vacation_days: i32,
    pub sick_days: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            phone: user.phone,
            role: user.role,
            access_level: user.access_level,
            employee_id: user.employee_id,
            vacation_days: user.vacation_days,
            sick_days: user.sick_days,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

// Filtros para listar personas
#[derive(Debug, Default, Deserialize)]
pub struct PeopleFilters {
    pub role: Option<UserRole>,
    pub active: Option<bool>,
}

// Request para crear un usuario
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone: Option<String>,
    #[validate(length(min = 8, max = 200))]
    pub password: String,
    pub role: UserRole,
    pub access_level: Option<AccessLevel>,
    #[validate(length(max = 50))]
    pub employee_id: Option<String>,
    #[validate(range(min = 0, max = 365))]
    pub vacation_days: Option<i32>,
    #[validate(range(min = 0, max = 365))]
    pub sick_days: Option<i32>,
}

// Request para actualizar un usuario existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub access_level: Option<AccessLevel>,
    #[validate(length(max = 50))]
    pub employee_id: Option<String>,
    #[validate(range(min = 0, max = 365))]
    pub vacation_days: Option<i32>,
    #[validate(range(min = 0, max = 365))]
    pub sick_days: Option<i32>,
    pub is_active: Option<bool>,
}
