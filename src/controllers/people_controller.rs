use bcrypt::{hash, DEFAULT_COST};
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::people_dto::{CreateUserRequest, PeopleFilters, UpdateUserRequest, UserResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::AccessLevel;
use crate::repositories::user_repository::{NewUser, UserRepository};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::normalize_optional_text;

pub struct PeopleController {
    repository: UserRepository,
    default_vacation_days: i32,
    default_sick_days: i32,
}

/// Nadie concede un nivel por encima del suyo; HIGHEST_MANAGER solo lo da otro HIGHEST_MANAGER
pub fn check_grant(actor: &AuthenticatedUser, granted: AccessLevel) -> Result<(), AppError> {
    if !actor.has(granted) {
        return Err(AppError::Forbidden(format!(
            "Cannot grant {} access",
            granted.as_str()
        )));
    }
    Ok(())
}

impl PeopleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: UserRepository::new(state.pool.clone()),
            default_vacation_days: state.config.default_vacation_days,
            default_sick_days: state.config.default_sick_days,
        }
    }

    pub async fn list(&self, filters: PeopleFilters) -> Result<Vec<UserResponse>, AppError> {
        let users = self.repository.list(&filters).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<UserResponse, AppError> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("User", id))?;

        Ok(UserResponse::from(user))
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        actor.require(AccessLevel::OpLead)?;
        request.validate()?;

        let access_level = request.access_level.unwrap_or(AccessLevel::Employee);
        check_grant(actor, access_level)?;

        let username = request.username.trim().to_string();
        if self.repository.username_exists(&username).await? {
            return Err(AppError::Conflict("Username is already taken".to_string()));
        }

        let new_user = NewUser {
            name: request.name.trim().to_string(),
            username,
            email: normalize_optional_text(request.email),
            phone: normalize_optional_text(request.phone),
            password_hash: hash(&request.password, DEFAULT_COST)?,
            role: request.role,
            access_level,
            employee_id: normalize_optional_text(request.employee_id),
            vacation_days: request.vacation_days.unwrap_or(self.default_vacation_days),
            sick_days: request.sick_days.unwrap_or(self.default_sick_days),
        };

        let user = self.repository.create(new_user).await?;
        tracing::info!("👤 Usuario creado: {} por {}", user.username, actor.username);

        Ok(ApiResponse::success_with_message(
            UserResponse::from(user),
            "User created",
        ))
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: i32,
        request: UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        actor.require(AccessLevel::OpLead)?;
        request.validate()?;

        if request.access_level.is_some() {
            actor.require(AccessLevel::HighestManager)?;
        }

        let user = self
            .repository
            .update(id, request)
            .await?
            .ok_or_else(|| not_found_error("User", id))?;

        Ok(ApiResponse::success_with_message(
            UserResponse::from(user),
            "User updated",
        ))
    }

    /// Baja lógica
    pub async fn deactivate(&self, actor: &AuthenticatedUser, id: i32) -> Result<ApiResponse<()>, AppError> {
        actor.require(AccessLevel::HighestManager)?;

        if actor.user_id == id {
            return Err(AppError::BadRequest("You cannot deactivate your own account".to_string()));
        }

        if !self.repository.deactivate(id).await? {
            return Err(not_found_error("User", id));
        }

        tracing::info!("🚫 Usuario {} desactivado por {}", id, actor.username);
        Ok(ApiResponse::message("User deactivated"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(level: AccessLevel) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 1,
            username: "lead".to_string(),
            access_level: level,
        }
    }

    #[test]
    fn test_check_grant() {
        assert!(check_grant(&actor(AccessLevel::OpLead), AccessLevel::TruckMover).is_ok());
        assert!(check_grant(&actor(AccessLevel::OpLead), AccessLevel::OpLead).is_ok());
        assert!(check_grant(&actor(AccessLevel::OpLead), AccessLevel::HighestManager).is_err());
        assert!(check_grant(&actor(AccessLevel::HighestManager), AccessLevel::HighestManager).is_ok());
    }
}
