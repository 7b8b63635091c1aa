use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::controllers::people_controller::check_grant;
use crate::dto::api_response::ApiResponse;
use crate::dto::invite_dto::{CreateInviteRequest, InviteResponse, InviteValidationResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::invite::InviteState;
use crate::models::user::{AccessLevel, UserRole};
use crate::repositories::invite_repository::InviteRepository;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::normalize_optional_text;

pub struct InviteController {
    repository: InviteRepository,
    expiration_hours: i64,
}

impl InviteController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: InviteRepository::new(state.pool.clone()),
            expiration_hours: state.config.invite_expiration_hours,
        }
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateInviteRequest,
    ) -> Result<ApiResponse<InviteResponse>, AppError> {
        actor.require(AccessLevel::OpLead)?;
        request.validate()?;

        let access_level = request.access_level.unwrap_or(AccessLevel::Employee);
        check_grant(actor, access_level)?;

        let expires_at = Utc::now() + Duration::hours(self.expiration_hours);
        let invite = self
            .repository
            .create(
                normalize_optional_text(request.email),
                request.role.unwrap_or(UserRole::Driver),
                access_level,
                actor.user_id,
                expires_at,
            )
            .await?;

        tracing::info!("✉️ Invitación {} creada por {}", invite.id, actor.username);
        Ok(ApiResponse::success_with_message(
            InviteResponse::from(invite),
            "Invite created",
        ))
    }

    pub async fn list_pending(&self, actor: &AuthenticatedUser) -> Result<Vec<InviteResponse>, AppError> {
        actor.require(AccessLevel::OpLead)?;

        let invites = self.repository.list_pending().await?;
        Ok(invites.into_iter().map(InviteResponse::from).collect())
    }

    /// Público: lo consulta la pantalla de registro antes de enviar el formulario
    pub async fn validate(&self, token: &str) -> Result<InviteValidationResponse, AppError> {
        let token = Uuid::parse_str(token.trim())
            .map_err(|_| AppError::BadRequest("Invalid invite token".to_string()))?;

        let invite = self
            .repository
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::NotFound("Invite not found".to_string()))?;

        let reason = match invite.state_at(Utc::now()) {
            InviteState::Valid => None,
            InviteState::Used => Some("Invite has already been used".to_string()),
            InviteState::Expired => Some("Invite has expired".to_string()),
        };

        Ok(InviteValidationResponse {
            valid: reason.is_none(),
            reason,
            email: invite.email,
            role: invite.role,
            access_level: invite.access_level,
        })
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: i32) -> Result<ApiResponse<()>, AppError> {
        actor.require(AccessLevel::OpLead)?;

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Invite", id));
        }

        Ok(ApiResponse::message("Invite deleted"))
    }
}
