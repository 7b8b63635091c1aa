use sqlx::PgPool;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::briefing_dto::{BriefingResponse, UpsertBriefingRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::AccessLevel;
use crate::repositories::briefing_repository::BriefingRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::parse_date;

pub struct BriefingController {
    repository: BriefingRepository,
}

impl BriefingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BriefingRepository::new(pool),
        }
    }

    /// Sin briefing guardado se devuelve uno vacío para la fecha
    pub async fn get(&self, date: &str) -> Result<BriefingResponse, AppError> {
        let date = parse_date(date)?;

        Ok(self
            .repository
            .find_by_date(date)
            .await?
            .map(BriefingResponse::from)
            .unwrap_or_else(|| BriefingResponse::empty(date)))
    }

    pub async fn upsert(
        &self,
        actor: &AuthenticatedUser,
        request: UpsertBriefingRequest,
    ) -> Result<ApiResponse<BriefingResponse>, AppError> {
        actor.require(AccessLevel::OpLead)?;
        request.validate()?;
        let date = parse_date(&request.date)?;

        let briefing = self
            .repository
            .upsert(date, &request.content, actor.user_id)
            .await?;

        tracing::info!("📋 Briefing del {} actualizado por {}", date, actor.username);
        Ok(ApiResponse::success(BriefingResponse::from(briefing)))
    }
}
