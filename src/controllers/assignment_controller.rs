use sqlx::PgPool;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::assignment_dto::{
    ApplyTemplateRequest, ApplyTemplateResponse, AssignmentQuery, AssignmentResponse,
    TemplateQuery, UpsertAssignmentRequest, UpsertTemplateRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::assignment::{AssignmentDetail, TemplateAssignment};
use crate::models::user::AccessLevel;
use crate::repositories::assignment_repository::AssignmentRepository;
use crate::repositories::belt_repository::BeltRepository;
use crate::repositories::template_repository::TemplateRepository;
use crate::services::schedule_service::{is_override, plan_template_application};
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{dates_in_range, day_of_week, normalize_optional_text, parse_date};

/// Máximo de días que se pueden rellenar con la plantilla de una vez
pub const MAX_TEMPLATE_DAYS: usize = 62;

pub struct AssignmentController {
    assignments: AssignmentRepository,
    templates: TemplateRepository,
    belts: BeltRepository,
}

impl AssignmentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            assignments: AssignmentRepository::new(pool.clone()),
            templates: TemplateRepository::new(pool.clone()),
            belts: BeltRepository::new(pool),
        }
    }

    pub async fn list(&self, query: AssignmentQuery) -> Result<Vec<AssignmentDetail>, AppError> {
        let date = parse_date(&query.date)?;
        self.assignments.list_details(date, query.belt_id).await
    }

    /// Upsert por (spot_id, date). Lo enviado siempre gana; `is_override`
    /// indica si difiere de la plantilla de ese día de la semana.
    pub async fn upsert(
        &self,
        actor: &AuthenticatedUser,
        request: UpsertAssignmentRequest,
    ) -> Result<ApiResponse<AssignmentResponse>, AppError> {
        actor.require(AccessLevel::OpLead)?;
        request.validate()?;
        let date = parse_date(&request.date)?;

        self.belts
            .find_spot(request.spot_id)
            .await?
            .ok_or_else(|| not_found_error("Spot", request.spot_id))?;

        let truck_number = normalize_optional_text(request.truck_number);
        let template = self.templates.find_for(request.spot_id, day_of_week(date)).await?;
        let is_override = is_override(template.as_ref(), request.user_id, truck_number.as_deref());

        let assignment = self
            .assignments
            .upsert(request.spot_id, date, request.user_id, truck_number, is_override)
            .await?;

        tracing::debug!(
            "📝 Asignación spot {} {} (override: {})",
            assignment.spot_id,
            assignment.date,
            assignment.is_override
        );

        Ok(ApiResponse::success(AssignmentResponse {
            assignment,
            has_template: template.is_some(),
        }))
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: i32) -> Result<ApiResponse<()>, AppError> {
        actor.require(AccessLevel::OpLead)?;

        if !self.assignments.delete(id).await? {
            return Err(not_found_error("Assignment", id));
        }

        Ok(ApiResponse::message("Assignment deleted"))
    }

    /// Rellenar el rango con la plantilla. Las filas existentes no se tocan
    /// y cada inserción es independiente.
    pub async fn apply_template(
        &self,
        actor: &AuthenticatedUser,
        request: ApplyTemplateRequest,
    ) -> Result<ApiResponse<ApplyTemplateResponse>, AppError> {
        actor.require(AccessLevel::OpLead)?;
        let start = parse_date(&request.start_date)?;
        let end = parse_date(&request.end_date)?;
        let dates = dates_in_range(start, end, MAX_TEMPLATE_DAYS)?;

        let templates = self.templates.list(None, request.belt_id).await?;
        let existing = self.assignments.existing_pairs(start, end).await?;
        let plan = plan_template_application(&dates, &templates, &existing);

        let mut created = 0;
        let mut skipped = plan.skipped;
        for planned in &plan.to_create {
            if self.assignments.insert_if_absent(planned).await? {
                created += 1;
            } else {
                skipped += 1;
            }
        }

        tracing::info!(
            "📅 Plantilla aplicada {}..{}: {} creadas, {} existentes",
            start,
            end,
            created,
            skipped
        );

        Ok(ApiResponse::success(ApplyTemplateResponse { created, skipped }))
    }

    pub async fn list_templates(&self, query: TemplateQuery) -> Result<Vec<TemplateAssignment>, AppError> {
        if let Some(day) = query.day_of_week {
            if !(0..=6).contains(&day) {
                return Err(AppError::BadRequest(
                    "day_of_week must be between 0 (Sunday) and 6 (Saturday)".to_string(),
                ));
            }
        }

        self.templates.list(query.day_of_week, query.belt_id).await
    }

    pub async fn upsert_template(
        &self,
        actor: &AuthenticatedUser,
        request: UpsertTemplateRequest,
    ) -> Result<ApiResponse<TemplateAssignment>, AppError> {
        actor.require(AccessLevel::OpLead)?;
        request.validate()?;

        self.belts
            .find_spot(request.spot_id)
            .await?
            .ok_or_else(|| not_found_error("Spot", request.spot_id))?;

        let template = self
            .templates
            .upsert(
                request.spot_id,
                request.day_of_week,
                request.user_id,
                normalize_optional_text(request.truck_number),
            )
            .await?;

        Ok(ApiResponse::success(template))
    }

    pub async fn delete_template(&self, actor: &AuthenticatedUser, id: i32) -> Result<ApiResponse<()>, AppError> {
        actor.require(AccessLevel::OpLead)?;

        if !self.templates.delete(id).await? {
            return Err(not_found_error("Template", id));
        }

        Ok(ApiResponse::message("Template deleted"))
    }
}
