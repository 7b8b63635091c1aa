use chrono::{Datelike, Local};
use sqlx::PgPool;
use std::collections::HashMap;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::time_off_dto::{
    BalanceQuery, BalanceResponse, CoverageResponse, CreateTimeOffRangeRequest,
    CreateTimeOffRequest, TimeOffFilters, TimeOffRangeResponse, UpdateTimeOffStatusRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::assignment::AssignmentDetail;
use crate::models::time_off::{TimeOff, TimeOffDetail, TimeOffStatus};
use crate::models::user::{AccessLevel, UserRole};
use crate::repositories::assignment_repository::AssignmentRepository;
use crate::repositories::belt_repository::BeltRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::time_off_repository::{TimeOffQuery, TimeOffRepository};
use crate::repositories::user_repository::UserRepository;
use crate::services::belt_view::routes_for_spot;
use crate::services::coverage_service::{available_swing_drivers, classify_spots, SpotSnapshot};
use crate::services::time_off_balance::compute_balance;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{dates_in_range, normalize_optional_text, parse_date, parse_optional_date};

/// Máximo de días por solicitud de rango
pub const MAX_RANGE_DAYS: usize = 31;

pub struct TimeOffController {
    time_off: TimeOffRepository,
    users: UserRepository,
    belts: BeltRepository,
    assignments: AssignmentRepository,
    routes: RouteRepository,
}

/// Usuario sobre el que actúa la request. Actuar por otro requiere OP_LEAD.
fn target_user(actor: &AuthenticatedUser, requested: Option<i32>) -> Result<i32, AppError> {
    match requested {
        Some(user_id) if user_id != actor.user_id => {
            actor.require(AccessLevel::OpLead)?;
            Ok(user_id)
        }
        _ => Ok(actor.user_id),
    }
}

impl TimeOffController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            time_off: TimeOffRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            belts: BeltRepository::new(pool.clone()),
            assignments: AssignmentRepository::new(pool.clone()),
            routes: RouteRepository::new(pool),
        }
    }

    /// EMPLOYEE solo ve sus propias solicitudes
    pub async fn list(
        &self,
        actor: &AuthenticatedUser,
        filters: TimeOffFilters,
    ) -> Result<Vec<TimeOffDetail>, AppError> {
        let user_id = if actor.access_level == AccessLevel::Employee {
            Some(actor.user_id)
        } else {
            filters.user_id
        };

        let query = TimeOffQuery {
            user_id,
            status: filters.status,
            from: parse_optional_date(filters.from.as_deref())?,
            to: parse_optional_date(filters.to.as_deref())?,
        };

        self.time_off.list(&query).await
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateTimeOffRequest,
    ) -> Result<ApiResponse<TimeOff>, AppError> {
        request.validate()?;
        let user_id = target_user(actor, request.user_id)?;
        let date = parse_date(&request.date)?;
        self.ensure_user(user_id).await?;

        let notes = normalize_optional_text(request.notes);
        let time_off = self
            .time_off
            .create_if_absent(user_id, date, request.kind, notes.as_deref())
            .await?
            .ok_or_else(|| AppError::Conflict(format!("Time off already requested for {}", date)))?;

        tracing::info!("🌴 Tiempo libre solicitado: usuario {} el {}", user_id, date);
        Ok(ApiResponse::success_with_message(time_off, "Time off requested"))
    }

    /// Una solicitud por día; los días que ya tenían una se devuelven en `skipped_dates`
    pub async fn create_range(
        &self,
        actor: &AuthenticatedUser,
        request: CreateTimeOffRangeRequest,
    ) -> Result<ApiResponse<TimeOffRangeResponse>, AppError> {
        request.validate()?;
        let user_id = target_user(actor, request.user_id)?;
        let start = parse_date(&request.start_date)?;
        let end = parse_date(&request.end_date)?;
        let dates = dates_in_range(start, end, MAX_RANGE_DAYS)?;
        self.ensure_user(user_id).await?;

        let notes = normalize_optional_text(request.notes);
        let mut created = Vec::new();
        let mut skipped_dates = Vec::new();
        for date in dates {
            match self
                .time_off
                .create_if_absent(user_id, date, request.kind, notes.as_deref())
                .await?
            {
                Some(row) => created.push(row),
                None => skipped_dates.push(date),
            }
        }

        tracing::info!(
            "🌴 Rango de tiempo libre usuario {}: {} creados, {} existentes",
            user_id,
            created.len(),
            skipped_dates.len()
        );

        Ok(ApiResponse::success(TimeOffRangeResponse {
            created,
            skipped_dates,
        }))
    }

    pub async fn update_status(
        &self,
        actor: &AuthenticatedUser,
        id: i32,
        request: UpdateTimeOffStatusRequest,
    ) -> Result<ApiResponse<TimeOff>, AppError> {
        actor.require(AccessLevel::OpLead)?;

        let time_off = self
            .time_off
            .set_status(id, request.status, actor.user_id)
            .await?
            .ok_or_else(|| not_found_error("Time off", id))?;

        tracing::info!("✅ Tiempo libre {} → {:?} por {}", id, time_off.status, actor.username);
        Ok(ApiResponse::success(time_off))
    }

    /// El dueño puede borrar mientras está PENDING; OP_LEAD+ siempre
    pub async fn delete(&self, actor: &AuthenticatedUser, id: i32) -> Result<ApiResponse<()>, AppError> {
        let time_off = self
            .time_off
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Time off", id))?;

        let own_pending = time_off.user_id == actor.user_id && time_off.status == TimeOffStatus::Pending;
        if !own_pending {
            actor.require(AccessLevel::OpLead)?;
        }

        self.time_off.delete(id).await?;
        Ok(ApiResponse::message("Time off deleted"))
    }

    pub async fn balance(
        &self,
        actor: &AuthenticatedUser,
        query: BalanceQuery,
    ) -> Result<BalanceResponse, AppError> {
        let user_id = target_user(actor, query.user_id)?;
        let year = query.year.unwrap_or_else(|| Local::now().year());

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| not_found_error("User", user_id))?;
        let used = self.time_off.used_days_by_type(user.id, year).await?;

        Ok(BalanceResponse {
            user_id: user.id,
            year,
            balances: compute_balance(user.vacation_days, user.sick_days, &used),
        })
    }

    /// Spots sin cubrir para la fecha y swing disponibles. Solo lectura.
    pub async fn coverage_needs(&self, date: &str) -> Result<CoverageResponse, AppError> {
        let date = parse_date(date)?;

        let spots = self.belts.spots_with_belt(None).await?;
        let mut assignments: HashMap<i32, AssignmentDetail> = self
            .assignments
            .list_details(date, None)
            .await?
            .into_iter()
            .map(|a| (a.spot_id, a))
            .collect();
        let routes_by_spot = self.routes.active_numbers_by_spot().await?;
        let approved_off = self.time_off.approved_user_ids(date).await?;

        let snapshots = spots
            .into_iter()
            .map(|spot| SpotSnapshot {
                routes: routes_for_spot(&spot, routes_by_spot.get(&spot.id)),
                assignment: assignments.remove(&spot.id),
                spot,
            })
            .collect();
        let needs = classify_spots(snapshots, &approved_off);

        let swing = self.users.list_active_by_role(UserRole::Swing).await?;
        let assigned = self.assignments.assigned_user_ids(date).await?;
        let available = available_swing_drivers(&swing, &assigned, &approved_off);

        Ok(CoverageResponse {
            date,
            needs,
            available_swing_drivers: available,
        })
    }

    async fn ensure_user(&self, user_id: i32) -> Result<(), AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| not_found_error("User", user_id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(level: AccessLevel) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 5,
            username: "someone".to_string(),
            access_level: level,
        }
    }

    #[test]
    fn test_target_user_defaults_to_self() {
        assert_eq!(target_user(&actor(AccessLevel::Employee), None).unwrap(), 5);
        assert_eq!(target_user(&actor(AccessLevel::Employee), Some(5)).unwrap(), 5);
    }

    #[test]
    fn test_target_user_on_behalf_requires_op_lead() {
        assert!(matches!(
            target_user(&actor(AccessLevel::TruckMover), Some(9)),
            Err(AppError::Forbidden(_))
        ));
        assert_eq!(target_user(&actor(AccessLevel::OpLead), Some(9)).unwrap(), 9);
    }
}
