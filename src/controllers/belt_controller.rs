use sqlx::PgPool;
use std::collections::HashMap;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::belt_dto::{BeltDayView, BeltWithSpots, CreateSpotRequest, RouteOverrideRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::belt::Spot;
use crate::models::user::AccessLevel;
use crate::repositories::assignment_repository::AssignmentRepository;
use crate::repositories::belt_repository::BeltRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::time_off_repository::TimeOffRepository;
use crate::repositories::truck_repository::TruckRepository;
use crate::services::belt_view::{build_belt_views, DayInputs};
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{normalize_optional_text, parse_date};

pub struct BeltController {
    belts: BeltRepository,
    assignments: AssignmentRepository,
    trucks: TruckRepository,
    routes: RouteRepository,
    time_off: TimeOffRepository,
}

impl BeltController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            belts: BeltRepository::new(pool.clone()),
            assignments: AssignmentRepository::new(pool.clone()),
            trucks: TruckRepository::new(pool.clone()),
            routes: RouteRepository::new(pool.clone()),
            time_off: TimeOffRepository::new(pool),
        }
    }

    /// Cintas con sus spots, por letra y número
    pub async fn list(&self) -> Result<Vec<BeltWithSpots>, AppError> {
        let belts = self.belts.list_belts().await?;
        let mut by_belt: HashMap<i32, Vec<Spot>> = HashMap::new();
        for spot in self.belts.list_spots().await? {
            by_belt.entry(spot.belt_id).or_default().push(spot);
        }

        Ok(belts
            .into_iter()
            .map(|belt| BeltWithSpots {
                spots: by_belt.remove(&belt.id).unwrap_or_default(),
                belt,
            })
            .collect())
    }

    /// Vista del día; `belt_id` None = todas las cintas activas
    pub async fn day_view(&self, date: &str, belt_id: Option<i32>) -> Result<Vec<BeltDayView>, AppError> {
        let date = parse_date(date)?;

        let belts = match belt_id {
            Some(id) => vec![self
                .belts
                .find_belt(id)
                .await?
                .ok_or_else(|| not_found_error("Belt", id))?],
            None => self
                .belts
                .list_belts()
                .await?
                .into_iter()
                .filter(|b| b.is_active)
                .collect(),
        };

        let spots = self.belts.spots_with_belt(belt_id).await?;
        let assignments = self.assignments.list_details(date, belt_id).await?;
        let trucks = self.trucks.list_spot_assignments(date).await?;
        let routes_by_spot = self.routes.active_numbers_by_spot().await?;
        let approved_off = self.time_off.approved_user_ids(date).await?;

        Ok(build_belt_views(
            &belts,
            DayInputs {
                date,
                spots,
                assignments,
                trucks,
                routes_by_spot: &routes_by_spot,
                approved_off: &approved_off,
            },
        ))
    }

    pub async fn create_spot(
        &self,
        actor: &AuthenticatedUser,
        belt_id: i32,
        request: CreateSpotRequest,
    ) -> Result<ApiResponse<Spot>, AppError> {
        actor.require(AccessLevel::OpLead)?;
        request.validate()?;

        let belt = self
            .belts
            .find_belt(belt_id)
            .await?
            .ok_or_else(|| not_found_error("Belt", belt_id))?;

        let spot = self.belts.create_spot(belt.id, request.number).await?;
        tracing::info!("📍 Spot {}{} creado", belt.letter, spot.number);

        Ok(ApiResponse::success_with_message(spot, "Spot created"))
    }

    /// String vacío limpia el override
    pub async fn set_route_override(
        &self,
        actor: &AuthenticatedUser,
        spot_id: i32,
        request: RouteOverrideRequest,
    ) -> Result<ApiResponse<Spot>, AppError> {
        actor.require(AccessLevel::OpLead)?;
        request.validate()?;

        let spot = self
            .belts
            .set_route_override(spot_id, normalize_optional_text(request.route_override))
            .await?
            .ok_or_else(|| not_found_error("Spot", spot_id))?;

        Ok(ApiResponse::success_with_message(spot, "Route override updated"))
    }
}
