use sqlx::PgPool;
use std::collections::HashMap;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::facility_dto::{
    AreaWithSpots, CreateAreaRequest, CreateFacilitySpotRequest, FacilityAssignmentQuery,
    UpsertFacilityAssignmentRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::facility::{FacilityArea, FacilityAssignment, FacilitySpot};
use crate::models::route::{Route, RouteArea};
use crate::models::user::AccessLevel;
use crate::repositories::facility_repository::FacilityRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{normalize_optional_text, parse_date};

pub struct FacilityController {
    facility: FacilityRepository,
    routes: RouteRepository,
}

impl FacilityController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            facility: FacilityRepository::new(pool.clone()),
            routes: RouteRepository::new(pool),
        }
    }

    /// Áreas con sus spots y las rutas activas de su tipo
    pub async fn list_areas(&self) -> Result<Vec<AreaWithSpots>, AppError> {
        let areas = self.facility.list_areas().await?;

        let mut routes_by_area: HashMap<RouteArea, Vec<Route>> = HashMap::new();
        let mut result = Vec::with_capacity(areas.len());
        for area in areas {
            let route_area = area.area_type.route_area();
            if !routes_by_area.contains_key(&route_area) {
                let routes = self.routes.list_active_for_area(route_area).await?;
                routes_by_area.insert(route_area, routes);
            }

            result.push(AreaWithSpots {
                spots: self.facility.list_spots(area.id).await?,
                routes: routes_by_area.get(&route_area).cloned().unwrap_or_default(),
                area,
            });
        }

        Ok(result)
    }

    pub async fn create_area(
        &self,
        actor: &AuthenticatedUser,
        request: CreateAreaRequest,
    ) -> Result<ApiResponse<FacilityArea>, AppError> {
        actor.require(AccessLevel::OpLead)?;
        request.validate()?;

        let area = self.facility.create_area(&request.name, request.area_type).await?;
        tracing::info!("🏭 Área {} creada", area.name);

        Ok(ApiResponse::success_with_message(area, "Area created"))
    }

    pub async fn delete_area(&self, actor: &AuthenticatedUser, id: i32) -> Result<ApiResponse<()>, AppError> {
        actor.require(AccessLevel::OpLead)?;

        if !self.facility.delete_area(id).await? {
            return Err(not_found_error("Area", id));
        }

        Ok(ApiResponse::message("Area deleted"))
    }

    pub async fn create_spot(
        &self,
        actor: &AuthenticatedUser,
        area_id: i32,
        request: CreateFacilitySpotRequest,
    ) -> Result<ApiResponse<FacilitySpot>, AppError> {
        actor.require(AccessLevel::OpLead)?;
        request.validate()?;

        self.facility
            .find_area(area_id)
            .await?
            .ok_or_else(|| not_found_error("Area", area_id))?;

        let spot = self.facility.create_spot(area_id, &request.label).await?;
        Ok(ApiResponse::success_with_message(spot, "Spot created"))
    }

    pub async fn delete_spot(&self, actor: &AuthenticatedUser, id: i32) -> Result<ApiResponse<()>, AppError> {
        actor.require(AccessLevel::OpLead)?;

        if !self.facility.delete_spot(id).await? {
            return Err(not_found_error("Facility spot", id));
        }

        Ok(ApiResponse::message("Spot deleted"))
    }

    pub async fn list_assignments(&self, query: FacilityAssignmentQuery) -> Result<Vec<FacilityAssignment>, AppError> {
        let date = parse_date(&query.date)?;
        self.facility.list_assignments(date, query.area_id).await
    }

    pub async fn upsert_assignment(
        &self,
        actor: &AuthenticatedUser,
        mut request: UpsertFacilityAssignmentRequest,
    ) -> Result<ApiResponse<FacilityAssignment>, AppError> {
        actor.require(AccessLevel::OpLead)?;
        request.validate()?;
        let date = parse_date(&request.date)?;

        self.facility
            .find_spot(request.facility_spot_id)
            .await?
            .ok_or_else(|| not_found_error("Facility spot", request.facility_spot_id))?;

        request.truck_number = normalize_optional_text(request.truck_number);
        request.notes = normalize_optional_text(request.notes);

        let assignment = self.facility.upsert_assignment(date, request).await?;
        Ok(ApiResponse::success(assignment))
    }

    pub async fn delete_assignment(&self, actor: &AuthenticatedUser, id: i32) -> Result<ApiResponse<()>, AppError> {
        actor.require(AccessLevel::OpLead)?;

        if !self.facility.delete_assignment(id).await? {
            return Err(not_found_error("Facility assignment", id));
        }

        Ok(ApiResponse::message("Assignment deleted"))
    }
}
