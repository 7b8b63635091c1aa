use sqlx::PgPool;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::route_dto::{CreateRouteRequest, RouteFilters, UpdateRouteRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::route::{Route, RouteArea};
use crate::models::user::AccessLevel;
use crate::repositories::belt_repository::BeltRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct RouteController {
    routes: RouteRepository,
    belts: BeltRepository,
}

/// Spot final de una ruta: BELT_SPOT exige spot, el resto de áreas no lleva
pub fn resolve_route_spot(area: RouteArea, spot_id: Option<i32>) -> Result<Option<i32>, AppError> {
    match (area, spot_id) {
        (RouteArea::BeltSpot, None) => Err(AppError::BadRequest(
            "BELT_SPOT routes require a spot_id".to_string(),
        )),
        (RouteArea::BeltSpot, spot) => Ok(spot),
        _ => Ok(None),
    }
}

impl RouteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            routes: RouteRepository::new(pool.clone()),
            belts: BeltRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: RouteFilters) -> Result<Vec<Route>, AppError> {
        self.routes.list(&filters).await
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        mut request: CreateRouteRequest,
    ) -> Result<ApiResponse<Route>, AppError> {
        actor.require(AccessLevel::OpLead)?;
        request.validate()?;

        request.spot_id = resolve_route_spot(request.assigned_area, request.spot_id)?;
        if let Some(spot_id) = request.spot_id {
            self.ensure_spot(spot_id).await?;
        }

        let route = self.routes.create(request).await?;
        tracing::info!("🛣️ Ruta {} creada ({:?})", route.number, route.assigned_area);

        Ok(ApiResponse::success_with_message(route, "Route created"))
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: i32,
        request: UpdateRouteRequest,
    ) -> Result<ApiResponse<Route>, AppError> {
        actor.require(AccessLevel::OpLead)?;
        request.validate()?;

        let current = self
            .routes
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Route", id))?;

        let area = request.assigned_area.unwrap_or(current.assigned_area);
        let spot_id = resolve_route_spot(area, request.spot_id.or(current.spot_id))?;
        if let Some(spot_id) = request.spot_id.filter(|_| spot_id.is_some()) {
            self.ensure_spot(spot_id).await?;
        }

        let route = self
            .routes
            .update(id, request, spot_id.is_none())
            .await?
            .ok_or_else(|| not_found_error("Route", id))?;

        Ok(ApiResponse::success_with_message(route, "Route updated"))
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: i32) -> Result<ApiResponse<()>, AppError> {
        actor.require(AccessLevel::OpLead)?;

        if !self.routes.delete(id).await? {
            return Err(not_found_error("Route", id));
        }

        Ok(ApiResponse::message("Route deleted"))
    }

    async fn ensure_spot(&self, spot_id: i32) -> Result<(), AppError> {
        self.belts
            .find_spot(spot_id)
            .await?
            .ok_or_else(|| not_found_error("Spot", spot_id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_belt_spot_routes_need_a_spot() {
        assert!(resolve_route_spot(RouteArea::BeltSpot, None).is_err());
        assert_eq!(resolve_route_spot(RouteArea::BeltSpot, Some(3)).unwrap(), Some(3));
    }

    #[test]
    fn test_other_areas_drop_the_spot() {
        assert_eq!(resolve_route_spot(RouteArea::Dock, Some(3)).unwrap(), None);
        assert_eq!(resolve_route_spot(RouteArea::EoPool, None).unwrap(), None);
    }
}
