use serde::Deserialize;
use validator::Validate;

use crate::models::route::RouteArea;

#[derive(Debug, Default, Deserialize)]
pub struct RouteFilters {
    pub area: Option<RouteArea>,
    pub active: Option<bool>,
}

// Request para crear una ruta
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRouteRequest {
    #[validate(length(min = 1, max = 20))]
    pub number: String,
    pub spot_id: Option<i32>,
    pub assigned_area: RouteArea,
    #[validate(length(max = 200))]
    pub description: Option<String>,
}

// Request para actualizar una ruta
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRouteRequest {
    #[validate(length(min = 1, max = 20))]
    pub number: Option<String>,
    pub spot_id: Option<i32>,
    pub assigned_area: Option<RouteArea>,
    #[validate(length(max = 200))]
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
