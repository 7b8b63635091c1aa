use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::facility::{FacilityArea, FacilityAreaType, FacilitySpot};
use crate::models::route::Route;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAreaRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub area_type: FacilityAreaType,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFacilitySpotRequest {
    #[validate(length(min = 1, max = 30))]
    pub label: String,
}

// Área con sus spots y las rutas que se muestran en ella
#[derive(Debug, Serialize)]
pub struct AreaWithSpots {
    #[serde(flatten)]
    pub area: FacilityArea,
    pub spots: Vec<FacilitySpot>,
    pub routes: Vec<Route>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertFacilityAssignmentRequest {
    pub facility_spot_id: i32,
    pub date: String,
    pub user_id: Option<i32>,
    #[validate(custom = "crate::utils::validation::validate_truck_number")]
    pub truck_number: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FacilityAssignmentQuery {
    pub date: String,
    pub area_id: Option<i32>,
}
