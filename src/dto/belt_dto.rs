use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::belt::{Belt, Spot};

// Query con fecha obligatoria `YYYY-MM-DD`
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct BeltWithSpots {
    #[serde(flatten)]
    pub belt: Belt,
    pub spots: Vec<Spot>,
}

// Conductor asignado en la vista de cinta
#[derive(Debug, Clone, Serialize)]
pub struct SpotDriverView {
    pub assignment_id: i32,
    pub user_id: Option<i32>,
    pub user_name: Option<String>,
    pub truck_number: Option<String>,
    pub is_override: bool,
    pub needs_coverage: bool,
}

// Camión estacionado en la vista de cinta
#[derive(Debug, Clone, Serialize)]
pub struct SpotTruckView {
    pub truck_spot_assignment_id: i32,
    pub truck_id: i32,
    pub truck_number: String,
}

// Un spot con todo lo que pasa en él para una fecha
#[derive(Debug, Clone, Serialize)]
pub struct SpotDayView {
    pub spot_id: i32,
    pub number: i32,
    pub label: String,
    pub routes: Vec<String>,
    pub assignment: Option<SpotDriverView>,
    pub truck: Option<SpotTruckView>,
}

#[derive(Debug, Serialize)]
pub struct BeltDayView {
    pub belt_id: i32,
    pub letter: String,
    pub name: String,
    pub date: NaiveDate,
    pub spots: Vec<SpotDayView>,
}

// Request para crear spots en una cinta
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSpotRequest {
    #[validate(range(min = 1, max = 200))]
    pub number: i32,
}

// Request para fijar o limpiar la ruta de un spot
#[derive(Debug, Deserialize, Validate)]
pub struct RouteOverrideRequest {
    #[validate(length(max = 20))]
    pub route_override: Option<String>,
}
