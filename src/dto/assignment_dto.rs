use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::assignment::Assignment;

#[derive(Debug, Deserialize)]
pub struct AssignmentQuery {
    pub date: String,
    pub belt_id: Option<i32>,
}

// Crear o reemplazar la asignación de (spot_id, date)
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertAssignmentRequest {
    pub spot_id: i32,
    pub date: String,
    pub user_id: Option<i32>,
    #[validate(custom = "crate::utils::validation::validate_truck_number")]
    pub truck_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub has_template: bool,
}

// Copiar la plantilla semanal sobre un rango de fechas
#[derive(Debug, Deserialize)]
pub struct ApplyTemplateRequest {
    pub start_date: String,
    pub end_date: String,
    pub belt_id: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct ApplyTemplateResponse {
    pub created: usize,
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    pub day_of_week: Option<i16>,
    pub belt_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertTemplateRequest {
    pub spot_id: i32,
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: i16,
    pub user_id: Option<i32>,
    #[validate(custom = "crate::utils::validation::validate_truck_number")]
    pub truck_number: Option<String>,
}
