//! Áreas de la instalación fuera de las cintas (EO pool, unload, dock)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::models::route::RouteArea;

/// Tipo de área - mapea al ENUM facility_area_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "facility_area_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacilityAreaType {
    EoPool,
    Unload,
    Dock,
}

impl FacilityAreaType {
    /// Área de rutas que se muestran en este tipo de área
    pub fn route_area(self) -> RouteArea {
        match self {
            FacilityAreaType::EoPool => RouteArea::EoPool,
            FacilityAreaType::Unload => RouteArea::Unload,
            FacilityAreaType::Dock => RouteArea::Dock,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FacilityArea {
    pub id: i32,
    pub name: String,
    pub area_type: FacilityAreaType,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FacilitySpot {
    pub id: i32,
    pub area_id: i32,
    pub label: String,
}

/// Asignación diaria de un spot de área. Única por (facility_spot_id, date).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FacilityAssignment {
    pub id: i32,
    pub facility_spot_id: i32,
    pub date: NaiveDate,
    pub user_id: Option<i32>,
    pub truck_number: Option<String>,
    pub notes: Option<String>,
}
