//! Modelos de asignaciones: conductor por spot/fecha, camión por spot/fecha
//! y la plantilla semanal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Conductor + número de camión para un spot en una fecha.
/// Único por (spot_id, date).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Assignment {
    pub id: i32,
    pub spot_id: i32,
    pub date: NaiveDate,
    pub user_id: Option<i32>,
    pub truck_number: Option<String>,
    pub is_override: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Asignación con nombre del conductor resuelto
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AssignmentDetail {
    pub id: i32,
    pub spot_id: i32,
    pub date: NaiveDate,
    pub user_id: Option<i32>,
    pub user_name: Option<String>,
    pub truck_number: Option<String>,
    pub is_override: bool,
}

/// Camión estacionado en un spot para una fecha, independiente del conductor.
/// Único por (spot_id, date) y por (truck_id, date).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TruckSpotAssignment {
    pub id: i32,
    pub truck_id: i32,
    pub spot_id: i32,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Binding con el número de camión resuelto
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TruckSpotDetail {
    pub id: i32,
    pub truck_id: i32,
    pub truck_number: String,
    pub spot_id: i32,
    pub date: NaiveDate,
}

/// Asignación por defecto de un spot para un día de la semana (0 = domingo)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TemplateAssignment {
    pub id: i32,
    pub spot_id: i32,
    pub day_of_week: i16,
    pub user_id: Option<i32>,
    pub truck_number: Option<String>,
}
