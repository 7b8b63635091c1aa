//! Modelo de Truck
//!
//! Mapea a la tabla trucks. El retiro es un borrado lógico: status RETIRED
//! y `retired_at`, nunca se elimina la fila.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Estado del camión - mapea al ENUM truck_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "truck_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TruckStatus {
    Available,
    Assigned,
    OutOfService,
    Retired,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Truck {
    pub id: i32,
    pub number: String,
    pub status: TruckStatus,
    pub note: Option<String>,
    pub home_spot_id: Option<i32>,
    pub retired_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
