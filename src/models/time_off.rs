//! Modelo de TimeOff
//!
//! Una solicitud por (user_id, date).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Estado de la solicitud - mapea al ENUM time_off_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "time_off_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeOffStatus {
    Pending,
    Approved,
    Denied,
}

/// Categoría de ausencia - mapea al ENUM time_off_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[sqlx(type_name = "time_off_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeOffType {
    Vacation,
    Sick,
    Personal,
    Unpaid,
}

impl TimeOffType {
    pub const ALL: [TimeOffType; 4] = [
        TimeOffType::Vacation,
        TimeOffType::Sick,
        TimeOffType::Personal,
        TimeOffType::Unpaid,
    ];
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TimeOff {
    pub id: i32,
    pub user_id: i32,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: TimeOffType,
    pub status: TimeOffStatus,
    pub notes: Option<String>,
    pub reviewed_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Solicitud con el nombre del usuario, para listados
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TimeOffDetail {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: TimeOffType,
    pub status: TimeOffStatus,
    pub notes: Option<String>,
    pub reviewed_by: Option<i32>,
}
