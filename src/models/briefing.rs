use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Nota diaria para el turno
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DailyBriefing {
    pub id: i32,
    pub date: NaiveDate,
    pub content: String,
    pub updated_by: Option<i32>,
    pub updated_at: DateTime<Utc>,
}
