use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::briefing::DailyBriefing;

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertBriefingRequest {
    pub date: String,
    #[validate(length(max = 10000))]
    pub content: String,
}

// Sin briefing guardado se responde con contenido vacío
#[derive(Debug, Serialize)]
pub struct BriefingResponse {
    pub date: NaiveDate,
    pub content: String,
    pub updated_by: Option<i32>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl BriefingResponse {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            content: String::new(),
            updated_by: None,
            updated_at: None,
        }
    }
}

impl From<DailyBriefing> for BriefingResponse {
    fn from(briefing: DailyBriefing) -> Self {
        Self {
            date: briefing.date,
            content: briefing.content,
            updated_by: briefing.updated_by,
            updated_at: Some(briefing.updated_at),
        }
    }
}
