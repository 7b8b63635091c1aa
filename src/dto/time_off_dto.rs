use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::time_off::{TimeOff, TimeOffStatus, TimeOffType};
use crate::services::coverage_service::{CoverageNeed, SwingDriver};
use crate::services::time_off_balance::BalanceLine;

#[derive(Debug, Default, Deserialize)]
pub struct TimeOffFilters {
    pub user_id: Option<i32>,
    pub status: Option<TimeOffStatus>,
    pub from: Option<String>,
    pub to: Option<String>,
}

// Solicitud para un día. Sin user_id = para uno mismo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTimeOffRequest {
    pub user_id: Option<i32>,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TimeOffType,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

// Solicitud para un rango de días
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTimeOffRangeRequest {
    pub user_id: Option<i32>,
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "type")]
    pub kind: TimeOffType,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TimeOffRangeResponse {
    pub created: Vec<TimeOff>,
    pub skipped_dates: Vec<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTimeOffStatusRequest {
    pub status: TimeOffStatus,
}

#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    pub user_id: Option<i32>,
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub user_id: i32,
    pub year: i32,
    pub balances: Vec<BalanceLine>,
}

#[derive(Debug, Serialize)]
pub struct CoverageResponse {
    pub date: NaiveDate,
    pub needs: Vec<CoverageNeed>,
    pub available_swing_drivers: Vec<SwingDriver>,
}
