//! Modelo de InviteToken

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::user::{AccessLevel, UserRole};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InviteToken {
    pub id: i32,
    pub token: Uuid,
    pub email: Option<String>,
    pub role: UserRole,
    pub access_level: AccessLevel,
    pub created_by: Option<i32>,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Estado de una invitación en un instante dado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteState {
    Valid,
    Used,
    Expired,
}

impl InviteToken {
    pub fn state_at(&self, now: DateTime<Utc>) -> InviteState {
        if self.used_at.is_some() {
            InviteState::Used
        } else if now >= self.expires_at {
            InviteState::Expired
        } else {
            InviteState::Valid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn invite(expires_in: Duration, used: bool) -> InviteToken {
        let now = Utc::now();
        InviteToken {
            id: 1,
            token: Uuid::new_v4(),
            email: None,
            role: UserRole::Driver,
            access_level: AccessLevel::Employee,
            created_by: Some(1),
            expires_at: now + expires_in,
            used_at: used.then_some(now),
            created_at: now,
        }
    }

    #[test]
    fn test_invite_state() {
        let now = Utc::now();
        assert_eq!(invite(Duration::hours(1), false).state_at(now), InviteState::Valid);
        assert_eq!(invite(Duration::hours(-1), false).state_at(now), InviteState::Expired);
        assert_eq!(invite(Duration::hours(1), true).state_at(now), InviteState::Used);
    }
}
