use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::invite::InviteToken;
use crate::models::user::{AccessLevel, UserRole};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInviteRequest {
    #[validate(email)]
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub access_level: Option<AccessLevel>,
}

#[derive(Debug, Serialize)]
pub struct InviteResponse {
    pub id: i32,
    pub token: Uuid,
    pub email: Option<String>,
    pub role: UserRole,
    pub access_level: AccessLevel,
    pub expires_at: DateTime<Utc>,
}

impl From<InviteToken> for InviteResponse {
    fn from(invite: InviteToken) -> Self {
        Self {
            id: invite.id,
            token: invite.token,
            email: invite.email,
            role: invite.role,
            access_level: invite.access_level,
            expires_at: invite.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InviteValidationResponse {
    pub valid: bool,
    pub reason: Option<String>,
    pub email: Option<String>,
    pub role: UserRole,
    pub access_level: AccessLevel,
}
