use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::invite::InviteToken;
use crate::models::user::{AccessLevel, UserRole};
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct InviteRepository {
    pool: PgPool,
}

impl InviteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        email: Option<String>,
        role: UserRole,
        access_level: AccessLevel,
        created_by: i32,
        expires_at: DateTime<Utc>,
    ) -> Result<InviteToken, AppError> {
        let invite = sqlx::query_as::<_, InviteToken>(
            r#"
            INSERT INTO invite_tokens (token, email, role, access_level, created_by, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(role)
        .bind(access_level)
        .bind(created_by)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(invite)
    }

    /// Invitaciones sin usar y sin expirar
    pub async fn list_pending(&self) -> Result<Vec<InviteToken>, AppError> {
        let invites = sqlx::query_as::<_, InviteToken>(
            r#"
            SELECT * FROM invite_tokens
            WHERE used_at IS NULL AND expires_at > NOW()
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(invites)
    }

    pub async fn find_by_token(&self, token: Uuid) -> Result<Option<InviteToken>, AppError> {
        let invite = sqlx::query_as::<_, InviteToken>("SELECT * FROM invite_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        Ok(invite)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM invite_tokens WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Bloquea la invitación dentro de la transacción del registro
    pub async fn lock_by_token(conn: &mut PgConnection, token: Uuid) -> Result<Option<InviteToken>, AppError> {
        let invite = sqlx::query_as::<_, InviteToken>(
            "SELECT * FROM invite_tokens WHERE token = $1 FOR UPDATE",
        )
        .bind(token)
        .fetch_optional(conn)
        .await?;

        Ok(invite)
    }

    pub async fn mark_used(conn: &mut PgConnection, id: i32) -> Result<(), AppError> {
        sqlx::query("UPDATE invite_tokens SET used_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(())
    }
}
