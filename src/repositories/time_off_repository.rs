use chrono::NaiveDate;
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};

use crate::models::time_off::{TimeOff, TimeOffDetail, TimeOffStatus, TimeOffType};
use crate::utils::errors::AppError;

/// Filtros ya resueltos (fechas parseadas)
#[derive(Debug, Default)]
pub struct TimeOffQuery {
    pub user_id: Option<i32>,
    pub status: Option<TimeOffStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct TimeOffRepository {
    pool: PgPool,
}

impl TimeOffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &TimeOffQuery) -> Result<Vec<TimeOffDetail>, AppError> {
        let rows = sqlx::query_as::<_, TimeOffDetail>(
            r#"
            SELECT t.id, t.user_id, u.name AS user_name, t.date, t.type, t.status,
                   t.notes, t.reviewed_by
            FROM time_off t
            JOIN users u ON u.id = t.user_id
            WHERE ($1::integer IS NULL OR t.user_id = $1)
              AND ($2::time_off_status IS NULL OR t.status = $2)
              AND ($3::date IS NULL OR t.date >= $3)
              AND ($4::date IS NULL OR t.date <= $4)
            ORDER BY t.date, u.name
            "#,
        )
        .bind(query.user_id)
        .bind(query.status)
        .bind(query.from)
        .bind(query.to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<TimeOff>, AppError> {
        let row = sqlx::query_as::<_, TimeOff>("SELECT * FROM time_off WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Insertar si el usuario no tiene ya solicitud ese día
    pub async fn create_if_absent(
        &self,
        user_id: i32,
        date: NaiveDate,
        kind: TimeOffType,
        notes: Option<&str>,
    ) -> Result<Option<TimeOff>, AppError> {
        let row = sqlx::query_as::<_, TimeOff>(
            r#"
            INSERT INTO time_off (user_id, date, type, notes)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, date) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(kind)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn set_status(
        &self,
        id: i32,
        status: TimeOffStatus,
        reviewed_by: i32,
    ) -> Result<Option<TimeOff>, AppError> {
        let row = sqlx::query_as::<_, TimeOff>(
            "UPDATE time_off SET status = $2, reviewed_by = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(reviewed_by)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM time_off WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Usuarios con ausencia APPROVED ese día
    pub async fn approved_user_ids(&self, date: NaiveDate) -> Result<HashSet<i32>, AppError> {
        let rows: Vec<(i32,)> = sqlx::query_as(
            "SELECT user_id FROM time_off WHERE date = $1 AND status = 'APPROVED'",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Días APPROVED por tipo dentro del año
    pub async fn used_days_by_type(
        &self,
        user_id: i32,
        year: i32,
    ) -> Result<HashMap<TimeOffType, i32>, AppError> {
        let rows: Vec<(TimeOffType, i64)> = sqlx::query_as(
            r#"
            SELECT type, COUNT(*)
            FROM time_off
            WHERE user_id = $1
              AND status = 'APPROVED'
              AND EXTRACT(YEAR FROM date)::integer = $2
            GROUP BY type
            "#,
        )
        .bind(user_id)
        .bind(year)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(kind, count)| (kind, count as i32))
            .collect())
    }
}
