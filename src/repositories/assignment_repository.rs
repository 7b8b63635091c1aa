use chrono::NaiveDate;
use sqlx::PgPool;
use std::collections::HashSet;

use crate::models::assignment::{Assignment, AssignmentDetail};
use crate::services::schedule_service::PlannedAssignment;
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Asignaciones del día con el nombre del conductor
    pub async fn list_details(
        &self,
        date: NaiveDate,
        belt_id: Option<i32>,
    ) -> Result<Vec<AssignmentDetail>, AppError> {
        let rows = sqlx::query_as::<_, AssignmentDetail>(
            r#"
            SELECT a.id, a.spot_id, a.date, a.user_id, u.name AS user_name,
                   a.truck_number, a.is_override
            FROM assignments a
            JOIN spots s ON s.id = a.spot_id
            LEFT JOIN users u ON u.id = a.user_id
            WHERE a.date = $1
              AND ($2::integer IS NULL OR s.belt_id = $2)
            ORDER BY s.belt_id, s.number
            "#,
        )
        .bind(date)
        .bind(belt_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Crear o reemplazar la asignación de (spot_id, date)
    pub async fn upsert(
        &self,
        spot_id: i32,
        date: NaiveDate,
        user_id: Option<i32>,
        truck_number: Option<String>,
        is_override: bool,
    ) -> Result<Assignment, AppError> {
        let assignment = sqlx::query_as::<_, Assignment>(
            r#"
            INSERT INTO assignments (spot_id, date, user_id, truck_number, is_override)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (spot_id, date) DO UPDATE
            SET user_id = EXCLUDED.user_id,
                truck_number = EXCLUDED.truck_number,
                is_override = EXCLUDED.is_override,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(spot_id)
        .bind(date)
        .bind(user_id)
        .bind(truck_number)
        .bind(is_override)
        .fetch_one(&self.pool)
        .await?;

        Ok(assignment)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Pares (spot_id, date) que ya tienen asignación en el rango
    pub async fn existing_pairs(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashSet<(i32, NaiveDate)>, AppError> {
        let rows: Vec<(i32, NaiveDate)> = sqlx::query_as(
            "SELECT spot_id, date FROM assignments WHERE date BETWEEN $1 AND $2",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Insertar si no existe; `false` cuando ya había fila
    pub async fn insert_if_absent(&self, planned: &PlannedAssignment) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO assignments (spot_id, date, user_id, truck_number, is_override)
            VALUES ($1, $2, $3, $4, FALSE)
            ON CONFLICT (spot_id, date) DO NOTHING
            "#,
        )
        .bind(planned.spot_id)
        .bind(planned.date)
        .bind(planned.user_id)
        .bind(planned.truck_number.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Usuarios con alguna asignación ese día
    pub async fn assigned_user_ids(&self, date: NaiveDate) -> Result<HashSet<i32>, AppError> {
        let rows: Vec<(i32,)> = sqlx::query_as(
            "SELECT DISTINCT user_id FROM assignments WHERE date = $1 AND user_id IS NOT NULL",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
