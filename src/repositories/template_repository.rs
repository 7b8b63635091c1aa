use sqlx::PgPool;

use crate::models::assignment::TemplateAssignment;
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct TemplateRepository {
    pool: PgPool,
}

impl TemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_for(&self, spot_id: i32, day_of_week: i16) -> Result<Option<TemplateAssignment>, AppError> {
        let template = sqlx::query_as::<_, TemplateAssignment>(
            "SELECT * FROM template_assignments WHERE spot_id = $1 AND day_of_week = $2",
        )
        .bind(spot_id)
        .bind(day_of_week)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template)
    }

    pub async fn list(
        &self,
        day_of_week: Option<i16>,
        belt_id: Option<i32>,
    ) -> Result<Vec<TemplateAssignment>, AppError> {
        let templates = sqlx::query_as::<_, TemplateAssignment>(
            r#"
            SELECT t.* FROM template_assignments t
            JOIN spots s ON s.id = t.spot_id
            WHERE ($1::smallint IS NULL OR t.day_of_week = $1)
              AND ($2::integer IS NULL OR s.belt_id = $2)
            ORDER BY t.day_of_week, s.belt_id, s.number
            "#,
        )
        .bind(day_of_week)
        .bind(belt_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(templates)
    }

    pub async fn upsert(
        &self,
        spot_id: i32,
        day_of_week: i16,
        user_id: Option<i32>,
        truck_number: Option<String>,
    ) -> Result<TemplateAssignment, AppError> {
        let template = sqlx::query_as::<_, TemplateAssignment>(
            r#"
            INSERT INTO template_assignments (spot_id, day_of_week, user_id, truck_number)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (spot_id, day_of_week) DO UPDATE
            SET user_id = EXCLUDED.user_id,
                truck_number = EXCLUDED.truck_number
            RETURNING *
            "#,
        )
        .bind(spot_id)
        .bind(day_of_week)
        .bind(user_id)
        .bind(truck_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(template)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM template_assignments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
