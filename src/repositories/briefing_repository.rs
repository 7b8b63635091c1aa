use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::briefing::DailyBriefing;
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct BriefingRepository {
    pool: PgPool,
}

impl BriefingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_date(&self, date: NaiveDate) -> Result<Option<DailyBriefing>, AppError> {
        let briefing = sqlx::query_as::<_, DailyBriefing>(
            "SELECT * FROM daily_briefings WHERE date = $1",
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(briefing)
    }

    /// Un briefing por fecha; guardar reemplaza el contenido
    pub async fn upsert(
        &self,
        date: NaiveDate,
        content: &str,
        updated_by: i32,
    ) -> Result<DailyBriefing, AppError> {
        let briefing = sqlx::query_as::<_, DailyBriefing>(
            r#"
            INSERT INTO daily_briefings (date, content, updated_by)
            VALUES ($1, $2, $3)
            ON CONFLICT (date) DO UPDATE
            SET content = EXCLUDED.content,
                updated_by = EXCLUDED.updated_by,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(date)
        .bind(content)
        .bind(updated_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(briefing)
    }
}
