use sqlx::PgPool;

use crate::models::belt::{Belt, Spot, SpotWithBelt};
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct BeltRepository {
    pool: PgPool,
}

impl BeltRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_belts(&self) -> Result<Vec<Belt>, AppError> {
        let belts = sqlx::query_as::<_, Belt>("SELECT * FROM belts ORDER BY letter")
            .fetch_all(&self.pool)
            .await?;

        Ok(belts)
    }

    pub async fn find_belt(&self, id: i32) -> Result<Option<Belt>, AppError> {
        let belt = sqlx::query_as::<_, Belt>("SELECT * FROM belts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(belt)
    }

    pub async fn list_spots(&self) -> Result<Vec<Spot>, AppError> {
        let spots = sqlx::query_as::<_, Spot>("SELECT * FROM spots ORDER BY belt_id, number")
            .fetch_all(&self.pool)
            .await?;

        Ok(spots)
    }

    /// Spots con la letra de su cinta, ordenados por cinta y número.
    /// `belt_id` None = todas las cintas activas.
    pub async fn spots_with_belt(&self, belt_id: Option<i32>) -> Result<Vec<SpotWithBelt>, AppError> {
        let spots = sqlx::query_as::<_, SpotWithBelt>(
            r#"
            SELECT s.id, s.belt_id, b.letter AS belt_letter, s.number, s.route_override
            FROM spots s
            JOIN belts b ON b.id = s.belt_id
            WHERE ($1::integer IS NULL AND b.is_active) OR s.belt_id = $1
            ORDER BY b.letter, s.number
            "#,
        )
        .bind(belt_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(spots)
    }

    pub async fn find_spot(&self, id: i32) -> Result<Option<SpotWithBelt>, AppError> {
        let spot = sqlx::query_as::<_, SpotWithBelt>(
            r#"
            SELECT s.id, s.belt_id, b.letter AS belt_letter, s.number, s.route_override
            FROM spots s
            JOIN belts b ON b.id = s.belt_id
            WHERE s.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(spot)
    }

    pub async fn create_spot(&self, belt_id: i32, number: i32) -> Result<Spot, AppError> {
        let spot = sqlx::query_as::<_, Spot>(
            "INSERT INTO spots (belt_id, number) VALUES ($1, $2) RETURNING *",
        )
        .bind(belt_id)
        .bind(number)
        .fetch_one(&self.pool)
        .await?;

        Ok(spot)
    }

    pub async fn set_route_override(
        &self,
        spot_id: i32,
        route_override: Option<String>,
    ) -> Result<Option<Spot>, AppError> {
        let spot = sqlx::query_as::<_, Spot>(
            "UPDATE spots SET route_override = $2 WHERE id = $1 RETURNING *",
        )
        .bind(spot_id)
        .bind(route_override)
        .fetch_optional(&self.pool)
        .await?;

        Ok(spot)
    }
}
