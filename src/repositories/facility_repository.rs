use chrono::NaiveDate;
use sqlx::PgPool;

use crate::dto::facility_dto::UpsertFacilityAssignmentRequest;
use crate::models::facility::{FacilityArea, FacilityAreaType, FacilityAssignment, FacilitySpot};
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct FacilityRepository {
    pool: PgPool,
}

impl FacilityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_areas(&self) -> Result<Vec<FacilityArea>, AppError> {
        let areas = sqlx::query_as::<_, FacilityArea>("SELECT * FROM facility_areas ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(areas)
    }

    pub async fn find_area(&self, id: i32) -> Result<Option<FacilityArea>, AppError> {
        let area = sqlx::query_as::<_, FacilityArea>("SELECT * FROM facility_areas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(area)
    }

    pub async fn create_area(&self, name: &str, area_type: FacilityAreaType) -> Result<FacilityArea, AppError> {
        let area = sqlx::query_as::<_, FacilityArea>(
            "INSERT INTO facility_areas (name, area_type) VALUES ($1, $2) RETURNING *",
        )
        .bind(name.trim())
        .bind(area_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(area)
    }

    pub async fn delete_area(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM facility_areas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list_spots(&self, area_id: i32) -> Result<Vec<FacilitySpot>, AppError> {
        let spots = sqlx::query_as::<_, FacilitySpot>(
            "SELECT * FROM facility_spots WHERE area_id = $1 ORDER BY label",
        )
        .bind(area_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(spots)
    }

    pub async fn find_spot(&self, id: i32) -> Result<Option<FacilitySpot>, AppError> {
        let spot = sqlx::query_as::<_, FacilitySpot>("SELECT * FROM facility_spots WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(spot)
    }

    pub async fn create_spot(&self, area_id: i32, label: &str) -> Result<FacilitySpot, AppError> {
        let spot = sqlx::query_as::<_, FacilitySpot>(
            "INSERT INTO facility_spots (area_id, label) VALUES ($1, $2) RETURNING *",
        )
        .bind(area_id)
        .bind(label.trim())
        .fetch_one(&self.pool)
        .await?;

        Ok(spot)
    }

    pub async fn delete_spot(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM facility_spots WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Asignaciones del día; `area_id` opcional
    pub async fn list_assignments(
        &self,
        date: NaiveDate,
        area_id: Option<i32>,
    ) -> Result<Vec<FacilityAssignment>, AppError> {
        let rows = sqlx::query_as::<_, FacilityAssignment>(
            r#"
            SELECT fa.* FROM facility_assignments fa
            JOIN facility_spots fs ON fs.id = fa.facility_spot_id
            WHERE fa.date = $1
              AND ($2::integer IS NULL OR fs.area_id = $2)
            ORDER BY fs.area_id, fs.label
            "#,
        )
        .bind(date)
        .bind(area_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn upsert_assignment(
        &self,
        date: NaiveDate,
        request: UpsertFacilityAssignmentRequest,
    ) -> Result<FacilityAssignment, AppError> {
        let row = sqlx::query_as::<_, FacilityAssignment>(
            r#"
            INSERT INTO facility_assignments (facility_spot_id, date, user_id, truck_number, notes)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (facility_spot_id, date) DO UPDATE
            SET user_id = EXCLUDED.user_id,
                truck_number = EXCLUDED.truck_number,
                notes = EXCLUDED.notes
            RETURNING *
            "#,
        )
        .bind(request.facility_spot_id)
        .bind(date)
        .bind(request.user_id)
        .bind(request.truck_number)
        .bind(request.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_assignment(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM facility_assignments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
