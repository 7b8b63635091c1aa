use sqlx::PgPool;
use std::collections::HashMap;

use crate::dto::route_dto::{CreateRouteRequest, RouteFilters, UpdateRouteRequest};
use crate::models::route::{Route, RouteArea};
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filters: &RouteFilters) -> Result<Vec<Route>, AppError> {
        let routes = sqlx::query_as::<_, Route>(
            r#"
            SELECT * FROM routes
            WHERE ($1::route_area IS NULL OR assigned_area = $1)
              AND ($2::boolean IS NULL OR is_active = $2)
            ORDER BY number
            "#,
        )
        .bind(filters.area)
        .bind(filters.active)
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }

    pub async fn list_active_for_area(&self, area: RouteArea) -> Result<Vec<Route>, AppError> {
        let routes = sqlx::query_as::<_, Route>(
            "SELECT * FROM routes WHERE assigned_area = $1 AND is_active ORDER BY number",
        )
        .bind(area)
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }

    /// Números de ruta activos agrupados por spot
    pub async fn active_numbers_by_spot(&self) -> Result<HashMap<i32, Vec<String>>, AppError> {
        let rows: Vec<(i32, String)> = sqlx::query_as(
            r#"
            SELECT spot_id, number FROM routes
            WHERE is_active AND spot_id IS NOT NULL AND assigned_area = 'BELT_SPOT'
            ORDER BY number
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_spot: HashMap<i32, Vec<String>> = HashMap::new();
        for (spot_id, number) in rows {
            by_spot.entry(spot_id).or_default().push(number);
        }

        Ok(by_spot)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Route>, AppError> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(route)
    }

    pub async fn create(&self, request: CreateRouteRequest) -> Result<Route, AppError> {
        let route = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (number, spot_id, assigned_area, description)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(request.number.trim())
        .bind(request.spot_id)
        .bind(request.assigned_area)
        .bind(request.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(route)
    }

    /// `clear_spot` desvincula la ruta de su spot (rutas fuera de las cintas)
    pub async fn update(
        &self,
        id: i32,
        changes: UpdateRouteRequest,
        clear_spot: bool,
    ) -> Result<Option<Route>, AppError> {
        let route = sqlx::query_as::<_, Route>(
            r#"
            UPDATE routes
            SET number = COALESCE($2, number),
                spot_id = CASE WHEN $7 THEN NULL ELSE COALESCE($3, spot_id) END,
                assigned_area = COALESCE($4, assigned_area),
                description = COALESCE($5, description),
                is_active = COALESCE($6, is_active)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.number.as_deref().map(str::trim))
        .bind(changes.spot_id)
        .bind(changes.assigned_area)
        .bind(changes.description)
        .bind(changes.is_active)
        .bind(clear_spot)
        .fetch_optional(&self.pool)
        .await?;

        Ok(route)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
