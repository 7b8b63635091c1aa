use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};

use crate::dto::truck_dto::{TruckFilters, UpdateTruckRequest};
use crate::models::assignment::{TruckSpotAssignment, TruckSpotDetail};
use crate::models::truck::{Truck, TruckStatus};
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct TruckRepository {
    pool: PgPool,
}

impl TruckRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filters: &TruckFilters) -> Result<Vec<Truck>, AppError> {
        let trucks = sqlx::query_as::<_, Truck>(
            r#"
            SELECT * FROM trucks
            WHERE ($1::truck_status IS NULL OR status = $1)
              AND ($2 OR status <> 'RETIRED' OR $1 = 'RETIRED')
            ORDER BY number
            "#,
        )
        .bind(filters.status)
        .bind(filters.include_retired)
        .fetch_all(&self.pool)
        .await?;

        Ok(trucks)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Truck>, AppError> {
        let truck = sqlx::query_as::<_, Truck>("SELECT * FROM trucks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(truck)
    }

    pub async fn find_by_number(&self, number: &str) -> Result<Option<Truck>, AppError> {
        let truck = sqlx::query_as::<_, Truck>(
            "SELECT * FROM trucks WHERE UPPER(number) = UPPER($1)",
        )
        .bind(number.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(truck)
    }

    pub async fn number_exists(&self, number: &str, except_id: Option<i32>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM trucks
                WHERE UPPER(number) = UPPER($1) AND ($2::integer IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(number.trim())
        .bind(except_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn create(
        &self,
        number: String,
        home_spot_id: Option<i32>,
        note: Option<String>,
    ) -> Result<Truck, AppError> {
        let truck = sqlx::query_as::<_, Truck>(
            r#"
            INSERT INTO trucks (number, home_spot_id, note, status)
            VALUES ($1, $2, $3, 'AVAILABLE')
            RETURNING *
            "#,
        )
        .bind(number)
        .bind(home_spot_id)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;

        Ok(truck)
    }

    /// Campos ausentes se conservan; `clear_*` los deja en NULL.
    /// Un camión retirado no se modifica (devuelve None).
    pub async fn update(&self, id: i32, changes: UpdateTruckRequest) -> Result<Option<Truck>, AppError> {
        let truck = sqlx::query_as::<_, Truck>(
            r#"
            UPDATE trucks
            SET number = COALESCE($2, number),
                home_spot_id = CASE WHEN $5 THEN NULL ELSE COALESCE($3, home_spot_id) END,
                note = CASE WHEN $6 THEN NULL ELSE COALESCE($4, note) END
            WHERE id = $1 AND status <> 'RETIRED'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.number)
        .bind(changes.home_spot_id)
        .bind(changes.note)
        .bind(changes.clear_home_spot)
        .bind(changes.clear_note)
        .fetch_optional(&self.pool)
        .await?;

        Ok(truck)
    }

    pub async fn list_spot_assignments(&self, date: NaiveDate) -> Result<Vec<TruckSpotDetail>, AppError> {
        let rows = sqlx::query_as::<_, TruckSpotDetail>(
            r#"
            SELECT tsa.id, tsa.truck_id, t.number AS truck_number, tsa.spot_id, tsa.date
            FROM truck_spot_assignments tsa
            JOIN trucks t ON t.id = tsa.truck_id
            WHERE tsa.date = $1
            ORDER BY tsa.spot_id
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_spot_assignment(&self, id: i32) -> Result<Option<TruckSpotAssignment>, AppError> {
        let row = sqlx::query_as::<_, TruckSpotAssignment>(
            "SELECT * FROM truck_spot_assignments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    // Operaciones para usar dentro de una transacción.
    // Orden de bloqueo: fecha de bindings, luego camiones por id, luego escrituras.

    /// Serializa los cambios de bindings de una fecha hasta el fin de la transacción
    pub async fn lock_bindings_for_date(conn: &mut PgConnection, date: NaiveDate) -> Result<(), AppError> {
        sqlx::query(
            "SELECT pg_advisory_xact_lock(hashtext('truck_spot_assignments'), ($1::date - DATE '2000-01-01'))",
        )
        .bind(date)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Bloquear varios camiones en orden de id
    pub async fn lock_trucks(conn: &mut PgConnection, ids: &[i32]) -> Result<Vec<Truck>, AppError> {
        let trucks = sqlx::query_as::<_, Truck>(
            "SELECT * FROM trucks WHERE id = ANY($1) ORDER BY id FOR UPDATE",
        )
        .bind(ids)
        .fetch_all(conn)
        .await?;

        Ok(trucks)
    }

    pub async fn lock_truck(conn: &mut PgConnection, id: i32) -> Result<Option<Truck>, AppError> {
        let truck = sqlx::query_as::<_, Truck>("SELECT * FROM trucks WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(truck)
    }

    /// Binding del camión ese día, si lo hay
    pub async fn binding_for_truck(
        conn: &mut PgConnection,
        truck_id: i32,
        date: NaiveDate,
    ) -> Result<Option<TruckSpotAssignment>, AppError> {
        let row = sqlx::query_as::<_, TruckSpotAssignment>(
            "SELECT * FROM truck_spot_assignments WHERE truck_id = $1 AND date = $2",
        )
        .bind(truck_id)
        .bind(date)
        .fetch_optional(conn)
        .await?;

        Ok(row)
    }

    /// Binding del spot ese día, si lo hay
    pub async fn binding_for_spot(
        conn: &mut PgConnection,
        spot_id: i32,
        date: NaiveDate,
    ) -> Result<Option<TruckSpotAssignment>, AppError> {
        let row = sqlx::query_as::<_, TruckSpotAssignment>(
            "SELECT * FROM truck_spot_assignments WHERE spot_id = $1 AND date = $2",
        )
        .bind(spot_id)
        .bind(date)
        .fetch_optional(conn)
        .await?;

        Ok(row)
    }

    pub async fn delete_binding_for_truck(
        conn: &mut PgConnection,
        truck_id: i32,
        date: NaiveDate,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM truck_spot_assignments WHERE truck_id = $1 AND date = $2")
            .bind(truck_id)
            .bind(date)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_binding(conn: &mut PgConnection, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM truck_spot_assignments WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Quitar los bindings desde `from` en adelante; los anteriores quedan como historial
    pub async fn delete_bindings_from(
        conn: &mut PgConnection,
        truck_id: i32,
        from: NaiveDate,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM truck_spot_assignments WHERE truck_id = $1 AND date >= $2")
            .bind(truck_id)
            .bind(from)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Upsert por (spot_id, date): el camión anterior del spot queda reemplazado
    pub async fn upsert_binding(
        conn: &mut PgConnection,
        truck_id: i32,
        spot_id: i32,
        date: NaiveDate,
    ) -> Result<TruckSpotAssignment, AppError> {
        let row = sqlx::query_as::<_, TruckSpotAssignment>(
            r#"
            INSERT INTO truck_spot_assignments (truck_id, spot_id, date)
            VALUES ($1, $2, $3)
            ON CONFLICT (spot_id, date) DO UPDATE
            SET truck_id = EXCLUDED.truck_id,
                created_at = NOW()
            RETURNING *
            "#,
        )
        .bind(truck_id)
        .bind(spot_id)
        .bind(date)
        .fetch_one(conn)
        .await?;

        Ok(row)
    }

    pub async fn set_status(
        conn: &mut PgConnection,
        id: i32,
        status: TruckStatus,
        note: Option<&str>,
    ) -> Result<Truck, AppError> {
        let truck = sqlx::query_as::<_, Truck>(
            r#"
            UPDATE trucks
            SET status = $2,
                note = $3,
                retired_at = CASE WHEN $2 = 'RETIRED'::truck_status THEN NOW() ELSE retired_at END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(note)
        .fetch_one(conn)
        .await?;

        Ok(truck)
    }
}
