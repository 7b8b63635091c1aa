use sqlx::{PgExecutor, PgPool};

use crate::dto::people_dto::{PeopleFilters, UpdateUserRequest};
use crate::models::user::{AccessLevel, User, UserRole};
use crate::utils::errors::AppError;

/// Datos para insertar un usuario (password ya hasheado)
#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
    pub access_level: AccessLevel,
    pub employee_id: Option<String>,
    pub vacation_days: i32,
    pub sick_days: i32,
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Buscar por username o email, sin distinguir mayúsculas
    pub async fn find_by_login(&self, identifier: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE LOWER(username) = LOWER($1)
               OR (email IS NOT NULL AND LOWER(email) = LOWER($1))
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(identifier.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(username) = LOWER($1))",
        )
        .bind(username.trim())
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn list(&self, filters: &PeopleFilters) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE ($1::user_role IS NULL OR role = $1)
              AND ($2::boolean IS NULL OR is_active = $2)
            ORDER BY name
            "#,
        )
        .bind(filters.role)
        .bind(filters.active)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn list_active_by_role(&self, role: UserRole) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role = $1 AND is_active ORDER BY name",
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        Self::insert(&self.pool, new_user).await
    }

    /// Insertar dentro de una transacción o con el pool
    pub async fn insert<'e, E: PgExecutor<'e>>(executor: E, new_user: NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, username, email, phone, password_hash, role, access_level,
                               employee_id, vacation_days, sick_days)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(new_user.name)
        .bind(new_user.username)
        .bind(new_user.email)
        .bind(new_user.phone)
        .bind(new_user.password_hash)
        .bind(new_user.role)
        .bind(new_user.access_level)
        .bind(new_user.employee_id)
        .bind(new_user.vacation_days)
        .bind(new_user.sick_days)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    pub async fn update(&self, id: i32, changes: UpdateUserRequest) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                role = COALESCE($5, role),
                access_level = COALESCE($6, access_level),
                employee_id = COALESCE($7, employee_id),
                vacation_days = COALESCE($8, vacation_days),
                sick_days = COALESCE($9, sick_days),
                is_active = COALESCE($10, is_active)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.phone)
        .bind(changes.role)
        .bind(changes.access_level)
        .bind(changes.employee_id)
        .bind(changes.vacation_days)
        .bind(changes.sick_days)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn set_password(&self, id: i32, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Baja lógica; las asignaciones históricas se conservan
    pub async fn deactivate(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
