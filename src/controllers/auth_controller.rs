use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::auth_dto::{ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest};
use crate::dto::people_dto::UserResponse;
use crate::models::invite::InviteState;
use crate::repositories::invite_repository::InviteRepository;
use crate::repositories::user_repository::{NewUser, UserRepository};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use crate::utils::validation::normalize_optional_text;

pub struct AuthController {
    pool: PgPool,
    users: UserRepository,
    jwt: JwtConfig,
    default_vacation_days: i32,
    default_sick_days: i32,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
            users: UserRepository::new(state.pool.clone()),
            jwt: state.jwt.clone(),
            default_vacation_days: state.config.default_vacation_days,
            default_sick_days: state.config.default_sick_days,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        // Mismo mensaje para usuario inexistente y password incorrecto
        let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

        let user = self
            .users
            .find_by_login(&request.username)
            .await?
            .ok_or_else(invalid)?;

        if !verify(&request.password, &user.password_hash)? {
            tracing::warn!("🔒 Login fallido para {}", request.username);
            return Err(invalid());
        }

        if !user.is_active {
            return Err(AppError::Unauthorized("User account is inactive".to_string()));
        }

        let token = generate_token(&user, &self.jwt)?;
        tracing::info!("🔑 Login correcto: {} ({})", user.username, user.access_level.as_str());

        Ok(LoginResponse {
            token,
            expires_in: self.jwt.expiration,
            user: UserResponse::from(user),
        })
    }

    pub async fn me(&self, user_id: i32) -> Result<UserResponse, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(user))
    }

    pub async fn change_password(
        &self,
        user_id: i32,
        request: ChangePasswordRequest,
    ) -> Result<ApiResponse<()>, AppError> {
        request.validate()?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !verify(&request.current_password, &user.password_hash)? {
            return Err(AppError::Unauthorized("Current password is incorrect".to_string()));
        }

        let password_hash = hash(&request.new_password, DEFAULT_COST)?;
        self.users.set_password(user.id, &password_hash).await?;

        Ok(ApiResponse::message("Password updated"))
    }

    /// Alta con invitación: crea el usuario y consume el token en la misma transacción
    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse, AppError> {
        request.validate()?;

        let username = request.username.trim().to_string();
        if self.users.username_exists(&username).await? {
            return Err(AppError::Conflict("Username is already taken".to_string()));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)?;

        let mut tx = self.pool.begin().await?;

        let invite = InviteRepository::lock_by_token(&mut tx, request.token)
            .await?
            .ok_or_else(|| AppError::NotFound("Invite not found".to_string()))?;

        match invite.state_at(Utc::now()) {
            InviteState::Used => {
                return Err(AppError::Conflict("Invite has already been used".to_string()))
            }
            InviteState::Expired => {
                return Err(AppError::BadRequest("Invite has expired".to_string()))
            }
            InviteState::Valid => {}
        }

        let new_user = NewUser {
            name: request.name.trim().to_string(),
            username,
            email: normalize_optional_text(request.email).or(invite.email.clone()),
            phone: normalize_optional_text(request.phone),
            password_hash,
            role: invite.role,
            access_level: invite.access_level,
            employee_id: None,
            vacation_days: self.default_vacation_days,
            sick_days: self.default_sick_days,
        };

        let user = UserRepository::insert(&mut *tx, new_user).await?;
        InviteRepository::mark_used(&mut tx, invite.id).await?;
        tx.commit().await?;

        tracing::info!("👤 Usuario registrado por invitación: {}", user.username);

        Ok(UserResponse::from(user))
    }
}
