//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación del nivel de acceso.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    models::user::AccessLevel,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub username: String,
    pub access_level: AccessLevel,
}

impl AuthenticatedUser {
    /// 403 si el usuario está por debajo de `level`
    pub fn require(&self, level: AccessLevel) -> Result<(), AppError> {
        if self.access_level.at_least(level) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "This action requires {} access",
                level.as_str()
            )))
        }
    }

    pub fn has(&self, level: AccessLevel) -> bool {
        self.access_level.at_least(level)
    }
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.jwt)?;

    // Inyectar usuario autenticado en las extensions
    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.sub,
        username: claims.username,
        access_level: claims.access_level,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(level: AccessLevel) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 1,
            username: "lead".to_string(),
            access_level: level,
        }
    }

    #[test]
    fn test_require() {
        assert!(user(AccessLevel::OpLead).require(AccessLevel::TruckMover).is_ok());
        assert!(user(AccessLevel::HighestManager).require(AccessLevel::HighestManager).is_ok());
        let err = user(AccessLevel::TruckMover).require(AccessLevel::OpLead).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
