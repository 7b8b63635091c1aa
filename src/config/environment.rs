//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    /// Duración del token en segundos
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub invite_expiration_hours: i64,
    pub default_vacation_days: i32,
    pub default_sick_days: i32,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno.
    /// Solo `JWT_SECRET` es obligatoria.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: parse_or("PORT", 3000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_expiration: parse_or("JWT_EXPIRATION", 7 * 24 * 3600)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| split_origins(&origins))
                .unwrap_or_default(),
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", 30)?,
            invite_expiration_hours: parse_or("INVITE_EXPIRATION_HOURS", 72)?,
            default_vacation_days: parse_or("DEFAULT_VACATION_DAYS", 10)?,
            default_sick_days: parse_or("DEFAULT_SICK_DAYS", 5)?,
        })
    }

    /// Configuración fija para tests
    pub fn for_tests(jwt_secret: &str) -> Self {
        Self {
            environment: "test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            jwt_secret: jwt_secret.to_string(),
            jwt_expiration: 3600,
            cors_origins: Vec::new(),
            request_timeout_secs: 5,
            invite_expiration_hours: 72,
            default_vacation_days: 10,
            default_sick_days: 5,
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", key)),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_origins_ignores_blanks() {
        let origins = split_origins("http://localhost:5173, ,https://dash.example.com,");
        assert_eq!(
            origins,
            vec!["http://localhost:5173".to_string(), "https://dash.example.com".to_string()]
        );
    }

    #[test]
    fn test_server_url() {
        let config = EnvironmentConfig::for_tests("secret");
        assert_eq!(config.server_url(), "127.0.0.1:0");
        assert!(!config.is_production());
        assert!(!config.is_development());
    }
}
