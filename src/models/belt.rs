//! Modelos de Belt y Spot

use serde::Serialize;
use sqlx::FromRow;

/// Cinta de clasificación (A–D)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Belt {
    pub id: i32,
    pub letter: String,
    pub name: String,
    pub is_active: bool,
}

/// Posición numerada dentro de una cinta
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Spot {
    pub id: i32,
    pub belt_id: i32,
    pub number: i32,
    pub route_override: Option<String>,
}

/// Spot con los datos de su cinta, para listados ordenados
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SpotWithBelt {
    pub id: i32,
    pub belt_id: i32,
    pub belt_letter: String,
    pub number: i32,
    pub route_override: Option<String>,
}

impl SpotWithBelt {
    /// Etiqueta corta, p. ej. "A1"
    pub fn label(&self) -> String {
        format!("{}{}", self.belt_letter, self.number)
    }
}
