//! Modelo de Route (ruta de reparto)

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Dónde se muestra la ruta - mapea al ENUM route_area
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "route_area", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteArea {
    EoPool,
    Unload,
    Dock,
    BeltSpot,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Route {
    pub id: i32,
    pub number: String,
    pub spot_id: Option<i32>,
    pub assigned_area: RouteArea,
    pub description: Option<String>,
    pub is_active: bool,
}
