//! Backend del dashboard de la instalación de clasificación
//!
//! Asignaciones diarias de conductores por spot, flota de camiones,
//! tiempo libre y cobertura, rutas y áreas de la instalación.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
