//! Lógica de dominio sin acceso a base de datos
//!
//! Los controladores cargan los datos y delegan aquí las reglas.

pub mod belt_view;
pub mod belt_walk;
pub mod coverage_service;
pub mod schedule_service;
pub mod time_off_balance;
pub mod truck_lifecycle;
