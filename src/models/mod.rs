//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL de `migrations/`.

pub mod assignment;
pub mod belt;
pub mod briefing;
pub mod facility;
pub mod invite;
pub mod route;
pub mod time_off;
pub mod truck;
pub mod user;
