//! Modelo de User
//!
//! Usuarios del sistema (conductores, swing y managers) y la jerarquía
//! de niveles de acceso.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Rol operativo del usuario - mapea al ENUM user_role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Driver,
    Swing,
    Manager,
}

/// Nivel de acceso - mapea al ENUM access_level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "access_level", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessLevel {
    HighestManager,
    OpLead,
    TruckMover,
    Employee,
}

/// Jerarquía de mayor a menor; la posición define el rango
pub const ACCESS_HIERARCHY: [AccessLevel; 4] = [
    AccessLevel::HighestManager,
    AccessLevel::OpLead,
    AccessLevel::TruckMover,
    AccessLevel::Employee,
];

impl AccessLevel {
    /// 0 es el nivel más alto
    pub fn rank(self) -> usize {
        ACCESS_HIERARCHY
            .iter()
            .position(|level| *level == self)
            .unwrap_or(ACCESS_HIERARCHY.len())
    }

    pub fn at_least(self, required: AccessLevel) -> bool {
        self.rank() <= required.rank()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccessLevel::HighestManager => "HIGHEST_MANAGER",
            AccessLevel::OpLead => "OP_LEAD",
            AccessLevel::TruckMover => "TRUCK_MOVER",
            AccessLevel::Employee => "EMPLOYEE",
        }
    }
}

/// User - mapea exactamente a la tabla users
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
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
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_order() {
        assert!(AccessLevel::HighestManager.at_least(AccessLevel::OpLead));
        assert!(AccessLevel::OpLead.at_least(AccessLevel::OpLead));
        assert!(AccessLevel::OpLead.at_least(AccessLevel::TruckMover));
        assert!(!AccessLevel::TruckMover.at_least(AccessLevel::OpLead));
        assert!(!AccessLevel::Employee.at_least(AccessLevel::TruckMover));
        assert!(AccessLevel::Employee.at_least(AccessLevel::Employee));
    }

    #[test]
    fn test_access_level_serde_names() {
        let json = serde_json::to_string(&AccessLevel::TruckMover).unwrap();
        assert_eq!(json, "\"TRUCK_MOVER\"");
        let role: UserRole = serde_json::from_str("\"SWING\"").unwrap();
        assert_eq!(role, UserRole::Swing);
    }
}
