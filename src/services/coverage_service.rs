//! Cálculo de necesidades de cobertura
//!
//! Para una fecha, un spot necesita cobertura cuando no tiene asignación
//! (o la asignación no tiene conductor) o cuando su conductor tiene
//! tiempo libre APROBADO ese día. Los swing disponibles son los usuarios
//! SWING activos que no están asignados ni libres esa fecha.

use serde::Serialize;
use std::collections::HashSet;

use crate::models::assignment::AssignmentDetail;
use crate::models::belt::SpotWithBelt;
use crate::models::user::{User, UserRole};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CoverageReason {
    Unassigned,
    TimeOff,
}

/// Spot con su asignación del día, tal como sale de la consulta
#[derive(Debug, Clone)]
pub struct SpotSnapshot {
    pub spot: SpotWithBelt,
    pub assignment: Option<AssignmentDetail>,
    pub routes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverageNeed {
    pub spot_id: i32,
    pub spot_label: String,
    pub belt_id: i32,
    pub belt_letter: String,
    pub spot_number: i32,
    pub reason: CoverageReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment: Option<AssignmentDetail>,
    pub routes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SwingDriver {
    pub id: i32,
    pub name: String,
}

/// Clasificar cada spot. El orden de entrada se conserva.
pub fn classify_spots(
    snapshots: Vec<SpotSnapshot>,
    approved_off: &HashSet<i32>,
) -> Vec<CoverageNeed> {
    snapshots
        .into_iter()
        .filter_map(|snapshot| {
            let reason = match snapshot.assignment.as_ref().and_then(|a| a.user_id) {
                None => CoverageReason::Unassigned,
                Some(user_id) if approved_off.contains(&user_id) => CoverageReason::TimeOff,
                Some(_) => return None,
            };

            Some(CoverageNeed {
                spot_id: snapshot.spot.id,
                spot_label: snapshot.spot.label(),
                belt_id: snapshot.spot.belt_id,
                belt_letter: snapshot.spot.belt_letter,
                spot_number: snapshot.spot.number,
                reason,
                assignment: snapshot.assignment,
                routes: snapshot.routes,
            })
        })
        .collect()
}

/// Swing activos que no están asignados ni con tiempo libre aprobado
pub fn available_swing_drivers(
    users: &[User],
    assigned: &HashSet<i32>,
    approved_off: &HashSet<i32>,
) -> Vec<SwingDriver> {
    users
        .iter()
        .filter(|u| u.is_active && u.role == UserRole::Swing)
        .filter(|u| !assigned.contains(&u.id) && !approved_off.contains(&u.id))
        .map(|u| SwingDriver {
            id: u.id,
            name: u.name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::AccessLevel;
    use chrono::{NaiveDate, Utc};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn spot(id: i32, letter: &str, number: i32) -> SpotWithBelt {
        SpotWithBelt {
            id,
            belt_id: letter.as_bytes()[0] as i32 - 64,
            belt_letter: letter.to_string(),
            number,
            route_override: None,
        }
    }

    fn assignment(spot_id: i32, user_id: Option<i32>) -> AssignmentDetail {
        AssignmentDetail {
            id: spot_id * 10,
            spot_id,
            date: date(),
            user_id,
            user_name: user_id.map(|id| format!("User {}", id)),
            truck_number: Some(format!("T{}", spot_id)),
            is_override: false,
        }
    }

    fn user(id: i32, role: UserRole, active: bool) -> User {
        User {
            id,
            name: format!("User {}", id),
            username: format!("user{}", id),
            email: None,
            phone: None,
            password_hash: String::new(),
            role,
            access_level: AccessLevel::Employee,
            employee_id: None,
            vacation_days: 10,
            sick_days: 5,
            is_active: active,
            created_at: Utc::now(),
        }
    }

    fn snapshots() -> Vec<SpotSnapshot> {
        vec![
            SpotSnapshot { spot: spot(1, "A", 1), assignment: Some(assignment(1, Some(1))), routes: vec![] },
            SpotSnapshot { spot: spot(2, "A", 2), assignment: None, routes: vec!["412".into()] },
            SpotSnapshot { spot: spot(3, "A", 3), assignment: Some(assignment(3, Some(3))), routes: vec![] },
            SpotSnapshot { spot: spot(4, "B", 1), assignment: Some(assignment(4, None)), routes: vec![] },
        ]
    }

    #[test]
    fn test_unassigned_spots_listed_once() {
        let needs = classify_spots(snapshots(), &HashSet::new());
        let ids: Vec<i32> = needs.iter().map(|n| n.spot_id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert!(needs.iter().all(|n| n.reason == CoverageReason::Unassigned));
        assert_eq!(needs[0].spot_label, "A2");
        assert_eq!(needs[0].routes, vec!["412".to_string()]);
    }

    #[test]
    fn test_approved_time_off_marks_spot() {
        let off: HashSet<i32> = [3].into_iter().collect();
        let needs = classify_spots(snapshots(), &off);
        let classified: Vec<(i32, CoverageReason)> =
            needs.iter().map(|n| (n.spot_id, n.reason)).collect();
        assert_eq!(
            classified,
            vec![
                (2, CoverageReason::Unassigned),
                (3, CoverageReason::TimeOff),
                (4, CoverageReason::Unassigned),
            ]
        );
        assert_eq!(needs[1].assignment.as_ref().and_then(|a| a.user_id), Some(3));
    }

    #[test]
    fn test_covered_spot_not_listed() {
        let off: HashSet<i32> = [99].into_iter().collect();
        let needs = classify_spots(snapshots(), &off);
        assert!(needs.iter().all(|n| n.spot_id != 1 && n.spot_id != 3));
    }

    #[test]
    fn test_available_swing_drivers() {
        let users = vec![
            user(10, UserRole::Swing, true),
            user(11, UserRole::Swing, true),
            user(12, UserRole::Swing, false),
            user(13, UserRole::Driver, true),
            user(14, UserRole::Swing, true),
        ];
        let assigned: HashSet<i32> = [11].into_iter().collect();
        let off: HashSet<i32> = [14].into_iter().collect();

        let swing = available_swing_drivers(&users, &assigned, &off);
        assert_eq!(swing, vec![SwingDriver { id: 10, name: "User 10".into() }]);
    }

    #[test]
    fn test_reason_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&CoverageReason::TimeOff).unwrap(), "\"time_off\"");
        assert_eq!(serde_json::to_string(&CoverageReason::Unassigned).unwrap(), "\"unassigned\"");
    }
}
