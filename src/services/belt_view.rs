//! Vista diaria de las cintas
//!
//! Junta spots, asignaciones de conductor, camiones estacionados y rutas
//! en una estructura por cinta lista para el dashboard.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::dto::belt_dto::{BeltDayView, SpotDayView, SpotDriverView, SpotTruckView};
use crate::models::assignment::{AssignmentDetail, TruckSpotDetail};
use crate::models::belt::{Belt, SpotWithBelt};

/// Rutas mostradas en un spot: el override manda sobre las rutas asignadas
pub fn routes_for_spot(spot: &SpotWithBelt, bound: Option<&Vec<String>>) -> Vec<String> {
    match spot.route_override.as_deref().map(str::trim) {
        Some(route) if !route.is_empty() => vec![route.to_string()],
        _ => bound.cloned().unwrap_or_default(),
    }
}

pub struct DayInputs<'a> {
    pub date: NaiveDate,
    pub spots: Vec<SpotWithBelt>,
    pub assignments: Vec<AssignmentDetail>,
    pub trucks: Vec<TruckSpotDetail>,
    pub routes_by_spot: &'a HashMap<i32, Vec<String>>,
    pub approved_off: &'a HashSet<i32>,
}

/// Agrupar por cinta. Las cintas sin spots se incluyen vacías.
pub fn build_belt_views(belts: &[Belt], inputs: DayInputs<'_>) -> Vec<BeltDayView> {
    let mut assignments: HashMap<i32, AssignmentDetail> = inputs
        .assignments
        .into_iter()
        .map(|a| (a.spot_id, a))
        .collect();
    let mut trucks: HashMap<i32, TruckSpotDetail> =
        inputs.trucks.into_iter().map(|t| (t.spot_id, t)).collect();

    let mut spots_by_belt: HashMap<i32, Vec<SpotDayView>> = HashMap::new();
    for spot in inputs.spots {
        let routes = routes_for_spot(&spot, inputs.routes_by_spot.get(&spot.id));
        let assignment = assignments.remove(&spot.id).map(|a| SpotDriverView {
            assignment_id: a.id,
            needs_coverage: a.user_id.is_some_and(|id| inputs.approved_off.contains(&id)),
            user_id: a.user_id,
            user_name: a.user_name,
            truck_number: a.truck_number,
            is_override: a.is_override,
        });
        let truck = trucks.remove(&spot.id).map(|t| SpotTruckView {
            truck_spot_assignment_id: t.id,
            truck_id: t.truck_id,
            truck_number: t.truck_number,
        });

        spots_by_belt.entry(spot.belt_id).or_default().push(SpotDayView {
            spot_id: spot.id,
            number: spot.number,
            label: spot.label(),
            routes,
            assignment,
            truck,
        });
    }

    belts
        .iter()
        .map(|belt| BeltDayView {
            belt_id: belt.id,
            letter: belt.letter.clone(),
            name: belt.name.clone(),
            date: inputs.date,
            spots: spots_by_belt.remove(&belt.id).unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn belt(id: i32, letter: &str) -> Belt {
        Belt {
            id,
            letter: letter.to_string(),
            name: format!("Belt {}", letter),
            is_active: true,
        }
    }

    fn spot(id: i32, belt_id: i32, letter: &str, number: i32, route_override: Option<&str>) -> SpotWithBelt {
        SpotWithBelt {
            id,
            belt_id,
            belt_letter: letter.to_string(),
            number,
            route_override: route_override.map(str::to_string),
        }
    }

    #[test]
    fn test_route_override_wins() {
        let bound = vec!["R10".to_string(), "R11".to_string()];
        assert_eq!(routes_for_spot(&spot(1, 1, "A", 1, Some("R99")), Some(&bound)), vec!["R99"]);
        assert_eq!(routes_for_spot(&spot(1, 1, "A", 1, Some("  ")), Some(&bound)), bound);
        assert!(routes_for_spot(&spot(1, 1, "A", 1, None), None).is_empty());
    }

    #[test]
    fn test_build_belt_views() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let belts = vec![belt(1, "A"), belt(2, "B")];
        let routes: HashMap<i32, Vec<String>> = [(11, vec!["R1".to_string()])].into_iter().collect();
        let approved_off: HashSet<i32> = [7].into_iter().collect();

        let views = build_belt_views(
            &belts,
            DayInputs {
                date,
                spots: vec![spot(11, 1, "A", 1, None), spot(12, 1, "A", 2, None)],
                assignments: vec![AssignmentDetail {
                    id: 100,
                    spot_id: 11,
                    date,
                    user_id: Some(7),
                    user_name: Some("Ana".to_string()),
                    truck_number: Some("T-1".to_string()),
                    is_override: true,
                }],
                trucks: vec![TruckSpotDetail {
                    id: 200,
                    truck_id: 5,
                    truck_number: "T-5".to_string(),
                    spot_id: 12,
                    date,
                }],
                routes_by_spot: &routes,
                approved_off: &approved_off,
            },
        );

        assert_eq!(views.len(), 2);
        assert!(views[1].spots.is_empty());

        let a1 = &views[0].spots[0];
        assert_eq!(a1.label, "A1");
        assert_eq!(a1.routes, vec!["R1"]);
        let driver = a1.assignment.as_ref().unwrap();
        assert!(driver.needs_coverage);
        assert!(driver.is_override);
        assert!(a1.truck.is_none());

        let a2 = &views[0].spots[1];
        assert!(a2.assignment.is_none());
        assert_eq!(a2.truck.as_ref().unwrap().truck_number, "T-5");
    }
}
