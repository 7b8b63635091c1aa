//! Reglas de la plantilla semanal
//!
//! Detección de overrides contra la plantilla del día de la semana y
//! expansión de plantillas a fechas concretas.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::models::assignment::TemplateAssignment;
use crate::utils::validation::day_of_week;

/// `true` cuando lo enviado difiere de la plantilla.
/// Sin plantilla no hay override.
pub fn is_override(
    template: Option<&TemplateAssignment>,
    user_id: Option<i32>,
    truck_number: Option<&str>,
) -> bool {
    match template {
        None => false,
        Some(t) => t.user_id != user_id || normalize(t.truck_number.as_deref()) != normalize(truck_number),
    }
}

fn normalize(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Fila a crear al aplicar la plantilla
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAssignment {
    pub spot_id: i32,
    pub date: NaiveDate,
    pub user_id: Option<i32>,
    pub truck_number: Option<String>,
}

/// Resultado de planificar: filas a crear y cuántas se saltan por existir
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TemplatePlan {
    pub to_create: Vec<PlannedAssignment>,
    pub skipped: usize,
}

/// Expandir las plantillas sobre `dates`, saltando los pares (spot, fecha)
/// que ya tienen asignación.
pub fn plan_template_application(
    dates: &[NaiveDate],
    templates: &[TemplateAssignment],
    existing: &HashSet<(i32, NaiveDate)>,
) -> TemplatePlan {
    let mut by_day: HashMap<i16, Vec<&TemplateAssignment>> = HashMap::new();
    for template in templates {
        by_day.entry(template.day_of_week).or_default().push(template);
    }

    let mut plan = TemplatePlan::default();
    for date in dates {
        let Some(day_templates) = by_day.get(&day_of_week(*date)) else {
            continue;
        };
        for template in day_templates {
            if existing.contains(&(template.spot_id, *date)) {
                plan.skipped += 1;
                continue;
            }
            plan.to_create.push(PlannedAssignment {
                spot_id: template.spot_id,
                date: *date,
                user_id: template.user_id,
                truck_number: template.truck_number.clone(),
            });
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(spot_id: i32, day: i16, user_id: Option<i32>, truck: Option<&str>) -> TemplateAssignment {
        TemplateAssignment {
            id: spot_id * 100 + day as i32,
            spot_id,
            day_of_week: day,
            user_id,
            truck_number: truck.map(str::to_string),
        }
    }

    #[test]
    fn test_matching_template_is_not_override() {
        let t = template(1, 1, Some(1), Some("T100"));
        assert!(!is_override(Some(&t), Some(1), Some("T100")));
    }

    #[test]
    fn test_different_truck_is_override() {
        let t = template(1, 1, Some(1), Some("T100"));
        assert!(is_override(Some(&t), Some(1), Some("T200")));
    }

    #[test]
    fn test_different_driver_is_override() {
        let t = template(1, 1, Some(1), Some("T100"));
        assert!(is_override(Some(&t), Some(2), Some("T100")));
        assert!(is_override(Some(&t), None, Some("T100")));
    }

    #[test]
    fn test_no_template_is_never_override() {
        assert!(!is_override(None, Some(5), Some("T1")));
        assert!(!is_override(None, None, None));
    }

    #[test]
    fn test_blank_truck_equals_missing_truck() {
        let t = template(1, 1, Some(1), None);
        assert!(!is_override(Some(&t), Some(1), Some("  ")));
    }

    #[test]
    fn test_plan_template_application() {
        // 2024-06-09 domingo .. 2024-06-11 martes
        let dates: Vec<NaiveDate> = (9..=11)
            .map(|d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap())
            .collect();
        let templates = vec![
            template(1, 1, Some(1), Some("T100")),
            template(2, 1, Some(2), Some("T200")),
            template(1, 2, Some(3), None),
            template(1, 5, Some(4), None),
        ];
        let monday = dates[1];
        let existing: HashSet<(i32, NaiveDate)> = [(2, monday)].into_iter().collect();

        let plan = plan_template_application(&dates, &templates, &existing);
        assert_eq!(plan.skipped, 1);
        assert_eq!(
            plan.to_create,
            vec![
                PlannedAssignment { spot_id: 1, date: monday, user_id: Some(1), truck_number: Some("T100".into()) },
                PlannedAssignment { spot_id: 1, date: dates[2], user_id: Some(3), truck_number: None },
            ]
        );
    }
}
