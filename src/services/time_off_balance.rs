//! Saldo anual de tiempo libre por tipo

use serde::Serialize;
use std::collections::HashMap;

use crate::models::time_off::TimeOffType;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BalanceLine {
    #[serde(rename = "type")]
    pub kind: TimeOffType,
    /// None = sin límite
    pub allowance: Option<i32>,
    pub used: i32,
    pub remaining: Option<i32>,
}

/// Calcular saldo con los días APROBADOS usados en el año.
/// VACATION y SICK descuentan de la asignación del usuario.
pub fn compute_balance(
    vacation_allowance: i32,
    sick_allowance: i32,
    used: &HashMap<TimeOffType, i32>,
) -> Vec<BalanceLine> {
    TimeOffType::ALL
        .iter()
        .map(|kind| {
            let allowance = match kind {
                TimeOffType::Vacation => Some(vacation_allowance),
                TimeOffType::Sick => Some(sick_allowance),
                TimeOffType::Personal | TimeOffType::Unpaid => None,
            };
            let used = used.get(kind).copied().unwrap_or(0);
            BalanceLine {
                kind: *kind,
                allowance,
                used,
                remaining: allowance.map(|a| a - used),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_balance() {
        let used: HashMap<TimeOffType, i32> =
            [(TimeOffType::Vacation, 3), (TimeOffType::Unpaid, 2)].into_iter().collect();
        let lines = compute_balance(10, 5, &used);

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            BalanceLine { kind: TimeOffType::Vacation, allowance: Some(10), used: 3, remaining: Some(7) }
        );
        assert_eq!(lines[1].remaining, Some(5));
        assert_eq!(lines[3].allowance, None);
        assert_eq!(lines[3].used, 2);
        assert_eq!(lines[3].remaining, None);
    }
}
