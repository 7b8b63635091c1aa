//! Auditoría "belt walk"
//!
//! Recorrido físico de una cinta comparando el camión que el sistema
//! tiene en cada spot con el que realmente está estacionado.
//! Pasos: SelectBelt → Checklist → Summary. El estado es local; lo único
//! que vuelve al sistema son las `FixAction` que el operador decida aplicar.

use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::utils::errors::AppError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BeltWalkError {
    #[error("Audit is in step {current:?}, expected {expected:?}")]
    WrongStep { current: AuditStep, expected: AuditStep },

    #[error("Spot {0} is not part of this belt")]
    UnknownSpot(i32),

    #[error("Spot {0} has no discrepancy to mark")]
    NothingToSwitch(i32),

    #[error("Belt has no spots to audit")]
    EmptyBelt,
}

impl From<BeltWalkError> for AppError {
    fn from(e: BeltWalkError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStep {
    SelectBelt,
    Checklist,
    Summary,
}

/// Lo que el sistema dice que hay en un spot
#[derive(Debug, Clone)]
pub struct ExpectedSpot {
    pub spot_id: i32,
    pub spot_label: String,
    pub expected_truck: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingKind {
    Match,
    /// Hay otro camión distinto del registrado
    Mismatch,
    /// Hay un camión donde el sistema no tiene ninguno
    UnexpectedTruck,
    /// El sistema tiene un camión pero el spot está vacío
    MissingTruck,
    Empty,
}

impl FindingKind {
    pub fn is_issue(self) -> bool {
        matches!(
            self,
            FindingKind::Mismatch | FindingKind::UnexpectedTruck | FindingKind::MissingTruck
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub spot_id: i32,
    pub spot_label: String,
    pub expected_truck: Option<String>,
    pub actual_truck: Option<String>,
    pub kind: FindingKind,
    pub switched: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditSummary {
    pub belt_id: i32,
    pub belt_letter: String,
    pub findings: Vec<Finding>,
    pub checked: usize,
    pub issues: usize,
    /// Spots sin observación registrada
    pub unchecked: Vec<i32>,
}

/// Corrección a aplicar en el sistema para que coincida con la realidad
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FixAction {
    Bind { spot_id: i32, truck_number: String },
    Unbind { spot_id: i32 },
}

#[derive(Debug)]
pub struct BeltWalkAudit {
    step: AuditStep,
    belt_id: i32,
    belt_letter: String,
    spots: Vec<ExpectedSpot>,
    observations: HashMap<i32, Option<String>>,
    summary: Option<AuditSummary>,
}

impl Default for BeltWalkAudit {
    fn default() -> Self {
        Self::new()
    }
}

impl BeltWalkAudit {
    pub fn new() -> Self {
        Self {
            step: AuditStep::SelectBelt,
            belt_id: 0,
            belt_letter: String::new(),
            spots: Vec::new(),
            observations: HashMap::new(),
            summary: None,
        }
    }

    pub fn step(&self) -> AuditStep {
        self.step
    }

    fn expect_step(&self, expected: AuditStep) -> Result<(), BeltWalkError> {
        if self.step != expected {
            return Err(BeltWalkError::WrongStep {
                current: self.step,
                expected,
            });
        }
        Ok(())
    }

    /// Elegir la cinta y cargar lo esperado por spot
    pub fn start(
        &mut self,
        belt_id: i32,
        belt_letter: &str,
        spots: Vec<ExpectedSpot>,
    ) -> Result<(), BeltWalkError> {
        self.expect_step(AuditStep::SelectBelt)?;
        if spots.is_empty() {
            return Err(BeltWalkError::EmptyBelt);
        }
        self.belt_id = belt_id;
        self.belt_letter = belt_letter.to_string();
        self.spots = spots;
        self.observations.clear();
        self.step = AuditStep::Checklist;
        Ok(())
    }

    /// Registrar el camión observado en un spot (None = vacío).
    /// Registrar dos veces sobrescribe.
    pub fn record(&mut self, spot_id: i32, actual_truck: Option<&str>) -> Result<(), BeltWalkError> {
        self.expect_step(AuditStep::Checklist)?;
        if !self.spots.iter().any(|s| s.spot_id == spot_id) {
            return Err(BeltWalkError::UnknownSpot(spot_id));
        }
        let actual = actual_truck
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self.observations.insert(spot_id, actual);
        Ok(())
    }

    /// Cerrar el checklist y calcular el resumen
    pub fn finish(&mut self) -> Result<&AuditSummary, BeltWalkError> {
        self.expect_step(AuditStep::Checklist)?;

        let mut findings = Vec::new();
        let mut unchecked = Vec::new();
        for spot in &self.spots {
            let Some(actual) = self.observations.get(&spot.spot_id) else {
                unchecked.push(spot.spot_id);
                continue;
            };
            findings.push(Finding {
                spot_id: spot.spot_id,
                spot_label: spot.spot_label.clone(),
                expected_truck: spot.expected_truck.clone(),
                actual_truck: actual.clone(),
                kind: compare(spot.expected_truck.as_deref(), actual.as_deref()),
                switched: false,
            });
        }

        let issues = findings.iter().filter(|f| f.kind.is_issue()).count();
        let summary = AuditSummary {
            belt_id: self.belt_id,
            belt_letter: self.belt_letter.clone(),
            checked: findings.len(),
            issues,
            findings,
            unchecked,
        };
        self.step = AuditStep::Summary;
        Ok(self.summary.insert(summary))
    }

    pub fn summary(&self) -> Option<&AuditSummary> {
        self.summary.as_ref()
    }

    /// Marcar una discrepancia como resuelta físicamente (se movió el camión)
    pub fn mark_switched(&mut self, spot_id: i32) -> Result<(), BeltWalkError> {
        self.expect_step(AuditStep::Summary)?;
        let finding = self
            .summary
            .as_mut()
            .and_then(|s| s.findings.iter_mut().find(|f| f.spot_id == spot_id))
            .ok_or(BeltWalkError::UnknownSpot(spot_id))?;
        if !finding.kind.is_issue() {
            return Err(BeltWalkError::NothingToSwitch(spot_id));
        }
        finding.switched = true;
        Ok(())
    }

    /// Correcciones pendientes: discrepancias no marcadas como movidas
    pub fn fix_actions(&self) -> Vec<FixAction> {
        let Some(summary) = &self.summary else {
            return Vec::new();
        };
        summary
            .findings
            .iter()
            .filter(|f| f.kind.is_issue() && !f.switched)
            .map(|f| match &f.actual_truck {
                Some(truck) => FixAction::Bind {
                    spot_id: f.spot_id,
                    truck_number: truck.clone(),
                },
                None => FixAction::Unbind { spot_id: f.spot_id },
            })
            .collect()
    }
}

fn compare(expected: Option<&str>, actual: Option<&str>) -> FindingKind {
    match (expected, actual) {
        (None, None) => FindingKind::Empty,
        (None, Some(_)) => FindingKind::UnexpectedTruck,
        (Some(_), None) => FindingKind::MissingTruck,
        (Some(e), Some(a)) if e.trim().eq_ignore_ascii_case(a.trim()) => FindingKind::Match,
        (Some(_), Some(_)) => FindingKind::Mismatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(spot_id: i32, truck: Option<&str>) -> ExpectedSpot {
        ExpectedSpot {
            spot_id,
            spot_label: format!("A{}", spot_id),
            expected_truck: truck.map(str::to_string),
        }
    }

    fn started() -> BeltWalkAudit {
        let mut audit = BeltWalkAudit::new();
        audit
            .start(
                1,
                "A",
                vec![
                    expected(1, Some("T100")),
                    expected(2, Some("T200")),
                    expected(3, None),
                    expected(4, Some("T400")),
                    expected(5, None),
                    expected(6, Some("T600")),
                ],
            )
            .unwrap();
        audit
    }

    #[test]
    fn test_full_walk() {
        let mut audit = started();
        assert_eq!(audit.step(), AuditStep::Checklist);

        audit.record(1, Some("t100")).unwrap();
        audit.record(2, Some("T250")).unwrap();
        audit.record(3, Some("T300")).unwrap();
        audit.record(4, None).unwrap();
        audit.record(5, Some("  ")).unwrap();

        let summary = audit.finish().unwrap();
        let kinds: Vec<FindingKind> = summary.findings.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FindingKind::Match,
                FindingKind::Mismatch,
                FindingKind::UnexpectedTruck,
                FindingKind::MissingTruck,
                FindingKind::Empty,
            ]
        );
        assert_eq!(summary.checked, 5);
        assert_eq!(summary.issues, 3);
        assert_eq!(summary.unchecked, vec![6]);
        assert_eq!(audit.step(), AuditStep::Summary);
    }

    #[test]
    fn test_fix_actions_skip_switched() {
        let mut audit = started();
        audit.record(2, Some("T250")).unwrap();
        audit.record(3, Some("T300")).unwrap();
        audit.record(4, None).unwrap();
        audit.finish().unwrap();

        audit.mark_switched(2).unwrap();
        assert_eq!(
            audit.fix_actions(),
            vec![
                FixAction::Bind { spot_id: 3, truck_number: "T300".into() },
                FixAction::Unbind { spot_id: 4 },
            ]
        );
    }

    #[test]
    fn test_cannot_switch_a_match() {
        let mut audit = started();
        audit.record(1, Some("T100")).unwrap();
        audit.finish().unwrap();
        assert_eq!(audit.mark_switched(1), Err(BeltWalkError::NothingToSwitch(1)));
        assert_eq!(audit.mark_switched(6), Err(BeltWalkError::UnknownSpot(6)));
    }

    #[test]
    fn test_step_order_enforced() {
        let mut audit = BeltWalkAudit::new();
        assert!(matches!(audit.record(1, None), Err(BeltWalkError::WrongStep { .. })));
        assert!(matches!(audit.finish(), Err(BeltWalkError::WrongStep { .. })));
        assert_eq!(audit.start(1, "A", vec![]), Err(BeltWalkError::EmptyBelt));

        let mut audit = started();
        assert_eq!(audit.record(99, None), Err(BeltWalkError::UnknownSpot(99)));
        assert!(matches!(audit.mark_switched(1), Err(BeltWalkError::WrongStep { .. })));
        audit.finish().unwrap();
        assert!(matches!(audit.record(1, None), Err(BeltWalkError::WrongStep { .. })));
    }

    #[test]
    fn test_record_overwrites() {
        let mut audit = started();
        assert!(audit.summary().is_none());
        assert!(audit.fix_actions().is_empty());

        audit.record(1, Some("T999")).unwrap();
        audit.record(1, Some("T100")).unwrap();
        let summary = audit.finish().unwrap();
        assert_eq!(summary.findings[0].kind, FindingKind::Match);
        assert!(audit.summary().is_some());
    }

    #[test]
    fn test_fix_action_json_shape() {
        let json = serde_json::to_value(FixAction::Bind { spot_id: 3, truck_number: "T300".into() }).unwrap();
        assert_eq!(json["action"], "bind");
        assert_eq!(json["spot_id"], 3);
        assert_eq!(json["truck_number"], "T300");
    }
}
