use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::truck::{Truck, TruckStatus};
use crate::services::belt_walk::{AuditSummary, FixAction};

// Filtros para listar camiones
#[derive(Debug, Default, Deserialize)]
pub struct TruckFilters {
    pub status: Option<TruckStatus>,
    #[serde(default)]
    pub include_retired: bool,
}

// Request para crear un camión
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTruckRequest {
    #[validate(custom = "crate::utils::validation::validate_truck_number")]
    pub number: String,
    pub home_spot_id: Option<i32>,
    #[validate(length(max = 500))]
    pub note: Option<String>,
}

// Request para actualizar un camión. Ausente = sin cambios
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTruckRequest {
    #[validate(custom = "crate::utils::validation::validate_truck_number")]
    pub number: Option<String>,
    pub home_spot_id: Option<i32>,
    #[validate(length(max = 500))]
    pub note: Option<String>,
    #[serde(default)]
    pub clear_home_spot: bool,
    #[serde(default)]
    pub clear_note: bool,
}

// Estacionar un camión en un spot para una fecha
#[derive(Debug, Deserialize)]
pub struct SpotAssignmentRequest {
    pub truck_id: i32,
    pub spot_id: i32,
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveToAvailableRequest {
    pub date: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MoveToOutOfServiceRequest {
    pub date: String,
    #[validate(length(max = 500))]
    pub note: Option<String>,
}

// Resultado de estacionar: el camión movido y el desplazado, si lo hubo
#[derive(Debug, Serialize)]
pub struct SpotAssignmentResponse {
    pub truck_spot_assignment_id: i32,
    pub truck: Truck,
    pub displaced_truck: Option<Truck>,
    pub previous_spot_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct BeltWalkObservation {
    pub spot_id: i32,
    pub actual_truck_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BeltWalkRequest {
    pub belt_id: i32,
    pub date: String,
    #[serde(default)]
    pub observations: Vec<BeltWalkObservation>,
    /// Spots cuya discrepancia ya se resolvió moviendo el camión
    #[serde(default)]
    pub switched: Vec<i32>,
}

#[derive(Debug, Serialize)]
pub struct BeltWalkResponse {
    pub summary: AuditSummary,
    pub fix_actions: Vec<FixAction>,
}

// Sin truck_number se quita el camión del spot
#[derive(Debug, Deserialize, Validate)]
pub struct BeltWalkFixRequest {
    pub date: String,
    pub spot_id: i32,
    #[validate(custom = "crate::utils::validation::validate_truck_number")]
    pub truck_number: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BeltWalkFixResponse {
    Bind(SpotAssignmentResponse),
    Unbind { released_truck: Option<Truck> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_belt_walk_request_switched_defaults_empty() {
        let request: BeltWalkRequest =
            serde_json::from_str(r#"{"belt_id": 1, "date": "2024-06-10"}"#).unwrap();
        assert!(request.observations.is_empty());
        assert!(request.switched.is_empty());

        let request: BeltWalkRequest =
            serde_json::from_str(r#"{"belt_id": 1, "date": "2024-06-10", "switched": [2, 4]}"#).unwrap();
        assert_eq!(request.switched, vec![2, 4]);
    }

    #[test]
    fn test_belt_walk_fix_without_truck_is_valid() {
        let request: BeltWalkFixRequest =
            serde_json::from_str(r#"{"date": "2024-06-10", "spot_id": 3}"#).unwrap();
        assert!(request.truck_number.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_truck_clear_flags() {
        let request: UpdateTruckRequest =
            serde_json::from_str(r#"{"clear_home_spot": true, "clear_note": true}"#).unwrap();
        assert!(request.clear_home_spot);
        assert!(request.clear_note);
        assert!(request.home_spot_id.is_none());

        let request: UpdateTruckRequest = serde_json::from_str(r#"{"note": "flat tire"}"#).unwrap();
        assert!(!request.clear_note);
    }

    #[test]
    fn test_fix_response_json_shape() {
        let json = serde_json::to_value(BeltWalkFixResponse::Unbind { released_truck: None }).unwrap();
        assert_eq!(json["action"], "unbind");
        assert!(json["released_truck"].is_null());
    }
}
