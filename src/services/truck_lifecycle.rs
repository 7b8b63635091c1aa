//! Transiciones de estado de los camiones
//!
//! Los estados cambian solo por acciones explícitas. RETIRED es terminal.

use crate::models::truck::TruckStatus;
use crate::utils::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruckAction {
    /// Estacionar en un spot para una fecha
    BindToSpot,
    /// Quitar del spot (o ser desplazado por otro camión)
    Unbind,
    MoveToAvailable,
    MoveToOutOfService,
    Retire,
}

/// Estado resultante de aplicar `action`, o 409 si no está permitido
pub fn next_status(current: TruckStatus, action: TruckAction) -> Result<TruckStatus, AppError> {
    use TruckAction::*;
    use TruckStatus::*;

    match (current, action) {
        (Retired, _) => Err(AppError::Conflict("Truck is retired".to_string())),
        (OutOfService, BindToSpot) => Err(AppError::Conflict(
            "Truck is out of service and cannot be placed at a spot".to_string(),
        )),
        (_, BindToSpot) => Ok(Assigned),
        (Assigned, Unbind) => Ok(Available),
        (status, Unbind) => Ok(status),
        (_, MoveToAvailable) => Ok(Available),
        (_, MoveToOutOfService) => Ok(OutOfService),
        (_, Retire) => Ok(Retired),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TruckAction::*;
    use TruckStatus::*;

    #[test]
    fn test_bind_marks_assigned() {
        assert_eq!(next_status(Available, BindToSpot).unwrap(), Assigned);
        assert_eq!(next_status(Assigned, BindToSpot).unwrap(), Assigned);
    }

    #[test]
    fn test_out_of_service_cannot_be_bound() {
        let err = next_status(OutOfService, BindToSpot).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_unbind_keeps_out_of_service() {
        assert_eq!(next_status(Assigned, Unbind).unwrap(), Available);
        assert_eq!(next_status(OutOfService, Unbind).unwrap(), OutOfService);
        assert_eq!(next_status(Available, Unbind).unwrap(), Available);
    }

    #[test]
    fn test_explicit_moves() {
        assert_eq!(next_status(OutOfService, MoveToAvailable).unwrap(), Available);
        assert_eq!(next_status(Assigned, MoveToOutOfService).unwrap(), OutOfService);
        assert_eq!(next_status(Available, Retire).unwrap(), Retired);
        assert_eq!(next_status(OutOfService, Retire).unwrap(), Retired);
    }

    #[test]
    fn test_retired_is_terminal() {
        for action in [BindToSpot, Unbind, MoveToAvailable, MoveToOutOfService, Retire] {
            assert!(next_status(Retired, action).is_err(), "{:?}", action);
        }
    }
}
