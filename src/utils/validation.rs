//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos. Todas las fechas de la API usan `YYYY-MM-DD`
//! y se convierten a `NaiveDate`, sin zona horaria.

use chrono::{Datelike, NaiveDate};
use validator::ValidationError;

use crate::utils::errors::AppError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Convertir un string `YYYY-MM-DD` a fecha
pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        AppError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", value))
    })
}

/// Igual que `parse_date` pero acepta ausencia
pub fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(parse_date)
        .transpose()
}

/// Día de la semana, 0 = domingo … 6 = sábado
pub fn day_of_week(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

/// Fechas del rango inclusivo `[start, end]`, limitado a `max_days`
pub fn dates_in_range(
    start: NaiveDate,
    end: NaiveDate,
    max_days: usize,
) -> Result<Vec<NaiveDate>, AppError> {
    if end < start {
        return Err(AppError::BadRequest(
            "end_date must not be before start_date".to_string(),
        ));
    }

    let days = start.iter_days().take_while(|d| *d <= end).take(max_days + 1);
    let dates: Vec<NaiveDate> = days.collect();
    if dates.len() > max_days {
        return Err(AppError::BadRequest(format!(
            "Date range is limited to {} days",
            max_days
        )));
    }
    Ok(dates)
}

/// Recortar texto opcional; vacío equivale a ausente
pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validar número de camión: alfanumérico, guiones permitidos
pub fn validate_truck_number(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    let valid = !trimmed.is_empty()
        && trimmed.len() <= 20
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !valid {
        let mut error = ValidationError::new("truck_number");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !(10..=15).contains(&digits) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-06-10").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert!(parse_date("2024/06/10").is_err());
        assert!(parse_date("2024-06-10T00:00:00Z").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("  ")).unwrap(), None);
        assert!(parse_optional_date(Some("2024-06-10")).unwrap().is_some());
        assert!(parse_optional_date(Some("june")).is_err());
    }

    #[test]
    fn test_day_of_week_sunday_is_zero() {
        // 2024-06-09 fue domingo, 2024-06-10 lunes
        assert_eq!(day_of_week(parse_date("2024-06-09").unwrap()), 0);
        assert_eq!(day_of_week(parse_date("2024-06-10").unwrap()), 1);
        assert_eq!(day_of_week(parse_date("2024-06-15").unwrap()), 6);
    }

    #[test]
    fn test_dates_in_range() {
        let start = parse_date("2024-06-28").unwrap();
        let end = parse_date("2024-07-02").unwrap();
        let dates = dates_in_range(start, end, 31).unwrap();
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[0], start);
        assert_eq!(dates[4], end);

        assert!(dates_in_range(end, start, 31).is_err());
        assert_eq!(dates_in_range(start, start, 1).unwrap(), vec![start]);
        assert!(dates_in_range(start, end, 4).is_err());
    }

    #[test]
    fn test_normalize_optional_text() {
        assert_eq!(normalize_optional_text(Some("  ".into())), None);
        assert_eq!(normalize_optional_text(Some(" 412 ".into())), Some("412".into()));
        assert_eq!(normalize_optional_text(None), None);
    }

    #[test]
    fn test_validate_truck_number() {
        assert!(validate_truck_number("T100").is_ok());
        assert!(validate_truck_number("124-7").is_ok());
        assert!(validate_truck_number("").is_err());
        assert!(validate_truck_number("T 100").is_err());
        assert!(validate_truck_number(&"9".repeat(21)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("(555) 123-4567").is_ok());
        assert!(validate_phone("123").is_err());
    }
}
