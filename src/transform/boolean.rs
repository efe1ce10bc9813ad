//! Boolean field transforms

use crate::model::CellValue;

/// Truthiness of a stored value; null reads as false
pub fn truthy(value: &CellValue) -> bool {
    match value {
        CellValue::Null => false,
        CellValue::Bool(b) => *b,
        CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
        CellValue::Text(s) => !s.is_empty(),
        CellValue::List(_) => true,
    }
}

pub fn normalize(value: &CellValue) -> CellValue {
    CellValue::Bool(truthy(value))
}

/// The value a toggle writes
pub fn toggled(value: &CellValue) -> CellValue {
    CellValue::Bool(!truthy(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy() {
        assert!(!truthy(&CellValue::Null));
        assert!(!truthy(&CellValue::Number(0.0)));
        assert!(!truthy(&CellValue::Number(f64::NAN)));
        assert!(!truthy(&CellValue::text("")));
        assert!(truthy(&CellValue::text("false")));
        assert!(truthy(&CellValue::list(Vec::<String>::new())));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(&CellValue::Number(2.0));
        assert_eq!(once, CellValue::Bool(true));
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_toggled_null_becomes_true() {
        assert_eq!(toggled(&CellValue::Null), CellValue::Bool(true));
    }
}
