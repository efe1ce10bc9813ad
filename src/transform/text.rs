//! Text field transforms (Text, LongText, Url, Date, Progress, Badge)

use crate::model::CellValue;

/// Editor text seeded from the stored value
pub fn seed(value: &CellValue) -> String {
    value.to_plain_string()
}

/// Value committed for the editor text `input`
///
/// Surrounding whitespace is trimmed here and nowhere else. Text equal to
/// the seeded text keeps the stored value untouched.
pub fn commit(input: &str, current: &CellValue) -> CellValue {
    let trimmed = input.trim();
    if trimmed == seed(current) {
        return current.clone();
    }
    CellValue::text(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_trims() {
        assert_eq!(
            commit("  hello \n", &CellValue::Null),
            CellValue::text("hello")
        );
    }

    #[test]
    fn test_commit_unchanged_returns_current() {
        assert_eq!(commit("", &CellValue::Null), CellValue::Null);
        assert_eq!(commit("5", &CellValue::Number(5.0)), CellValue::Number(5.0));
        assert_eq!(
            commit("a,b", &CellValue::list(["a", "b"])),
            CellValue::list(["a", "b"])
        );
    }

    #[test]
    fn test_commit_cleared_text_is_empty_string() {
        assert_eq!(commit("   ", &CellValue::text("abc")), CellValue::text(""));
    }

    #[test]
    fn test_commit_is_idempotent() {
        let current = CellValue::text("x");
        let once = commit(" y ", &current);
        assert_eq!(commit(&seed(&once), &once), once);
    }
}
