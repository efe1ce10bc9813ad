//! Numeric field transforms (Number, Float)

use crate::model::value::format_f64;
use crate::model::CellValue;

/// Strip everything but digits, `.` and `-`
///
/// Only the first `.` survives (later parts are concatenated) and `-` is
/// kept only when it is the very first character.
pub fn sanitize(input: &str) -> String {
    let mut sanitized: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if let Some(dot) = sanitized.find('.') {
        let (head, rest) = sanitized.split_at(dot + 1);
        sanitized = format!("{}{}", head, rest.replace('.', ""));
    }

    match sanitized.find('-') {
        Some(0) => format!("-{}", sanitized.replace('-', "")),
        Some(_) => sanitized.replace('-', ""),
        None => sanitized,
    }
}

/// Whether a typed character may enter a numeric editor
pub fn is_numeric_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.' || ch == '-'
}

/// Text shown for a stored numeric value
///
/// Strings are shown as stored; numbers never use scientific notation.
pub fn display(value: &CellValue) -> String {
    match value {
        CellValue::Null => String::new(),
        CellValue::Text(s) => s.clone(),
        CellValue::Number(n) => format_f64(*n),
        CellValue::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        CellValue::List(_) => String::new(),
    }
}

/// Editor text seeded from the stored value
pub fn seed(value: &CellValue) -> String {
    sanitize(&display(value))
}

/// Value committed for the editor text `input`
///
/// Text equal to what the editor was seeded with keeps the stored value
/// as-is, so reopening and committing never changes the representation.
/// An empty result commits null. A finite parse commits a number; other
/// leftovers such as a lone `-` stay text.
pub fn commit(input: &str, current: &CellValue) -> CellValue {
    let sanitized = sanitize(input);
    if sanitized == seed(current) {
        return current.clone();
    }
    if sanitized.is_empty() {
        return CellValue::Null;
    }
    match sanitized.parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Text(sanitized),
    }
}
