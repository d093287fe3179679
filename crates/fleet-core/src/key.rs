//! Vehicle identifier normalization.

use serde_json::Value;

/// Canonical comparison key for a plate-like identifier.
///
/// Uppercases and strips every character that is not an ASCII letter or
/// digit, so `"SGW-0E99"` and `"sgw 0e99"` compare equal.
pub fn normalize_plate(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// [`normalize_plate`] over a raw field value. `null` and non-scalars give `""`.
pub fn normalize_key(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => normalize_plate(s),
        Some(Value::Number(n)) => normalize_plate(&n.to_string()),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plate_spellings_share_a_key() {
        for raw in ["SGW-0E99", "sgw 0e99", "sgw-0-e-99", " Sgw0E99 "] {
            assert_eq!(normalize_plate(raw), "SGW0E99", "input {raw:?}");
        }
    }

    #[test]
    fn non_ascii_is_stripped() {
        assert_eq!(normalize_plate("ação-1"), "AO1");
    }

    #[test]
    fn missing_values_give_empty_key() {
        assert_eq!(normalize_key(None), "");
        assert_eq!(normalize_key(Some(&Value::Null)), "");
        assert_eq!(normalize_key(Some(&json!(["ABC"]))), "");
    }

    #[test]
    fn numeric_values_are_rendered() {
        assert_eq!(normalize_key(Some(&json!(1234))), "1234");
        assert_eq!(normalize_key(Some(&json!("abc.1234"))), "ABC1234");
    }
}
