//! Wire format normalization
//!
//! Some endpoints (`/table/load`, `/table/new`) answer with a JSON string
//! whose content is itself JSON. Bodies are decoded once more when that is
//! the case, so callers always see the inner document.

use gala_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a response body, unwrapping one level of string encoding
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| Error::Decode(format!("response is not JSON: {}", e)))?;

    let value = match value {
        Value::String(inner) => match serde_json::from_str::<Value>(&inner) {
            Ok(decoded) => decoded,
            Err(_) => Value::String(inner),
        },
        other => other,
    };

    serde_json::from_value(value).map_err(|e| Error::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gala_core::model::Table;

    #[test]
    fn test_plain_body() {
        let tables: Vec<Table> =
            decode_body(br#"[{"id": 1, "number": 1, "name": "A", "totalSeatsBooked": "8"}]"#)
                .unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].total_seats_booked, 8);
    }

    #[test]
    fn test_double_encoded_body() {
        let inner = r#"[{"id": 1, "number": 1, "name": "A", "seats_number": 10, "totalSeatsBooked": "8"}]"#;
        let body = serde_json::to_vec(&Value::String(inner.to_string())).unwrap();

        let tables: Vec<Table> = decode_body(&body).unwrap();
        assert_eq!(tables[0].name, "A");
        assert_eq!(tables[0].free_seats(), 2);
    }

    #[test]
    fn test_plain_string_is_kept() {
        let message: String = decode_body(br#""ok""#).unwrap();
        assert_eq!(message, "ok");
    }

    #[test]
    fn test_only_one_level_is_unwrapped() {
        let once = serde_json::to_string(&Value::String("[]".to_string())).unwrap();
        let twice = serde_json::to_vec(&Value::String(once)).unwrap();
        assert!(decode_body::<Vec<Table>>(&twice).is_err());
    }

    #[test]
    fn test_invalid_body() {
        match decode_body::<Vec<Table>>(b"<html>") {
            Err(Error::Decode(_)) => {}
            other => panic!("Expected Decode error, got: {:?}", other),
        }
    }
}
