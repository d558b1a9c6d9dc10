//! Turns arbitrary failure values into display text.

use serde::Serialize;
use serde_json::Value;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Display text for a native error.
pub fn error_message(error: &(dyn std::error::Error + '_)) -> String {
    error.to_string()
}

/// Display text for a structured failure value.
///
/// A string `message` field wins, then a bare string, then the value's JSON
/// text. Values that cannot be serialized yield `"Unknown error"`.
///
/// ```
/// use serde_json::json;
/// use tutorhub_classes::utils::value_message;
///
/// assert_eq!(value_message(&json!({ "message": "Y", "code": 23505 })), "Y");
/// assert_eq!(value_message("X"), "X");
/// assert_eq!(value_message(&json!({ "code": 42 })), r#"{"code":42}"#);
/// ```
pub fn value_message<T>(value: &T) -> String
where
    T: Serialize + ?Sized,
{
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => match map.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => Value::Object(map).to_string(),
        },
        Ok(Value::String(text)) => text,
        Ok(other) => other.to_string(),
        Err(_) => UNKNOWN_ERROR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Debug)]
    struct Boom;

    impl std::fmt::Display for Boom {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("X")
        }
    }

    impl std::error::Error for Boom {}

    #[test]
    fn native_error_uses_its_display() {
        assert_eq!(error_message(&Boom), "X");
    }

    #[test]
    fn plain_string_is_returned_as_is() {
        assert_eq!(value_message("X"), "X");
        assert_eq!(value_message(&"X".to_string()), "X");
    }

    #[test]
    fn message_field_is_preferred() {
        assert_eq!(value_message(&json!({ "message": "Y" })), "Y");
    }

    #[test]
    fn non_string_message_falls_back_to_json() {
        assert_eq!(
            value_message(&json!({ "message": 7 })),
            r#"{"message":7}"#
        );
        assert_eq!(value_message(&json!([1, 2])), "[1,2]");
        assert_eq!(value_message(&json!(null)), "null");
    }

    #[test]
    fn unserializable_value_is_unknown_error() {
        let mut value = HashMap::new();
        value.insert((1, 2), "tuple keys cannot become JSON object keys");
        assert_eq!(value_message(&value), "Unknown error");
    }
}
