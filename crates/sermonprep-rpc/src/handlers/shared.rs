//! Parameter extraction helpers shared across RPC domains.

use sermonprep_core::{Result, SermonError};
use serde_json::Value;

fn lookup<'a>(params: &'a Value, snake: &str, camel: &str) -> Option<&'a Value> {
    params.get(snake).or_else(|| params.get(camel))
}

/// Extract an optional string parameter, supporting both snake_case and camelCase.
pub(crate) fn get_str_param<'a>(params: &'a Value, snake: &str, camel: &str) -> Option<&'a str> {
    lookup(params, snake, camel).and_then(|v| v.as_str())
}

/// Extract a required string parameter or return an error.
pub(crate) fn require_str_param(params: &Value, snake: &str, camel: &str) -> Result<String> {
    get_str_param(params, snake, camel)
        .map(String::from)
        .ok_or_else(|| missing(snake))
}

/// Extract an optional i64 parameter, supporting both snake_case and camelCase.
pub(crate) fn get_i64_param(params: &Value, snake: &str, camel: &str) -> Option<i64> {
    lookup(params, snake, camel).and_then(|v| v.as_i64())
}

/// Extract a required i64 parameter or return an error.
pub(crate) fn require_i64_param(params: &Value, snake: &str, camel: &str) -> Result<i64> {
    get_i64_param(params, snake, camel).ok_or_else(|| missing(snake))
}

/// Extract an optional bool parameter, supporting both snake_case and camelCase.
pub(crate) fn get_bool_param(params: &Value, snake: &str, camel: &str) -> Option<bool> {
    lookup(params, snake, camel).and_then(|v| v.as_bool())
}

fn missing(name: &str) -> SermonError {
    SermonError::InvalidParams {
        message: format!("Missing required parameter: {}", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snake_and_camel() {
        let params = json!({"recordId": 4, "to_file": true});
        assert_eq!(get_i64_param(&params, "record_id", "recordId"), Some(4));
        assert_eq!(get_bool_param(&params, "to_file", "toFile"), Some(true));
    }

    #[test]
    fn test_missing_required() {
        let params = json!({"id": "seven"});
        assert!(matches!(
            require_i64_param(&params, "id", "id"),
            Err(SermonError::InvalidParams { .. })
        ));
        assert!(require_str_param(&params, "query", "query").is_err());
    }
}
