//! Response wrapping for front-end compatibility.
//!
//! Front ends expect `{success: bool, <key>: data}` envelopes for list and
//! lookup methods. Handlers return raw data; this module adds the envelope.

use serde_json::{json, Value};

/// Wrap a handler's raw result in the envelope the front end expects.
pub fn wrap_response(method: &str, result: Value) -> Value {
    match method {
        // List wrappers
        "list_records" => list_envelope("records", result),
        "search" => list_envelope("results", result),
        "get_schema" => list_envelope("fields", result),

        // Single-record wrappers; null means "no record"
        "get_record" | "create_record" | "save_record" | "import_record_text"
        | "get_active_record" => {
            json!({
                "success": true,
                "record": result
            })
        }

        // Handlers that already build their own object
        _ => result,
    }
}

fn list_envelope(key: &str, result: Value) -> Value {
    let items = if result.is_null() { json!([]) } else { result };
    let mut envelope = serde_json::Map::new();
    envelope.insert("success".to_string(), Value::Bool(true));
    envelope.insert(key.to_string(), items);
    Value::Object(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_list() {
        let wrapped = wrap_response("list_records", json!([{"id": 1}]));
        assert_eq!(wrapped["success"], true);
        assert_eq!(wrapped["records"][0]["id"], 1);
    }

    #[test]
    fn test_wrap_null_list() {
        let wrapped = wrap_response("search", Value::Null);
        assert_eq!(wrapped["results"], json!([]));
    }

    #[test]
    fn test_wrap_record() {
        let wrapped = wrap_response("get_active_record", Value::Null);
        assert_eq!(wrapped, json!({"success": true, "record": null}));
    }

    #[test]
    fn test_passthrough() {
        let raw = json!({"success": true, "deleted": true});
        assert_eq!(wrap_response("delete_record", raw.clone()), raw);
    }
}
