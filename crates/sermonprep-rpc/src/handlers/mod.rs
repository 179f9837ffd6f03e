//! JSON-RPC request handlers, split by domain.

mod records;
mod search;
mod shared;
mod transfer;

use crate::server::AppState;
use crate::wrapper::wrap_response;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info};

pub(crate) use shared::{
    get_bool_param, get_i64_param, get_str_param, require_i64_param, require_str_param,
};

// ============================================================================
// JSON-RPC types
// ============================================================================

/// JSON-RPC 2.0 request structure.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 error structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Code for a method name nothing dispatches to.
const METHOD_NOT_FOUND: i32 = -32601;

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data: None,
            }),
            id,
        }
    }
}

// ============================================================================
// HTTP endpoints
// ============================================================================

/// Health check endpoint.
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Main JSON-RPC handler.
pub async fn handle_rpc(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    let method = request.method.as_str();
    let params = request.params.unwrap_or(Value::Object(Default::default()));
    let id = request.id;

    debug!("RPC call: {}({:?})", method, params);

    // Built-in methods
    match method {
        "health_check" => {
            return (
                StatusCode::OK,
                Json(JsonRpcResponse::success(id, json!({"status": "ok"}))),
            );
        }
        "shutdown" => {
            info!("Shutdown requested by client");
            state.request_shutdown();
            return (
                StatusCode::OK,
                Json(JsonRpcResponse::success(
                    id,
                    json!({"status": "shutting_down"}),
                )),
            );
        }
        _ => {}
    }

    match dispatch_method(&state, method, &params).await {
        Some(Ok(value)) => {
            let wrapped = wrap_response(method, value);
            (StatusCode::OK, Json(JsonRpcResponse::success(id, wrapped)))
        }
        Some(Err(e)) => {
            error!("RPC error for {}: {}", method, e);
            let code = e.to_rpc_error_code();
            (
                StatusCode::OK,
                Json(JsonRpcResponse::error(id, code, e.to_string())),
            )
        }
        None => (
            StatusCode::OK,
            Json(JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", method),
            )),
        ),
    }
}

// ============================================================================
// Method dispatcher
// ============================================================================

/// Dispatch a method call to the appropriate domain handler.
///
/// Returns `None` for unknown methods.
async fn dispatch_method(
    state: &AppState,
    method: &str,
    params: &Value,
) -> Option<sermonprep_core::Result<Value>> {
    let result = match method {
        // Records
        "list_records" => records::list_records(state, params).await,
        "get_record" => records::get_record(state, params).await,
        "create_record" => records::create_record(state, params).await,
        "save_record" => records::save_record(state, params).await,
        "update_field" => records::update_field(state, params).await,
        "delete_record" => records::delete_record(state, params).await,
        "set_active_record" => records::set_active_record(state, params).await,
        "get_active_record" => records::get_active_record(state, params).await,
        "get_schema" => records::get_schema(state, params).await,

        // Search
        "search" => search::search(state, params).await,

        // Transfer
        "export_record_text" => transfer::export_record_text(state, params).await,
        "import_record_text" => transfer::import_record_text(state, params).await,
        "backup" => transfer::backup(state, params).await,
        "restore" => transfer::restore(state, params).await,

        _ => return None,
    };
    Some(result)
}
