//! Record and schema handlers.

use super::{get_i64_param, require_i64_param, require_str_param};
use crate::server::AppState;
use sermonprep_core::schema::describe;
use sermonprep_core::{Record, SermonError};
use serde_json::{json, Value};

pub async fn list_records(state: &AppState, _params: &Value) -> sermonprep_core::Result<Value> {
    let records = state.library.list_records().await?;
    Ok(serde_json::to_value(records)?)
}

pub async fn get_record(state: &AppState, params: &Value) -> sermonprep_core::Result<Value> {
    let id = require_i64_param(params, "id", "id")?;
    let record = state.library.get_record(id).await?;
    Ok(serde_json::to_value(record)?)
}

pub async fn create_record(state: &AppState, _params: &Value) -> sermonprep_core::Result<Value> {
    let record = state.library.create_record().await?;
    Ok(serde_json::to_value(record)?)
}

pub async fn save_record(state: &AppState, params: &Value) -> sermonprep_core::Result<Value> {
    let raw = params
        .get("record")
        .cloned()
        .ok_or_else(|| SermonError::InvalidParams {
            message: "Missing required parameter: record".to_string(),
        })?;
    let record: Record = serde_json::from_value(raw).map_err(|e| SermonError::InvalidParams {
        message: format!("Invalid record: {}", e),
    })?;

    let saved = state.library.save_record(&record).await?;
    Ok(serde_json::to_value(saved)?)
}

pub async fn update_field(state: &AppState, params: &Value) -> sermonprep_core::Result<Value> {
    let id = require_i64_param(params, "id", "id")?;
    let field = require_str_param(params, "field", "field")?;
    let value = require_str_param(params, "value", "value")?;

    state.library.update_field(id, &field, &value).await?;
    Ok(json!({"success": true}))
}

pub async fn delete_record(state: &AppState, params: &Value) -> sermonprep_core::Result<Value> {
    let id = require_i64_param(params, "id", "id")?;
    let deleted = state.library.delete_record(id).await?;
    Ok(json!({"success": true, "deleted": deleted}))
}

pub async fn set_active_record(
    state: &AppState,
    params: &Value,
) -> sermonprep_core::Result<Value> {
    // Absent or null id clears the active record.
    let id = get_i64_param(params, "id", "id");
    state.library.set_active_record(id).await?;
    Ok(json!({"success": true, "active_id": id}))
}

pub async fn get_active_record(
    state: &AppState,
    _params: &Value,
) -> sermonprep_core::Result<Value> {
    let record = state.library.active_record().await?;
    Ok(serde_json::to_value(record)?)
}

pub async fn get_schema(_state: &AppState, _params: &Value) -> sermonprep_core::Result<Value> {
    Ok(serde_json::to_value(describe())?)
}
