//! Text export/import and backup handlers.

use super::{get_bool_param, get_str_param, require_i64_param, require_str_param};
use crate::server::AppState;
use serde_json::{json, Value};
use std::path::PathBuf;

pub async fn export_record_text(
    state: &AppState,
    params: &Value,
) -> sermonprep_core::Result<Value> {
    let id = require_i64_param(params, "id", "id")?;

    if get_bool_param(params, "to_file", "toFile").unwrap_or(false) {
        let path = state.library.export_record_to_file(id).await?;
        return Ok(json!({
            "success": true,
            "path": path.display().to_string()
        }));
    }

    let text = state.library.export_record_text(id).await?;
    Ok(json!({"success": true, "text": text}))
}

pub async fn import_record_text(
    state: &AppState,
    params: &Value,
) -> sermonprep_core::Result<Value> {
    let text = require_str_param(params, "text", "text")?;
    let record = state.library.import_record_text(&text).await?;
    Ok(serde_json::to_value(record)?)
}

pub async fn backup(state: &AppState, params: &Value) -> sermonprep_core::Result<Value> {
    let path = get_str_param(params, "path", "path").map(PathBuf::from);
    let (path, count) = state.library.backup(path).await?;
    Ok(json!({
        "success": true,
        "path": path.display().to_string(),
        "count": count
    }))
}

pub async fn restore(state: &AppState, params: &Value) -> sermonprep_core::Result<Value> {
    let path = require_str_param(params, "path", "path")?;
    let inserted = state.library.restore(&PathBuf::from(path)).await?;
    Ok(json!({"success": true, "inserted": inserted}))
}
