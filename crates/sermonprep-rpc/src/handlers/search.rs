//! Search handler.

use super::require_str_param;
use crate::server::AppState;
use serde_json::Value;

pub async fn search(state: &AppState, params: &Value) -> sermonprep_core::Result<Value> {
    let query = require_str_param(params, "query", "query")?;
    let rows = state.library.search(&query).await?;
    Ok(serde_json::to_value(rows)?)
}
