use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::state::AppState;

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    if state.db.health_check().await {
        Ok(Json(json!({ "status": "ok" })))
    } else {
        Err(ApiError::new(ErrorCode::ServiceUnavailable, "Database unavailable"))
    }
}
