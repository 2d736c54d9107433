use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::error;

use super::{response::ApiResult, AppState};

pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => Ok(Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        }))),
        Err(err) => {
            error!("Health check failed: {}", err);
            Err(StatusCode::SERVICE_UNAVAILABLE.into())
        }
    }
}
