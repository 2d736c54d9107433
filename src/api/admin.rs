use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::middleware::AdminUser;
use crate::repositories::StatsRepository;

use super::response::ApiResult;
use super::AppState;

/// Rows shown in each of the dashboard's top lists.
const DASHBOARD_LIMIT: i64 = 5;

pub async fn admin_stats(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<impl IntoResponse> {
    let stats = StatsRepository::new(&state.pool)
        .admin_stats(DASHBOARD_LIMIT)
        .await?;

    Ok(Json(json!(stats)))
}
