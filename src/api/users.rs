use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::middleware::CurrentUser;
use crate::models::profile::UpdateProfile;
use crate::models::user::RegisterUser;
use crate::services::{Accounts, ProfileSynchronizer};

use super::response::ApiResult;
use super::AppState;

pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUser>,
) -> ApiResult<impl IntoResponse> {
    let (user, profile) = Accounts::new(&state.pool).register_user(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"user": user, "profile": profile})),
    ))
}

pub async fn delete_account(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<StatusCode> {
    Accounts::new(&state.pool).delete_account(&user).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<impl IntoResponse> {
    let profile = ProfileSynchronizer::new(&state.pool)
        .ensure_profile(&user)
        .await?;

    Ok(Json(json!({"user": user, "profile": profile})))
}

pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<UpdateProfile>,
) -> ApiResult<impl IntoResponse> {
    let (user, profile) = ProfileSynchronizer::new(&state.pool)
        .update_profile(&user, payload)
        .await?;

    Ok(Json(json!({
        "message": "Your profile has been updated successfully!",
        "user": user,
        "profile": profile,
    })))
}
