use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::middleware::{AdminUser, MaybeUser};
use crate::models::event::{CreateEvent, ListEventsQuery};
use crate::models::Event;
use crate::repositories::{BookingRepository, EventRepository};

use super::response::{ApiError, ApiResult};
use super::AppState;

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> ApiResult<impl IntoResponse> {
    let from = query
        .from
        .unwrap_or_else(|| state.schedule.today(Utc::now()));

    let events = EventRepository::new(&state.pool)
        .list_upcoming(query.q.as_deref(), from)
        .await?;

    Ok(Json(json!(events)))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    MaybeUser(user): MaybeUser,
) -> ApiResult<impl IntoResponse> {
    let event = EventRepository::new(&state.pool)
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event"))?;

    let mut body = json!(event);
    if let Some(user) = user {
        let has_booked = BookingRepository::new(&state.pool)
            .has_booked(user.id, event_id)
            .await?;
        body["has_booked"] = json!(has_booked);
    }

    Ok(Json(body))
}

pub async fn create_event(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateEvent>,
) -> ApiResult<impl IntoResponse> {
    let event = Event::new(payload).map_err(|msg| ApiError::new(StatusCode::BAD_REQUEST, msg))?;

    let repo = EventRepository::new(&state.pool);
    repo.create(&event).await?;

    info!("Admin {} created event {} ({})", admin.id, event.id, event.title);

    let created = repo
        .find_by_id(event.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event"))?;

    Ok((StatusCode::CREATED, Json(json!(created))))
}

pub async fn delete_event(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(event_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !EventRepository::new(&state.pool).delete(event_id).await? {
        return Err(ApiError::not_found("Event"));
    }

    info!("Admin {} deleted event {}", admin.id, event_id);

    Ok(StatusCode::NO_CONTENT)
}
