use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::models::UserBookings;
use crate::repositories::{BookingRepository, EventRepository};
use crate::services::BookingGuard;

use super::response::{ApiError, ApiResult};
use super::AppState;

pub async fn create_booking(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(event_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let booking = BookingGuard::new(&state.pool, state.schedule)
        .create_booking(&user, event_id, Utc::now())
        .await?;

    let event = EventRepository::new(&state.pool)
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event"))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": format!("Successfully booked a seat for {}!", event.event.title),
            "booking": booking,
            "event": event,
        })),
    ))
}

pub async fn cancel_booking(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(booking_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    BookingGuard::new(&state.pool, state.schedule)
        .cancel_booking(&user, booking_id, Utc::now())
        .await?;

    Ok(Json(json!({"message": "Your booking has been cancelled."})))
}

pub async fn list_my_bookings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<impl IntoResponse> {
    let bookings = BookingRepository::new(&state.pool)
        .list_for_user(user.id)
        .await?;

    let today = state.schedule.today(Utc::now());

    Ok(Json(json!(UserBookings::partition(bookings, today))))
}
