pub mod admin;
pub mod bookings;
pub mod events;
pub mod health;
pub mod response;
pub mod users;

use axum::{
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;

use crate::services::EventSchedule;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub schedule: EventSchedule,
}

pub fn build_router(pool: PgPool, schedule: EventSchedule) -> Router {
    let state = AppState { pool, schedule };

    Router::new()
        .route("/health", get(health::health_check))
        .route("/users", post(users::register_user))
        .route("/me", delete(users::delete_account))
        .route("/me/profile", get(users::get_profile).put(users::update_profile))
        .route("/me/bookings", get(bookings::list_my_bookings))
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/{id}", get(events::get_event).delete(events::delete_event))
        .route("/events/{id}/bookings", post(bookings::create_booking))
        .route("/bookings/{id}", delete(bookings::cancel_booking))
        .route("/admin/stats", get(admin::admin_stats))
        .with_state(state)
}
