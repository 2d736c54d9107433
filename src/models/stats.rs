use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecentBooking {
    pub id: Uuid,
    pub booking_date: DateTime<Utc>,
    pub username: String,
    pub event_id: Uuid,
    pub event_title: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventBookingCount {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub max_seats: i32,
    pub num_bookings: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminStats {
    pub total_events: i64,
    pub total_bookings: i64,
    pub total_users: i64,
    pub recent_bookings: Vec<RecentBooking>,
    pub top_events: Vec<EventBookingCount>,
}
