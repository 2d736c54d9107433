use anyhow::Result;
use sqlx::PgPool;

use crate::models::stats::{AdminStats, EventBookingCount, RecentBooking};

use super::{BookingRepository, EventRepository, UserRepository};

pub struct StatsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StatsRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn recent_bookings(&self, limit: i64) -> Result<Vec<RecentBooking>> {
        let bookings = sqlx::query_as::<_, RecentBooking>(
            "SELECT b.id, b.booking_date, u.username, e.id AS event_id, e.title AS event_title
             FROM eventbook_bookings b
             JOIN eventbook_users u ON u.id = b.user_id
             JOIN eventbook_events e ON e.id = b.event_id
             ORDER BY b.booking_date DESC
             LIMIT $1"
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(bookings)
    }

    /// Events with the most bookings. Ties go to the earlier event.
    pub async fn top_events(&self, limit: i64) -> Result<Vec<EventBookingCount>> {
        let events = sqlx::query_as::<_, EventBookingCount>(
            "SELECT e.id, e.title, e.date, e.max_seats, COUNT(b.id) AS num_bookings
             FROM eventbook_events e
             LEFT JOIN eventbook_bookings b ON b.event_id = e.id
             GROUP BY e.id
             ORDER BY num_bookings DESC, e.date, e.time
             LIMIT $1"
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    pub async fn admin_stats(&self, limit: i64) -> Result<AdminStats> {
        Ok(AdminStats {
            total_events: EventRepository::new(self.pool).count().await?,
            total_bookings: BookingRepository::new(self.pool).count().await?,
            total_users: UserRepository::new(self.pool).count().await?,
            recent_bookings: self.recent_bookings(limit).await?,
            top_events: self.top_events(limit).await?,
        })
    }
}
