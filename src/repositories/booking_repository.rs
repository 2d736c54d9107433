use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::BookingDetail;

pub struct BookingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BookingRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn has_booked(&self, user_id: Uuid, event_id: Uuid) -> Result<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM eventbook_bookings WHERE user_id = $1 AND event_id = $2)",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// The user's bookings with their event details, newest booking first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<BookingDetail>> {
        let bookings = sqlx::query_as::<_, BookingDetail>(
            "SELECT b.id, b.event_id, b.booking_date,
                    e.title AS event_title, e.date AS event_date,
                    e.time AS event_time, e.venue AS event_venue
             FROM eventbook_bookings b
             JOIN eventbook_events e ON e.id = b.event_id
             WHERE b.user_id = $1
             ORDER BY b.booking_date DESC"
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM eventbook_bookings")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
