use serde::Serialize;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::BookingError;

/// Seat availability of one event at the moment it was counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capacity {
    /// Already present on the event this capacity is flattened into.
    #[serde(skip_serializing)]
    pub max_seats: i64,
    pub booked_seats: i64,
    pub available_seats: i64,
    pub is_fully_booked: bool,
}

impl Capacity {
    pub fn new(max_seats: i32, booked_seats: i64) -> Self {
        let max_seats = i64::from(max_seats);
        let available_seats = max_seats - booked_seats;

        Self {
            max_seats,
            booked_seats,
            available_seats,
            is_fully_booked: available_seats <= 0,
        }
    }
}

/// Number of booking rows held against an event.
pub(crate) async fn count_bookings(
    conn: &mut PgConnection,
    event_id: Uuid,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM eventbook_bookings WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(conn)
            .await?;

    Ok(count)
}

/// Read-through view of seat availability. Nothing is cached: every call
/// counts the booking rows again.
pub struct CapacityLedger<'a> {
    pool: &'a PgPool,
}

impl<'a> CapacityLedger<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn capacity(&self, event_id: Uuid) -> Result<Capacity, BookingError> {
        let mut conn = self.pool.acquire().await?;

        let max_seats: i32 =
            sqlx::query_scalar("SELECT max_seats FROM eventbook_events WHERE id = $1")
                .bind(event_id)
                .fetch_optional(&mut *conn)
                .await?
                .ok_or(BookingError::NotFound("Event"))?;

        let booked_seats = count_bookings(&mut *conn, event_id).await?;

        Ok(Capacity::new(max_seats, booked_seats))
    }

    pub async fn available_seats(&self, event_id: Uuid) -> Result<i64, BookingError> {
        Ok(self.capacity(event_id).await?.available_seats)
    }

    pub async fn is_fully_booked(&self, event_id: Uuid) -> Result<bool, BookingError> {
        Ok(self.capacity(event_id).await?.is_fully_booked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_counts_down_to_full() {
        let max_seats = 3;
        for booked in 0..=3 {
            let capacity = Capacity::new(max_seats, booked);
            assert_eq!(capacity.available_seats, 3 - booked);
            assert_eq!(capacity.is_fully_booked, booked >= 3);
        }
    }

    #[test]
    fn test_overbooked_event_reports_negative_availability() {
        let capacity = Capacity::new(2, 3);
        assert_eq!(capacity.available_seats, -1);
        assert!(capacity.is_fully_booked);
    }
}
