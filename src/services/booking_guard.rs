use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{is_unique_violation, BookingError};
use crate::models::{Booking, Event, User};

use super::capacity::{count_bookings, Capacity};
use super::schedule::EventSchedule;

/// Decides whether a booking may be created.
///
/// Checks run in a fixed order and the first failure wins: a passed event is
/// reported before a full one, and a full one before a duplicate. "Passed"
/// compares dates only, so an event stays bookable for the whole of its day.
pub fn check_bookable(
    event: &Event,
    capacity: &Capacity,
    already_booked: bool,
    today: NaiveDate,
) -> Result<(), BookingError> {
    if event.date < today {
        return Err(BookingError::EventPassed);
    }

    if capacity.is_fully_booked {
        return Err(BookingError::EventFull {
            title: event.title.clone(),
        });
    }

    if already_booked {
        return Err(BookingError::DuplicateBooking {
            title: event.title.clone(),
        });
    }

    Ok(())
}

/// Decides whether a booking may still be cancelled: only strictly before
/// the event's start instant.
pub fn check_cancellable(starts_at: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), BookingError> {
    if now >= starts_at {
        return Err(BookingError::TooLateToCancel);
    }

    Ok(())
}

/// Creates and cancels bookings.
///
/// Each operation runs in one transaction. Creation locks the event row
/// first, so concurrent bookings of the same event pass through the capacity
/// and duplicate checks one at a time.
pub struct BookingGuard<'a> {
    pool: &'a PgPool,
    schedule: EventSchedule,
}

impl<'a> BookingGuard<'a> {
    pub fn new(pool: &'a PgPool, schedule: EventSchedule) -> Self {
        Self { pool, schedule }
    }

    pub async fn create_booking(
        &self,
        user: &User,
        event_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        let mut tx = self.pool.begin().await?;

        let event = sqlx::query_as::<_, Event>(
            "SELECT * FROM eventbook_events WHERE id = $1 FOR UPDATE",
        )
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(BookingError::NotFound("Event"))?;

        let booked_seats = count_bookings(&mut *tx, event.id).await?;
        let capacity = Capacity::new(event.max_seats, booked_seats);

        let (already_booked,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM eventbook_bookings WHERE user_id = $1 AND event_id = $2)",
        )
        .bind(user.id)
        .bind(event.id)
        .fetch_one(&mut *tx)
        .await?;

        let today = self.schedule.today(now);
        if let Err(err) = check_bookable(&event, &capacity, already_booked, today) {
            warn!(
                "Booking of event {} by user {} rejected: {}",
                event.id, user.id, err
            );
            return Err(err);
        }

        let booking = Booking::new(user.id, event.id, now);

        let inserted = sqlx::query(
            "INSERT INTO eventbook_bookings (id, user_id, event_id, booking_date)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(booking.id)
        .bind(booking.user_id)
        .bind(booking.event_id)
        .bind(booking.booking_date)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                warn!(
                    "Duplicate booking of event {} by user {} caught by constraint",
                    event.id, user.id
                );
                return Err(BookingError::DuplicateBooking { title: event.title });
            }
            Err(err) => return Err(err.into()),
        }

        tx.commit().await?;

        info!(
            "User {} booked event {} ({} seats left)",
            user.id,
            event.id,
            capacity.available_seats - 1
        );

        Ok(booking)
    }

    pub async fn cancel_booking(
        &self,
        user: &User,
        booking_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), BookingError> {
        let mut tx = self.pool.begin().await?;

        let booking = sqlx::query_as::<_, Booking>(
            "SELECT * FROM eventbook_bookings WHERE id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(booking_id)
        .bind(user.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(BookingError::NotFound("Booking"))?;

        let event = sqlx::query_as::<_, Event>("SELECT * FROM eventbook_events WHERE id = $1")
            .bind(booking.event_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(BookingError::NotFound("Event"))?;

        let starts_at = self.schedule.starts_at(event.date, event.time);
        if let Err(err) = check_cancellable(starts_at, now) {
            warn!(
                "Cancellation of booking {} rejected: event {} started at {}",
                booking.id, event.id, starts_at
            );
            return Err(err);
        }

        sqlx::query("DELETE FROM eventbook_bookings WHERE id = $1")
            .bind(booking.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!("User {} cancelled booking {} for event {}", user.id, booking.id, event.id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn event_on(date: NaiveDate, max_seats: i32) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "Rust Meetup".to_string(),
            description: String::new(),
            date,
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            venue: "Hall A".to_string(),
            max_seats,
            image: None,
            created_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    #[test]
    fn test_bookable_when_seats_remain() {
        let event = event_on(today(), 2);
        let capacity = Capacity::new(2, 1);

        assert!(check_bookable(&event, &capacity, false, today()).is_ok());
    }

    #[test]
    fn test_passed_event_reported_before_full() {
        let event = event_on(today().pred_opt().unwrap(), 1);
        let capacity = Capacity::new(1, 1);

        let err = check_bookable(&event, &capacity, true, today()).unwrap_err();
        assert!(matches!(err, BookingError::EventPassed));
    }

    #[test]
    fn test_full_event_reported_before_duplicate() {
        let event = event_on(today(), 1);
        let capacity = Capacity::new(1, 1);

        let err = check_bookable(&event, &capacity, true, today()).unwrap_err();
        assert!(matches!(err, BookingError::EventFull { .. }));
        assert_eq!(err.to_string(), "Rust Meetup is fully booked. Sorry!");
    }

    #[test]
    fn test_duplicate_rejected_when_seats_remain() {
        let event = event_on(today().succ_opt().unwrap(), 10);
        let capacity = Capacity::new(10, 1);

        let err = check_bookable(&event, &capacity, true, today()).unwrap_err();
        assert!(matches!(err, BookingError::DuplicateBooking { .. }));
    }

    #[test]
    fn test_cancel_cutoff_is_exclusive() {
        let starts_at = Utc.with_ymd_and_hms(2026, 6, 15, 9, 0, 0).unwrap();

        assert!(check_cancellable(starts_at, starts_at - chrono::Duration::seconds(1)).is_ok());
        assert!(matches!(
            check_cancellable(starts_at, starts_at),
            Err(BookingError::TooLateToCancel)
        ));
        assert!(matches!(
            check_cancellable(starts_at, starts_at + chrono::Duration::hours(1)),
            Err(BookingError::TooLateToCancel)
        ));
    }

    #[test]
    fn test_same_day_event_bookable_but_not_cancellable_after_start() {
        let schedule = EventSchedule::default();
        let event = event_on(today(), 5);
        let now = Utc.with_ymd_and_hms(2026, 6, 15, 10, 0, 0).unwrap();

        assert!(check_bookable(&event, &Capacity::new(5, 0), false, schedule.today(now)).is_ok());
        assert!(matches!(
            check_cancellable(schedule.starts_at(event.date, event.time), now),
            Err(BookingError::TooLateToCancel)
        ));
    }
}
