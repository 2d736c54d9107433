use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,

    pub booking_date: DateTime<Utc>,
}

/// A booking joined with the event fields a booking list shows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingDetail {
    pub id: Uuid,
    pub event_id: Uuid,
    pub booking_date: DateTime<Utc>,

    pub event_title: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub event_venue: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserBookings {
    pub upcoming: Vec<BookingDetail>,
    pub past: Vec<BookingDetail>,
}

impl Booking {
    pub fn new(user_id: Uuid, event_id: Uuid, booking_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            event_id,
            booking_date,
        }
    }
}

impl UserBookings {
    /// Splits bookings on the event date: anything dated `today` or later is
    /// upcoming. Input order is kept within each half.
    pub fn partition(bookings: Vec<BookingDetail>, today: NaiveDate) -> Self {
        let (upcoming, past): (Vec<_>, Vec<_>) = bookings
            .into_iter()
            .partition(|booking| booking.event_date >= today);

        Self { upcoming, past }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(title: &str, date: NaiveDate) -> BookingDetail {
        BookingDetail {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            booking_date: Utc::now(),
            event_title: title.to_string(),
            event_date: date,
            event_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            event_venue: "Main Hall".to_string(),
        }
    }

    #[test]
    fn test_partition_keeps_todays_events_upcoming() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let bookings = vec![
            detail("tomorrow", today.succ_opt().unwrap()),
            detail("today", today),
            detail("yesterday", today.pred_opt().unwrap()),
        ];

        let split = UserBookings::partition(bookings, today);

        let upcoming: Vec<_> = split.upcoming.iter().map(|b| b.event_title.as_str()).collect();
        let past: Vec<_> = split.past.iter().map(|b| b.event_title.as_str()).collect();
        assert_eq!(upcoming, vec!["tomorrow", "today"]);
        assert_eq!(past, vec!["yesterday"]);
    }
}
