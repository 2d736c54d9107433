use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

use crate::services::capacity::Capacity;

pub const TITLE_MAX_LEN: usize = 200;
pub const VENUE_MAX_LEN: usize = 255;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,

    pub description: String,

    pub date: NaiveDate,
    pub time: NaiveTime,

    pub venue: String,

    pub max_seats: i32,

    /// Storage path or URL of the event image.
    pub image: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// An event as readers see it: the stored row plus seat availability
/// counted from its bookings in the same query.
#[derive(Debug, Clone, Serialize)]
pub struct EventWithCapacity {
    #[serde(flatten)]
    pub event: Event,

    #[serde(flatten)]
    pub capacity: Capacity,
}

impl<'r> FromRow<'r, PgRow> for EventWithCapacity {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let event = Event::from_row(row)?;
        let booked_seats: i64 = row.try_get("booked_seats")?;

        Ok(Self {
            capacity: Capacity::new(event.max_seats, booked_seats),
            event,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub venue: String,
    pub max_seats: i32,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    pub q: Option<String>,
    pub from: Option<NaiveDate>,
}

impl Event {
    pub fn new(create: CreateEvent) -> Result<Self, String> {
        let title = create.title.trim().to_string();
        if title.is_empty() {
            return Err("Title cannot be empty".to_string());
        }
        if title.chars().count() > TITLE_MAX_LEN {
            return Err(format!("Title must be at most {} characters", TITLE_MAX_LEN));
        }

        let venue = create.venue.trim().to_string();
        if venue.is_empty() {
            return Err("Venue cannot be empty".to_string());
        }
        if venue.chars().count() > VENUE_MAX_LEN {
            return Err(format!("Venue must be at most {} characters", VENUE_MAX_LEN));
        }

        if create.max_seats < 1 {
            return Err("max_seats must be a positive integer".to_string());
        }

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            description: create.description,
            date: create.date,
            time: create.time,
            venue,
            max_seats: create.max_seats,
            image: create.image.filter(|s| !s.trim().is_empty()),
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: &str, venue: &str, max_seats: i32) -> CreateEvent {
        CreateEvent {
            title: title.to_string(),
            description: "Live music".to_string(),
            date: NaiveDate::from_ymd_opt(2030, 5, 1).unwrap(),
            time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            venue: venue.to_string(),
            max_seats,
            image: Some("   ".to_string()),
        }
    }

    #[test]
    fn test_new_event_trims_and_drops_blank_image() {
        let event = Event::new(payload("  Jazz Night ", "Blue Hall", 50)).unwrap();

        assert_eq!(event.title, "Jazz Night");
        assert_eq!(event.max_seats, 50);
        assert!(event.image.is_none());
    }

    #[test]
    fn test_new_event_rejects_non_positive_seats() {
        assert!(Event::new(payload("Jazz Night", "Blue Hall", 0)).is_err());
        assert!(Event::new(payload("Jazz Night", "Blue Hall", -3)).is_err());
    }

    #[test]
    fn test_event_with_capacity_serializes_each_key_once() {
        let event = Event::new(payload("Jazz Night", "Blue Hall", 50)).unwrap();
        let view = EventWithCapacity {
            capacity: Capacity::new(event.max_seats, 12),
            event,
        };

        let body = serde_json::to_string(&view).unwrap();

        assert_eq!(body.matches("\"max_seats\"").count(), 1);
        assert!(body.contains("\"available_seats\":38"));
        assert!(body.contains("\"is_fully_booked\":false"));
    }

    #[test]
    fn test_new_event_rejects_blank_or_long_fields() {
        assert!(Event::new(payload("  ", "Blue Hall", 10)).is_err());
        assert!(Event::new(payload("Jazz Night", "", 10)).is_err());

        let long_title = "x".repeat(TITLE_MAX_LEN + 1);
        assert!(Event::new(payload(&long_title, "Blue Hall", 10)).is_err());
    }
}
