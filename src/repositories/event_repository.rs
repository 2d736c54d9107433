use anyhow::Result;
use chrono::NaiveDate;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::models::{Event, EventWithCapacity};

const SELECT_WITH_CAPACITY: &str = "SELECT e.*, \
     (SELECT COUNT(*) FROM eventbook_bookings b WHERE b.event_id = e.id) AS booked_seats \
     FROM eventbook_events e";

pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, event: &Event) -> Result<()> {
        sqlx::query(
            "INSERT INTO eventbook_events
             (id, title, description, date, time, venue, max_seats, image, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(event.time)
        .bind(&event.venue)
        .bind(event.max_seats)
        .bind(&event.image)
        .bind(event.created_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventWithCapacity>> {
        let sql = format!("{} WHERE e.id = $1", SELECT_WITH_CAPACITY);
        let event = sqlx::query_as::<_, EventWithCapacity>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(event)
    }

    /// Events dated `from` or later, soonest first. A non-blank `filter`
    /// keeps events whose title, description or venue contains it,
    /// ignoring case.
    pub async fn list_upcoming(
        &self,
        filter: Option<&str>,
        from: NaiveDate,
    ) -> Result<Vec<EventWithCapacity>> {
        let mut query_builder = QueryBuilder::new(SELECT_WITH_CAPACITY);

        query_builder.push(" WHERE e.date >= ");
        query_builder.push_bind(from);

        if let Some(text) = filter.map(str::trim).filter(|t| !t.is_empty()) {
            let pattern = format!("%{}%", escape_like(text));
            query_builder.push(" AND (e.title ILIKE ");
            query_builder.push_bind(pattern.clone());
            query_builder.push(" OR e.description ILIKE ");
            query_builder.push_bind(pattern.clone());
            query_builder.push(" OR e.venue ILIKE ");
            query_builder.push_bind(pattern);
            query_builder.push(")");
        }

        query_builder.push(" ORDER BY e.date, e.time");

        let events = query_builder
            .build_query_as::<EventWithCapacity>()
            .fetch_all(self.pool)
            .await?;

        Ok(events)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM eventbook_events WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM eventbook_events")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

/// Escapes LIKE wildcards so user text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
