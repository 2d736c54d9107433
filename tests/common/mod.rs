#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use eventbook::models::event::CreateEvent;
use eventbook::models::user::RegisterUser;
use eventbook::models::{Event, User};
use eventbook::repositories::EventRepository;
use eventbook::services::Accounts;
use sqlx::PgPool;
use uuid::Uuid;

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub async fn register(pool: &PgPool, username: &str) -> User {
    let (user, _) = Accounts::new(pool)
        .register_user(RegisterUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            first_name: String::new(),
            last_name: String::new(),
        })
        .await
        .unwrap();

    user
}

pub async fn register_admin(pool: &PgPool, username: &str) -> User {
    let user = register(pool, username).await;
    sqlx::query("UPDATE eventbook_users SET is_superuser = TRUE WHERE id = $1")
        .bind(user.id)
        .execute(pool)
        .await
        .unwrap();

    User {
        is_superuser: true,
        ..user
    }
}

pub async fn create_event(
    pool: &PgPool,
    title: &str,
    date: NaiveDate,
    time: NaiveTime,
    max_seats: i32,
) -> Event {
    let event = Event::new(CreateEvent {
        title: title.to_string(),
        description: format!("{} description", title),
        date,
        time,
        venue: "Town Hall".to_string(),
        max_seats,
        image: None,
    })
    .unwrap();

    EventRepository::new(pool).create(&event).await.unwrap();

    event
}

pub async fn booking_exists(pool: &PgPool, user_id: Uuid, booking_id: Uuid) -> bool {
    let (exists,): (bool,) = sqlx::query_as(
        "SELECT EXISTS(SELECT 1 FROM eventbook_bookings WHERE id = $1 AND user_id = $2)",
    )
    .bind(booking_id)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap();

    exists
}

pub async fn profile_count(pool: &PgPool, user_id: Uuid) -> i64 {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM eventbook_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .unwrap();

    count
}
