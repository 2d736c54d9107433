use anyhow::Result;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::User;

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Inserts on a caller-held connection so account creation can share a
    /// transaction with the profile insert.
    pub async fn insert(conn: &mut PgConnection, user: &User) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO eventbook_users
             (id, username, email, first_name, last_name, is_superuser, date_joined)
             VALUES ($1, $2, $3, $4, $5, $6, $7)"
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.is_superuser)
        .bind(user.date_joined)
        .execute(conn)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM eventbook_users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    pub async fn update_details(
        conn: &mut PgConnection,
        id: Uuid,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE eventbook_users SET email = $1, first_name = $2, last_name = $3 WHERE id = $4",
        )
        .bind(email)
        .bind(first_name)
        .bind(last_name)
        .bind(id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deleting a user removes their profile and bookings by cascade.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM eventbook_users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM eventbook_users")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
