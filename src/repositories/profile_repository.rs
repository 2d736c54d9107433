use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::UserProfile;

pub struct ProfileRepository;

impl ProfileRepository {
    /// Inserts an empty profile unless one exists. Returns whether a row was
    /// created.
    pub async fn insert_missing(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO eventbook_profiles (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        sqlx::query_as::<_, UserProfile>("SELECT * FROM eventbook_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(conn)
            .await
    }

    pub async fn update(conn: &mut PgConnection, profile: &UserProfile) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE eventbook_profiles SET mobile = $1, profile_picture = $2 WHERE user_id = $3",
        )
        .bind(&profile.mobile)
        .bind(&profile.profile_picture)
        .bind(profile.user_id)
        .execute(conn)
        .await?;

        Ok(())
    }
}
