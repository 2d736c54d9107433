use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::models::profile::UpdateProfile;
use crate::models::{User, UserProfile};
use crate::repositories::{ProfileRepository, UserRepository};

use crate::error::AccountError;

/// Get-or-create of a user's profile on a caller-held connection.
///
/// Safe to call any number of times and concurrently: the insert is a no-op
/// when the row exists.
pub async fn ensure_profile_with(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<UserProfile, sqlx::Error> {
    if ProfileRepository::insert_missing(&mut *conn, user_id).await? {
        info!("Created profile for user {}", user_id);
    }

    ProfileRepository::find(&mut *conn, user_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Keeps every account paired with exactly one profile.
pub struct ProfileSynchronizer<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileSynchronizer<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_profile(&self, user: &User) -> Result<UserProfile, AccountError> {
        let mut conn = self.pool.acquire().await?;

        ensure_profile_with(&mut *conn, user.id)
            .await
            .map_err(profile_error)
    }

    /// Applies profile edits, creating the profile first for accounts that
    /// predate it. Returns the updated user and profile.
    pub async fn update_profile(
        &self,
        user: &User,
        update: UpdateProfile,
    ) -> Result<(User, UserProfile), AccountError> {
        let update = update.validate().map_err(AccountError::Validation)?;

        let mut tx = self.pool.begin().await?;

        let mut profile = ensure_profile_with(&mut *tx, user.id)
            .await
            .map_err(profile_error)?;

        let updated = UserRepository::update_details(
            &mut *tx,
            user.id,
            &update.email,
            &update.first_name,
            &update.last_name,
        )
        .await?;
        if !updated {
            return Err(AccountError::NotFound);
        }

        profile.mobile = update.mobile;
        profile.profile_picture = update.profile_picture;
        ProfileRepository::update(&mut *tx, &profile).await?;

        tx.commit().await?;

        info!("Updated profile for user {}", user.id);

        let user = User {
            email: update.email,
            first_name: update.first_name,
            last_name: update.last_name,
            ..user.clone()
        };

        Ok((user, profile))
    }
}

/// A missing profile row or a dangling user reference means the user was
/// removed between authentication and now.
fn profile_error(err: sqlx::Error) -> AccountError {
    match err {
        sqlx::Error::RowNotFound => AccountError::NotFound,
        err if is_foreign_key_violation(&err) => AccountError::NotFound,
        err => AccountError::Database(err),
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}
