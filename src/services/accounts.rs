use sqlx::PgPool;
use tracing::info;

use crate::error::{is_unique_violation, AccountError};
use crate::models::user::RegisterUser;
use crate::models::{User, UserProfile};
use crate::repositories::UserRepository;

use super::profile_sync::ensure_profile_with;

/// Account lifecycle. Creation and profile creation share one transaction,
/// so no account is ever visible without its profile.
pub struct Accounts<'a> {
    pool: &'a PgPool,
}

impl<'a> Accounts<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn register_user(
        &self,
        register: RegisterUser,
    ) -> Result<(User, UserProfile), AccountError> {
        let user = User::new(register).map_err(AccountError::Validation)?;

        let mut tx = self.pool.begin().await?;

        if let Err(err) = UserRepository::insert(&mut *tx, &user).await {
            if is_unique_violation(&err) {
                return Err(AccountError::UsernameTaken(user.username));
            }
            return Err(err.into());
        }

        let profile = ensure_profile_with(&mut *tx, user.id).await?;

        tx.commit().await?;

        info!("Registered user {} ({})", user.id, user.username);

        Ok((user, profile))
    }

    /// Removes the account together with its profile and bookings.
    pub async fn delete_account(&self, user: &User) -> Result<(), AccountError> {
        let deleted = UserRepository::new(self.pool)
            .delete(user.id)
            .await?;

        if !deleted {
            return Err(AccountError::NotFound);
        }

        info!("Deleted user {} ({})", user.id, user.username);

        Ok(())
    }
}
