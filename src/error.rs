use thiserror::Error;

/// Outcomes of the booking rules that callers are expected to show to users.
///
/// `Database` is the only variant that is not a rule violation; it covers
/// unexpected persistence failures and is reported generically.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Cannot book an event that has already passed.")]
    EventPassed,

    #[error("{title} is fully booked. Sorry!")]
    EventFull { title: String },

    #[error("You have already booked a seat for {title}.")]
    DuplicateBooking { title: String },

    #[error("Cannot cancel a booking once the event has started.")]
    TooLateToCancel,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{0}")]
    Validation(String),

    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("User not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// True when the error is a unique-constraint violation reported by the store.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
