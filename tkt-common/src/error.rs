//! Common error types for TKT

use thiserror::Error;

/// Common result type for TKT operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the storage engine, validators and booking workflow
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid user input for a single field
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Event has no spots left
    #[error("Event {event_id} is at full capacity ({capacity} tickets)")]
    Capacity { event_id: i64, capacity: i64 },

    /// Attendee already holds a ticket for the event
    #[error("Attendee {attendee_id} already has a ticket for event {event_id}")]
    DuplicateBooking { event_id: i64, attendee_id: i64 },

    /// Storage-level constraint violation (unique, foreign key, check)
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Error::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Constraint violations reported by SQLite become `Integrity`; everything
/// else stays a plain database error.
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation()
                || db_err.is_foreign_key_violation()
                || db_err.is_check_violation()
            {
                return Error::Integrity(db_err.message().to_string());
            }
        }
        Error::Database(err)
    }
}
