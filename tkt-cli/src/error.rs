//! Error types for the menu

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuError {
    /// Rejected by the ticketing core; shown to the user, menu continues
    #[error(transparent)]
    Core(#[from] tkt_common::Error),

    /// Terminal read/write failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input closed while waiting for a prompt
    #[error("end of input")]
    EndOfInput,
}

pub type MenuResult<T> = Result<T, MenuError>;
