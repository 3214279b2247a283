//! Error types for sheetclip core.

use thiserror::Error;

/// Errors surfaced by the core model and the remote range boundary.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid range reference '{0}'")]
    InvalidRange(String),

    /// A remote get/set failed. Not recovered locally: the current command
    /// invocation aborts with this message.
    #[error("transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
