//! Error types for the Tessera facade.

use tessera_core::{CoreError, DecodeError, ValidationError};
use thiserror::Error;

/// Errors that can occur while decoding, verifying or encoding events.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The event failed its id or signature check.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Building, signing or encoding failed.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// A batch line failed; carries the 1-based line number.
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Whether the input itself was malformed, as opposed to forged.
    pub fn is_decode(&self) -> bool {
        match self {
            Error::Decode(_) | Error::Core(CoreError::Decode(_)) => true,
            Error::Line { source, .. } => source.is_decode(),
            _ => false,
        }
    }

    /// Whether the event decoded but failed verification.
    pub fn is_validation(&self) -> bool {
        match self {
            Error::Validation(_) | Error::Core(CoreError::Validation(_)) => true,
            Error::Line { source, .. } => source.is_validation(),
            _ => false,
        }
    }
}

/// Result type for Tessera operations.
pub type Result<T> = std::result::Result<T, Error>;
