//! Error types for Tessera Core.

use thiserror::Error;

use crate::types::EventId;

/// Malformed input: bad hex, bad JSON shape, bad coordinates, bad bech32.
///
/// Always recoverable by the caller (skip the record, drop the row).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid length for {field}: expected {expected} bytes, got {got}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("malformed json: {0}")]
    Json(String),

    #[error("invalid tag: {0}")]
    InvalidTag(String),

    #[error("malformed coordinate: {0}")]
    MalformedCoordinate(String),

    #[error("bech32 error: {0}")]
    Bech32(String),

    #[error("TLV error: {0}")]
    Tlv(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

impl From<hex::FromHexError> for DecodeError {
    fn from(e: hex::FromHexError) -> Self {
        DecodeError::InvalidHex(e.to_string())
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        DecodeError::Json(e.to_string())
    }
}

impl From<bech32::DecodeError> for DecodeError {
    fn from(e: bech32::DecodeError) -> Self {
        DecodeError::Bech32(e.to_string())
    }
}

/// Trust-boundary failures raised by the strict signature check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("id mismatch: event states {stated}, canonical hash is {computed}")]
    IdentityMismatch { stated: EventId, computed: EventId },

    #[error("signature verification failed")]
    SignatureInvalid,
}

/// Core errors that can occur while building or handling events.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid secret key")]
    InvalidSecretKey,

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("encoding error: {0}")]
    Encoding(String),
}

impl From<bech32::EncodeError> for CoreError {
    fn from(e: bech32::EncodeError) -> Self {
        CoreError::Encoding(e.to_string())
    }
}
