//! Strong type definitions for Tessera.
//!
//! Identifiers are newtypes so ids, keys and kinds cannot be mixed up.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;
use crate::hex_codec::{bytes_to_hex, hex_to_array};

/// A 32-byte event identifier, computed as SHA-256(canonical_bytes(event)).
///
/// This is the content-address of an event. Two events with the same
/// author, timestamp, kind, tags and content have the same EventId.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub [u8; 32]);

impl EventId {
    /// Create a new EventId from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to lowercase hex.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(self.0)
    }

    /// Parse from hex.
    pub fn from_hex(s: &str) -> Result<Self, DecodeError> {
        hex_to_array("id", s).map(Self)
    }

    /// The zero id (sentinel).
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for EventId {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for EventId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for EventId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for EventId {
    type Error = DecodeError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 32] = slice.try_into().map_err(|_| DecodeError::InvalidLength {
            field: "id",
            expected: 32,
            got: slice.len(),
        })?;
        Ok(Self(arr))
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// The semantic type of an event.
///
/// Ranges follow the protocol's conventions: regular, replaceable,
/// ephemeral and addressable (parameterized replaceable).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kind(pub u32);

impl Kind {
    pub const METADATA: Self = Self(0);
    pub const TEXT_NOTE: Self = Self(1);
    pub const CONTACT_LIST: Self = Self(3);
    pub const REACTION: Self = Self(7);
    pub const CONTENT_DISCOVERY_REQUEST: Self = Self(5300);
    pub const CONTENT_DISCOVERY_RESPONSE: Self = Self(6300);
    pub const PEOPLE_LIST: Self = Self(30000);
    pub const LONG_FORM_ARTICLE: Self = Self(30023);
    pub const APP_DEFINITION: Self = Self(31990);

    /// Get the numeric code.
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Replaceable: the latest event per (kind, pubkey) wins.
    pub fn is_replaceable(self) -> bool {
        matches!(self.0, 0 | 3 | 10_000..=19_999)
    }

    /// Ephemeral: not expected to be stored.
    pub fn is_ephemeral(self) -> bool {
        (20_000..30_000).contains(&self.0)
    }

    /// Addressable: the latest event per (kind, pubkey, d-tag) wins.
    pub fn is_addressable(self) -> bool {
        (30_000..40_000).contains(&self.0)
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind({})", self.0)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Kind {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Kind> for u32 {
    fn from(kind: Kind) -> Self {
        kind.0
    }
}
