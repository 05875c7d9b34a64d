//! # Tessera Core
//!
//! Pure primitives for signed, content-addressed protocol events: canonical
//! encoding, identity hashes, Schnorr signatures, tag queries and typed kinds.
//!
//! This crate contains no I/O, no storage, no networking. It is pure computation
//! over cryptographic data structures.
//!
//! ## Key Types
//!
//! - [`Event`] - The signed record exchanged across the network
//! - [`EventId`] - Content-addressed identifier (SHA-256)
//! - [`Kind`] - Discriminator for tag and content interpretation
//! - [`KindRegistry`] / [`TypedEvent`] - Kind-specific views of an event
//! - [`ATag`] - Coordinate of an addressable event
//!
//! ## Canonicalization
//!
//! Ids are computed over a compact JSON array. See [`canonical`] module.

pub mod atag;
pub mod canonical;
pub mod crypto;
pub mod error;
pub mod event;
pub mod hex_codec;
pub mod nip19;
pub mod registry;
pub mod rumor;
pub mod tags;
pub mod types;
pub mod validation;
pub mod variants;

pub use atag::ATag;
pub use canonical::{canonical_bytes, derive_id, wire_json};
pub use crypto::{verify, Keypair, PublicKey, Signature};
pub use error::{CoreError, DecodeError, ValidationError};
pub use event::{pow_rank, Event, EventBuilder};
pub use nip19::{EventPointer, Nip19};
pub use registry::{default_registry, KindRegistry, KindRegistryBuilder, TypedEvent};
pub use rumor::Rumor;
pub use tags::{EmojiUrl, Tag, Tags};
pub use types::{EventId, Kind};
pub use validation::{check_signature, has_correct_id_hash, has_valid_signature};
pub use variants::Variant;

/// Exact decimal type returned by [`Event::reward`].
pub use bigdecimal::BigDecimal;
