//! # Tessera
//!
//! Signed, content-addressed events for a decentralized relay protocol.
//!
//! ## Overview
//!
//! Tessera provides a portable, I/O-free library for:
//!
//! - **Events**: Immutable, signed records; the unit of exchange between relays and clients
//! - **Identity**: Event ids are SHA-256 over a canonical JSON array, signed with BIP-340 Schnorr
//! - **Tags**: Total queries over mentions, references, hashtags, geohashes and coordinates
//! - **Kinds**: A registry mapping kind codes to typed views, with a generic fallback
//!
//! ## Key Concepts
//!
//! - **Event**: Immutable. Never edited. Changes are new events.
//! - **Addressable event**: Identified by `kind:pubkey:d-tag` rather than by id; the latest wins.
//! - **Verification**: Decoding never trusts; the [`Codec`] checks id and signature before typing.
//!
//! ## Usage
//!
//! ```rust
//! use tessera::{Codec, CodecConfig, EventBuilder, Keypair, Kind};
//!
//! let keypair = Keypair::generate();
//! let event = EventBuilder::new(Kind::LONG_FORM_ARTICLE)
//!     .tag(["d", "hello-world"])
//!     .tag(["title", "Hello"])
//!     .content("# Hello")
//!     .sign(&keypair)
//!     .unwrap();
//!
//! let codec = Codec::new(CodecConfig::default());
//! let wire = codec.encode(&event);
//! let typed = codec.decode_str(&wire).unwrap();
//!
//! assert!(typed.is_addressable());
//! assert!(typed.to_nostr_uri().unwrap().starts_with("nostr:naddr1"));
//! ```
//!
//! ## Re-exports
//!
//! - `tessera::core` - Core primitives (Event, EventId, Tags, KindRegistry, etc.)

pub mod codec;
pub mod error;

// Re-export the core crate
pub use tessera_core as core;

// Re-export main types for convenience
pub use codec::{Codec, CodecConfig};
pub use error::{Error, Result};

// Re-export commonly used core types
pub use tessera_core::{
    default_registry, ATag, Event, EventBuilder, EventId, Keypair, Kind, KindRegistry, PublicKey,
    Signature, Tag, Tags, TypedEvent, Variant,
};
