//! # Tessera Testkit
//!
//! Testing utilities for Tessera.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known events with expected ids and signatures for cross-implementation verification
//! - **Rejection vectors**: Wire events that must fail, and how
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! Golden vectors pin the canonical encoding and the deterministic signature:
//!
//! ```rust
//! use tessera_testkit::vectors::{all_vectors, event_from_vector};
//!
//! for vector in all_vectors() {
//!     let event = event_from_vector(&vector);
//!     assert_eq!(event.id().to_hex(), vector.expected_id);
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use tessera_testkit::generators::{EventParams, event_from_params};
//!
//! proptest! {
//!     #[test]
//!     fn event_id_is_deterministic(params: EventParams) {
//!         let e1 = event_from_params(&params);
//!         let e2 = event_from_params(&params);
//!         prop_assert_eq!(e1.compute_id(), e2.compute_id());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use tessera_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let article = fixture.make_article("my-article", "Hello", "# Hello");
//! assert!(article.has_valid_signature());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{event_from_params, EventParams};
pub use vectors::{
    all_vectors, event_from_vector, rejection_vectors, verify_all_vectors, GoldenVector,
    Rejection, RejectionVector,
};
