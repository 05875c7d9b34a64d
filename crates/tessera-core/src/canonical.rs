//! Canonical JSON encoding for deterministic event ids.
//!
//! The id of an event is SHA-256 over the compact JSON array
//!
//! ```text
//! [0,"<pubkey hex>",<created_at>,<kind>,[["t","v"],...],"<content>"]
//! ```
//!
//! Rules:
//! - No whitespace anywhere
//! - Integers in plain decimal, no leading zeros, no exponent
//! - Strings escape only `"`, `\`, `\n`, `\r`, `\t`, `\b`, `\f`; other
//!   control characters below U+0020 as `\u00xx`; everything else verbatim UTF-8
//! - Tag rows and their elements in their original order
//!
//! **CRITICAL**: This encoding is FROZEN. Any change breaks interoperability
//! with every other client computing the same ids.
//!
//! The wire/storage object (`{"id",...,"sig"}`) is a different encoding
//! produced by [`wire_json`]; the two are never interchangeable.

use std::fmt::Write as _;

use crate::crypto::{sha256, PublicKey};
use crate::event::Event;
use crate::tags::Tags;
use crate::types::{EventId, Kind};

/// Leading marker of the id-hash array.
const ID_ARRAY_MARKER: &str = "0";

/// Encode the id-hash array for the given fields.
pub fn canonical_bytes(
    pubkey: &PublicKey,
    created_at: i64,
    kind: Kind,
    tags: &Tags,
    content: &str,
) -> Vec<u8> {
    canonical_string(pubkey, created_at, kind, tags, content).into_bytes()
}

/// The id-hash array as text.
pub fn canonical_string(
    pubkey: &PublicKey,
    created_at: i64,
    kind: Kind,
    tags: &Tags,
    content: &str,
) -> String {
    let mut out = String::with_capacity(128 + content.len());
    out.push('[');
    out.push_str(ID_ARRAY_MARKER);
    out.push(',');
    encode_str(&mut out, &pubkey.to_hex());
    out.push(',');
    // i64/u32 Display is plain decimal with an optional leading '-'.
    let _ = write!(out, "{},{},", created_at, kind.as_u32());
    encode_tags(&mut out, tags);
    out.push(',');
    encode_str(&mut out, content);
    out.push(']');
    out
}

/// Compute the event id: SHA-256 of the canonical bytes.
pub fn derive_id(
    pubkey: &PublicKey,
    created_at: i64,
    kind: Kind,
    tags: &Tags,
    content: &str,
) -> EventId {
    EventId(sha256(&canonical_bytes(pubkey, created_at, kind, tags, content)))
}

/// Encode the full wire object `{"id","pubkey","created_at","kind","tags","content","sig"}`.
pub fn wire_json(event: &Event) -> String {
    // Field order is fixed by the struct declaration of the wire form.
    match serde_json::to_string(&event.to_wire()) {
        Ok(json) => json,
        // Serializing strings, integers and nested string arrays cannot fail.
        Err(e) => unreachable!("wire encoding failed: {e}"),
    }
}

fn encode_tags(out: &mut String, tags: &Tags) {
    out.push('[');
    for (i, tag) in tags.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('[');
        for (j, item) in tag.as_slice().iter().enumerate() {
            if j > 0 {
                out.push(',');
            }
            encode_str(out, item);
        }
        out.push(']');
    }
    out.push(']');
}

/// Encode a JSON string with the minimal required escapes.
fn encode_str(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
