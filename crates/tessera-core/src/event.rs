//! Event: the signed, content-addressed record exchanged across the network.
//!
//! An event is immutable. Its id commits to the author, timestamp, kind, tags
//! and content; its signature commits to the id. Changes are new events.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::canonical::{canonical_bytes, derive_id, wire_json};
use crate::crypto::{Keypair, PublicKey, Signature};
use crate::error::{CoreError, DecodeError, ValidationError};
use crate::nip19;
use crate::tags::{Tag, Tags};
use crate::types::{EventId, Kind};
use crate::validation;

/// A complete signed event.
///
/// Decoding does not verify anything; call [`Event::check_signature`] or
/// [`Event::has_valid_signature`] before trusting the content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    id: EventId,
    pubkey: PublicKey,
    created_at: i64,
    kind: Kind,
    tags: Tags,
    content: String,
    sig: Signature,
}

/// Borrowed wire form. Field order here is the order on the wire.
#[derive(Serialize)]
pub(crate) struct WireEventRef<'a> {
    id: &'a EventId,
    pubkey: &'a PublicKey,
    created_at: i64,
    kind: Kind,
    tags: &'a Tags,
    content: &'a str,
    sig: &'a Signature,
}

/// Owned wire form. Unknown fields are ignored.
#[derive(Deserialize)]
struct WireEvent {
    id: EventId,
    pubkey: PublicKey,
    created_at: i64,
    kind: Kind,
    tags: Tags,
    content: String,
    sig: Signature,
}

impl Event {
    /// Assemble an event from already-decoded fields without checking them.
    ///
    /// The result may carry a wrong id or a bad signature; that is what the
    /// validation predicates are for.
    pub fn from_parts(
        id: EventId,
        pubkey: PublicKey,
        created_at: i64,
        kind: Kind,
        tags: Tags,
        content: impl Into<String>,
        sig: Signature,
    ) -> Self {
        Self {
            id,
            pubkey,
            created_at,
            kind,
            tags,
            content: content.into(),
            sig,
        }
    }

    /// Decode from the wire JSON object. Performs no verification.
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode from wire JSON bytes. Performs no verification.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Encode as the wire JSON object.
    pub fn to_json(&self) -> String {
        wire_json(self)
    }

    pub(crate) fn to_wire(&self) -> WireEventRef<'_> {
        WireEventRef {
            id: &self.id,
            pubkey: &self.pubkey,
            created_at: self.created_at,
            kind: self.kind,
            tags: &self.tags,
            content: &self.content,
            sig: &self.sig,
        }
    }

    /// The stated id. Not necessarily the correct one.
    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn pubkey(&self) -> &PublicKey {
        &self.pubkey
    }

    /// Author-claimed Unix seconds. Untrusted.
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sig(&self) -> &Signature {
        &self.sig
    }

    /// The canonical id-hash bytes for this event's fields.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        canonical_bytes(
            &self.pubkey,
            self.created_at,
            self.kind,
            &self.tags,
            &self.content,
        )
    }

    /// Recompute the id from the fields, ignoring the stated one.
    pub fn compute_id(&self) -> EventId {
        derive_id(
            &self.pubkey,
            self.created_at,
            self.kind,
            &self.tags,
            &self.content,
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// See [`validation::has_correct_id_hash`].
    pub fn has_correct_id_hash(&self) -> bool {
        validation::has_correct_id_hash(self)
    }

    /// See [`validation::has_valid_signature`].
    pub fn has_valid_signature(&self) -> bool {
        validation::has_valid_signature(self)
    }

    /// See [`validation::check_signature`].
    pub fn check_signature(&self) -> Result<(), ValidationError> {
        validation::check_signature(self)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived values
    // ─────────────────────────────────────────────────────────────────────────

    /// Proof-of-work difficulty of the stated id, in leading zero bits.
    ///
    /// Each leading `0` nibble counts 4; the first non-zero nibble adds 3 for
    /// `1`, 2 for `2..=3`, 1 for `4..=7` and nothing for `8..=f`.
    pub fn pow_rank(&self) -> u32 {
        pow_rank(&self.id)
    }

    /// Whether the event carries a content warning or an nsfw hashtag.
    pub fn is_sensitive(&self) -> bool {
        self.tags.is_sensitive()
    }

    /// First non-blank `g` value.
    pub fn geohash(&self) -> Option<&str> {
        self.tags.geohash()
    }

    /// First `reward` value as an exact decimal; plain or scientific notation.
    ///
    /// Accepts an optional sign, digits with an optional fraction and an
    /// optional `e`/`E` exponent. Anything else, including `_` digit
    /// separators and surrounding whitespace, is absent.
    pub fn reward(&self) -> Option<BigDecimal> {
        let raw = self.tags.first_value("reward")?;
        if !is_decimal_literal(raw) {
            tracing::debug!(id = %self.id, reward = raw, "unparsable reward tag");
            return None;
        }
        match BigDecimal::from_str(raw) {
            Ok(amount) => Some(amount),
            Err(e) => {
                tracing::debug!(id = %self.id, reward = raw, error = %e, "unparsable reward tag");
                None
            }
        }
    }

    /// The `nevent` identifier: id, author and kind.
    ///
    /// Addressable variants are shared as `naddr` instead; see
    /// `TypedEvent::to_nip19`.
    pub fn to_nevent(&self) -> Result<String, CoreError> {
        nip19::encode_nevent(&self.id, Some(&self.pubkey), Some(self.kind), &[])
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireEvent::deserialize(deserializer)?;
        Ok(Self {
            id: wire.id,
            pubkey: wire.pubkey,
            created_at: wire.created_at,
            kind: wire.kind,
            tags: wire.tags,
            content: wire.content,
            sig: wire.sig,
        })
    }
}

/// `[+-]? (digits ['.' digits?] | '.' digits) ([eE] [+-]? digits)?`
fn is_decimal_literal(text: &str) -> bool {
    fn digits(s: &str) -> bool {
        s.bytes().all(|b| b.is_ascii_digit())
    }
    fn unsigned(s: &str) -> &str {
        s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s)
    }

    let (mantissa, exponent) = match text.find(|c: char| c == 'e' || c == 'E') {
        Some(at) => (&text[..at], Some(&text[at + 1..])),
        None => (text, None),
    };
    if let Some(exponent) = exponent {
        let exponent = unsigned(exponent);
        if exponent.is_empty() || !digits(exponent) {
            return false;
        }
    }

    let (int, frac) = unsigned(mantissa)
        .split_once('.')
        .unwrap_or((unsigned(mantissa), ""));
    !(int.is_empty() && frac.is_empty()) && digits(int) && digits(frac)
}

/// Leading-zero-bit count of an id, read nibble by nibble.
pub fn pow_rank(id: &EventId) -> u32 {
    let mut rank = 0;
    for byte in id.as_bytes() {
        for nibble in [byte >> 4, byte & 0x0f] {
            match nibble {
                0 => rank += 4,
                1 => return rank + 3,
                2..=3 => return rank + 2,
                4..=7 => return rank + 1,
                _ => return rank,
            }
        }
    }
    rank
}

/// Builder for creating signed events.
///
/// ```
/// use tessera_core::{EventBuilder, Keypair, Kind};
///
/// let keypair = Keypair::generate();
/// let event = EventBuilder::new(Kind::TEXT_NOTE)
///     .tag(["t", "rust"])
///     .content("hello")
///     .sign(&keypair)
///     .unwrap();
/// assert!(event.has_valid_signature());
/// ```
#[derive(Debug, Clone)]
pub struct EventBuilder {
    kind: Kind,
    tags: Vec<Tag>,
    content: String,
    created_at: Option<i64>,
}

impl EventBuilder {
    /// Start a new event of the given kind.
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            tags: Vec::new(),
            content: String::new(),
            created_at: None,
        }
    }

    /// Append one tag row.
    pub fn tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Append several tag rows, in order.
    pub fn tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags.extend(tags);
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the timestamp. Defaults to the current time at signing.
    pub fn created_at(mut self, created_at: i64) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Compute the id and sign it.
    pub fn sign(self, keypair: &Keypair) -> Result<Event, CoreError> {
        let pubkey = keypair.public_key();
        let created_at = self.created_at.unwrap_or_else(unix_now);
        let tags = Tags::new(self.tags);
        let id = derive_id(&pubkey, created_at, self.kind, &tags, &self.content);
        let sig = keypair.sign(&id)?;

        Ok(Event {
            id,
            pubkey,
            created_at,
            kind: self.kind,
            tags,
            content: self.content,
            sig,
        })
    }
}

/// Current Unix time in seconds.
pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
