//! Addressable coordinates: the `"kind:pubkey:d-tag"` text carried in `a` tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::tags::Tag;
use crate::types::Kind;

/// A `(kind, pubkey, d-tag)` coordinate naming a mutable event.
///
/// The relay hint is metadata: it is not part of the text form and is
/// ignored by equality and hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ATag {
    pub kind: Kind,
    /// Author public key, hex. Not validated here.
    pub pubkey: String,
    pub d_tag: String,
    pub relay_hint: Option<String>,
}

impl ATag {
    pub fn new(
        kind: Kind,
        pubkey: impl Into<String>,
        d_tag: impl Into<String>,
        relay_hint: Option<String>,
    ) -> Self {
        Self {
            kind,
            pubkey: pubkey.into(),
            d_tag: d_tag.into(),
            relay_hint,
        }
    }

    /// Parse a coordinate.
    ///
    /// Splits into at most three fields, so any further `:` stays inside the
    /// d-tag. A missing d-tag is empty. Returns `None` when there is no `:` at
    /// all or the kind is not an integer.
    pub fn parse(text: &str, relay_hint: Option<&str>) -> Option<Self> {
        let mut parts = text.splitn(3, ':');
        let kind = parts.next()?;
        let pubkey = parts.next()?;
        let d_tag = parts.next().unwrap_or("");

        let kind = match kind.parse::<u32>() {
            Ok(k) => Kind(k),
            Err(e) => {
                tracing::debug!(coordinate = text, error = %e, "dropping coordinate with bad kind");
                return None;
            }
        };

        Some(Self {
            kind,
            pubkey: pubkey.to_string(),
            d_tag: d_tag.to_string(),
            relay_hint: relay_hint.map(str::to_string),
        })
    }

    /// The coordinate text, without the relay hint.
    pub fn coordinate(&self) -> String {
        self.to_string()
    }

    /// The `["a", coordinate, relay?]` tag row for this coordinate.
    pub fn to_tag(&self) -> Tag {
        match &self.relay_hint {
            Some(relay) => Tag::new(["a".to_string(), self.to_string(), relay.clone()]),
            None => Tag::new(["a".to_string(), self.to_string()]),
        }
    }
}

impl fmt::Display for ATag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.kind, self.pubkey, self.d_tag)
    }
}

impl PartialEq for ATag {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.pubkey == other.pubkey && self.d_tag == other.d_tag
    }
}

impl Eq for ATag {}

impl Hash for ATag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.pubkey.hash(state);
        self.d_tag.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PK: &str = "460c25e682fda7832b52d1f22d3d22b3176d972f60dcdc3212ed8c92ef85065c";

    #[test]
    fn test_parse_full() {
        let a = ATag::parse(&format!("30023:{}:my-article", PK), Some("wss://r")).unwrap();
        assert_eq!(a.kind, Kind(30023));
        assert_eq!(a.pubkey, PK);
        assert_eq!(a.d_tag, "my-article");
        assert_eq!(a.relay_hint.as_deref(), Some("wss://r"));
    }

    #[test]
    fn test_parse_without_colon_is_none() {
        assert!(ATag::parse("badformat", None).is_none());
    }

    #[test]
    fn test_parse_two_fields_gives_empty_d_tag() {
        let a = ATag::parse(&format!("10000:{}", PK), None).unwrap();
        assert_eq!(a.d_tag, "");
        assert_eq!(a.to_string(), format!("10000:{}:", PK));
    }

    #[test]
    fn test_d_tag_keeps_extra_colons() {
        let a = ATag::parse(&format!("30023:{}:a:b:c", PK), None).unwrap();
        assert_eq!(a.d_tag, "a:b:c");
    }

    #[test]
    fn test_non_integer_kind_is_none() {
        assert!(ATag::parse(&format!("abc:{}:x", PK), None).is_none());
        assert!(ATag::parse(&format!(":{}:x", PK), None).is_none());
    }

    #[test]
    fn test_relay_hint_not_part_of_identity() {
        let a = ATag::new(Kind(30000), PK, "friends", Some("wss://a".into()));
        let b = ATag::new(Kind(30000), PK, "friends", None);
        assert_eq!(a, b);
        assert_eq!(a.coordinate(), b.coordinate());
    }

    #[test]
    fn test_to_tag() {
        let a = ATag::new(Kind(30000), PK, "friends", Some("wss://a".into()));
        let tag = a.to_tag();
        assert_eq!(tag.name(), Some("a"));
        assert_eq!(tag.value(), Some(a.to_string().as_str()));
        assert_eq!(tag.get(2), Some("wss://a"));
    }

    proptest! {
        #[test]
        fn test_parse_display_inverse(
            kind in any::<u32>(),
            pubkey in "[0-9a-f]{64}",
            d_tag in ".*",
            hint in proptest::option::of("wss://[a-z]{1,10}"),
        ) {
            let a = ATag::new(Kind(kind), pubkey, d_tag, hint.clone());
            let text = a.to_string();
            let parsed = ATag::parse(&text, hint.as_deref()).unwrap();
            prop_assert_eq!(parsed.to_string(), text);
            prop_assert_eq!(parsed, a);
        }
    }
}
