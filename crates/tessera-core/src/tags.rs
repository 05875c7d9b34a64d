//! Tag rows and the queries feed and index code runs over them.
//!
//! A tag is an ordered row of strings whose first element is its
//! discriminator (`"p"`, `"e"`, `"a"`, `"t"`, ...). Rows are kept verbatim:
//! their order and arity take part in the event id.
//!
//! Every query here is total. Rows shorter than a query needs are skipped,
//! never indexed out of range.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

use crate::atag::ATag;
use crate::types::Kind;

/// A single tag row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(Vec<String>);

impl Tag {
    /// Build a tag from its elements.
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// The discriminator (position 0).
    pub fn name(&self) -> Option<&str> {
        self.get(0)
    }

    /// The primary value (position 1).
    pub fn value(&self) -> Option<&str> {
        self.get(1)
    }

    /// The element at `index`, if the row is long enough.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// All elements.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the discriminator is `name` and a value is present.
    fn is(&self, name: &str) -> bool {
        self.0.len() > 1 && self.0[0] == name
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Tag {
    fn from(parts: [S; N]) -> Self {
        Tag::new(parts)
    }
}

impl From<Vec<String>> for Tag {
    fn from(parts: Vec<String>) -> Self {
        Self(parts)
    }
}

/// A custom emoji declared by an `["emoji", shortcode, url]` row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmojiUrl {
    pub code: String,
    pub url: String,
}

/// The ordered tag rows of an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Tags(Vec<Tag>);

impl Tags {
    pub fn new(rows: Vec<Tag>) -> Self {
        Self(rows)
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Values (position 1) of every row with discriminator `name`.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |t| t.is(name))
            .map(|t| t.0[1].as_str())
    }

    /// Value of the first row with discriminator `name`.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|t| t.is(name))
            .map(|t| t.0[1].as_str())
    }

    fn any_value(&self, name: &str, pred: impl Fn(&str) -> bool) -> bool {
        self.values(name).any(pred)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Collections
    // ─────────────────────────────────────────────────────────────────────────

    pub fn tagged_users(&self) -> Vec<&str> {
        self.values("p").collect()
    }

    pub fn tagged_events(&self) -> Vec<&str> {
        self.values("e").collect()
    }

    pub fn tagged_urls(&self) -> Vec<&str> {
        self.values("r").collect()
    }

    pub fn hashtags(&self) -> Vec<&str> {
        self.values("t").collect()
    }

    pub fn geohashes(&self) -> Vec<&str> {
        self.values("g").collect()
    }

    /// Custom emojis; needs both the shortcode and the url.
    pub fn tagged_emojis(&self) -> Vec<EmojiUrl> {
        self.0
            .iter()
            .filter(|t| t.0.len() > 2 && t.0[0] == "emoji")
            .map(|t| EmojiUrl {
                code: t.0[1].clone(),
                url: t.0[2].clone(),
            })
            .collect()
    }

    /// Parsed `a` coordinates. Rows that do not parse are dropped.
    pub fn tagged_addresses(&self) -> Vec<ATag> {
        self.0
            .iter()
            .filter(|t| t.is("a"))
            .filter_map(|t| ATag::parse(&t.0[1], t.get(2)))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Predicates
    // ─────────────────────────────────────────────────────────────────────────

    pub fn has_any_tagged_user(&self) -> bool {
        self.values("p").next().is_some()
    }

    pub fn is_tagged_user(&self, pubkey_hex: &str) -> bool {
        self.any_value("p", |v| v == pubkey_hex)
    }

    pub fn is_tagged_event(&self, id_hex: &str) -> bool {
        self.any_value("e", |v| v == id_hex)
    }

    pub fn is_tagged_addressable_note(&self, coordinate: &str) -> bool {
        self.any_value("a", |v| v == coordinate)
    }

    pub fn is_tagged_addressable_notes(&self, coordinates: &HashSet<String>) -> bool {
        self.any_value("a", |v| coordinates.contains(v))
    }

    /// Case-insensitive hashtag match.
    pub fn is_tagged_hash(&self, hashtag: &str) -> bool {
        self.any_value("t", |v| eq_fold(v, hashtag))
    }

    /// Membership of the lowercased hashtag in `hashtags`.
    ///
    /// The set is expected to hold lowercase entries already.
    pub fn is_tagged_hashes(&self, hashtags: &HashSet<String>) -> bool {
        self.any_value("t", |v| hashtags.contains(&v.to_lowercase()))
    }

    /// Case-insensitive prefix match, so a coarse geohash cell matches every
    /// finer cell inside it.
    pub fn is_tagged_geohash(&self, geohash: &str) -> bool {
        self.any_value("g", |v| starts_with_fold(v, geohash))
    }

    pub fn is_tagged_geohashes(&self, geohashes: &HashSet<String>) -> bool {
        self.any_value("g", |v| geohashes.contains(&v.to_lowercase()))
    }

    /// The first hashtag whose lowercase form is in `hashtags`.
    pub fn first_tagged_hash_in(&self, hashtags: &HashSet<String>) -> Option<&str> {
        self.values("t").find(|v| hashtags.contains(&v.to_lowercase()))
    }

    pub fn first_tagged_addressable_note_in(&self, coordinates: &HashSet<String>) -> Option<&str> {
        self.values("a").find(|v| coordinates.contains(*v))
    }

    /// Whether any `a` row points at an event of `kind`.
    ///
    /// This is a textual match of `"{kind}:"` against the coordinate, not a
    /// parsed comparison. The prefix includes the colon, so kind 1 does not
    /// match a `10:...` coordinate.
    pub fn is_tagged_addressable_kind(&self, kind: Kind) -> bool {
        let prefix = format!("{}:", kind);
        self.any_value("a", |v| v.starts_with(&prefix))
    }

    /// The first `a` coordinate pointing at an event of `kind`, parsed.
    pub fn tag_of_addressable_kind(&self, kind: Kind) -> Option<ATag> {
        let prefix = format!("{}:", kind);
        let coordinate = self.values("a").find(|v| v.starts_with(&prefix))?;
        ATag::parse(coordinate, None)
    }

    /// Whether any row's value contains `text`, ignoring case.
    pub fn matches_tag_value(&self, text: &str) -> bool {
        let needle = text.to_lowercase();
        self.0
            .iter()
            .filter(|t| t.0.len() > 1)
            .any(|t| t.0[1].to_lowercase().contains(&needle))
    }

    /// Content warning present, or tagged `nsfw` / `nude`.
    pub fn is_sensitive(&self) -> bool {
        self.0.iter().any(|t| match t.name() {
            Some(name) if name.eq_ignore_ascii_case("content-warning") => true,
            Some("t") => t
                .value()
                .is_some_and(|v| v.eq_ignore_ascii_case("nsfw") || v.eq_ignore_ascii_case("nude")),
            _ => false,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Single values
    // ─────────────────────────────────────────────────────────────────────────

    /// The first geohash, unless blank.
    pub fn geohash(&self) -> Option<&str> {
        self.first_value("g").filter(|g| !g.trim().is_empty())
    }

    pub fn subject(&self) -> Option<&str> {
        self.first_value("subject")
    }

    /// Fundraising goal in millisats; absent when not an integer.
    pub fn zapraiser_amount(&self) -> Option<i64> {
        self.first_value("zapraiser")?.parse().ok()
    }

    pub fn zap_address(&self) -> Option<&str> {
        self.first_value("zap")
    }

    /// The `d` identifier of an addressable event.
    pub fn d_tag(&self) -> Option<&str> {
        self.first_value("d")
    }
}

impl From<Vec<Tag>> for Tags {
    fn from(rows: Vec<Tag>) -> Self {
        Self(rows)
    }
}

impl IntoIterator for Tags {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tags {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for Tags {
    /// Null elements inside a row are dropped; any other non-string fails.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows: Vec<Vec<Option<String>>> = Vec::deserialize(deserializer)?;
        Ok(Self(
            rows.into_iter()
                .map(|row| Tag(row.into_iter().flatten().collect()))
                .collect(),
        ))
    }
}

fn eq_fold(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn starts_with_fold(haystack: &str, prefix: &str) -> bool {
    haystack.to_lowercase().starts_with(&prefix.to_lowercase())
}
