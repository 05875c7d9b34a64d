//! Typed views over events of well-known kinds.
//!
//! Every variant is a pure function of an [`Event`]: parsing never fails,
//! it only leaves fields empty. Addressable variants carry their `d` tag.

use serde::{Deserialize, Serialize};

use crate::crypto::PublicKey;
use crate::event::{Event, EventBuilder};
use crate::tags::{Tag, Tags};
use crate::types::Kind;

/// The structured payload of a recognized kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variant {
    LongFormArticle(LongFormArticle),
    PeopleList(PeopleList),
    AppDefinition(AppDefinition),
    ContentDiscoveryRequest(ContentDiscoveryRequest),
    ContentDiscoveryResponse(ContentDiscoveryResponse),
    /// Any kind without a registered parser.
    Generic,
}

impl Variant {
    /// The `d` identifier when this variant is addressable.
    pub fn d_tag(&self) -> Option<&str> {
        match self {
            Variant::LongFormArticle(v) => Some(&v.d_tag),
            Variant::PeopleList(v) => Some(&v.d_tag),
            Variant::AppDefinition(v) => Some(&v.d_tag),
            Variant::ContentDiscoveryRequest(_)
            | Variant::ContentDiscoveryResponse(_)
            | Variant::Generic => None,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Variant::LongFormArticle(_) => "long_form_article",
            Variant::PeopleList(_) => "people_list",
            Variant::AppDefinition(_) => "app_definition",
            Variant::ContentDiscoveryRequest(_) => "content_discovery_request",
            Variant::ContentDiscoveryResponse(_) => "content_discovery_response",
            Variant::Generic => "generic",
        }
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, Variant::Generic)
    }
}

/// Missing `d` is the empty identifier.
fn d_tag_of(tags: &Tags) -> String {
    tags.d_tag().unwrap_or_default().to_string()
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

// ─────────────────────────────────────────────────────────────────────────────
// Kind 30023
// ─────────────────────────────────────────────────────────────────────────────

/// Long-form article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongFormArticle {
    pub d_tag: String,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub published_at: Option<i64>,
}

impl LongFormArticle {
    pub fn parse(event: &Event) -> Variant {
        let tags = event.tags();
        Variant::LongFormArticle(Self {
            d_tag: d_tag_of(tags),
            title: owned(tags.first_value("title")),
            summary: owned(tags.first_value("summary")),
            image: owned(tags.first_value("image")),
            published_at: tags
                .first_value("published_at")
                .and_then(|v| v.trim().parse().ok()),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Kind 30000
// ─────────────────────────────────────────────────────────────────────────────

/// Categorized list of people.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeopleList {
    pub d_tag: String,
    /// `name`, falling back to `title`.
    pub name: Option<String>,
    /// Member pubkeys, hex, in tag order.
    pub members: Vec<String>,
}

impl PeopleList {
    pub fn parse(event: &Event) -> Variant {
        let tags = event.tags();
        Variant::PeopleList(Self {
            d_tag: d_tag_of(tags),
            name: owned(tags.first_value("name").or_else(|| tags.first_value("title"))),
            members: tags.tagged_users().into_iter().map(str::to_string).collect(),
        })
    }

    pub fn contains(&self, pubkey_hex: &str) -> bool {
        self.members.iter().any(|m| m == pubkey_hex)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Kind 31990
// ─────────────────────────────────────────────────────────────────────────────

/// Profile-style metadata an application publishes in its content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Application handler definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDefinition {
    pub d_tag: String,
    /// Kinds this application handles (`k` tags); unparsable values skipped.
    pub supported_kinds: Vec<Kind>,
    /// `None` when the content is empty or not a metadata object.
    pub metadata: Option<AppMetadata>,
}

impl AppDefinition {
    pub fn parse(event: &Event) -> Variant {
        let tags = event.tags();
        let metadata = if event.content().trim().is_empty() {
            None
        } else {
            match serde_json::from_str::<AppMetadata>(event.content()) {
                Ok(metadata) => Some(metadata),
                Err(e) => {
                    tracing::debug!(id = %event.id(), error = %e, "unparsable app metadata");
                    None
                }
            }
        };

        Variant::AppDefinition(Self {
            d_tag: d_tag_of(tags),
            supported_kinds: tags
                .values("k")
                .filter_map(|k| k.parse::<u32>().ok())
                .map(Kind)
                .collect(),
            metadata,
        })
    }

    pub fn supports(&self, kind: Kind) -> bool {
        self.supported_kinds.contains(&kind)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Kind 5300 / 6300
// ─────────────────────────────────────────────────────────────────────────────

/// One `["i", value, type?, relay?, marker?]` job input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInput {
    pub value: String,
    pub input_type: Option<String>,
    pub relay: Option<String>,
    pub marker: Option<String>,
}

/// Request to a content-discovery service for a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDiscoveryRequest {
    /// The service addressed by the first `p` tag, hex.
    pub service_provider: Option<String>,
    pub inputs: Vec<JobInput>,
    /// `["param", name, value]` rows, in order.
    pub params: Vec<(String, String)>,
    /// Requested output MIME type.
    pub output: Option<String>,
    /// Relays the response should be published to.
    pub relays: Vec<String>,
}

impl ContentDiscoveryRequest {
    pub fn parse(event: &Event) -> Variant {
        let tags = event.tags();
        let inputs = tags
            .iter()
            .filter(|t| t.name() == Some("i"))
            .filter_map(|t| {
                Some(JobInput {
                    value: t.value()?.to_string(),
                    input_type: owned(t.get(2)),
                    relay: owned(t.get(3)),
                    marker: owned(t.get(4)),
                })
            })
            .collect();
        let params = tags
            .iter()
            .filter(|t| t.name() == Some("param"))
            .filter_map(|t| Some((t.value()?.to_string(), t.get(2)?.to_string())))
            .collect();
        let relays = tags
            .iter()
            .find(|t| t.name() == Some("relays"))
            .map(|t| t.as_slice()[1..].to_vec())
            .unwrap_or_default();

        Variant::ContentDiscoveryRequest(Self {
            service_provider: owned(tags.first_value("p")),
            inputs,
            params,
            output: owned(tags.first_value("output")),
            relays,
        })
    }

    /// Start a request addressed to `provider`, asking for responses on `relays`.
    pub fn builder(provider: &PublicKey, relays: &[String]) -> EventBuilder {
        let mut builder = EventBuilder::new(Kind::CONTENT_DISCOVERY_REQUEST)
            .tag(["p".to_string(), provider.to_hex()])
            .tag(["alt", "content discovery request"]);
        if !relays.is_empty() {
            builder = builder.tag(Tag::new(
                std::iter::once("relays".to_string()).chain(relays.iter().cloned()),
            ));
        }
        builder
    }
}

/// A content-discovery service's answer: a list of suggested events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDiscoveryResponse {
    /// The request being answered (`e` tag).
    pub request_id: Option<String>,
    /// Who asked (`p` tag).
    pub requester: Option<String>,
    /// Event ids suggested in the content, in order.
    pub results: Vec<String>,
}

impl ContentDiscoveryResponse {
    pub fn parse(event: &Event) -> Variant {
        let tags = event.tags();
        Variant::ContentDiscoveryResponse(Self {
            request_id: owned(tags.first_value("e")),
            requester: owned(tags.first_value("p")),
            results: parse_result_rows(event),
        })
    }
}

/// Content is a JSON array of tag rows; `e` values are the results.
fn parse_result_rows(event: &Event) -> Vec<String> {
    if event.content().trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Tags>(event.content()) {
        Ok(rows) => rows.tagged_events().into_iter().map(str::to_string).collect(),
        Err(e) => {
            tracing::debug!(id = %event.id(), error = %e, "unparsable discovery results");
            Vec::new()
        }
    }
}
