//! Kind registry: maps a kind code to the parser for its variant.
//!
//! A registry is immutable once built. The process-wide default is built on
//! first use and never changes; callers that need more kinds build their own
//! from [`KindRegistry::builder_with_defaults`] and pass it explicitly.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::atag::ATag;
use crate::error::CoreError;
use crate::event::Event;
use crate::nip19;
use crate::types::Kind;
use crate::variants::{
    AppDefinition, ContentDiscoveryRequest, ContentDiscoveryResponse, LongFormArticle, PeopleList,
    Variant,
};

/// Builds a [`Variant`] from an event of the registered kind.
pub type VariantParser = fn(&Event) -> Variant;

/// Immutable lookup table from kind to parser.
#[derive(Clone, Default)]
pub struct KindRegistry {
    parsers: HashMap<Kind, VariantParser>,
}

impl KindRegistry {
    /// An empty builder: every kind dispatches to [`Variant::Generic`].
    pub fn builder() -> KindRegistryBuilder {
        KindRegistryBuilder::default()
    }

    /// A builder pre-loaded with the built-in kinds.
    pub fn builder_with_defaults() -> KindRegistryBuilder {
        Self::builder()
            .register(Kind::LONG_FORM_ARTICLE, LongFormArticle::parse)
            .register(Kind::PEOPLE_LIST, PeopleList::parse)
            .register(Kind::APP_DEFINITION, AppDefinition::parse)
            .register(Kind::CONTENT_DISCOVERY_REQUEST, ContentDiscoveryRequest::parse)
            .register(Kind::CONTENT_DISCOVERY_RESPONSE, ContentDiscoveryResponse::parse)
    }

    /// Whether `kind` has a parser.
    pub fn contains(&self, kind: Kind) -> bool {
        self.parsers.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Parse the event into its variant. Unknown kinds give [`Variant::Generic`].
    pub fn dispatch(&self, event: Event) -> TypedEvent {
        let variant = match self.parsers.get(&event.kind()) {
            Some(parse) => parse(&event),
            None => Variant::Generic,
        };
        TypedEvent { event, variant }
    }
}

impl fmt::Debug for KindRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.parsers.keys().collect();
        kinds.sort();
        f.debug_struct("KindRegistry").field("kinds", &kinds).finish()
    }
}

/// Collects parsers before freezing them into a [`KindRegistry`].
#[derive(Default)]
pub struct KindRegistryBuilder {
    parsers: HashMap<Kind, VariantParser>,
}

impl KindRegistryBuilder {
    /// Register a parser, replacing any earlier one for the same kind.
    pub fn register(mut self, kind: Kind, parser: VariantParser) -> Self {
        self.parsers.insert(kind, parser);
        self
    }

    pub fn build(self) -> KindRegistry {
        KindRegistry {
            parsers: self.parsers,
        }
    }
}

/// The process-wide registry of built-in kinds.
pub fn default_registry() -> &'static KindRegistry {
    static REGISTRY: OnceLock<KindRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| KindRegistry::builder_with_defaults().build())
}

/// An event together with its parsed variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedEvent {
    event: Event,
    variant: Variant,
}

impl TypedEvent {
    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    pub fn into_event(self) -> Event {
        self.event
    }

    /// Whether the variant carries a `d` tag.
    pub fn is_addressable(&self) -> bool {
        self.variant.d_tag().is_some()
    }

    pub fn d_tag(&self) -> Option<&str> {
        self.variant.d_tag()
    }

    /// The coordinate of an addressable event.
    pub fn address(&self) -> Option<ATag> {
        let d_tag = self.variant.d_tag()?;
        Some(ATag::new(
            self.event.kind(),
            self.event.pubkey().to_hex(),
            d_tag,
            None,
        ))
    }

    /// `naddr` for addressable variants, `nevent` otherwise.
    pub fn to_nip19(&self) -> Result<String, CoreError> {
        match self.address() {
            Some(address) => address.to_naddr(),
            None => self.event.to_nevent(),
        }
    }

    /// [`Self::to_nip19`] with the `nostr:` scheme.
    pub fn to_nostr_uri(&self) -> Result<String, CoreError> {
        self.to_nip19().map(|id| nip19::to_uri(&id))
    }
}

impl From<TypedEvent> for Event {
    fn from(typed: TypedEvent) -> Self {
        typed.event
    }
}
