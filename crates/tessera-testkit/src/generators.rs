//! Proptest generators for property-based testing.

use proptest::prelude::*;

use tessera_core::{Event, EventBuilder, EventId, Keypair, Kind, PublicKey, Tag};

/// Generate a random keypair. Out-of-range scalars are filtered out.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_filter_map("secret out of range", |seed| {
        Keypair::from_secret_bytes(&seed).ok()
    })
}

/// Generate a random EventId.
pub fn event_id() -> impl Strategy<Value = EventId> {
    any::<[u8; 32]>().prop_map(EventId::from_bytes)
}

/// Generate a public key that is on the curve.
pub fn public_key() -> impl Strategy<Value = PublicKey> {
    keypair().prop_map(|kp| kp.public_key())
}

/// Generate a timestamp, including negative and far-future values.
pub fn timestamp() -> impl Strategy<Value = i64> {
    prop_oneof![0i64..=2_000_000_000i64, any::<i64>()]
}

/// Generate a Kind, biased toward the registered ones.
pub fn kind() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::METADATA),
        Just(Kind::TEXT_NOTE),
        Just(Kind::REACTION),
        Just(Kind::PEOPLE_LIST),
        Just(Kind::LONG_FORM_ARTICLE),
        Just(Kind::APP_DEFINITION),
        Just(Kind::CONTENT_DISCOVERY_REQUEST),
        Just(Kind::CONTENT_DISCOVERY_RESPONSE),
        any::<u32>().prop_map(Kind),
    ]
}

/// Generate text over the whole char range: controls, quotes, backslashes,
/// separators and astral-plane characters all show up.
pub fn text(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..=max_len).prop_map(String::from_iter)
}

/// Generate a tag row of arbitrary shape, including empty rows.
pub fn tag() -> impl Strategy<Value = Tag> {
    prop::collection::vec(text(16), 0..5).prop_map(Tag::from)
}

/// Generate a row with a well-known name and a value.
pub fn known_tag() -> impl Strategy<Value = Tag> {
    (
        prop_oneof![
            Just("e"),
            Just("p"),
            Just("t"),
            Just("g"),
            Just("a"),
            Just("d"),
            Just("r"),
        ],
        "[a-zA-Z0-9:]{0,24}",
    )
        .prop_map(|(name, value)| Tag::new([name.to_string(), value]))
}

/// Generate a tag list mixing known and arbitrary rows.
pub fn tags() -> impl Strategy<Value = Vec<Tag>> {
    prop::collection::vec(prop_oneof![known_tag(), tag()], 0..8)
}

/// Parameters for generating an event.
#[derive(Debug, Clone)]
pub struct EventParams {
    pub keypair: Keypair,
    pub created_at: i64,
    pub kind: Kind,
    pub tags: Vec<Tag>,
    pub content: String,
}

impl Arbitrary for EventParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (keypair(), timestamp(), kind(), tags(), text(256))
            .prop_map(|(keypair, created_at, kind, tags, content)| EventParams {
                keypair,
                created_at,
                kind,
                tags,
                content,
            })
            .boxed()
    }
}

/// Build and sign an event from parameters.
pub fn event_from_params(params: &EventParams) -> Event {
    EventBuilder::new(params.kind)
        .created_at(params.created_at)
        .tags(params.tags.iter().cloned())
        .content(params.content.clone())
        .sign(&params.keypair)
        .expect("signing with a valid keypair")
}
