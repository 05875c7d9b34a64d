//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use tessera_core::{ATag, Event, EventBuilder, Keypair, Kind, PublicKey, Tag};

/// A test fixture holding one author's keypair.
pub struct TestFixture {
    pub keypair: Keypair,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
        }
    }

    /// Create with a deterministic keypair from seed.
    ///
    /// Panics if the seed is not a valid secret scalar.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_secret_bytes(&seed).expect("seed is a valid secret key"),
        }
    }

    /// Get the keypair's public key.
    pub fn public_key(&self) -> PublicKey {
        self.keypair.public_key()
    }

    /// Coordinate of this author's addressable event.
    pub fn address(&self, kind: Kind, d_tag: &str) -> ATag {
        ATag {
            kind,
            pubkey: self.public_key().to_hex(),
            d_tag: d_tag.to_string(),
            relay_hint: None,
        }
    }

    /// Sign an arbitrary builder as this author.
    pub fn sign(&self, builder: EventBuilder) -> Event {
        builder.sign(&self.keypair).expect("fixture signing")
    }

    /// Create a text note.
    pub fn make_text_note(&self, content: &str) -> Event {
        self.sign(EventBuilder::new(Kind::TEXT_NOTE).content(content))
    }

    /// Create a reply mentioning the parent and its author.
    pub fn make_reply(&self, parent: &Event, content: &str) -> Event {
        let (id, author) = (parent.id().to_hex(), parent.pubkey().to_hex());
        self.sign(
            EventBuilder::new(Kind::TEXT_NOTE)
                .tag(["e", id.as_str(), "", "reply"])
                .tag(["p", author.as_str()])
                .content(content),
        )
    }

    /// Create a reaction to `target`.
    pub fn make_reaction(&self, target: &Event, reaction: &str) -> Event {
        let (id, author) = (target.id().to_hex(), target.pubkey().to_hex());
        self.sign(
            EventBuilder::new(Kind::REACTION)
                .tag(["e", id.as_str()])
                .tag(["p", author.as_str()])
                .content(reaction),
        )
    }

    /// Create a long-form article.
    pub fn make_article(&self, d_tag: &str, title: &str, body: &str) -> Event {
        self.sign(
            EventBuilder::new(Kind::LONG_FORM_ARTICLE)
                .tag(["d", d_tag])
                .tag(["title", title])
                .content(body),
        )
    }

    /// Create a people list naming `members`.
    pub fn make_people_list(&self, d_tag: &str, members: &[PublicKey]) -> Event {
        self.sign(
            EventBuilder::new(Kind::PEOPLE_LIST)
                .tag(["d", d_tag])
                .tags(members.iter().map(|pk| Tag::new(["p".to_string(), pk.to_hex()]))),
        )
    }

    /// Create an application definition handling `kinds`.
    pub fn make_app_definition(&self, d_tag: &str, kinds: &[Kind], metadata: &str) -> Event {
        self.sign(
            EventBuilder::new(Kind::APP_DEFINITION)
                .tag(["d", d_tag])
                .tags(kinds.iter().map(|k| Tag::new(["k".to_string(), k.to_string()])))
                .content(metadata),
        )
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[..8].copy_from_slice(&(i as u64 + 1).to_be_bytes());
            TestFixture::with_seed(seed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::{default_registry, Variant};

    #[test]
    fn test_fixture_note() {
        let fixture = TestFixture::new();
        let note = fixture.make_text_note("hello");

        assert_eq!(note.kind(), Kind::TEXT_NOTE);
        assert_eq!(note.pubkey(), &fixture.public_key());
        assert!(note.has_valid_signature());
    }

    #[test]
    fn test_fixture_thread() {
        let parties = multi_party_fixtures(2);

        let root = parties[0].make_text_note("root");
        let reply = parties[1].make_reply(&root, "reply");
        let reaction = parties[0].make_reaction(&reply, "+");

        // Verify references
        assert!(reply.tags().is_tagged_event(&root.id().to_hex()));
        assert!(reply.tags().is_tagged_user(&parties[0].public_key().to_hex()));
        assert!(reaction.tags().is_tagged_event(&reply.id().to_hex()));
    }

    #[test]
    fn test_fixture_addressable() {
        let fixture = TestFixture::with_seed([9; 32]);
        let typed = default_registry().dispatch(fixture.make_article("a", "Title", "body"));

        assert_eq!(typed.address(), Some(fixture.address(Kind::LONG_FORM_ARTICLE, "a")));
        assert!(matches!(typed.variant(), Variant::LongFormArticle(_)));
    }

    #[test]
    fn test_fixture_people_list() {
        let parties = multi_party_fixtures(3);
        let members = [parties[1].public_key(), parties[2].public_key()];
        let typed = default_registry().dispatch(parties[0].make_people_list("friends", &members));

        match typed.variant() {
            Variant::PeopleList(list) => {
                assert!(list.contains(&members[0].to_hex()));
                assert!(list.contains(&members[1].to_hex()));
                assert!(!list.contains(&parties[0].public_key().to_hex()));
            }
            other => panic!("expected people list, got {other:?}"),
        }
    }

    #[test]
    fn test_many_parties_have_valid_distinct_keys() {
        let parties = multi_party_fixtures(300);

        let mut pks: Vec<_> = parties.iter().map(|p| p.public_key()).collect();
        pks.sort();
        pks.dedup();
        assert_eq!(pks.len(), 300);
    }

    #[test]
    fn test_multi_party() {
        let parties = multi_party_fixtures(3);

        // Each party has unique keys
        let pks: Vec<_> = parties.iter().map(|p| p.public_key()).collect();
        assert_ne!(pks[0], pks[1]);
        assert_ne!(pks[1], pks[2]);
        assert_ne!(pks[0], pks[2]);
    }
}
