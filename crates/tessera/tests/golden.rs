//! Golden test vectors for cross-implementation verification.
//!
//! Every implementation computing event ids must produce identical:
//! - canonical id-hash array
//! - event id (SHA-256 of the array)
//! - x-only public key
//! - signature (BIP-340, zero auxiliary randomness)

use proptest::prelude::*;
use tessera::core::canonical::canonical_string;
use tessera::core::{nip19, pow_rank, verify, Nip19, ValidationError};
use tessera::{ATag, Codec, CodecConfig, Error, Event, EventId, Kind, Tag, Tags, Variant};
use tessera_testkit::vectors::{SIGNED_WRONG_ID_COMPUTED, SIGNED_WRONG_ID_EVENT};
use tessera_testkit::{
    all_vectors, event_from_params, event_from_vector, rejection_vectors, verify_all_vectors,
    EventParams, Rejection, TestFixture,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn tags(rows: &[&[&str]]) -> Tags {
    Tags::new(rows.iter().map(|r| Tag::new(r.iter().copied())).collect())
}

fn id(hex: &str) -> EventId {
    EventId::from_hex(hex).unwrap()
}

#[test]
fn test_vectors_match_expected() {
    let vectors = all_vectors();
    assert_eq!(vectors.len(), 7);

    for v in &vectors {
        let event = event_from_vector(v);

        assert_eq!(event.pubkey().to_hex(), v.expected_pubkey, "pubkey mismatch for {}", v.name);
        assert_eq!(event.id().to_hex(), v.expected_id, "id mismatch for {}", v.name);
        assert_eq!(event.sig().to_hex(), v.expected_sig, "sig mismatch for {}", v.name);
        assert_eq!(
            tessera::core::crypto::sha256(&event.canonical_bytes()),
            *event.id().as_bytes(),
            "id is not the hash of the canonical array for {}",
            v.name
        );
        assert!(event.check_signature().is_ok(), "verify failed for {}", v.name);
    }

    assert!(verify_all_vectors().iter().all(|(_, ok, _)| *ok));
}

#[test]
fn test_vectors_deterministic() {
    // Generate twice, must be identical
    for v in all_vectors() {
        let a = event_from_vector(&v);
        let b = event_from_vector(&v);
        assert_eq!(a.canonical_bytes(), b.canonical_bytes(), "canonical mismatch for {}", v.name);
        assert_eq!(a.sig(), b.sig(), "signature mismatch for {}", v.name);
    }
}

#[test]
fn test_vectors_survive_the_wire() {
    init_tracing();
    let codec = Codec::default();

    for v in all_vectors() {
        let event = event_from_vector(&v);
        let wire = codec.encode(&event);
        let typed = codec.decode_str(&wire).unwrap();
        assert_eq!(typed.event(), &event, "round trip changed {}", v.name);
        assert_eq!(typed.event().id().to_hex(), v.expected_id);
    }
}

#[test]
fn test_canonical_array_layout() {
    let v = &all_vectors()[1];
    let event = event_from_vector(v);
    let expected = format!(
        concat!(
            r#"[0,"{}",1673002822,1,"#,
            r#"[["e","688787d8ff144c502c7f5cffaafe2cc588d86079f9de88304c26b0cb99ce91c6","wss://relay.damus.io","root"],"#,
            r#"["p","02c7e1b1e9c175ab2d100baf1d5a66e73ecc044e9f8093d0c965741f26aa3abf",""]],"#,
            r#""Lorem ipsum dolor sit amet"]"#
        ),
        v.expected_pubkey
    );
    assert_eq!(String::from_utf8(event.canonical_bytes()).unwrap(), expected);
}

#[test]
fn test_canonical_string_escapes() {
    let v = all_vectors().into_iter().find(|v| v.name == "string_escapes").unwrap();
    let event = event_from_vector(&v);
    let text = canonical_string(
        event.pubkey(),
        event.created_at(),
        event.kind(),
        event.tags(),
        event.content(),
    );

    assert!(text.contains(r#"[["t","esc\"aped"]]"#));
    assert!(text.contains(r#"line1\nline2\t\"quoted\" \\ back \u0001 ctrl"#));
    assert!(text.contains(r#"\r\b\f"]"#));
    // DEL, line separator, astral and Latin-1 characters stay raw.
    assert!(text.contains("\u{7f} del \u{2028} sep \u{1F30D} h\u{e9}llo /slash"));
}

#[test]
fn test_negative_timestamp_and_max_kind() {
    let vectors = all_vectors();
    let negative = event_from_vector(&vectors[4]);
    assert!(String::from_utf8(negative.canonical_bytes()).unwrap().contains(",-1,0,[],"));

    let max = event_from_vector(&vectors[5]);
    assert_eq!(max.kind(), Kind(u32::MAX));
    assert!(max.to_json().contains(r#""kind":4294967295"#));
}

#[test]
fn print_golden_vectors_json() {
    let vectors: Vec<_> = all_vectors()
        .iter()
        .map(|v| {
            let event = event_from_vector(v);
            serde_json::json!({
                "name": v.name,
                "secret_key": hex::encode([v.secret_byte; 32]),
                "canonical": String::from_utf8_lossy(&event.canonical_bytes()),
                "event": serde_json::from_str::<serde_json::Value>(&event.to_json()).unwrap(),
            })
        })
        .collect();

    let file = serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Golden event vectors. Every implementation must produce identical ids and signatures.",
        "vectors": vectors,
    });

    println!("{}", serde_json::to_string_pretty(&file).unwrap());
}

// =============================================================================
// REJECTION TEST VECTORS
// These test that invalid inputs are properly rejected.
// =============================================================================

#[test]
fn test_rejection_vectors() {
    init_tracing();
    let codec = Codec::default();

    for v in rejection_vectors() {
        let err = codec.decode_str(&v.json).unwrap_err();
        match v.expected {
            Rejection::IdentityMismatch => assert!(
                matches!(err, Error::Validation(ValidationError::IdentityMismatch { .. })),
                "{}: expected id mismatch, got {err}",
                v.name
            ),
            Rejection::SignatureInvalid => assert!(
                matches!(err, Error::Validation(ValidationError::SignatureInvalid)),
                "{}: expected invalid signature, got {err}",
                v.name
            ),
            Rejection::Malformed => assert!(err.is_decode(), "{}: expected decode error, got {err}", v.name),
        }
    }
}

#[test]
fn test_rejection_vectors_pass_without_verification() {
    let codec = Codec::new(CodecConfig {
        verify_on_decode: false,
        ..Default::default()
    });

    for v in rejection_vectors() {
        let result = codec.decode_str(&v.json);
        match v.expected {
            Rejection::Malformed => assert!(result.is_err(), "{} decoded", v.name),
            _ => {
                let typed = result.unwrap();
                assert!(!typed.event().has_valid_signature(), "{} verified", v.name);
            }
        }
    }
}

#[test]
fn test_reject_signed_wrong_id() {
    let event = Event::from_json(SIGNED_WRONG_ID_EVENT).unwrap();

    // The signature itself is sound over the stated id.
    assert!(verify(event.sig(), event.id(), event.pubkey()));
    assert!(!event.has_correct_id_hash());
    assert!(!event.has_valid_signature());

    match event.check_signature() {
        Err(ValidationError::IdentityMismatch { stated, computed }) => {
            assert_eq!(stated, *event.id());
            assert_eq!(computed.to_hex(), SIGNED_WRONG_ID_COMPUTED);
        }
        other => panic!("expected id mismatch, got {other:?}"),
    }
}

#[test]
fn test_reject_oversized() {
    let fixture = TestFixture::with_seed([0x42; 32]);
    let codec = Codec::new(CodecConfig {
        max_content_bytes: 8,
        ..Default::default()
    });

    let err = codec.accept(fixture.make_text_note("123456789")).unwrap_err();
    assert!(err.is_decode());
    assert!(codec.accept(fixture.make_text_note("12345678")).is_ok());
}

#[test]
fn test_batch_reports_line_numbers() {
    let codec = Codec::default();
    let good = codec.encode(&event_from_vector(&all_vectors()[0]));
    let text = format!("{good}\n{SIGNED_WRONG_ID_EVENT}\n\n{{}}\n");

    let results = codec.decode_batch(&text);
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(&results[1], Err(Error::Line { line: 2, .. })));
    assert!(matches!(&results[2], Err(Error::Line { line: 4, .. })));
    assert!(results[2].as_ref().unwrap_err().is_decode());
}

// =============================================================================
// DERIVED VALUES
// =============================================================================

#[test]
fn test_tag_queries() {
    let t = tags(&[&["p", "abc"], &["e", "xyz"], &["t", "NSFW"]]);

    assert_eq!(t.tagged_users(), vec!["abc"]);
    assert_eq!(t.tagged_events(), vec!["xyz"]);
    assert!(t.is_tagged_hash("nsfw"));
    assert!(t.is_sensitive());
    assert!(t.has_any_tagged_user());
    assert!(!t.is_tagged_user("xyz"));
}

#[test]
fn test_pow_rank() {
    assert_eq!(pow_rank(&EventId::ZERO), 256);
    assert_eq!(pow_rank(&id(&format!("000f{}", "f".repeat(60)))), 12);
    assert_eq!(pow_rank(&id(&format!("0001{}", "f".repeat(60)))), 15);
    assert_eq!(pow_rank(&id(&format!("0003{}", "0".repeat(60)))), 14);
    assert_eq!(pow_rank(&id(&format!("07{}", "0".repeat(62)))), 5);
    assert_eq!(pow_rank(&id(&format!("8{}", "0".repeat(63)))), 0);
}

#[test]
fn test_malformed_coordinate_is_absent() {
    assert!(ATag::parse("badformat", None).is_none());
    assert!(tags(&[&["a", "badformat"]]).tagged_addresses().is_empty());
}

#[test]
fn test_unknown_kind_is_generic() {
    let fixture = TestFixture::with_seed([0x11; 32]);
    let event = fixture.sign(tessera::EventBuilder::new(Kind(9999)).content("?"));
    let typed = Codec::default().accept(event.clone()).unwrap();

    assert!(typed.variant().is_generic());
    assert_eq!(typed.event(), &event);
}

#[test]
fn test_article_shares_as_naddr() {
    let fixture = TestFixture::with_seed([0x12; 32]);
    let typed = Codec::default()
        .accept(fixture.make_article("slug", "Title", "body"))
        .unwrap();

    match typed.variant() {
        Variant::LongFormArticle(article) => {
            assert_eq!(article.d_tag, "slug");
            assert_eq!(article.title.as_deref(), Some("Title"));
        }
        other => panic!("expected article, got {other:?}"),
    }

    let uri = typed.to_nostr_uri().unwrap();
    match nip19::decode(&uri).unwrap() {
        Nip19::Address(address) => {
            assert_eq!(address, fixture.address(Kind::LONG_FORM_ARTICLE, "slug"));
        }
        other => panic!("expected address, got {other:?}"),
    }
}

#[test]
fn test_note_shares_as_nevent() {
    let event = event_from_vector(&all_vectors()[1]);
    let typed = Codec::default().accept(event.clone()).unwrap();

    match nip19::decode(&typed.to_nip19().unwrap()).unwrap() {
        Nip19::Event(pointer) => {
            assert_eq!(pointer.id, *event.id());
            assert_eq!(pointer.author, Some(*event.pubkey()));
            assert_eq!(pointer.kind, Some(Kind::TEXT_NOTE));
        }
        other => panic!("expected event pointer, got {other:?}"),
    }
}

// =============================================================================
// PROPERTIES OVER GENERATED EVENTS
// =============================================================================

proptest! {
    #[test]
    fn test_wire_roundtrip(params: EventParams) {
        let event = event_from_params(&params);
        prop_assert_eq!(Event::from_json(&event.to_json()).unwrap(), event);
    }

    #[test]
    fn test_codec_accepts_generated_events(params: EventParams) {
        let event = event_from_params(&params);
        let codec = Codec::new(CodecConfig {
            max_content_bytes: usize::MAX,
            max_tag_rows: usize::MAX,
            ..Default::default()
        });
        let typed = codec.decode_str(&codec.encode(&event)).unwrap();
        prop_assert_eq!(typed.event(), &event);
    }
}
