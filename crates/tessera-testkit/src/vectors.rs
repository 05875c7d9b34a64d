//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the canonical encoding, the id hash and the
//! deterministic signature. Every implementation computing ids over the same
//! fields must reproduce them byte for byte.

use serde_json::{json, Value};
use tessera_core::{derive_id, Event, EventBuilder, Keypair, Kind, PublicKey, Signature, Tag};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Single byte repeated 32 times to form the secret key.
    pub secret_byte: u8,
    pub created_at: i64,
    pub kind: Kind,
    pub tags: &'static [&'static [&'static str]],
    pub content: &'static str,
    /// Expected x-only public key (hex).
    pub expected_pubkey: &'static str,
    /// Expected event id (hex).
    pub expected_id: &'static str,
    /// Expected signature (hex), zero auxiliary randomness.
    pub expected_sig: &'static str,
}

impl GoldenVector {
    pub fn keypair(&self) -> Keypair {
        Keypair::from_secret_bytes(&[self.secret_byte; 32])
            .expect("golden vector secret is a valid scalar")
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.tags.iter().map(|row| Tag::new(row.iter().copied())).collect()
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "minimal",
            secret_byte: 0x01,
            created_at: 0,
            kind: Kind::TEXT_NOTE,
            tags: &[],
            content: "",
            expected_pubkey: "1b84c5567b126440995d3ed5aaba0565d71e1834604819ff9c17f5e9d5dd078f",
            expected_id: "9e6937ddc519e70f21f0347f6f21bd0592212316c79b9d4b4b1d69eea9a7418a",
            expected_sig: "848dbbc9625b46c65e1ac91c00375e03cc9a5ac112fee4027806b539533532c638860bc3cc2bf50932efff2e8b8a5153faff9abc079dc3a5365a2acbc08806b3",
        },
        GoldenVector {
            name: "text_note_with_tags",
            secret_byte: 0x02,
            created_at: 1_673_002_822,
            kind: Kind::TEXT_NOTE,
            tags: &[
                &[
                    "e",
                    "688787d8ff144c502c7f5cffaafe2cc588d86079f9de88304c26b0cb99ce91c6",
                    "wss://relay.damus.io",
                    "root",
                ],
                &[
                    "p",
                    "02c7e1b1e9c175ab2d100baf1d5a66e73ecc044e9f8093d0c965741f26aa3abf",
                    "",
                ],
            ],
            content: "Lorem ipsum dolor sit amet",
            expected_pubkey: "4d4b6cd1361032ca9bd2aeb9d900aa4d45d9ead80ac9423374c451a7254d0766",
            expected_id: "c877e04ff98b148fbfe84d8880bd664d95608410e5eb9e2406de75419514b2e4",
            expected_sig: "2683c185804efff03e202f2f75a228cde164d6e6d74d98d807649690ed09bfb47db49a101498a0f2e8514928478654b80367d2c714db429926661b2f5a06f2bd",
        },
        GoldenVector {
            name: "string_escapes",
            secret_byte: 0x03,
            created_at: 1_700_000_000,
            kind: Kind::TEXT_NOTE,
            tags: &[&["t", "esc\"aped"]],
            content: "line1\nline2\t\"quoted\" \\ back \u{01} ctrl \u{7f} del \u{2028} sep \u{1F30D} h\u{e9}llo /slash\r\u{08}\u{0c}",
            expected_pubkey: "531fe6068134503d2723133227c867ac8fa6c83c537e9a44c3c5bdbdcb1fe337",
            expected_id: "52921e1f816ef031b1f5cad2d6ccd3bf4ba54d12a3d51c891efa18fa7dd4a113",
            expected_sig: "53c85154e3fa8135a156bb81cedeec98eb64f25fcd986de454c26afeb609fa9ce8ccec83c3463bda2bbd71474282b2a17de95e0f46cfdd3e2fdb603c16a00514",
        },
        GoldenVector {
            name: "long_form_article",
            secret_byte: 0x04,
            created_at: 1_690_000_000,
            kind: Kind::LONG_FORM_ARTICLE,
            tags: &[
                &["d", "my-article"],
                &["title", "Hello"],
                &["published_at", "1690000000"],
            ],
            content: "# Hello\n\nBody.",
            expected_pubkey: "462779ad4aad39514614751a71085f2f10e1c7a593e4e030efb5b8721ce55b0b",
            expected_id: "9fd8512b5756e44e2039d42b319b56e7480d654e52144401f72dc3e886bcb223",
            expected_sig: "27119d1de0e7004eb1ec595f1fe9a38d81f6eaa3963a0cc2e703974fb9c63917fb960d01f8ef6eb7fc93c9188b262f6181c7c1ddd03041b6ecef0717c949f225",
        },
        GoldenVector {
            name: "negative_timestamp_metadata",
            secret_byte: 0x05,
            created_at: -1,
            kind: Kind::METADATA,
            tags: &[],
            content: "{\"name\":\"alice\"}",
            expected_pubkey: "62c0a046dacce86ddd0343c6d3c7c79c2208ba0d9c9cf24a6d046d21d21f90f7",
            expected_id: "0b178e93d4d7ea3c04232e02ce47f8a6bcf894a0425f839e034bc34493833937",
            expected_sig: "1101eace4150c6dfd09ec6fbaf287ee9ec65c03780477d93fc12391d47f762b2105e72294df7ecc15c28f6eb548dd7aaac4b5d54671b619d96649c66fd987713",
        },
        GoldenVector {
            name: "max_kind",
            secret_byte: 0x06,
            created_at: 4_102_444_800,
            kind: Kind(u32::MAX),
            tags: &[],
            content: "x",
            expected_pubkey: "f006a18d5653c4edf5391ff23a61f03ff83d237e880ee61187fa9f379a028e0a",
            expected_id: "2f533a06a991e8541fe2620b1d5c56686d0097d0c9280845f6a5c2db057d98ce",
            expected_sig: "a0c65cc8798217fae7097a0bb9501770d94d4d340cd5cdeaa116143c34deca3d01de785d146f2c148067bd61dd81894c3c486a70e0f9feed94e5635d572f39d8",
        },
        GoldenVector {
            name: "irregular_tag_rows",
            secret_byte: 0x07,
            created_at: 1,
            kind: Kind::TEXT_NOTE,
            tags: &[&[], &["t"], &["t", "a", "b", "c"]],
            content: "",
            expected_pubkey: "989c0b76cb563971fdc9bef31ec06c3560f3249d6ee9e5d83c57625596e05f6f",
            expected_id: "c1931668430e142e55297f81f1e2f13c8a8f089f8b1bb5482f9044474be67bee",
            expected_sig: "b47085e777e92ec234160c3cfb465841e591fe1043a2e1c198cf802df2b6852ee389f331a802258fe3cb7b4910f8da2c1cba5b6c0e830d7a55c33d7a9ed9284c",
        },
    ]
}

/// Build and sign the event a golden vector describes.
pub fn event_from_vector(vector: &GoldenVector) -> Event {
    EventBuilder::new(vector.kind)
        .created_at(vector.created_at)
        .tags(vector.tags())
        .content(vector.content)
        .sign(&vector.keypair())
        .expect("signing a golden vector")
}

/// Check every golden vector: `(name, matches, computed id)`.
///
/// Call this to verify your implementation matches the reference.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let event = event_from_vector(v);
            let id = event.id().to_hex();
            let matches = event.pubkey().to_hex() == v.expected_pubkey
                && id == v.expected_id
                && event.sig().to_hex() == v.expected_sig;
            (v.name.to_string(), matches, id)
        })
        .collect()
}

/// How a rejection vector must fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Decodes, but the stated id is not the canonical hash.
    IdentityMismatch,
    /// Decodes with a correct id, but the signature does not verify.
    SignatureInvalid,
    /// Does not decode at all.
    Malformed,
}

/// A wire event that must be rejected.
#[derive(Debug, Clone)]
pub struct RejectionVector {
    pub name: &'static str,
    pub json: String,
    pub expected: Rejection,
}

/// A third-party event whose signature verifies over its stated id, but the
/// stated id is not the hash of its fields.
pub const SIGNED_WRONG_ID_EVENT: &str = r#"{"id":"4ff2236ceb2fdc6dee6317cd0b841f3f020ac985bb3f99f7f4c1f973ec28d06b","pubkey":"35e433c42e5bb838daabd178d54620e427cccb214c55b95daac3dbd9506fbcaf","created_at":1758468146,"kind":1059,"tags":[["p","c40d9a07a3ece16bbed2b141fc7f0d133be6e88460dd052ae062c5b7c92fd7a0"]],"content":"test content","sig":"95dac63b919f424211b12d70786d42c03ec63cbe9196f6d6e773260926d3fd37054eecd3e7c70beb1ed9ef1e2a68cf62c09fc3ad5ec5d45e9143ab4044275b2f"}"#;

/// The canonical hash of [`SIGNED_WRONG_ID_EVENT`]'s fields.
pub const SIGNED_WRONG_ID_COMPUTED: &str =
    "1b66dbf1ddd562ee864db42ab82e3c66708f1fdfd226acde7727e43eb82c679d";

/// Re-encode `event` after editing its wire object.
fn mutate(event: &Event, edit: impl FnOnce(&mut Value)) -> String {
    let mut value: Value = serde_json::from_str(&event.to_json()).expect("event encodes as JSON");
    edit(&mut value);
    value.to_string()
}

/// Swap the author and restate the matching id, so only the signature can fail.
fn with_author(event: &Event, pubkey: PublicKey) -> String {
    let id = derive_id(
        &pubkey,
        event.created_at(),
        event.kind(),
        event.tags(),
        event.content(),
    );
    mutate(event, |v| {
        v["pubkey"] = json!(pubkey.to_hex());
        v["id"] = json!(id.to_hex());
    })
}

/// Get all rejection vectors.
pub fn rejection_vectors() -> Vec<RejectionVector> {
    let base = event_from_vector(&all_vectors()[1]);

    let mut flipped_sig = *base.sig().as_bytes();
    flipped_sig[63] ^= 0x01;
    let flipped_sig = Signature::from_bytes(flipped_sig).to_hex();

    vec![
        RejectionVector {
            name: "signed_wrong_id",
            json: SIGNED_WRONG_ID_EVENT.to_string(),
            expected: Rejection::IdentityMismatch,
        },
        RejectionVector {
            name: "tampered_content",
            json: mutate(&base, |v| v["content"] = json!("Lorem ipsum dolor sit amet!")),
            expected: Rejection::IdentityMismatch,
        },
        RejectionVector {
            name: "reordered_tags",
            json: mutate(&base, |v| {
                let tags = v["tags"].as_array_mut().expect("tags array");
                tags.reverse();
            }),
            expected: Rejection::IdentityMismatch,
        },
        RejectionVector {
            name: "flipped_signature_bit",
            json: mutate(&base, |v| v["sig"] = json!(flipped_sig)),
            expected: Rejection::SignatureInvalid,
        },
        RejectionVector {
            name: "foreign_author",
            json: with_author(&base, all_vectors()[0].keypair().public_key()),
            expected: Rejection::SignatureInvalid,
        },
        RejectionVector {
            name: "off_curve_author",
            json: with_author(&base, PublicKey::from_bytes([0xff; 32])),
            expected: Rejection::SignatureInvalid,
        },
        RejectionVector {
            name: "odd_length_id",
            json: mutate(&base, |v| v["id"] = json!("abc")),
            expected: Rejection::Malformed,
        },
        RejectionVector {
            name: "non_hex_sig",
            json: mutate(&base, |v| v["sig"] = json!("zz".repeat(64))),
            expected: Rejection::Malformed,
        },
        RejectionVector {
            name: "numeric_tag_element",
            json: mutate(&base, |v| v["tags"] = json!([["t", 1]])),
            expected: Rejection::Malformed,
        },
        RejectionVector {
            name: "missing_sig",
            json: mutate(&base, |v| {
                if let Some(obj) = v.as_object_mut() {
                    obj.remove("sig");
                }
            }),
            expected: Rejection::Malformed,
        },
        RejectionVector {
            name: "string_kind",
            json: mutate(&base, |v| v["kind"] = json!("1")),
            expected: Rejection::Malformed,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_are_deterministic() {
        // Generate each vector twice, verify identical results
        for vector in all_vectors() {
            let e1 = event_from_vector(&vector);
            let e2 = event_from_vector(&vector);

            assert_eq!(
                e1, e2,
                "Vector '{}' produced different events on regeneration",
                vector.name
            );
        }
    }

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, id) in verify_all_vectors() {
            assert!(matches, "vector '{}' mismatch, computed id {}", name, id);
        }
    }

    #[test]
    fn test_vector_names_unique() {
        let mut names: Vec<_> = all_vectors().iter().map(|v| v.name).collect();
        names.extend(rejection_vectors().iter().map(|v| v.name));
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
    }
}
