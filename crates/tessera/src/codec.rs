//! The Codec: wire bytes in, verified typed events out.
//!
//! Pipeline per event: JSON decode, structural limits, id and signature
//! check (when configured), then kind dispatch through a [`KindRegistry`].

use tessera_core::{default_registry, DecodeError, Event, KindRegistry, TypedEvent};

use crate::error::{Error, Result};

/// Default cap on tag rows per event.
pub const DEFAULT_MAX_TAG_ROWS: usize = 2000;

/// Default cap on content size, in bytes.
pub const DEFAULT_MAX_CONTENT_BYTES: usize = 256 * 1024;

/// Configuration for the Codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Whether to check id and signature on decode.
    pub verify_on_decode: bool,
    /// Events with more tag rows are rejected before hashing.
    pub max_tag_rows: usize,
    /// Events with larger content are rejected before hashing.
    pub max_content_bytes: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            verify_on_decode: true,
            max_tag_rows: DEFAULT_MAX_TAG_ROWS,
            max_content_bytes: DEFAULT_MAX_CONTENT_BYTES,
        }
    }
}

/// Decodes, checks and types events from the wire.
#[derive(Debug, Clone)]
pub struct Codec<'r> {
    config: CodecConfig,
    registry: &'r KindRegistry,
}

impl Codec<'static> {
    /// A codec over the built-in kinds.
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config,
            registry: default_registry(),
        }
    }
}

impl Default for Codec<'static> {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl<'r> Codec<'r> {
    /// A codec dispatching through a caller-built registry.
    pub fn with_registry(config: CodecConfig, registry: &'r KindRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn registry(&self) -> &KindRegistry {
        self.registry
    }

    /// Decode one wire JSON object.
    pub fn decode(&self, bytes: &[u8]) -> Result<TypedEvent> {
        let event = Event::from_slice(bytes).map_err(|e| {
            tracing::debug!(error = %e, len = bytes.len(), "undecodable event");
            Error::from(e)
        })?;
        self.accept(event)
    }

    /// Decode one wire JSON object from text.
    pub fn decode_str(&self, json: &str) -> Result<TypedEvent> {
        self.decode(json.as_bytes())
    }

    /// Check and type an already-decoded event.
    pub fn accept(&self, event: Event) -> Result<TypedEvent> {
        // 1. Structural limits
        self.check_limits(&event).map_err(|e| {
            tracing::warn!(id = %event.id(), kind = %event.kind(), error = %e, "rejecting oversized event");
            Error::from(e)
        })?;

        // 2. Id and signature
        if self.config.verify_on_decode {
            event.check_signature().map_err(|e| {
                tracing::warn!(id = %event.id(), kind = %event.kind(), error = %e, "rejecting event");
                Error::from(e)
            })?;
        }

        // 3. Kind dispatch
        let typed = self.registry.dispatch(event);
        tracing::debug!(
            id = %typed.event().id(),
            variant = typed.variant().name(),
            "decoded event"
        );
        Ok(typed)
    }

    /// Decode line-delimited JSON. Blank lines are skipped; every other line
    /// yields its own result, so one bad line does not stop the batch.
    pub fn decode_batch(&self, text: &str) -> Vec<Result<TypedEvent>> {
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                self.decode_str(line).map_err(|e| Error::Line {
                    line: i + 1,
                    source: Box::new(e),
                })
            })
            .collect()
    }

    /// Encode as the wire JSON object.
    pub fn encode(&self, event: &Event) -> String {
        event.to_json()
    }

    fn check_limits(&self, event: &Event) -> std::result::Result<(), DecodeError> {
        if event.tags().len() > self.config.max_tag_rows {
            return Err(DecodeError::LimitExceeded(format!(
                "{} tag rows, max {}",
                event.tags().len(),
                self.config.max_tag_rows
            )));
        }
        if event.content().len() > self.config.max_content_bytes {
            return Err(DecodeError::LimitExceeded(format!(
                "{} content bytes, max {}",
                event.content().len(),
                self.config.max_content_bytes
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::{EventBuilder, Keypair, Kind, Tag, Variant};

    fn keypair() -> Keypair {
        Keypair::from_secret_bytes(&[0x42; 32]).unwrap()
    }

    fn signed(kind: Kind, content: &str) -> Event {
        EventBuilder::new(kind)
            .created_at(1_700_000_000)
            .tag(["d", "x"])
            .content(content)
            .sign(&keypair())
            .unwrap()
    }

    fn tampered_json(event: &Event) -> String {
        let mut value: serde_json::Value = serde_json::from_str(&event.to_json()).unwrap();
        value["content"] = serde_json::json!("tampered");
        value.to_string()
    }

    #[test]
    fn test_config_defaults() {
        let config = CodecConfig::default();
        assert!(config.verify_on_decode);
        assert_eq!(config.max_tag_rows, 2000);
        assert_eq!(config.max_content_bytes, 262_144);
    }

    #[test]
    fn test_codec_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Codec<'static>>();
    }

    #[test]
    fn test_decode_valid_event() {
        let codec = Codec::default();
        let event = signed(Kind::LONG_FORM_ARTICLE, "body");
        let typed = codec.decode_str(&codec.encode(&event)).unwrap();
        assert_eq!(typed.event(), &event);
        assert!(matches!(typed.variant(), Variant::LongFormArticle(_)));
    }

    #[test]
    fn test_decode_rejects_tampered() {
        let codec = Codec::default();
        let err = codec
            .decode_str(&tampered_json(&signed(Kind::TEXT_NOTE, "x")))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(!err.is_decode());
    }

    #[test]
    fn test_decode_without_verification() {
        let codec = Codec::new(CodecConfig {
            verify_on_decode: false,
            ..Default::default()
        });
        let typed = codec
            .decode_str(&tampered_json(&signed(Kind::TEXT_NOTE, "x")))
            .unwrap();
        assert_eq!(typed.event().content(), "tampered");
        assert!(!typed.event().has_valid_signature());
    }

    #[test]
    fn test_decode_malformed() {
        let err = Codec::default().decode(b"{not json").unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_content_limit() {
        let codec = Codec::new(CodecConfig {
            max_content_bytes: 4,
            ..Default::default()
        });
        let err = codec.decode_str(&signed(Kind::TEXT_NOTE, "12345").to_json()).unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::LimitExceeded(_))));
        assert!(codec.decode_str(&signed(Kind::TEXT_NOTE, "1234").to_json()).is_ok());
    }

    #[test]
    fn test_tag_row_limit() {
        let codec = Codec::new(CodecConfig {
            max_tag_rows: 2,
            ..Default::default()
        });
        let event = EventBuilder::new(Kind::TEXT_NOTE)
            .tags((0..3).map(|i| Tag::new(["t".to_string(), i.to_string()])))
            .sign(&keypair())
            .unwrap();
        assert!(matches!(
            codec.accept(event),
            Err(Error::Decode(DecodeError::LimitExceeded(_)))
        ));
    }

    #[test]
    fn test_custom_registry() {
        let registry = KindRegistry::builder().build();
        let codec = Codec::with_registry(CodecConfig::default(), &registry);
        let typed = codec
            .decode_str(&signed(Kind::LONG_FORM_ARTICLE, "x").to_json())
            .unwrap();
        assert!(typed.variant().is_generic());
    }

    #[test]
    fn test_decode_batch() {
        let codec = Codec::default();
        let good = signed(Kind::TEXT_NOTE, "a").to_json();
        let bad = tampered_json(&signed(Kind::TEXT_NOTE, "b"));
        let text = format!("{good}\n\n{bad}\nnot json\n");

        let results = codec.decode_batch(&text);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(&results[1], Err(Error::Line { line: 3, .. })));
        assert!(results[1].as_ref().unwrap_err().is_validation());
        assert!(matches!(&results[2], Err(Error::Line { line: 4, .. })));
        assert!(results[2].as_ref().unwrap_err().is_decode());
    }
}
