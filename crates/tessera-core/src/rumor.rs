//! Rumor: an unsigned, possibly partial event.
//!
//! Used for drafts and for events carried inside other events, where any
//! field may be absent. Only present fields are serialized.

use serde::{Deserialize, Serialize};

use crate::canonical::derive_id;
use crate::crypto::{Keypair, PublicKey};
use crate::error::CoreError;
use crate::event::{Event, EventBuilder};
use crate::tags::Tags;
use crate::types::{EventId, Kind};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rumor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubkey: Option<PublicKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Rumor {
    /// The id the fields commit to, when every hashed field is present.
    pub fn compute_id(&self) -> Option<EventId> {
        Some(derive_id(
            self.pubkey.as_ref()?,
            self.created_at?,
            self.kind?,
            self.tags.as_ref()?,
            self.content.as_deref()?,
        ))
    }

    /// Fill in the id from the other fields, if they are all present.
    pub fn with_computed_id(mut self) -> Self {
        if let Some(id) = self.compute_id() {
            self.id = Some(id);
        }
        self
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json).map_err(|e| CoreError::Decode(e.into()))
    }

    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => unreachable!("rumor encoding failed: {e}"),
        }
    }

    /// Sign as `keypair`. Missing fields take builder defaults (empty tags and
    /// content, current time); a missing kind is an error. Any stated id or
    /// pubkey is replaced.
    pub fn sign(self, keypair: &Keypair) -> Result<Event, CoreError> {
        let kind = self
            .kind
            .ok_or_else(|| CoreError::Encoding("rumor has no kind".into()))?;
        let mut builder = EventBuilder::new(kind)
            .tags(self.tags.unwrap_or_default())
            .content(self.content.unwrap_or_default());
        if let Some(created_at) = self.created_at {
            builder = builder.created_at(created_at);
        }
        builder.sign(keypair)
    }
}

impl From<&Event> for Rumor {
    /// Drop the signature.
    fn from(event: &Event) -> Self {
        Self {
            id: Some(*event.id()),
            pubkey: Some(*event.pubkey()),
            created_at: Some(event.created_at()),
            kind: Some(event.kind()),
            tags: Some(event.tags().clone()),
            content: Some(event.content().to_string()),
        }
    }
}
