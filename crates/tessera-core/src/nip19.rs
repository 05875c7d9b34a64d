//! Shareable identifiers: bech32 `note`, `npub`, `nevent` and `naddr`.
//!
//! `nevent` and `naddr` carry a TLV payload:
//!
//! | Type | Meaning | nevent | naddr |
//! |------|---------|--------|-------|
//! | 0 | special | 32-byte event id | d-tag (UTF-8) |
//! | 1 | relay | relay URL (UTF-8), repeatable | same |
//! | 2 | author | 32-byte pubkey | 32-byte pubkey |
//! | 3 | kind | 4-byte big-endian u32 | same |
//!
//! Unknown TLV types are skipped. For repeated singular types the first wins.

use bech32::{Bech32, Hrp};

use crate::atag::ATag;
use crate::crypto::PublicKey;
use crate::error::{CoreError, DecodeError};
use crate::types::{EventId, Kind};

pub const PREFIX_NOTE: &str = "note";
pub const PREFIX_NPUB: &str = "npub";
pub const PREFIX_NEVENT: &str = "nevent";
pub const PREFIX_NADDR: &str = "naddr";

/// URI scheme prefix for identifiers embedded in text.
pub const URI_SCHEME: &str = "nostr:";

const HRP_NOTE: Hrp = Hrp::parse_unchecked(PREFIX_NOTE);
const HRP_NPUB: Hrp = Hrp::parse_unchecked(PREFIX_NPUB);
const HRP_NEVENT: Hrp = Hrp::parse_unchecked(PREFIX_NEVENT);
const HRP_NADDR: Hrp = Hrp::parse_unchecked(PREFIX_NADDR);

const TLV_SPECIAL: u8 = 0;
const TLV_RELAY: u8 = 1;
const TLV_AUTHOR: u8 = 2;
const TLV_KIND: u8 = 3;

/// A decoded `nevent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPointer {
    pub id: EventId,
    pub author: Option<PublicKey>,
    pub kind: Option<Kind>,
    pub relays: Vec<String>,
}

/// Any decoded identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nip19 {
    Note(EventId),
    Pubkey(PublicKey),
    Event(EventPointer),
    /// The relay hint is the first relay listed, if any.
    Address(ATag),
}

/// Encode an event id as `note1...`.
pub fn encode_note(id: &EventId) -> Result<String, CoreError> {
    Ok(bech32::encode::<Bech32>(HRP_NOTE, id.as_bytes())?)
}

/// Encode a public key as `npub1...`.
pub fn encode_npub(pubkey: &PublicKey) -> Result<String, CoreError> {
    Ok(bech32::encode::<Bech32>(HRP_NPUB, pubkey.as_bytes())?)
}

/// Encode an event pointer as `nevent1...`.
pub fn encode_nevent(
    id: &EventId,
    author: Option<&PublicKey>,
    kind: Option<Kind>,
    relays: &[String],
) -> Result<String, CoreError> {
    let mut bytes = Vec::with_capacity(34 + 34 + 6);
    push_tlv(&mut bytes, TLV_SPECIAL, id.as_bytes())?;
    if let Some(author) = author {
        push_tlv(&mut bytes, TLV_AUTHOR, author.as_bytes())?;
    }
    if let Some(kind) = kind {
        push_tlv(&mut bytes, TLV_KIND, &kind.as_u32().to_be_bytes())?;
    }
    for relay in relays {
        push_tlv(&mut bytes, TLV_RELAY, relay.as_bytes())?;
    }
    Ok(bech32::encode::<Bech32>(HRP_NEVENT, &bytes)?)
}

/// Encode a coordinate as `naddr1...`.
///
/// The coordinate's pubkey must be 64 hex characters.
pub fn encode_naddr(address: &ATag) -> Result<String, CoreError> {
    let author = PublicKey::from_hex(&address.pubkey)?;
    let mut bytes = Vec::with_capacity(2 + address.d_tag.len() + 34 + 6);
    push_tlv(&mut bytes, TLV_SPECIAL, address.d_tag.as_bytes())?;
    push_tlv(&mut bytes, TLV_AUTHOR, author.as_bytes())?;
    push_tlv(&mut bytes, TLV_KIND, &address.kind.as_u32().to_be_bytes())?;
    if let Some(relay) = &address.relay_hint {
        push_tlv(&mut bytes, TLV_RELAY, relay.as_bytes())?;
    }
    Ok(bech32::encode::<Bech32>(HRP_NADDR, &bytes)?)
}

/// Prefix an identifier with the `nostr:` scheme.
pub fn to_uri(identifier: &str) -> String {
    format!("{URI_SCHEME}{identifier}")
}

/// Decode any supported identifier. A leading `nostr:` is accepted.
pub fn decode(text: &str) -> Result<Nip19, DecodeError> {
    let text = text.strip_prefix(URI_SCHEME).unwrap_or(text);
    let (hrp, data) = bech32::decode(text)?;

    if hrp == HRP_NOTE {
        Ok(Nip19::Note(EventId::try_from(data.as_slice())?))
    } else if hrp == HRP_NPUB {
        let bytes: [u8; 32] = data.as_slice().try_into().map_err(|_| DecodeError::InvalidLength {
            field: "pubkey",
            expected: 32,
            got: data.len(),
        })?;
        Ok(Nip19::Pubkey(PublicKey::from_bytes(bytes)))
    } else if hrp == HRP_NEVENT {
        decode_event_tlv(&data).map(Nip19::Event)
    } else if hrp == HRP_NADDR {
        decode_address_tlv(&data).map(Nip19::Address)
    } else {
        Err(DecodeError::Bech32(format!("unsupported prefix: {hrp}")))
    }
}

impl ATag {
    /// This coordinate as `naddr1...`, with the relay hint if present.
    pub fn to_naddr(&self) -> Result<String, CoreError> {
        encode_naddr(self)
    }

    /// Parse an `naddr1...` (or `nostr:naddr1...`) back into a coordinate.
    pub fn from_naddr(text: &str) -> Result<Self, DecodeError> {
        match decode(text)? {
            Nip19::Address(address) => Ok(address),
            _ => Err(DecodeError::Bech32(format!("expected {PREFIX_NADDR}"))),
        }
    }
}

fn push_tlv(out: &mut Vec<u8>, typ: u8, value: &[u8]) -> Result<(), CoreError> {
    let len = u8::try_from(value.len())
        .map_err(|_| CoreError::Encoding(format!("TLV value too long: {} bytes", value.len())))?;
    out.push(typ);
    out.push(len);
    out.extend_from_slice(value);
    Ok(())
}

/// Split a TLV payload into `(type, value)` entries.
fn parse_tlv(mut data: &[u8]) -> Result<Vec<(u8, &[u8])>, DecodeError> {
    let mut entries = Vec::new();
    while !data.is_empty() {
        let [typ, len, rest @ ..] = data else {
            return Err(DecodeError::Tlv("truncated header".into()));
        };
        let len = *len as usize;
        if rest.len() < len {
            return Err(DecodeError::Tlv(format!(
                "type {typ} declares {len} bytes, {} remain",
                rest.len()
            )));
        }
        entries.push((*typ, &rest[..len]));
        data = &rest[len..];
    }
    Ok(entries)
}

fn decode_kind(value: &[u8]) -> Result<Kind, DecodeError> {
    let bytes: [u8; 4] = value
        .try_into()
        .map_err(|_| DecodeError::Tlv(format!("kind must be 4 bytes, got {}", value.len())))?;
    Ok(Kind(u32::from_be_bytes(bytes)))
}

fn decode_event_tlv(data: &[u8]) -> Result<EventPointer, DecodeError> {
    let mut id = None;
    let mut author = None;
    let mut kind = None;
    let mut relays = Vec::new();

    for (typ, value) in parse_tlv(data)? {
        match typ {
            TLV_SPECIAL if id.is_none() => id = Some(EventId::try_from(value)?),
            // Optional hint; a malformed author is dropped rather than fatal.
            TLV_AUTHOR if author.is_none() => {
                author = <[u8; 32]>::try_from(value).ok().map(PublicKey::from_bytes);
            }
            TLV_KIND if kind.is_none() => kind = Some(decode_kind(value)?),
            TLV_RELAY => relays.push(String::from_utf8_lossy(value).into_owned()),
            _ => {}
        }
    }

    Ok(EventPointer {
        id: id.ok_or_else(|| DecodeError::Tlv("missing event id".into()))?,
        author,
        kind,
        relays,
    })
}

fn decode_address_tlv(data: &[u8]) -> Result<ATag, DecodeError> {
    let mut d_tag = None;
    let mut author = None;
    let mut kind = None;
    let mut relay = None;

    for (typ, value) in parse_tlv(data)? {
        match typ {
            TLV_SPECIAL if d_tag.is_none() => {
                d_tag = Some(String::from_utf8_lossy(value).into_owned());
            }
            TLV_AUTHOR if author.is_none() => {
                let bytes: [u8; 32] = value.try_into().map_err(|_| DecodeError::InvalidLength {
                    field: "pubkey",
                    expected: 32,
                    got: value.len(),
                })?;
                author = Some(PublicKey::from_bytes(bytes));
            }
            TLV_KIND if kind.is_none() => kind = Some(decode_kind(value)?),
            TLV_RELAY if relay.is_none() => relay = Some(String::from_utf8_lossy(value).into_owned()),
            _ => {}
        }
    }

    let author = author.ok_or_else(|| DecodeError::Tlv("missing author".into()))?;
    Ok(ATag::new(
        kind.ok_or_else(|| DecodeError::Tlv("missing kind".into()))?,
        author.to_hex(),
        d_tag.ok_or_else(|| DecodeError::Tlv("missing identifier".into()))?,
        relay,
    ))
}
