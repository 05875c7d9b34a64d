//! Cryptographic primitives for Tessera.
//!
//! Wraps BIP-340 Schnorr signing over secp256k1 and SHA-256 hashing with
//! strong types. Signatures are produced over the 32-byte event id directly
//! (prehash), never over a second hash of it.

use k256::schnorr::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::schnorr::{Signature as SchnorrSignature, SigningKey, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, DecodeError, ValidationError};
use crate::hex_codec::{bytes_to_hex, hex_to_array};
use crate::types::EventId;

/// Compute the SHA-256 digest of the given data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// A 32-byte x-only secp256k1 public key.
///
/// Not checked against the curve on construction; an off-curve key simply
/// fails verification.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey(pub [u8; 32]);

impl PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to lowercase hex.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(self.0)
    }

    /// Parse from hex.
    pub fn from_hex(s: &str) -> Result<Self, DecodeError> {
        hex_to_array("pubkey", s).map(Self)
    }

    /// Verify a signature over a 32-byte digest.
    pub fn verify(&self, digest: &EventId, signature: &Signature) -> Result<(), ValidationError> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| ValidationError::SignatureInvalid)?;
        let sig = SchnorrSignature::try_from(signature.0.as_slice())
            .map_err(|_| ValidationError::SignatureInvalid)?;
        verifying_key
            .verify_prehash(digest.as_bytes(), &sig)
            .map_err(|_| ValidationError::SignatureInvalid)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for PublicKey {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for PublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A 64-byte BIP-340 Schnorr signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to lowercase hex.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(self.0)
    }

    /// Parse from hex.
    pub fn from_hex(s: &str) -> Result<Self, DecodeError> {
        hex_to_array("sig", s).map(Self)
    }

    /// The zero signature (never valid, used as placeholder).
    pub const ZERO: Self = Self([0u8; 64]);
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 64]> for Signature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Pure verification predicate.
///
/// Returns false on any failure: off-curve key, wrong key, tampered digest
/// or a malformed signature. Never panics.
pub fn verify(signature: &Signature, digest: &EventId, public_key: &PublicKey) -> bool {
    public_key.verify(digest, signature).is_ok()
}

/// A secp256k1 keypair for signing events.
///
/// This wraps k256's Schnorr SigningKey.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::random(&mut rng);
        Self { signing_key }
    }

    /// Create from 32 secret key bytes.
    ///
    /// Fails for zero or for values not below the curve order.
    pub fn from_secret_bytes(secret: &[u8; 32]) -> Result<Self, CoreError> {
        let signing_key =
            SigningKey::from_bytes(secret).map_err(|_| CoreError::InvalidSecretKey)?;
        Ok(Self { signing_key })
    }

    /// Create from a hex-encoded secret key.
    pub fn from_secret_hex(s: &str) -> Result<Self, CoreError> {
        let secret: [u8; 32] = hex_to_array("secret key", s)?;
        Self::from_secret_bytes(&secret)
    }

    /// Get the x-only public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key.verifying_key().to_bytes().into())
    }

    /// Sign a 32-byte digest.
    ///
    /// Deterministic: auxiliary randomness is all zeros, so the same key and
    /// digest always give the same signature.
    pub fn sign(&self, digest: &EventId) -> Result<Signature, CoreError> {
        let sig: SchnorrSignature = self
            .signing_key
            .sign_prehash(digest.as_bytes())
            .map_err(|e| CoreError::Signing(e.to_string()))?;
        Ok(Signature(sig.to_bytes()))
    }

    /// Get the raw secret key bytes.
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.public_key())
    }
}
