use bech32::{FromBase32, ToBase32, Variant};
use ed25519_dalek::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use std::fmt;

use crate::address::{Address, ACCOUNT_PUBKEY_PREFIX};
use crate::crypto::hash::{address_hash, hash160, ADDRESS_HASH_LEN};
use crate::error::CoreError;

/// Amino type prefix registered for Ed25519 public keys
pub const ED25519_AMINO_PREFIX: [u8; 4] = [0x16, 0x24, 0xde, 0x64];

/// Amino type prefix registered for secp256k1 public keys
pub const SECP256K1_AMINO_PREFIX: [u8; 4] = [0xeb, 0x5a, 0xe9, 0x87];

pub const ED25519_KEY_LEN: usize = 32;

/// Compressed SEC1 point
pub const SECP256K1_KEY_LEN: usize = 33;

const AMINO_PREFIX_LEN: usize = 4;

/// Account public key of either supported curve
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PublicKey {
    Ed25519([u8; ED25519_KEY_LEN]),
    Secp256k1([u8; SECP256K1_KEY_LEN]),
}

impl PublicKey {
    /// Wrap a compressed secp256k1 point, rejecting bytes off the curve
    pub fn secp256k1_from_sec1(bytes: &[u8]) -> Result<Self, CoreError> {
        let point = k256::PublicKey::from_sec1_bytes(bytes)
            .map_err(|_| CoreError::invalid_pubkey(&hex::encode(bytes), "not a secp256k1 point"))?;
        let compressed = point.to_encoded_point(true);

        let mut key = [0u8; SECP256K1_KEY_LEN];
        key.copy_from_slice(compressed.as_bytes());
        Ok(PublicKey::Secp256k1(key))
    }

    /// Raw key bytes without any type prefix
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PublicKey::Ed25519(key) => &key[..],
            PublicKey::Secp256k1(key) => &key[..],
        }
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    fn amino_prefix(&self) -> [u8; AMINO_PREFIX_LEN] {
        match self {
            PublicKey::Ed25519(_) => ED25519_AMINO_PREFIX,
            PublicKey::Secp256k1(_) => SECP256K1_AMINO_PREFIX,
        }
    }

    /// Amino serialization: type prefix, length byte, raw key
    pub fn amino_bytes(&self) -> Vec<u8> {
        let key = self.as_bytes();
        let mut out = Vec::with_capacity(AMINO_PREFIX_LEN + 1 + key.len());
        out.extend_from_slice(&self.amino_prefix());
        out.push(key.len() as u8);
        out.extend_from_slice(key);
        out
    }

    /// Parse an amino-serialized key. `source` is only used in error messages.
    pub fn from_amino_bytes(bytes: &[u8], source: &str) -> Result<Self, CoreError> {
        if bytes.len() <= AMINO_PREFIX_LEN {
            return Err(CoreError::invalid_pubkey(
                source,
                format!("{} amino bytes is too short", bytes.len()),
            ));
        }

        let (prefix, rest) = bytes.split_at(AMINO_PREFIX_LEN);
        let key_len = if *prefix == ED25519_AMINO_PREFIX {
            ED25519_KEY_LEN
        } else if *prefix == SECP256K1_AMINO_PREFIX {
            SECP256K1_KEY_LEN
        } else {
            return Err(CoreError::invalid_pubkey(
                source,
                format!("unsupported key type prefix {}", hex::encode(prefix)),
            ));
        };

        if rest[0] as usize != key_len || rest.len() != 1 + key_len {
            return Err(CoreError::invalid_pubkey(
                source,
                format!(
                    "expected a {}-byte key, got length byte {} and {} key bytes",
                    key_len,
                    rest[0],
                    rest.len() - 1
                ),
            ));
        }

        let key = &rest[1..];
        if key_len == SECP256K1_KEY_LEN {
            return Self::secp256k1_from_sec1(key)
                .map_err(|_| CoreError::invalid_pubkey(source, "not a secp256k1 point"));
        }

        let mut ed = [0u8; ED25519_KEY_LEN];
        ed.copy_from_slice(key);
        Ok(PublicKey::Ed25519(ed))
    }

    /// Decode the `misespub` bech32 form
    pub fn from_bech32(s: &str) -> Result<Self, CoreError> {
        let (hrp, data, variant) = bech32::decode(s).map_err(|e| CoreError::invalid_pubkey(s, e))?;

        if hrp != ACCOUNT_PUBKEY_PREFIX {
            return Err(CoreError::invalid_pubkey(
                s,
                format!("expected prefix {:?}, got {:?}", ACCOUNT_PUBKEY_PREFIX, hrp),
            ));
        }
        if variant != Variant::Bech32 {
            return Err(CoreError::invalid_pubkey(s, "bech32m is not accepted"));
        }

        let bytes = Vec::<u8>::from_base32(&data).map_err(|e| CoreError::invalid_pubkey(s, e))?;
        Self::from_amino_bytes(&bytes, s)
    }

    /// Encode as `misespub` bech32 over the amino bytes
    pub fn to_bech32(&self) -> Result<String, CoreError> {
        bech32::encode(
            ACCOUNT_PUBKEY_PREFIX,
            self.amino_bytes().to_base32(),
            Variant::Bech32,
        )
        .map_err(|e| CoreError::Serialization(e.to_string()))
    }

    /// Raw bytes of the account address owned by this key.
    ///
    /// Ed25519 keys hash with truncated SHA-256, secp256k1 keys with
    /// RIPEMD-160 over SHA-256.
    pub fn address_bytes(&self) -> [u8; ADDRESS_HASH_LEN] {
        match self {
            PublicKey::Ed25519(key) => address_hash(key),
            PublicKey::Secp256k1(key) => hash160(key),
        }
    }

    /// The account address owned by this key
    pub fn address(&self) -> Result<Address, CoreError> {
        Address::from_bytes(&self.address_bytes())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublicKey::Ed25519(_) => write!(f, "Ed25519({})", self.to_hex()),
            PublicKey::Secp256k1(_) => write!(f, "Secp256k1({})", self.to_hex()),
        }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Ed25519 secret key (32 bytes seed)
/// Not serializable to prevent accidental exposure
#[derive(Clone)]
pub struct SecretKey(SigningKey);

impl SecretKey {
    /// Generate a new random secret key
    pub fn generate() -> Self {
        SecretKey(SigningKey::generate(&mut OsRng))
    }

    /// Create from raw bytes (seed)
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        SecretKey(SigningKey::from_bytes(bytes))
    }

    /// Get the corresponding public key
    pub fn public_key(&self) -> PublicKey {
        PublicKey::Ed25519(self.0.verifying_key().to_bytes())
    }

    /// Export raw bytes (use with caution)
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Export as hex string (use with caution)
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey([REDACTED])")
    }
}

/// A keypair containing both secret and public keys
#[derive(Clone)]
pub struct KeyPair {
    pub secret: SecretKey,
    pub public: PublicKey,
}

impl KeyPair {
    /// Generate a new random keypair
    pub fn generate() -> Self {
        let secret = SecretKey::generate();
        let public = secret.public_key();
        KeyPair { secret, public }
    }

    /// Create from secret key bytes
    pub fn from_secret_bytes(bytes: &[u8; 32]) -> Self {
        let secret = SecretKey::from_bytes(bytes);
        let public = secret.public_key();
        KeyPair { secret, public }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
