use bech32::{FromBase32, ToBase32, Variant};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::CoreError;

/// Human-readable part of account addresses
pub const ACCOUNT_ADDRESS_PREFIX: &str = "mises";

/// Human-readable part of account public keys
pub const ACCOUNT_PUBKEY_PREFIX: &str = "misespub";

/// Longest raw address accepted
pub const MAX_ADDRESS_LEN: usize = 255;

/// An account address.
///
/// Holds the raw bytes together with the canonical lower-case bech32 form.
/// Equality, hashing and ordering all go through the canonical string.
#[derive(Clone)]
pub struct Address {
    encoded: String,
    bytes: Vec<u8>,
}

impl Address {
    /// Build an address from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        check_length(bytes, &hex::encode(bytes))?;

        let encoded = bech32::encode(ACCOUNT_ADDRESS_PREFIX, bytes.to_base32(), Variant::Bech32)
            .map_err(|e| CoreError::invalid_address(&hex::encode(bytes), e))?;

        Ok(Address {
            encoded,
            bytes: bytes.to_vec(),
        })
    }

    /// Parse the bech32 form; the result is re-encoded canonically
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let (hrp, data, variant) = bech32::decode(s).map_err(|e| CoreError::invalid_address(s, e))?;

        if hrp != ACCOUNT_ADDRESS_PREFIX {
            return Err(CoreError::invalid_address(
                s,
                format!("expected prefix {:?}, got {:?}", ACCOUNT_ADDRESS_PREFIX, hrp),
            ));
        }
        if variant != Variant::Bech32 {
            return Err(CoreError::invalid_address(s, "bech32m is not accepted"));
        }

        let bytes = Vec::<u8>::from_base32(&data).map_err(|e| CoreError::invalid_address(s, e))?;
        check_length(&bytes, s)?;

        Self::from_bytes(&bytes)
    }

    /// Parse hex-encoded raw address bytes
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(trimmed).map_err(|e| CoreError::invalid_address(s, e))?;
        Self::from_bytes(&bytes)
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

fn check_length(bytes: &[u8], shown: &str) -> Result<(), CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::invalid_address(shown, "address is empty"));
    }
    if bytes.len() > MAX_ADDRESS_LEN {
        return Err(CoreError::invalid_address(
            shown,
            format!("length {} exceeds maximum {}", bytes.len(), MAX_ADDRESS_LEN),
        ));
    }
    Ok(())
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.encoded == other.encoded
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.encoded.hash(state);
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.encoded.as_bytes().cmp(other.encoded.as_bytes())
    }
}

impl FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.encoded)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encoded)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encoded)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(serde::de::Error::custom)
    }
}
