//! Mises Core - Addresses, keys, amounts and input record types
//!
//! This crate provides the foundational types shared by the genesis
//! construction engine and the command line tool.

pub mod address;
pub mod amount;
pub mod crypto;
pub mod error;
pub mod serialize;
pub mod types;

pub use address::{Address, ACCOUNT_ADDRESS_PREFIX, ACCOUNT_PUBKEY_PREFIX, MAX_ADDRESS_LEN};
pub use amount::{format_minor_units, Amount, round2, to_minor_units, MINOR_UNITS_PER_UNIT, NATIVE_DENOM};
pub use crypto::{address_hash, hash160, sha256, KeyPair, PublicKey, SecretKey, ThresholdPublicKey};
pub use error::CoreError;
pub use types::*;
