pub mod hash;
pub mod keys;
pub mod threshold;

pub use hash::{address_hash, hash160, sha256, ADDRESS_HASH_LEN};
pub use keys::{KeyPair, PublicKey, SecretKey};
pub use threshold::ThresholdPublicKey;
