use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Length of an address derived from key material
pub const ADDRESS_HASH_LEN: usize = 20;

/// Compute the SHA-256 digest of data
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 truncated to the first 20 bytes, the address of a serialized key
pub fn address_hash(data: &[u8]) -> [u8; ADDRESS_HASH_LEN] {
    let digest = sha256(data);
    let mut out = [0u8; ADDRESS_HASH_LEN];
    out.copy_from_slice(&digest[..ADDRESS_HASH_LEN]);
    out
}

/// RIPEMD-160 over SHA-256, the address of a secp256k1 key
pub fn hash160(data: &[u8]) -> [u8; ADDRESS_HASH_LEN] {
    Ripemd160::digest(sha256(data)).into()
}
