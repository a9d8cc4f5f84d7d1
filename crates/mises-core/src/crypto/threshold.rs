use crate::address::Address;
use crate::crypto::hash::{address_hash, ADDRESS_HASH_LEN};
use crate::crypto::keys::PublicKey;
use crate::error::CoreError;

/// Amino type prefix registered for legacy threshold multisig keys
pub const THRESHOLD_AMINO_PREFIX: [u8; 4] = [0x22, 0xc1, 0xf7, 0xe2];

const THRESHOLD_FIELD_TAG: u8 = 0x08;
const MEMBER_FIELD_TAG: u8 = 0x12;

/// A k-of-n composite key over an ordered member list.
///
/// The serialization and therefore the address depend on member order.
/// Callers that need the on-chain identity must pass members sorted by
/// their address bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdPublicKey {
    pub threshold: u32,
    pub members: Vec<PublicKey>,
}

impl ThresholdPublicKey {
    pub fn new(threshold: u32, members: Vec<PublicKey>) -> Self {
        ThresholdPublicKey { threshold, members }
    }

    /// Amino serialization of the composite key
    pub fn amino_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + 6 + self.members.len() * 40);
        out.extend_from_slice(&THRESHOLD_AMINO_PREFIX);

        out.push(THRESHOLD_FIELD_TAG);
        write_uvarint(u64::from(self.threshold), &mut out);

        for member in &self.members {
            let encoded = member.amino_bytes();
            out.push(MEMBER_FIELD_TAG);
            write_uvarint(encoded.len() as u64, &mut out);
            out.extend_from_slice(&encoded);
        }

        out
    }

    pub fn address_bytes(&self) -> [u8; ADDRESS_HASH_LEN] {
        address_hash(&self.amino_bytes())
    }

    pub fn address(&self) -> Result<Address, CoreError> {
        Address::from_bytes(&self.address_bytes())
    }
}

/// Protobuf-style unsigned varint
fn write_uvarint(mut value: u64, out: &mut Vec<u8>) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}
