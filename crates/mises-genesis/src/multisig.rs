//! Independent re-derivation of multisig governance addresses.
//!
//! Members are ordered by the bytes of their own account addresses before
//! the composite key is serialized. That order is a chain convention and
//! must not be replaced by ordering on the raw key bytes.

use mises_core::{Address, MultisigDescriptor, PublicKey, ThresholdPublicKey};
use tracing::{debug, info};

use crate::error::GenesisError;

/// Decode `misespub` member keys of either curve, keeping caller order
pub fn decode_members(pubkeys: &[String]) -> Result<Vec<PublicKey>, GenesisError> {
    pubkeys
        .iter()
        .map(|s| PublicKey::from_bech32(s).map_err(GenesisError::from))
        .collect()
}

/// Sort keys ascending by their derived address bytes
pub fn sort_members(keys: &mut [PublicKey]) {
    keys.sort_by_key(|k| k.address_bytes());
}

/// Compute the address of the k-of-n key over `members` in canonical order
pub fn derive_multisig_address(threshold: u32, members: &[PublicKey]) -> Result<Address, GenesisError> {
    if threshold == 0 || members.is_empty() || threshold as usize > members.len() {
        return Err(GenesisError::InvalidThreshold {
            threshold,
            members: members.len(),
        });
    }

    let mut sorted = members.to_vec();
    sort_members(&mut sorted);
    for (position, key) in sorted.iter().enumerate() {
        debug!(position, pubkey = %key, "Multisig member");
    }

    Ok(ThresholdPublicKey::new(threshold, sorted).address()?)
}

/// Check that the descriptor's keys and threshold derive to its claimed
/// address. Returns the verified address.
pub fn verify_multisig(descriptor: &MultisigDescriptor) -> Result<Address, GenesisError> {
    let members = decode_members(&descriptor.pubkeys)?;
    let computed = derive_multisig_address(descriptor.threshold, &members)?;

    let matches = match Address::parse(&descriptor.claimed_address) {
        Ok(claimed) => claimed == computed,
        Err(e) => {
            debug!(claimed = %descriptor.claimed_address, error = %e, "Claimed multisig address does not parse");
            false
        }
    };
    if !matches {
        return Err(GenesisError::AddressMismatch {
            computed: computed.to_string(),
            claimed: descriptor.claimed_address.clone(),
        });
    }

    info!(
        address = %computed,
        threshold = descriptor.threshold,
        members = members.len(),
        "Multisig address verified"
    );
    Ok(computed)
}
