use serde::{Deserialize, Serialize};

use crate::address::Address;

/// An account created at genesis with a native balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    pub address: Address,
    /// Balance in minor units
    pub amount: u64,
    pub sequence: u64,
    pub account_number: u64,
}

impl GenesisAccount {
    pub fn new(address: Address, amount: u64) -> Self {
        GenesisAccount {
            address,
            amount,
            sequence: 0,
            account_number: 0,
        }
    }
}
