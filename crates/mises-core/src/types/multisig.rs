use serde::{Deserialize, Serialize};

/// A multisig account as described in the governance descriptor file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultisigDescriptor {
    /// Address the descriptor claims the keys derive to
    #[serde(rename = "addr")]
    pub claimed_address: String,
    pub threshold: u32,
    /// Member keys in `misespub` bech32 form, in caller order
    #[serde(rename = "pubs")]
    pub pubkeys: Vec<String>,
    /// Whole-unit amount to fund once verified
    #[serde(default)]
    pub amount: f64,
}
