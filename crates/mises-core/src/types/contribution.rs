use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::amount::Amount;

/// Accumulated whole-unit amount per address string
pub type AggregatedBalance = BTreeMap<String, Amount>;

/// One entry of a JSON allocation object, keyed by address in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceAlloc {
    pub amt: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// A single allocation read from an input source
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionRecord {
    /// Address as written in the source
    pub address: String,
    /// Whole-unit amount
    pub amount: f64,
    pub memo: Option<String>,
}

impl ContributionRecord {
    pub fn new(address: impl Into<String>, amount: f64) -> Self {
        ContributionRecord {
            address: address.into(),
            amount,
            memo: None,
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn from_alloc(address: impl Into<String>, alloc: BalanceAlloc) -> Self {
        ContributionRecord {
            address: address.into(),
            amount: alloc.amt,
            memo: alloc.memo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_memo_optional() {
        let alloc: BalanceAlloc = serde_json::from_str(r#"{"amt": 12.5}"#).unwrap();
        assert_eq!(alloc.amt, 12.5);
        assert!(alloc.memo.is_none());

        let record = ContributionRecord::from_alloc("mises1xyz", alloc);
        assert_eq!(record.address, "mises1xyz");
        assert_eq!(record.amount, 12.5);
    }

    #[test]
    fn test_alloc_rejects_non_numeric_amount() {
        let result: Result<BalanceAlloc, _> = serde_json::from_str(r#"{"amt": "12.5", "memo": "x"}"#);
        assert!(result.is_err());
    }
}
