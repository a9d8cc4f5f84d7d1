use std::collections::BTreeSet;

use mises_core::{format_minor_units, to_minor_units, GenesisAccount};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{GenesisError, ValidationError};

/// Network-wide invariants the genesis account set must meet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenesisParams {
    /// Total minted supply in whole units
    pub total_supply: f64,
    /// Exact number of genesis accounts
    pub expected_accounts: usize,
}

impl GenesisParams {
    /// Target supply in minor units, using the same scaling as accounts
    pub fn target_minor_units(&self) -> Result<u64, GenesisError> {
        Ok(to_minor_units(self.total_supply)?)
    }
}

impl Default for GenesisParams {
    fn default() -> Self {
        GenesisParams {
            total_supply: 100_000_000.0,
            expected_accounts: 11,
        }
    }
}

/// Run every check and collect all violations
pub fn find_violations(
    accounts: &[GenesisAccount],
    params: &GenesisParams,
) -> Result<Vec<ValidationError>, GenesisError> {
    let mut violations = Vec::new();

    let expected = u128::from(params.target_minor_units()?);
    let actual: u128 = accounts.iter().map(|a| u128::from(a.amount)).sum();
    if actual != expected {
        violations.push(ValidationError::SupplyMismatch { expected, actual });
    }

    if accounts.len() != params.expected_accounts {
        violations.push(ValidationError::AccountCountMismatch {
            expected: params.expected_accounts,
            actual: accounts.len(),
        });
    }

    let mut seen = BTreeSet::new();
    for account in accounts {
        if !seen.insert(account.address.as_str()) {
            violations.push(ValidationError::DuplicateAddress(account.address.to_string()));
        }
    }

    Ok(violations)
}

/// Fail with every violation found, or succeed if the set is sound
pub fn validate(accounts: &[GenesisAccount], params: &GenesisParams) -> Result<(), GenesisError> {
    let violations = find_violations(accounts, params)?;
    if !violations.is_empty() {
        for violation in &violations {
            error!("{}", violation);
        }
        return Err(GenesisError::Validation(violations));
    }

    let total: u64 = accounts.iter().map(|a| a.amount).sum();
    info!(
        accounts = accounts.len(),
        total = %format_minor_units(total),
        "Supply and uniqueness checks passed"
    );
    Ok(())
}
