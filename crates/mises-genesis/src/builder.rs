use mises_core::{Address, AggregatedBalance, GenesisAccount};
use tracing::debug;

use crate::error::GenesisError;

/// Turn aggregated balances into genesis accounts, sorted by canonical
/// address string.
///
/// Two input strings that canonicalize to the same address both produce an
/// account here; the validator rejects the duplicate.
pub fn build_accounts(balances: &AggregatedBalance) -> Result<Vec<GenesisAccount>, GenesisError> {
    let mut accounts = Vec::with_capacity(balances.len());

    for (raw, amount) in balances {
        let address = Address::parse(raw)?;
        let minor = amount.to_minor_units()?;
        if minor == 0 {
            return Err(GenesisError::NonPositiveAmount {
                address: raw.clone(),
                amount: amount.to_f64(),
            });
        }

        debug!(address = %address, amount = minor, "Built genesis account");
        accounts.push(GenesisAccount::new(address, minor));
    }

    // Stable, so equal addresses keep their input order
    accounts.sort_by(|a, b| a.address.cmp(&b.address));
    Ok(accounts)
}
