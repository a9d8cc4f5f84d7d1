use mises_core::{AggregatedBalance, Amount, ContributionRecord, CoreError};
use tracing::{debug, warn};

use crate::error::GenesisError;

/// What a single source contributed to the running aggregate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceSummary {
    /// Sum of this source's amounts
    pub total: Amount,
    /// Addresses that were already present and got consolidated
    pub duplicates: Vec<String>,
}

/// Accumulate one source into `sum`.
///
/// A repeated address adds to its balance and is reported as a duplicate.
/// Any amount that is not strictly positive aborts with
/// `NonPositiveAmount`; `sum` may then hold part of the source, so callers
/// that need all-or-nothing should accumulate into a scratch map.
pub fn aggregate_into(
    sum: &mut AggregatedBalance,
    source: &[ContributionRecord],
) -> Result<SourceSummary, GenesisError> {
    let mut summary = SourceSummary::default();

    for record in source {
        // Also rejects NaN
        if !(record.amount > 0.0) {
            return Err(GenesisError::NonPositiveAmount {
                address: record.address.clone(),
                amount: record.amount,
            });
        }
        let amount = Amount::from_units(record.amount)?;

        if sum.contains_key(&record.address) {
            warn!(address = %record.address, "Duplicate address, consolidating");
            summary.duplicates.push(record.address.clone());
        }

        debug!(address = %record.address, %amount, "Accumulating allocation");
        let balance = sum.entry(record.address.clone()).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or(CoreError::AmountOutOfRange(record.amount))?;
        summary.total = summary.total.saturating_add(amount);
    }

    Ok(summary)
}

/// Merge every source, in order, into a fresh mapping
pub fn aggregate(sources: &[Vec<ContributionRecord>]) -> Result<AggregatedBalance, GenesisError> {
    let mut balances = AggregatedBalance::new();
    for (index, source) in sources.iter().enumerate() {
        let summary = aggregate_into(&mut balances, source)?;
        debug!(
            source = index,
            records = source.len(),
            total = %summary.total,
            duplicates = summary.duplicates.len(),
            "Source aggregated"
        );
    }
    Ok(balances)
}

/// Total of all aggregated amounts
pub fn sum_balances(balances: &AggregatedBalance) -> Amount {
    balances
        .values()
        .fold(Amount::ZERO, |total, amount| total.saturating_add(*amount))
}
