//! Mises Genesis - Allocation aggregation and genesis account validation
//!
//! Merges allocation sources into one account set, checks it against the
//! network's supply invariants, verifies multisig governance addresses and
//! assembles the final genesis document.

pub mod aggregator;
pub mod assembler;
pub mod builder;
pub mod error;
pub mod loader;
pub mod multisig;
pub mod validator;

pub use aggregator::{aggregate, aggregate_into, sum_balances, SourceSummary};
pub use assembler::GenesisAssembler;
pub use builder::build_accounts;
pub use error::{GenesisError, ValidationError};
pub use loader::{load_gentxs, load_multisig, load_source, parse_source, SourceFormat};
pub use multisig::{decode_members, derive_multisig_address, sort_members, verify_multisig};
pub use validator::{find_violations, validate, GenesisParams};

use mises_core::{ContributionRecord, GenesisAccount};
use tracing::info;

/// Aggregate, build and validate in one pass.
///
/// Returns the ordered account list ready for the assembler, or the first
/// fatal error. Nothing is returned on partial success.
pub fn prepare_accounts(
    sources: &[Vec<ContributionRecord>],
    params: &GenesisParams,
) -> Result<Vec<GenesisAccount>, GenesisError> {
    let balances = aggregate(sources)?;
    info!(
        addresses = balances.len(),
        total = %sum_balances(&balances),
        "Aggregated allocation sources"
    );

    let accounts = build_accounts(&balances)?;
    validate(&accounts, params)?;

    info!(accounts = accounts.len(), "Genesis accounts validated");
    Ok(accounts)
}
