use thiserror::Error;

/// A violated genesis invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("expected {expected} umis, got {actual} umis allocated in genesis")]
    SupplyMismatch { expected: u128, actual: u128 },

    #[error("expected {expected} addresses, got {actual} addresses allocated in genesis")]
    AccountCountMismatch { expected: usize, actual: usize },

    #[error("duplicate address {0}")]
    DuplicateAddress(String),
}

#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("Non positive amount for address {address}: {amount}")]
    NonPositiveAmount { address: String, amount: f64 },

    #[error("Computed multisig address {computed} does not match given address {claimed}")]
    AddressMismatch { computed: String, claimed: String },

    #[error("Invalid multisig threshold {threshold} for {members} member keys")]
    InvalidThreshold { threshold: u32, members: usize },

    #[error("Genesis validation failed: {}", join_violations(.0))]
    Validation(Vec<ValidationError>),

    #[error("Cannot add account at existing address {0}")]
    ExistingAccount(String),

    #[error("Malformed genesis template: {0}")]
    Template(String),

    #[error("Failed to load {path}: {reason}")]
    Load { path: String, reason: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Core error: {0}")]
    Core(#[from] mises_core::CoreError),
}

impl GenesisError {
    pub(crate) fn load(path: impl std::fmt::Display, reason: impl ToString) -> Self {
        GenesisError::Load {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        GenesisError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

fn join_violations(violations: &[ValidationError]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
