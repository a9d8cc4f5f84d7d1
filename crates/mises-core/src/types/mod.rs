pub mod account;
pub mod contribution;
pub mod multisig;

pub use account::GenesisAccount;
pub use contribution::{AggregatedBalance, BalanceAlloc, ContributionRecord};
pub use multisig::MultisigDescriptor;
