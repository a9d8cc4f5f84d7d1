use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Mises genesis construction tool
#[derive(Parser)]
#[command(name = "mises-genesis")]
#[command(about = "Build and verify the Mises genesis account state")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate allocations, validate them and write the genesis file
    Build {
        /// Path to configuration file
        #[arg(short, long, default_value = "genesis-config.json")]
        config: PathBuf,

        /// Stop after validation and print the account table
        #[arg(long, default_value = "false")]
        dry_run: bool,
    },

    /// Check a multisig descriptor against its member keys
    VerifyMultisig {
        /// Descriptor JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Derive the address of a k-of-n multisig key
    MultisigAddress {
        /// Number of required signatures
        #[arg(short, long)]
        threshold: u32,

        /// Member public key (misespub bech32), repeatable
        #[arg(short, long = "pubkey", required = true)]
        pubkeys: Vec<String>,
    },

    /// Write a sample configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "genesis-config.json")]
        output: PathBuf,
    },

    /// Generate a new keypair
    Keygen {
        /// Output file for secret key
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
