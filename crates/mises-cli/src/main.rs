use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;
mod config;
mod pipeline;

use cli::{Cli, Commands};
use config::{generate_sample_config, GenesisConfig};
use mises_core::{KeyPair, MultisigDescriptor};
use mises_genesis::{decode_members, derive_multisig_address, load_multisig, verify_multisig};

fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { config, dry_run } => {
            build_genesis(config, dry_run)?;
        }
        Commands::VerifyMultisig { file } => {
            let descriptor = load_multisig(&file)?;
            check_multisig(&descriptor)?;
        }
        Commands::MultisigAddress { threshold, pubkeys } => {
            let members = decode_members(&pubkeys)?;
            let address = derive_multisig_address(threshold, &members)?;
            println!("{}", address);
        }
        Commands::Init { output } => {
            init_config(output)?;
        }
        Commands::Keygen { output } => {
            generate_keypair(output)?;
        }
    }

    Ok(())
}

/// Build the genesis file from a configuration
fn build_genesis(config_path: PathBuf, dry_run: bool) -> Result<()> {
    info!("Loading configuration from {:?}", config_path);

    let config = if config_path.exists() {
        GenesisConfig::load(&config_path)?
    } else {
        error!(
            "Configuration file not found: {:?}. Run 'mises-genesis init' to create one.",
            config_path
        );
        return Err(anyhow::anyhow!("Configuration file not found"));
    };

    let (accounts, document) = pipeline::run(&config, dry_run)?;

    println!("-----------");
    println!("TOTAL addrs {}", accounts.len());
    println!("TOTAL supply {} (whole units)", config.total_supply);

    if let Some(document) = document {
        let gentxs = document["app_state"]["genutil"]["gen_txs"]
            .as_array()
            .map_or(0, Vec::len);
        println!("TOTAL gen txs {}", gentxs);
        println!("\nGenesis file written: {}", config.output.display());
    } else {
        println!("-----------");
        print!("{}", pipeline::render_accounts(&accounts, &config.denom));
        println!("\nDry run: no genesis file written.");
    }

    Ok(())
}

fn check_multisig(descriptor: &MultisigDescriptor) -> Result<()> {
    match verify_multisig(descriptor) {
        Ok(address) => {
            println!("Multisig address verified: {}", address);
            Ok(())
        }
        Err(e) => {
            error!("Multisig verification failed: {}", e);
            Err(e.into())
        }
    }
}

/// Initialize a new configuration file
fn init_config(output: PathBuf) -> Result<()> {
    info!("Generating sample configuration");

    let (config, governance) = generate_sample_config();
    config.save(&output)?;

    let members: Vec<_> = governance.iter().map(|kp| kp.public).collect();
    let multisig = derive_multisig_address(2, &members)?;

    info!("Configuration saved to {:?}", output);
    println!("\nConfiguration file created: {}", output.display());
    println!("\nSample 2-of-3 governance keys:");
    for kp in &governance {
        println!("  Public key:  {}", kp.public.to_bech32()?);
        println!("  Secret key:  {}", kp.secret.to_hex());
    }
    println!("  Multisig address: {}", multisig);
    println!("\nEdit the file and the referenced allocation files, then run:");
    println!("  mises-genesis build --config {}", output.display());

    Ok(())
}

/// Generate a new keypair
fn generate_keypair(output: Option<PathBuf>) -> Result<()> {
    let keypair = KeyPair::generate();

    println!("Generated new keypair:");
    println!("  Public key:  {}", keypair.public.to_bech32()?);
    println!("  Address:     {}", keypair.public.address()?);
    println!("  Secret key:  {}", keypair.secret.to_hex());

    if let Some(path) = output {
        std::fs::write(&path, keypair.secret.to_hex())?;
        info!("Secret key saved to {:?}", path);
    }

    println!("\nWARNING: Keep your secret key safe! Do not share it with anyone.");

    Ok(())
}
