use anyhow::Result;
use mises_core::{format_minor_units, ContributionRecord, GenesisAccount};
use mises_genesis::{
    load_gentxs, load_multisig, load_source, prepare_accounts, verify_multisig, GenesisAssembler,
};
use serde_json::Value;
use tracing::info;

use crate::config::GenesisConfig;

/// Load every configured source, plus the verified multisig allocation
pub fn collect_sources(config: &GenesisConfig) -> Result<Vec<Vec<ContributionRecord>>> {
    let mut sources = Vec::with_capacity(config.sources.len() + 1);
    for source in &config.sources {
        sources.push(load_source(&source.path, source.format)?);
    }

    if let Some(path) = &config.multisig {
        let descriptor = load_multisig(path)?;
        let address = verify_multisig(&descriptor)?;
        if descriptor.amount != 0.0 {
            info!(address = %address, amount = descriptor.amount, "Funding verified multisig");
            sources.push(vec![
                ContributionRecord::new(address.to_string(), descriptor.amount).with_memo("multisig"),
            ]);
        }
    }

    Ok(sources)
}

/// Run the whole construction. Returns the accounts and, unless `dry_run`,
/// the document that was written to `config.output`.
pub fn run(config: &GenesisConfig, dry_run: bool) -> Result<(Vec<GenesisAccount>, Option<Value>)> {
    let sources = collect_sources(config)?;
    let accounts = prepare_accounts(&sources, &config.params())?;

    if dry_run {
        return Ok((accounts, None));
    }

    let gentxs = load_gentxs(&config.gentx_dir)?;
    let mut assembler =
        GenesisAssembler::from_template_file(&config.template, config.genesis_time()?, &config.denom)?;
    if let Some(chain_id) = &config.chain_id {
        assembler = assembler.with_chain_id(chain_id);
    }

    let document = assembler.assemble(&accounts, gentxs)?;
    GenesisAssembler::write(&document, &config.output)?;
    Ok((accounts, Some(document)))
}

/// Human-readable account table
pub fn render_accounts(accounts: &[GenesisAccount], denom: &str) -> String {
    let mut out = String::new();
    for account in accounts {
        out.push_str(&format!(
            "{}  {} {}\n",
            account.address,
            format_minor_units(account.amount),
            denom
        ));
    }
    out
}
