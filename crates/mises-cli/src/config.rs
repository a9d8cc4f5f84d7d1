use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use mises_core::{KeyPair, NATIVE_DENOM};
use mises_genesis::{GenesisParams, SourceFormat};
use serde::{Deserialize, Serialize};

/// Genesis construction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Chain ID written into the document, if the template's should be replaced
    #[serde(default)]
    pub chain_id: Option<String>,

    /// Minor-unit denomination of the native asset
    pub denom: String,

    /// Total minted supply in whole units
    pub total_supply: f64,

    /// Exact number of genesis accounts
    pub expected_accounts: usize,

    /// Genesis time (RFC 3339)
    pub genesis_time: String,

    /// Allocation sources, aggregated in this order
    pub sources: Vec<SourceConfig>,

    /// Multisig governance descriptor, funded once verified
    #[serde(default)]
    pub multisig: Option<PathBuf>,

    /// Genesis document template
    pub template: PathBuf,

    /// Directory of pre-signed genesis transactions
    pub gentx_dir: PathBuf,

    /// Output genesis file
    pub output: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub format: SourceFormat,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        GenesisConfig {
            chain_id: None,
            denom: NATIVE_DENOM.to_string(),
            total_supply: 100_000_000.0,
            expected_accounts: 11,
            genesis_time: "2022-03-21T23:00:00Z".to_string(),
            sources: vec![SourceConfig {
                path: PathBuf::from("accounts/singlesig.json"),
                format: SourceFormat::Bech32Object,
            }],
            multisig: None,
            template: PathBuf::from("params/genesis_template.json"),
            gentx_dir: PathBuf::from("gentx"),
            output: PathBuf::from("genesis.json"),
        }
    }
}

impl GenesisConfig {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration {}", path.display()))?;
        let config: GenesisConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn params(&self) -> GenesisParams {
        GenesisParams {
            total_supply: self.total_supply,
            expected_accounts: self.expected_accounts,
        }
    }

    pub fn genesis_time(&self) -> Result<DateTime<Utc>> {
        let parsed = DateTime::parse_from_rfc3339(&self.genesis_time)
            .with_context(|| format!("invalid genesis_time {:?}", self.genesis_time))?;
        Ok(parsed.with_timezone(&Utc))
    }
}

/// Generate a sample configuration and the governance keys it refers to
pub fn generate_sample_config() -> (GenesisConfig, Vec<KeyPair>) {
    let governance: Vec<KeyPair> = (0..3).map(|_| KeyPair::generate()).collect();

    let config = GenesisConfig {
        chain_id: Some("mainnet".to_string()),
        sources: vec![
            SourceConfig {
                path: PathBuf::from("accounts/singlesig.json"),
                format: SourceFormat::Bech32Object,
            },
            SourceConfig {
                path: PathBuf::from("accounts/fundraiser.json"),
                format: SourceFormat::HexObject,
            },
            SourceConfig {
                path: PathBuf::from("accounts/list.json"),
                format: SourceFormat::FlatList,
            },
        ],
        multisig: Some(PathBuf::from("accounts/multisig.json")),
        ..GenesisConfig::default()
    };

    (config, governance)
}
