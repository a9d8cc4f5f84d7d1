use std::fmt;
use std::fs;
use std::path::Path;

use mises_core::{serialize, Address, BalanceAlloc, ContributionRecord, MultisigDescriptor};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::GenesisError;

/// Layout of an allocation source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// `{ "<bech32 address>": { "amt": n, "memo": "..." } }`
    #[default]
    Bech32Object,
    /// Same shape, keyed by hex-encoded address bytes
    HexObject,
    /// `["<address>", n, "<address>", n, ...]`
    FlatList,
}

/// Read and parse one allocation source
pub fn load_source(path: &Path, format: SourceFormat) -> Result<Vec<ContributionRecord>, GenesisError> {
    let bytes = fs::read(path).map_err(|e| GenesisError::io(path, e))?;
    let records = parse_source(&bytes, format, &path.display().to_string())?;
    info!(path = %path.display(), ?format, records = records.len(), "Loaded allocation source");
    Ok(records)
}

/// Parse allocation source bytes. `origin` names the source in errors.
pub fn parse_source(
    bytes: &[u8],
    format: SourceFormat,
    origin: &str,
) -> Result<Vec<ContributionRecord>, GenesisError> {
    match format {
        SourceFormat::Bech32Object => Ok(parse_object(bytes, origin)?
            .into_iter()
            .map(|(addr, alloc)| ContributionRecord::from_alloc(addr, alloc))
            .collect()),
        SourceFormat::HexObject => parse_object(bytes, origin)?
            .into_iter()
            .map(|(hex_addr, alloc)| {
                let address = Address::from_hex(&hex_addr)?;
                debug!(hex = %hex_addr, address = %address, "Converted hex address");
                Ok(ContributionRecord::from_alloc(address.to_string(), alloc))
            })
            .collect(),
        SourceFormat::FlatList => parse_flat_list(bytes, origin),
    }
}

/// Object entries in file order. A key written twice yields two entries so
/// the aggregator sums them instead of the parser keeping only the last.
struct AllocEntries(Vec<(String, BalanceAlloc)>);

impl<'de> Deserialize<'de> for AllocEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = AllocEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of address to allocation")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, BalanceAlloc>()? {
                    entries.push(entry);
                }
                Ok(AllocEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

fn parse_object(bytes: &[u8], origin: &str) -> Result<Vec<(String, BalanceAlloc)>, GenesisError> {
    let entries: AllocEntries = serialize::from_json_bytes(bytes).map_err(|e| GenesisError::load(origin, e))?;
    Ok(entries.0)
}

fn parse_flat_list(bytes: &[u8], origin: &str) -> Result<Vec<ContributionRecord>, GenesisError> {
    let items: Vec<Value> = serialize::from_json_bytes(bytes).map_err(|e| GenesisError::load(origin, e))?;

    if items.len() % 2 != 0 {
        return Err(GenesisError::load(origin, "list length is odd"));
    }

    items
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            let address = pair[0]
                .as_str()
                .ok_or_else(|| GenesisError::load(origin, format!("item {} is not an address string", 2 * i)))?;
            let amount = pair[1]
                .as_f64()
                .ok_or_else(|| GenesisError::load(origin, format!("item {} is not a number", 2 * i + 1)))?;
            Ok(ContributionRecord::new(address, amount))
        })
        .collect()
}

/// Read a multisig descriptor file
pub fn load_multisig(path: &Path) -> Result<MultisigDescriptor, GenesisError> {
    let bytes = fs::read(path).map_err(|e| GenesisError::io(path, e))?;
    serialize::from_json_bytes(&bytes).map_err(|e| GenesisError::load(path.display(), e))
}

/// Read every pre-signed genesis transaction in `dir`, in file name order.
/// The contents are passed through untouched.
pub fn load_gentxs(dir: &Path) -> Result<Vec<Value>, GenesisError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| GenesisError::io(dir, e))? {
        let entry = entry.map_err(|e| GenesisError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() || entry.file_name() == "README.md" {
            continue;
        }
        paths.push(path);
    }
    paths.sort();

    let mut gentxs = Vec::with_capacity(paths.len());
    for path in &paths {
        let bytes = fs::read(path).map_err(|e| GenesisError::io(path, e))?;
        let tx: Value = serialize::from_json_bytes(&bytes).map_err(|e| GenesisError::load(path.display(), e))?;
        gentxs.push(tx);
    }

    info!(dir = %dir.display(), count = gentxs.len(), "Loaded genesis transactions");
    Ok(gentxs)
}
