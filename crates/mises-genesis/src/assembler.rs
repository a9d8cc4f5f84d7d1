use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use mises_core::{serialize, GenesisAccount};
use serde_json::{json, Map, Value};
use tracing::info;

use crate::error::GenesisError;

const BASE_ACCOUNT_TYPE: &str = "/cosmos.auth.v1beta1.BaseAccount";

/// Injects validated accounts and genesis transactions into a genesis
/// document template.
#[derive(Debug, Clone)]
pub struct GenesisAssembler {
    template: Value,
    genesis_time: DateTime<Utc>,
    denom: String,
    chain_id: Option<String>,
}

impl GenesisAssembler {
    pub fn new(template: Value, genesis_time: DateTime<Utc>, denom: impl Into<String>) -> Self {
        GenesisAssembler {
            template,
            genesis_time,
            denom: denom.into(),
            chain_id: None,
        }
    }

    /// Load the template document from disk
    pub fn from_template_file(
        path: &Path,
        genesis_time: DateTime<Utc>,
        denom: impl Into<String>,
    ) -> Result<Self, GenesisError> {
        let bytes = fs::read(path).map_err(|e| GenesisError::io(path, e))?;
        let template: Value =
            serialize::from_json_bytes(&bytes).map_err(|e| GenesisError::load(path.display(), e))?;
        Ok(Self::new(template, genesis_time, denom))
    }

    /// Override the template's chain id
    pub fn with_chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = Some(chain_id.into());
        self
    }

    /// Build the complete genesis document. The template is left untouched.
    pub fn assemble(&self, accounts: &[GenesisAccount], gentxs: Vec<Value>) -> Result<Value, GenesisError> {
        let mut doc = self.template.clone();
        let root = as_object(&mut doc, "document")?;

        root.insert(
            "genesis_time".to_string(),
            Value::String(self.genesis_time.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        if let Some(chain_id) = &self.chain_id {
            root.insert("chain_id".to_string(), Value::String(chain_id.clone()));
        }

        let app_state = child_object(root, "app_state")?;

        {
            let auth_accounts = child_array(child_object(app_state, "auth")?, "accounts")?;
            for account in accounts {
                let address = account.address.as_str();
                let exists = auth_accounts
                    .iter()
                    .any(|existing| existing.get("address").and_then(Value::as_str) == Some(address));
                if exists {
                    return Err(GenesisError::ExistingAccount(address.to_string()));
                }
                auth_accounts.push(json!({
                    "@type": BASE_ACCOUNT_TYPE,
                    "address": address,
                    "pub_key": null,
                    "account_number": account.account_number.to_string(),
                    "sequence": account.sequence.to_string(),
                }));
            }
        }

        {
            let bank = child_object(app_state, "bank")?;
            let balances = child_array(bank, "balances")?;
            for account in accounts {
                balances.push(json!({
                    "address": account.address.as_str(),
                    "coins": [{ "denom": self.denom, "amount": account.amount.to_string() }],
                }));
            }

            let minted: u128 = accounts.iter().map(|a| u128::from(a.amount)).sum();
            add_supply(child_array(bank, "supply")?, &self.denom, minted)?;
        }

        child_object(app_state, "genutil")?.insert("gen_txs".to_string(), Value::Array(gentxs));

        info!(accounts = accounts.len(), denom = %self.denom, "Genesis document assembled");
        Ok(doc)
    }

    /// Write the document. The file only appears once fully written.
    pub fn write(document: &Value, path: &Path) -> Result<(), GenesisError> {
        let content = serialize::to_json_pretty(document)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| GenesisError::io(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| GenesisError::io(path, e))?;
        info!(path = %path.display(), "Genesis document written");
        Ok(())
    }
}

fn as_object<'a>(value: &'a mut Value, name: &str) -> Result<&'a mut Map<String, Value>, GenesisError> {
    value
        .as_object_mut()
        .ok_or_else(|| GenesisError::Template(format!("{} is not an object", name)))
}

fn child_object<'a>(
    parent: &'a mut Map<String, Value>,
    key: &str,
) -> Result<&'a mut Map<String, Value>, GenesisError> {
    let entry = parent
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    as_object(entry, key)
}

fn child_array<'a>(parent: &'a mut Map<String, Value>, key: &str) -> Result<&'a mut Vec<Value>, GenesisError> {
    let entry = parent.entry(key.to_string()).or_insert_with(|| Value::Array(Vec::new()));
    if entry.is_null() {
        *entry = Value::Array(Vec::new());
    }
    entry
        .as_array_mut()
        .ok_or_else(|| GenesisError::Template(format!("{} is not an array", key)))
}

fn add_supply(supply: &mut Vec<Value>, denom: &str, amount: u128) -> Result<(), GenesisError> {
    for coin in supply.iter_mut() {
        if coin.get("denom").and_then(Value::as_str) != Some(denom) {
            continue;
        }
        let current: u128 = coin
            .get("amount")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| GenesisError::Template(format!("supply amount for {} is malformed", denom)))?;
        let total = current
            .checked_add(amount)
            .ok_or_else(|| GenesisError::Template(format!("supply of {} overflows", denom)))?;
        coin["amount"] = Value::String(total.to_string());
        return Ok(());
    }

    supply.push(json!({ "denom": denom, "amount": amount.to_string() }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mises_core::Address;

    fn genesis_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 3, 21, 23, 0, 0).unwrap()
    }

    fn account(seed: u8, amount: u64) -> GenesisAccount {
        GenesisAccount::new(Address::from_bytes(&[seed; 20]).unwrap(), amount)
    }

    fn template() -> Value {
        json!({
            "chain_id": "mainnet",
            "app_state": {
                "auth": { "params": {}, "accounts": [] },
                "bank": { "params": {}, "balances": [], "supply": [] },
                "genutil": { "gen_txs": [] }
            }
        })
    }

    #[test]
    fn test_assemble_document() {
        let assembler = GenesisAssembler::new(template(), genesis_time(), "umis");
        let accounts = vec![account(1, 2_000_000), account(2, 3_000_000)];
        let doc = assembler.assemble(&accounts, vec![json!({"body": {}})]).unwrap();

        assert_eq!(doc["genesis_time"], "2022-03-21T23:00:00Z");
        assert_eq!(doc["chain_id"], "mainnet");

        let auth = doc["app_state"]["auth"]["accounts"].as_array().unwrap();
        assert_eq!(auth.len(), 2);
        assert_eq!(auth[0]["address"], accounts[0].address.as_str());
        assert_eq!(auth[0]["@type"], BASE_ACCOUNT_TYPE);
        assert_eq!(auth[0]["sequence"], "0");

        let balances = doc["app_state"]["bank"]["balances"].as_array().unwrap();
        assert_eq!(balances[1]["coins"][0]["amount"], "3000000");
        assert_eq!(balances[1]["coins"][0]["denom"], "umis");

        assert_eq!(doc["app_state"]["bank"]["supply"][0]["amount"], "5000000");
        assert_eq!(doc["app_state"]["genutil"]["gen_txs"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_existing_account_rejected() {
        let existing = account(1, 1);
        let mut tpl = template();
        tpl["app_state"]["auth"]["accounts"] = json!([{ "address": existing.address.as_str() }]);

        let assembler = GenesisAssembler::new(tpl, genesis_time(), "umis");
        assert!(matches!(
            assembler.assemble(&[existing], Vec::new()),
            Err(GenesisError::ExistingAccount(_))
        ));
    }

    #[test]
    fn test_supply_added_to_existing_denom() {
        let mut tpl = template();
        tpl["app_state"]["bank"]["supply"] = json!([{ "denom": "umis", "amount": "10" }]);

        let assembler = GenesisAssembler::new(tpl, genesis_time(), "umis").with_chain_id("mainnet-2");
        let doc = assembler.assemble(&[account(3, 5)], Vec::new()).unwrap();

        assert_eq!(doc["app_state"]["bank"]["supply"][0]["amount"], "15");
        assert_eq!(doc["chain_id"], "mainnet-2");
    }

    #[test]
    fn test_missing_sections_are_created() {
        let assembler = GenesisAssembler::new(json!({}), genesis_time(), "umis");
        let doc = assembler.assemble(&[account(4, 7)], Vec::new()).unwrap();
        assert_eq!(doc["app_state"]["auth"]["accounts"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_template() {
        let assembler = GenesisAssembler::new(json!({ "app_state": [] }), genesis_time(), "umis");
        assert!(matches!(
            assembler.assemble(&[account(4, 7)], Vec::new()),
            Err(GenesisError::Template(_))
        ));
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genesis.json");
        let assembler = GenesisAssembler::new(template(), genesis_time(), "umis");
        let doc = assembler.assemble(&[account(5, 1)], Vec::new()).unwrap();

        GenesisAssembler::write(&doc, &path).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, doc);
        assert!(!path.with_extension("json.tmp").exists());
    }
}
