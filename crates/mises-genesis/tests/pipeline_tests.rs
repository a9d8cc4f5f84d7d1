//! End-to-end genesis construction tests

use std::fs;

use chrono::{TimeZone, Utc};
use mises_core::{Address, ContributionRecord, KeyPair, MultisigDescriptor, PublicKey};
use mises_genesis::{
    aggregate, build_accounts, derive_multisig_address, load_gentxs, load_source, prepare_accounts,
    verify_multisig, GenesisAssembler, GenesisError, GenesisParams, SourceFormat, ValidationError,
};
use serde_json::json;

fn key(seed: u8) -> PublicKey {
    KeyPair::from_secret_bytes(&[seed; 32]).public
}

fn address(seed: u8) -> String {
    Address::from_bytes(&[seed; 20]).unwrap().to_string()
}

/// Eleven allocations split over three overlapping sources, totalling
/// 100,000,000 units
fn mainnet_sources() -> Vec<Vec<ContributionRecord>> {
    let team: Vec<_> = (0..5)
        .map(|i| ContributionRecord::new(address(i), 10_000_000.0).with_memo("team"))
        .collect();
    let investors: Vec<_> = (5..11)
        .map(|i| ContributionRecord::new(address(i), 7_500_000.0))
        .collect();
    // Tops up two addresses already present above
    let foundation = vec![
        ContributionRecord::new(address(0), 2_499_999.75),
        ContributionRecord::new(address(7), 2_500_000.25),
    ];
    vec![team, investors, foundation]
}

#[test]
fn test_known_answer_vectors() {
    let p1 = key(1);
    assert_eq!(
        p1.to_hex(),
        "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c"
    );
    assert_eq!(
        p1.to_bech32().unwrap(),
        "misespub1zcjduepq32yw8ht5p8cetl2jmvknewjawt9xwzdlrk2pyxlnwjyqrdq0dawqatu5yp"
    );
    assert_eq!(
        p1.address().unwrap().as_str(),
        "mises1x36slx9at870e9rd53d2405n80s4ff94328ffh"
    );
    assert_eq!(
        Address::from_bytes(&[0u8; 20]).unwrap().as_str(),
        "mises1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqunwlz3"
    );

    let multisig = derive_multisig_address(2, &[key(3), key(1), key(2)]).unwrap();
    assert_eq!(multisig.as_str(), "mises1pjgtg3l8rftv8t9femslz9l7qgmu6mmlc29cwk");
}

const SECP256K1_MEMBERS: [&str; 3] = [
    "misespub1addwnpepqvdcf32k0vfxgsyet5ldt246q4jaw8scx3sysx0lnstlt6w4m5rc7a7vw2p",
    "misespub1addwnpepqfx5kmx3xcgr9j5m62htnkgq4fx5tk02mq9vjs3nwnz9rfe9f5rkv2a4ckw",
    "misespub1addwnpepqff3lesxsy69q0f8yvfnyf7gv7kglfkg83fhaxjyc0zmm0wtrl3nwey0xzy",
];

#[test]
fn test_secp256k1_governance_vector() {
    let descriptor = MultisigDescriptor {
        claimed_address: "mises10522r7w8h7s4pwu0sp7lxthcmjatdxcn4vkhjx".to_string(),
        threshold: 2,
        pubkeys: vec![
            SECP256K1_MEMBERS[2].to_string(),
            SECP256K1_MEMBERS[0].to_string(),
            SECP256K1_MEMBERS[1].to_string(),
        ],
        amount: 0.0,
    };
    let verified = verify_multisig(&descriptor).unwrap();
    assert_eq!(verified.as_str(), "mises10522r7w8h7s4pwu0sp7lxthcmjatdxcn4vkhjx");

    let member = PublicKey::from_bech32(SECP256K1_MEMBERS[1]).unwrap();
    assert_eq!(
        member.address().unwrap().as_str(),
        "mises1a0qwuze2h85zw7nqpsj3ga0z9geyrgwpc0fjlz"
    );
}

#[test]
fn test_mixed_key_types_vector() {
    let secp = PublicKey::from_bech32(SECP256K1_MEMBERS[1]).unwrap();
    let derived = derive_multisig_address(1, &[secp, key(1)]).unwrap();
    assert_eq!(derived.as_str(), "mises1upaqzwmsynxdgx4xd3msc5vtujr8a55shsq2mq");
}

#[test]
fn test_mainnet_allocation_validates() {
    let accounts = prepare_accounts(&mainnet_sources(), &GenesisParams::default()).unwrap();

    assert_eq!(accounts.len(), 11);
    let total: u64 = accounts.iter().map(|a| a.amount).sum();
    assert_eq!(total, 100_000_000_000_000);

    let first = accounts
        .iter()
        .find(|a| a.address.as_str() == address(0))
        .unwrap();
    assert_eq!(first.amount, 12_499_999_750_000);

    for pair in accounts.windows(2) {
        assert!(pair[0].address.as_str() < pair[1].address.as_str());
    }
}

#[test]
fn test_reruns_are_identical() {
    let params = GenesisParams::default();
    let first = prepare_accounts(&mainnet_sources(), &params).unwrap();

    let mut reversed = mainnet_sources();
    reversed.reverse();
    let second = prepare_accounts(&reversed, &params).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_supply_shortfall_reports_both_totals() {
    let mut sources = mainnet_sources();
    sources[2][1].amount -= 0.01;

    match prepare_accounts(&sources, &GenesisParams::default()) {
        Err(GenesisError::Validation(violations)) => assert_eq!(
            violations,
            vec![ValidationError::SupplyMismatch {
                expected: 100_000_000_000_000,
                actual: 99_999_999_990_000,
            }]
        ),
        other => panic!("expected supply mismatch, got {other:?}"),
    }
}

#[test]
fn test_case_variant_duplicates_caught_by_validator() {
    let mut sources = mainnet_sources();
    // Same account as address(3), written in upper case, carved out of its balance
    sources[0][3].amount -= 1.0;
    sources.push(vec![ContributionRecord::new(address(3).to_uppercase(), 1.0)]);

    let balances = aggregate(&sources).unwrap();
    assert_eq!(balances.len(), 12);
    assert_eq!(build_accounts(&balances).unwrap().len(), 12);

    match prepare_accounts(&sources, &GenesisParams::default()) {
        Err(GenesisError::Validation(violations)) => {
            assert!(violations.contains(&ValidationError::DuplicateAddress(address(3))));
            assert!(violations.contains(&ValidationError::AccountCountMismatch {
                expected: 11,
                actual: 12,
            }));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn test_non_positive_amount_aborts_run() {
    let mut sources = mainnet_sources();
    sources[1].push(ContributionRecord::new(address(42), -5.0));

    assert!(matches!(
        prepare_accounts(&sources, &GenesisParams::default()),
        Err(GenesisError::NonPositiveAmount { amount, .. }) if amount == -5.0
    ));
}

#[test]
fn test_verified_multisig_funds_governance_account() {
    let keys = [key(10), key(11), key(12), key(13)];
    let claimed = derive_multisig_address(3, &keys).unwrap();
    let descriptor = MultisigDescriptor {
        claimed_address: claimed.to_string(),
        threshold: 3,
        pubkeys: vec![
            keys[2].to_bech32().unwrap(),
            keys[0].to_bech32().unwrap(),
            keys[3].to_bech32().unwrap(),
            keys[1].to_bech32().unwrap(),
        ],
        amount: 1_000_000.0,
    };

    let verified = verify_multisig(&descriptor).unwrap();

    let mut sources = mainnet_sources();
    sources[1][0].amount -= descriptor.amount;
    sources.push(vec![
        ContributionRecord::new(verified.to_string(), descriptor.amount).with_memo("multisig"),
    ]);

    let params = GenesisParams {
        expected_accounts: 12,
        ..GenesisParams::default()
    };
    let accounts = prepare_accounts(&sources, &params).unwrap();
    assert!(accounts.iter().any(|a| a.address == verified && a.amount == 1_000_000_000_000));
}

#[test]
fn test_files_to_genesis_document() {
    let dir = tempfile::tempdir().unwrap();

    let singlesig = dir.path().join("singlesig.json");
    let mut object = serde_json::Map::new();
    for i in 0..10u8 {
        object.insert(address(i), json!({ "amt": 9_000_000, "memo": format!("alloc {i}") }));
    }
    fs::write(&singlesig, serde_json::to_string(&object).unwrap()).unwrap();

    let flat = dir.path().join("extra.json");
    fs::write(
        &flat,
        serde_json::to_string(&json!([address(10), 6_000_000, address(10), 4_000_000])).unwrap(),
    )
    .unwrap();

    let gentx_dir = dir.path().join("gentx");
    fs::create_dir(&gentx_dir).unwrap();
    fs::write(gentx_dir.join("README.md"), "drop gentxs here").unwrap();
    fs::write(gentx_dir.join("validator-1.json"), r#"{"body": {"messages": []}}"#).unwrap();

    let sources = vec![
        load_source(&singlesig, SourceFormat::Bech32Object).unwrap(),
        load_source(&flat, SourceFormat::FlatList).unwrap(),
    ];
    let accounts = prepare_accounts(&sources, &GenesisParams::default()).unwrap();

    let genesis_time = Utc.with_ymd_and_hms(2022, 3, 21, 23, 0, 0).unwrap();
    let template = json!({ "chain_id": "mainnet", "app_state": {} });
    let doc = GenesisAssembler::new(template, genesis_time, "umis")
        .assemble(&accounts, load_gentxs(&gentx_dir).unwrap())
        .unwrap();

    let out = dir.path().join("genesis.json");
    GenesisAssembler::write(&doc, &out).unwrap();

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["app_state"]["bank"]["supply"][0]["amount"], "100000000000000");
    assert_eq!(written["app_state"]["auth"]["accounts"].as_array().unwrap().len(), 11);
    assert_eq!(written["app_state"]["genutil"]["gen_txs"].as_array().unwrap().len(), 1);
}
