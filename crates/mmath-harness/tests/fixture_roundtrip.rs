// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use clap::Parser;
use mmath_harness::cli::{enforce, execute, resolve_config, Cli};
use mmath_harness::config::{
    ConfigService, ConfigStore, FsConfigStore, HarnessConfig, MemoryConfigStore,
};
use mmath_harness::{
    CaseSet, Fixture, FixtureError, InputSet, KernelOracle, Operation, ReferenceOracle,
    Tolerance,
};

fn small_cases() -> CaseSet {
    let config = HarnessConfig {
        samples: 12,
        ..HarnessConfig::default()
    };
    CaseSet::from_inputs(&InputSet::generate(&config)).expect("cases")
}

#[test]
fn reference_fixture_checks_clean_against_kernel() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("reference.json");

    let recorded = Fixture::record(&ReferenceOracle, &small_cases()).expect("record");
    recorded.save(&path).expect("save");
    let loaded = Fixture::load(&path).expect("load");
    assert_eq!(loaded.len(), recorded.len());
    assert_eq!(loaded.operations().count(), Operation::ALL.len());

    let report = loaded.check(&KernelOracle, Tolerance::default()).expect("check");
    assert!(report.passed(), "{:?}", report.discrepancies.first());
}

#[test]
fn kernel_fixture_replays_exactly() {
    let recorded = Fixture::record(&KernelOracle, &small_cases()).expect("record");
    let json = recorded.to_json_string().expect("json");
    let loaded = Fixture::from_json_str(&json).expect("parse");
    assert_eq!(loaded, recorded);
    let exact = Tolerance {
        absolute: 0.0,
        relative: 0.0,
    };
    let report = loaded.check(&KernelOracle, exact).expect("check");
    assert!(report.passed());
    assert!(report.summaries.values().all(|s| s.worst_mae == 0.0));
}

#[test]
fn tampered_fixture_is_reported_not_rejected() {
    let recorded = Fixture::record(&ReferenceOracle, &small_cases()).expect("record");
    let json = recorded.to_json_string().expect("json");
    let mut doc: serde_json::Value = serde_json::from_str(&json).expect("value");
    doc["Mat44Translate"][0][1][12] = serde_json::json!(12345.0);
    let tampered = Fixture::from_json_str(&doc.to_string()).expect("still well-formed");

    let report = tampered.check(&KernelOracle, Tolerance::default()).expect("check");
    assert_eq!(report.discrepancies.len(), 1);
    assert_eq!(report.discrepancies[0].op, Operation::Mat44Translate);
    assert_eq!(report.discrepancies[0].case, 0);
}

#[test]
fn wrong_input_arity_is_rejected_on_load() {
    let json = r#"{ "Mat44Rotate": [[[0.1, 0.2, 0.3], [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1]]] }"#;
    match Fixture::from_json_str(json) {
        Err(FixtureError::ArityMismatch {
            expected, found, ..
        }) => assert_eq!((expected, found), (4, 3)),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn config_round_trips_through_both_stores() {
    let custom = HarnessConfig {
        samples: 3,
        fail_on_mismatch: false,
        ..HarnessConfig::default()
    };

    let memory = ConfigService::new(MemoryConfigStore::default());
    memory.save(HarnessConfig::KEY, &custom).expect("save");
    assert_eq!(HarnessConfig::load_or_default(&memory).expect("load"), custom);

    let dir = tempfile::tempdir().expect("tempdir");
    let fs = ConfigService::new(FsConfigStore::at(dir.path()).expect("store"));
    assert_eq!(
        HarnessConfig::load_or_default(&fs).expect("defaults"),
        HarnessConfig::default()
    );
    fs.save(HarnessConfig::KEY, &custom).expect("save");

    let reopened = FsConfigStore::at(dir.path()).expect("store");
    assert!(reopened.path_for(HarnessConfig::KEY).exists());
    assert!(!reopened.load_raw(HarnessConfig::KEY).expect("raw").is_empty());
    let fs = ConfigService::new(reopened);
    assert_eq!(HarnessConfig::load_or_default(&fs).expect("load"), custom);
}

#[test]
fn cli_records_and_checks_a_fixture() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("harness.json");
    let fixture_path = dir.path().join("fixture.json");
    let stored = HarnessConfig {
        samples: 4,
        ..HarnessConfig::default()
    };
    stored.save_file(&config_path).expect("config");

    let config_arg = config_path.to_str().expect("utf-8 path");
    let fixture_arg = fixture_path.to_str().expect("utf-8 path");

    let record = Cli::try_parse_from([
        "mmath-harness",
        "--config",
        config_arg,
        "--op",
        "Mat44Delta",
        "--op",
        "Mat44ToEuler",
        "record",
        "--out",
        fixture_arg,
    ])
    .expect("args");
    let config = resolve_config(&record).expect("config");
    assert_eq!(config.samples, 4);
    assert!(execute(&record, &config).expect("record").is_none());

    let recorded = Fixture::load(&fixture_path).expect("fixture");
    let ops: Vec<_> = recorded.operations().collect();
    assert_eq!(ops, [Operation::Mat44Delta, Operation::Mat44ToEuler]);
    assert_eq!(recorded.len(), 8);

    let check = Cli::try_parse_from([
        "mmath-harness",
        "--config",
        config_arg,
        "--samples",
        "2",
        "check",
        fixture_arg,
    ])
    .expect("args");
    let config = resolve_config(&check).expect("config");
    assert_eq!(config.samples, 2);
    let report = execute(&check, &config).expect("check").expect("report");
    assert_eq!(report.cases(), 8);
    enforce(&report, &config).expect("clean");
}

#[test]
fn cli_rejects_unknown_operations() {
    let cli = Cli::try_parse_from(["mmath-harness", "--no-fail", "--op", "Mat44Bogus", "run"])
        .expect("args");
    let config = HarnessConfig {
        samples: 1,
        fail_on_mismatch: false,
        ..HarnessConfig::default()
    };
    let err = execute(&cli, &config).expect_err("unknown op");
    assert!(err.to_string().contains("Mat44Bogus"), "{err}");
}
