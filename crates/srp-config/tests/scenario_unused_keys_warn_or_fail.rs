use srp_config::{load_layered_yaml_from_strings, report_unused_keys, UnusedKeyPolicy};

/// scenario_unused_keys_warn_or_fail
///
/// Validates:
/// 1) Unused keys are detected in WARN mode but do not error.
/// 2) Unused keys cause failure in FAIL mode.
/// 3) Every key the typed settings read is covered by the registry.
/// 4) Deterministic ordering of unused pointers.

#[test]
fn warn_mode_reports_misspelled_key_without_error() {
    let yaml = r#"
validation:
  recent_windw: 4
"#;
    let loaded = load_layered_yaml_from_strings(&[yaml]).expect("config load must succeed");

    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)
        .expect("warn mode must not error");

    assert!(!report.is_clean());
    assert_eq!(
        report.unused_leaf_pointers,
        vec!["/validation/recent_windw".to_string()]
    );
}

#[test]
fn fail_mode_errors_on_unused_keys() {
    let yaml = r#"
unused_section:
  foo: 1
"#;
    let loaded = load_layered_yaml_from_strings(&[yaml]).expect("config load must succeed");

    let err = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail)
        .expect_err("fail policy must error when unused keys exist");
    assert!(err.to_string().contains("CONFIG_UNUSED_KEYS"));
}

#[test]
fn full_config_is_clean() {
    let yaml = r#"
source:
  event_api: "https://raidres.top/api/events"
  raid_data_url: "https://raidres.top/raids"
  page_url: "https://raidres.top/res"
  timeout_secs: 20
validation:
  recent_window: 3
  ambiguous_counter: 2
"#;
    let loaded = load_layered_yaml_from_strings(&[yaml]).expect("config load must succeed");

    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail)
        .expect("every settings key must be in the consumed registry");
    assert!(report.is_clean());
    loaded.settings().expect("full config must parse");
}

#[test]
fn deterministic_unused_pointer_ordering() {
    let yaml = r#"
unused:
  b: 2
  a: 1
"#;
    let loaded = load_layered_yaml_from_strings(&[yaml]).expect("config load must succeed");

    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)
        .expect("warn mode must not error");

    assert_eq!(
        report.unused_leaf_pointers,
        vec!["/unused/a".to_string(), "/unused/b".to_string()]
    );
}
