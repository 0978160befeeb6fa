//! Integration tests for registry loading and validation

use std::fs;

use indoc::indoc;
use tempfile::TempDir;

use asomap::registry::{self, parse_document, validate, FormulaRegistry, RegistryFormat};

fn write_registry(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn empty_json_document_yields_the_default_formula_set() {
    let dir = TempDir::new().unwrap();
    let path = write_registry(&dir, "registry.json", "{}");
    let registry = registry::load(&path).unwrap();
    assert_eq!(registry, FormulaRegistry::default());
}

#[test]
fn yaml_overrides_merge_over_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_registry(
        &dir,
        "registry.yaml",
        indoc! {"
            version: 2.0.0
            changelog:
              - version: 2.0.0
                date: 2026-07-01
                note: tightened brand band
            brand:
              min_pct: 5.0
              max_pct: 12.0
              falloff_pct: 20.0
        "},
    );
    let registry = registry::load(&path).unwrap();
    assert_eq!(registry.version, "2.0.0");
    assert_eq!(registry.brand.min_pct, 5.0);
    assert_eq!(registry.brand.max_pct, 12.0);
    // Untouched sections keep their defaults.
    assert_eq!(registry.intent.min_presence, 2);
    assert_eq!(registry.anomaly.rules.len(), 11);
}

#[test]
fn toml_registry_loads() {
    let dir = TempDir::new().unwrap();
    let path = write_registry(
        &dir,
        "registry.toml",
        indoc! {r#"
            version = "1.5.0"

            [[changelog]]
            version = "1.5.0"
            date = "2026-08-01"
            note = "toml formula set"
        "#},
    );
    let registry = registry::load(&path).unwrap();
    assert_eq!(registry.version, "1.5.0");
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_registry(&dir, "registry.ini", "version=1.0.0");
    assert!(registry::load(&path).is_err());
}

#[test]
fn partial_weights_block_is_a_parse_error() {
    // A weights section must declare all seven dimensions or none.
    let contents = r#"{"weights": {"intent_coverage": 50.0}}"#;
    assert!(parse_document(contents, RegistryFormat::Json).is_err());
}

#[test]
fn malformed_documents_surface_as_parse_errors() {
    let err = parse_document("{not json", RegistryFormat::Json).unwrap_err();
    assert!(matches!(err, asomap::EngineError::Parse(_)));
}

#[test]
fn weights_that_do_not_sum_to_total_fail_validation() {
    let mut registry = FormulaRegistry::default();
    registry.weights.intent_coverage += 5.0;
    let violations = validate(&registry);
    assert!(violations.iter().any(|v| v.field.starts_with("weights")));
}

#[test]
fn load_rejects_invalid_registry_and_names_every_violation() {
    let dir = TempDir::new().unwrap();
    let path = write_registry(
        &dir,
        "registry.json",
        indoc! {r#"
            {
              "version": "not-semver",
              "brand": {"min_pct": 30.0, "max_pct": 10.0, "falloff_pct": 25.0}
            }
        "#},
    );
    let err = registry::load(&path).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("version"));
    assert!(message.contains("brand"));
}

#[test]
fn misordered_severity_bands_fail_validation() {
    let mut registry = FormulaRegistry::default();
    registry.severity_bands.moderate_min = 50.0;
    let violations = validate(&registry);
    assert!(!violations.is_empty());
}

#[test]
fn duplicate_dimension_in_order_fails_validation() {
    let mut registry = FormulaRegistry::default();
    registry.dimension_order[0] = registry.dimension_order[1];
    let violations = validate(&registry);
    assert!(violations
        .iter()
        .any(|v| v.field.starts_with("dimension_order")));
}

#[test]
fn changelog_head_must_match_the_registry_version() {
    let mut registry = FormulaRegistry::default();
    registry.version = "9.9.9".to_string();
    let violations = validate(&registry);
    assert!(violations.iter().any(|v| v.field.starts_with("changelog")));
}

#[test]
fn anomaly_rule_confidence_must_be_a_probability() {
    let mut registry = FormulaRegistry::default();
    registry.anomaly.rules[0].confidence = 1.5;
    let violations = validate(&registry);
    assert!(violations.iter().any(|v| v.field.starts_with("anomaly")));
}

#[test]
fn simulation_band_multipliers_must_widen_with_volatility() {
    let mut registry = FormulaRegistry::default();
    registry.simulation.band_multipliers.volatile = 0.01;
    let violations = validate(&registry);
    assert!(violations.iter().any(|v| v.field.starts_with("simulation")));
}

#[test]
fn opportunity_volatility_points_must_be_monotonic() {
    let mut registry = FormulaRegistry::default();
    registry.opportunities.priority.volatility_points.moderate = 2.0;
    let violations = validate(&registry);
    assert!(violations
        .iter()
        .any(|v| v.field.starts_with("opportunities")));
}

#[test]
fn tier_weights_must_be_positive_and_ordered() {
    let mut registry = FormulaRegistry::default();
    registry.tier_weights.medium = -1.0;
    let violations = validate(&registry);
    assert!(violations
        .iter()
        .any(|v| v.field.starts_with("tier_weights")));

    let mut registry = FormulaRegistry::default();
    registry.tier_weights.low = 5.0;
    let violations = validate(&registry);
    assert!(violations
        .iter()
        .any(|v| v.field.starts_with("tier_weights")));
}

#[test]
fn stemming_rules_must_keep_a_minimum_stem() {
    let mut registry = FormulaRegistry::default();
    registry.stemming.min_stem_len = 0;
    let violations = validate(&registry);
    assert!(violations.iter().any(|v| v.field.starts_with("stemming")));

    let mut registry = FormulaRegistry::default();
    registry.stemming.suffixes.push("  ".to_string());
    let violations = validate(&registry);
    assert!(violations.iter().any(|v| v.field.starts_with("stemming")));
}

#[test]
fn default_registry_round_trips_through_json() {
    let registry = FormulaRegistry::default();
    let json = serde_json::to_string_pretty(&registry).unwrap();
    let reparsed = parse_document(&json, RegistryFormat::Json).unwrap();
    assert_eq!(registry, reparsed);
    assert!(validate(&reparsed).is_empty());
}
