//! Integration tests for the intelligence layer: stability, opportunity
//! ranking, simulation, and anomaly attribution

use chrono::{TimeZone, Utc};

use asomap::core::types::{
    AnomalySignals, KpiSeries, MetadataDocument, TimeSeriesPoint, VolatilityClass,
};
use asomap::intelligence::{
    attribute, build_bundle, opportunity_map, priority_score, simulate, stability_score,
    IntelligenceRequest, ScenarioRequest,
};
use asomap::registry::FormulaRegistry;
use asomap::scoring::audit;
use asomap::EngineError;

fn series(metric: &str, values: &[f64]) -> KpiSeries {
    KpiSeries {
        metric: metric.to_string(),
        points: values
            .iter()
            .enumerate()
            .map(|(i, v)| TimeSeriesPoint {
                timestamp: Utc.with_ymd_and_hms(2026, 3, 1 + i as u32, 0, 0, 0).unwrap(),
                value: *v,
            })
            .collect(),
    }
}

fn signals(metric: &str, delta_pct: f64) -> AnomalySignals {
    AnomalySignals {
        metric: metric.to_string(),
        delta_pct,
        metadata_changed: false,
        competitor_activity: false,
        seasonal_period: false,
        platform_update: false,
        consecutive_declines: 0,
        volatility: None,
    }
}

fn weak_report(registry: &FormulaRegistry) -> asomap::core::types::AuditReport {
    let document = MetadataDocument {
        title: "Best Top App".to_string(),
        subtitle: String::new(),
        description: String::new(),
        category: "language_learning".to_string(),
        market: "us".to_string(),
        brand_names: Vec::new(),
    };
    audit(&document, registry)
}

#[test]
fn constant_series_has_zero_cv_and_is_stable() {
    let registry = FormulaRegistry::default();
    let score = stability_score(&series("installs", &[100.0, 100.0, 100.0]), &registry).unwrap();
    assert_eq!(score.coefficient_of_variation, 0.0);
    assert_eq!(score.classification, VolatilityClass::Stable);
    assert_eq!(score.sample_size, 3);
}

#[test]
fn single_point_series_is_insufficient_data() {
    let registry = FormulaRegistry::default();
    let err = stability_score(&series("installs", &[42.0]), &registry).unwrap_err();
    match err {
        EngineError::InsufficientData {
            required, actual, ..
        } => {
            assert_eq!(required, 2);
            assert_eq!(actual, 1);
        }
        other => panic!("expected InsufficientData, got {other:?}"),
    }
}

#[test]
fn zero_mean_series_has_undefined_stability() {
    let registry = FormulaRegistry::default();
    let err = stability_score(&series("delta", &[50.0, -50.0]), &registry).unwrap_err();
    assert!(matches!(err, EngineError::UndefinedStability { .. }));
}

#[test]
fn swinging_series_classifies_volatile() {
    let registry = FormulaRegistry::default();
    let score =
        stability_score(&series("installs", &[10.0, 100.0, 10.0, 100.0]), &registry).unwrap();
    assert_eq!(score.classification, VolatilityClass::Volatile);
}

#[test]
fn priority_is_monotonic_in_gap_and_volatility() {
    let registry = FormulaRegistry::default();
    assert!(
        priority_score(60.0, None, &registry) > priority_score(30.0, None, &registry)
    );
    assert!(
        priority_score(30.0, Some(VolatilityClass::Volatile), &registry)
            > priority_score(30.0, Some(VolatilityClass::Moderate), &registry)
    );
    assert!(
        priority_score(30.0, Some(VolatilityClass::Moderate), &registry)
            > priority_score(30.0, Some(VolatilityClass::Stable), &registry)
    );
}

#[test]
fn opportunity_ranks_are_contiguous_and_sorted_by_priority() {
    let registry = FormulaRegistry::default();
    let report = weak_report(&registry);
    let items = opportunity_map(&report, &[], &registry);
    assert!(!items.is_empty());
    for (index, item) in items.iter().enumerate() {
        assert_eq!(item.rank, index + 1);
    }
    for pair in items.windows(2) {
        assert!(pair[0].priority >= pair[1].priority);
    }
}

#[test]
fn stability_risk_category_requires_history() {
    let registry = FormulaRegistry::default();
    let report = weak_report(&registry);

    let without = opportunity_map(&report, &[], &registry);
    assert!(without.iter().all(|i| i.category != "stability-risk"));

    let stability =
        vec![stability_score(&series("installs", &[10.0, 100.0, 10.0, 100.0]), &registry).unwrap()];
    let with = opportunity_map(&report, &stability, &registry);
    assert!(with.iter().any(|i| i.category == "stability-risk"));
}

#[test]
fn simulation_applies_the_scenario_elasticity() {
    let registry = FormulaRegistry::default();
    let request = ScenarioRequest {
        scenario: "keyword-expansion".to_string(),
        current_value: 1000.0,
        input_delta: 100.0,
    };
    let result = simulate(&request, None, &registry).unwrap();
    assert_eq!(result.metric, "impressions");
    assert!((result.projected_outcome - 1180.0).abs() < 1e-9);
    assert!(result.confidence_band.is_none());
}

#[test]
fn volatile_history_widens_the_confidence_band() {
    let registry = FormulaRegistry::default();
    let request = ScenarioRequest {
        scenario: "keyword-expansion".to_string(),
        current_value: 1000.0,
        input_delta: 100.0,
    };
    let stable = simulate(&request, Some(VolatilityClass::Stable), &registry)
        .unwrap()
        .confidence_band
        .unwrap();
    let volatile = simulate(&request, Some(VolatilityClass::Volatile), &registry)
        .unwrap()
        .confidence_band
        .unwrap();
    assert!(volatile.1 - volatile.0 > stable.1 - stable.0);
    // Band half-width for the volatile class: |100 * 1.8| * 0.30 = 54.
    assert!((volatile.0 - 1126.0).abs() < 1e-9);
    assert!((volatile.1 - 1234.0).abs() < 1e-9);
}

#[test]
fn unknown_scenario_is_an_error() {
    let registry = FormulaRegistry::default();
    let request = ScenarioRequest {
        scenario: "moonshot".to_string(),
        current_value: 1.0,
        input_delta: 1.0,
    };
    let err = simulate(&request, None, &registry).unwrap_err();
    assert!(matches!(err, EngineError::UnknownScenario(name) if name == "moonshot"));
}

#[test]
fn anomaly_rules_match_first_in_declared_order() {
    let registry = FormulaRegistry::default();
    let mut observed = signals("installs", -30.0);
    observed.metadata_changed = true;
    // Both metadata-change-drop and sharp-drop would fire; the earlier
    // rule wins.
    let attribution = attribute(&observed, &registry);
    assert_eq!(attribution.matched_rule.as_deref(), Some("metadata-change-drop"));
    assert_eq!(attribution.confidence, 0.90);
}

#[test]
fn attribution_templates_fill_metric_and_delta() {
    let registry = FormulaRegistry::default();
    let mut observed = signals("impressions", -30.0);
    observed.metadata_changed = true;
    let attribution = attribute(&observed, &registry);
    assert!(attribution.explanation.contains("impressions"));
    assert!(attribution.explanation.contains("-30.0%"));
}

#[test]
fn moderate_drop_with_no_context_is_unattributed() {
    let registry = FormulaRegistry::default();
    let attribution = attribute(&signals("installs", -8.0), &registry);
    assert_eq!(attribution.matched_rule, None);
    assert_eq!(attribution.confidence, 0.0);
}

#[test]
fn bundle_composes_all_four_intelligence_products() {
    let registry = FormulaRegistry::default();
    let report = weak_report(&registry);
    let mut observed = signals("organic_installs", -12.0);
    observed.metadata_changed = true;
    let request = IntelligenceRequest {
        series: vec![series("organic_installs", &[900.0, 1000.0, 1100.0])],
        scenarios: vec![ScenarioRequest {
            scenario: "brand-rebalance".to_string(),
            current_value: 1000.0,
            input_delta: 10.0,
        }],
        signals: vec![observed],
    };
    let bundle = build_bundle(&report, &request, &registry).unwrap();
    assert_eq!(bundle.stability.len(), 1);
    assert!(!bundle.opportunities.is_empty());
    assert_eq!(bundle.simulations.len(), 1);
    // brand-rebalance targets organic_installs, which has history.
    assert!(bundle.simulations[0].confidence_band.is_some());
    assert_eq!(
        bundle.attributions[0].matched_rule.as_deref(),
        Some("metadata-change-drop")
    );
}
