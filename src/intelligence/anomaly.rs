//! Anomaly attribution: first-match-wins scan of the registry rule list.
//!
//! Rule order is load-bearing. The scan walks the rules exactly as the
//! registry declares them and stops at the first trigger that fires;
//! reordering rules is a registry version change, not an implementation
//! detail.

use crate::core::types::{AnomalyAttribution, AnomalySignals};
use crate::registry::FormulaRegistry;

/// Attribute one observed delta.
///
/// Returns the first matching rule's templated explanation and fixed
/// confidence, or an explicit unattributed result when nothing matches —
/// never a guessed best-effort match.
pub fn attribute(signals: &AnomalySignals, registry: &FormulaRegistry) -> AnomalyAttribution {
    for rule in &registry.anomaly.rules {
        if rule.trigger.matches(signals) {
            return AnomalyAttribution {
                metric: signals.metric.clone(),
                observed_delta: signals.delta_pct,
                matched_rule: Some(rule.id.clone()),
                explanation: fill_template(&rule.explanation, signals),
                confidence: rule.confidence,
            };
        }
    }

    AnomalyAttribution {
        metric: signals.metric.clone(),
        observed_delta: signals.delta_pct,
        matched_rule: None,
        explanation: format!(
            "No attribution rule matched the {} change in {}",
            format_delta(signals.delta_pct),
            signals.metric
        ),
        confidence: 0.0,
    }
}

fn fill_template(template: &str, signals: &AnomalySignals) -> String {
    template
        .replace("{metric}", &signals.metric)
        .replace("{delta}", &format_delta(signals.delta_pct))
}

fn format_delta(delta_pct: f64) -> String {
    format!("{delta_pct:+.1}%")
}
