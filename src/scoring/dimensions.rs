//! The seven dimension scorers.
//!
//! Each scorer is a pure function of (tokens, combos, registry) returning
//! a clamped 0-100 score plus the tokens or phrases that drove it. Scorers
//! are total over well-formed documents: empty input scores at the low end
//! of the dimension, it never errors.

use crate::analysis::brand::brand_ratio_pct;
use crate::analysis::intent::intent_counts;
use crate::analysis::tokenizer::{stem, stems_match};
use crate::core::score::Score0To100;
use crate::core::types::{Combo, MetadataDocument, SourceField, Token};
use crate::registry::{CategoryVocabulary, FormulaRegistry, MarketRules};

/// Intent Coverage: weighted presence and balance over the three intent
/// buckets. A document with zero transactional terms is hard-capped at
/// the registry ceiling regardless of the other buckets.
pub fn intent_coverage(tokens: &[Token], registry: &FormulaRegistry) -> (Score0To100, Vec<String>) {
    let rules = &registry.intent;
    let (informational, commercial, transactional) = intent_counts(tokens);

    let credit = |count: usize, weight: f64| {
        let presence = (count.min(rules.min_presence)) as f64 / rules.min_presence as f64;
        presence * weight
    };
    let raw = credit(informational, rules.informational_weight)
        + credit(commercial, rules.commercial_weight)
        + credit(transactional, rules.transactional_weight);

    let classified = informational + commercial + transactional;
    let penalty = if classified > 0 {
        let shares = [
            informational as f64 / classified as f64,
            commercial as f64 / classified as f64,
            transactional as f64 / classified as f64,
        ];
        let max = shares.iter().cloned().fold(f64::MIN, f64::max);
        let min = shares.iter().cloned().fold(f64::MAX, f64::min);
        rules.balance_penalty * (max - min)
    } else {
        0.0
    };

    let mut score = raw - penalty;
    // Ceiling, not an averaged penalty: missing transactional intent caps
    // the dimension no matter how strong the other buckets are.
    if transactional == 0 {
        score = score.min(rules.missing_transactional_ceiling);
    }

    let explanation = tokens
        .iter()
        .filter(|t| t.intent.is_some())
        .map(|t| t.text.clone())
        .collect();
    (Score0To100::new(score), explanation)
}

/// Keyword Coverage: importance-tier-weighted fraction of the category's
/// must-have set found anywhere in the document, stemmed per registry.
/// An empty must-have set gives no evidence of coverage and scores 0.
pub fn keyword_coverage(
    tokens: &[Token],
    vocabulary: &CategoryVocabulary,
    registry: &FormulaRegistry,
) -> (Score0To100, Vec<String>) {
    let tiers = &registry.tier_weights;
    let total_weight: f64 = vocabulary
        .must_have
        .iter()
        .map(|k| tiers.weight(k.tier))
        .sum();
    if total_weight == 0.0 {
        return (Score0To100::new(0.0), Vec::new());
    }

    let stemming = &registry.stemming;
    let stems: Vec<String> = tokens
        .iter()
        .map(|t| stem(&t.text, stemming))
        .collect();

    let mut found_weight = 0.0;
    let mut found_terms = Vec::new();
    for keyword in &vocabulary.must_have {
        let keyword_stem = stem(&keyword.term.to_lowercase(), stemming);
        if stems.iter().any(|s| stems_match(s, &keyword_stem, stemming)) {
            found_weight += tiers.weight(keyword.tier);
            found_terms.push(keyword.term.clone());
        }
    }
    (
        Score0To100::new(found_weight / total_weight * 100.0),
        found_terms,
    )
}

/// Combo Quality: fraction of combos that are not generic, weighted by
/// each combo's aggregate relevance. Pure filler combos contribute zero.
pub fn combo_quality(combos: &[Combo]) -> (Score0To100, Vec<String>) {
    if combos.is_empty() {
        return (Score0To100::new(0.0), Vec::new());
    }
    let quality: f64 = combos
        .iter()
        .filter(|c| !c.is_generic)
        .map(|c| c.aggregate_relevance / 3.0)
        .sum();
    let score = quality / combos.len() as f64 * 100.0;

    let mut strongest: Vec<&Combo> = combos.iter().filter(|c| !c.is_generic).collect();
    strongest.sort_by(|a, b| {
        b.aggregate_relevance
            .partial_cmp(&a.aggregate_relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let explanation = strongest.iter().take(8).map(|c| c.phrase()).collect();
    (Score0To100::new(score), explanation)
}

/// Discovery Coverage: category relevance of the non-brand token set,
/// scaled by the non-brand share of the document. Brand tokens influence
/// this dimension only through that share, which is the complement of the
/// brand ratio; their relevance classes are never re-penalized here.
pub fn discovery_coverage(tokens: &[Token]) -> (Score0To100, Vec<String>) {
    if tokens.is_empty() {
        return (Score0To100::new(0.0), Vec::new());
    }
    let non_brand: Vec<&Token> = tokens.iter().filter(|t| !t.is_brand).collect();
    if non_brand.is_empty() {
        return (Score0To100::new(0.0), Vec::new());
    }
    let share = non_brand.len() as f64 / tokens.len() as f64;
    let mean_relevance = non_brand
        .iter()
        .map(|t| f64::from(t.relevance_class))
        .sum::<f64>()
        / non_brand.len() as f64
        / 3.0;
    let explanation = non_brand
        .iter()
        .filter(|t| t.relevance_class >= 2)
        .map(|t| t.text.clone())
        .collect();
    (Score0To100::new(share * mean_relevance * 100.0), explanation)
}

/// Relevance: field-weighted aggregate of token relevance classes,
/// normalized to 0-100. Title tokens weigh more than description tokens.
pub fn relevance(tokens: &[Token], registry: &FormulaRegistry) -> (Score0To100, Vec<String>) {
    if tokens.is_empty() {
        return (Score0To100::new(0.0), Vec::new());
    }
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for token in tokens {
        let weight = registry.relevance.field_weight(token.source_field);
        weighted_sum += f64::from(token.relevance_class) / 3.0 * weight;
        weight_total += weight;
    }
    let explanation = tokens
        .iter()
        .filter(|t| t.relevance_class >= 2)
        .map(|t| t.text.clone())
        .collect();
    (
        Score0To100::new(weighted_sum / weight_total * 100.0),
        explanation,
    )
}

/// Structure: per-field character utilization against market limits,
/// scored through the target-utilization band, blended with a word-count
/// band check. Fields average equally.
pub fn structure(
    document: &MetadataDocument,
    market: &MarketRules,
    registry: &FormulaRegistry,
) -> (Score0To100, Vec<String>) {
    let rules = &registry.structure;
    let mut total = 0.0;
    let mut explanation = Vec::new();

    for field in SourceField::ALL {
        let text = document.field_text(field);
        let field_rules = market.field(field);
        let chars = text.chars().count();
        let words = text.split_whitespace().count();

        let utilization = chars as f64 / field_rules.char_limit as f64;
        let utilization_score = band_score(utilization, rules.target_low, rules.target_high);
        let word_score = word_band_score(words, field_rules.min_words, field_rules.max_words);

        total += rules.utilization_weight * utilization_score + rules.word_count_weight * word_score;
        explanation.push(format!(
            "{}: {}/{} chars, {} words",
            field.display_name(),
            chars,
            field_rules.char_limit,
            words
        ));
    }

    (
        Score0To100::new(total / SourceField::ALL.len() as f64 * 100.0),
        explanation,
    )
}

/// Score a utilization fraction against the [low, high] target band:
/// full credit inside, linear degradation outside, zero at or past the
/// hard limit.
fn band_score(utilization: f64, low: f64, high: f64) -> f64 {
    if utilization < low {
        (utilization / low).max(0.0)
    } else if utilization <= high {
        1.0
    } else if high >= 1.0 || utilization >= 1.0 {
        0.0
    } else {
        ((1.0 - utilization) / (1.0 - high)).max(0.0)
    }
}

fn word_band_score(words: usize, min_words: usize, max_words: usize) -> f64 {
    if words < min_words {
        if min_words == 0 {
            1.0
        } else {
            words as f64 / min_words as f64
        }
    } else if words <= max_words {
        1.0
    } else if max_words == 0 {
        0.0
    } else {
        (1.0 - (words - max_words) as f64 / max_words as f64).max(0.0)
    }
}

/// Brand Balance: the band function over the brand-token ratio. Full
/// score anywhere inside [min_pct, max_pct]; outside, the score falls
/// linearly with distance from the nearest band edge, hitting 0 at
/// `falloff_pct` points out. Over- and under-branding degrade through
/// this same symmetric curve.
pub fn brand_balance(tokens: &[Token], registry: &FormulaRegistry) -> (Score0To100, Vec<String>) {
    if tokens.is_empty() {
        return (Score0To100::new(0.0), Vec::new());
    }
    let band = &registry.brand;
    let ratio = brand_ratio_pct(tokens);

    let distance = if ratio < band.min_pct {
        band.min_pct - ratio
    } else if ratio > band.max_pct {
        ratio - band.max_pct
    } else {
        0.0
    };
    let score = 100.0 * (1.0 - distance / band.falloff_pct);

    let explanation = tokens
        .iter()
        .filter(|t| t.is_brand)
        .map(|t| t.text.clone())
        .collect();
    (Score0To100::new(score), explanation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::IntentClass;

    fn token(text: &str, class: u8, intent: Option<IntentClass>, is_brand: bool) -> Token {
        Token {
            text: text.to_string(),
            source_field: SourceField::Title,
            position: 0,
            relevance_class: class,
            intent,
            is_brand,
        }
    }

    #[test]
    fn intent_score_is_capped_without_transactional_terms() {
        let registry = FormulaRegistry::default();
        // Strong informational and commercial presence, zero transactional.
        let tokens = vec![
            token("learn", 1, Some(IntentClass::Informational), false),
            token("guide", 1, Some(IntentClass::Informational), false),
            token("best", 0, Some(IntentClass::Commercial), false),
            token("premium", 1, Some(IntentClass::Commercial), false),
        ];
        let (score, _) = intent_coverage(&tokens, &registry);
        assert!(score.value() <= registry.intent.missing_transactional_ceiling);
    }

    #[test]
    fn intent_cap_is_a_ceiling_not_a_penalty() {
        let mut registry = FormulaRegistry::default();
        registry.intent.missing_transactional_ceiling = 100.0;
        let tokens = vec![
            token("learn", 1, Some(IntentClass::Informational), false),
            token("guide", 1, Some(IntentClass::Informational), false),
            token("best", 0, Some(IntentClass::Commercial), false),
            token("premium", 1, Some(IntentClass::Commercial), false),
        ];
        let (uncapped, _) = intent_coverage(&tokens, &registry);
        registry.intent.missing_transactional_ceiling = 35.0;
        let (capped, _) = intent_coverage(&tokens, &registry);
        assert!(uncapped.value() > 35.0);
        assert_eq!(capped.value(), 35.0);
    }

    #[test]
    fn keyword_coverage_weights_by_importance_tier() {
        let registry = FormulaRegistry::default();
        let vocabulary = registry.category_vocabulary("language_learning");
        // Only the High-tier "language" is present: 3 of 11 total weight.
        let tokens = vec![token("language", 3, None, false)];
        let (score, found) = keyword_coverage(&tokens, &vocabulary, &registry);
        assert!((score.value() - 3.0 / 11.0 * 100.0).abs() < 1e-9);
        assert_eq!(found, vec!["language"]);
    }

    #[test]
    fn keyword_coverage_matches_through_stemming() {
        let registry = FormulaRegistry::default();
        let vocabulary = registry.category_vocabulary("language_learning");
        let with_plural = vec![token("languages", 3, None, false)];
        let (plural_score, _) = keyword_coverage(&with_plural, &vocabulary, &registry);
        let with_singular = vec![token("language", 3, None, false)];
        let (singular_score, _) = keyword_coverage(&with_singular, &vocabulary, &registry);
        assert_eq!(plural_score, singular_score);
    }

    #[test]
    fn keyword_coverage_tier_weights_come_from_the_registry() {
        let mut registry = FormulaRegistry::default();
        let vocabulary = registry.category_vocabulary("language_learning");
        let tokens = vec![token("language", 3, None, false)];
        let (default_score, _) = keyword_coverage(&tokens, &vocabulary, &registry);
        assert!((default_score.value() - 3.0 / 11.0 * 100.0).abs() < 1e-9);

        // Flattening the tiers reweights the same match: 1 of 5.
        registry.tier_weights.high = 1.0;
        registry.tier_weights.medium = 1.0;
        registry.tier_weights.low = 1.0;
        let (flat_score, _) = keyword_coverage(&tokens, &vocabulary, &registry);
        assert!((flat_score.value() - 1.0 / 5.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn keyword_stem_matching_honors_the_registry_prefix_tolerance() {
        let mut registry = FormulaRegistry::default();
        let vocabulary = registry.category_vocabulary("language_learning");
        let tokens = vec![token("languages", 3, None, false)];
        let (with_tolerance, _) = keyword_coverage(&tokens, &vocabulary, &registry);
        assert!(with_tolerance.value() > 0.0);

        registry.stemming.max_prefix_diff = 0;
        let (exact_only, _) = keyword_coverage(&tokens, &vocabulary, &registry);
        assert_eq!(exact_only.value(), 0.0);
    }

    #[test]
    fn combo_quality_is_zero_for_pure_filler() {
        let combos = vec![Combo {
            tokens: vec!["best".to_string(), "top".to_string()],
            source_field: SourceField::Title,
            start: 0,
            aggregate_relevance: 0.0,
            intent: None,
            is_generic: true,
        }];
        let (score, _) = combo_quality(&combos);
        assert_eq!(score.value(), 0.0);
    }

    #[test]
    fn discovery_is_zero_for_brand_only_documents() {
        let tokens = vec![
            token("duospeak", 1, None, true),
            token("duospeak", 1, None, true),
        ];
        let (score, _) = discovery_coverage(&tokens);
        assert_eq!(score.value(), 0.0);
    }

    #[test]
    fn relevance_weights_title_over_description() {
        let registry = FormulaRegistry::default();
        let title_heavy = vec![
            Token {
                source_field: SourceField::Title,
                ..token("language", 3, None, false)
            },
            Token {
                source_field: SourceField::Description,
                ..token("zebra", 1, None, false)
            },
        ];
        let description_heavy = vec![
            Token {
                source_field: SourceField::Title,
                ..token("zebra", 1, None, false)
            },
            Token {
                source_field: SourceField::Description,
                ..token("language", 3, None, false)
            },
        ];
        let (title_score, _) = relevance(&title_heavy, &registry);
        let (description_score, _) = relevance(&description_heavy, &registry);
        assert!(title_score.value() > description_score.value());
    }

    #[test]
    fn band_score_degrades_linearly_outside_band() {
        assert_eq!(band_score(0.875, 0.80, 0.95), 1.0);
        assert_eq!(band_score(0.40, 0.80, 0.95), 0.5);
        assert!((band_score(0.975, 0.80, 0.95) - 0.5).abs() < 1e-9);
        assert_eq!(band_score(1.2, 0.80, 0.95), 0.0);
    }

    #[test]
    fn brand_balance_is_full_inside_the_band() {
        let registry = FormulaRegistry::default();
        // 10 tokens, 1 brand token: 10%, inside the default 8-18 band.
        let mut tokens = vec![token("duospeak", 1, None, true)];
        for _ in 0..9 {
            tokens.push(token("language", 3, None, false));
        }
        let (score, brand_tokens) = brand_balance(&tokens, &registry);
        assert_eq!(score.value(), 100.0);
        assert_eq!(brand_tokens, vec!["duospeak"]);
    }

    #[test]
    fn brand_balance_penalty_is_symmetric() {
        let registry = FormulaRegistry::default();
        let band = &registry.brand;
        let x = 6.0;
        // Build token lists hitting exactly min_pct - x and max_pct + x.
        let below = ratio_tokens(band.min_pct - x);
        let above = ratio_tokens(band.max_pct + x);
        let (below_score, _) = brand_balance(&below, &registry);
        let (above_score, _) = brand_balance(&above, &registry);
        assert!((below_score.value() - above_score.value()).abs() < 1e-9);
    }

    fn ratio_tokens(pct: f64) -> Vec<Token> {
        // 100 tokens, `pct` of them brand.
        let brand_count = pct.round() as usize;
        let mut tokens = Vec::new();
        for _ in 0..brand_count {
            tokens.push(token("duospeak", 1, None, true));
        }
        for _ in brand_count..100 {
            tokens.push(token("language", 3, None, false));
        }
        tokens
    }
}
