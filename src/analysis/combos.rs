//! Combo generation: ordered 2-3 token phrases from adjacent tokens.
//!
//! Combos never cross field boundaries. Each carries the mean relevance
//! class of its members, the highest-priority member intent, and a
//! genericity flag set when every member is a registry filler or modifier
//! word.

use crate::core::types::{Combo, SourceField, Token};
use crate::registry::FormulaRegistry;

/// Generate all adjacent 2-3 token windows per field
pub fn generate_combos(tokens: &[Token], registry: &FormulaRegistry) -> Vec<Combo> {
    let mut combos = Vec::new();
    for field in SourceField::ALL {
        let field_tokens: Vec<&Token> =
            tokens.iter().filter(|t| t.source_field == field).collect();
        for len in registry.combo.min_len..=registry.combo.max_len {
            if field_tokens.len() < len {
                continue;
            }
            for window in field_tokens.windows(len) {
                combos.push(build_combo(window, field, registry));
            }
        }
    }
    combos
}

fn build_combo(members: &[&Token], field: SourceField, registry: &FormulaRegistry) -> Combo {
    let relevance_sum: u32 = members.iter().map(|t| u32::from(t.relevance_class)).sum();
    let aggregate_relevance = f64::from(relevance_sum) / members.len() as f64;

    // Highest-priority intent among the members, per registry order.
    let intent = registry
        .intent
        .priority
        .iter()
        .copied()
        .find(|class| members.iter().any(|t| t.intent == Some(*class)));

    let is_generic = members.iter().all(|t| is_generic_word(&t.text, registry));

    Combo {
        tokens: members.iter().map(|t| t.text.clone()).collect(),
        source_field: field,
        start: members[0].position,
        aggregate_relevance,
        intent,
        is_generic,
    }
}

fn is_generic_word(word: &str, registry: &FormulaRegistry) -> bool {
    registry.filler_terms.iter().any(|t| t == word)
        || registry.combo.modifier_terms.iter().any(|t| t == word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str, field: SourceField, position: usize, class: u8) -> Token {
        Token {
            text: text.to_string(),
            source_field: field,
            position,
            relevance_class: class,
            intent: None,
            is_brand: false,
        }
    }

    #[test]
    fn combos_are_built_from_adjacent_tokens_within_a_field() {
        let registry = FormulaRegistry::default();
        let tokens = vec![
            token("learn", SourceField::Title, 0, 1),
            token("language", SourceField::Title, 1, 3),
            token("fast", SourceField::Title, 2, 0),
            token("workout", SourceField::Subtitle, 0, 1),
        ];
        let combos = generate_combos(&tokens, &registry);
        let phrases: Vec<String> = combos.iter().map(|c| c.phrase()).collect();
        // Two 2-token windows and one 3-token window in the title; the
        // subtitle's single token yields nothing.
        assert_eq!(
            phrases,
            vec!["learn language", "language fast", "learn language fast"]
        );
    }

    #[test]
    fn no_combo_crosses_field_boundaries() {
        let registry = FormulaRegistry::default();
        let tokens = vec![
            token("learn", SourceField::Title, 0, 1),
            token("language", SourceField::Subtitle, 0, 3),
        ];
        assert!(generate_combos(&tokens, &registry).is_empty());
    }

    #[test]
    fn pure_filler_combo_is_flagged_generic() {
        let registry = FormulaRegistry::default();
        let tokens = vec![
            token("best", SourceField::Title, 0, 0),
            token("top", SourceField::Title, 1, 0),
        ];
        let combos = generate_combos(&tokens, &registry);
        assert_eq!(combos.len(), 1);
        assert!(combos[0].is_generic);
        assert_eq!(combos[0].aggregate_relevance, 0.0);
    }

    #[test]
    fn mixed_combo_keeps_mean_relevance_and_is_not_generic() {
        let registry = FormulaRegistry::default();
        let tokens = vec![
            token("language", SourceField::Title, 0, 3),
            token("lessons", SourceField::Title, 1, 2),
        ];
        let combos = generate_combos(&tokens, &registry);
        assert!(!combos[0].is_generic);
        assert_eq!(combos[0].aggregate_relevance, 2.5);
    }
}
