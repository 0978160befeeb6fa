//! Search-intent classification.
//!
//! A token belongs to zero or one intent class. When a term appears in
//! more than one registry list, the registry's declared priority order
//! decides, keeping classification a total function.

use crate::core::types::IntentClass;
use crate::registry::IntentRules;

/// Classify one lowercased word, first-match by registry priority
pub fn classify_intent(word: &str, rules: &IntentRules) -> Option<IntentClass> {
    rules
        .priority
        .iter()
        .copied()
        .find(|class| rules.terms(*class).iter().any(|t| t == word))
}

/// Count classified tokens per intent class
pub fn intent_counts(
    tokens: &[crate::core::types::Token],
) -> (usize, usize, usize) {
    let mut informational = 0;
    let mut commercial = 0;
    let mut transactional = 0;
    for token in tokens {
        match token.intent {
            Some(IntentClass::Informational) => informational += 1,
            Some(IntentClass::Commercial) => commercial += 1,
            Some(IntentClass::Transactional) => transactional += 1,
            None => {}
        }
    }
    (informational, commercial, transactional)
}
