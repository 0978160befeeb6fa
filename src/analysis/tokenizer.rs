//! Market-aware tokenization and relevance classification.
//!
//! Tokenization is deterministic: the same text, category, and registry
//! version always produce the same token sequence and classes. Tokens are
//! never silently dropped after extraction; stop words are removed during
//! extraction per the market's registry list, and everything that survives
//! is classified and carried into the audit report.

use regex::Regex;

use crate::core::types::{MetadataDocument, SourceField, Token};
use crate::registry::{CategoryVocabulary, FormulaRegistry, StemmingRules};

use super::brand::is_brand_token;
use super::intent::classify_intent;

/// Word pattern: a letter or digit followed by letters, digits, or
/// apostrophes. Hyphenated forms split into their parts.
const TOKEN_PATTERN: &str = r"[\p{L}\p{N}][\p{L}\p{N}']*";

/// Split all three fields of a document into classified tokens
pub fn tokenize(document: &MetadataDocument, registry: &FormulaRegistry) -> Vec<Token> {
    // Compiled per call; the registry is the only shared state allowed.
    let pattern = Regex::new(TOKEN_PATTERN).unwrap_or_else(|e| {
        // The pattern is a compile-time constant; this cannot fail.
        unreachable!("invalid token pattern: {e}")
    });
    let market = registry.market_rules(&document.market);
    let vocabulary = registry.category_vocabulary(&document.category);

    let mut tokens = Vec::new();
    for field in SourceField::ALL {
        let text = document.field_text(field);
        let mut position = 0usize;
        for capture in pattern.find_iter(text) {
            let word = capture.as_str().to_lowercase();
            if market.stop_words.iter().any(|s| s == &word) {
                continue;
            }
            let relevance_class = relevance_class(&word, &vocabulary, registry);
            let intent = classify_intent(&word, &registry.intent);
            let is_brand = is_brand_token(&word, &document.brand_names);
            tokens.push(Token {
                text: word,
                source_field: field,
                position,
                relevance_class,
                intent,
                is_brand,
            });
            position += 1;
        }
    }
    tokens
}

/// Relevance class 0-3 for one lowercased word.
///
/// 0 = registry filler or modifier, 2/3 = category vocabulary,
/// 1 = everything unseen (neutral, never dropped).
pub fn relevance_class(
    word: &str,
    vocabulary: &CategoryVocabulary,
    registry: &FormulaRegistry,
) -> u8 {
    let rules = &registry.stemming;
    let stemmed = stem(word, rules);
    let matches = |terms: &[String]| {
        terms
            .iter()
            .any(|t| t == word || stems_match(&stem(t, rules), &stemmed, rules))
    };
    if matches(&registry.filler_terms) || matches(&registry.combo.modifier_terms) {
        0
    } else if matches(&vocabulary.defining) {
        3
    } else if matches(&vocabulary.supporting) {
        2
    } else {
        1
    }
}

/// Whether two stems refer to the same word family. Suffix stripping is
/// approximate ("languages" stems to "languag"), so a short prefix
/// difference up to the registry's `max_prefix_diff` still counts as a
/// match, provided the shorter stem meets `min_stem_len`.
pub fn stems_match(a: &str, b: &str, rules: &StemmingRules) -> bool {
    if a == b {
        return true;
    }
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    short.chars().count() >= rules.min_stem_len
        && long.starts_with(short)
        && long.len() - short.len() <= rules.max_prefix_diff
}

/// Suffix-strip stemming per registry rules. The first listed suffix
/// that leaves at least `min_stem_len` characters wins; otherwise the
/// word is returned unchanged.
pub fn stem(word: &str, rules: &StemmingRules) -> String {
    for suffix in &rules.suffixes {
        if let Some(stripped) = word.strip_suffix(suffix.as_str()) {
            if stripped.chars().count() >= rules.min_stem_len {
                return stripped.to_string();
            }
        }
    }
    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::IntentClass;

    fn doc(title: &str) -> MetadataDocument {
        MetadataDocument {
            title: title.to_string(),
            subtitle: String::new(),
            description: String::new(),
            category: "language_learning".to_string(),
            market: "us".to_string(),
            brand_names: vec!["DuoSpeak".to_string()],
        }
    }

    #[test]
    fn tokenization_is_deterministic() {
        let registry = FormulaRegistry::default();
        let document = doc("Learn Language Fast - DuoSpeak");
        let first = tokenize(&document, &registry);
        let second = tokenize(&document, &registry);
        assert_eq!(first, second);
    }

    #[test]
    fn stop_words_are_removed_and_positions_are_contiguous() {
        let registry = FormulaRegistry::default();
        let tokens = tokenize(&doc("Learn the Language of Music"), &registry);
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["learn", "language", "music"]);
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn relevance_classes_follow_category_vocabulary() {
        let registry = FormulaRegistry::default();
        let tokens = tokenize(&doc("Best Language Speak Zebra"), &registry);
        let classes: Vec<(String, u8)> = tokens
            .iter()
            .map(|t| (t.text.clone(), t.relevance_class))
            .collect();
        assert_eq!(
            classes,
            vec![
                ("best".to_string(), 0),
                ("language".to_string(), 3),
                ("speak".to_string(), 2),
                ("zebra".to_string(), 1),
            ]
        );
    }

    #[test]
    fn unseen_tokens_default_to_neutral_class_not_dropped() {
        let registry = FormulaRegistry::default();
        let tokens = tokenize(&doc("Xylophone Quixotic"), &registry);
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| t.relevance_class == 1));
    }

    #[test]
    fn brand_and_intent_are_assigned_during_tokenization() {
        let registry = FormulaRegistry::default();
        let tokens = tokenize(&doc("Download DuoSpeak Free"), &registry);
        let download = &tokens[0];
        assert_eq!(download.intent, Some(IntentClass::Transactional));
        let brand = &tokens[1];
        assert!(brand.is_brand);
    }

    #[test]
    fn stemming_strips_listed_suffixes_only_when_stem_is_long_enough() {
        let rules = StemmingRules::default();
        assert_eq!(stem("lessons", &rules), "lesson");
        assert_eq!(stem("running", &rules), "runn");
        // "es" would leave two characters; the word survives intact.
        assert_eq!(stem("yes", &rules), "yes");
    }

    #[test]
    fn stemming_thresholds_come_from_the_registry() {
        let mut rules = StemmingRules::default();
        assert!(stems_match("languag", "language", &rules));

        // Tightening the prefix tolerance switches family matching off.
        rules.max_prefix_diff = 0;
        assert!(!stems_match("languag", "language", &rules));

        // Raising the minimum stem length blocks suffix stripping.
        rules.min_stem_len = 8;
        assert_eq!(stem("lessons", &rules), "lessons");
    }
}
