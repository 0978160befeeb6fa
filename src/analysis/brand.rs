//! Brand-token detection and ratio measurement.
//!
//! Matching is case-insensitive and substring-aware so compound brand
//! forms ("DuoSpeak Pro", "duospeakapp") still count their tokens.

use crate::core::types::Token;

/// Whether one lowercased token is a brand-identifying form.
///
/// A token matches when it equals a brand form, contains a single-word
/// form as a substring, or is one of the words of a multi-word form.
pub fn is_brand_token(word: &str, brand_names: &[String]) -> bool {
    brand_names.iter().any(|form| {
        let form = form.to_lowercase();
        if form.is_empty() {
            return false;
        }
        let compact = form.replace(char::is_whitespace, "");
        word == form
            || word.contains(&compact)
            || form.split_whitespace().any(|part| part == word)
    })
}

/// Brand tokens as a percentage of all tokens; 0 for an empty token list
pub fn brand_ratio_pct(tokens: &[Token]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let brand_count = tokens.iter().filter(|t| t.is_brand).count();
    brand_count as f64 / tokens.len() as f64 * 100.0
}
