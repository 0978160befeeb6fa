//! Token-level analysis: tokenization, relevance, intent, brand, combos

pub mod brand;
pub mod combos;
pub mod intent;
pub mod tokenizer;

pub use brand::{brand_ratio_pct, is_brand_token};
pub use combos::generate_combos;
pub use intent::{classify_intent, intent_counts};
pub use tokenizer::{relevance_class, stem, tokenize};
