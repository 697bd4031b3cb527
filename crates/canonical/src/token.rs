//! Word and field extraction over normalized text.
//!
//! A token is a maximal run of word characters and forward slashes, with an
//! optional trailing possessive (`'s`, or a bare `'` after an `s`). Tokens
//! are already lowercase because extraction only ever runs on normalized
//! content.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::grammar::FieldGrammar;

static WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[\w/]'s|s'|[\w/])+").expect("word regex is valid")
});

/// A token with its UTF-8 byte offsets in the normalized text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// The token text content.
    pub text: String,
    /// Byte offset (inclusive) in the normalized text.
    pub start: usize,
    /// Byte offset (exclusive) in the normalized text.
    pub end: usize,
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Tokenizes normalized text and produces byte offsets.
///
/// ```rust
/// use canonical::tokenize;
///
/// let words: Vec<_> = tokenize("the licensor's and/or holders' rights")
///     .into_iter()
///     .map(|t| t.text)
///     .collect();
/// assert_eq!(words, ["the", "licensor's", "and/or", "holders'", "rights"]);
/// ```
pub fn tokenize(text: &str) -> Vec<Token> {
    WORD_REGEX
        .find_iter(text)
        .map(|m| Token {
            text: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// Distinct tokens of `text`.
pub fn word_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().map(|token| token.text).collect()
}

/// Distinct placeholder occurrences the grammar finds in `text`.
pub fn field_set(text: &str, grammar: &dyn FieldGrammar) -> HashSet<String> {
    grammar
        .fields(text)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// `words` minus every token that appears inside one of `fields`.
pub fn fieldless_word_set(words: &HashSet<String>, fields: &HashSet<String>) -> HashSet<String> {
    if fields.is_empty() {
        return words.clone();
    }
    let field_words: HashSet<String> = fields.iter().flat_map(|f| word_set(f)).collect();
    words.difference(&field_words).cloned().collect()
}
