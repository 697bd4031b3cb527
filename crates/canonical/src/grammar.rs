//! Pluggable matchers supplied by collaborators.
//!
//! The field grammar decides which spans are substitutable placeholders, and
//! the copyright matcher decides which leading lines are attribution. Both
//! are consumed opaquely; the defaults here cover the placeholders and
//! notices found in common license templates.

use once_cell::sync::Lazy;
use regex::Regex;

/// Recognises substitutable placeholders in normalized text.
pub trait FieldGrammar: Send + Sync {
    /// Returns every placeholder occurrence in `text`, in order.
    fn fields<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Bracketed template fields such as `[year]` or `[fullname]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketFieldGrammar;

/// Placeholder keys recognised by [`BracketFieldGrammar`].
pub const FIELD_KEYS: &[&str] = &[
    "fullname",
    "login",
    "email",
    "project",
    "description",
    "year",
    "projecturl",
];

static FIELD_REGEX: Lazy<Regex> = Lazy::new(|| {
    let keys = FIELD_KEYS.join("|");
    match Regex::new(&format!(r"\[(?:{keys})\]")) {
        Ok(regex) => regex,
        Err(err) => panic!("field grammar pattern is invalid: {err}"),
    }
});

impl FieldGrammar for BracketFieldGrammar {
    fn fields<'a>(&self, text: &'a str) -> Vec<&'a str> {
        FIELD_REGEX.find_iter(text).map(|m| m.as_str()).collect()
    }
}

/// Supplies the regex source for copyright notices.
///
/// The pattern is combined with the "all rights reserved" rule and stripped
/// until neither matches, so it should anchor at the start of the content.
pub trait CopyrightMatcher: Send + Sync {
    fn pattern(&self) -> &str;
}

/// Lines opening with `copyright`, `(c)` or `©`, plus any "with Reserved
/// Font Name" continuation lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCopyrightMatcher;

const DEFAULT_COPYRIGHT_PATTERN: &str = concat!(
    r"(?im)\A\s*(?:[_*\-\s]*(?:copyright|\(c\)|\x{00A9}).*$",
    r"(?:[_*\-\s]*with reserved font name.*$)*)+$",
);

impl CopyrightMatcher for DefaultCopyrightMatcher {
    fn pattern(&self) -> &str {
        DEFAULT_COPYRIGHT_PATTERN
    }
}
