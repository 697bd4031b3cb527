//! Static rule tables for license normalization.
//!
//! Three tables live here and nowhere else:
//!
//! - [`STRIP_PATTERNS`]: structural patterns keyed by name (rules, headings,
//!   markup, boilerplate anchors). Matches are blanked or unwrapped by the
//!   engine.
//! - [`NORMALIZATIONS`]: pattern/replacement pairs that unify punctuation.
//! - [`VARIETAL_WORDS`]: non-preferred spelling mapped to preferred spelling.
//!
//! The tables are plain data. Compiled forms are built once per process on
//! first use and shared read-only afterwards.
//!
//! Patterns are written for already-loaded `String` content: `(?m)` makes
//! `^`/`$` line anchors, `\A` pins a rule to the start of the document, and
//! `(?s)` lets `.` cross newlines where a rule spans paragraphs.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Structural patterns, keyed by rule name.
pub const STRIP_PATTERNS: &[(&str, &str)] = &[
    ("bom", r"\A\x{FEFF}"),
    ("hrs", r"(?m)^\s*[=\-*]{3,}\s*$"),
    ("all_rights_reserved", r"(?im)\A\s*all rights reserved\.?$"),
    ("whitespace", r"\s+"),
    ("markdown_headings", r"(?m)^\s*#+"),
    ("version", r"(?im)\A\s*version.*$"),
    ("span_markup", r"[_*~]+(.*?)[_*~]+"),
    ("link_markup", r"\[(.+?)\]\(.+?\)"),
    ("block_markup", r"(?m)^\s*>"),
    ("border_markup", r"(?m)^[*-](.*?)[*-]$"),
    ("comment_markup", r"(?m)^\s*?[/*]{1,2}"),
    ("url", r"\A\s*https?://[^ ]+\n"),
    ("bullet", r"(?i)\n\n\s*(?:[*-]|\(?[\da-z]{1,2}[).])\s+"),
    ("developed_by", r"(?is)\A\s*developed by:.*?\n\n"),
    (
        "end_of_terms",
        r"(?im)^[\s#*_]*end of (?:the )?terms and conditions[\s#*_]*$",
    ),
    ("cc_legal_code", r"(?im)^\s*Creative Commons Legal Code\s*$"),
    ("cc0_info", r"(?is)For more information, please see\s*\S+zero\S+"),
    ("cc0_disclaimer", r"(?is)CREATIVE COMMONS CORPORATION.*?\n\n"),
    (
        "unlicense_info",
        r"(?is)For more information, please.*\S+unlicense\S+",
    ),
    ("mit_optional", r"(?i)\(including the next paragraph\)"),
];

/// Punctuation normalizations as `(name, pattern, replacement)`.
///
/// Dash unification is not listed: it needs line-boundary checks the regex
/// engine cannot express, so the engine runs it as a procedure over
/// [`DASH_RUN`].
pub const NORMALIZATIONS: &[(&str, &str, &str)] = &[
    (
        "lists",
        r"(?m)^\s*(?:\d\.|[*-])(?: [*_]{0,2}\(?[\da-z]\)[*_]{0,2})?\s+([^\n])",
        "- ${1}",
    ),
    ("https", r"http:", "https:"),
    ("ampersands", r"&", "and"),
    (
        "quotes",
        r#"[`'"‘“]+([\w -]*?\w)[`'"’”]+"#,
        "\"${1}\"",
    ),
];

/// Any run of em-dash, en-dash or hyphen characters.
pub const DASH_RUN: &str = "[\u{2014}\u{2013}-]+";

/// Legally equivalent spellings, non-preferred first.
pub const VARIETAL_WORDS: &[(&str, &str)] = &[
    ("acknowledgment", "acknowledgement"),
    ("analogue", "analog"),
    ("analyse", "analyze"),
    ("artefact", "artifact"),
    ("authorisation", "authorization"),
    ("authorised", "authorized"),
    ("calibre", "caliber"),
    ("cancelled", "canceled"),
    ("capitalisations", "capitalizations"),
    ("catalogue", "catalog"),
    ("categorise", "categorize"),
    ("centre", "center"),
    ("colour", "color"),
    ("emphasised", "emphasized"),
    ("favour", "favor"),
    ("favourite", "favorite"),
    ("fulfil", "fulfill"),
    ("fulfilment", "fulfillment"),
    ("initialise", "initialize"),
    ("judgment", "judgement"),
    ("labelling", "labeling"),
    ("labour", "labor"),
    ("licence", "license"),
    ("licences", "licenses"),
    ("licenced", "licensed"),
    ("maximise", "maximize"),
    ("modelled", "modeled"),
    ("modelling", "modeling"),
    ("offence", "offense"),
    ("optimise", "optimize"),
    ("organisation", "organization"),
    ("organise", "organize"),
    ("practise", "practice"),
    ("programme", "program"),
    ("realise", "realize"),
    ("recognise", "recognize"),
    ("signalling", "signaling"),
    ("sub-license", "sublicense"),
    ("sub license", "sublicense"),
    ("utilisation", "utilization"),
    ("whilst", "while"),
    ("wilful", "willful"),
    ("non-commercial", "noncommercial"),
    ("per cent", "percent"),
    ("cent", "percent"),
    ("owner", "holder"),
];

static COMPILED_STRIP: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    STRIP_PATTERNS
        .iter()
        .map(|(name, pattern)| (*name, compile(name, pattern)))
        .collect()
});

static COMPILED_NORMALIZATIONS: Lazy<HashMap<&'static str, (Regex, &'static str)>> =
    Lazy::new(|| {
        NORMALIZATIONS
            .iter()
            .map(|(name, pattern, to)| (*name, (compile(name, pattern), *to)))
            .collect()
    });

pub(crate) static DASH_RUN_REGEX: Lazy<Regex> = Lazy::new(|| compile("dashes", DASH_RUN));

pub(crate) static VARIETAL_LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| VARIETAL_WORDS.iter().copied().collect());

/// One whole-word pass over every varietal spelling.
pub(crate) static VARIETAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    let alternation = VARIETAL_WORDS
        .iter()
        .map(|(from, _)| regex::escape(from))
        .collect::<Vec<_>>()
        .join("|");
    compile("spelling", &format!(r"\b(?:{alternation})\b"))
});

pub(crate) static BULLET_GAP_REGEX: Lazy<Regex> = Lazy::new(|| compile("bullet_gap", r"\)\s+\("));

fn compile(name: &str, pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("rule table pattern {name} is invalid: {err}"))
}

/// Looks up a compiled structural pattern by name.
pub fn strip_pattern(name: &str) -> Option<&'static Regex> {
    COMPILED_STRIP.get(name)
}

/// Looks up a compiled normalization and its replacement by name.
pub fn normalization(name: &str) -> Option<(&'static Regex, &'static str)> {
    COMPILED_NORMALIZATIONS
        .get(name)
        .map(|(regex, to)| (regex, *to))
}

/// Returns the preferred spelling for a varietal word, if it has one.
pub fn preferred_spelling(word: &str) -> Option<&'static str> {
    VARIETAL_LOOKUP.get(word).copied()
}

pub(crate) fn rule(name: &'static str) -> &'static Regex {
    match strip_pattern(name) {
        Some(regex) => regex,
        None => panic!("rule table has no pattern named {name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_compiles() {
        for (name, _) in STRIP_PATTERNS {
            assert!(strip_pattern(name).is_some(), "{name} missing");
        }
        for (name, _, _) in NORMALIZATIONS {
            assert!(normalization(name).is_some(), "{name} missing");
        }
        assert!(VARIETAL_REGEX.is_match("organisation"));
        assert!(DASH_RUN_REGEX.is_match("\u{2014}"));
    }

    #[test]
    fn varietal_table_has_unique_keys() {
        assert_eq!(VARIETAL_LOOKUP.len(), VARIETAL_WORDS.len());
    }

    #[test]
    fn varietal_lookup_maps_to_preferred() {
        assert_eq!(preferred_spelling("licence"), Some("license"));
        assert_eq!(preferred_spelling("owner"), Some("holder"));
        assert_eq!(preferred_spelling("license"), None);
    }

    #[test]
    fn spelling_regex_respects_word_boundaries() {
        assert!(!VARIETAL_REGEX.is_match("percentage"));
        assert!(!VARIETAL_REGEX.is_match("owners"));
        assert!(VARIETAL_REGEX.is_match("the owner of"));
    }

    #[test]
    fn unknown_rule_is_absent() {
        assert!(strip_pattern("no_such_rule").is_none());
        assert!(normalization("no_such_rule").is_none());
    }

    #[test]
    fn end_of_terms_matches_decorated_anchor() {
        let re = rule("end_of_terms");
        assert!(re.is_match("text\n   END OF TERMS AND CONDITIONS\nmore"));
        assert!(re.is_match("## End of the Terms and Conditions ##"));
        assert!(!re.is_match("the end of terms and conditions applies"));
    }
}
