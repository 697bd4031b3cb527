//! License registry seam and the title matcher built from it.
//!
//! The registry of known licenses lives outside this crate. It only has to
//! answer one query: every license, hidden ones included and pseudo ones
//! excluded, each with a title, a version-tolerant title pattern and a name
//! without version. [`TitleMatcher`] folds those answers into a single
//! alternation that the pipeline strips repeatedly.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Which classes of license a registry query should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseFilter {
    pub include_hidden: bool,
    pub include_pseudo: bool,
}

impl LicenseFilter {
    /// The query the title matcher issues: hidden licenses in, pseudo out.
    pub const TITLES: LicenseFilter = LicenseFilter {
        include_hidden: true,
        include_pseudo: false,
    };

    fn admits(&self, entry: &LicenseEntry) -> bool {
        (self.include_hidden || !entry.hidden) && (self.include_pseudo || !entry.pseudo)
    }
}

/// One known license as seen by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseEntry {
    /// Registry key, e.g. `mit` or `apache-2.0`.
    pub key: String,
    /// Display title, e.g. `Apache License 2.0`.
    pub title: String,
    /// Case-insensitive regex source matching the title with its version.
    pub title_pattern: String,
    /// Title with the version removed, e.g. `Apache License`.
    pub name_without_version: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub pseudo: bool,
}

impl LicenseEntry {
    /// Builds an entry whose title pattern is derived from `title`.
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        name_without_version: impl Into<String>,
    ) -> Self {
        let title = title.into();
        Self {
            key: key.into(),
            title_pattern: derive_title_pattern(&title),
            title,
            name_without_version: name_without_version.into(),
            hidden: false,
            pseudo: false,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn pseudo(mut self) -> Self {
        self.pseudo = true;
        self
    }
}

/// Derives a version-tolerant title pattern.
///
/// A leading "the" is dropped (the matcher accepts it anyway), the word
/// "license" becomes optional and accepts the "licence" spelling, and a
/// `N.M` version accepts `version N.M`, `vN.M` and `, version N.M`.
///
/// ```rust
/// use canonical::derive_title_pattern;
/// use regex::Regex;
///
/// let re = Regex::new(&format!("(?i){}", derive_title_pattern("Apache License 2.0"))).unwrap();
/// assert!(re.is_match("apache license, version 2.0"));
/// assert!(re.is_match("Apache Licence v2.0"));
/// assert!(!re.is_match("apache license 1.1"));
/// ```
pub fn derive_title_pattern(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let without_article = lowered.strip_prefix("the ").unwrap_or(&lowered);
    let without_comma = without_article.replace(", version ", " ");

    let mut pattern = String::with_capacity(without_comma.len() * 2);
    for (idx, word) in without_comma.split_whitespace().enumerate() {
        let separator = if idx == 0 { "" } else { r"\s+" };
        if word == "license" || word == "licence" {
            pattern.push_str(&format!(r"(?:{separator}licen[sc]e)?"));
        } else if let Some(version) = version_word(word) {
            pattern.push_str(&format!(
                r",?\s+(?:version\s+|v(?:\.\s*)?)?{}",
                regex::escape(version)
            ));
        } else {
            pattern.push_str(separator);
            pattern.push_str(&regex::escape(word));
        }
    }
    pattern
}

fn version_word(word: &str) -> Option<&str> {
    let bare = word
        .strip_prefix('v')
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        .unwrap_or(word);
    let looks_like_version = bare.starts_with(|c: char| c.is_ascii_digit())
        && bare.chars().all(|c| c.is_ascii_digit() || c == '.');
    looks_like_version.then_some(bare)
}

/// Source of known licenses.
pub trait LicenseRegistry: Send + Sync {
    fn licenses(&self, filter: LicenseFilter) -> Vec<LicenseEntry>;
}

/// In-memory registry, mostly useful for fixtures and embedding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticRegistry {
    entries: Vec<LicenseEntry>,
}

impl StaticRegistry {
    pub fn new(entries: Vec<LicenseEntry>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LicenseRegistry for StaticRegistry {
    fn licenses(&self, filter: LicenseFilter) -> Vec<LicenseEntry> {
        self.entries
            .iter()
            .filter(|entry| filter.admits(entry))
            .cloned()
            .collect()
    }
}

/// Single alternation over every known license title.
///
/// Matches at the start of the content only, optionally behind an opening
/// parenthesis and "the", and runs to the end of that line.
#[derive(Debug, Clone)]
pub struct TitleMatcher {
    regex: Option<Regex>,
}

impl TitleMatcher {
    /// Queries `registry` once and compiles the union of its titles.
    ///
    /// An empty registry yields a matcher that never matches.
    pub fn from_registry(registry: &dyn LicenseRegistry) -> Result<Self, CanonicalError> {
        let licenses = registry.licenses(LicenseFilter::TITLES);
        let mut alternatives = Vec::with_capacity(licenses.len() * 2);

        for license in &licenses {
            // Validate each piece on its own so a bad entry is named in the error.
            Regex::new(&license.title_pattern)
                .map_err(|err| CanonicalError::invalid_pattern(&license.key, err))?;
            alternatives.push(format!("(?:{})", license.title_pattern));
        }
        // Titles carry versions so families can be told apart; stripping can
        // be less strict and also drop the bare family name.
        for license in &licenses {
            if license.title != license.name_without_version
                && !license.name_without_version.trim().is_empty()
            {
                alternatives.push(regex::escape(&license.name_without_version));
            }
        }

        if alternatives.is_empty() {
            return Ok(Self { regex: None });
        }

        let pattern = format!(
            r"(?im)\A\s*\(?(?:the\s+)?(?:{}).*?$",
            alternatives.join("|")
        );
        let regex =
            Regex::new(&pattern).map_err(|err| CanonicalError::invalid_pattern("titles", err))?;
        Ok(Self { regex: Some(regex) })
    }

    pub fn regex(&self) -> Option<&Regex> {
        self.regex.as_ref()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> StaticRegistry {
        StaticRegistry::new(vec![
            LicenseEntry::new("mit", "MIT License", "MIT License"),
            LicenseEntry::new("apache-2.0", "Apache License 2.0", "Apache License"),
            LicenseEntry::new("hidden-1.0", "Hidden Public License 1.0", "Hidden Public License")
                .hidden(),
            LicenseEntry::new("other", "Other", "Other").pseudo(),
        ])
    }

    #[test]
    fn filter_excludes_pseudo_and_keeps_hidden() {
        let keys: Vec<String> = registry()
            .licenses(LicenseFilter::TITLES)
            .into_iter()
            .map(|l| l.key)
            .collect();
        assert_eq!(keys, vec!["mit", "apache-2.0", "hidden-1.0"]);
    }

    #[test]
    fn filter_can_exclude_hidden() {
        let filter = LicenseFilter {
            include_hidden: false,
            include_pseudo: true,
        };
        let keys: Vec<String> = registry()
            .licenses(filter)
            .into_iter()
            .map(|l| l.key)
            .collect();
        assert_eq!(keys, vec!["mit", "apache-2.0", "other"]);
    }

    #[test]
    fn matcher_matches_titles_at_start_only() {
        let matcher = TitleMatcher::from_registry(&registry()).expect("matcher");
        assert!(matcher.is_match("The MIT License\n\nPermission"));
        assert!(matcher.is_match("  (mit license)"));
        assert!(matcher.is_match("Apache License\nVersion 2.0"));
        assert!(matcher.is_match("hidden public license v1.0"));
        assert!(!matcher.is_match("Permission\nMIT License"));
        assert!(!matcher.is_match("Other"));
    }

    #[test]
    fn empty_registry_never_matches() {
        let matcher = TitleMatcher::from_registry(&StaticRegistry::default()).expect("matcher");
        assert!(matcher.regex().is_none());
        assert!(!matcher.is_match("MIT License"));
    }

    #[test]
    fn invalid_title_pattern_is_reported() {
        let mut entry = LicenseEntry::new("broken", "Broken", "Broken");
        entry.title_pattern = "(unclosed".into();
        let err = TitleMatcher::from_registry(&StaticRegistry::new(vec![entry]))
            .expect_err("pattern must fail");
        assert!(matches!(err, CanonicalError::InvalidPattern { ref name, .. } if name == "broken"));
    }

    #[test]
    fn derived_pattern_tolerates_version_styles() {
        let re = Regex::new(&format!(
            "(?i){}",
            derive_title_pattern("GNU General Public License v3.0")
        ))
        .expect("compile");
        assert!(re.is_match("gnu general public license v3.0"));
        assert!(re.is_match("GNU General Public License, version 3.0"));
        assert!(re.is_match("gnu general public 3.0"));
    }
}
