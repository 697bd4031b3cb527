//! License documents and their lazily derived views.
//!
//! A [`LicenseDocument`] wraps one immutable input. Everything else is
//! derived from it on first access and cached for the lifetime of the
//! document:
//!
//! ```text
//! raw_content
//!   └─ content_without_title_and_version   (Phase A, case preserved)
//!        └─ normalized_content             (Phase B)
//!             ├─ word_set
//!             ├─ field_set
//!             │    └─ fieldless_word_set
//!             ├─ content_length
//!             └─ fingerprint
//! ```
//!
//! Each cache is a `OnceLock`, so a document can be shared across threads
//! and every view is computed at most once.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use canonical::{CanonicalizeConfig, LicenseEntry, Normalizer, StaticRegistry};
//!
//! let registry = StaticRegistry::new(vec![LicenseEntry::new("mit", "MIT License", "MIT License")]);
//! let normalizer = Arc::new(Normalizer::new(&registry, CanonicalizeConfig::default()).unwrap());
//!
//! let doc = normalizer.document("MIT License\n\nPermission is hereby granted.");
//! assert_eq!(doc.normalized_content(), "permission is hereby granted.");
//! assert!(doc.word_set().contains("granted"));
//! assert_eq!(doc.fingerprint().len(), 64);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::hash::hash_text;
use crate::pipeline::Normalizer;
use crate::token::{field_set, fieldless_word_set, word_set};
use crate::wrap::wrap;

/// One license text and its cached derived views.
pub struct LicenseDocument {
    normalizer: Arc<Normalizer>,
    raw_content: Option<String>,
    filename: Option<String>,
    without_title_and_version: OnceLock<String>,
    normalized: OnceLock<String>,
    words: OnceLock<HashSet<String>>,
    fields: OnceLock<HashSet<String>>,
    fieldless_words: OnceLock<HashSet<String>>,
    length: OnceLock<usize>,
    fingerprint: OnceLock<String>,
}

impl fmt::Debug for LicenseDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LicenseDocument")
            .field("filename", &self.filename)
            .field("raw_len", &self.raw_content.as_ref().map(String::len))
            .field("normalized", &self.normalized.get().is_some())
            .finish_non_exhaustive()
    }
}

impl LicenseDocument {
    pub fn new(
        normalizer: Arc<Normalizer>,
        raw_content: Option<String>,
        filename: Option<String>,
    ) -> Self {
        Self {
            normalizer,
            raw_content,
            filename,
            without_title_and_version: OnceLock::new(),
            normalized: OnceLock::new(),
            words: OnceLock::new(),
            fields: OnceLock::new(),
            fieldless_words: OnceLock::new(),
            length: OnceLock::new(),
            fingerprint: OnceLock::new(),
        }
    }

    pub fn raw_content(&self) -> Option<&str> {
        self.raw_content.as_deref()
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn normalizer(&self) -> &Arc<Normalizer> {
        &self.normalizer
    }

    /// Normalization behavior version this document was produced under.
    pub fn canonical_version(&self) -> u32 {
        self.normalizer.config().version
    }

    /// Phase A checkpoint: case preserved, title and version removed.
    ///
    /// Attribution detection wants the original case, which is why this
    /// view exists separately from [`normalized_content`](Self::normalized_content).
    pub fn content_without_title_and_version(&self) -> &str {
        self.without_title_and_version.get_or_init(|| {
            match self.raw_content.as_deref() {
                Some(raw) => self
                    .normalizer
                    .strip_title_and_version(raw, self.filename.as_deref()),
                None => String::new(),
            }
        })
    }

    /// Canonical lowercase text. Empty when the document has no content.
    pub fn normalized_content(&self) -> &str {
        self.normalized.get_or_init(|| {
            if self.raw_content.is_none() {
                return String::new();
            }
            let stripped = self.content_without_title_and_version();
            self.normalizer.normalize_stripped(stripped)
        })
    }

    /// Distinct tokens of the normalized content.
    pub fn word_set(&self) -> &HashSet<String> {
        self.words
            .get_or_init(|| word_set(self.normalized_content()))
    }

    /// Distinct placeholder occurrences found by the field grammar.
    pub fn field_set(&self) -> &HashSet<String> {
        self.fields.get_or_init(|| {
            field_set(
                self.normalized_content(),
                self.normalizer.field_grammar(),
            )
        })
    }

    /// Word set minus the words that only occur inside placeholders.
    pub fn fieldless_word_set(&self) -> &HashSet<String> {
        self.fieldless_words
            .get_or_init(|| fieldless_word_set(self.word_set(), self.field_set()))
    }

    /// Length of the normalized content in characters.
    pub fn content_length(&self) -> usize {
        *self
            .length
            .get_or_init(|| self.normalized_content().chars().count())
    }

    /// Hex SHA-256 of the normalized content.
    pub fn fingerprint(&self) -> &str {
        self.fingerprint
            .get_or_init(|| hash_text(self.normalized_content()))
    }

    /// Normalized content wrapped for display. Falls back to the configured
    /// width when `width` is `None`.
    pub fn wrapped_content(&self, width: Option<usize>) -> String {
        let width = width.unwrap_or(self.normalizer.config().wrap_width);
        wrap(self.normalized_content(), width)
    }
}
