//! License text normalization layer.
//!
//! This crate turns a license file into a canonical form so that two copies
//! of the same license compare equal no matter how they were formatted,
//! titled, attributed or spelled. The similarity scorer in `matcher` and the
//! exact-match lookup both build on what comes out of here.
//!
//! ## What we do
//!
//! - Optional HTML-to-text pre-pass for `.html` sources
//! - Phase A: strip structure (BOM, rules, comments, headings, title,
//!   version) while case is preserved
//! - Phase B: lowercase, unify punctuation and spelling, strip attribution,
//!   markup and boilerplate, collapse whitespace
//! - Word sets, field sets and fieldless word sets for overlap scoring
//! - SHA-256 fingerprints for exact-text lookup
//! - Line wrapping for display
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock-dependent output, no locale dependence. The same raw
//! text and the same registry always normalize to the same content and the
//! same fingerprint.
//!
//! ## Invariants worth knowing
//!
//! - `normalized_content` is lowercase with no leading or trailing
//!   whitespace and no space runs
//! - word and field sets are derived from normalized content, never raw
//! - every derived view of a document is computed at most once
//!
//! ```rust
//! use std::sync::Arc;
//! use canonical::{CanonicalizeConfig, LicenseEntry, Normalizer, StaticRegistry};
//!
//! let registry = StaticRegistry::new(vec![LicenseEntry::new("mit", "MIT License", "MIT License")]);
//! let normalizer = Arc::new(Normalizer::new(&registry, CanonicalizeConfig::default()).unwrap());
//!
//! let a = normalizer.document("MIT License\n\nThe   Licensor's colour & http://x.org");
//! let b = normalizer.document("the licensor's color and https://x.org");
//! assert_eq!(a.fingerprint(), b.fingerprint());
//! ```

mod config;
mod document;
mod engine;
mod error;
mod grammar;
mod hash;
mod html;
mod pipeline;
mod registry;
mod rules;
mod token;
mod whitespace;
mod wrap;

pub use crate::config::CanonicalizeConfig;
pub use crate::document::LicenseDocument;
pub use crate::engine::{
    ContentBuffer, NormalizeOp, StripContext, StripOp, StripProcedure,
};
pub use crate::error::CanonicalError;
pub use crate::grammar::{
    BracketFieldGrammar, CopyrightMatcher, DefaultCopyrightMatcher, FieldGrammar, FIELD_KEYS,
};
pub use crate::hash::{hash_text, is_fingerprint};
pub use crate::html::html_to_text;
pub use crate::pipeline::{Normalizer, PHASE_A, PHASE_B_NORMALIZE, PHASE_B_STRIP};
pub use crate::registry::{
    derive_title_pattern, LicenseEntry, LicenseFilter, LicenseRegistry, StaticRegistry,
    TitleMatcher,
};
pub use crate::rules::{
    normalization, preferred_spelling, strip_pattern, DASH_RUN, NORMALIZATIONS, STRIP_PATTERNS,
    VARIETAL_WORDS,
};
pub use crate::token::{field_set, fieldless_word_set, tokenize, word_set, Token};
pub use crate::whitespace::squeeze_spaces;
pub use crate::wrap::wrap;
