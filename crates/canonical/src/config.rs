//! Configuration types for the license normalization pipeline.
//!
//! This module defines [`CanonicalizeConfig`], which carries the few knobs the
//! pipeline exposes. The rule tables themselves are fixed; the config only
//! bounds loops, decides when the HTML pre-pass runs, and sets the default
//! display width.
//!
//! # Versioning
//!
//! The `version` field is recorded on every [`Normalizer`](crate::Normalizer) and
//! reported per document by [`LicenseDocument::canonical_version`](crate::LicenseDocument::canonical_version).
//! Any change to normalization behavior (even bug fixes) should be
//! accompanied by a version bump so that stored fingerprints can be told
//! apart from fresh ones.
//!
//! # Examples
//!
//! ```rust
//! use canonical::CanonicalizeConfig;
//!
//! let config = CanonicalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert_eq!(config.max_fixpoint_iterations, 32);
//! assert_eq!(config.wrap_width, 80);
//! assert!(config.validate().is_ok());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the license normalization pipeline.
///
/// `CanonicalizeConfig` is cheap to clone and serializable so it can be
/// embedded in larger configuration files:
///
/// ```json
/// {
///   "version": 1,
///   "max_fixpoint_iterations": 32,
///   "html_extensions": ["html", "htm"],
///   "wrap_width": 80
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CanonicalizeConfig {
    /// Semantic version of the normalization behavior. Must be >= 1.
    pub version: u32,

    /// Upper bound on repetitions of the fixpoint strips (title, copyright).
    ///
    /// Realistic license texts converge in two or three passes; the cap only
    /// guards against a pathological registry pattern that matches the empty
    /// string forever.
    pub max_fixpoint_iterations: usize,

    /// File extensions (without the dot, case-insensitive) that trigger the
    /// HTML-to-text pre-pass.
    pub html_extensions: Vec<String>,

    /// Default line width for [`wrap`](crate::wrap).
    pub wrap_width: usize,
}

impl CanonicalizeConfig {
    /// Checks the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if self.max_fixpoint_iterations == 0 {
            return Err(CanonicalError::InvalidConfig(
                "max_fixpoint_iterations must be >= 1".into(),
            ));
        }
        if self.wrap_width == 0 {
            return Err(CanonicalError::InvalidConfig(
                "wrap_width must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Returns true when `filename` carries one of the configured HTML
    /// extensions.
    ///
    /// ```rust
    /// use canonical::CanonicalizeConfig;
    ///
    /// let cfg = CanonicalizeConfig::default();
    /// assert!(cfg.is_html_filename("LICENSE.HTML"));
    /// assert!(cfg.is_html_filename("docs/license.htm"));
    /// assert!(!cfg.is_html_filename("LICENSE.md"));
    /// assert!(!cfg.is_html_filename("LICENSE"));
    /// ```
    pub fn is_html_filename(&self, filename: &str) -> bool {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.html_extensions
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

impl Default for CanonicalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            max_fixpoint_iterations: 32,
            html_extensions: vec!["html".into(), "htm".into()],
            wrap_width: 80,
        }
    }
}
