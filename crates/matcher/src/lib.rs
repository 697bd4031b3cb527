//! # License matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` scores normalized license documents from `canonical` against
//! each other. The score is a Dice-style word overlap in percent, with two
//! adjustments:
//!
//! - words that only occur inside template placeholders (`[fullname]`,
//!   `[year]`, ...) are discounted on the left side, so a filled-in copy
//!   still scores close to its template
//! - the denominator grows with the difference in normalized length, so a
//!   short excerpt of a long license does not look like a match
//!
//! The score is not symmetric. Put the template (the known license) on the
//! left and the text being identified on the right.
//!
//! ## Core Types
//!
//! - [`similarity`] / [`similarity_report`]: the score, alone or with its
//!   intermediate quantities ([`SimilarityReport`]).
//! - [`length_delta`]: absolute difference in normalized length (symmetric).
//! - [`best_matches`]: ranks caller-supplied candidates under a
//!   [`MatchConfig`], short-circuiting on equal fingerprints.
//! - [`format_percent`]: `"NN.NN%"` display helper.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use canonical::{CanonicalizeConfig, Normalizer, StaticRegistry};
//! use matcher::{format_percent, similarity};
//!
//! let normalizer = Arc::new(
//!     Normalizer::new(&StaticRegistry::default(), CanonicalizeConfig::default()).unwrap(),
//! );
//! let template = normalizer.document("The name of [fullname] may not be used.");
//! let copy = normalizer.document("The name of Jane Doe may not be used.");
//!
//! let score = similarity(&template, &copy);
//! assert!(score > 80.0);
//! println!("{}", format_percent(score));
//! ```

mod engine;
mod types;

pub use engine::{best_matches, format_percent, length_delta, similarity, similarity_report};
pub use types::{MatchConfig, MatchError, MatchHit, SimilarityReport};
