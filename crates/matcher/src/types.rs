use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for ranking candidates with [`best_matches`](crate::best_matches).
///
/// `MatchConfig` is cheap to clone and serde-friendly so it can be embedded
/// in higher-level configs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Minimum similarity, in percent, for a candidate to be reported.
    #[serde(default = "MatchConfig::default_threshold")]
    pub threshold: f64,
    /// Maximum number of hits to return to the caller.
    #[serde(default = "MatchConfig::default_max_results")]
    pub max_results: usize,
}

impl MatchConfig {
    pub(crate) fn default_threshold() -> f64 {
        98.0
    }

    pub(crate) fn default_max_results() -> usize {
        5
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), MatchError> {
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(MatchError::InvalidConfig(
                "threshold must be between 0.0 and 100.0".into(),
            ));
        }
        if self.max_results == 0 {
            return Err(MatchError::InvalidConfig(
                "max_results must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
            max_results: Self::default_max_results(),
        }
    }
}

/// Breakdown of one similarity computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimilarityReport {
    /// Words shared by the left fieldless set and the right word set.
    pub overlap: usize,
    /// Left fieldless words plus right words, minus left fields.
    pub total: i64,
    /// Absolute difference in normalized length.
    pub length_delta: usize,
    /// Length delta after the per-field allowance, or the raw delta once the
    /// allowance is exhausted.
    pub adjusted_delta: usize,
    /// Final score in percent.
    pub score: f64,
}

/// A single ranked candidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchHit {
    /// Caller-supplied candidate name, usually a license key.
    pub key: String,
    /// Similarity in percent.
    pub score: f64,
    /// True when the fingerprints were equal and scoring was skipped.
    pub exact: bool,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("invalid match configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = MatchConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.threshold, 98.0);
        assert_eq!(cfg.max_results, 5);
    }

    #[test]
    fn invalid_max_results_rejected() {
        let cfg = MatchConfig {
            max_results: 0,
            ..MatchConfig::default()
        };
        let err = cfg.validate().expect_err("config should be invalid");
        match err {
            MatchError::InvalidConfig(msg) => assert!(msg.contains("max_results")),
        }
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        for threshold in [-1.0, 100.5, f64::NAN] {
            let cfg = MatchConfig {
                threshold,
                ..MatchConfig::default()
            };
            let err = cfg.validate().expect_err("config should be invalid");
            match err {
                MatchError::InvalidConfig(msg) => assert!(msg.contains("threshold")),
            }
        }
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: MatchConfig = serde_json::from_str(r#"{"threshold": 90.0}"#).expect("parse");
        assert_eq!(cfg.threshold, 90.0);
        assert_eq!(cfg.max_results, 5);
    }
}
