//! Workspace umbrella crate for license fingerprinting (LICFP).
//!
//! This crate stitches the normalizer (`canonical`) and the scorer
//! (`matcher`) together so callers can go from two raw license texts to a
//! verdict with a single API entry point, and load both layers' settings
//! from one YAML file.

pub mod config;

pub use canonical::{
    BracketFieldGrammar, CanonicalError, CanonicalizeConfig, CopyrightMatcher,
    DefaultCopyrightMatcher, FieldGrammar, LicenseDocument, LicenseEntry, LicenseFilter,
    LicenseRegistry, NormalizeOp, Normalizer, StaticRegistry, StripOp, Token, hash_text, tokenize,
    wrap,
};
pub use config::{ConfigLoadError, LicenseYamlEntry, LicfpConfig};
pub use matcher::{
    MatchConfig, MatchError, MatchHit, SimilarityReport, best_matches, format_percent,
    length_delta, similarity, similarity_report,
};

use std::error::Error;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

/// Errors surfaced by the umbrella helpers.
#[derive(Debug, Clone, PartialEq)]
pub enum LicfpError {
    Canonical(CanonicalError),
    Match(MatchError),
}

impl fmt::Display for LicfpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LicfpError::Canonical(err) => write!(f, "normalizer failure: {err}"),
            LicfpError::Match(err) => write!(f, "matcher failure: {err}"),
        }
    }
}

impl Error for LicfpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LicfpError::Canonical(err) => Some(err),
            LicfpError::Match(err) => Some(err),
        }
    }
}

impl From<CanonicalError> for LicfpError {
    fn from(value: CanonicalError) -> Self {
        LicfpError::Canonical(value)
    }
}

impl From<MatchError> for LicfpError {
    fn from(value: MatchError) -> Self {
        LicfpError::Match(value)
    }
}

/// Metrics observer for normalization and comparison.
pub trait ComparisonMetrics: Send + Sync {
    fn record_normalize(&self, latency: Duration, content_length: usize);
    fn record_compare(&self, latency: Duration, score: f64, exact: bool);
}

/// Install or clear the global comparison metrics recorder.
pub fn set_comparison_metrics(recorder: Option<Arc<dyn ComparisonMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn ComparisonMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn ComparisonMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn ComparisonMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn ComparisonMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_normalize(self, content_length: usize) {
        self.recorder
            .record_normalize(self.start.elapsed(), content_length);
    }

    fn record_compare(self, score: f64, exact: bool) {
        self.recorder
            .record_compare(self.start.elapsed(), score, exact);
    }
}

/// Builds a normalizer from the config's `canonical` section and `registry`.
pub fn build_normalizer(
    config: &LicfpConfig,
    registry: &dyn LicenseRegistry,
) -> Result<Arc<Normalizer>, LicfpError> {
    let normalizer = Normalizer::new(registry, config.canonical.clone())?;
    Ok(Arc::new(normalizer))
}

/// Installs the process-wide normalizer, using the config's `licenses`
/// section as the registry.
///
/// Fails with [`CanonicalError::AlreadyInitialized`] on a second call.
pub fn init(config: &LicfpConfig) -> Result<Arc<Normalizer>, LicfpError> {
    let registry = config.registry();
    let normalizer = Normalizer::new(&registry, config.canonical.clone())?;
    let shared = Normalizer::install_global(normalizer)?;
    info!(
        licenses = config.licenses.len(),
        config_version = config.canonical.version,
        "normalizer_installed"
    );
    Ok(shared)
}

/// Result of comparing a known license text with a candidate text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Normalized contents were identical.
    pub exact: bool,
    pub template_fingerprint: String,
    pub candidate_fingerprint: String,
    pub report: SimilarityReport,
}

impl Comparison {
    pub fn score(&self) -> f64 {
        self.report.score
    }

    /// Score formatted as `"NN.NN%"`.
    pub fn percent(&self) -> String {
        format_percent(self.report.score)
    }
}

/// Normalizes raw text into a document, recording normalization metrics.
pub fn normalize_document(normalizer: &Arc<Normalizer>, raw: &str) -> LicenseDocument {
    let mut span = MetricsSpan::start();
    let doc = normalizer.document(raw);
    let length = doc.content_length();
    if let Some(span) = span.take() {
        span.record_normalize(length);
    }
    doc
}

/// Compares two already-built documents. `template` goes on the
/// field-aware side of the scorer.
pub fn compare_documents(template: &LicenseDocument, candidate: &LicenseDocument) -> Comparison {
    let mut span = MetricsSpan::start();
    let exact = template.fingerprint() == candidate.fingerprint();
    let report = similarity_report(template, candidate);
    if let Some(span) = span.take() {
        span.record_compare(report.score, exact);
    }
    Comparison {
        exact,
        template_fingerprint: template.fingerprint().to_string(),
        candidate_fingerprint: candidate.fingerprint().to_string(),
        report,
    }
}

/// Normalizes both texts with `normalizer` and compares them.
pub fn compare_texts(normalizer: &Arc<Normalizer>, template: &str, candidate: &str) -> Comparison {
    let template = normalize_document(normalizer, template);
    let candidate = normalize_document(normalizer, candidate);
    compare_documents(&template, &candidate)
}

/// Ranks raw candidate texts against `text` under `config`.
pub fn rank_texts(
    normalizer: &Arc<Normalizer>,
    text: &str,
    candidates: &[(&str, &str)],
    config: &MatchConfig,
) -> Result<Vec<MatchHit>, LicfpError> {
    let query = normalize_document(normalizer, text);
    let docs: Vec<(&str, LicenseDocument)> = candidates
        .iter()
        .map(|(key, raw)| (*key, normalize_document(normalizer, raw)))
        .collect();
    let hits = best_matches(&query, docs.iter().map(|(key, doc)| (*key, doc)), config)?;
    Ok(hits)
}
