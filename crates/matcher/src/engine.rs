use std::cmp::Ordering;
use std::time::Instant;

use canonical::LicenseDocument;
use tracing::debug;

use crate::types::{MatchConfig, MatchError, MatchHit, SimilarityReport};


/// Characters of length variance each field absorbs before the raw delta
/// applies.
const FIELD_LENGTH_ALLOWANCE: usize = 2;

/// Weight of the length delta in the denominator.
const LENGTH_PENALTY_DIVISOR: f64 = 10.0;

/// Absolute difference between the normalized lengths of `a` and `b`.
pub fn length_delta(a: &LicenseDocument, b: &LicenseDocument) -> usize {
    a.content_length().abs_diff(b.content_length())
}

/// Similarity of `a` to `b` in percent.
///
/// Not symmetric: placeholders are discounted on the left side only, so a
/// template belongs on the left and a filled-in copy on the right.
pub fn similarity(a: &LicenseDocument, b: &LicenseDocument) -> f64 {
    similarity_report(a, b).score
}

/// Same as [`similarity`], with every intermediate quantity.
pub fn similarity_report(a: &LicenseDocument, b: &LicenseDocument) -> SimilarityReport {
    let start = Instant::now();
    let left = a.fieldless_word_set();
    let right = b.word_set();
    let fields = a.field_set().len();

    let overlap = left.intersection(right).count();
    let total = left.len() as i64 + right.len() as i64 - fields as i64;

    let length_delta = length_delta(a, b);
    let adjusted_delta = match length_delta.checked_sub(FIELD_LENGTH_ALLOWANCE * fields) {
        Some(adjusted) if adjusted > 0 => adjusted,
        _ => length_delta,
    };

    let denominator = total as f64 + adjusted_delta as f64 / LENGTH_PENALTY_DIVISOR;
    let score = if denominator > 0.0 {
        overlap as f64 * 200.0 / denominator
    } else {
        0.0
    };

    debug!(
        overlap,
        total,
        length_delta,
        adjusted_delta,
        score,
        elapsed_micros = start.elapsed().as_micros(),
        "similarity_scored"
    );

    SimilarityReport {
        overlap,
        total,
        length_delta,
        adjusted_delta,
        score,
    }
}

/// Formats a percentage with two decimals, e.g. `"97.53%"`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Scores `doc` against every candidate and returns the best hits.
///
/// Candidates with the same fingerprint as `doc` are reported at 100 without
/// scoring. Hits below `config.threshold` are dropped; the rest are sorted
/// by score, highest first, and truncated to `config.max_results`. Ties keep
/// candidate order.
pub fn best_matches<'a, I>(
    doc: &LicenseDocument,
    candidates: I,
    config: &MatchConfig,
) -> Result<Vec<MatchHit>, MatchError>
where
    I: IntoIterator<Item = (&'a str, &'a LicenseDocument)>,
{
    config.validate()?;
    let start = Instant::now();

    let mut hits: Vec<MatchHit> = Vec::new();
    let mut considered = 0usize;
    for (key, candidate) in candidates {
        considered += 1;
        let exact = candidate.fingerprint() == doc.fingerprint();
        let score = if exact {
            100.0
        } else {
            similarity(candidate, doc)
        };
        if score >= config.threshold {
            hits.push(MatchHit {
                key: key.to_string(),
                score,
                exact,
            });
        }
    }

    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    hits.truncate(config.max_results);

    debug!(
        considered,
        returned = hits.len(),
        threshold = config.threshold,
        elapsed_micros = start.elapsed().as_micros(),
        "best_matches_complete"
    );
    Ok(hits)
}
