//! Line wrapping for human-readable display.
//!
//! Nothing here feeds a comparison. Bullet items get their own paragraph,
//! soft-wrapped lines are joined, and lines longer than the target width
//! are re-flowed on whitespace. Short lines and horizontal rules pass
//! through untouched.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::rules::rule;

static SOFT_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\n])\n([^\n])").expect("soft break regex is valid"));

/// Wraps `text` at `width` columns (counted in characters).
///
/// ```rust
/// use canonical::wrap;
///
/// let text = "permission is hereby granted\nfree of charge\n\n* to any person";
/// assert_eq!(
///     wrap(text, 20),
///     "permission is hereby\ngranted free of\ncharge\n\n* to any person"
/// );
/// ```
pub fn wrap(text: &str, width: usize) -> String {
    let separated = rule("bullet").replace_all(text, |caps: &Captures<'_>| {
        format!("\n\n{} ", caps[0].trim())
    });
    let joined = SOFT_BREAK.replace_all(&separated, "${1} ${2}");

    let hrs = rule("hrs");
    let lines: Vec<String> = joined
        .split('\n')
        .map(|line| {
            if hrs.is_match(line) || line.chars().count() <= width {
                line.to_string()
            } else {
                reflow(line, width)
            }
        })
        .collect();
    lines.join("\n").trim().to_string()
}

/// Greedy fill: as many words per line as fit. A word wider than `width`
/// gets a line of its own.
fn reflow(line: &str, width: usize) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            out.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out.join("\n")
}
