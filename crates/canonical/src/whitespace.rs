//! Whitespace cleanup shared by the strip rules.
//!
//! Every strip replaces its matches with a single ASCII space, then runs
//! [`squeeze_spaces`] so that the replacement never leaves double spaces or
//! a space at either edge. Newlines are left alone: several later rules are
//! line-anchored and still need them.
//!
//! # Examples
//!
//! ```rust
//! use canonical::squeeze_spaces;
//!
//! assert_eq!(squeeze_spaces("  hello   world  "), "hello world");
//! assert_eq!(squeeze_spaces("a  b\n\n  c"), "a b\n\n c");
//! ```

/// Collapses runs of ASCII spaces into one space and trims whitespace from
/// both ends.
///
/// Only U+0020 runs are squeezed; tabs and newlines inside the text are
/// kept as they are. Leading and trailing whitespace of any kind is removed.
///
/// ```rust
/// use canonical::squeeze_spaces;
///
/// assert_eq!(squeeze_spaces(""), "");
/// assert_eq!(squeeze_spaces("   \n\t   "), "");
/// assert_eq!(squeeze_spaces("tab\t\tkept"), "tab\t\tkept");
/// ```
pub fn squeeze_spaces(text: &str) -> String {
    let mut squeezed = String::with_capacity(text.len());
    let mut previous_space = false;
    for ch in text.trim().chars() {
        if ch == ' ' {
            if previous_space {
                continue;
            }
            previous_space = true;
        } else {
            previous_space = false;
        }
        squeezed.push(ch);
    }
    squeezed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squeezes_only_spaces() {
        assert_eq!(squeeze_spaces("a    b"), "a b");
        assert_eq!(squeeze_spaces("a \n  b"), "a \n b");
    }

    #[test]
    fn already_clean_text_unchanged() {
        assert_eq!(squeeze_spaces("hello world"), "hello world");
    }

    #[test]
    fn trims_unicode_edges() {
        assert_eq!(squeeze_spaces("\u{00A0}hello\u{00A0}"), "hello");
    }
}
