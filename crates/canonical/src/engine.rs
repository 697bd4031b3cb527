//! Transformation engine: strip and normalize operations over a buffer.
//!
//! Every operation the pipeline performs is one of two kinds:
//!
//! - **strip**: replace matches with a space, squeeze spaces, trim.
//! - **normalize**: replace matches with a replacement string (with `$1`
//!   style captures) or with a per-match dictionary lookup.
//!
//! Most named operations are a single rule from the tables in
//! [`rules`](crate::rules). The irregular ones (fixpoint loops, conditional
//! strips, truncation) are variants of [`StripOp`] that map to their own
//! procedure; [`StripOp::procedure`] is the only place that mapping lives.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use regex::{Captures, Regex};
use tracing::{trace, warn};

use crate::config::CanonicalizeConfig;
use crate::error::CanonicalError;
use crate::html::html_to_text;
use crate::registry::TitleMatcher;
use crate::rules::{self, BULLET_GAP_REGEX, DASH_RUN_REGEX, VARIETAL_LOOKUP, VARIETAL_REGEX};
use crate::whitespace::squeeze_spaces;

/// Named strip operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StripOp {
    Bom,
    Html,
    Hrs,
    Comments,
    MarkdownHeadings,
    Title,
    Version,
    Cc0Optional,
    UnlicenseOptional,
    Borders,
    Url,
    Copyright,
    BlockMarkup,
    SpanMarkup,
    LinkMarkup,
    DevelopedBy,
    EndOfTerms,
    Whitespace,
    MitOptional,
}

/// How a [`StripOp`] is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripProcedure {
    /// Blank every match of the named table rule.
    Blank(&'static str),
    /// Replace every match of the named table rule with its first capture.
    Unwrap(&'static str),
    Html,
    Comments,
    Title,
    Copyright,
    Cc0Optional,
    UnlicenseOptional,
    EndOfTerms,
}

impl StripOp {
    pub const ALL: [StripOp; 19] = [
        StripOp::Bom,
        StripOp::Html,
        StripOp::Hrs,
        StripOp::Comments,
        StripOp::MarkdownHeadings,
        StripOp::Title,
        StripOp::Version,
        StripOp::Cc0Optional,
        StripOp::UnlicenseOptional,
        StripOp::Borders,
        StripOp::Url,
        StripOp::Copyright,
        StripOp::BlockMarkup,
        StripOp::SpanMarkup,
        StripOp::LinkMarkup,
        StripOp::DevelopedBy,
        StripOp::EndOfTerms,
        StripOp::Whitespace,
        StripOp::MitOptional,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StripOp::Bom => "bom",
            StripOp::Html => "html",
            StripOp::Hrs => "hrs",
            StripOp::Comments => "comments",
            StripOp::MarkdownHeadings => "markdown_headings",
            StripOp::Title => "title",
            StripOp::Version => "version",
            StripOp::Cc0Optional => "cc0_optional",
            StripOp::UnlicenseOptional => "unlicense_optional",
            StripOp::Borders => "borders",
            StripOp::Url => "url",
            StripOp::Copyright => "copyright",
            StripOp::BlockMarkup => "block_markup",
            StripOp::SpanMarkup => "span_markup",
            StripOp::LinkMarkup => "link_markup",
            StripOp::DevelopedBy => "developed_by",
            StripOp::EndOfTerms => "end_of_terms",
            StripOp::Whitespace => "whitespace",
            StripOp::MitOptional => "mit_optional",
        }
    }

    pub fn procedure(self) -> StripProcedure {
        match self {
            StripOp::Bom => StripProcedure::Blank("bom"),
            StripOp::Html => StripProcedure::Html,
            StripOp::Hrs => StripProcedure::Blank("hrs"),
            StripOp::Comments => StripProcedure::Comments,
            StripOp::MarkdownHeadings => StripProcedure::Blank("markdown_headings"),
            StripOp::Title => StripProcedure::Title,
            StripOp::Version => StripProcedure::Blank("version"),
            StripOp::Cc0Optional => StripProcedure::Cc0Optional,
            StripOp::UnlicenseOptional => StripProcedure::UnlicenseOptional,
            StripOp::Borders => StripProcedure::Unwrap("border_markup"),
            StripOp::Url => StripProcedure::Blank("url"),
            StripOp::Copyright => StripProcedure::Copyright,
            StripOp::BlockMarkup => StripProcedure::Blank("block_markup"),
            StripOp::SpanMarkup => StripProcedure::Unwrap("span_markup"),
            StripOp::LinkMarkup => StripProcedure::Unwrap("link_markup"),
            StripOp::DevelopedBy => StripProcedure::Blank("developed_by"),
            StripOp::EndOfTerms => StripProcedure::EndOfTerms,
            StripOp::Whitespace => StripProcedure::Blank("whitespace"),
            StripOp::MitOptional => StripProcedure::Blank("mit_optional"),
        }
    }
}

impl fmt::Display for StripOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StripOp {
    type Err = CanonicalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StripOp::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| CanonicalError::UnknownRule(s.to_string()))
    }
}

/// Named normalize operations, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizeOp {
    Lists,
    Https,
    Ampersands,
    Dashes,
    Quotes,
    Spelling,
    Bullets,
}

impl NormalizeOp {
    pub const ALL: [NormalizeOp; 7] = [
        NormalizeOp::Lists,
        NormalizeOp::Https,
        NormalizeOp::Ampersands,
        NormalizeOp::Dashes,
        NormalizeOp::Quotes,
        NormalizeOp::Spelling,
        NormalizeOp::Bullets,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NormalizeOp::Lists => "lists",
            NormalizeOp::Https => "https",
            NormalizeOp::Ampersands => "ampersands",
            NormalizeOp::Dashes => "dashes",
            NormalizeOp::Quotes => "quotes",
            NormalizeOp::Spelling => "spelling",
            NormalizeOp::Bullets => "bullets",
        }
    }
}

impl fmt::Display for NormalizeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NormalizeOp {
    type Err = CanonicalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NormalizeOp::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| CanonicalError::UnknownRule(s.to_string()))
    }
}

/// Everything the specialized strip procedures need besides the buffer.
#[derive(Debug, Clone, Copy)]
pub struct StripContext<'a> {
    pub titles: &'a TitleMatcher,
    /// Copyright pattern already combined with "all rights reserved".
    pub copyright: &'a Regex,
    pub filename: Option<&'a str>,
    pub config: &'a CanonicalizeConfig,
}

/// Mutable working text for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentBuffer {
    content: String,
}

impl ContentBuffer {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn into_string(self) -> String {
        self.content
    }

    /// Lowercases the whole buffer.
    pub fn lowercase(&mut self) {
        self.content = self.content.to_lowercase();
    }

    /// Runs one named strip operation.
    pub fn strip(&mut self, op: StripOp, ctx: &StripContext<'_>) {
        trace!(rule = op.name(), len = self.content.len(), "strip");
        match op.procedure() {
            StripProcedure::Blank(name) => self.strip_pattern(rules::rule(name)),
            StripProcedure::Unwrap(name) => self.normalize_pattern(rules::rule(name), "${1}"),
            StripProcedure::Html => self.strip_html(ctx),
            StripProcedure::Comments => self.strip_comments(),
            StripProcedure::Title => {
                if let Some(regex) = ctx.titles.regex() {
                    self.strip_until_stable(regex, "title", ctx.config.max_fixpoint_iterations);
                }
            }
            StripProcedure::Copyright => {
                self.strip_until_stable(
                    ctx.copyright,
                    "copyright",
                    ctx.config.max_fixpoint_iterations,
                );
            }
            StripProcedure::Cc0Optional => self.strip_cc0_optional(),
            StripProcedure::UnlicenseOptional => self.strip_unlicense_optional(),
            StripProcedure::EndOfTerms => self.strip_end_of_terms(),
        }
    }

    /// Strips by name: a [`StripOp`] first, then any table rule.
    pub fn strip_named(
        &mut self,
        name: &str,
        ctx: &StripContext<'_>,
    ) -> Result<(), CanonicalError> {
        match name.parse::<StripOp>() {
            Ok(op) => {
                self.strip(op, ctx);
                Ok(())
            }
            Err(_) => self.strip_rule(name),
        }
    }

    /// Blanks every match of a table rule.
    pub fn strip_rule(&mut self, name: &str) -> Result<(), CanonicalError> {
        let regex =
            rules::strip_pattern(name).ok_or_else(|| CanonicalError::UnknownRule(name.into()))?;
        self.strip_pattern(regex);
        Ok(())
    }

    /// Replaces every match with a space, squeezes spaces and trims.
    pub fn strip_pattern(&mut self, regex: &Regex) {
        let stripped = {
            let replaced = regex.replace_all(&self.content, " ");
            squeeze_spaces(&replaced)
        };
        self.content = stripped;
    }

    /// Runs one named normalize operation.
    pub fn normalize(&mut self, op: NormalizeOp) {
        trace!(rule = op.name(), len = self.content.len(), "normalize");
        match op {
            NormalizeOp::Dashes => self.normalize_dashes(),
            NormalizeOp::Spelling => {
                self.normalize_dictionary(&VARIETAL_REGEX, &VARIETAL_LOOKUP);
            }
            NormalizeOp::Bullets => {
                self.normalize_pattern(rules::rule("bullet"), "\n\n* ");
                self.normalize_pattern(&BULLET_GAP_REGEX, ")(");
            }
            NormalizeOp::Lists
            | NormalizeOp::Https
            | NormalizeOp::Ampersands
            | NormalizeOp::Quotes => {
                if let Some((regex, to)) = rules::normalization(op.name()) {
                    self.normalize_pattern(regex, to);
                }
            }
        }
    }

    pub fn normalize_named(&mut self, name: &str) -> Result<(), CanonicalError> {
        let op = name.parse::<NormalizeOp>()?;
        self.normalize(op);
        Ok(())
    }

    /// Replaces every match with `replacement`, expanding `$n` captures.
    pub fn normalize_pattern(&mut self, regex: &Regex, replacement: &str) {
        let replaced = regex.replace_all(&self.content, replacement).into_owned();
        self.content = replaced;
    }

    /// Replaces every match with its entry in `table`; matches missing from
    /// the table are kept verbatim.
    pub fn normalize_dictionary(
        &mut self,
        regex: &Regex,
        table: &HashMap<&'static str, &'static str>,
    ) {
        let replaced = regex
            .replace_all(&self.content, |caps: &Captures<'_>| {
                let matched = &caps[0];
                table.get(matched).copied().unwrap_or(matched).to_string()
            })
            .into_owned();
        self.content = replaced;
    }

    /// Collapses internal dash runs to one hyphen. A run touching the start
    /// or end of a line is left as written.
    fn normalize_dashes(&mut self) {
        let text = &self.content;
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in DASH_RUN_REGEX.find_iter(text) {
            let at_line_start = m.start() == 0 || text[..m.start()].ends_with('\n');
            let at_line_end = m.end() == text.len() || text[m.end()..].starts_with('\n');
            out.push_str(&text[last..m.start()]);
            if at_line_start || at_line_end {
                out.push_str(m.as_str());
            } else {
                out.push('-');
            }
            last = m.end();
        }
        out.push_str(&text[last..]);
        self.content = out;
    }

    fn strip_until_stable(&mut self, regex: &Regex, name: &str, max_iterations: usize) {
        let mut iterations = 0;
        while regex.is_match(&self.content) {
            if iterations == max_iterations {
                warn!(rule = name, iterations, "fixpoint_strip_capped");
                return;
            }
            let before = self.content.clone();
            self.strip_pattern(regex);
            iterations += 1;
            // Whitespace-only matches are squeezed back to the same text.
            if self.content == before {
                return;
            }
        }
    }

    fn strip_html(&mut self, ctx: &StripContext<'_>) {
        let is_html = ctx
            .filename
            .is_some_and(|filename| ctx.config.is_html_filename(filename));
        if is_html {
            self.content = html_to_text(&self.content);
        }
    }

    /// Strips comment leaders only when every line carries one.
    fn strip_comments(&mut self) {
        let leader = rules::rule("comment_markup");
        let mut lines = self.content.split('\n');
        let multi_line = lines.clone().nth(1).is_some();
        if multi_line && lines.all(|line| leader.is_match(line)) {
            self.strip_pattern(leader);
        }
    }

    fn strip_cc0_optional(&mut self) {
        if !self.content.to_lowercase().contains("associating cc0") {
            return;
        }
        self.strip_pattern(rules::rule("cc_legal_code"));
        self.strip_pattern(rules::rule("cc0_info"));
        self.strip_pattern(rules::rule("cc0_disclaimer"));
    }

    fn strip_unlicense_optional(&mut self) {
        if !self.content.to_lowercase().contains("unlicense") {
            return;
        }
        self.strip_pattern(rules::rule("unlicense_info"));
    }

    /// Drops everything from the end-of-terms anchor line onwards.
    fn strip_end_of_terms(&mut self) {
        let cut = rules::rule("end_of_terms")
            .find(&self.content)
            .map(|m| m.start());
        if let Some(cut) = cut {
            self.content.truncate(cut);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{LicenseEntry, StaticRegistry};

    struct Fixture {
        titles: TitleMatcher,
        copyright: Regex,
        config: CanonicalizeConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let registry = StaticRegistry::new(vec![
                LicenseEntry::new("mit", "MIT License", "MIT License"),
                LicenseEntry::new("gpl-3.0", "GNU General Public License v3.0", "GNU General Public License"),
            ]);
            Self {
                titles: TitleMatcher::from_registry(&registry).expect("titles"),
                copyright: Regex::new(&format!(
                    "(?:{})|(?:{})",
                    crate::grammar::CopyrightMatcher::pattern(&crate::grammar::DefaultCopyrightMatcher),
                    rules::STRIP_PATTERNS
                        .iter()
                        .find(|(name, _)| *name == "all_rights_reserved")
                        .map(|(_, p)| *p)
                        .expect("all rights reserved rule"),
                ))
                .expect("copyright"),
                config: CanonicalizeConfig::default(),
            }
        }

        fn ctx<'a>(&'a self, filename: Option<&'a str>) -> StripContext<'a> {
            StripContext {
                titles: &self.titles,
                copyright: &self.copyright,
                filename,
                config: &self.config,
            }
        }
    }

    fn strip(text: &str, op: StripOp) -> String {
        let fixture = Fixture::new();
        let mut buffer = ContentBuffer::new(text);
        buffer.strip(op, &fixture.ctx(None));
        buffer.into_string()
    }

    fn normalize(text: &str, op: NormalizeOp) -> String {
        let mut buffer = ContentBuffer::new(text);
        buffer.normalize(op);
        buffer.into_string()
    }

    #[test]
    fn op_names_round_trip() {
        for op in StripOp::ALL {
            assert_eq!(op.name().parse::<StripOp>(), Ok(op));
        }
        for op in NormalizeOp::ALL {
            assert_eq!(op.to_string().parse::<NormalizeOp>(), Ok(op));
        }
    }

    #[test]
    fn blank_procedures_name_existing_rules() {
        for op in StripOp::ALL {
            if let StripProcedure::Blank(name) | StripProcedure::Unwrap(name) = op.procedure() {
                assert!(rules::strip_pattern(name).is_some(), "{op} -> {name}");
            }
        }
    }

    #[test]
    fn unknown_rule_names_fail() {
        let fixture = Fixture::new();
        let mut buffer = ContentBuffer::new("text");
        assert_eq!(
            buffer.strip_named("bogus", &fixture.ctx(None)),
            Err(CanonicalError::UnknownRule("bogus".into()))
        );
        assert_eq!(
            buffer.normalize_named("bogus"),
            Err(CanonicalError::UnknownRule("bogus".into()))
        );
        assert_eq!(
            buffer.strip_rule("bogus"),
            Err(CanonicalError::UnknownRule("bogus".into()))
        );
    }

    #[test]
    fn strip_named_falls_back_to_table_rules() {
        let fixture = Fixture::new();
        let mut buffer = ContentBuffer::new("All rights reserved.\nPermission");
        buffer
            .strip_named("all_rights_reserved", &fixture.ctx(None))
            .expect("table rule");
        assert_eq!(buffer.as_str(), "Permission");
    }

    #[test]
    fn strip_blanks_and_squeezes() {
        assert_eq!(strip("Hello\n\n---\n\nWorld", StripOp::Hrs), "Hello\n \nWorld");
        assert_eq!(strip("# Heading\ntext", StripOp::MarkdownHeadings), "Heading\ntext");
        assert_eq!(strip("Version 2.0, June 1991\nterms", StripOp::Version), "terms");
    }

    #[test]
    fn title_strip_repeats_until_gone() {
        let out = strip("MIT License\n\nThe MIT License\n\nPermission", StripOp::Title);
        assert_eq!(out, "Permission");
    }

    #[test]
    fn copyright_strip_handles_multiple_lines() {
        let text = "Copyright (c) 2020 A\nCopyright (c) 2021 B\nAll rights reserved.\n\nPermission";
        assert_eq!(strip(text, StripOp::Copyright), "Permission");
    }

    #[test]
    fn title_strip_stops_at_iteration_cap() {
        let mut fixture = Fixture::new();
        fixture.config.max_fixpoint_iterations = 1;
        let mut buffer = ContentBuffer::new("MIT License\n\nThe MIT License\n\nx");
        buffer.strip(StripOp::Title, &fixture.ctx(None));
        assert_eq!(buffer.as_str(), "The MIT License\n\nx");

        let converged = strip("MIT License\n\nThe MIT License\n\nx", StripOp::Title);
        assert_eq!(converged, "x");
    }

    #[test]
    fn copyright_strip_stops_at_iteration_cap() {
        let mut fixture = Fixture::new();
        fixture.config.max_fixpoint_iterations = 1;
        let text = "Copyright (c) 2020 A\n\nCopyright (c) 2021 B\n\nPermission";
        let mut buffer = ContentBuffer::new(text);
        buffer.strip(StripOp::Copyright, &fixture.ctx(None));
        assert!(buffer.as_str().ends_with("Permission"));
        assert_eq!(strip(text, StripOp::Copyright), "Permission");
    }

    #[test]
    fn leading_url_line_is_removed() {
        assert_eq!(
            strip("https://example.org/license\n\nPermission granted.", StripOp::Url),
            "Permission granted."
        );
        let inline = "Permission granted.\nhttps://example.org\n";
        assert_eq!(strip(inline, StripOp::Url), "Permission granted.\nhttps://example.org");
    }

    #[test]
    fn developed_by_block_is_removed() {
        assert_eq!(
            strip("Developed by: Foo\nBar Team\n\nPermission granted.", StripOp::DevelopedBy),
            "Permission granted."
        );
        let later = "Permission granted.\n\nDeveloped by: Foo\n\nMore";
        assert_eq!(strip(later, StripOp::DevelopedBy), later);
    }

    #[test]
    fn end_of_terms_truncates() {
        let text = "license text\n\nEND OF TERMS AND CONDITIONS\n\nHow to apply";
        assert_eq!(strip(text, StripOp::EndOfTerms), "license text\n");
    }

    #[test]
    fn comments_require_every_line() {
        assert_eq!(strip("// a\n// b", StripOp::Comments), "a\n b");
        assert_eq!(strip("// a\nb", StripOp::Comments), "// a\nb");
        assert_eq!(strip("// single", StripOp::Comments), "// single");
    }

    #[test]
    fn markup_is_unwrapped() {
        assert_eq!(strip("some *bold* text", StripOp::SpanMarkup), "some bold text");
        assert_eq!(strip("see [the site](https://x.org)", StripOp::LinkMarkup), "see the site");
        assert_eq!(strip("*boxed line*", StripOp::Borders), "boxed line");
    }

    #[test]
    fn cc0_blocks_need_marker() {
        let text = "creative commons legal code\n\nstatement of purpose";
        assert_eq!(strip(text, StripOp::Cc0Optional), text);
        let marked = "creative commons legal code\n\nassociating cc0 with a work";
        assert_eq!(strip(marked, StripOp::Cc0Optional), "associating cc0 with a work");
    }

    #[test]
    fn unlicense_pointer_removed() {
        let text = "this is free and unencumbered software\n\nfor more information, please refer to <https://unlicense.org>";
        assert_eq!(
            strip(text, StripOp::UnlicenseOptional),
            "this is free and unencumbered software"
        );
    }

    #[test]
    fn html_runs_only_for_html_files() {
        let fixture = Fixture::new();
        let mut plain = ContentBuffer::new("<p>hi</p>");
        plain.strip(StripOp::Html, &fixture.ctx(Some("LICENSE.md")));
        assert_eq!(plain.as_str(), "<p>hi</p>");

        let mut html = ContentBuffer::new("<p>hi</p>");
        html.strip(StripOp::Html, &fixture.ctx(Some("LICENSE.html")));
        assert!(!html.as_str().contains("<p>"));
        assert!(html.as_str().contains("hi"));
    }

    #[test]
    fn dashes_collapse_inside_lines() {
        assert_eq!(
            normalize("a \u{2014} b \u{2013} c - d", NormalizeOp::Dashes),
            "a - b - c - d"
        );
        assert_eq!(normalize("a --- b", NormalizeOp::Dashes), "a - b");
        assert_eq!(normalize("--a--", NormalizeOp::Dashes), "--a--");
        assert_eq!(normalize("x\n\u{2014}y", NormalizeOp::Dashes), "x\n\u{2014}y");
    }

    #[test]
    fn spelling_uses_table_per_match() {
        assert_eq!(
            normalize("the organisation's colour licence", NormalizeOp::Spelling),
            "the organization's color license"
        );
        assert_eq!(normalize("percentage owners", NormalizeOp::Spelling), "percentage owners");
        assert_eq!(normalize("the copyright owner", NormalizeOp::Spelling), "the copyright holder");
    }

    #[test]
    fn punctuation_normalizations() {
        assert_eq!(normalize("http://x.org", NormalizeOp::Https), "https://x.org");
        assert_eq!(normalize("a & b", NormalizeOp::Ampersands), "a and b");
        assert_eq!(
            normalize("the \u{201C}software\u{201D} and 'as is'", NormalizeOp::Quotes),
            "the \"software\" and \"as is\""
        );
        assert_eq!(normalize("1. first\n* second", NormalizeOp::Lists), "- first\n- second");
    }

    #[test]
    fn bullets_are_canonicalized() {
        assert_eq!(
            normalize("intro:\n\n(a) one\n\n- two", NormalizeOp::Bullets),
            "intro:\n\n* one\n\n* two"
        );
        assert_eq!(normalize("(a) (b)", NormalizeOp::Bullets), "(a)(b)");
    }
}
