use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use regex::Regex;
use tracing::debug;

use crate::config::CanonicalizeConfig;
use crate::document::LicenseDocument;
use crate::engine::{ContentBuffer, NormalizeOp, StripContext, StripOp};
use crate::error::CanonicalError;
use crate::grammar::{BracketFieldGrammar, CopyrightMatcher, DefaultCopyrightMatcher, FieldGrammar};
use crate::registry::{LicenseRegistry, TitleMatcher};
use crate::rules::STRIP_PATTERNS;

/// Phase A: structural noise removed while case is still preserved.
pub const PHASE_A: [StripOp; 7] = [
    StripOp::Bom,
    StripOp::Html,
    StripOp::Hrs,
    StripOp::Comments,
    StripOp::MarkdownHeadings,
    StripOp::Title,
    StripOp::Version,
];

/// Phase B substitutions, applied to the lowercased Phase A output.
pub const PHASE_B_NORMALIZE: [NormalizeOp; 7] = [
    NormalizeOp::Lists,
    NormalizeOp::Https,
    NormalizeOp::Ampersands,
    NormalizeOp::Dashes,
    NormalizeOp::Quotes,
    NormalizeOp::Spelling,
    NormalizeOp::Bullets,
];

/// Phase B strips. Order matters: title runs again after copyright because
/// removing a notice can expose a second title, and whitespace collapses
/// near the end so the line-anchored rules still see newlines.
pub const PHASE_B_STRIP: [StripOp; 17] = [
    StripOp::Cc0Optional,
    StripOp::UnlicenseOptional,
    StripOp::Hrs,
    StripOp::MarkdownHeadings,
    StripOp::Borders,
    StripOp::Title,
    StripOp::Version,
    StripOp::Url,
    StripOp::Copyright,
    StripOp::Title,
    StripOp::BlockMarkup,
    StripOp::SpanMarkup,
    StripOp::LinkMarkup,
    StripOp::DevelopedBy,
    StripOp::EndOfTerms,
    StripOp::Whitespace,
    StripOp::MitOptional,
];

static GLOBAL: OnceLock<Arc<Normalizer>> = OnceLock::new();

/// Runs the fixed normalization pipeline and hands out documents.
///
/// A `Normalizer` owns the title matcher built from the registry plus the
/// collaborator matchers, so it is built once and shared. Documents keep an
/// `Arc` to it and call back into it lazily.
pub struct Normalizer {
    config: CanonicalizeConfig,
    titles: TitleMatcher,
    copyright: Regex,
    fields: Arc<dyn FieldGrammar>,
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("config", &self.config)
            .field("titles", &self.titles)
            .field("copyright", &self.copyright.as_str())
            .finish_non_exhaustive()
    }
}

impl Normalizer {
    /// Builds a normalizer with the default copyright matcher and field
    /// grammar.
    pub fn new(
        registry: &dyn LicenseRegistry,
        config: CanonicalizeConfig,
    ) -> Result<Self, CanonicalError> {
        Self::with_collaborators(
            registry,
            config,
            &DefaultCopyrightMatcher,
            Arc::new(BracketFieldGrammar),
        )
    }

    /// Builds a normalizer from explicit collaborators.
    pub fn with_collaborators(
        registry: &dyn LicenseRegistry,
        config: CanonicalizeConfig,
        copyright: &dyn CopyrightMatcher,
        fields: Arc<dyn FieldGrammar>,
    ) -> Result<Self, CanonicalError> {
        config.validate()?;
        let titles = TitleMatcher::from_registry(registry)?;

        let all_rights_reserved = STRIP_PATTERNS
            .iter()
            .find(|(name, _)| *name == "all_rights_reserved")
            .map(|(_, pattern)| *pattern)
            .ok_or_else(|| CanonicalError::UnknownRule("all_rights_reserved".into()))?;
        let union = format!("(?:{})|(?:{})", copyright.pattern(), all_rights_reserved);
        let copyright =
            Regex::new(&union).map_err(|err| CanonicalError::invalid_pattern("copyright", err))?;

        Ok(Self {
            config,
            titles,
            copyright,
            fields,
        })
    }

    /// Installs `normalizer` as the process-wide instance.
    ///
    /// Succeeds once per process; later calls return
    /// [`CanonicalError::AlreadyInitialized`].
    pub fn install_global(normalizer: Normalizer) -> Result<Arc<Normalizer>, CanonicalError> {
        let shared = Arc::new(normalizer);
        GLOBAL
            .set(Arc::clone(&shared))
            .map_err(|_| CanonicalError::AlreadyInitialized)?;
        Ok(shared)
    }

    /// Returns the process-wide instance installed by [`install_global`](Self::install_global).
    pub fn global() -> Result<Arc<Normalizer>, CanonicalError> {
        GLOBAL.get().cloned().ok_or(CanonicalError::NotInitialized)
    }

    pub fn config(&self) -> &CanonicalizeConfig {
        &self.config
    }

    pub fn title_matcher(&self) -> &TitleMatcher {
        &self.titles
    }

    pub fn field_grammar(&self) -> &dyn FieldGrammar {
        self.fields.as_ref()
    }

    /// Creates a document over `raw`.
    pub fn document(self: &Arc<Self>, raw: impl Into<String>) -> LicenseDocument {
        LicenseDocument::new(Arc::clone(self), Some(raw.into()), None)
    }

    /// Creates a document whose source filename decides the HTML pre-pass.
    pub fn document_with_filename(
        self: &Arc<Self>,
        raw: impl Into<String>,
        filename: impl Into<String>,
    ) -> LicenseDocument {
        LicenseDocument::new(Arc::clone(self), Some(raw.into()), Some(filename.into()))
    }

    /// Creates a document that may have no content at all.
    pub fn optional_document(self: &Arc<Self>, raw: Option<String>) -> LicenseDocument {
        LicenseDocument::new(Arc::clone(self), raw, None)
    }

    fn context<'a>(&'a self, filename: Option<&'a str>) -> StripContext<'a> {
        StripContext {
            titles: &self.titles,
            copyright: &self.copyright,
            filename,
            config: &self.config,
        }
    }

    /// Phase A: raw text to the case-preserved "title and version
    /// stripped" checkpoint.
    pub fn strip_title_and_version(&self, raw: &str, filename: Option<&str>) -> String {
        let start = Instant::now();
        let ctx = self.context(filename);
        let mut buffer = ContentBuffer::new(raw);
        for op in PHASE_A {
            buffer.strip(op, &ctx);
        }
        let out = buffer.into_string();
        debug!(
            raw_len = raw.len(),
            out_len = out.len(),
            elapsed_micros = start.elapsed().as_micros(),
            "phase_a_complete"
        );
        out
    }

    /// Phase B: checkpoint text to the final normalized form.
    pub fn normalize_stripped(&self, pre_title: &str) -> String {
        let start = Instant::now();
        let ctx = self.context(None);
        let mut buffer = ContentBuffer::new(pre_title);
        buffer.lowercase();
        for op in PHASE_B_NORMALIZE {
            buffer.normalize(op);
        }
        for op in PHASE_B_STRIP {
            buffer.strip(op, &ctx);
        }
        let out = buffer.into_string();
        debug!(
            in_len = pre_title.len(),
            out_len = out.len(),
            elapsed_micros = start.elapsed().as_micros(),
            "normalize_complete"
        );
        out
    }

    /// Both phases in one call, without caching.
    pub fn normalize(&self, raw: &str, filename: Option<&str>) -> String {
        self.normalize_stripped(&self.strip_title_and_version(raw, filename))
    }
}
