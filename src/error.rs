//! Error types for rs-readability.
//!
//! Every error names its kind and the pipeline phase it originated in, so
//! callers can branch on [`Error::kind`] without matching message strings.

use std::fmt;

/// Boxed underlying cause carried by non-fatal errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Pipeline phase an error originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Input decoding and HTML parsing.
    Parse,
    /// Up-front document checks (presence, element budget).
    Validate,
    /// Metadata resolution (JSON-LD, meta tags, title).
    Metadata,
    /// Candidate scoring and article building.
    Extract,
    /// Post-processing of the final tree.
    PostProcess,
    /// Anything outside the core (caller-imposed deadlines).
    External,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parse => "parse",
            Self::Validate => "validate",
            Self::Metadata => "metadata",
            Self::Extract => "extract",
            Self::PostProcess => "post-process",
            Self::External => "external",
        };
        f.write_str(name)
    }
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or unparseable input.
    Parse,
    /// No document, or the document exceeds `max_elems_to_parse`.
    Validation,
    /// No content survived any extraction attempt.
    Extraction,
    /// Non-fatal failure in an optional cleanup step.
    Cleanup,
    /// Non-fatal failure while reading metadata (e.g. malformed JSON-LD).
    Metadata,
    /// Caller-imposed deadline elapsed.
    Timeout,
}

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTML parsing failed.
    #[error("HTML parsing failed during {phase}: {message}")]
    Parse {
        /// Originating phase.
        phase: Phase,
        /// Description of the failure.
        message: String,
    },

    /// The input failed an up-front check.
    #[error("Invalid document during {phase}: {message}")]
    Validation {
        /// Originating phase.
        phase: Phase,
        /// Description of the failure.
        message: String,
    },

    /// No extractable content was found in the document.
    #[error("No extractable content during {phase}: {message}")]
    Extraction {
        /// Originating phase.
        phase: Phase,
        /// Description of the failure.
        message: String,
    },

    /// An optional cleanup step failed; the pipeline continued.
    #[error("Cleanup step failed during {phase}: {message}")]
    Cleanup {
        /// Originating phase.
        phase: Phase,
        /// Description of the failure.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<BoxError>,
    },

    /// Metadata could not be read; the pipeline continued.
    #[error("Metadata extraction failed during {phase}: {message}")]
    Metadata {
        /// Originating phase.
        phase: Phase,
        /// Description of the failure.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<BoxError>,
    },

    /// A caller-imposed deadline elapsed. Never produced by the core.
    #[error("Extraction timed out: {message}")]
    Timeout {
        /// Originating phase.
        phase: Phase,
        /// Description of the deadline.
        message: String,
    },
}

impl Error {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::Parse { phase: Phase::Parse, message: message.into() }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation { phase: Phase::Validate, message: message.into() }
    }

    pub(crate) fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction { phase: Phase::Extract, message: message.into() }
    }

    pub(crate) fn cleanup(phase: Phase, message: impl Into<String>, source: Option<BoxError>) -> Self {
        Self::Cleanup { phase, message: message.into(), source }
    }

    pub(crate) fn metadata(message: impl Into<String>, source: Option<BoxError>) -> Self {
        Self::Metadata { phase: Phase::Metadata, message: message.into(), source }
    }

    /// Build a timeout error for callers that wrap [`crate::parse`] in a deadline.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout { phase: Phase::External, message: message.into() }
    }

    /// Kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Extraction { .. } => ErrorKind::Extraction,
            Self::Cleanup { .. } => ErrorKind::Cleanup,
            Self::Metadata { .. } => ErrorKind::Metadata,
            Self::Timeout { .. } => ErrorKind::Timeout,
        }
    }

    /// Phase this error originated in.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::Parse { phase, .. }
            | Self::Validation { phase, .. }
            | Self::Extraction { phase, .. }
            | Self::Cleanup { phase, .. }
            | Self::Metadata { phase, .. }
            | Self::Timeout { phase, .. } => *phase,
        }
    }

    /// Whether the pipeline can continue past this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Cleanup | ErrorKind::Metadata)
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
