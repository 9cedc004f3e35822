//! Marker errors.
//!
//! Every failure is reported to the immediate caller; the library never
//! retries and never degrades to partial output. [`MarkerError::kind`] groups
//! the variants into the four categories callers usually branch on.

use std::io;

use thiserror::Error;
use tf_ansi::AnsiError;

/// Result alias for marker operations.
pub type Result<T, E = MarkerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum MarkerError {
    /// Fold tags are limited to `[A-Za-z0-9_.-]+`.
    #[error("invalid fold tag '{0}': expected one or more of [A-Za-z0-9_.-]")]
    InvalidTag(String),

    /// Timer ids share the fold tag charset.
    #[error("invalid timer id '{0}': expected one or more of [A-Za-z0-9_.-]")]
    InvalidId(String),

    /// A description or style didn't resolve to an escape sequence.
    #[error(transparent)]
    Style(#[from] AnsiError),

    #[error("{what} '{name}' already started")]
    AlreadyStarted { what: &'static str, name: String },

    #[error("{what} '{name}' not started yet")]
    NotStarted { what: &'static str, name: String },

    #[error("{what} '{name}' already ended")]
    AlreadyEnded { what: &'static str, name: String },

    /// Scoped use needs somewhere to write the end marker.
    #[error("invalid use: {what} '{name}' has no sink, so it cannot be used as a scope")]
    SinkUnavailable { what: &'static str, name: String },

    /// The sink refused the write.
    #[error("failed to write marker: {0}")]
    Io(#[from] io::Error),
}

/// Broad category of a [`MarkerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed tag or id, unknown style, bad escape parameter.
    InvalidArgument,
    /// Lifecycle misuse: double start, end before start, double end.
    InvalidState,
    /// Scoped acquisition without a sink.
    SinkUnavailable,
    /// The sink itself failed.
    Io,
}

impl MarkerError {
    pub(crate) fn already_started(what: &'static str, name: &str) -> Self {
        Self::AlreadyStarted {
            what,
            name: name.to_owned(),
        }
    }

    pub(crate) fn not_started(what: &'static str, name: &str) -> Self {
        Self::NotStarted {
            what,
            name: name.to_owned(),
        }
    }

    pub(crate) fn already_ended(what: &'static str, name: &str) -> Self {
        Self::AlreadyEnded {
            what,
            name: name.to_owned(),
        }
    }

    pub(crate) fn sink_unavailable(what: &'static str, name: &str) -> Self {
        Self::SinkUnavailable {
            what,
            name: name.to_owned(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTag(_) | Self::InvalidId(_) | Self::Style(_) => ErrorKind::InvalidArgument,
            Self::AlreadyStarted { .. } | Self::NotStarted { .. } | Self::AlreadyEnded { .. } => {
                ErrorKind::InvalidState
            }
            Self::SinkUnavailable { .. } => ErrorKind::SinkUnavailable,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}
