//! Fold — a named, collapsible region of the build log.
//!
//! ```text
//! travis_fold:start:<tag>\r ESC[0K
//! ESC[33m<description>ESC[39m\n        (optional, any number)
//! … region output …
//! travis_fold:end:<tag>\r ESC[0K
//! ```
//!
//! The lifecycle is strictly `NotStarted → Started → Ended`. A fold cannot
//! be restarted once ended: the viewer pairs start and end markers by tag, and
//! a second region with the same tag needs a second `Fold`.

use std::fmt;
use std::io::{self, Write};

use tf_ansi::ansi::CLEAR_LINE;
use tf_ansi::{Colors, colorize};

use crate::error::{MarkerError, Result};
use crate::scope::Marker;
use crate::sink::{Emitted, Sink};
use crate::tag::is_valid_tag;

/// Color Travis itself uses for fold headers ("Worker information", …).
const DESC_COLOR: &str = "yellow";

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldState {
    NotStarted,
    Started,
    /// Terminal.
    Ended,
}

impl fmt::Display for FoldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotStarted => "not started",
            Self::Started => "started",
            Self::Ended => "ended",
        })
    }
}

// ─── Options ─────────────────────────────────────────────────────────────────

/// Construction options for a [`Fold`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldOptions {
    /// Description line written right after the start marker.
    pub description: Option<String>,
    /// Build the fold already started, e.g. to end a region another
    /// process opened.
    pub started: bool,
}

impl FoldOptions {
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    #[must_use]
    pub const fn started(mut self, started: bool) -> Self {
        self.started = started;
        self
    }
}

// ─── Fold ────────────────────────────────────────────────────────────────────

pub struct Fold<W = io::Stdout> {
    tag: String,
    description: Option<String>,
    state: FoldState,
    sink: Sink<W>,
}

impl<W: Write> Fold<W> {
    /// Create a fold. Nothing is written until [`start`](Self::start).
    ///
    /// An empty description is treated as no description.
    ///
    /// # Errors
    ///
    /// [`MarkerError::InvalidTag`] if `tag` is empty or contains anything
    /// outside `[A-Za-z0-9_.-]`.
    pub fn new(tag: impl Into<String>, options: FoldOptions, sink: Sink<W>) -> Result<Self> {
        let tag = tag.into();
        if !is_valid_tag(&tag) {
            return Err(MarkerError::InvalidTag(tag));
        }
        Ok(Self {
            tag,
            description: options.description.filter(|d| !d.is_empty()),
            state: if options.started {
                FoldState::Started
            } else {
                FoldState::NotStarted
            },
            sink,
        })
    }

    #[inline]
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> FoldState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.state == FoldState::Started
    }

    #[must_use]
    pub const fn sink(&self) -> &Sink<W> {
        &self.sink
    }

    /// Open the fold, followed by the construction-time description if any.
    ///
    /// # Errors
    ///
    /// [`MarkerError::AlreadyStarted`] / [`MarkerError::AlreadyEnded`] if the
    /// fold isn't fresh (nothing is written), or the sink's write error.
    pub fn start(&mut self) -> Result<Emitted> {
        match self.state {
            FoldState::NotStarted => {}
            FoldState::Started => return Err(self.misuse(MarkerError::already_started)),
            FoldState::Ended => return Err(self.misuse(MarkerError::already_ended)),
        }
        self.state = FoldState::Started;
        log::debug!("fold '{}': start", self.tag);

        let mut out = self.sink.emit(fold_marker("start", &self.tag))?;
        if let Some(desc) = &self.description {
            out = out.merge(self.desc(desc)?);
        }
        Ok(out)
    }

    /// Write a yellow description line. Allowed in any state; a fold may
    /// carry several.
    ///
    /// # Errors
    ///
    /// The sink's write error.
    pub fn desc(&self, text: &str) -> Result<Emitted> {
        let mut line = colorize(text, &Colors::new().fg(DESC_COLOR))?;
        line.push('\n');
        Ok(self.sink.emit(line)?)
    }

    /// Close the fold.
    ///
    /// # Errors
    ///
    /// [`MarkerError::NotStarted`] / [`MarkerError::AlreadyEnded`] unless the
    /// fold is open, or the sink's write error.
    pub fn end(&mut self) -> Result<Emitted> {
        match self.state {
            FoldState::Started => {}
            FoldState::NotStarted => return Err(self.misuse(MarkerError::not_started)),
            FoldState::Ended => return Err(self.misuse(MarkerError::already_ended)),
        }
        self.state = FoldState::Ended;
        log::debug!("fold '{}': end", self.tag);

        Ok(self.sink.emit(fold_marker("end", &self.tag))?)
    }

    fn misuse(&self, make: fn(&'static str, &str) -> MarkerError) -> MarkerError {
        make("fold", &self.tag)
    }
}

impl<W> fmt::Debug for Fold<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fold")
            .field("tag", &self.tag)
            .field("description", &self.description)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<W: Write> Marker for Fold<W> {
    fn start(&mut self) -> Result<Emitted> {
        Self::start(self)
    }

    fn end(&mut self) -> Result<Emitted> {
        Self::end(self)
    }

    fn is_started(&self) -> bool {
        Self::is_started(self)
    }

    fn has_sink(&self) -> bool {
        self.sink.is_attached()
    }

    fn kind(&self) -> &'static str {
        "fold"
    }

    fn name(&self) -> &str {
        &self.tag
    }
}

/// `travis_fold:<action>:<tag>\r` + erase-in-line.
#[must_use]
pub fn fold_marker(action: &str, tag: &str) -> String {
    format!("travis_fold:{action}:{tag}\r{CLEAR_LINE}")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
