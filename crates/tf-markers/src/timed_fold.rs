//! TimedFold — a fold with a timer inside it.
//!
//! Travis renders a timer that sits directly inside a fold as the fold's
//! duration badge, so the order of markers matters:
//!
//! ```text
//! start:  fold start → timer start → description
//! end:    timer end  → fold end
//! ```
//!
//! There is no rollback. If the timer fails to start after the fold did, the
//! fold stays open and the caller should treat the whole region as failed.

use std::fmt;
use std::io::{self, Write};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::fold::{Fold, FoldOptions};
use crate::scope::Marker;
use crate::sink::{Emitted, Sink};
use crate::timer::{Timer, TimerOptions};

/// Construction options for a [`TimedFold`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimedFoldOptions {
    /// Description line written after the timer starts.
    pub description: Option<String>,
    /// Options forwarded to the inner fold.
    pub fold: FoldOptions,
    /// Options forwarded to the inner timer.
    pub timer: TimerOptions,
}

impl TimedFoldOptions {
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    #[must_use]
    pub fn fold(mut self, options: FoldOptions) -> Self {
        self.fold = options;
        self
    }

    #[must_use]
    pub fn timer(mut self, options: TimerOptions) -> Self {
        self.timer = options;
        self
    }
}

pub struct TimedFold<W = io::Stdout> {
    fold: Fold<W>,
    timer: Timer<W>,
    description: Option<String>,
}

impl<W: Write> TimedFold<W> {
    /// Create a timed fold on the system clock. Fold and timer share `sink`.
    ///
    /// # Errors
    ///
    /// Invalid tag or timer id.
    pub fn new(tag: impl Into<String>, options: TimedFoldOptions, sink: Sink<W>) -> Result<Self> {
        Self::with_clock(tag, options, sink, SystemClock)
    }

    /// Create a timed fold whose timer reads `clock`.
    ///
    /// # Errors
    ///
    /// Invalid tag or timer id.
    pub fn with_clock(
        tag: impl Into<String>,
        options: TimedFoldOptions,
        sink: Sink<W>,
        clock: impl Clock + 'static,
    ) -> Result<Self> {
        let fold = Fold::new(tag, options.fold, sink.clone())?;
        let timer = Timer::with_clock(options.timer, sink, clock)?;
        Ok(Self {
            fold,
            timer,
            description: options.description.filter(|d| !d.is_empty()),
        })
    }

    #[must_use]
    pub const fn fold(&self) -> &Fold<W> {
        &self.fold
    }

    #[must_use]
    pub const fn timer(&self) -> &Timer<W> {
        &self.timer
    }

    /// Both the fold and the timer are running.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.fold.is_started() && self.timer.is_started()
    }

    /// Start the fold, then the timer, then write the description.
    ///
    /// # Errors
    ///
    /// The first failing sub-step; earlier steps are not undone.
    pub fn start(&mut self) -> Result<Emitted> {
        let mut out = self.fold.start()?;
        out = out.merge(self.timer.start()?);
        if let Some(desc) = &self.description {
            out = out.merge(self.fold.desc(desc)?);
        }
        Ok(out)
    }

    /// Write an extra description line inside the fold.
    ///
    /// # Errors
    ///
    /// The sink's write error.
    pub fn desc(&self, text: &str) -> Result<Emitted> {
        self.fold.desc(text)
    }

    /// End the timer, then the fold.
    ///
    /// # Errors
    ///
    /// The first failing sub-step; if the timer fails the fold stays open.
    pub fn end(&mut self) -> Result<Emitted> {
        let out = self.timer.end()?;
        Ok(out.merge(self.fold.end()?))
    }
}

impl<W> fmt::Debug for TimedFold<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedFold")
            .field("fold", &self.fold)
            .field("timer", &self.timer)
            .field("description", &self.description)
            .finish()
    }
}

impl<W: Write> Marker for TimedFold<W> {
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
        self.fold.sink().is_attached()
    }

    fn kind(&self) -> &'static str {
        "timed fold"
    }

    fn name(&self) -> &str {
        self.fold.tag()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
