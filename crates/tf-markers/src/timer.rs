//! Timer — measures the duration of a log region.
//!
//! ```text
//! travis_time:start:<id>\r ESC[0K
//! … region output …
//! travis_time:end:<id>:start=<ns>,finish=<ns>,duration=<ns>\r ESC[0K
//! ```
//!
//! All three numbers are integer nanoseconds and `duration` is always exactly
//! `finish - start`. The viewer shows the duration next to the enclosing fold
//! header, or inline if the timer isn't inside a fold.

use std::fmt;
use std::io::{self, Write};

use tf_ansi::ansi::CLEAR_LINE;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::{MarkerError, Result};
use crate::scope::Marker;
use crate::sink::{Emitted, Sink};
use crate::tag::is_valid_tag;

/// Construction options for a [`Timer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerOptions {
    /// Timer id. A random UUID is generated when absent or empty.
    pub id: Option<String>,
    /// Start timestamp in nanoseconds, for ending a timer another process
    /// started. The timer is then already running. Zero means not started.
    pub start_time: Option<u64>,
}

impl TimerOptions {
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub const fn start_time(mut self, ns: u64) -> Self {
        self.start_time = Some(ns);
        self
    }
}

pub struct Timer<W = io::Stdout> {
    id: String,
    start_time: Option<u64>,
    finish_time: Option<u64>,
    clock: Box<dyn Clock>,
    sink: Sink<W>,
}

impl<W: Write> Timer<W> {
    /// Create a timer on the system clock.
    ///
    /// # Errors
    ///
    /// [`MarkerError::InvalidId`] if a supplied id is outside
    /// `[A-Za-z0-9_.-]+`.
    pub fn new(options: TimerOptions, sink: Sink<W>) -> Result<Self> {
        Self::with_clock(options, sink, SystemClock)
    }

    /// Create a timer reading time from `clock`.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn with_clock(
        options: TimerOptions,
        sink: Sink<W>,
        clock: impl Clock + 'static,
    ) -> Result<Self> {
        let id = options
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().hyphenated().to_string());
        if !is_valid_tag(&id) {
            return Err(MarkerError::InvalidId(id));
        }
        Ok(Self {
            id,
            start_time: options.start_time.filter(|&ns| ns != 0),
            finish_time: None,
            clock: Box::new(clock),
            sink,
        })
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Start timestamp, once started.
    #[inline]
    #[must_use]
    pub const fn start_time(&self) -> Option<u64> {
        self.start_time
    }

    /// Finish timestamp, once ended.
    #[inline]
    #[must_use]
    pub const fn finish_time(&self) -> Option<u64> {
        self.finish_time
    }

    /// Measured duration, once ended.
    #[must_use]
    pub fn duration(&self) -> Option<u64> {
        Some(self.finish_time? - self.start_time?)
    }

    /// Running: started and not yet ended.
    ///
    /// Unlike [`start_time`](Self::start_time), which stays set, this turns
    /// false once [`end`](Self::end) has run.
    #[inline]
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.start_time.is_some() && self.finish_time.is_none()
    }

    #[must_use]
    pub const fn sink(&self) -> &Sink<W> {
        &self.sink
    }

    /// Record the start time and write the start marker.
    ///
    /// # Errors
    ///
    /// [`MarkerError::AlreadyStarted`] if a start time is already set
    /// (including after [`end`](Self::end)), or the sink's write error.
    pub fn start(&mut self) -> Result<Emitted> {
        if self.start_time.is_some() {
            return Err(MarkerError::already_started("timer", &self.id));
        }
        let now = self.clock.now_ns();
        self.start_time = Some(now);
        log::debug!("timer '{}': start at {now}", self.id);

        Ok(self
            .sink
            .emit(format!("travis_time:start:{}\r{CLEAR_LINE}", self.id))?)
    }

    /// Record the finish time and write the end marker with the duration.
    ///
    /// A clock reading earlier than the start (only possible with an
    /// externally supplied start time) is clamped to the start, giving a
    /// zero duration.
    ///
    /// # Errors
    ///
    /// [`MarkerError::NotStarted`] / [`MarkerError::AlreadyEnded`] unless the
    /// timer is running, or the sink's write error.
    pub fn end(&mut self) -> Result<Emitted> {
        if self.finish_time.is_some() {
            return Err(MarkerError::already_ended("timer", &self.id));
        }
        let Some(start) = self.start_time else {
            return Err(MarkerError::not_started("timer", &self.id));
        };
        let finish = self.clock.now_ns().max(start);
        let duration = finish - start;
        self.finish_time = Some(finish);
        log::debug!("timer '{}': end after {duration}ns", self.id);

        Ok(self.sink.emit(format!(
            "travis_time:end:{}:start={start},finish={finish},duration={duration}\r{CLEAR_LINE}",
            self.id
        ))?)
    }
}

impl<W> fmt::Debug for Timer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("id", &self.id)
            .field("start_time", &self.start_time)
            .field("finish_time", &self.finish_time)
            .finish_non_exhaustive()
    }
}

impl<W: Write> Marker for Timer<W> {
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
        "timer"
    }

    fn name(&self) -> &str {
        &self.id
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Buf = Rc<RefCell<Vec<u8>>>;

    fn timer(id: &str, clock: &ManualClock) -> (Timer<Vec<u8>>, Buf) {
        let buf = Rc::new(RefCell::new(Vec::new()));
        let t = Timer::with_clock(
            TimerOptions::default().id(id),
            Sink::shared(Rc::clone(&buf)),
            clock.clone(),
        )
        .unwrap();
        (t, buf)
    }

    fn text(buf: &Buf) -> String {
        String::from_utf8(buf.borrow().clone()).unwrap()
    }

    /// Pull `start=`, `finish=`, `duration=` out of an end marker.
    fn parse_end(line: &str) -> (u64, u64, u64) {
        let fields = line
            .split_once(":start=")
            .map(|(_, rest)| rest.trim_end_matches("\r\x1b[0K"))
            .unwrap();
        let nums: Vec<u64> = fields
            .split(',')
            .map(|kv| kv.split_once('=').map_or(kv, |(_, v)| v).parse().unwrap())
            .collect();
        (nums[0], nums[1], nums[2])
    }

    #[test]
    fn start_and_end_markers() {
        let clock = ManualClock::new(1_000);
        let (mut t, buf) = timer("t1", &clock);
        t.start().unwrap();
        clock.advance(2_500);
        t.end().unwrap();
        assert_eq!(
            text(&buf),
            "travis_time:start:t1\r\x1b[0K\
             travis_time:end:t1:start=1000,finish=3500,duration=2500\r\x1b[0K"
        );
        assert_eq!(t.duration(), Some(2_500));
    }

    #[test]
    fn system_clock_duration_is_consistent() {
        let buf = Rc::new(RefCell::new(Vec::new()));
        let mut t = Timer::new(TimerOptions::default(), Sink::shared(Rc::clone(&buf))).unwrap();
        t.start().unwrap();
        buf.borrow_mut().clear();
        t.end().unwrap();

        let (start, finish, duration) = parse_end(&text(&buf));
        assert_eq!(finish - start, duration);
        assert_eq!(Some(start), t.start_time());
        assert_eq!(Some(finish), t.finish_time());
    }

    #[test]
    fn default_id_is_hyphenated_uuid() {
        let t = Timer::new(TimerOptions::default(), Sink::<Vec<u8>>::detached()).unwrap();
        let id = t.id();
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(id, id.to_lowercase());
    }

    #[test]
    fn default_ids_are_unique() {
        let a = Timer::new(TimerOptions::default(), Sink::<Vec<u8>>::detached()).unwrap();
        let b = Timer::new(TimerOptions::default(), Sink::<Vec<u8>>::detached()).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn invalid_id_rejected() {
        let err = Timer::new(TimerOptions::default().id("a b"), Sink::<Vec<u8>>::detached())
            .unwrap_err();
        assert!(matches!(err, MarkerError::InvalidId(ref id) if id == "a b"));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn empty_id_gets_generated_uuid() {
        let t = Timer::new(TimerOptions::default().id(""), Sink::<Vec<u8>>::detached()).unwrap();
        assert!(Uuid::parse_str(t.id()).is_ok());
    }

    #[test]
    fn zero_start_time_means_not_started() {
        let clock = ManualClock::new(70);
        let buf = Rc::new(RefCell::new(Vec::new()));
        let mut t = Timer::with_clock(
            TimerOptions::default().id("z").start_time(0),
            Sink::shared(Rc::clone(&buf)),
            clock,
        )
        .unwrap();
        assert!(!t.is_started());
        assert_eq!(t.start_time(), None);
        t.start().unwrap();
        assert_eq!(t.start_time(), Some(70));
    }

    #[test]
    fn start_time_survives_end() {
        let clock = ManualClock::new(5);
        let (mut t, _) = timer("e", &clock);
        t.start().unwrap();
        t.end().unwrap();
        assert!(!t.is_started());
        assert_eq!(t.start_time(), Some(5));
    }

    #[test]
    fn double_start_fails_without_output() {
        let clock = ManualClock::new(5);
        let (mut t, buf) = timer("t", &clock);
        t.start().unwrap();
        let before = buf.borrow().len();
        clock.advance(10);
        assert!(matches!(
            t.start().unwrap_err(),
            MarkerError::AlreadyStarted { what: "timer", .. }
        ));
        assert_eq!(buf.borrow().len(), before);
        assert_eq!(t.start_time(), Some(5));
    }

    #[test]
    fn end_before_start_fails() {
        let (mut t, buf) = timer("t", &ManualClock::new(1));
        assert_eq!(t.end().unwrap_err().kind(), ErrorKind::InvalidState);
        assert!(buf.borrow().is_empty());
    }

    #[test]
    fn double_end_fails() {
        let (mut t, _) = timer("t", &ManualClock::new(1));
        t.start().unwrap();
        t.end().unwrap();
        assert!(matches!(
            t.end().unwrap_err(),
            MarkerError::AlreadyEnded { .. }
        ));
        assert!(!t.is_started());
    }

    #[test]
    fn restart_after_end_fails() {
        let (mut t, _) = timer("t", &ManualClock::new(1));
        t.start().unwrap();
        t.end().unwrap();
        assert!(t.start().is_err());
    }

    #[test]
    fn resumed_timer_ends_with_supplied_start() {
        let clock = ManualClock::new(900);
        let buf = Rc::new(RefCell::new(Vec::new()));
        let mut t = Timer::with_clock(
            TimerOptions::default().id("remote").start_time(400),
            Sink::shared(Rc::clone(&buf)),
            clock,
        )
        .unwrap();
        assert!(t.is_started());
        t.end().unwrap();
        assert_eq!(
            text(&buf),
            "travis_time:end:remote:start=400,finish=900,duration=500\r\x1b[0K"
        );
    }

    #[test]
    fn clock_behind_start_clamps_to_zero() {
        let clock = ManualClock::new(100);
        let buf = Rc::new(RefCell::new(Vec::new()));
        let mut t = Timer::with_clock(
            TimerOptions::default().id("skew").start_time(500),
            Sink::shared(Rc::clone(&buf)),
            clock,
        )
        .unwrap();
        t.end().unwrap();
        let (start, finish, duration) = parse_end(&text(&buf));
        assert_eq!((start, finish, duration), (500, 500, 0));
    }

    #[test]
    fn detached_timer_returns_text() {
        let clock = ManualClock::new(10);
        let mut t = Timer::with_clock(
            TimerOptions::default().id("d"),
            Sink::<Vec<u8>>::detached(),
            clock.clone(),
        )
        .unwrap();
        assert_eq!(
            t.start().unwrap().text(),
            Some("travis_time:start:d\r\x1b[0K")
        );
        clock.advance(1);
        assert_eq!(
            t.end().unwrap().text(),
            Some("travis_time:end:d:start=10,finish=11,duration=1\r\x1b[0K")
        );
    }
}
