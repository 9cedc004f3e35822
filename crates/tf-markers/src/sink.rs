//! Where marker text goes.
//!
//! A [`Sink`] is a cheap handle onto a writer shared by every marker that
//! logs into the same stream (and usually by the caller, who interleaves its
//! own output). Markers never buffer: each emit is one `write_all` followed
//! by a `flush`, so marker lines land in order with whatever else the process
//! prints.
//!
//! A sink can also be *detached*. Markers built on a detached sink hand their
//! text back to the caller instead of writing it, which is handy when the
//! caller wants to place the bytes itself.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

// ─── Emitted ─────────────────────────────────────────────────────────────────

/// What an emit produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    /// Bytes written to an attached sink.
    Written(usize),
    /// Text that would have been written, returned because the sink is
    /// detached.
    Detached(String),
}

impl Emitted {
    /// Number of bytes produced, written or not.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Written(n) => *n,
            Self::Detached(s) => s.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The produced text, if the sink was detached.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Written(_) => None,
            Self::Detached(s) => Some(s),
        }
    }

    /// Combine two consecutive emits on the same sink.
    #[must_use]
    pub fn merge(self, next: Self) -> Self {
        match (self, next) {
            (Self::Detached(mut a), Self::Detached(b)) => {
                a.push_str(&b);
                Self::Detached(a)
            }
            (a, b) => Self::Written(a.len() + b.len()),
        }
    }
}

// ─── Sink ────────────────────────────────────────────────────────────────────

/// Shared, single-threaded handle onto a writer.
///
/// Cloning a `Sink` clones the handle, not the writer. The `Rc` makes the
/// handle `!Send`: markers sharing a sink stay on one thread.
pub struct Sink<W = io::Stdout> {
    inner: Option<Rc<RefCell<W>>>,
}

impl Sink<io::Stdout> {
    /// Process stdout, where Travis reads the build log from.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Sink<W> {
    /// Wrap a writer in a fresh shared handle.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::shared(Rc::new(RefCell::new(writer)))
    }

    /// Use a writer the caller already shares.
    #[must_use]
    pub const fn shared(writer: Rc<RefCell<W>>) -> Self {
        Self {
            inner: Some(writer),
        }
    }

    /// A sink that writes nothing; emits return their text instead.
    #[must_use]
    pub const fn detached() -> Self {
        Self { inner: None }
    }

    #[inline]
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.inner.is_some()
    }

    /// The shared writer, if attached.
    #[must_use]
    pub const fn handle(&self) -> Option<&Rc<RefCell<W>>> {
        self.inner.as_ref()
    }

    /// Write `text` and flush, or hand it back if detached.
    ///
    /// # Errors
    ///
    /// Propagates write and flush errors. Fails with
    /// [`io::ErrorKind::WouldBlock`] if the writer is currently borrowed
    /// elsewhere (a caller holding `borrow_mut()` across a marker call).
    pub fn emit(&self, text: String) -> io::Result<Emitted> {
        let Some(inner) = &self.inner else {
            return Ok(Emitted::Detached(text));
        };
        let mut w = inner
            .try_borrow_mut()
            .map_err(|_| io::Error::new(io::ErrorKind::WouldBlock, "sink is already borrowed"))?;
        w.write_all(text.as_bytes())?;
        w.flush()?;
        Ok(Emitted::Written(text.len()))
    }
}

impl<W> Clone for Sink<W> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<W> fmt::Debug for Sink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("attached", &self.inner.is_some())
            .finish()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
