//! # tf-markers — fold and timer markers for Travis CI logs
//!
//! The Travis log viewer turns two kinds of in-band markers into UI:
//!
//! - **folds** — `travis_fold:start:<tag>` … `travis_fold:end:<tag>` collapse
//!   everything between them under a clickable header;
//! - **timers** — `travis_time:start:<id>` … `travis_time:end:<id>:…` render
//!   a duration badge for the enclosed region.
//!
//! Each marker is a line ending in `\r` followed by an erase-in-line, so on a
//! plain terminal it overwrites itself and leaves no trace.
//!
//! # Architecture
//!
//! ```text
//! Sink<W>  (shared Rc<RefCell<W>>, or detached)
//!     │
//!     ├── Fold        NotStarted → Started → Ended, plus yellow desc lines
//!     ├── Timer       start/finish nanoseconds from a Clock
//!     └── TimedFold   Fold ⊃ Timer, started and ended as one
//!
//! Marker trait ──► Scope guard / scoped(): end() on every exit path
//! ```
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tf_markers::{Sink, TimedFold, TimedFoldOptions, scoped};
//!
//! let out = Rc::new(RefCell::new(Vec::new()));
//! let mut step = TimedFold::new(
//!     "install",
//!     TimedFoldOptions::default().description("Installing dependencies"),
//!     Sink::shared(Rc::clone(&out)),
//! )?;
//!
//! scoped(&mut step, |_| -> Result<(), tf_markers::MarkerError> {
//!     // ... run the step, writing its own output ...
//!     Ok(())
//! })?;
//!
//! let log = String::from_utf8(out.borrow().clone()).unwrap();
//! assert!(log.starts_with("travis_fold:start:install\r"));
//! assert!(log.ends_with("travis_fold:end:install\r\x1b[0K"));
//! # Ok::<(), tf_markers::MarkerError>(())
//! ```

pub mod clock;
pub mod error;
pub mod fold;
pub mod scope;
pub mod sink;
pub mod tag;
pub mod timed_fold;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ErrorKind, MarkerError, Result};
pub use fold::{Fold, FoldOptions, FoldState};
pub use scope::{Marker, Scope, scoped};
pub use sink::{Emitted, Sink};
pub use timed_fold::{TimedFold, TimedFoldOptions};
pub use timer::{Timer, TimerOptions};
