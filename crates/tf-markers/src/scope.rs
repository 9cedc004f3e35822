//! Scoped acquisition — `end()` on every way out of a region.
//!
//! An unterminated fold swallows the rest of the build log in the viewer, so
//! once a marker is started its end marker must be written no matter how the
//! enclosed work finishes. Two entry points:
//!
//! - [`scoped`] runs a closure between `start()` and `end()` and reports
//!   errors from both the work and the end marker;
//! - [`Scope`] is the underlying guard. [`Scope::exit`] ends the marker and
//!   returns the result; dropping the guard without `exit` (early return,
//!   `?`, panic) still ends it.
//!
//! Nesting is the caller's job: an inner scope must exit before the outer
//! one. Nothing here tracks a stack, and the borrow checker already prevents
//! ending the outer marker while an inner guard borrows it.

use std::ops::{Deref, DerefMut};

use crate::error::{MarkerError, Result};
use crate::sink::Emitted;

/// Anything with a start/end lifecycle that writes markers.
pub trait Marker {
    /// Write the start marker(s).
    ///
    /// # Errors
    ///
    /// Lifecycle misuse or sink failure.
    fn start(&mut self) -> Result<Emitted>;

    /// Write the end marker(s).
    ///
    /// # Errors
    ///
    /// Lifecycle misuse or sink failure.
    fn end(&mut self) -> Result<Emitted>;

    fn is_started(&self) -> bool;

    /// Whether markers reach a writer (as opposed to a detached sink).
    fn has_sink(&self) -> bool;

    /// "fold", "timer", … for messages.
    fn kind(&self) -> &'static str;

    /// Tag or id.
    fn name(&self) -> &str;
}

/// Guard that holds a started marker and ends it on exit or drop.
pub struct Scope<'a, M: Marker> {
    marker: &'a mut M,
    armed: bool,
}

impl<'a, M: Marker> Scope<'a, M> {
    /// Start `marker` and return a guard that will end it.
    ///
    /// # Errors
    ///
    /// [`MarkerError::SinkUnavailable`] if the marker has no sink (nothing is
    /// started), otherwise whatever `start()` returns. No guard exists on
    /// error, so nothing will be ended.
    pub fn enter(marker: &'a mut M) -> Result<Self> {
        if !marker.has_sink() {
            return Err(MarkerError::sink_unavailable(marker.kind(), marker.name()));
        }
        marker.start()?;
        log::trace!("{} '{}': scope entered", marker.kind(), marker.name());
        Ok(Self {
            marker,
            armed: true,
        })
    }

    /// End the marker now and report the outcome.
    ///
    /// # Errors
    ///
    /// Whatever `end()` returns.
    pub fn exit(mut self) -> Result<Emitted> {
        self.armed = false;
        log::trace!("{} '{}': scope exited", self.marker.kind(), self.marker.name());
        self.marker.end()
    }
}

impl<M: Marker> Deref for Scope<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        self.marker
    }
}

impl<M: Marker> DerefMut for Scope<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        self.marker
    }
}

impl<M: Marker> Drop for Scope<'_, M> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        // Drop can't return the error; the caller opted out of seeing it by
        // not calling `exit`.
        if let Err(e) = self.marker.end() {
            log::error!(
                "{} '{}': end marker failed while leaving scope: {e}",
                self.marker.kind(),
                self.marker.name()
            );
        }
    }
}

/// Run `work` between `marker.start()` and `marker.end()`.
///
/// `end()` runs whether `work` returns `Ok`, returns `Err`, or panics. If
/// both `work` and `end()` fail, the work error is returned and the end
/// error is logged.
///
/// # Errors
///
/// Entry failures (see [`Scope::enter`]), then the work's error, then the
/// end marker's error.
pub fn scoped<M, T, E, F>(marker: &mut M, work: F) -> std::result::Result<T, E>
where
    M: Marker,
    E: From<MarkerError>,
    F: FnOnce(&mut M) -> std::result::Result<T, E>,
{
    let mut scope = Scope::enter(marker)?;
    let outcome = work(&mut scope);
    let ended = scope.exit();
    match (outcome, ended) {
        (Ok(value), Ok(_)) => Ok(value),
        (Ok(_), Err(end_err)) => Err(end_err.into()),
        (Err(work_err), Ok(_)) => Err(work_err),
        (Err(work_err), Err(end_err)) => {
            log::error!("end marker failed after work error: {end_err}");
            Err(work_err)
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
