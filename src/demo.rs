// SPDX-License-Identifier: MIT
//
// `travis-fold demo`: a fold holding a timer, a description and a few
// lines of content. Paste the output into a CI job to see how the runner
// renders it.

use std::io::Write;

use tf_markers::{Fold, FoldOptions, Result, Sink, Timer, TimerOptions, scoped};

pub const TAG: &str = "fold-tag";
const LINES: [&str; 3] = ["content", "more content", "even more content"];

/// # Errors
///
/// A marker write failure.
pub fn demo<W: Write>(sink: Sink<W>) -> Result<()> {
    let mut fold = Fold::new(TAG, FoldOptions::default(), sink.clone())?;
    let mut timer = Timer::new(TimerOptions::default(), sink.clone())?;

    scoped(&mut fold, |fold| -> Result<()> {
        scoped(&mut timer, |_| fold.desc("Fold Time Description").map(drop))?;
        for line in LINES {
            sink.emit(format!("{line}\n"))?;
        }
        Ok(())
    })
}
