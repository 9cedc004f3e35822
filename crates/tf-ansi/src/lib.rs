// SPDX-License-Identifier: MIT
//
// tf-ansi — the escape-sequence layer of travis-fold.
//
// Everything here produces bytes; nothing here decides when to emit them.
// The marker crate builds on top of these primitives, and the log frontend
// on the other end of the pipe only understands a small ANSI subset, so
// this crate deliberately stays inside that subset: SGR colors and styles
// from the basic 8/16-color palette and erase-in-line.

pub mod ansi;
pub mod colorize;
pub mod error;
pub mod style;
pub mod terminal;

pub use colorize::{Colors, colorize, write_colorized};
pub use error::{AnsiError, Result};
pub use style::{StyleKey, StyleRegistry, Styling};
pub use terminal::tty_enabled;
