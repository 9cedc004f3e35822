// SPDX-License-Identifier: MIT
//
// Resolved runtime configuration.
//
// The CLI (plus `TRAVIS_FOLD_COLOR`) is the only source. Resolution happens
// once, up front, so the TTY check runs before any marker is written.

use log::LevelFilter;

use crate::cli::{Cli, ColorMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Emit color escapes in non-marker output.
    pub color: bool,
    /// stderr log verbosity.
    pub log_level: LevelFilter,
}

impl Config {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            color: resolve_color(cli.color, tf_ansi::tty_enabled),
            log_level: level_for(cli.verbose),
        }
    }
}

fn resolve_color(mode: ColorMode, tty: impl FnOnce() -> bool) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => tty(),
    }
}

const fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
