// SPDX-License-Identifier: MIT
//
// stderr logging for the binary.
//
// Markers own stdout, so diagnostics go to stderr and never interleave with
// the fold/timer lines the log viewer parses.

use std::io;

use log::{LevelFilter, SetLoggerError};
use simplelog::{ConfigBuilder, WriteLogger};

/// Install the global logger.
///
/// # Errors
///
/// Fails if a logger is already installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    WriteLogger::init(level, config, io::stderr())
}
