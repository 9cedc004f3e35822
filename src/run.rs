// SPDX-License-Identifier: MIT
//
// `travis-fold run`: wrap a child process in a fold.
//
//   travis_fold:start:<tag>
//   travis_time:start:<id>          (unless --no-timer)
//   <description>
//   … child output (inherited stdout/stderr) …
//   travis_time:end:<id>:start=…    (unless --no-timer)
//   travis_fold:end:<tag>
//   The command "…" exited with N.  (only on failure)
//
// The end markers are written even when the child can't be spawned.

use std::io::Write;
use std::process::{Command, ExitStatus};

use tf_ansi::{Colors, colorize};
use tf_markers::{Fold, FoldOptions, Sink, TimedFold, TimedFoldOptions, TimerOptions, scoped};

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::AppError;

/// Run `args.command` between markers written to `sink`. Returns the exit
/// code the wrapper should exit with.
///
/// # Errors
///
/// Invalid tag or timer id (nothing is written), a marker write failure, or
/// a spawn failure (after the end markers are written).
pub fn run<W: Write>(args: &RunArgs, config: &Config, sink: Sink<W>) -> Result<i32, AppError> {
    let status = if args.no_timer {
        let mut options = FoldOptions::default();
        options.description.clone_from(&args.desc);
        let mut fold = Fold::new(&args.tag, options, sink.clone())?;
        scoped(&mut fold, |_| spawn(&args.command))?
    } else {
        let mut options = TimedFoldOptions::default();
        options.description.clone_from(&args.desc);
        if let Some(id) = &args.timer_id {
            options = options.timer(TimerOptions::default().id(id));
        }
        let mut timed = TimedFold::new(&args.tag, options, sink.clone())?;
        scoped(&mut timed, |_| spawn(&args.command))?
    };

    let code = exit_code(status);
    log::info!("'{}' exited with {code}", display_command(&args.command));
    if code != 0 {
        sink.emit(failure_notice(&args.command, code, config.color)?)?;
    }
    Ok(code)
}

fn spawn(command: &[String]) -> Result<ExitStatus, AppError> {
    let (program, rest) = command.split_first().ok_or_else(|| AppError::Spawn {
        program: String::new(),
        source: std::io::Error::from(std::io::ErrorKind::InvalidInput),
    })?;
    log::debug!("spawning {}", display_command(command));
    Command::new(program)
        .args(rest)
        .status()
        .map_err(|source| AppError::Spawn {
            program: program.clone(),
            source,
        })
}

/// Shell convention: signals map to 128 + signo.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return 128 + sig;
        }
    }
    1
}

fn display_command(command: &[String]) -> String {
    command.join(" ")
}

fn failure_notice(command: &[String], code: i32, color: bool) -> Result<String, AppError> {
    let text = format!(
        "The command \"{}\" exited with {code}.",
        display_command(command)
    );
    let mut line = if color {
        colorize(&text, &Colors::new().fg("red").style("bold"))?
    } else {
        text
    };
    line.push('\n');
    Ok(line)
}
