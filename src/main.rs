// SPDX-License-Identifier: MIT
//
// travis-fold — fold and timer markers for Travis CI build logs.
//
// This binary wires the two library crates to a command line:
//
//   tf-ansi    → escape sequences, style tables, colorize
//   tf-markers → Fold, Timer, TimedFold, scoped acquisition
//
// Markers go to stdout, where the runner captures the build log. Logging
// goes to stderr so it never splits a marker line.

mod cli;
mod config;
mod demo;
mod error;
mod logging;
mod run;

use std::io::{self, Write};
use std::process;

use clap::Parser;
use tf_ansi::{Colors, colorize};
use tf_markers::Sink;

use crate::cli::{Cli, ColorArgs, Command};
use crate::config::Config;
use crate::error::AppError;

fn dispatch(command: &Command, config: &Config) -> Result<i32, AppError> {
    match command {
        Command::Run(args) => run::run(args, config, Sink::stdout()),
        Command::Color(args) => {
            color(args, config, &mut io::stdout().lock())?;
            Ok(0)
        }
        Command::Demo => {
            demo::demo(Sink::stdout())?;
            Ok(0)
        }
    }
}

/// Unknown names are reported even when color is off.
fn color(args: &ColorArgs, config: &Config, out: &mut impl Write) -> Result<(), AppError> {
    let mut colors = Colors::new();
    if let Some(fg) = &args.fg {
        colors = colors.fg(fg.as_str());
    }
    if let Some(bg) = &args.bg {
        colors = colors.bg(bg.as_str());
    }
    if let Some(style) = &args.style {
        colors = colors.style(style);
    }
    let styled = colorize(&args.text, &colors)?;
    let line = if config.color { styled.as_str() } else { args.text.as_str() };
    writeln!(out, "{line}")?;
    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    if let Err(e) = logging::init(config.log_level) {
        eprintln!("travis-fold: failed to initialize logging: {e}");
    }
    log::debug!("{config:?}");

    match dispatch(&cli.command, &config) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("travis-fold: {e}");
            process::exit(e.exit_code());
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;
    use pretty_assertions::assert_eq;

    fn args(fg: Option<&str>, style: Option<&str>) -> ColorArgs {
        ColorArgs {
            text: "hi".to_owned(),
            fg: fg.map(str::to_owned),
            bg: None,
            style: style.map(str::to_owned),
        }
    }

    fn config(color: bool) -> Config {
        Config {
            color,
            log_level: LevelFilter::Off,
        }
    }

    fn render(a: &ColorArgs, color_on: bool) -> Result<String, AppError> {
        let mut out = Vec::new();
        color(a, &config(color_on), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn color_writes_escapes_when_enabled() {
        assert_eq!(
            render(&args(Some("red"), Some("bold+underline")), true).unwrap(),
            "\x1b[31m\x1b[1m\x1b[4mhi\x1b[24m\x1b[22m\x1b[39m\n"
        );
    }

    #[test]
    fn color_plain_when_disabled() {
        assert_eq!(render(&args(Some("red"), None), false).unwrap(), "hi\n");
    }

    #[test]
    fn unknown_color_is_an_error_either_way() {
        let err = render(&args(Some("purple"), None), false).unwrap_err();
        assert!(matches!(err, AppError::Style(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
