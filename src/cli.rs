// SPDX-License-Identifier: MIT
//
// Command-line surface.
//
// Three subcommands, all writing markers to stdout where the CI runner
// collects the build log:
//
//   run    wrap a command in a (timed) fold
//   color  print colorized text using the log viewer's palette
//   demo   a fold with a nested timer, for eyeballing a runner's rendering

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "travis-fold", version, about = "Fold and timer markers for Travis CI build logs")]
pub struct Cli {
    /// When to emit color escapes outside the markers themselves.
    #[arg(
        long,
        value_enum,
        default_value_t = ColorMode::Auto,
        env = "TRAVIS_FOLD_COLOR",
        global = true
    )]
    pub color: ColorMode,

    /// Log more to stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a command inside a fold, timed unless --no-timer is given.
    Run(RunArgs),
    /// Print text in a named color and style.
    Color(ColorArgs),
    /// Emit a sample fold with a nested timer and description.
    Demo,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Fold tag: letters, digits, '_', '.', '-'.
    #[arg(long)]
    pub tag: String,

    /// Yellow description line shown as the fold header.
    #[arg(long)]
    pub desc: Option<String>,

    /// Timer id (a random UUID by default).
    #[arg(long, conflicts_with = "no_timer")]
    pub timer_id: Option<String>,

    /// Fold only, without a duration.
    #[arg(long)]
    pub no_timer: bool,

    /// The command to run and its arguments, after `--`.
    #[arg(last = true, required = true, num_args = 1..)]
    pub command: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ColorArgs {
    pub text: String,

    /// black, red, green, yellow, blue, magenta, cyan, white, grey.
    #[arg(long)]
    pub fg: Option<String>,

    /// black, red, green, yellow, blue, magenta, cyan, white.
    #[arg(long)]
    pub bg: Option<String>,

    /// '+'-separated: bold, italic, underline.
    #[arg(long)]
    pub style: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Color only when both stdout and stderr are terminals.
    Auto,
    Always,
    Never,
}
