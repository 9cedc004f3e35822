// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that build escape sequences, either as owned strings or
// written straight into any `impl Write`. No state, no decisions about when
// to emit; the caller decides. This module just knows the byte-level
// encoding of the handful of control functions the Travis log viewer
// understands.
//
// References: ECMA-48 (control functions), the VT100 user guide, and the
// travis-web log renderer whose stripping rules are recorded in
// `AMBIGUOUS_SEQUENCES` below.

use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AnsiError, Result};

// ─── Introducers ─────────────────────────────────────────────────────────────

/// Escape character.
pub const ESC: &str = "\x1b";

/// Control Sequence Introducer (`ESC [`).
pub const CSI: &str = "\x1b[";

/// Erase from the cursor to the end of the line (EL 0).
///
/// This is the `ANSI_CLEAR` every Travis marker line ends with: the marker
/// text is followed by `\r`, so the clear wipes it from the rendered line.
pub const CLEAR_LINE: &str = "\x1b[0K";

// ─── SGR Codes ───────────────────────────────────────────────────────────────

pub const FG_BLACK: u8 = 30;
pub const FG_RED: u8 = 31;
pub const FG_GREEN: u8 = 32;
pub const FG_YELLOW: u8 = 33;
pub const FG_BLUE: u8 = 34;
pub const FG_MAGENTA: u8 = 35;
pub const FG_CYAN: u8 = 36;
pub const FG_WHITE: u8 = 37;
pub const FG_BRIGHT_BLACK: u8 = 90;
/// Default foreground color. Closes every foreground code.
pub const FG_DEFAULT: u8 = 39;

pub const BG_BLACK: u8 = 40;
pub const BG_RED: u8 = 41;
pub const BG_GREEN: u8 = 42;
pub const BG_YELLOW: u8 = 43;
pub const BG_BLUE: u8 = 44;
pub const BG_MAGENTA: u8 = 45;
pub const BG_CYAN: u8 = 46;
pub const BG_WHITE: u8 = 47;
/// Default background color. Closes every background code.
pub const BG_DEFAULT: u8 = 49;

pub const BOLD_OR_INTENSE: u8 = 1;
pub const ITALIC: u8 = 3;
pub const SINGLY_UNDERLINED: u8 = 4;
/// Neither bold nor faint.
pub const NORMAL_INTENSITY: u8 = 22;
pub const NOT_ITALIC: u8 = 23;
pub const NOT_UNDERLINED: u8 = 24;

// ─── SGR ─────────────────────────────────────────────────────────────────────

/// SGR (Select Graphic Rendition): `CSI p1;p2;… m`.
///
/// Parameters are joined with `;` exactly as given. No validation happens at
/// this layer: `sgr(["1", "31"])` and `sgr([999])` are both assembled
/// verbatim. Mixed strings and integers can be passed as `&dyn Display`.
///
/// ```
/// use tf_ansi::ansi::sgr;
///
/// assert_eq!(sgr([31]), "\x1b[31m");
/// assert_eq!(sgr::<[&dyn std::fmt::Display; 2]>([&1, &"4"]), "\x1b[1;4m");
/// ```
#[must_use]
pub fn sgr<I>(params: I) -> String
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let mut out = String::from(CSI);
    for (i, p) in params.into_iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        // Writing into a String is infallible.
        let _ = write!(out, "{p}");
    }
    out.push('m');
    out
}

/// Write an SGR sequence to `w`. Same bytes as [`sgr`].
///
/// # Errors
///
/// Propagates any error from the underlying writer.
pub fn write_sgr<I>(w: &mut impl Write, params: I) -> io::Result<()>
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    w.write_all(sgr(params).as_bytes())
}

// ─── Erase in Line ───────────────────────────────────────────────────────────

/// EL (Erase in Line). The cursor does not move.
///
/// | Sequence | Effect                                          |
/// |----------|-------------------------------------------------|
/// | `CSI K`  | same as `CSI 0K`                                |
/// | `CSI 0K` | erase from the cursor to the end of the line    |
/// | `CSI 1K` | erase from the start of the line to the cursor  |
/// | `CSI 2K` | erase the whole line                            |
/// | `CSI ?nK`| selective erase (DECSEL), same `n` semantics    |
///
/// # Errors
///
/// Returns [`AnsiError::InvalidEraseParam`] if `param` is not one of
/// `""`, `"0"`, `"1"`, `"2"`.
pub fn erase_in_line(param: &str, selective: bool) -> Result<String> {
    if !matches!(param, "" | "0" | "1" | "2") {
        return Err(AnsiError::InvalidEraseParam(param.to_owned()));
    }
    let q = if selective { "?" } else { "" };
    Ok(format!("{CSI}{q}{param}K"))
}

// ─── Ambiguous Sequences ─────────────────────────────────────────────────────

/// Control sequences the Travis log viewer silently strips.
///
/// Mirrors the `Log.Deansi` cleanup in travis-web's `app/utils/log.js`. It is
/// kept here so operators can tell which sequences survive to the rendered
/// log; nothing in travis-fold emits or filters these. Verbose-mode syntax
/// (`(?x)`), compiled by [`ambiguous_sequences`].
pub const AMBIGUOUS_SEQUENCES: &str = r"(?x)
    \x1b                     # ESC
    (?:
        \[ 0? c              # query / report device code
      | \[ [0356] n          # device status, cursor position report
      | \[ 7 [lh]            # disable / enable line wrap
      | \[ \?25 [lh]         # hide / show text cursor
      | \( B                 # designate character set: US ASCII
      | H                    # horizontal tab set
      | \[ (?: \d+ (?: ;\d+ ){0,2} )? G   # cursor horizontal absolute
      | \[ [12]? [JK]        # erase in display / erase in line
      | [DM]                 # index / reverse index
      | \[ 0K                # clear to end of line
    )
";

static AMBIGUOUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(AMBIGUOUS_SEQUENCES).expect("AMBIGUOUS_SEQUENCES is a valid pattern")
});

/// The compiled form of [`AMBIGUOUS_SEQUENCES`].
#[must_use]
pub fn ambiguous_sequences() -> &'static Regex {
    &AMBIGUOUS
}

// ─── Tests ───────────────────────────────────────────────────────────────────
