// SPDX-License-Identifier: MIT
//
// Colorizer — wraps one flat span of text in named styles.
//
// Styles open in a fixed order (foreground, background, then text styles
// left to right) and close in the reverse order, one SGR per entry. Closing
// uses each style's own "off" code, never SGR 0, so a colorized span can sit
// inside text that carries attributes of its own.

use std::io::{self, Write};

use crate::ansi::sgr;
use crate::error::Result;
use crate::style::{BG_COLORS, FG_COLORS, STYLES, StyleKey, Styling};

/// Which styles to apply to a span. Every field is optional, and an empty
/// name counts as not given; an empty `Colors` leaves the text untouched.
///
/// ```
/// use tf_ansi::{Colors, colorize};
///
/// let s = colorize("hi", &Colors::new().fg("red").style("bold")).unwrap();
/// assert_eq!(s, "\x1b[31m\x1b[1mhi\x1b[22m\x1b[39m");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Colors<'a> {
    pub fg: Option<StyleKey<'a>>,
    pub bg: Option<StyleKey<'a>>,
    /// `+`-delimited style names, e.g. `"bold+underline"`.
    pub style: Option<&'a str>,
}

impl<'a> Colors<'a> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            style: None,
        }
    }

    #[must_use]
    pub fn fg(mut self, key: impl Into<StyleKey<'a>>) -> Self {
        self.fg = Some(key.into());
        self
    }

    #[must_use]
    pub fn bg(mut self, key: impl Into<StyleKey<'a>>) -> Self {
        self.bg = Some(key.into());
        self
    }

    #[must_use]
    pub const fn style(mut self, styles: &'a str) -> Self {
        self.style = Some(styles);
        self
    }

    /// Whether no style is requested at all.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        given(self.fg).is_none() && given(self.bg).is_none() && self.styles().is_none()
    }

    fn styles(&self) -> Option<&'a str> {
        self.style.filter(|s| !s.is_empty())
    }

    /// Resolve every requested style, in opening order.
    ///
    /// # Errors
    ///
    /// Fails on the first name or code that isn't in its registry.
    pub fn resolve(&self) -> Result<Vec<&'static Styling>> {
        let mut stylings = Vec::new();
        if let Some(fg) = given(self.fg) {
            stylings.push(FG_COLORS.lookup(fg)?);
        }
        if let Some(bg) = given(self.bg) {
            stylings.push(BG_COLORS.lookup(bg)?);
        }
        if let Some(style) = self.styles() {
            for name in style.split('+') {
                stylings.push(STYLES.get(name)?);
            }
        }
        Ok(stylings)
    }
}

fn given(key: Option<StyleKey<'_>>) -> Option<StyleKey<'_>> {
    key.filter(|k| !matches!(k, StyleKey::Name("")))
}

/// Colorize `text` with the requested styles.
///
/// # Errors
///
/// Returns [`AnsiError::UnknownStyle`](crate::AnsiError::UnknownStyle) or
/// [`AnsiError::UnknownCode`](crate::AnsiError::UnknownCode) if any style
/// does not resolve. Nothing is produced in that case.
pub fn colorize(text: &str, colors: &Colors<'_>) -> Result<String> {
    let mut stylings = colors.resolve()?;

    let mut out = String::with_capacity(text.len() + stylings.len() * 10);
    for s in &stylings {
        out.push_str(&sgr([s.code]));
    }
    out.push_str(text);
    while let Some(s) = stylings.pop() {
        out.push_str(&sgr([s.reset]));
    }
    Ok(out)
}

/// Write the colorized form of `text` to `w`. Same bytes as [`colorize`].
///
/// # Errors
///
/// Unknown styles surface as [`io::ErrorKind::InvalidInput`] before anything
/// is written; write failures propagate from `w`.
pub fn write_colorized(w: &mut impl Write, text: &str, colors: &Colors<'_>) -> io::Result<()> {
    let s = colorize(text, colors).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    w.write_all(s.as_bytes())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnsiError;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_untouched() {
        assert_eq!(colorize("hi", &Colors::new()).unwrap(), "hi");
        assert!(Colors::default().is_plain());
    }

    #[test]
    fn foreground_only() {
        assert_eq!(
            colorize("hi", &Colors::new().fg("red")).unwrap(),
            "\x1b[31mhi\x1b[39m"
        );
    }

    #[test]
    fn background_only() {
        assert_eq!(
            colorize("hi", &Colors::new().bg("blue")).unwrap(),
            "\x1b[44mhi\x1b[49m"
        );
    }

    #[test]
    fn styles_close_in_reverse() {
        let s = colorize("hi", &Colors::new().fg("red").style("bold+underline")).unwrap();
        assert_eq!(s, "\x1b[31m\x1b[1m\x1b[4mhi\x1b[24m\x1b[22m\x1b[39m");
    }

    #[test]
    fn full_stack_order() {
        let colors = Colors::new()
            .fg("grey")
            .bg("white")
            .style("italic+bold+underline");
        assert_eq!(
            colorize("x", &colors).unwrap(),
            "\x1b[90m\x1b[47m\x1b[3m\x1b[1m\x1b[4mx\x1b[24m\x1b[22m\x1b[23m\x1b[49m\x1b[39m"
        );
    }

    #[test]
    fn colors_by_code() {
        assert_eq!(
            colorize("ok", &Colors::new().fg(32u8).bg(40u8)).unwrap(),
            "\x1b[32m\x1b[40mok\x1b[49m\x1b[39m"
        );
    }

    #[test]
    fn empty_text_still_wrapped() {
        assert_eq!(
            colorize("", &Colors::new().fg("yellow")).unwrap(),
            "\x1b[33m\x1b[39m"
        );
    }

    #[test]
    fn unknown_style_fails() {
        let err = colorize("hi", &Colors::new().style("bold+blink")).unwrap_err();
        assert_eq!(
            err,
            AnsiError::UnknownStyle {
                registry: "style",
                name: "blink".to_owned(),
            }
        );
    }

    #[test]
    fn empty_style_segment_fails() {
        assert!(colorize("hi", &Colors::new().style("bold++italic")).is_err());
        assert!(colorize("hi", &Colors::new().style("bold+")).is_err());
    }

    #[test]
    fn empty_names_are_not_given() {
        let colors = Colors::new().fg("").bg("").style("");
        assert!(colors.is_plain());
        assert_eq!(colorize("hi", &colors).unwrap(), "hi");
        assert_eq!(
            colorize("hi", &Colors::new().fg("red").style("")).unwrap(),
            "\x1b[31mhi\x1b[39m"
        );
    }

    #[test]
    fn unknown_color_fails() {
        assert!(colorize("hi", &Colors::new().fg("orange")).is_err());
        // Background has no grey.
        assert!(colorize("hi", &Colors::new().bg("grey")).is_err());
        // A foreground code is not a background code.
        assert!(colorize("hi", &Colors::new().bg(31u8)).is_err());
    }

    #[test]
    fn write_colorized_matches() {
        let colors = Colors::new().fg("yellow");
        let mut buf = Vec::new();
        write_colorized(&mut buf, "desc", &colors).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            colorize("desc", &colors).unwrap()
        );
    }

    #[test]
    fn write_colorized_writes_nothing_on_error() {
        let mut buf = Vec::new();
        let err = write_colorized(&mut buf, "desc", &Colors::new().fg("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(buf.is_empty());
    }
}
