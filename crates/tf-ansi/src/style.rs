// SPDX-License-Identifier: MIT
//
// Named styles — the fixed vocabulary of colors and text attributes.
//
// Each registry is a `static` table built at compile time. There is no
// insertion API: the only constructor is `const`, and it refuses tables with
// duplicate names or codes, so a broken table fails to compile rather than
// resolving lookups ambiguously at runtime.
//
// The codes are the ones the Travis log viewer (via ansiparse) maps to CSS
// classes. Anything outside this table renders as plain text there, which is
// why the registries are closed.

use std::fmt;

use crate::ansi::{
    BG_BLACK, BG_BLUE, BG_CYAN, BG_DEFAULT, BG_GREEN, BG_MAGENTA, BG_RED, BG_WHITE, BG_YELLOW,
    BOLD_OR_INTENSE, FG_BLACK, FG_BLUE, FG_BRIGHT_BLACK, FG_CYAN, FG_DEFAULT, FG_GREEN,
    FG_MAGENTA, FG_RED, FG_WHITE, FG_YELLOW, ITALIC, NORMAL_INTENSITY, NOT_ITALIC,
    NOT_UNDERLINED, SINGLY_UNDERLINED,
};
use crate::error::{AnsiError, Result};

// ─── Styling ─────────────────────────────────────────────────────────────────

/// One named style: the SGR code that opens it and the code that closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styling {
    pub name: &'static str,
    /// SGR parameter that turns the style on.
    pub code: u8,
    /// SGR parameter that turns it off again without disturbing other
    /// attributes (never a blanket `0`).
    pub reset: u8,
}

impl Styling {
    #[must_use]
    pub const fn new(name: &'static str, code: u8, reset: u8) -> Self {
        Self { name, code, reset }
    }
}

// ─── StyleKey ────────────────────────────────────────────────────────────────

/// How a caller names a style: by name (`"red"`) or by its opening SGR code
/// (`31`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKey<'a> {
    Name(&'a str),
    Code(u8),
}

impl<'a> From<&'a str> for StyleKey<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl From<u8> for StyleKey<'_> {
    fn from(code: u8) -> Self {
        Self::Code(code)
    }
}

impl fmt::Display for StyleKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Code(code) => write!(f, "{code}"),
        }
    }
}

// ─── StyleRegistry ───────────────────────────────────────────────────────────

/// A frozen, ordered table of [`Styling`] entries.
#[derive(Debug)]
pub struct StyleRegistry {
    /// What this table holds ("foreground color", "style", …). Used in
    /// error messages.
    kind: &'static str,
    entries: &'static [Styling],
}

impl StyleRegistry {
    /// Build a registry over a fixed table.
    ///
    /// # Panics
    ///
    /// Panics if two entries share a name or an opening code. In a `static`
    /// initializer this is a compile error.
    #[must_use]
    pub const fn new(kind: &'static str, entries: &'static [Styling]) -> Self {
        let mut i = 0;
        while i < entries.len() {
            let mut j = i + 1;
            while j < entries.len() {
                assert!(
                    !str_eq(entries[i].name, entries[j].name),
                    "duplicate style name in registry"
                );
                assert!(
                    entries[i].code != entries[j].code,
                    "duplicate style code in registry"
                );
                j += 1;
            }
            i += 1;
        }
        Self { kind, entries }
    }

    /// What kind of entries this registry holds.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// All entries, in table order.
    #[inline]
    #[must_use]
    pub const fn entries(&self) -> &'static [Styling] {
        self.entries
    }

    /// Look up an entry by name.
    ///
    /// # Errors
    ///
    /// Returns [`AnsiError::UnknownStyle`] if no entry has this name.
    pub fn get(&self, name: &str) -> Result<&'static Styling> {
        self.entries
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| AnsiError::UnknownStyle {
                registry: self.kind,
                name: name.to_owned(),
            })
    }

    /// Look up an entry by its opening SGR code.
    ///
    /// The code is first mapped back to a name and then resolved exactly
    /// like [`get`](Self::get), so both paths land on the same entry.
    ///
    /// # Errors
    ///
    /// Returns [`AnsiError::UnknownCode`] if no entry opens with `code`.
    pub fn by_code(&self, code: u8) -> Result<&'static Styling> {
        let name = self
            .entries
            .iter()
            .find(|s| s.code == code)
            .map(|s| s.name)
            .ok_or(AnsiError::UnknownCode {
                registry: self.kind,
                code,
            })?;
        self.get(name)
    }

    /// Resolve either form of [`StyleKey`].
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get) and [`by_code`](Self::by_code).
    pub fn lookup(&self, key: StyleKey<'_>) -> Result<&'static Styling> {
        match key {
            StyleKey::Name(name) => self.get(name),
            StyleKey::Code(code) => self.by_code(code),
        }
    }
}

/// `str` equality usable in `const` context.
const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

// ─── Tables ──────────────────────────────────────────────────────────────────

/// Foreground colors. `grey` is bright black (90), the only bright color the
/// log viewer styles.
pub static FG_COLORS: StyleRegistry = StyleRegistry::new("foreground color", &FG_TABLE);

const FG_TABLE: [Styling; 9] = [
    Styling::new("black", FG_BLACK, FG_DEFAULT),
    Styling::new("red", FG_RED, FG_DEFAULT),
    Styling::new("green", FG_GREEN, FG_DEFAULT),
    Styling::new("yellow", FG_YELLOW, FG_DEFAULT),
    Styling::new("blue", FG_BLUE, FG_DEFAULT),
    Styling::new("magenta", FG_MAGENTA, FG_DEFAULT),
    Styling::new("cyan", FG_CYAN, FG_DEFAULT),
    Styling::new("white", FG_WHITE, FG_DEFAULT),
    Styling::new("grey", FG_BRIGHT_BLACK, FG_DEFAULT),
];

/// Background colors.
pub static BG_COLORS: StyleRegistry = StyleRegistry::new("background color", &BG_TABLE);

const BG_TABLE: [Styling; 8] = [
    Styling::new("black", BG_BLACK, BG_DEFAULT),
    Styling::new("red", BG_RED, BG_DEFAULT),
    Styling::new("green", BG_GREEN, BG_DEFAULT),
    Styling::new("yellow", BG_YELLOW, BG_DEFAULT),
    Styling::new("blue", BG_BLUE, BG_DEFAULT),
    Styling::new("magenta", BG_MAGENTA, BG_DEFAULT),
    Styling::new("cyan", BG_CYAN, BG_DEFAULT),
    Styling::new("white", BG_WHITE, BG_DEFAULT),
];

/// Text styles. Each closes with its own "off" code rather than SGR 0.
pub static STYLES: StyleRegistry = StyleRegistry::new("style", &STYLE_TABLE);

const STYLE_TABLE: [Styling; 3] = [
    Styling::new("bold", BOLD_OR_INTENSE, NORMAL_INTENSITY),
    Styling::new("italic", ITALIC, NOT_ITALIC),
    Styling::new("underline", SINGLY_UNDERLINED, NOT_UNDERLINED),
];

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn foreground_codes() {
        let codes: Vec<(&str, u8, u8)> = FG_COLORS
            .entries()
            .iter()
            .map(|s| (s.name, s.code, s.reset))
            .collect();
        assert_eq!(
            codes,
            vec![
                ("black", 30, 39),
                ("red", 31, 39),
                ("green", 32, 39),
                ("yellow", 33, 39),
                ("blue", 34, 39),
                ("magenta", 35, 39),
                ("cyan", 36, 39),
                ("white", 37, 39),
                ("grey", 90, 39),
            ]
        );
    }

    #[test]
    fn background_codes() {
        for (i, s) in BG_COLORS.entries().iter().enumerate() {
            assert_eq!(usize::from(s.code), 40 + i);
            assert_eq!(s.reset, 49);
        }
        assert_eq!(BG_COLORS.entries().len(), 8);
        assert!(BG_COLORS.get("grey").is_err());
    }

    #[test]
    fn style_codes() {
        assert_eq!(STYLES.get("bold").unwrap(), &Styling::new("bold", 1, 22));
        assert_eq!(STYLES.get("italic").unwrap(), &Styling::new("italic", 3, 23));
        assert_eq!(
            STYLES.get("underline").unwrap(),
            &Styling::new("underline", 4, 24)
        );
    }

    #[test]
    fn name_and_code_resolve_to_same_entry() {
        for registry in [&FG_COLORS, &BG_COLORS, &STYLES] {
            for entry in registry.entries() {
                let by_name = registry.get(entry.name).unwrap();
                let by_code = registry.by_code(entry.code).unwrap();
                assert!(std::ptr::eq(by_name, by_code), "{}", entry.name);
            }
        }
    }

    #[test]
    fn unknown_name_fails() {
        assert_eq!(
            FG_COLORS.get("orange"),
            Err(AnsiError::UnknownStyle {
                registry: "foreground color",
                name: "orange".to_owned(),
            })
        );
    }

    #[test]
    fn unknown_code_fails() {
        assert_eq!(
            STYLES.by_code(2),
            Err(AnsiError::UnknownCode {
                registry: "style",
                code: 2,
            })
        );
        // A reset code is not an opening code.
        assert!(FG_COLORS.by_code(FG_DEFAULT).is_err());
    }

    #[test]
    fn lookup_dispatches_on_key() {
        assert_eq!(FG_COLORS.lookup("cyan".into()).unwrap().code, 36);
        assert_eq!(FG_COLORS.lookup(90u8.into()).unwrap().name, "grey");
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!(FG_COLORS.get("Red").is_err());
    }

    #[test]
    #[should_panic(expected = "duplicate style name")]
    fn duplicate_names_rejected() {
        static DUPES: [Styling; 2] = [Styling::new("red", 31, 39), Styling::new("red", 91, 39)];
        let _ = StyleRegistry::new("test", &DUPES);
    }

    #[test]
    #[should_panic(expected = "duplicate style code")]
    fn duplicate_codes_rejected() {
        static DUPES: [Styling; 2] = [Styling::new("red", 31, 39), Styling::new("crimson", 31, 39)];
        let _ = StyleRegistry::new("test", &DUPES);
    }

    #[test]
    fn style_key_display() {
        assert_eq!(StyleKey::from("red").to_string(), "red");
        assert_eq!(StyleKey::from(31u8).to_string(), "31");
    }
}
