//! Tag and id validation.
//!
//! The log viewer recognises markers with `[\w\-.]+` after the action, so a
//! tag outside that charset would silently leave a fold open in the rendered
//! log. Validation is ASCII-only: `\w` in the viewer's JavaScript regex
//! matches ASCII word characters, not Unicode letters.

use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("tag pattern is valid"));

/// Whether `s` is usable as a fold tag or timer id.
#[must_use]
pub fn is_valid_tag(s: &str) -> bool {
    TAG.is_match(s)
}
