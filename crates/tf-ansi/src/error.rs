// SPDX-License-Identifier: MIT
//
// Errors raised while building escape sequences.
//
// Every variant is an invalid argument: the toolkit has no state to get
// wrong, so the only way to fail is to ask for something that doesn't exist.

use thiserror::Error;

/// Result alias for escape-sequence construction.
pub type Result<T, E = AnsiError> = std::result::Result<T, E>;

/// An escape sequence could not be built from the given arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnsiError {
    /// No entry with this name in the named registry.
    #[error("invalid {registry} '{name}': not present")]
    UnknownStyle {
        registry: &'static str,
        name: String,
    },

    /// No entry opens with this SGR code in the named registry.
    #[error("invalid {registry} code {code}: not present")]
    UnknownCode { registry: &'static str, code: u8 },

    /// Erase-in-line only accepts "", "0", "1" or "2".
    #[error("invalid erase-in-line parameter '{0}'")]
    InvalidEraseParam(String),
}
