// SPDX-License-Identifier: MIT
//
// Top-level error for the binary. Library errors pass through unchanged;
// the only additions are process-level failures.

use std::io;

use thiserror::Error;
use tf_ansi::AnsiError;
use tf_markers::MarkerError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Marker(#[from] MarkerError),

    #[error(transparent)]
    Style(#[from] AnsiError),

    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// Process exit status for this failure. Mirrors the shell: 127 when the
    /// command can't be found, 126 when it can't be executed.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Spawn { source, .. } if source.kind() == io::ErrorKind::NotFound => 127,
            Self::Spawn { .. } => 126,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_exit_codes() {
        let missing = AppError::Spawn {
            program: "nope".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(missing.exit_code(), 127);

        let denied = AppError::Spawn {
            program: "/etc/passwd".into(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert_eq!(denied.exit_code(), 126);
    }

    #[test]
    fn library_errors_exit_one() {
        let err = AppError::from(MarkerError::InvalidTag("a b".into()));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(
            err.to_string(),
            "invalid fold tag 'a b': expected one or more of [A-Za-z0-9_.-]"
        );
    }
}
