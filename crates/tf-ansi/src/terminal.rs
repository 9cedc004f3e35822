// SPDX-License-Identifier: MIT
//
// Terminal detection — is anyone going to see the colors?
//
// Safety: `isatty` is the standard POSIX query and has no safe std
// equivalent that takes a raw descriptor number. It only reads the
// descriptor's type, so the unsafe block is a single call.
#![allow(unsafe_code)]
//
// CI runners usually attach a pseudo-terminal to both streams; a local run
// piped into a file does not. Callers use this to decide whether to colorize
// at all. Nothing in this crate consults it on its own.

#[cfg(unix)]
use libc::{STDERR_FILENO, STDOUT_FILENO};

#[cfg(not(unix))]
const STDOUT_FILENO: i32 = 1;
#[cfg(not(unix))]
const STDERR_FILENO: i32 = 2;

/// Whether file descriptor `fd` is connected to a terminal.
#[cfg(unix)]
#[must_use]
pub fn is_tty(fd: i32) -> bool {
    unsafe { libc::isatty(fd) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty(fd: i32) -> bool {
    use std::io::IsTerminal;

    match fd {
        0 => std::io::stdin().is_terminal(),
        1 => std::io::stdout().is_terminal(),
        2 => std::io::stderr().is_terminal(),
        _ => false,
    }
}

/// Are both standard output and standard error terminals?
///
/// A log that mixes the two streams should only carry escape codes when
/// neither of them is redirected.
#[must_use]
pub fn tty_enabled() -> bool {
    is_tty(STDOUT_FILENO) && is_tty(STDERR_FILENO)
}
