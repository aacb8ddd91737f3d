//! Convenience macros for vendor calls and captured text.
//!
//! # Usage
//!
//! ```rust
//! # use nrfjprog_errors::{ensure_vendor, BindingErrorCode, NrfjprogError, Result};
//! # fn nrfjprog_connect_to_device() -> i32 { NrfjprogError::CannotConnect.value() }
//! fn connect() -> Result<()> {
//!     ensure_vendor!(
//!         nrfjprog_connect_to_device(),
//!         BindingErrorCode::CouldNotConnectToDevice,
//!         "connecting to device"
//!     );
//!     Ok(())
//! }
//!
//! let err = connect().unwrap_err();
//! assert_eq!(err.errcode(), "CouldNotConnectToDevice");
//! assert_eq!(err.lowlevel_error(), "CANNOT_CONNECT");
//! ```
//!
//! ## Sanitization
//!
//! DLL log callbacks deliver raw text. `sanitized!()` makes a line safe to
//! embed in a single-line message:
//! - ANSI control sequences (`ESC [ params final`, e.g. colours, `ESC[2K`,
//!   `ESC[J`) are removed entirely
//! - A lone `ESC` not starting such a sequence becomes `?`
//! - Other control characters become `?`
//! - Trailing `\r` / `\n` are stripped first, so a normal line is unchanged

use std::borrow::Cow;

const ESC: char = '\u{1b}';

/// Replace control characters and strip ANSI control sequences from a log line.
///
/// A control sequence is `ESC [`, any parameter bytes (`0x30..=0x3F`), any
/// intermediate bytes (`0x20..=0x2F`) and one final byte (`0x40..=0x7E`).
/// A sequence cut short by some other character ends there and that
/// character is kept.
///
/// Returns `Cow::Borrowed` when nothing had to change.
pub fn sanitize_line(line: &str) -> Cow<'_, str> {
    let line = line.trim_end_matches(['\r', '\n']);
    if !line.chars().any(char::is_control) {
        return Cow::Borrowed(line);
    }

    let mut s = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ESC {
            s.push(if c.is_control() { '?' } else { c });
            continue;
        }

        if chars.next_if_eq(&'[').is_none() {
            s.push('?');
            continue;
        }

        while chars.next_if(|b| matches!(b, '\u{30}'..='\u{3f}')).is_some() {}
        while chars.next_if(|b| matches!(b, '\u{20}'..='\u{2f}')).is_some() {}
        chars.next_if(|b| matches!(b, '\u{40}'..='\u{7e}'));
    }

    Cow::Owned(s)
}

/// Sanitize any displayable value into an owned log line.
///
/// ```rust
/// # use nrfjprog_errors::sanitized;
/// assert_eq!(sanitized!("\u{1b}[31mfailed\u{1b}[0m\r\n"), "failed");
/// assert_eq!(sanitized!("\u{1b}[2Kerase done"), "erase done");
/// assert_eq!(sanitized!("tab\there"), "tab?here");
/// ```
#[macro_export]
macro_rules! sanitized {
    ($expr:expr) => {{
        let original = $expr.to_string();
        $crate::convenience::sanitize_line(&original).into_owned()
    }};
}

/// Evaluate a vendor DLL call and return early with a [`BindingError`] on failure.
///
/// The call must evaluate to the raw `nrfjprogdll_err_t` (anything `Into<i32>`).
/// An optional fourth argument is a `&LogCapture` whose contents become the
/// error's `output`; the capture is drained either way on failure.
///
/// [`BindingError`]: crate::BindingError
#[macro_export]
macro_rules! ensure_vendor {
    ($call:expr, $code:expr, $op:expr $(,)?) => {
        $crate::check_vendor($call, $code, $op, ::core::option::Option::None)?
    };
    ($call:expr, $code:expr, $op:expr, $capture:expr $(,)?) => {
        $crate::check_vendor($call, $code, $op, ::core::option::Option::Some($capture))?
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BindingErrorCode, LogCapture, NrfjprogError, Result};

    #[test]
    fn clean_line_is_borrowed() {
        let out = sanitize_line("Device connected");
        assert!(matches!(out, Cow::Borrowed("Device connected")));
    }

    #[test]
    fn trailing_newlines_are_stripped_without_allocating() {
        let out = sanitize_line("done\r\n");
        assert!(matches!(out, Cow::Borrowed("done")));
    }

    #[test]
    fn control_characters_are_replaced() {
        assert_eq!(sanitize_line("a\u{0}b\u{7}c"), "a?b?c");
        assert_eq!(sanitize_line("multi\nline"), "multi?line");
    }

    #[test]
    fn colour_sequences_are_removed() {
        assert_eq!(sanitize_line("\u{1b}[1;33mWARN\u{1b}[0m low voltage"), "WARN low voltage");
    }

    #[test]
    fn erase_line_sequence_keeps_following_text() {
        assert_eq!(
            sanitize_line("\u{1b}[2KProgramming failed at 0x1000"),
            "Programming failed at 0x1000"
        );
    }

    #[test]
    fn erase_display_sequence_keeps_following_text() {
        assert_eq!(sanitize_line("\u{1b}[Jcould not connect"), "could not connect");
    }

    #[test]
    fn bare_escape_becomes_placeholder() {
        assert_eq!(
            sanitize_line("ESC\u{1b} then verify error at page 4"),
            "ESC? then verify error at page 4"
        );
        assert_eq!(sanitize_line("tail\u{1b}"), "tail?");
    }

    #[test]
    fn interrupted_sequence_keeps_the_interrupting_text() {
        assert_eq!(sanitize_line("\u{1b}[12é done"), "é done");
        assert_eq!(sanitize_line("\u{1b}[1;"), "");
    }

    #[test]
    fn sanitized_macro_accepts_display_values() {
        assert_eq!(sanitized!(42), "42");
        assert_eq!(sanitized!(String::from("x\ty")), "x?y");
    }

    fn erase(result: i32) -> Result<&'static str> {
        ensure_vendor!(result, BindingErrorCode::CouldNotErase, "erasing all flash");
        Ok("erased")
    }

    #[test]
    fn ensure_vendor_passes_success_through() {
        assert_eq!(erase(0).unwrap(), "erased");
    }

    #[test]
    fn ensure_vendor_returns_composite_error() {
        let err = erase(NrfjprogError::NvmcError.value()).unwrap_err();
        assert_eq!(err.errno(), 10);
        assert_eq!(err.lowlevel_errno(), -20);
        assert_eq!(err.operation(), "erasing all flash");
    }

    #[test]
    fn ensure_vendor_attaches_capture_output() {
        let capture = LogCapture::default();
        capture.record("NVMC busy");

        let run = || -> Result<()> {
            ensure_vendor!(
                NrfjprogError::NvmcError,
                BindingErrorCode::CouldNotErase,
                "erasing page",
                &capture,
            );
            Ok(())
        };

        let err = run().unwrap_err();
        assert_eq!(err.output(), "NVMC busy");
        assert!(capture.is_empty());
    }
}
