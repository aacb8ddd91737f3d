//! Structured log view of a [`BindingError`](crate::BindingError).
//!
//! # Properties
//!
//! - `ErrorLog` borrows from the error and cannot outlive it
//! - Accessors never allocate
//! - `write_to` streams into any `fmt::Write` and bounds every free-text field
//!
//! Owned text carried by an error (operation, composed message, DLL output)
//! is held in [`ErrorText`], which wipes its buffer on drop. DLL log output can
//! contain memory read back from the target, so it is not left lying around
//! in freed heap pages.

use std::borrow::Cow;
use std::fmt;
use zeroize::Zeroize;

/// Maximum length for any individual field in formatted output
const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated strings
pub(crate) const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Text field of an error, zeroized on drop when owned.
///
/// Borrowed values are assumed static and are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ErrorText {
    value: Cow<'static, str>,
}

impl ErrorText {
    /// Borrow the text.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.value.as_ref()
    }

    /// True when the text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl From<&'static str> for ErrorText {
    fn from(value: &'static str) -> Self {
        Self {
            value: Cow::Borrowed(value),
        }
    }
}

impl From<String> for ErrorText {
    fn from(value: String) -> Self {
        Self {
            value: Cow::Owned(value),
        }
    }
}

impl From<Cow<'static, str>> for ErrorText {
    fn from(value: Cow<'static, str>) -> Self {
        Self { value }
    }
}

impl Zeroize for ErrorText {
    fn zeroize(&mut self) {
        if let Cow::Owned(ref mut s) = self.value {
            s.zeroize();
        }
    }
}

impl Drop for ErrorText {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Display for ErrorText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for ErrorText {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ErrorText {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Borrowed log entry for a [`BindingError`](crate::BindingError).
///
/// # Example
///
/// ```rust
/// # use nrfjprog_errors::{error_message, BindingErrorCode, NrfjprogError};
/// let err = error_message(
///     BindingErrorCode::CouldNotErase.value(),
///     "erasing all flash",
///     "",
///     NrfjprogError::NvmcError.value(),
/// )
/// .unwrap();
///
/// let mut line = String::new();
/// err.log_entry().write_to(&mut line).unwrap();
/// assert_eq!(
///     line,
///     "[CouldNotErase 10] operation='erasing all flash' lowlevel='NVMC_ERROR' lowlevel_errno=-20"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ErrorLog<'a> {
    pub(crate) errno: i32,
    pub(crate) errcode: &'static str,
    pub(crate) operation: &'a str,
    pub(crate) lowlevel_errno: i32,
    pub(crate) lowlevel_error: &'static str,
    pub(crate) output: &'a str,
}

impl<'a> ErrorLog<'a> {
    /// Write the entry as a single structured line.
    ///
    /// Free-text fields are truncated to 1024 bytes with a visible indicator.
    /// The `output` field is omitted when the error carries no DLL output.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "[{} {}] operation='{}' lowlevel='{}' lowlevel_errno={}",
            self.errcode,
            self.errno,
            truncate_with_indicator(self.operation),
            self.lowlevel_error,
            self.lowlevel_errno
        )?;

        if !self.output.is_empty() {
            write!(f, " output='{}'", truncate_with_indicator(self.output))?;
        }

        Ok(())
    }

    /// Binding error code.
    #[inline]
    pub const fn errno(&self) -> i32 {
        self.errno
    }

    /// Name of the binding error code.
    #[inline]
    pub const fn errcode(&self) -> &'static str {
        self.errcode
    }

    /// Operation that failed.
    #[inline]
    pub const fn operation(&self) -> &'a str {
        self.operation
    }

    /// Vendor DLL return code, 0 when the DLL reported success.
    #[inline]
    pub const fn lowlevel_errno(&self) -> i32 {
        self.lowlevel_errno
    }

    /// Name of the vendor DLL return code.
    #[inline]
    pub const fn lowlevel_error(&self) -> &'static str {
        self.lowlevel_error
    }

    /// Captured DLL output, untruncated.
    #[inline]
    pub const fn output(&self) -> &'a str {
        self.output
    }
}

impl fmt::Display for ErrorLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Truncate a field for log output.
///
/// Returns `Cow::Borrowed` when the input already fits.
fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(s);
    }

    let max_content_len = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());
    let idx = floor_char_boundary(s, max_content_len);

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}

/// Largest char boundary in `s` that is `<= max`.
pub(crate) fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut idx = max;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
