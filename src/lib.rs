//! # nrfjprog errors
//!
//! Error codes and message formatting for bindings to the nrfjprog /
//! J-Link device-programming DLL.
//!
//! ## Two Code Spaces
//!
//! 1. **Binding codes** ([`BindingErrorCode`]) say which step of the binding
//!    failed: loading the DLL, opening the probe, erasing, programming, ...
//! 2. **Vendor codes** ([`NrfjprogError`]) are what the DLL function itself
//!    returned (`nrfjprogdll_err_t`).
//!
//! Zero is success in both. Any other number is rendered through a static
//! lookup; numbers outside either table are shown as `Unknown`, never rejected.
//!
//! ## Quick Start
//!
//! ```rust
//! use nrfjprog_errors::{check, BindingErrorCode, NrfjprogError};
//!
//! let result = check(
//!     BindingErrorCode::CouldNotOpenDevice.value(),
//!     "opening device 682735143",
//!     "",
//!     NrfjprogError::EmulatorNotConnected.value(),
//! );
//!
//! let err = result.unwrap_err();
//! assert_eq!(err.errcode(), "CouldNotOpenDevice");
//! assert_eq!(err.lowlevel_error(), "EMULATOR_NOT_CONNECTED");
//! assert_eq!(
//!     err.message(),
//!     "Error occurred when opening device 682735143. Errorcode: CouldNotOpenDevice (5, 0x5)\n\
//!      Lowlevel error: EMULATOR_NOT_CONNECTED (-10)\n"
//! );
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize` for [`BindingError`] using the field names the
//!   scripting side reads (`errno`, `errcode`, `erroperation`, `errmsg`,
//!   `lowlevelErrorNo`, `lowlevelError`, `output`)

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::borrow::Cow;
use std::fmt;
use std::result;

pub mod capture;
pub mod codes;
pub mod convenience;
pub mod definitions;
pub mod logging;
pub mod messages;

pub use capture::{CaptureConfig, LogCapture};
pub use codes::{CodeSpace, UNKNOWN_NAME};
pub use definitions::*;
pub use logging::{ErrorLog, ErrorText};
pub use messages::{
    ArgumentError, FieldError, argument_ordinal, struct_error_message, type_error_message,
};

/// Type alias for Results using our error type.
pub type Result<T> = result::Result<T, BindingError>;

/// Composite error for a failed binding call.
///
/// Carries both code spaces (number and display name), the operation that
/// was attempted, the composed message, and any DLL log output. Everything
/// is fixed at construction; there are no setters.
///
/// `Display` writes the composed message without its trailing newline.
#[must_use = "errors should be handled or logged"]
#[derive(Clone)]
pub struct BindingError {
    errno: i32,
    errcode: &'static str,
    operation: ErrorText,
    message: ErrorText,
    lowlevel_errno: i32,
    lowlevel_error: &'static str,
    output: ErrorText,
}

impl BindingError {
    /// Build the error for a raw binding code.
    ///
    /// Returns `None` when `errno` is the success code.
    pub fn from_codes(
        errno: i32,
        operation: impl Into<Cow<'static, str>>,
        output: impl Into<Cow<'static, str>>,
        lowlevel_errno: i32,
    ) -> Option<Self> {
        if errno == BindingErrorCode::Success.value() {
            return None;
        }

        let operation: Cow<'static, str> = operation.into();
        let output: Cow<'static, str> = output.into();
        let (operation, output) = (ErrorText::from(operation), ErrorText::from(output));
        let message = messages::compose_message(
            errno,
            operation.as_str(),
            output.as_str(),
            lowlevel_errno,
        );

        Some(Self {
            errno,
            errcode: CodeSpace::Binding.name_of(errno),
            operation,
            message: ErrorText::from(message),
            lowlevel_errno,
            lowlevel_error: CodeSpace::Vendor.name_of(lowlevel_errno),
            output,
        })
    }

    /// Typed form of [`from_codes`](Self::from_codes).
    pub fn new(
        code: BindingErrorCode,
        operation: impl Into<Cow<'static, str>>,
        output: impl Into<Cow<'static, str>>,
        lowlevel: NrfjprogError,
    ) -> Option<Self> {
        Self::from_codes(code.value(), operation, output, lowlevel.value())
    }

    /// Binding error number (`errno`).
    #[inline]
    pub const fn errno(&self) -> i32 {
        self.errno
    }

    /// Binding error name (`errcode`), `"Unknown"` for undefined numbers.
    #[inline]
    pub const fn errcode(&self) -> &'static str {
        self.errcode
    }

    /// Binding code, if `errno` is defined.
    #[inline]
    pub const fn code(&self) -> Option<BindingErrorCode> {
        BindingErrorCode::from_raw(self.errno)
    }

    /// Description of the attempted operation (`erroperation`).
    #[inline]
    pub fn operation(&self) -> &str {
        self.operation.as_str()
    }

    /// Full composed message (`errmsg`), including trailing newline.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Vendor error number (`lowlevelErrorNo`), zero if the DLL succeeded.
    #[inline]
    pub const fn lowlevel_errno(&self) -> i32 {
        self.lowlevel_errno
    }

    /// Vendor error name (`lowlevelError`).
    #[inline]
    pub const fn lowlevel_error(&self) -> &'static str {
        self.lowlevel_error
    }

    /// Vendor code, if `lowlevel_errno` is defined.
    #[inline]
    pub const fn lowlevel(&self) -> Option<NrfjprogError> {
        NrfjprogError::from_raw(self.lowlevel_errno)
    }

    /// DLL log output captured for this call (`output`), possibly empty.
    #[inline]
    pub fn output(&self) -> &str {
        self.output.as_str()
    }

    /// Structured log entry borrowing from this error.
    ///
    /// ```rust
    /// # use nrfjprog_errors::{BindingError, BindingErrorCode, NrfjprogError};
    /// let err = BindingError::new(
    ///     BindingErrorCode::CouldNotRead,
    ///     "reading 0x20000000",
    ///     "",
    ///     NrfjprogError::RamIsOffError,
    /// )
    /// .unwrap();
    /// let log = err.log_entry();
    /// assert_eq!(log.errcode(), "CouldNotRead");
    /// assert_eq!(log.lowlevel_error(), "RAM_IS_OFF_ERROR");
    /// ```
    #[inline]
    pub fn log_entry(&self) -> ErrorLog<'_> {
        ErrorLog {
            errno: self.errno,
            errcode: self.errcode,
            operation: self.operation.as_str(),
            lowlevel_errno: self.lowlevel_errno,
            lowlevel_error: self.lowlevel_error,
            output: self.output.as_str(),
        }
    }

    /// Callback form of [`log_entry`](Self::log_entry).
    #[inline]
    pub fn with_log_entry<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ErrorLog<'_>) -> R,
    {
        let log = self.log_entry();
        f(&log)
    }
}

/// Format a binding result.
///
/// Returns `None` for the success code, otherwise the composite error.
/// `output` is the DLL log text; pass `""` when there is none.
pub fn error_message(
    errno: i32,
    operation: impl Into<Cow<'static, str>>,
    output: impl Into<Cow<'static, str>>,
    lowlevel_errno: i32,
) -> Option<BindingError> {
    BindingError::from_codes(errno, operation, output, lowlevel_errno)
}

/// [`error_message`] as a `Result`: `Ok(())` for success, `Err` otherwise.
pub fn check(
    errno: i32,
    operation: impl Into<Cow<'static, str>>,
    output: impl Into<Cow<'static, str>>,
    lowlevel_errno: i32,
) -> Result<()> {
    match error_message(errno, operation, output, lowlevel_errno) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Turn a vendor DLL return value into a binding result.
///
/// Vendor success yields `Ok(())`. Otherwise the error carries `on_failure`
/// as its binding code, the vendor code, and the drained contents of
/// `capture`. Passing [`BindingErrorCode::Success`] as `on_failure` would
/// hide the failure, so it is reported as `CouldNotCallFunction` instead.
pub fn check_vendor(
    vendor: impl Into<i32>,
    on_failure: BindingErrorCode,
    operation: impl Into<Cow<'static, str>>,
    capture: Option<&LogCapture>,
) -> Result<()> {
    let vendor = vendor.into();
    if vendor == NrfjprogError::Success.value() {
        return Ok(());
    }

    let code = if on_failure.is_success() {
        BindingErrorCode::CouldNotCallFunction
    } else {
        on_failure
    };
    let output = capture.map(LogCapture::take_output).unwrap_or_default();

    check(code.value(), operation, output, vendor)
}

impl fmt::Debug for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingError")
            .field("errno", &self.errno)
            .field("errcode", &self.errcode)
            .field("operation", &self.operation.as_str())
            .field("lowlevel_errno", &self.lowlevel_errno)
            .field("lowlevel_error", &self.lowlevel_error)
            .field("output", &self.output.as_str())
            .finish()
    }
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message().trim_end_matches('\n'))
    }
}

impl std::error::Error for BindingError {}

#[cfg(feature = "serde")]
impl serde::Serialize for BindingError {
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("BindingError", 7)?;
        s.serialize_field("errno", &self.errno)?;
        s.serialize_field("errcode", self.errcode)?;
        s.serialize_field("erroperation", self.operation())?;
        s.serialize_field("errmsg", self.message())?;
        s.serialize_field("lowlevelErrorNo", &self.lowlevel_errno)?;
        s.serialize_field("lowlevelError", self.lowlevel_error)?;
        s.serialize_field("output", self.output())?;
        s.end()
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn success_yields_nothing() {
        assert!(error_message(0, "opening device", "log text", -3).is_none());
        assert!(check(0, "anything", "", 0).is_ok());
        assert!(BindingError::new(BindingErrorCode::Success, "x", "", NrfjprogError::Success).is_none());
    }

    #[test]
    fn fields_are_populated() {
        let err = error_message(12, "reading memory", "RAM block 3 off", -22).unwrap();
        assert_eq!(err.errno(), 12);
        assert_eq!(err.errcode(), "CouldNotRead");
        assert_eq!(err.code(), Some(BindingErrorCode::CouldNotRead));
        assert_eq!(err.operation(), "reading memory");
        assert_eq!(err.lowlevel_errno(), -22);
        assert_eq!(err.lowlevel_error(), "RAM_IS_OFF_ERROR");
        assert_eq!(err.lowlevel(), Some(NrfjprogError::RamIsOffError));
        assert_eq!(err.output(), "RAM block 3 off");
        assert!(err.message().ends_with("RAM block 3 off\n"));
    }

    #[test]
    fn vendor_success_still_names_it() {
        let err = error_message(13, "opening hex file", "", 0).unwrap();
        assert_eq!(err.lowlevel_error(), "SUCCESS");
        assert!(!err.message().contains("Lowlevel"));
    }

    #[test]
    fn unknown_codes_degrade() {
        let err = error_message(99, "probing", "", -99).unwrap();
        assert_eq!(err.errcode(), "Unknown");
        assert_eq!(err.code(), None);
        assert_eq!(err.lowlevel_error(), "Unknown");
        assert_eq!(err.lowlevel(), None);
        assert!(err.message().contains("Errorcode: Unknown (99, 0x63)"));
        assert!(err.message().contains("Lowlevel error: Unknown (-99)"));
    }

    #[test]
    fn display_drops_trailing_newline() {
        let err = error_message(6, "resetting", "", 0).unwrap();
        assert_eq!(
            err.to_string(),
            "Error occurred when resetting. Errorcode: CouldNotResetDevice (6, 0x6)"
        );
    }

    #[test]
    fn check_vendor_success_is_ok() {
        let capture = LogCapture::default();
        capture.record("kept");
        assert!(check_vendor(0, BindingErrorCode::CouldNotProgram, "programming", Some(&capture)).is_ok());
        assert_eq!(capture.output(), "kept");
    }

    #[test]
    fn check_vendor_failure_drains_capture() {
        let capture = LogCapture::default();
        capture.record("Flash write failed at 0x1000");
        let err = check_vendor(
            NrfjprogError::NvmcError,
            BindingErrorCode::CouldNotProgram,
            "programming",
            Some(&capture),
        )
        .unwrap_err();

        assert_eq!(err.errno(), 11);
        assert_eq!(err.output(), "Flash write failed at 0x1000");
        assert!(capture.is_empty());
    }

    #[test]
    fn check_vendor_never_reports_success_for_a_failure() {
        let err = check_vendor(-3, BindingErrorCode::Success, "calling", None).unwrap_err();
        assert_eq!(err.code(), Some(BindingErrorCode::CouldNotCallFunction));
        assert_eq!(err.lowlevel(), Some(NrfjprogError::InvalidParameter));
    }

    #[test]
    fn log_entry_callback() {
        let err = error_message(8, "connecting", "", -11).unwrap();
        let line = err.with_log_entry(|log| log.to_string());
        assert!(line.starts_with("[CouldNotConnectToDevice 8]"));
        assert!(line.contains("lowlevel='CANNOT_CONNECT'"));
    }

    #[test]
    fn clone_is_independent() {
        let err = error_message(10, String::from("erasing"), String::from("busy"), 0).unwrap();
        let copy = err.clone();
        drop(err);
        assert_eq!(copy.operation(), "erasing");
        assert_eq!(copy.output(), "busy");
    }
}
