//! Message text: the composite error message and the argument/field describers.
//!
//! # Composite Message Layout
//!
//! ```text
//! Error occurred when <operation>. Errorcode: <name> (<dec>, 0x<hex>)
//! Lowlevel error: <vendor name> (<vendor dec>)        only if vendor code != 0
//! <DLL output>                                        only if output is non-empty
//! ```
//!
//! Every line ends with `\n`. Hex is the 32-bit two's-complement value, so a
//! negative binding code prints as `0xffffffff` rather than `-0x1`.

use crate::codes::CodeSpace;
use std::fmt;

/// Ordinal words for argument positions, indexed from zero.
const ORDINALS: [&str; 7] = [
    "First", "Second", "Third", "Fourth", "Fifth", "Sixth", "Seventh",
];

/// Ordinal word for a zero-based argument index, `"Unknown"` past the seventh.
///
/// ```rust
/// # use nrfjprog_errors::argument_ordinal;
/// assert_eq!(argument_ordinal(0), "First");
/// assert_eq!(argument_ordinal(6), "Seventh");
/// assert_eq!(argument_ordinal(7), "Unknown");
/// ```
#[inline]
pub fn argument_ordinal(index: usize) -> &'static str {
    ORDINALS.get(index).copied().unwrap_or(crate::codes::UNKNOWN_NAME)
}

/// `"<Ordinal> argument must be a <expected>"`.
pub fn type_error_message(index: usize, expected: &str) -> String {
    ArgumentError::new(index, expected).to_string()
}

/// `"Property: <name> Message: <message>"`.
pub fn struct_error_message(name: &str, message: &str) -> String {
    FieldError::new(name, message).to_string()
}

/// A positional argument had the wrong type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentError {
    index: usize,
    expected: String,
}

impl ArgumentError {
    /// Describe argument `index` (zero-based) which should have been `expected`.
    pub fn new(index: usize, expected: impl Into<String>) -> Self {
        Self {
            index,
            expected: expected.into(),
        }
    }

    /// Zero-based argument position.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Description of the expected type.
    #[inline]
    pub fn expected(&self) -> &str {
        &self.expected
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} argument must be a {}",
            argument_ordinal(self.index),
            self.expected
        )
    }
}

impl std::error::Error for ArgumentError {}

/// A property of a structured input was invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    name: String,
    message: String,
}

impl FieldError {
    /// Describe the invalid property `name`.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Property name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What was wrong with it.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Property: {} Message: {}", self.name, self.message)
    }
}

impl std::error::Error for FieldError {}

/// Build the composite message for a failed binding call.
///
/// Callers are expected to have filtered out the success code already.
pub(crate) fn compose_message(
    errno: i32,
    operation: &str,
    output: &str,
    lowlevel_errno: i32,
) -> String {
    let mut message = format!(
        "Error occurred when {}. Errorcode: {} ({}, 0x{:x})\n",
        operation,
        CodeSpace::Binding.name_of(errno),
        errno,
        errno
    );
    message.reserve(64 + output.len());

    if lowlevel_errno != 0 {
        message.push_str(&format!(
            "Lowlevel error: {} ({})\n",
            CodeSpace::Vendor.name_of(lowlevel_errno),
            lowlevel_errno
        ));
    }

    if !output.is_empty() {
        message.push_str(output);
        message.push('\n');
    }

    message
}
