//! Code-table machinery shared by both error code spaces.
//!
//! The binding and the vendor DLL each define a closed set of integer codes.
//! Both tables are declared with [`define_error_codes!`], which expands to a
//! `#[repr(i32)]` enum plus a lookup function. Every lookup is a `match`
//! compiled into the binary, so there is no table to initialize and nothing
//! to mutate at runtime.
//!
//! # Unknown Codes
//!
//! A code outside the declared set is not an error. Lookups degrade to
//! [`UNKNOWN_NAME`] so that a newer DLL returning a code this crate has never
//! seen still produces a readable message.
//!
//! # Example
//!
//! ```rust
//! use nrfjprog_errors::define_error_codes;
//!
//! define_error_codes! {
//!     /// Status codes of a flashing helper.
//!     pub enum FlashStatus, lookup flash_status_name {
//!         /// Completed.
//!         Done = (0, "Done"),
//!         /// Sector could not be erased.
//!         EraseFailed = (-7, "ERASE_FAILED"),
//!     }
//! }
//!
//! assert_eq!(FlashStatus::from_raw(-7), Some(FlashStatus::EraseFailed));
//! assert_eq!(flash_status_name(-7), "ERASE_FAILED");
//! assert_eq!(flash_status_name(42), "Unknown");
//! ```

use std::fmt;

/// Display name used for any code outside its enumeration.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Identifies which of the two code spaces a number belongs to.
///
/// The same integer means different things in each space (`5` is
/// `CouldNotOpenDevice` for the binding and undefined for the DLL), so log
/// output always names the space next to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeSpace {
    /// Codes produced by the binding layer itself.
    Binding,
    /// Codes returned by the nrfjprog DLL (`nrfjprogdll_err_t`).
    Vendor,
}

impl CodeSpace {
    /// Short label for log lines.
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Binding => "binding",
            Self::Vendor => "lowlevel",
        }
    }

    /// Resolve a raw code from this space to its display name.
    #[inline]
    pub const fn name_of(&self, raw: i32) -> &'static str {
        match self {
            Self::Binding => crate::definitions::binding_error_name(raw),
            Self::Vendor => crate::definitions::nrfjprog_error_name(raw),
        }
    }
}

impl fmt::Display for CodeSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Declare a closed error-code enumeration and its name lookup.
///
/// Each entry is `Variant = (value, "DisplayName")`. Values must be integer
/// literals (negative values are fine) and zero must denote success.
///
/// The expansion provides:
/// - `from_raw(i32) -> Option<Self>`
/// - `value(self) -> i32`
/// - `name(self) -> &'static str`
/// - `is_success(self) -> bool`
/// - `ALL`: every variant in declaration order
/// - `Display` (writes the display name) and `From<Self> for i32`
/// - the named lookup function, `fn(i32) -> &'static str`, which returns
///   [`UNKNOWN_NAME`] for codes outside the enumeration
#[macro_export]
macro_rules! define_error_codes {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident, lookup $lookup:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = ($value:literal, $label:literal)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )+
        }

        impl $name {
            /// Every code in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Map a raw integer to a known code.
            #[inline]
            pub const fn from_raw(raw: i32) -> Option<Self> {
                match raw {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Raw integer value of this code.
            #[inline]
            pub const fn value(self) -> i32 {
                self as i32
            }

            /// Display name of this code.
            #[inline]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Whether this is the success code (zero).
            #[inline]
            pub const fn is_success(self) -> bool {
                self.value() == 0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl ::core::convert::From<$name> for i32 {
            #[inline]
            fn from(code: $name) -> i32 {
                code.value()
            }
        }

        /// Display name for a raw code, or `"Unknown"` if it is not defined.
        #[inline]
        $vis const fn $lookup(raw: i32) -> &'static str {
            match $name::from_raw(raw) {
                Some(code) => code.name(),
                None => $crate::codes::UNKNOWN_NAME,
            }
        }
    };
}
