//! The two code tables: binding-level codes and `nrfjprogdll_err_t`.
//!
//! # Binding Codes
//!
//! Sequential from 0, assigned by the binding to say which step failed
//! (loading the DLL, opening the device, programming, ...). The display names
//! are the identifiers the scripting side matches on, so their spelling is
//! part of the interface (`CouldNotFindJlinkDLL`, not `...Dll`).
//!
//! # Vendor Codes
//!
//! Returned by every nrfjprog DLL function. Zero is success and failures are
//! negative, grouped by decade:
//!
//! | Range        | Meaning                                  |
//! |--------------|------------------------------------------|
//! | -1 ..= -5    | Invalid use of the API                   |
//! | -10 ..= -14  | Probe / emulator connection              |
//! | -20 ..= -22  | Device memory controller                 |
//! | -30 ..= -33  | QSPI ini file handling                   |
//! | -90 ..= -91  | Readback protection and MPU              |
//! | -100 ..= -103 | JLinkARM DLL                            |
//! | -150 ..= -152 | nrfjprog sub-DLLs                       |
//! | -255         | Not implemented for this device family   |
//!
//! The display names are the vendor's own identifiers, kept verbatim
//! (including the mixed-case QSPI names) so they can be searched in the
//! vendor documentation.

use crate::define_error_codes;

define_error_codes! {
    /// Error codes raised by the binding layer.
    pub enum BindingErrorCode, lookup binding_error_name {
        /// No error.
        Success = (0, "Success"),
        /// The JLinkARM DLL was not found on the search path.
        CouldNotFindJlinkDll = (1, "CouldNotFindJlinkDLL"),
        /// The nrfjprog DLL was not found on the search path.
        CouldNotFindJprogDll = (2, "CouldNotFindJprogDLL"),
        /// The nrfjprog DLL was found but failed to load.
        CouldNotLoadDll = (3, "CouldNotLoadDLL"),
        /// The nrfjprog DLL loaded but refused to open.
        CouldNotOpenDll = (4, "CouldNotOpenDLL"),
        /// Connecting to the probe with the given serial number failed.
        CouldNotOpenDevice = (5, "CouldNotOpenDevice"),
        /// Resetting the target failed.
        CouldNotResetDevice = (6, "CouldNotResetDevice"),
        /// Closing the DLL session failed.
        CouldNotCloseDevice = (7, "CouldNotCloseDevice"),
        /// Connecting to the target through the probe failed.
        CouldNotConnectToDevice = (8, "CouldNotConnectToDevice"),
        /// A DLL function returned an error.
        CouldNotCallFunction = (9, "CouldNotCallFunction"),
        /// Erasing flash failed.
        CouldNotErase = (10, "CouldNotErase"),
        /// Programming flash failed.
        CouldNotProgram = (11, "CouldNotProgram"),
        /// Reading device memory failed.
        CouldNotRead = (12, "CouldNotRead"),
        /// The hex file could not be opened.
        CouldNotOpenHexFile = (13, "CouldNotOpenHexFile"),
        /// Verification found a mismatching magic number.
        WrongMagicNumber = (14, "WrongMagicNumber"),
    }
}

define_error_codes! {
    /// Error codes returned by the nrfjprog DLL (`nrfjprogdll_err_t`).
    pub enum NrfjprogError, lookup nrfjprog_error_name {
        /// No error.
        Success = (0, "SUCCESS"),
        /// The DLL could not allocate memory.
        OutOfMemory = (-1, "OUT_OF_MEMORY"),
        /// The call is not valid in the current DLL state.
        InvalidOperation = (-2, "INVALID_OPERATION"),
        /// A parameter was out of range or malformed.
        InvalidParameter = (-3, "INVALID_PARAMETER"),
        /// The connected device does not support the operation.
        InvalidDeviceForOperation = (-4, "INVALID_DEVICE_FOR_OPERATION"),
        /// The DLL was opened for a different device family.
        WrongFamilyForDevice = (-5, "WRONG_FAMILY_FOR_DEVICE"),
        /// The probe was disconnected.
        EmulatorNotConnected = (-10, "EMULATOR_NOT_CONNECTED"),
        /// The probe could not reach the target.
        CannotConnect = (-11, "CANNOT_CONNECT"),
        /// Target supply voltage is too low.
        LowVoltage = (-12, "LOW_VOLTAGE"),
        /// No probe is attached.
        NoEmulatorConnected = (-13, "NO_EMULATOR_CONNECTED"),
        /// The device family could not be determined.
        FamilyUnknown = (-14, "FAMILY_UNKNOWN"),
        /// The non-volatile memory controller reported an error.
        NvmcError = (-20, "NVMC_ERROR"),
        /// Recovering the device failed.
        RecoverFailed = (-21, "RECOVER_FAILED"),
        /// The addressed RAM block is powered off.
        RamIsOffError = (-22, "RAM_IS_OFF_ERROR"),
        /// The QSPI ini file was not found.
        QspiIniNotFound = (-30, "QspiIniNotFoundError"),
        /// The QSPI ini file could not be opened.
        QspiIniCannotBeOpened = (-31, "QspiIniCannotBeOpenedError"),
        /// The QSPI ini file has a syntax error.
        QspiSyntax = (-32, "QspiSyntaxError"),
        /// The QSPI ini file could not be parsed.
        QspiIniParsing = (-33, "QspiIniParsingError"),
        /// Readback protection blocks the operation.
        NotAvailableBecauseProtection = (-90, "NOT_AVAILABLE_BECAUSE_PROTECTION"),
        /// The MPU configuration blocks the operation.
        NotAvailableBecauseMpuConfig = (-91, "NOT_AVAILABLE_BECAUSE_MPU_CONFIG"),
        /// The JLinkARM DLL was not found.
        JlinkArmDllNotFound = (-100, "JLINKARM_DLL_NOT_FOUND"),
        /// The JLinkARM DLL could not be opened.
        JlinkArmDllCouldNotBeOpened = (-101, "JLINKARM_DLL_COULD_NOT_BE_OPENED"),
        /// The JLinkARM DLL reported an error.
        JlinkArmDllError = (-102, "JLINKARM_DLL_ERROR"),
        /// The installed JLinkARM DLL is older than required.
        JlinkArmDllTooOld = (-103, "JLINKARM_DLL_TOO_OLD"),
        /// A family-specific nrfjprog DLL was not found.
        NrfjprogSubDllNotFound = (-150, "NRFJPROG_SUB_DLL_NOT_FOUND"),
        /// A family-specific nrfjprog DLL could not be opened.
        NrfjprogSubDllCouldNotBeOpened = (-151, "NRFJPROG_SUB_DLL_COULD_NOT_BE_OPENED"),
        /// A family-specific nrfjprog DLL is missing functions.
        NrfjprogSubDllCouldNotLoadFunctions = (-152, "NRFJPROG_SUB_DLL_COULD_NOT_LOAD_FUNCTIONS"),
        /// The operation is not implemented for this device family.
        NotImplementedError = (-255, "NOT_IMPLEMENTED_ERROR"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn binding_codes_are_sequential_from_zero() {
        for (expected, code) in BindingErrorCode::ALL.iter().enumerate() {
            assert_eq!(code.value(), expected as i32, "{code} out of sequence");
        }
        assert_eq!(BindingErrorCode::ALL.len(), 15);
    }

    #[test]
    fn only_zero_is_success() {
        let binding: Vec<_> = BindingErrorCode::ALL.iter().filter(|c| c.is_success()).collect();
        let vendor: Vec<_> = NrfjprogError::ALL.iter().filter(|c| c.is_success()).collect();
        assert_eq!(binding, [&BindingErrorCode::Success]);
        assert_eq!(vendor, [&NrfjprogError::Success]);
    }

    #[test]
    fn vendor_failures_are_negative() {
        for code in NrfjprogError::ALL.iter().filter(|c| !c.is_success()) {
            assert!(code.value() < 0, "{code} must be negative");
        }
    }

    #[test]
    fn names_are_unique_within_each_table() {
        let binding: HashSet<_> = BindingErrorCode::ALL.iter().map(|c| c.name()).collect();
        let vendor: HashSet<_> = NrfjprogError::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(binding.len(), BindingErrorCode::ALL.len());
        assert_eq!(vendor.len(), NrfjprogError::ALL.len());
    }

    #[test]
    fn display_names_match_the_wire_spelling() {
        assert_eq!(binding_error_name(1), "CouldNotFindJlinkDLL");
        assert_eq!(binding_error_name(14), "WrongMagicNumber");
        assert_eq!(nrfjprog_error_name(-32), "QspiSyntaxError");
        assert_eq!(nrfjprog_error_name(-255), "NOT_IMPLEMENTED_ERROR");
    }

    #[test]
    fn undefined_codes_are_unknown() {
        assert_eq!(binding_error_name(15), "Unknown");
        assert_eq!(binding_error_name(-1), "Unknown");
        assert_eq!(nrfjprog_error_name(-6), "Unknown");
        assert_eq!(nrfjprog_error_name(1), "Unknown");
    }
}
