//! Result and error types for Vitrina.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for Vitrina operations
pub type SuiteResult<T> = Result<T, SuiteError>;

/// Errors that can occur in Vitrina
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Workbook file does not exist at the given path
    #[error("Workbook not found at: {path}")]
    WorkbookNotFound {
        /// Path that was probed
        path: PathBuf,
    },

    /// Named sheet absent from the workbook
    #[error("Sheet \"{sheet}\" not found in workbook")]
    SheetNotFound {
        /// Requested sheet name
        sheet: String,
    },

    /// Workbook read/write error from the underlying format library
    #[error("Workbook I/O failed: {message}")]
    Workbook {
        /// Error message
        message: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Expected URL pattern not reached within the timeout
    #[error("Navigation to {pattern} timed out after {ms}ms")]
    NavigationTimeout {
        /// URL pattern that was awaited
        pattern: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Expected element not found or not visible within the timeout
    #[error("Element {locator} not found after {ms}ms")]
    ElementTimeout {
        /// Rendered locator description
        locator: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Driver-level failure (CDP call, JS evaluation, navigation)
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Unrecognized sort mode string in data-driven input
    #[error("Unknown sort mode \"{mode}\" (expected priceLowHigh, priceHighLow or name)")]
    InvalidSortMode {
        /// The rejected mode string
        mode: String,
    },
}

impl From<calamine::XlsxError> for SuiteError {
    fn from(err: calamine::XlsxError) -> Self {
        Self::Workbook {
            message: err.to_string(),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for SuiteError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Workbook {
            message: err.to_string(),
        }
    }
}
