//! Host-side error hierarchy for the diagnostics crate.
//!
//! These are failures of the *tooling* around diagnostics: REPL input and
//! output, and bad command line arguments.  They are never
//! used to report script failures; that is what [`crate::Diagnostic`] is for.
//!
//! The module **does not** print anything itself.

use std::io;
use thiserror::Error;

use log::info;

/// Canonical error type for the crate's fallible host operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParsleyErrorsError {
    /// A class name that is not part of the closed taxonomy.
    #[error("unknown error class '{0}'")]
    UnknownClass(String),

    /// A `KEY=VALUE` template argument that could not be split.
    #[error("invalid template argument '{arg}': {reason}")]
    InvalidDataArg {
        /// The argument as given.
        arg: String,

        /// Human-readable description.
        reason: String,
    },

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ParsleyErrorsError {
    /// Helper constructor for malformed `KEY=VALUE` arguments.
    pub fn invalid_data_arg<A: Into<String>, R: Into<String>>(arg: A, reason: R) -> Self {
        let arg: String = arg.into();
        let reason: String = reason.into();

        info!("Creating InvalidDataArg error: arg={}, reason={}", arg, reason);

        ParsleyErrorsError::InvalidDataArg { arg, reason }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, ParsleyErrorsError>;
