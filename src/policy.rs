//! Trapping policy for the language's `try` expression.
//!
//! `try` converts a *catchable* failure into a value the script can branch on
//! (`{result: null, error: "<message>"}`) and lets every other failure escape
//! unchanged.  The decision is [`ErrorClass::is_catchable`](crate::ErrorClass::is_catchable)
//! on the diagnostic's class and nothing else.

use log::debug;
use serde::Serialize;

use crate::diagnostic::Diagnostic;

/// What a `try` expression evaluates to when it does not propagate.
///
/// Exactly one of `result` / `error` is meaningful: on success `error` is
/// `None`; on a trapped failure `result` is `None` and `error` holds the
/// rendered message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TryOutcome<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T> TryOutcome<T> {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Apply `try` semantics to an evaluation result.
///
/// - `Ok(v)` → `Ok(TryOutcome { result: Some(v), error: None })`
/// - catchable `Err(d)` → `Ok(TryOutcome { result: None, error: Some(message) })`
/// - non-catchable `Err(d)` → `Err(d)`, untouched
pub fn trap<T>(outcome: Result<T, Diagnostic>) -> Result<TryOutcome<T>, Diagnostic> {
    match outcome {
        Ok(value) => Ok(TryOutcome {
            result: Some(value),
            error: None,
        }),

        Err(diagnostic) if diagnostic.is_catchable() => {
            debug!(
                "try trapped {} error {:?}",
                diagnostic.class(),
                diagnostic.code()
            );

            Ok(TryOutcome {
                result: None,
                error: Some(diagnostic.message().to_string()),
            })
        }

        Err(diagnostic) => {
            debug!(
                "try propagating {} error {:?}",
                diagnostic.class(),
                diagnostic.code()
            );

            Err(diagnostic)
        }
    }
}
