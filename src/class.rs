//! Module `class` defines the closed taxonomy of failure kinds.
//!
//! Every diagnostic carries exactly one [`ErrorClass`].  The class decides two
//! things and nothing else:
//!
//! - the header used by the pretty renderer (`Parser error` vs `Runtime error`),
//! - whether the language's `try` expression may trap the failure
//!   ([`ErrorClass::is_catchable`]).
//!
//! Catchability is a function of the class alone.  It never looks at the code,
//! the template data, or the source position.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParsleyErrorsError;

/// Kind of failure, independent of the specific message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorClass {
    /// Parser / syntax errors
    Parse,

    /// Type mismatches
    Type,

    /// Wrong argument count
    Arity,

    /// Identifier, method, module or property not found
    Undefined,

    /// File operations
    Io,

    /// Database operations
    Database,

    /// HTTP, SSH, SFTP
    Network,

    /// Access denied by the security policy
    Security,

    /// Out of bounds
    Index,

    /// Malformed external data
    Format,

    /// Invalid operator use
    Operator,

    /// Internal or resource state violations
    State,

    /// Module loading
    Import,

    /// Bad runtime value (negative, empty, out of range)
    Value,
}

impl ErrorClass {
    /// Every class, in declaration order.
    pub const ALL: [ErrorClass; 14] = [
        ErrorClass::Parse,
        ErrorClass::Type,
        ErrorClass::Arity,
        ErrorClass::Undefined,
        ErrorClass::Io,
        ErrorClass::Database,
        ErrorClass::Network,
        ErrorClass::Security,
        ErrorClass::Index,
        ErrorClass::Format,
        ErrorClass::Operator,
        ErrorClass::State,
        ErrorClass::Import,
        ErrorClass::Value,
    ];

    /// Can a `try` expression trap errors of this class?
    ///
    /// Catchable classes are failures of the outside world or of caller
    /// supplied data.  Everything else is a defect in the script and must
    /// propagate past `try`.
    pub const fn is_catchable(self) -> bool {
        match self {
            ErrorClass::Io
            | ErrorClass::Network
            | ErrorClass::Database
            | ErrorClass::Format
            | ErrorClass::Value
            | ErrorClass::Security => true,

            ErrorClass::Parse
            | ErrorClass::Type
            | ErrorClass::Arity
            | ErrorClass::Undefined
            | ErrorClass::Index
            | ErrorClass::Operator
            | ErrorClass::State
            | ErrorClass::Import => false,
        }
    }

    /// Lower-case wire name, identical to the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorClass::Parse => "parse",
            ErrorClass::Type => "type",
            ErrorClass::Arity => "arity",
            ErrorClass::Undefined => "undefined",
            ErrorClass::Io => "io",
            ErrorClass::Database => "database",
            ErrorClass::Network => "network",
            ErrorClass::Security => "security",
            ErrorClass::Index => "index",
            ErrorClass::Format => "format",
            ErrorClass::Operator => "operator",
            ErrorClass::State => "state",
            ErrorClass::Import => "import",
            ErrorClass::Value => "value",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorClass {
    type Err = ParsleyErrorsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered: String = s.trim().to_ascii_lowercase();

        ErrorClass::ALL
            .iter()
            .copied()
            .find(|class| class.as_str() == lowered)
            .ok_or_else(|| ParsleyErrorsError::UnknownClass(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catchable_set_is_exactly_the_external_failures() {
        let catchable: Vec<ErrorClass> = ErrorClass::ALL
            .iter()
            .copied()
            .filter(|c| c.is_catchable())
            .collect();

        assert_eq!(
            catchable,
            vec![
                ErrorClass::Io,
                ErrorClass::Database,
                ErrorClass::Network,
                ErrorClass::Security,
                ErrorClass::Format,
                ErrorClass::Value,
            ]
        );
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for class in ErrorClass::ALL {
            assert_eq!(class.as_str().parse::<ErrorClass>().ok(), Some(class));
        }

        assert_eq!("IO".parse::<ErrorClass>().ok(), Some(ErrorClass::Io));
        assert!("bogus".parse::<ErrorClass>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&ErrorClass::Undefined).unwrap();
        assert_eq!(json, "\"undefined\"");
    }
}
