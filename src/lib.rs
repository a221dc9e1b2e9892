//! Structured diagnostics for the Parsley language.
//!
//! - [`catalog`]: stable error codes with message/hint templates and a class.
//! - [`template`]: fail-soft `{{.Key}}` renderer.
//! - [`diagnostic`]: the immutable [`Diagnostic`] value and its renderings.
//! - [`suggest`]: "did you mean" fuzzy matching.
//! - [`class`] / [`policy`]: catchability and `try` trapping.
//! - [`repl`]: continuation detection for interactive input.

pub mod catalog;
pub mod class;
pub mod diagnostic;
pub mod error;
pub mod policy;
pub mod repl;
pub mod suggest;
pub mod template;

pub use class::ErrorClass;
pub use diagnostic::Diagnostic;
pub use repl::needs_more_input;
pub use serde_json::Value;
pub use suggest::{closest_match, top_matches};

/// Template arguments attached to a diagnostic.
pub type Data = serde_json::Map<String, serde_json::Value>;

/// Build a [`Data`] bag from `"Key": value` pairs.
///
/// ```
/// use parsley_errors::{data, Diagnostic};
///
/// let d = Diagnostic::render("OP-0004", data! { "Type": "BOOLEAN" });
/// assert_eq!(d.message(), "Cannot negate boolean");
/// ```
#[macro_export]
macro_rules! data {
    () => {
        $crate::Data::new()
    };
    ($($key:literal : $value:expr),+ $(,)?) => {{
        let mut map = $crate::Data::new();
        $(
            map.insert(::std::string::String::from($key), $crate::Value::from($value));
        )+
        map
    }};
}
