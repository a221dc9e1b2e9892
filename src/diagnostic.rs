//! Module `diagnostic` implements the rendered, immutable error value.
//!
//! # Construction
//!
//! - [`Diagnostic::render`] looks a code up in [`crate::catalog`], normalises
//!   type names in the data bag, and renders the message and hint templates.
//!   Unknown codes degrade to a `type`-class diagnostic whose message is
//!   `data["message"]` (or the code itself).  Rendering never fails.
//! - [`Diagnostic::render_at`] is `render` followed by `with_position`.
//! - [`Diagnostic::simple`] / [`Diagnostic::simple_with_hints`] bypass the
//!   catalog for one-off conditions.
//! - [`Diagnostic::in_module`] wraps a failure from an imported module by
//!   embedding its message in `IMPORT-0001` / `IMPORT-0005`.
//!
//! # Copy-on-transform
//!
//! [`Diagnostic::with_file`] and [`Diagnostic::with_position`] borrow the
//! original and return a new value; nothing mutates a diagnostic in place.
//!
//! # Serialisation
//!
//! - `Display` / [`Diagnostic::to_single_line`]:
//!   `[file: ][line N, column M: ]message` with each hint on its own line,
//!   indented two spaces.
//! - [`Diagnostic::to_pretty`]: `Parser error` / `Runtime error` header,
//!   `in:` / `at:` location lines, the message, then `Use: ` / ` or: ` hints.
//! - [`Diagnostic::to_json`] / [`Diagnostic::to_json_indent`]: keys `class`,
//!   `code`, `message`, `hints`, `line`, `column`, `file`, `data`; `hints`,
//!   `file` and `data` are omitted when empty.

use std::fmt::{self, Write as _};

use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::catalog::{self, ErrorDef};
use crate::class::ErrorClass;
use crate::template::{self, stringify};
use crate::Data;

/// Data keys whose values are type names; they are lower-cased before
/// rendering so messages read `got integer`, never `got INTEGER`.
pub const NORMALIZED_KEYS: [&str; 4] = ["Got", "Type", "LeftType", "RightType"];

/// Lower-case type name for error messages (`"STRING"` → `"string"`).
pub fn type_name(name: &str) -> String {
    name.to_lowercase()
}

/// A single parse-time or run-time failure, fully rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    class: ErrorClass,

    code: String,

    message: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    hints: Vec<String>,

    /// 1-based, 0 when unknown.
    line: usize,

    /// 1-based, 0 when unknown.
    column: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,

    /// Template arguments, kept for programmatic consumers.
    #[serde(skip_serializing_if = "Data::is_empty")]
    data: Data,
}

impl Diagnostic {
    // ───────────────────────────── constructors ──────────────────────────────

    /// Build a diagnostic from the catalog.
    pub fn render(code: &str, data: Data) -> Self {
        let data: Data = normalize(data);

        let Some(def) = catalog::lookup(code) else {
            return Self::uncataloged(code, data);
        };

        debug!("Rendering {} ({})", code, def.class);

        let message: String = template::render_or_raw(def.template, &data);
        let hints: Vec<String> = render_hints(def, &data);

        Self {
            class: def.class,
            code: code.to_string(),
            message,
            hints,
            line: 0,
            column: 0,
            file: None,
            data,
        }
    }

    /// [`Diagnostic::render`] with a source position attached.
    pub fn render_at(code: &str, line: usize, column: usize, data: Data) -> Self {
        let mut diagnostic: Diagnostic = Self::render(code, data);
        diagnostic.line = line;
        diagnostic.column = column;
        diagnostic
    }

    /// Ad hoc diagnostic that does not go through the catalog.
    pub fn simple<M: Into<String>>(class: ErrorClass, message: M) -> Self {
        Self::simple_with_hints(class, message, Vec::<String>::new())
    }

    /// Ad hoc diagnostic with hints.
    pub fn simple_with_hints<M, I, H>(class: ErrorClass, message: M, hints: I) -> Self
    where
        M: Into<String>,
        I: IntoIterator<Item = H>,
        H: Into<String>,
    {
        Self {
            class,
            code: String::new(),
            message: message.into(),
            hints: hints.into_iter().map(Into::into).collect(),
            line: 0,
            column: 0,
            file: None,
            data: Data::new(),
        }
    }

    /// Wrap a failure raised while loading `module_path`.
    ///
    /// The inner message is embedded as text; when the inner diagnostic has a
    /// position it is spelled out in the message (`IMPORT-0005`), otherwise
    /// `IMPORT-0001` is used.  The result has no nested structure.
    pub fn in_module(module_path: &str, inner: &Diagnostic) -> Self {
        let mut data: Data = Data::new();
        data.insert("ModulePath".into(), Value::from(module_path));
        data.insert("NestedError".into(), Value::from(inner.message.as_str()));

        if inner.line > 0 {
            data.insert("Line".into(), Value::from(inner.line));
            data.insert("Column".into(), Value::from(inner.column));
            Self::render("IMPORT-0005", data)
        } else {
            Self::render("IMPORT-0001", data)
        }
    }

    /// Unknown code: class `type`, message from `data["message"]` when it is a
    /// string, else the code itself.
    fn uncataloged(code: &str, data: Data) -> Self {
        warn!("Code {:?} not in catalog, using fallback", code);

        let message: String = match data.get("message") {
            Some(Value::String(m)) => m.clone(),
            _ => code.to_string(),
        };

        Self {
            class: ErrorClass::Type,
            code: code.to_string(),
            message,
            hints: Vec::new(),
            line: 0,
            column: 0,
            file: None,
            data,
        }
    }

    // ───────────────────────────── copy-on-transform ─────────────────────────

    /// Copy with the file path set.  An empty path clears it.
    pub fn with_file<P: Into<String>>(&self, file: P) -> Self {
        let file: String = file.into();

        Self {
            file: (!file.is_empty()).then_some(file),
            ..self.clone()
        }
    }

    /// Copy with the line and column set.
    pub fn with_position(&self, line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            ..self.clone()
        }
    }

    /// Append a hint, consuming the value.
    pub fn with_hint<H: Into<String>>(mut self, hint: H) -> Self {
        self.hints.push(hint.into());
        self
    }

    // ───────────────────────────── accessors ─────────────────────────────────

    pub fn class(&self) -> ErrorClass {
        self.class
    }

    /// Catalog code, empty for ad hoc diagnostics.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    pub fn is_parse_error(&self) -> bool {
        self.class == ErrorClass::Parse
    }

    pub fn is_runtime_error(&self) -> bool {
        !self.is_parse_error()
    }

    /// Delegates to [`ErrorClass::is_catchable`].
    pub fn is_catchable(&self) -> bool {
        self.class.is_catchable()
    }

    // ───────────────────────────── rendering ─────────────────────────────────

    /// Compact one-line form (hints follow on indented lines).
    pub fn to_single_line(&self) -> String {
        self.to_string()
    }

    /// Multi-line form used by the REPL and the CLI.
    pub fn to_pretty(&self) -> String {
        let mut out: String = String::new();

        out.push_str(if self.is_parse_error() {
            "Parser error"
        } else {
            "Runtime error"
        });

        // Writing into a String cannot fail.
        match (&self.file, self.line > 0) {
            (Some(file), has_line) => {
                let _ = write!(out, ":\n  in: {}", file);
                if has_line {
                    let _ = write!(out, "\n  at: line {}, column {}", self.line, self.column);
                }
                out.push_str("\n  ");
            }
            (None, true) => {
                let _ = write!(out, ": line {}, column {}\n  ", self.line, self.column);
            }
            (None, false) => out.push_str(":\n  "),
        }

        out.push_str(&self.message);

        for (i, hint) in self.hints.iter().enumerate() {
            out.push_str(if i == 0 { "\n  Use: " } else { "\n   or: " });
            out.push_str(hint);
        }

        out
    }

    /// Compact JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// JSON indented with two spaces.
    pub fn to_json_indent(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}: ", file)?;
        }

        if self.line > 0 {
            write!(f, "line {}, column {}: ", self.line, self.column)?;
        }

        f.write_str(&self.message)?;

        for hint in &self.hints {
            write!(f, "\n  {}", hint)?;
        }

        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

// ───────────────────────────── helpers ──────────────────────────────────────

/// Lower-case the values stored under [`NORMALIZED_KEYS`].
fn normalize(mut data: Data) -> Data {
    for key in NORMALIZED_KEYS {
        if let Some(value) = data.get_mut(key) {
            let text: String = stringify(value);

            if !text.is_empty() {
                *value = Value::String(type_name(&text));
            }
        }
    }

    data
}

fn render_hints(def: &ErrorDef, data: &Data) -> Vec<String> {
    def.hints
        .iter()
        .map(|hint| template::render_or_raw(hint, data))
        .filter(|hint| !hint.is_empty())
        .collect()
}
