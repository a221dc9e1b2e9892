//! Module `catalog` holds the static table of every stable error code.
//!
//! A code such as `TYPE-0001` is a class prefix, a dash, and a four digit
//! sequence number.  Each entry carries the class, a message template, and zero
//! or more hint templates.  Templates use `{{.Key}}` placeholders and the
//! `{{if .Key}}…{{else}}…{{end}}` conditional understood by
//! [`crate::template`].
//!
//! The table is a compile-time perfect hash map, so it is immutable data that
//! any number of threads may read without synchronisation.  There is no
//! mutation API.
//!
//! Invariant: every prefix maps to exactly one class.  Entries whose class
//! differs from their family live under the prefix of their class (for example
//! a database *state* failure is a `STATE-` code, not a `DB-` code).

use phf::phf_map;

use crate::class::ErrorClass;

/// Definition of a single catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorDef {
    /// Class shared by every code with the same prefix.
    pub class: ErrorClass,

    /// Message template with `{{.Key}}` placeholders.
    pub template: &'static str,

    /// Hint templates, rendered in order.  Empty renderings are dropped.
    pub hints: &'static [&'static str],
}

impl ErrorDef {
    const fn new(class: ErrorClass, template: &'static str) -> Self {
        Self {
            class,
            template,
            hints: &[],
        }
    }

    const fn with_hints(
        class: ErrorClass,
        template: &'static str,
        hints: &'static [&'static str],
    ) -> Self {
        Self {
            class,
            template,
            hints,
        }
    }
}

use ErrorClass::{
    Arity, Database, Format, Import, Index, Io, Network, Operator, Parse, Security, State, Type,
    Undefined, Value,
};

// ─────────────────────────────────────────────────────────────────────────────
// Static catalog (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static CATALOG: phf::Map<&'static str, ErrorDef> = phf_map! {
    // ── PARSE ───────────────────────────────────────────────────────────────
    "PARSE-0001" => ErrorDef::new(Parse, "Expected {{.Expected}}, got '{{.Got}}'"),
    "PARSE-0002" => ErrorDef::new(Parse, "Unexpected '{{.Token}}'"),
    "PARSE-0003" => ErrorDef::with_hints(
        Parse,
        "`for ({{.Var}} in {{.Array}})` is ambiguous without { ... }",
        &["for {{.Var}} in {{.Array}} { ... }", "for ({{.Array}}) fn({{.Var}}) { ... }"],
    ),
    "PARSE-0004" => ErrorDef::with_hints(
        Parse,
        "`for {{.Array}} {{.Expr}}` is ambiguous without ()",
        &["for ({{.Array}}) fn", "for x in {{.Array}} { ... }"],
    ),
    "PARSE-0005" => ErrorDef::new(Parse, "Invalid regex literal: {{.Literal}}"),
    "PARSE-0006" => ErrorDef::new(Parse, "Unterminated string"),
    "PARSE-0007" => ErrorDef::new(Parse, "Invalid number literal: {{.Literal}}"),
    "PARSE-0008" => ErrorDef::with_hints(
        Parse,
        "Singleton tag must be self-closing",
        &["<{{.Tag}}/>"],
    ),
    "PARSE-0009" => ErrorDef::new(Parse, "Unclosed { in {{.Context}}"),
    "PARSE-0010" => ErrorDef::new(Parse, "Empty interpolation {} in {{.Context}}"),
    "PARSE-0011" => ErrorDef::new(Parse, "Error parsing {{.Context}} expression: {{.Cause}}"),

    // ── TYPE ────────────────────────────────────────────────────────────────
    "TYPE-0001" => ErrorDef::new(Type, "{{.Function}} expected {{.Expected}}, got {{.Got}}"),
    "TYPE-0002" => ErrorDef::new(Type, "Argument to `{{.Function}}` not supported, got {{.Got}}"),
    "TYPE-0003" => ErrorDef::new(Type, "Cannot call {{.Got}} as a function"),
    "TYPE-0004" => ErrorDef::with_hints(
        Type,
        "`for ({{.Array}}) {{.Got}}` is ambiguous",
        &["for _ in {{.Array}} { ... }", "for ({{.Array}}) fn(x) { ... }"],
    ),
    "TYPE-0005" => ErrorDef::new(Type, "First argument to `{{.Function}}` must be {{.Expected}}, got {{.Got}}"),
    "TYPE-0006" => ErrorDef::new(Type, "Second argument to `{{.Function}}` must be {{.Expected}}, got {{.Got}}"),
    "TYPE-0007" => ErrorDef::with_hints(
        Type,
        "Cannot iterate over {{.Got}}",
        &["for works with arrays, strings, and ranges"],
    ),
    "TYPE-0008" => ErrorDef::new(Type, "Cannot index {{.Got}} with {{.IndexType}}"),
    "TYPE-0009" => ErrorDef::new(Type, "Comparison function must return boolean, got {{.Got}}"),
    "TYPE-0010" => ErrorDef::new(Type, "{{.Function}} callback must be a function, got {{.Got}}"),
    "TYPE-0011" => ErrorDef::new(Type, "Third argument to `{{.Function}}` must be {{.Expected}}, got {{.Got}}"),
    "TYPE-0012" => ErrorDef::new(Type, "Argument to `{{.Function}}` must be {{.Expected}}, got {{.Got}}"),
    "TYPE-0013" => ErrorDef::with_hints(
        Type,
        "Index operator not supported: {{.Left}}[{{.Right}}]",
        &["Arrays and strings can be indexed with integers", "Dictionaries can be indexed with strings"],
    ),
    "TYPE-0014" => ErrorDef::with_hints(
        Type,
        "Slice operator not supported: {{.Type}}",
        &["Slicing works with arrays and strings"],
    ),
    "TYPE-0015" => ErrorDef::new(Type, "Cannot convert '{{.Value}}' to integer"),
    "TYPE-0016" => ErrorDef::new(Type, "Cannot convert '{{.Value}}' to float"),
    "TYPE-0017" => ErrorDef::new(Type, "Cannot convert '{{.Value}}' to number"),
    "TYPE-0018" => ErrorDef::new(Type, "Slice {{.Position}} index must be an integer, got {{.Got}}"),
    "TYPE-0019" => ErrorDef::new(Type, "{{.Function}} element at index {{.Index}} must be {{.Expected}}, got {{.Got}}"),
    "TYPE-0020" => ErrorDef::new(Type, "{{.Context}} must be {{.Expected}}, got {{.Got}}"),
    "TYPE-0021" => ErrorDef::new(Type, "'{{.Name}}' is not a function"),
    "TYPE-0022" => ErrorDef::new(Type, "Dot notation can only be used on dictionaries, got {{.Got}}"),
    "TYPE-0023" => ErrorDef::new(Type, "Key '{{.Key}}' already exists in dictionary"),
    "TYPE-0024" => ErrorDef::new(Type, "{{.Operator}} requires a database connection, got {{.Got}}"),
    "TYPE-0025" => ErrorDef::new(Type, "{{.Format}} format requires {{.Expected}}, got {{.Got}}"),
    "TYPE-0026" => ErrorDef::new(Type, "{{.Format}} format requires {{.Expected}} at index {{.Index}}, got {{.Got}}"),

    // ── ARITY ───────────────────────────────────────────────────────────────
    "ARITY-0001" => ErrorDef::new(Arity, "Wrong number of arguments to `{{.Function}}`. got={{.Got}}, want={{.Want}}"),
    "ARITY-0002" => ErrorDef::new(Arity, "`{{.Function}}` expects {{.Want}} argument(s), got {{.Got}}"),
    "ARITY-0003" => ErrorDef::new(Arity, "Comparison function must take exactly 2 parameters, got {{.Got}}"),
    "ARITY-0004" => ErrorDef::new(Arity, "`{{.Function}}` expects {{.Min}}-{{.Max}} arguments, got {{.Got}}"),
    "ARITY-0005" => ErrorDef::new(Arity, "`{{.Function}}` expects at least {{.Min}} argument(s), got {{.Got}}"),
    "ARITY-0006" => ErrorDef::new(Arity, "`{{.Function}}` expects exactly {{.Choice1}} or {{.Choice2}} argument(s), got {{.Got}}"),
    "ARITY-0007" => ErrorDef::new(Arity, "Function passed to for must take 1 or 2 parameters, got {{.Got}}"),
    "ARITY-0008" => ErrorDef::new(Arity, "For loop over dictionary requires exactly 2 parameters (key, value), got {{.Got}}"),

    // ── UNDEF ───────────────────────────────────────────────────────────────
    // "Did you mean" hints for 0001/0002 are appended by `crate::suggest`.
    "UNDEF-0001" => ErrorDef::new(Undefined, "Identifier not found: {{.Name}}"),
    "UNDEF-0002" => ErrorDef::new(Undefined, "Unknown method '{{.Method}}' for {{.Type}}"),
    "UNDEF-0003" => ErrorDef::new(Undefined, "Undefined component: {{.Name}}"),
    "UNDEF-0004" => ErrorDef::new(Undefined, "Unknown property '{{.Property}}' on {{.Type}}"),
    "UNDEF-0005" => ErrorDef::new(Undefined, "Unknown standard library module: @std/{{.Module}}"),
    "UNDEF-0006" => ErrorDef::with_hints(
        Undefined,
        "Module does not export '{{.Name}}'",
        &["{{if .Module}}Check the exports of {{.Module}}{{end}}"],
    ),
    "UNDEF-0007" => ErrorDef::new(Undefined, "Unknown basil module: @basil/{{.Module}}"),
    "UNDEF-0010" => ErrorDef::with_hints(
        Undefined,
        "@params is not available at module scope",
        &["{{if .Handler}}Read @params inside {{.Handler}} instead{{else}}Read @params inside a handler function{{end}}"],
    ),

    // ── IO ──────────────────────────────────────────────────────────────────
    "IO-0001" => ErrorDef::new(Io, "Failed to {{.Operation}} '{{.Path}}': {{.Cause}}"),
    "IO-0002" => ErrorDef::new(Io, "Module not found: {{.Path}}"),
    "IO-0003" => ErrorDef::new(Io, "Failed to read file '{{.Path}}': {{.Cause}}"),
    "IO-0004" => ErrorDef::new(Io, "Failed to write file '{{.Path}}': {{.Cause}}"),
    "IO-0005" => ErrorDef::new(Io, "Failed to delete '{{.Path}}': {{.Cause}}"),
    "IO-0006" => ErrorDef::new(Io, "Failed to create directory '{{.Path}}': {{.Cause}}"),
    "IO-0007" => ErrorDef::new(Io, "Failed to resolve path '{{.Path}}': {{.Cause}}"),
    "IO-0008" => ErrorDef::new(Io, "SFTP {{.Operation}} failed: {{.Cause}}"),
    "IO-0009" => ErrorDef::new(Io, "Failed to create directory '{{.Path}}': {{.Cause}}"),
    "IO-0010" => ErrorDef::new(Io, "Failed to remove directory '{{.Path}}': {{.Cause}}"),
    "IO-0011" => ErrorDef::new(Io, "Cannot write to stdin"),
    "IO-0012" => ErrorDef::new(Io, "Failed to read response: {{.Cause}}"),
    "IO-0013" => ErrorDef::new(Io, "Failed to read from stdin: {{.Cause}}"),
    "IO-0014" => ErrorDef::new(Io, "Cannot read from {{.Stream}}"),
    "IO-0015" => ErrorDef::new(Io, "Failed to encode data: {{.Cause}}"),

    // ── DB ──────────────────────────────────────────────────────────────────
    "DB-0001" => ErrorDef::new(Database, "{{.Driver}} {{.Operation}} failed: {{.Cause}}"),
    "DB-0002" => ErrorDef::new(Database, "Query failed: {{.Cause}}"),
    "DB-0003" => ErrorDef::new(Database, "Failed to open {{.Driver}} database: {{.Cause}}"),
    "DB-0004" => ErrorDef::new(Database, "Failed to scan row: {{.Cause}}"),
    "DB-0005" => ErrorDef::new(Database, "Failed to ping database: {{.Cause}}"),
    "DB-0006" => ErrorDef::new(Database, "No transaction in progress"),
    "DB-0007" => ErrorDef::new(Database, "Connection is already in a transaction"),
    "DB-0008" => ErrorDef::new(Database, "Failed to get columns: {{.Cause}}"),
    "DB-0010" => ErrorDef::new(Database, "Failed to close database connection: {{.Cause}}"),
    "DB-0011" => ErrorDef::new(Database, "Execute failed: {{.Cause}}"),

    // ── NET ─────────────────────────────────────────────────────────────────
    "NET-0001" => ErrorDef::new(Network, "{{.Operation}} to {{.URL}} failed: {{.Cause}}"),
    "NET-0002" => ErrorDef::new(Network, "HTTP request failed: {{.Cause}}"),
    "NET-0003" => ErrorDef::new(Network, "Failed to connect to SSH server: {{.Cause}}"),
    "NET-0004" => ErrorDef::new(Network, "HTTP {{.Method}} {{.URL}} returned {{.StatusCode}}"),
    "NET-0005" => ErrorDef::new(Network, "SFTP: {{.Cause}}"),
    "NET-0006" => ErrorDef::new(Network, "Failed to read SSH key file: {{.Cause}}"),
    "NET-0007" => ErrorDef::new(Network, "Failed to parse SSH key: {{.Cause}}"),
    "NET-0008" => ErrorDef::new(Network, "Failed to load known_hosts: {{.Cause}}"),
    "NET-0009" => ErrorDef::new(Network, "Failed to create SFTP client: {{.Cause}}"),
    "NET-0010" => ErrorDef::new(Network, "Fetch failed: {{.Cause}}"),
    "NET-0011" => ErrorDef::new(Network, "Failed to create request: {{.Cause}}"),
    "NET-0012" => ErrorDef::new(Network, "HTTP error: {{.Error}}"),

    // ── SEC ─────────────────────────────────────────────────────────────────
    "SEC-0001" => ErrorDef::with_hints(
        Security,
        "Security: {{.Operation}} access denied",
        &["{{if .Flag}}use {{.Flag}} to allow this operation{{end}}"],
    ),
    "SEC-0002" => ErrorDef::with_hints(
        Security,
        "Security: read access denied",
        &["use --allow-read or -r to allow file reading"],
    ),
    "SEC-0003" => ErrorDef::with_hints(
        Security,
        "Security: write access denied",
        &["writes are allowed by default; check if --no-write or --restrict-write was used"],
    ),
    "SEC-0004" => ErrorDef::with_hints(
        Security,
        "Security: execute access denied",
        &["use --allow-execute or -x to allow execution"],
    ),
    "SEC-0005" => ErrorDef::with_hints(
        Security,
        "Security: network access denied",
        &["use --allow-net or -n to allow network access"],
    ),
    "SEC-0006" => ErrorDef::new(Security, "SFTP requires authentication: provide keyFile or password in options"),

    // ── INDEX ───────────────────────────────────────────────────────────────
    "INDEX-0001" => ErrorDef::new(Index, "Index {{.Index}} out of range (length {{.Length}})"),
    "INDEX-0002" => ErrorDef::new(Index, "Cannot {{.Operation}} from empty {{.Type}}"),
    "INDEX-0003" => ErrorDef::new(Index, "Slice start index {{.Start}} is greater than end index {{.End}}"),
    "INDEX-0004" => ErrorDef::new(Index, "Negative index not allowed: {{.Index}}"),
    "INDEX-0005" => ErrorDef::new(Index, "Key '{{.Key}}' not found in dictionary"),

    // ── FMT ─────────────────────────────────────────────────────────────────
    "FMT-0001" => ErrorDef::new(Format, "Invalid {{.Format}}: {{.Cause}}"),
    "FMT-0002" => ErrorDef::new(Format, "Invalid regex pattern: {{.Cause}}"),
    "FMT-0003" => ErrorDef::new(Format, "Invalid URL: {{.Cause}}"),
    "FMT-0004" => ErrorDef::new(Format, "Invalid datetime: {{.Cause}}"),
    "FMT-0005" => ErrorDef::new(Format, "Invalid JSON: {{.Cause}}"),
    "FMT-0006" => ErrorDef::new(Format, "Invalid YAML: {{.Cause}}"),
    "FMT-0007" => ErrorDef::new(Format, "Invalid CSV: {{.Cause}}"),
    "FMT-0008" => ErrorDef::new(Format, "Invalid locale: {{.Locale}}"),
    "FMT-0009" => ErrorDef::new(Format, "Invalid duration: {{.Cause}}"),
    "FMT-0010" => ErrorDef::new(Format, "Failed to convert markdown: {{.Cause}}"),
    "FMT-0011" => ErrorDef::new(Format, "Invalid currency code: {{.Code}}"),
    "FMT-0012" => ErrorDef::new(Format, "Invalid style {{.Style}} for {{.Context}}, use {{.ValidOptions}}"),
    "FMT-0013" => ErrorDef::new(Format, "Unsupported file format for {{.Operation}}: {{.Format}}"),
    "FMT-0014" => ErrorDef::new(Format, "Unknown stdio stream: {{.Name}}"),
    "FMT-0015" => ErrorDef::new(Format, "Invalid file pattern '{{.Pattern}}': {{.Cause}}"),
    "FMT-0016" => ErrorDef::new(Format, "Unknown format: {{.Format}}"),
    "FMT-0017" => ErrorDef::new(Format, "Failed to encode request body: {{.Cause}}"),

    // ── VALUE ───────────────────────────────────────────────────────────────
    "VALUE-0001" => ErrorDef::new(Value, "`{{.Function}}` requires a non-empty array"),
    "VALUE-0002" => ErrorDef::new(Value, "`{{.Function}}` requires a non-negative number, got {{.Got}}"),
    "VALUE-0003" => ErrorDef::new(Value, "`{{.Function}}` domain error: {{.Reason}}"),
    "VALUE-0004" => ErrorDef::new(Value, "Argument to `{{.Method}}` must be non-negative, got {{.Got}}"),
    "VALUE-0005" => ErrorDef::new(Value, "Cannot {{.Method}} from empty array"),
    "VALUE-0006" => ErrorDef::new(Value, "Cannot take {{.Requested}} unique items from array of length {{.Length}}"),
    "VALUE-0007" => ErrorDef::new(Value, "Chunk size must be > 0, got {{.Got}}"),
    "VALUE-0008" => ErrorDef::with_hints(
        Value,
        "Regex dictionary missing pattern field",
        &["regex dictionaries must have a 'pattern' field"],
    ),
    "VALUE-0009" => ErrorDef::new(Value, "The money() scale must be between 0 and 10, got {{.Got}}"),
    "VALUE-0010" => ErrorDef::new(Value, "Invalid duration: {{.Cause}}"),
    "VALUE-0011" => ErrorDef::new(Value, "{{.Type}} handle has no valid path"),
    "VALUE-0012" => ErrorDef::new(Value, "{{.Function}}: invalid route '{{.Route}}' (use alphanumeric, hyphens, underscores)"),
    "VALUE-0013" => ErrorDef::new(Value, "The orderBy column spec must have {{.Min}}-{{.Max}} elements, got {{.Got}}"),
    "VALUE-0014" => ErrorDef::new(Value, "{{.Function}} requires at least one column"),
    "VALUE-0015" => ErrorDef::new(Value, "Range start must be an integer, got {{.Got}}"),
    "VALUE-0016" => ErrorDef::new(Value, "Range end must be an integer, got {{.Got}}"),
    "VALUE-0017" => ErrorDef::new(Value, "Regex pattern must be a string, got {{.Got}}"),
    "VALUE-0018" => ErrorDef::new(Value, "{{.Type}} dictionary missing {{.Field}} field"),
    "VALUE-0019" => ErrorDef::new(Value, "{{.Field}} field must be {{.Expected}}, got {{.Got}}"),
    "VALUE-0020" => ErrorDef::new(Value, "The money() function requires a 3-letter currency code, got '{{.Got}}'"),
    "VALUE-0021" => ErrorDef::new(Value, "{{.Function}}() requires {{.Expected}}, got {{.Got}}"),

    // ── OP ──────────────────────────────────────────────────────────────────
    "OP-0001" => ErrorDef::new(Operator, "Unknown operator: {{.LeftType}} {{.Operator}} {{.RightType}}"),
    "OP-0002" => ErrorDef::new(Operator, "Division by zero"),
    "OP-0003" => ErrorDef::new(Operator, "Cannot compare {{.LeftType}} and {{.RightType}}"),
    "OP-0004" => ErrorDef::new(Operator, "Cannot negate {{.Type}}"),
    "OP-0005" => ErrorDef::new(Operator, "Unknown prefix operator: {{.Operator}}{{.Type}}"),
    "OP-0006" => ErrorDef::new(Operator, "Modulo by zero"),
    "OP-0007" => ErrorDef::new(Operator, "Left operand of {{.Operator}} must be {{.Expected}}, got {{.Got}}"),
    "OP-0008" => ErrorDef::new(Operator, "Right operand of {{.Operator}} must be {{.Expected}}, got {{.Got}}"),
    "OP-0009" => ErrorDef::new(Operator, "Type mismatch: {{.LeftType}} {{.Operator}} {{.RightType}}"),
    "OP-0010" => ErrorDef::new(Operator, "Unsupported type for mixed arithmetic: {{.Type}}"),
    "OP-0011" => ErrorDef::with_hints(
        Operator,
        "Cannot add duration to datetime",
        &["use datetime + duration instead"],
    ),
    "OP-0012" => ErrorDef::new(Operator, "Cannot intersect two {{.Kind}}s - {{.Hint}}"),
    "OP-0013" => ErrorDef::new(Operator, "Cannot compare durations with month components (months have variable length)"),
    "OP-0014" => ErrorDef::new(Operator, "Unknown operator for {{.Type}}: {{.Operator}}"),
    "OP-0015" => ErrorDef::new(Operator, "Unknown operator for {{.LeftType}} and {{.RightType}}: {{.Operator}} (supported: {{.Supported}})"),
    "OP-0016" => ErrorDef::new(Operator, "'in' operator requires array, dictionary, or string on right side, got {{.Got}}"),
    "OP-0017" => ErrorDef::new(Operator, "Dictionary key must be a string, got {{.Got}}"),
    "OP-0018" => ErrorDef::new(Operator, "Substring must be a string, got {{.Got}}"),
    "OP-0019" => ErrorDef::with_hints(
        Operator,
        "Cannot mix currencies: {{.LeftCurrency}} and {{.RightCurrency}}",
        &["convert to the same currency before arithmetic"],
    ),
    "OP-0020" => ErrorDef::with_hints(
        Operator,
        "Unsupported operation between money values: {{.Operator}}",
        &["only +, -, and comparison operators are allowed between money values"],
    ),
    "OP-0021" => ErrorDef::with_hints(
        Operator,
        "Unsupported operation between money and number: {{.Operator}}",
        &["only * and / are allowed between money and numbers"],
    ),

    // ── STATE ───────────────────────────────────────────────────────────────
    "STATE-0001" => ErrorDef::new(State, "{{.Resource}} is {{.ActualState}}, expected {{.ExpectedState}}"),
    "STATE-0002" => ErrorDef::new(State, "SFTP connection is not connected"),
    "STATE-0003" => ErrorDef::new(State, "File handle is closed"),
    "STATE-0004" => ErrorDef::new(State, "Cannot close server-managed database connection"),
    "STATE-0005" => ErrorDef::new(State, "For expression missing function or body"),
    "STATE-0006" => ErrorDef::new(State, "For loop over dictionary requires body with key, value parameters"),
    "STATE-0007" => ErrorDef::new(State, "For loop over dictionary requires function body"),
    "STATE-0008" => ErrorDef::new(State, "{{.Context}} requires environment context"),
    "STATE-0009" => ErrorDef::new(State, "Unknown node type: {{.Type}}"),
    "STATE-0010" => ErrorDef::new(State, "{{.Function}} failed: {{.Cause}}"),
    "STATE-0011" => ErrorDef::new(State, "Unsupported nested destructuring pattern"),
    "STATE-0012" => ErrorDef::new(State, "Command handle missing {{.Field}} field"),
    "STATE-0013" => ErrorDef::new(State, "Left operand of <=#=> must be command handle"),
    "STATE-0014" => ErrorDef::new(State, "File handle has no valid path"),
    "STATE-0015" => ErrorDef::new(State, "File handle has no format specified"),
    "STATE-0016" => ErrorDef::new(State, "Directory handle has no valid path"),
    "STATE-0017" => ErrorDef::new(State, "CSV write not yet implemented for SFTP"),
    "STATE-0018" => ErrorDef::new(State, "Request handle has no valid URL"),

    // ── IMPORT ──────────────────────────────────────────────────────────────
    "IMPORT-0001" => ErrorDef::new(Import, "In module {{.ModulePath}}: {{.NestedError}}"),
    "IMPORT-0002" => ErrorDef::new(Import, "Circular dependency detected when importing: {{.Path}}"),
    "IMPORT-0003" => ErrorDef::new(Import, "Parse errors in module {{.ModulePath}}"),
    "IMPORT-0004" => ErrorDef::new(Import, "Failed to resolve module path: {{.Cause}}"),
    "IMPORT-0005" => ErrorDef::new(Import, "In module {{.ModulePath}}: line {{.Line}}, column {{.Column}}: {{.NestedError}}"),
    "IMPORT-0006" => ErrorDef::with_hints(
        Import,
        "Standard library module @std/{{.Module}} has been removed. {{.Replacement}}",
        &["Use @basil/http for request/response context", "Use @basil/auth for db/session/auth"],
    ),

    // ── CALL ────────────────────────────────────────────────────────────────
    "CALL-0001" => ErrorDef::with_hints(
        Type,
        "Cannot call null as a function",
        &["The value may not be exported from an imported module, or the variable is uninitialized"],
    ),
    "CALL-0002" => ErrorDef::with_hints(
        Type,
        "Cannot call {{.Type}} as a function",
        &["Only functions can be called with parentheses"],
    ),
    "CALL-0003" => ErrorDef::new(Type, "Dev module cannot be called directly, use dev.log() or other methods"),
    "CALL-0004" => ErrorDef::with_hints(
        Type,
        "Cannot call '{{.Name}}' because it is null",
        &["'{{.Name}}' may not be exported from the imported module. Check the export name matches."],
    ),
    "CALL-0005" => ErrorDef::new(Type, "Cannot call null as a function: {{.Context}}"),

    // ── CALLBACK ────────────────────────────────────────────────────────────
    "CALLBACK-0001" => ErrorDef::new(Arity, "Function passed to `{{.Function}}` must take exactly {{.Expected}} parameter(s), got {{.Got}}"),

    // ── LOOP ────────────────────────────────────────────────────────────────
    "LOOP-0001" => ErrorDef::new(Type, "For expects an array, string, or dictionary, got {{.Type}}"),
    "LOOP-0002" => ErrorDef::with_hints(
        Type,
        "For expects a function, got {{.Type}}",
        &["for (array) fn(x) { ... }", "for x in array { ... }"],
    ),

    // ── CMD ─────────────────────────────────────────────────────────────────
    "CMD-0002" => ErrorDef::new(Type, "Command {{.Field}} must be {{.Expected}}, got {{.Actual}}"),
    "CMD-0003" => ErrorDef::new(Type, "Command arguments must be strings"),
    "CMD-0004" => ErrorDef::new(Type, "Command input must be a string or null, got {{.Type}}"),
    "CMD-0005" => ErrorDef::new(Type, "Left operand of <=#=> must be command handle, got {{.Got}}"),

    // ── FILEOP ──────────────────────────────────────────────────────────────
    "FILEOP-0001" => ErrorDef::new(Type, "{{.Operator}} operator requires {{.Expected}}, got {{.Got}}"),
    "FILEOP-0004" => ErrorDef::new(Type, "File format must be a string, got {{.Got}}"),
    "FILEOP-0007" => ErrorDef::new(Type, "{{.Operator}} requires {{.Expected}}, got {{.Got}}"),

    // ── DEST ────────────────────────────────────────────────────────────────
    "DEST-0001" => ErrorDef::new(Type, "Dictionary destructuring requires a dictionary value, got {{.Got}}"),

    // ── COMP ────────────────────────────────────────────────────────────────
    "COMP-0001" => ErrorDef::with_hints(
        Type,
        "Component '<{{.Name}}/>' not found - '{{.Name}}' is null or not exported",
        &[
            "Did you forget to 'export {{.Name}}' in the imported module?",
            "Check that the export name matches exactly (case-sensitive)",
            "Ensure the module file exists and is imported correctly",
        ],
    ),
    "COMP-0002" => ErrorDef::with_hints(
        Type,
        "Cannot use '<{{.Name}}/>' because '{{.Name}}' is not a function (got {{.Got}})",
        &["Components must be functions. Check that '{{.Name}}' is exported as a function."],
    ),

    // ── TODICT ──────────────────────────────────────────────────────────────
    "TODICT-0001" => ErrorDef::new(Type, "The toDict function requires array of [key, value] pairs"),
    "TODICT-0002" => ErrorDef::new(Type, "Dictionary keys must be strings, got {{.Got}}"),
    "TODICT-0003" => ErrorDef::new(Type, "The toDict function: unsupported value type {{.Got}}"),

    // ── SPREAD ──────────────────────────────────────────────────────────────
    "SPREAD-0001" => ErrorDef::new(Type, "Spread operator requires a dictionary, got {{.Got}}"),

    // ── SQL ─────────────────────────────────────────────────────────────────
    "SQL-0001" => ErrorDef::new(Type, "SQL tag content must be a string"),
    "SQL-0002" => ErrorDef::new(Type, "Query object missing 'sql' property"),
    "SQL-0003" => ErrorDef::new(Type, "The sql property must be a string, got {{.Got}}"),
    "SQL-0004" => ErrorDef::new(Type, "Query must be a string or <SQL> tag, got {{.Got}}"),

    // ── SFTP ────────────────────────────────────────────────────────────────
    "SFTP-0005" => ErrorDef::new(Io, "SFTP write failed: {{.Cause}}"),
    "SFTP-0006" => ErrorDef::new(Io, "Failed to list directory: {{.Cause}}"),
    "SFTP-0007" => ErrorDef::new(Io, "SFTP read failed: {{.Cause}}"),

    // ── TABLE ───────────────────────────────────────────────────────────────
    "TABLE-0001" => ErrorDef::with_hints(
        Type,
        "table() requires an array, got {{.Got}}",
        &["Create a table from an array of dictionaries: table([{a: 1}, {a: 2}])"],
    ),
    "TABLE-0002" => ErrorDef::with_hints(
        Type,
        "Table row {{.Row}}: expected dictionary, got {{.Got}}",
        &["Each row in a table must be a dictionary with consistent keys"],
    ),
    "TABLE-0003" => ErrorDef::with_hints(
        Type,
        "Table row {{.Row}}: missing columns [{{.Missing}}]",
        &["All rows must have the same columns as the first row"],
    ),
    "TABLE-0004" => ErrorDef::with_hints(
        Type,
        "Table row {{.Row}}: unexpected columns [{{.Extra}}]",
        &["All rows must have the same columns as the first row"],
    ),
    "TABLE-0005" => ErrorDef::with_hints(
        Type,
        "Table row {{.Row}}: missing required field '{{.Field}}'",
        &["Required schema fields must be provided or have a default value"],
    ),
};

/// Look up a code.  `None` for unknown codes.
#[inline]
pub fn lookup(code: &str) -> Option<&'static ErrorDef> {
    CATALOG.get(code)
}

/// Is `code` present in the catalog?
#[inline]
pub fn contains(code: &str) -> bool {
    CATALOG.contains_key(code)
}

/// Every catalog code, sorted.
pub fn codes() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = CATALOG.keys().copied().collect();
    codes.sort_unstable();
    codes
}

/// Every `(code, definition)` pair, sorted by code.
pub fn entries() -> Vec<(&'static str, &'static ErrorDef)> {
    let mut entries: Vec<(&'static str, &'static ErrorDef)> =
        CATALOG.entries().map(|(code, def)| (*code, def)).collect();
    entries.sort_unstable_by_key(|(code, _)| *code);
    entries
}

/// Split a code into its class prefix and sequence number.
///
/// Returns `None` unless the code is `PREFIX-NNNN` with exactly four digits.
pub fn split_code(code: &str) -> Option<(&str, u16)> {
    let (prefix, seq) = code.split_once('-')?;

    if prefix.is_empty() || seq.len() != 4 || !seq.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    seq.parse::<u16>().ok().map(|n| (prefix, n))
}
