//! Module `template` renders catalog templates against a per-call data bag.
//!
//! Supported syntax:
//!
//! - `{{.Key}}` substitutes the value stored under `Key`, or `<no value>` when
//!   the data has no such key.
//! - `{{if .Key}} … {{end}}` and `{{if .Key}} … {{else}} … {{end}}` select a
//!   branch on the truthiness of `Key`.  Conditionals nest.
//!
//! Everything else between `{{` and `}}` is a syntax error.
//!
//! [`render`] reports syntax errors; [`render_or_raw`] is the fail-soft entry
//! point used while building diagnostics: a template that does not parse is
//! returned verbatim.

use log::debug;
use serde_json::Value;
use thiserror::Error;

use crate::Data;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Substituted for a field the data does not define.
pub const NO_VALUE: &str = "<no value>";

/// Why a template could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unclosed action starting at byte {0}")]
    Unclosed(usize),

    #[error("unknown action '{{{{{0}}}}}'")]
    UnknownAction(String),

    #[error("'{0}' without matching if")]
    Unbalanced(&'static str),

    #[error("if without matching end")]
    MissingEnd,
}

/// Parsed template node.
#[derive(Debug, Clone, PartialEq)]
enum Node<'t> {
    Text(&'t str),
    Field(&'t str),
    If {
        key: &'t str,
        then: Vec<Node<'t>>,
        otherwise: Vec<Node<'t>>,
    },
}

/// Lexed piece of a template.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Piece<'t> {
    Text(&'t str),
    Field(&'t str),
    If(&'t str),
    Else,
    End,
}

// ───────────────────────────── lexing ───────────────────────────────────────

fn lex(src: &str) -> Result<Vec<Piece<'_>>, TemplateError> {
    let mut pieces: Vec<Piece<'_>> = Vec::new();
    let mut rest: &str = src;
    let mut offset: usize = 0;

    while let Some(open) = rest.find(OPEN) {
        if open > 0 {
            pieces.push(Piece::Text(&rest[..open]));
        }

        let after_open: &str = &rest[open + OPEN.len()..];
        let close: usize = after_open
            .find(CLOSE)
            .ok_or(TemplateError::Unclosed(offset + open))?;

        pieces.push(lex_action(after_open[..close].trim())?);

        let consumed: usize = open + OPEN.len() + close + CLOSE.len();
        offset += consumed;
        rest = &rest[consumed..];
    }

    if !rest.is_empty() {
        pieces.push(Piece::Text(rest));
    }

    Ok(pieces)
}

fn lex_action(action: &str) -> Result<Piece<'_>, TemplateError> {
    match action {
        "else" => return Ok(Piece::Else),
        "end" => return Ok(Piece::End),
        _ => {}
    }

    if let Some(key) = field_key(action) {
        return Ok(Piece::Field(key));
    }

    if let Some(key) = action.strip_prefix("if ").and_then(|r| field_key(r.trim())) {
        return Ok(Piece::If(key));
    }

    Err(TemplateError::UnknownAction(action.to_string()))
}

/// `.Key` → `Key`, where the key is a non-empty identifier.
fn field_key(action: &str) -> Option<&str> {
    let key: &str = action.strip_prefix('.')?;

    let valid: bool = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_');

    valid.then_some(key)
}

// ───────────────────────────── parsing ──────────────────────────────────────

/// What ended a run of nodes.
enum Stop {
    Eof,
    Else,
    End,
}

fn parse<'t>(pieces: &[Piece<'t>]) -> Result<Vec<Node<'t>>, TemplateError> {
    let mut pos: usize = 0;
    let (nodes, stop) = parse_run(pieces, &mut pos)?;

    match stop {
        Stop::Eof => Ok(nodes),
        Stop::Else => Err(TemplateError::Unbalanced("else")),
        Stop::End => Err(TemplateError::Unbalanced("end")),
    }
}

fn parse_run<'t>(
    pieces: &[Piece<'t>],
    pos: &mut usize,
) -> Result<(Vec<Node<'t>>, Stop), TemplateError> {
    let mut nodes: Vec<Node<'t>> = Vec::new();

    while let Some(piece) = pieces.get(*pos).copied() {
        *pos += 1;

        match piece {
            Piece::Text(text) => nodes.push(Node::Text(text)),
            Piece::Field(key) => nodes.push(Node::Field(key)),
            Piece::Else => return Ok((nodes, Stop::Else)),
            Piece::End => return Ok((nodes, Stop::End)),
            Piece::If(key) => {
                let (then, stop) = parse_run(pieces, pos)?;

                let otherwise: Vec<Node<'t>> = match stop {
                    Stop::End => Vec::new(),
                    Stop::Else => match parse_run(pieces, pos)? {
                        (otherwise, Stop::End) => otherwise,
                        (_, Stop::Else) => return Err(TemplateError::Unbalanced("else")),
                        (_, Stop::Eof) => return Err(TemplateError::MissingEnd),
                    },
                    Stop::Eof => return Err(TemplateError::MissingEnd),
                };

                nodes.push(Node::If {
                    key,
                    then,
                    otherwise,
                });
            }
        }
    }

    Ok((nodes, Stop::Eof))
}

// ───────────────────────────── execution ────────────────────────────────────

fn execute(nodes: &[Node<'_>], data: &Data, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),

            Node::Field(key) => match data.get(*key) {
                Some(value) => out.push_str(&stringify(value)),
                None => out.push_str(NO_VALUE),
            },

            Node::If {
                key,
                then,
                otherwise,
            } => {
                let branch: &[Node<'_>] = if is_truthy(data.get(*key)) {
                    then
                } else {
                    otherwise
                };
                execute(branch, data, out);
            }
        }
    }
}

/// Text form of a data value inside a rendered message.
///
/// Strings are inserted verbatim (no quotes), `null` becomes `<nil>`, arrays
/// and objects use compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "<nil>".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Truthiness used by `{{if}}`: absent, `null`, `false`, zero, and empty
/// strings/arrays/objects are false.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

// ───────────────────────────── public API ───────────────────────────────────

/// Render `template` against `data`, reporting syntax errors.
pub fn render(template: &str, data: &Data) -> Result<String, TemplateError> {
    let pieces: Vec<Piece<'_>> = lex(template)?;
    let nodes: Vec<Node<'_>> = parse(&pieces)?;

    let mut out: String = String::with_capacity(template.len());
    execute(&nodes, data, &mut out);

    Ok(out)
}

/// Fail-soft rendering: the template itself is returned when it does not
/// parse.
pub fn render_or_raw(template: &str, data: &Data) -> String {
    match render(template, data) {
        Ok(rendered) => rendered,
        Err(e) => {
            debug!("Template fallback for {:?}: {}", template, e);
            template.to_string()
        }
    }
}

/// Keys referenced by a template (fields and conditionals), in first-use
/// order, without duplicates.  Malformed templates yield the keys found before
/// the first syntax error.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut keys: Vec<&str> = Vec::new();
    let mut rest: &str = template;

    while let Some(open) = rest.find(OPEN) {
        let after_open: &str = &rest[open + OPEN.len()..];
        let Some(close) = after_open.find(CLOSE) else {
            break;
        };

        match lex_action(after_open[..close].trim()) {
            Ok(Piece::Field(key)) | Ok(Piece::If(key)) => {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
            Ok(_) => {}
            Err(_) => break,
        }

        rest = &after_open[close + CLOSE.len()..];
    }

    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> Data {
        match value {
            Value::Object(map) => map,
            _ => panic!("test data must be an object"),
        }
    }

    #[test]
    fn substitutes_fields() {
        let data = bag(json!({"Function": "len", "Got": 3}));
        assert_eq!(
            render("{{.Function}} got {{ .Got }}", &data).unwrap(),
            "len got 3"
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(render("Division by zero", &Data::new()).unwrap(), "Division by zero");
    }

    #[test]
    fn conditional_branches() {
        let tmpl = "{{if .Flag}}use {{.Flag}}{{else}}no flag{{end}}";

        let with = bag(json!({"Flag": "--allow-net"}));
        assert_eq!(render(tmpl, &with).unwrap(), "use --allow-net");

        let without = bag(json!({"Flag": ""}));
        assert_eq!(render(tmpl, &without).unwrap(), "no flag");

        assert_eq!(render("{{if .X}}x{{end}}", &Data::new()).unwrap(), "");
    }

    #[test]
    fn nested_conditionals() {
        let tmpl = "{{if .A}}a{{if .B}}b{{end}}{{end}}";
        assert_eq!(render(tmpl, &bag(json!({"A": true, "B": 1}))).unwrap(), "ab");
        assert_eq!(render(tmpl, &bag(json!({"A": true, "B": 0}))).unwrap(), "a");
    }

    #[test]
    fn errors_are_reported() {
        let empty = Data::new();
        assert_eq!(render("oops {{.X", &empty), Err(TemplateError::Unclosed(5)));
        assert!(matches!(
            render("{{range .X}}", &empty),
            Err(TemplateError::UnknownAction(_))
        ));
        assert_eq!(render("{{end}}", &empty), Err(TemplateError::Unbalanced("end")));
        assert_eq!(render("{{if .X}}open", &empty), Err(TemplateError::MissingEnd));
    }

    #[test]
    fn fail_soft_returns_raw_template() {
        let tmpl = "Bad {{.Name";
        assert_eq!(render_or_raw(tmpl, &Data::new()), tmpl);

        let tmpl = "{{if .Name}}unterminated";
        assert_eq!(render_or_raw(tmpl, &bag(json!({"Name": "x"}))), tmpl);
    }

    #[test]
    fn missing_field_renders_no_value() {
        let data = bag(json!({"Function": "len"}));
        assert_eq!(
            render("{{.Function}} expected {{.Expected}}", &data).unwrap(),
            "len expected <no value>"
        );
        assert_eq!(render_or_raw("<{{.Tag}}/>", &Data::new()), "<<no value>/>");
    }

    #[test]
    fn stringify_shapes() {
        assert_eq!(stringify(&json!("text")), "text");
        assert_eq!(stringify(&json!(null)), "<nil>");
        assert_eq!(stringify(&json!(2.5)), "2.5");
        assert_eq!(stringify(&json!([1, "a"])), "[1,\"a\"]");
    }

    #[test]
    fn placeholders_in_first_use_order() {
        assert_eq!(
            placeholders("{{if .Flag}}{{.Flag}} {{.Op}}{{end}} {{.Op}}"),
            vec!["Flag", "Op"]
        );
        assert!(placeholders("no actions").is_empty());
    }
}
