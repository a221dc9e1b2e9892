//! Module `repl` decides when interactive input is complete and drives the
//! read loop.
//!
//! # Continuation detection
//!
//! [`needs_more_input`] scans the accumulated buffer once, left to right, and
//! tracks four signed depths (`{}`, `[]`, `()`, and markup tags) plus string
//! and escape state:
//!
//! - a `\` makes the next byte literal, inside or outside strings;
//! - an unescaped `"` toggles string state, and nothing inside a string counts;
//! - `<` followed by a letter or `_` opens a tag unless the tag ends in `/>`;
//!   `</` followed by a letter or `_` closes one;
//! - an opening tag whose `>` never arrives means more input is needed.
//!
//! More input is needed iff any depth is positive.  Blank input never needs
//! more.  Over-closing (a negative depth) is left for the parser to report;
//! [`Depths::overclosed`] records where it first happened.
//!
//! # Read loop
//!
//! [`Repl`] reads physical lines from any `BufRead`, appends them to a buffer,
//! and hands the buffer to an [`Evaluate`] implementation as soon as
//! [`needs_more_input`] says it is complete.

use std::io::{BufRead, Write};

use log::{debug, info};
use memchr::memchr3;

use crate::diagnostic::Diagnostic;
use crate::error::Result;

// ─────────────────────────────────────────────────────────────────────────────
// Continuation detector
// ─────────────────────────────────────────────────────────────────────────────

/// Where a closing delimiter first had no opener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overclose {
    /// The offending delimiter: `}`, `]`, `)` or `<` (for `</tag`).
    pub delimiter: char,

    /// 1-based line.
    pub line: usize,

    /// 1-based byte column.
    pub column: usize,
}

/// Nesting depths at the end of a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Depths {
    pub brace: i32,
    pub bracket: i32,
    pub paren: i32,
    pub tag: i32,

    /// An opening tag with no `>` before the end of input.
    pub unterminated_tag: bool,

    /// Buffer ended inside a string literal.
    pub in_string: bool,

    /// First delimiter that closed more than was open.
    pub overclosed: Option<Overclose>,
}

impl Depths {
    /// Is anything still open?
    pub fn needs_more_input(&self) -> bool {
        self.unterminated_tag
            || self.brace > 0
            || self.bracket > 0
            || self.paren > 0
            || self.tag > 0
    }
}

#[inline(always)]
fn is_tag_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Index of the `>` that ends the tag opened at `start`, skipping `>` inside
/// single- or double-quoted attribute values.
fn find_tag_end(src: &[u8], start: usize) -> Option<usize> {
    let mut pos: usize = start + 1;

    while pos < src.len() {
        let found: usize = pos + memchr3(b'>', b'"', b'\'', &src[pos..])?;

        match src[found] {
            b'>' => return Some(found),
            quote => {
                // jump past the matching quote
                let close: usize = src[found + 1..].iter().position(|&b| b == quote)?;
                pos = found + 1 + close + 1;
            }
        }
    }

    None
}

/// One-pass delimiter scanner over a REPL buffer.
struct ContinuationScanner<'a> {
    src: &'a [u8],
    curr: usize,
    line: usize,
    line_start: usize,
    escape_next: bool,
    depths: Depths,
}

impl<'a> ContinuationScanner<'a> {
    fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            curr: 0,
            line: 1,
            line_start: 0,
            escape_next: false,
            depths: Depths::default(),
        }
    }

    #[inline(always)]
    fn peek_at(&self, offset: usize) -> u8 {
        self.src.get(self.curr + offset).copied().unwrap_or(0)
    }

    fn close(&mut self, delimiter: char) {
        let counter: &mut i32 = match delimiter {
            '}' => &mut self.depths.brace,
            ']' => &mut self.depths.bracket,
            ')' => &mut self.depths.paren,
            _ => &mut self.depths.tag,
        };
        *counter -= 1;

        if *counter < 0 && self.depths.overclosed.is_none() {
            self.depths.overclosed = Some(Overclose {
                delimiter,
                line: self.line,
                column: self.curr - self.line_start + 1,
            });
        }
    }

    /// `<` outside a string.  Returns `false` when the tag never terminates,
    /// which ends the scan.
    fn open_angle(&mut self) -> bool {
        let next: u8 = self.peek_at(1);

        if next == b'/' {
            if is_tag_name_start(self.peek_at(2)) {
                self.close('<');
            }
            return true;
        }

        if !is_tag_name_start(next) {
            return true; // comparison operator
        }

        match find_tag_end(self.src, self.curr) {
            Some(end) if self.src[end - 1] == b'/' => {} // self-closing
            Some(_) => self.depths.tag += 1,
            None => {
                self.depths.unterminated_tag = true;
                return false;
            }
        }

        true
    }

    fn scan(mut self) -> Depths {
        while self.curr < self.src.len() {
            let b: u8 = self.src[self.curr];

            if b == b'\n' {
                self.line += 1;
                self.line_start = self.curr + 1;
            }

            if self.escape_next {
                self.escape_next = false;
            } else if b == b'\\' {
                self.escape_next = true;
            } else if b == b'"' {
                self.depths.in_string = !self.depths.in_string;
            } else if !self.depths.in_string {
                match b {
                    b'{' => self.depths.brace += 1,
                    b'}' => self.close('}'),
                    b'[' => self.depths.bracket += 1,
                    b']' => self.close(']'),
                    b'(' => self.depths.paren += 1,
                    b')' => self.close(')'),
                    b'<' => {
                        if !self.open_angle() {
                            break;
                        }
                    }
                    _ => {}
                }
            }

            self.curr += 1;
        }

        self.depths
    }
}

/// Scan `buffer` and report its nesting depths.
pub fn scan(buffer: &str) -> Depths {
    ContinuationScanner::new(buffer.as_bytes()).scan()
}

/// Should the REPL keep reading before submitting `buffer`?
pub fn needs_more_input(buffer: &str) -> bool {
    if buffer.trim().is_empty() {
        return false;
    }

    let depths: Depths = scan(buffer);
    debug!("Continuation scan: {:?}", depths);

    depths.needs_more_input()
}

// ─────────────────────────────────────────────────────────────────────────────
// Read loop
// ─────────────────────────────────────────────────────────────────────────────

/// Whatever consumes complete chunks of REPL input.
pub trait Evaluate {
    /// Evaluate one complete chunk.  `Ok(None)` means "no value".
    fn evaluate(&mut self, source: &str) -> std::result::Result<Option<String>, Diagnostic>;

    /// Drop all user state (`:clear`).
    fn reset(&mut self) {}

    /// `name: type = value` lines for `:env`.
    fn describe_env(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Prompts and banner.
#[derive(Debug, Clone)]
pub struct ReplConfig {
    pub prompt: String,
    pub raw_prompt: String,
    pub continuation_prompt: String,
    pub banner: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: ">> ".to_string(),
            raw_prompt: ":> ".to_string(),
            continuation_prompt: ".. ".to_string(),
            banner: true,
        }
    }
}

const HELP: &str = "\
REPL Commands:
  :help, :h, :?   Show this help
  :env            Show variables in scope
  :clear          Clear all user variables
  :raw            Toggle raw output mode (script-style output)
  exit, quit      Exit the REPL
";

/// Interactive session state.
pub struct Repl<E: Evaluate> {
    evaluator: E,
    config: ReplConfig,
    buffer: String,
    raw_mode: bool,
}

impl<E: Evaluate> Repl<E> {
    pub fn new(evaluator: E, config: ReplConfig) -> Self {
        Self {
            evaluator,
            config,
            buffer: String::new(),
            raw_mode: false,
        }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn is_raw(&self) -> bool {
        self.raw_mode
    }

    fn prompt(&self) -> &str {
        if !self.buffer.is_empty() {
            &self.config.continuation_prompt
        } else if self.raw_mode {
            &self.config.raw_prompt
        } else {
            &self.config.prompt
        }
    }

    /// Run until `exit`/`quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<()> {
        info!("REPL session started");

        if self.config.banner {
            writeln!(out, "Type 'exit' or Ctrl+D to quit")?;
            writeln!(out, "Type ':help' for REPL commands")?;
            writeln!(out)?;
        }

        let mut line: String = String::new();

        loop {
            write!(out, "{}", self.prompt())?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out, "\nGoodbye!")?;
                break;
            }

            let physical: &str = line.trim_end_matches(['\n', '\r']);
            let trimmed: &str = physical.trim();

            if self.buffer.is_empty() {
                if trimmed == "exit" || trimmed == "quit" {
                    writeln!(out, "Goodbye!")?;
                    break;
                }

                if trimmed.starts_with(':') {
                    self.command(trimmed, &mut out)?;
                    continue;
                }

                if trimmed.is_empty() {
                    continue;
                }
            } else {
                self.buffer.push('\n');
            }

            self.buffer.push_str(physical);

            if needs_more_input(&self.buffer) {
                continue;
            }

            let chunk: String = std::mem::take(&mut self.buffer);
            info!("Submitting {} line(s)", chunk.lines().count());
            self.submit(&chunk, &mut out)?;
        }

        info!("REPL session ended");
        Ok(())
    }

    fn submit<W: Write>(&mut self, chunk: &str, out: &mut W) -> Result<()> {
        match self.evaluator.evaluate(chunk) {
            Ok(None) => {
                if !self.raw_mode {
                    writeln!(out, "OK")?;
                }
            }

            Ok(Some(value)) if self.raw_mode => {
                if !value.is_empty() {
                    write!(out, "{}", value)?;
                    if !value.ends_with('\n') {
                        writeln!(out)?;
                    }
                }
            }

            Ok(Some(value)) => {
                if value.is_empty() {
                    writeln!(out, "OK")?;
                } else {
                    writeln!(out, "{}", value)?;
                }
            }

            Err(diagnostic) => {
                debug!("Chunk failed: {}", diagnostic);
                writeln!(out, "{}", diagnostic.to_pretty())?;
            }
        }

        Ok(())
    }

    fn command<W: Write>(&mut self, command: &str, out: &mut W) -> Result<()> {
        match command {
            ":help" | ":h" | ":?" => write!(out, "{}", HELP)?,

            ":env" => {
                let vars: Vec<String> = self.evaluator.describe_env();
                if vars.is_empty() {
                    writeln!(out, "(no user variables)")?;
                }
                for var in vars {
                    writeln!(out, "  {}", var)?;
                }
            }

            ":clear" => {
                self.evaluator.reset();
                writeln!(out, "Environment cleared")?;
            }

            ":raw" => {
                self.raw_mode = !self.raw_mode;
                if self.raw_mode {
                    writeln!(out, "Raw output mode ON (script-style output)")?;
                } else {
                    writeln!(out, "Raw output mode OFF (literal output)")?;
                }
            }

            other => writeln!(out, "Unknown command: {} (type :help for commands)", other)?,
        }

        Ok(())
    }
}
