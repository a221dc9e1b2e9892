use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::{Subcommand, ValueEnum};
use env_logger::Builder;
use log::{debug, info};

use parsley_errors as perr;

use perr::catalog;
use perr::error::ParsleyErrorsError;
use perr::repl::{self, Evaluate, Repl, ReplConfig};
use perr::{data, Data, Diagnostic, ErrorClass, Value};

#[derive(ClapParser, Debug)]
#[command(version, about = "Parsley diagnostics toolkit", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to parsley-errors.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Renders a catalog code with the given template arguments
    Explain {
        /// Error code, e.g. TYPE-0001
        code: String,

        /// Template argument as KEY=VALUE (VALUE is parsed as JSON when possible)
        #[arg(short, long = "data", value_name = "KEY=VALUE")]
        data: Vec<String>,

        /// 1-based line to attach
        #[arg(long, requires = "column")]
        line: Option<usize>,

        /// 1-based column to attach
        #[arg(long, requires = "line")]
        column: Option<usize>,

        /// Source file to attach
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output rendering
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },

    /// Lists catalog codes, optionally restricted to one class
    Codes {
        #[arg(long)]
        class: Option<String>,
    },

    /// Suggests the closest candidates for a misspelled name
    Suggest {
        name: String,

        candidates: Vec<String>,

        /// Show up to N suggestions instead of the single best one
        #[arg(long, value_name = "N")]
        top: Option<usize>,
    },

    /// Interactive session that buffers input until it is complete
    Repl {
        /// Skip the start-up banner
        #[arg(long)]
        no_banner: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Plain,
    Pretty,
    Json,
}

fn init_logger() -> Result<()> {
    let log_file = File::create("parsley-errors.log").context("Failed to create parsley-errors.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'parsley_errors::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("parsley_errors::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to parsley-errors.log");
    Ok(())
}

/// Split `KEY=VALUE`; the value is JSON when it parses as JSON, else a string.
fn parse_data_arg(arg: &str) -> perr::error::Result<(String, Value)> {
    let (key, raw) = arg
        .split_once('=')
        .ok_or_else(|| ParsleyErrorsError::invalid_data_arg(arg, "expected KEY=VALUE"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(ParsleyErrorsError::invalid_data_arg(arg, "empty key"));
    }

    let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::from(raw));

    Ok((key.to_string(), value))
}

fn explain(
    code: &str,
    args: &[String],
    position: Option<(usize, usize)>,
    file: Option<PathBuf>,
    format: Format,
) -> Result<()> {
    let mut bag = Data::new();
    for arg in args {
        let (key, value) = parse_data_arg(arg)?;
        bag.insert(key, value);
    }

    if !catalog::contains(code) {
        info!("{} is not a catalog code", code);
    }

    let mut diagnostic = match position {
        Some((line, column)) => Diagnostic::render_at(code, line, column, bag),
        None => Diagnostic::render(code, bag),
    };

    if let Some(file) = file {
        diagnostic = diagnostic.with_file(file.display().to_string());
    }

    debug!("Explained diagnostic: {:?}", diagnostic);

    let rendered = match format {
        Format::Plain => diagnostic.to_single_line(),
        Format::Pretty => diagnostic.to_pretty(),
        Format::Json => diagnostic
            .to_json_indent()
            .context("Failed to encode diagnostic as JSON")?,
    };

    println!("{}", rendered);
    Ok(())
}

fn list_codes(class: Option<&str>) -> Result<()> {
    let filter: Option<ErrorClass> = class.map(str::parse::<ErrorClass>).transpose()?;

    for (code, def) in catalog::entries() {
        if filter.is_some_and(|c| c != def.class) {
            continue;
        }
        println!("{:<14} {:<10} {}", code, def.class, def.template);
    }

    Ok(())
}

fn suggest(name: &str, candidates: &[String], top: Option<usize>) {
    match top {
        Some(n) => {
            for candidate in perr::top_matches(name, candidates, n) {
                println!("{}", candidate);
            }
        }
        None => {
            let diagnostic = perr::suggest::undefined_identifier(name, candidates);
            println!("{}", diagnostic.to_pretty());
        }
    }
}

/// Stand-in evaluator for the `repl` subcommand: reports delimiter problems
/// in each complete chunk and otherwise echoes it back.
#[derive(Default)]
struct BalanceCheck {
    chunks: Vec<String>,
}

impl Evaluate for BalanceCheck {
    fn evaluate(&mut self, source: &str) -> std::result::Result<Option<String>, Diagnostic> {
        let depths = repl::scan(source);

        if let Some(over) = depths.overclosed {
            return Err(Diagnostic::render_at(
                "PARSE-0002",
                over.line,
                over.column,
                data! { "Token": over.delimiter.to_string() },
            ));
        }

        if depths.in_string {
            return Err(Diagnostic::render("PARSE-0006", data! {}));
        }

        self.chunks.push(source.to_string());
        Ok(Some(source.to_string()))
    }

    fn reset(&mut self) {
        self.chunks.clear();
    }

    fn describe_env(&self) -> Vec<String> {
        self.chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| {
                let first = chunk.lines().next().unwrap_or("");
                format!("_{}: chunk = {}", i + 1, first)
            })
            .collect()
    }
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        // Initialize a minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Explain {
            code,
            data,
            line,
            column,
            file,
            format,
        } => {
            info!("Running Explain subcommand");
            explain(&code, &data, line.zip(column), file, format)?;
        }

        Commands::Codes { class } => {
            info!("Running Codes subcommand");
            list_codes(class.as_deref())?;
        }

        Commands::Suggest {
            name,
            candidates,
            top,
        } => {
            info!("Running Suggest subcommand");
            suggest(&name, &candidates, top);
        }

        Commands::Repl { no_banner } => {
            info!("Running Repl subcommand");
            let config = ReplConfig {
                banner: !no_banner,
                ..ReplConfig::default()
            };

            let stdin = io::stdin();
            let stdout = io::stdout();
            Repl::new(BalanceCheck::default(), config)
                .run(stdin.lock(), stdout.lock())
                .context("REPL session failed")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_args_parse_json_or_fall_back_to_text() {
        assert_eq!(
            parse_data_arg("Got=3").unwrap(),
            ("Got".to_string(), Value::from(3))
        );
        assert_eq!(
            parse_data_arg("Function=len").unwrap(),
            ("Function".to_string(), Value::from("len"))
        );
        assert_eq!(
            parse_data_arg("Reason=a=b").unwrap(),
            ("Reason".to_string(), Value::from("a=b"))
        );
        assert!(parse_data_arg("novalue").is_err());
        assert!(parse_data_arg("=x").is_err());
    }

    #[test]
    fn balance_check_reports_overclose() {
        let mut check = BalanceCheck::default();
        let err = check.evaluate("x)").unwrap_err();
        assert_eq!(err.code(), "PARSE-0002");
        assert_eq!(err.message(), "Unexpected ')'");
        assert_eq!((err.line(), err.column()), (1, 2));

        assert_eq!(check.evaluate("{a: 1}").unwrap(), Some("{a: 1}".to_string()));
        assert_eq!(check.describe_env(), vec!["_1: chunk = {a: 1}".to_string()]);
    }
}
