//! wheel-json CLI.
//!
//! Thin front end over the library: parse a document from a file or stdin,
//! print one field of an object, or run a conformance corpus. Results go to
//! stdout, diagnostics to stderr.
//!
//! Exit codes: 0 success, 1 parse or conformance failure, 2 usage or I/O error.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use wheel_json::conformance::CorpusRunner;
use wheel_json::{parse_with_limits, ErrorCode, JsonValue, Limits};

const DEMO_DOCUMENT: &str = r#"{"name": "John", "age": 30, "scores": [95, 87, 92]}"#;

#[derive(Parser)]
#[command(name = "wheel-json")]
#[command(about = "Parse and inspect JSON documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Use the lenient preset (larger limits, unknown escapes accepted)
    #[arg(long, global = true)]
    lenient: bool,

    /// Load limits from a JSON file; missing fields keep their defaults
    #[arg(long, global = true, value_name = "FILE", conflicts_with = "lenient")]
    limits: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and report its root type
    Check {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Print one field of an object document
    Get {
        /// Field name
        key: String,
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Parse a built-in document and print its name field
    Demo,

    /// Run a conformance corpus file
    Corpus {
        /// Corpus file
        file: PathBuf,
    },

    /// Show version information
    Version,
}

/// Failure of a CLI command, mapped to an exit code.
enum Failure {
    Parse(ErrorCode),
    Usage(String),
    Rejected(String),
}

impl Failure {
    fn report(&self) -> ExitCode {
        match self {
            Failure::Parse(e) => {
                eprintln!("error: {}: {}", e.name(), e);
                ExitCode::from(1)
            }
            Failure::Rejected(msg) => {
                eprintln!("error: {}", msg);
                ExitCode::from(1)
            }
            Failure::Usage(msg) => {
                eprintln!("error: {}", msg);
                ExitCode::from(2)
            }
        }
    }
}

impl From<ErrorCode> for Failure {
    fn from(e: ErrorCode) -> Self {
        Failure::Parse(e)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => failure.report(),
    }
}

fn run(cli: &Cli) -> Result<(), Failure> {
    let limits = resolve_limits(cli)?;

    match &cli.command {
        Commands::Check { file } => {
            let value = parse_with_limits(&read_input(file.as_deref())?, limits)?;
            println!("ok: {}", value.type_name());
        }
        Commands::Get { key, file } => {
            let value = parse_with_limits(&read_input(file.as_deref())?, limits)?;
            let field = value
                .as_object()?
                .get(key)
                .ok_or_else(|| Failure::Rejected(format!("missing key '{}'", key)))?;
            println!("{}", describe(field));
        }
        Commands::Demo => {
            let value = parse_with_limits(DEMO_DOCUMENT.as_bytes(), limits)?;
            if let Some(name) = value.get("name") {
                println!("Name: {}", name.as_str()?);
            }
        }
        Commands::Corpus { file } => {
            let runner = CorpusRunner::load(file).map_err(|e| Failure::Usage(e.to_string()))?;
            let results = runner.run_all();
            for (id, result) in results.failures() {
                println!("FAIL {}: {:?}", id, result);
            }
            println!("{}", results.summary());
            if !results.all_passed() {
                return Err(Failure::Rejected(format!(
                    "{} corpus vector(s) failed",
                    results.failed
                )));
            }
        }
        Commands::Version => {
            println!("wheel-json v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn resolve_limits(cli: &Cli) -> Result<Limits, Failure> {
    if cli.lenient {
        return Ok(Limits::lenient());
    }
    match &cli.limits {
        Some(path) => {
            let content = fs::read_to_string(path)
                .map_err(|e| Failure::Usage(format!("cannot read {}: {}", path.display(), e)))?;
            serde_json::from_str(&content)
                .map_err(|e| Failure::Usage(format!("invalid limits file {}: {}", path.display(), e)))
        }
        None => Ok(Limits::strict()),
    }
}

fn read_input(file: Option<&Path>) -> Result<Vec<u8>, Failure> {
    match file {
        Some(path) => {
            fs::read(path).map_err(|e| Failure::Usage(format!("cannot read {}: {}", path.display(), e)))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| Failure::Usage(format!("cannot read stdin: {}", e)))?;
            Ok(buf)
        }
    }
}

/// Text form of a field: scalars as text, containers as a size summary.
fn describe(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "null".to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(a) => format!("array[{}]", a.len()),
        JsonValue::Object(o) => format!("object{{{}}}", o.len()),
    }
}
