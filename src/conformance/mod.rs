//! Conformance tooling for the parser.
//!
//! - [`corpus`] loads JSON test vectors (input text plus the expected value
//!   or error code) and runs them against [`crate::json::parse_with_limits`].
//! - `harness` parses the same text with this crate and with `serde_json` and
//!   compares the resulting trees.

pub mod corpus;
mod harness;

pub use corpus::{
    Corpus, CorpusManifest, CorpusResults, CorpusRunner, Expected, TestResult, TestVector,
    FORMAT_VERSION,
};
pub use harness::{equivalent, DiffResult, DiffTestHarness};

use thiserror::Error;

/// Result type for conformance operations.
pub type ConformanceResult<T> = Result<T, ConformanceError>;

/// Errors that can occur while loading conformance data.
#[derive(Debug, Error)]
pub enum ConformanceError {
    /// Corpus file could not be read
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),
    /// Corpus file is not a valid corpus document
    #[error("failed to parse corpus JSON: {0}")]
    Format(#[from] serde_json::Error),
    /// Corpus manifest declares a format this runner does not understand
    #[error("unsupported corpus format version '{0}'")]
    UnsupportedVersion(String),
}
