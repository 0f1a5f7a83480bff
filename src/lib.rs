//! wheel-json - a recursive descent JSON parser with a typed value model.
//!
//! Parsing turns UTF-8 text into a [`JsonValue`] tree in a single forward
//! pass, or fails on the first problem with an [`ErrorCode`] that carries the
//! byte offset where it was detected. There is no partial result and no
//! error recovery.
//!
//! # Architecture
//!
//! - [`json`] - Value model, scanner and parser
//! - [`error`] - Error codes, categories and offsets
//! - [`conformance`] - Corpus runner and differential harness against `serde_json`
//!
//! # Example
//!
//! ```
//! use wheel_json::{parse_str, ErrorCode};
//!
//! let value = parse_str(r#"{"a": 1, "a": 2}"#).unwrap();
//! assert_eq!(value.get("a").unwrap().as_f64(), Ok(2.0));
//!
//! assert_eq!(parse_str("[1,2,]"), Err(ErrorCode::E113_TrailingComma(5)));
//! ```

// Library code reports every failure through ErrorCode.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod conformance;
pub mod error;
pub mod json;

// Re-export commonly used types
pub use error::{ErrorCategory, ErrorCode, JsonResult};
pub use json::{parse, parse_str, parse_with_limits, JsonObject, JsonValue, Limits};
