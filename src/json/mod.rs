//! JSON parsing into a typed value tree.
//!
//! # Architecture
//!
//! The JSON subsystem is organized into focused modules:
//!
//! - [`types`] - The [`JsonValue`] tagged union and its typed accessors
//! - [`limits`] - Resource limits and behaviour switches
//! - [`scanner`] - Cursor with whitespace, token, literal and number readers
//! - `string` - String literal and escape decoding (methods on [`Scanner`])
//! - [`parser`] - Recursive descent over objects, arrays and values
//!
//! # Grammar decisions
//!
//! - Any value may appear at the root (RFC 8259). Setting
//!   [`Limits::containers_only_at_root`] restricts the root to `{` or `[`.
//! - Only the JSON escape set is accepted by default. Setting
//!   [`Limits::lenient_escapes`] appends any other escaped character verbatim.
//! - Numbers are scanned permissively (digits, `.`, `e`, `E`, `+`, `-`) and
//!   converted with the standard library's `f64` parser; the whole slice must
//!   convert to a finite value.
//! - Objects keep the last value of a repeated key.
//!
//! # Example
//!
//! ```
//! use wheel_json::json::{parse, JsonValue};
//!
//! let value = parse(br#"{"name": "John", "scores": [95, 87]}"#).unwrap();
//!
//! assert_eq!(value.get("name").unwrap().as_str().unwrap(), "John");
//! assert_eq!(value.get("scores").unwrap().as_array().unwrap().len(), 2);
//! assert!(value.get("name").unwrap().as_f64().is_err());
//! ```

pub mod limits;
pub mod parser;
pub mod scanner;
mod string;
pub mod types;

// Re-export commonly used items
pub use limits::{Limits, MAX_SUPPORTED_DEPTH};
pub use parser::{parse, parse_str, parse_with_limits, Parser};
pub use scanner::Scanner;
pub use types::{JsonObject, JsonValue};
