//! Error codes for the parser and the value model.
//!
//! Every failure the crate can report is one variant of [`ErrorCode`]. Each
//! variant has a stable numeric code, its variant name, the byte offset at
//! which it was detected and a coarse [`ErrorCategory`].
//!
//! Codes are grouped by range:
//!
//! - 100..=113: grammar and string decoding failures
//! - 120..=124: resource limits (see [`crate::json::Limits`])
//! - 200: typed access on the wrong variant of a [`crate::json::JsonValue`]

use std::fmt;

use thiserror::Error;

/// Coarse classification of an [`ErrorCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Structural token missing, bad value start, trailing content.
    Syntax,
    /// End of input inside a string literal.
    UnterminatedString,
    /// Malformed `\u` escape, surrogate misuse or unknown escape.
    InvalidEscape,
    /// Numeric literal that does not convert to a finite `f64`.
    InvalidNumber,
    /// `true`, `false` or `null` spelled wrong.
    InvalidLiteral,
    /// Scalar at the root when only containers are accepted there.
    InvalidTopLevel,
    /// Input bytes are not UTF-8.
    Encoding,
    /// A configured resource limit was exceeded.
    Limit,
    /// Typed accessor called on a different variant.
    TypeMismatch,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Syntax => "syntax",
            Self::UnterminatedString => "unterminated-string",
            Self::InvalidEscape => "invalid-escape",
            Self::InvalidNumber => "invalid-number",
            Self::InvalidLiteral => "invalid-literal",
            Self::InvalidTopLevel => "invalid-top-level-value",
            Self::Encoding => "encoding",
            Self::Limit => "limit",
            Self::TypeMismatch => "type-mismatch",
        };
        f.write_str(name)
    }
}

/// All error codes reported by the crate.
///
/// The trailing `usize` of every parse variant is the byte offset into the
/// input at which the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[allow(non_camel_case_types)]
pub enum ErrorCode {
    /// Mandatory structural character missing (expected, offset).
    #[error("expected '{0}' at byte {1}")]
    E100_UnexpectedToken(char, usize),

    /// Lookahead does not start any JSON value (offset).
    #[error("invalid JSON input at byte {0}")]
    E101_InvalidValue(usize),

    /// End of input before the closing quote (offset).
    #[error("unterminated string at byte {0}")]
    E102_UnterminatedString(usize),

    /// Non-hex character inside a `\uXXXX` escape (offset).
    #[error("invalid hex digit at byte {0}")]
    E103_InvalidHexDigit(usize),

    /// High surrogate not followed by a low surrogate (code unit, offset).
    #[error("high surrogate \\u{0:04X} at byte {1} is not followed by a low surrogate")]
    E104_UnpairedHighSurrogate(u16, usize),

    /// Low surrogate without a preceding high surrogate (code unit, offset).
    #[error("unexpected low surrogate \\u{0:04X} at byte {1}")]
    E105_UnexpectedLowSurrogate(u16, usize),

    /// Escape character outside the JSON escape set (character, offset).
    #[error("unknown escape '\\{0}' at byte {1}")]
    E106_UnknownEscape(char, usize),

    /// Numeric literal fails conversion (offset where scanning began).
    #[error("invalid number at byte {0}")]
    E107_InvalidNumber(usize),

    /// Keyword literal mismatch (offset of the first mismatching byte).
    #[error("invalid literal at byte {0}")]
    E108_InvalidLiteral(usize),

    /// Scalar root with `containers_only_at_root` set (offset).
    #[error("top-level value must be an object or an array (byte {0})")]
    E109_InvalidTopLevel(usize),

    /// Non-whitespace after the root value (offset).
    #[error("unexpected trailing content at byte {0}")]
    E110_TrailingContent(usize),

    /// Input is not valid UTF-8 (offset of the first invalid byte).
    #[error("invalid UTF-8 at byte {0}")]
    E111_InvalidUtf8(usize),

    /// Unescaped control character inside a string (byte, offset).
    #[error("control character 0x{0:02X} in string at byte {1}")]
    E112_ControlCharacter(u8, usize),

    /// Comma directly before a closing bracket or brace (offset of the closer).
    #[error("trailing comma before byte {0}")]
    E113_TrailingComma(usize),

    /// Input larger than the configured limit (size, limit).
    #[error("input of {0} bytes exceeds the limit of {1} bytes")]
    E120_InputTooLarge(u64, u64),

    /// Nesting deeper than the configured limit (limit, offset).
    #[error("nesting deeper than {0} levels at byte {1}")]
    E121_NestingTooDeep(u64, usize),

    /// Decoded string longer than the configured limit (limit, offset).
    #[error("string longer than {0} bytes at byte {1}")]
    E122_StringTooLong(u64, usize),

    /// Object with more fields than the configured limit (limit, offset).
    #[error("object with more than {0} fields at byte {1}")]
    E123_TooManyFields(u64, usize),

    /// Array with more elements than the configured limit (limit, offset).
    #[error("array with more than {0} elements at byte {1}")]
    E124_ArrayTooLong(u64, usize),

    /// Accessor for one variant called on another (expected, found).
    #[error("type mismatch: expected {0}, found {1}")]
    E200_TypeMismatch(&'static str, &'static str),
}

impl ErrorCode {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::E100_UnexpectedToken(..) => 100,
            ErrorCode::E101_InvalidValue(_) => 101,
            ErrorCode::E102_UnterminatedString(_) => 102,
            ErrorCode::E103_InvalidHexDigit(_) => 103,
            ErrorCode::E104_UnpairedHighSurrogate(..) => 104,
            ErrorCode::E105_UnexpectedLowSurrogate(..) => 105,
            ErrorCode::E106_UnknownEscape(..) => 106,
            ErrorCode::E107_InvalidNumber(_) => 107,
            ErrorCode::E108_InvalidLiteral(_) => 108,
            ErrorCode::E109_InvalidTopLevel(_) => 109,
            ErrorCode::E110_TrailingContent(_) => 110,
            ErrorCode::E111_InvalidUtf8(_) => 111,
            ErrorCode::E112_ControlCharacter(..) => 112,
            ErrorCode::E113_TrailingComma(_) => 113,
            ErrorCode::E120_InputTooLarge(..) => 120,
            ErrorCode::E121_NestingTooDeep(..) => 121,
            ErrorCode::E122_StringTooLong(..) => 122,
            ErrorCode::E123_TooManyFields(..) => 123,
            ErrorCode::E124_ArrayTooLong(..) => 124,
            ErrorCode::E200_TypeMismatch(..) => 200,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::E100_UnexpectedToken(..) => "E100_UnexpectedToken",
            ErrorCode::E101_InvalidValue(_) => "E101_InvalidValue",
            ErrorCode::E102_UnterminatedString(_) => "E102_UnterminatedString",
            ErrorCode::E103_InvalidHexDigit(_) => "E103_InvalidHexDigit",
            ErrorCode::E104_UnpairedHighSurrogate(..) => "E104_UnpairedHighSurrogate",
            ErrorCode::E105_UnexpectedLowSurrogate(..) => "E105_UnexpectedLowSurrogate",
            ErrorCode::E106_UnknownEscape(..) => "E106_UnknownEscape",
            ErrorCode::E107_InvalidNumber(_) => "E107_InvalidNumber",
            ErrorCode::E108_InvalidLiteral(_) => "E108_InvalidLiteral",
            ErrorCode::E109_InvalidTopLevel(_) => "E109_InvalidTopLevel",
            ErrorCode::E110_TrailingContent(_) => "E110_TrailingContent",
            ErrorCode::E111_InvalidUtf8(_) => "E111_InvalidUtf8",
            ErrorCode::E112_ControlCharacter(..) => "E112_ControlCharacter",
            ErrorCode::E113_TrailingComma(_) => "E113_TrailingComma",
            ErrorCode::E120_InputTooLarge(..) => "E120_InputTooLarge",
            ErrorCode::E121_NestingTooDeep(..) => "E121_NestingTooDeep",
            ErrorCode::E122_StringTooLong(..) => "E122_StringTooLong",
            ErrorCode::E123_TooManyFields(..) => "E123_TooManyFields",
            ErrorCode::E124_ArrayTooLong(..) => "E124_ArrayTooLong",
            ErrorCode::E200_TypeMismatch(..) => "E200_TypeMismatch",
        }
    }

    /// Byte offset at which the error was detected.
    ///
    /// An oversized input is reported at the first byte past the limit. Type
    /// mismatches do not come from parsing and carry no offset.
    pub fn offset(&self) -> Option<usize> {
        match *self {
            ErrorCode::E100_UnexpectedToken(_, pos)
            | ErrorCode::E101_InvalidValue(pos)
            | ErrorCode::E102_UnterminatedString(pos)
            | ErrorCode::E103_InvalidHexDigit(pos)
            | ErrorCode::E104_UnpairedHighSurrogate(_, pos)
            | ErrorCode::E105_UnexpectedLowSurrogate(_, pos)
            | ErrorCode::E106_UnknownEscape(_, pos)
            | ErrorCode::E107_InvalidNumber(pos)
            | ErrorCode::E108_InvalidLiteral(pos)
            | ErrorCode::E109_InvalidTopLevel(pos)
            | ErrorCode::E110_TrailingContent(pos)
            | ErrorCode::E111_InvalidUtf8(pos)
            | ErrorCode::E112_ControlCharacter(_, pos)
            | ErrorCode::E113_TrailingComma(pos)
            | ErrorCode::E121_NestingTooDeep(_, pos)
            | ErrorCode::E122_StringTooLong(_, pos)
            | ErrorCode::E123_TooManyFields(_, pos)
            | ErrorCode::E124_ArrayTooLong(_, pos) => Some(pos),
            ErrorCode::E120_InputTooLarge(_, limit) => usize::try_from(limit).ok(),
            ErrorCode::E200_TypeMismatch(..) => None,
        }
    }

    /// Coarse category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::E100_UnexpectedToken(..)
            | ErrorCode::E101_InvalidValue(_)
            | ErrorCode::E110_TrailingContent(_)
            | ErrorCode::E112_ControlCharacter(..)
            | ErrorCode::E113_TrailingComma(_) => ErrorCategory::Syntax,
            ErrorCode::E102_UnterminatedString(_) => ErrorCategory::UnterminatedString,
            ErrorCode::E103_InvalidHexDigit(_)
            | ErrorCode::E104_UnpairedHighSurrogate(..)
            | ErrorCode::E105_UnexpectedLowSurrogate(..)
            | ErrorCode::E106_UnknownEscape(..) => ErrorCategory::InvalidEscape,
            ErrorCode::E107_InvalidNumber(_) => ErrorCategory::InvalidNumber,
            ErrorCode::E108_InvalidLiteral(_) => ErrorCategory::InvalidLiteral,
            ErrorCode::E109_InvalidTopLevel(_) => ErrorCategory::InvalidTopLevel,
            ErrorCode::E111_InvalidUtf8(_) => ErrorCategory::Encoding,
            ErrorCode::E120_InputTooLarge(..)
            | ErrorCode::E121_NestingTooDeep(..)
            | ErrorCode::E122_StringTooLong(..)
            | ErrorCode::E123_TooManyFields(..)
            | ErrorCode::E124_ArrayTooLong(..) => ErrorCategory::Limit,
            ErrorCode::E200_TypeMismatch(..) => ErrorCategory::TypeMismatch,
        }
    }
}

/// Result type for parsing and typed access.
pub type JsonResult<T> = Result<T, ErrorCode>;
