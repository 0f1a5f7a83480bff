//! Recursive descent JSON parser.
//!
//! One function per grammar production, all threading the same
//! [`Scanner`] cursor. Nesting depth is counted explicitly and checked
//! against [`Limits::nesting_limit`], so hostile input fails with
//! E121_NestingTooDeep instead of exhausting the stack.
//!
//! Structural rules enforced here:
//!
//! - E100: mandatory `{ } [ ] : ,` or opening quote missing
//! - E101: no value starts at the lookahead
//! - E109: scalar root when `containers_only_at_root` is set
//! - E110: anything but whitespace after the root value
//! - E113: trailing comma in an array or object
//! - E123/E124: object field and array element limits

use std::collections::BTreeMap;

use super::limits::Limits;
use super::scanner::Scanner;
use super::types::JsonValue;
use crate::error::{ErrorCode, JsonResult};

/// Single-use JSON parser.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    depth: u64,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input.
    pub fn new(input: &'a [u8], limits: Limits) -> JsonResult<Self> {
        Ok(Self {
            scanner: Scanner::new(input, limits)?,
            depth: 0,
        })
    }

    /// Parse the whole input into one value, consuming the parser.
    pub fn parse(mut self) -> JsonResult<JsonValue> {
        if self.scanner.limits.containers_only_at_root {
            match self.scanner.peek() {
                Some(b'{' | b'[') => {}
                _ => return Err(ErrorCode::E109_InvalidTopLevel(self.scanner.position())),
            }
        }

        let value = self.parse_value()?;

        // Ensure no trailing content
        if self.scanner.peek().is_some() {
            return Err(ErrorCode::E110_TrailingContent(self.scanner.position()));
        }

        Ok(value)
    }

    /// Parse a single JSON value.
    fn parse_value(&mut self) -> JsonResult<JsonValue> {
        match self.scanner.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => self.scanner.read_string().map(JsonValue::String),
            Some(b'-' | b'0'..=b'9') => self.scanner.read_number().map(JsonValue::Number),
            Some(b't') => self.parse_literal("true", JsonValue::Bool(true)),
            Some(b'f') => self.parse_literal("false", JsonValue::Bool(false)),
            Some(b'n') => self.parse_literal("null", JsonValue::Null),
            _ => Err(ErrorCode::E101_InvalidValue(self.scanner.position())),
        }
    }

    fn parse_literal(&mut self, text: &str, value: JsonValue) -> JsonResult<JsonValue> {
        self.scanner.read_literal(text)?;
        Ok(value)
    }

    /// Check nesting depth (E121) before entering a container.
    ///
    /// The configured depth is capped at [`super::limits::MAX_SUPPORTED_DEPTH`].
    fn enter(&mut self) -> JsonResult<()> {
        let limit = self.scanner.limits.nesting_limit();
        self.depth += 1;
        if self.depth > limit {
            return Err(ErrorCode::E121_NestingTooDeep(limit, self.scanner.position()));
        }
        Ok(())
    }

    /// Parse a JSON object.
    fn parse_object(&mut self) -> JsonResult<JsonValue> {
        self.enter()?;
        self.scanner.expect(b'{')?;

        let mut map = BTreeMap::new();

        // Empty object
        if self.scanner.consume(b'}') {
            self.depth -= 1;
            return Ok(JsonValue::Object(map));
        }

        loop {
            let key = self.scanner.read_string()?;
            self.scanner.expect(b':')?;
            let value = self.parse_value()?;

            // Last write wins on duplicate keys
            map.insert(key, value);

            if map.len() as u64 > self.scanner.limits.max_object_fields {
                return Err(ErrorCode::E123_TooManyFields(
                    self.scanner.limits.max_object_fields,
                    self.scanner.position(),
                ));
            }

            if self.scanner.consume(b'}') {
                break;
            }
            self.scanner.expect(b',')?;

            if self.scanner.peek() == Some(b'}') {
                return Err(ErrorCode::E113_TrailingComma(self.scanner.position()));
            }
        }

        self.depth -= 1;
        Ok(JsonValue::Object(map))
    }

    /// Parse a JSON array.
    fn parse_array(&mut self) -> JsonResult<JsonValue> {
        self.enter()?;
        self.scanner.expect(b'[')?;

        let mut arr = Vec::new();

        // Empty array
        if self.scanner.consume(b']') {
            self.depth -= 1;
            return Ok(JsonValue::Array(arr));
        }

        loop {
            arr.push(self.parse_value()?);

            if arr.len() as u64 > self.scanner.limits.max_array_length {
                return Err(ErrorCode::E124_ArrayTooLong(
                    self.scanner.limits.max_array_length,
                    self.scanner.position(),
                ));
            }

            if self.scanner.consume(b']') {
                break;
            }
            self.scanner.expect(b',')?;

            if self.scanner.peek() == Some(b']') {
                return Err(ErrorCode::E113_TrailingComma(self.scanner.position()));
            }
        }

        self.depth -= 1;
        Ok(JsonValue::Array(arr))
    }
}

/// Parse JSON bytes with [`Limits::strict`].
pub fn parse(input: &[u8]) -> JsonResult<JsonValue> {
    parse_with_limits(input, Limits::strict())
}

/// Parse a JSON string with [`Limits::strict`].
pub fn parse_str(input: &str) -> JsonResult<JsonValue> {
    parse(input.as_bytes())
}

/// Parse JSON bytes with custom limits.
pub fn parse_with_limits(input: &[u8], limits: Limits) -> JsonResult<JsonValue> {
    Parser::new(input, limits)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::limits::MAX_SUPPORTED_DEPTH;

    fn parse_lenient(input: &str) -> JsonResult<JsonValue> {
        parse_with_limits(input.as_bytes(), Limits::lenient())
    }

    fn num(n: f64) -> JsonValue {
        JsonValue::Number(n)
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse_str("null"), Ok(JsonValue::Null));
        assert_eq!(parse_str("true"), Ok(JsonValue::Bool(true)));
        assert_eq!(parse_str("false"), Ok(JsonValue::Bool(false)));
        assert_eq!(parse_str("-12.5e1"), Ok(num(-125.0)));
        assert_eq!(parse_str(r#""hi""#), Ok(JsonValue::from("hi")));
    }

    #[test]
    fn test_parse_array() {
        assert_eq!(
            parse_str("[1, 2, 3]"),
            Ok(JsonValue::Array(vec![num(1.0), num(2.0), num(3.0)]))
        );
        assert_eq!(parse_str("[]"), Ok(JsonValue::Array(vec![])));
        assert_eq!(parse_str("[ ]"), Ok(JsonValue::Array(vec![])));
    }

    #[test]
    fn test_parse_object() {
        let result = parse_str(r#"{"a": 1, "b": 2}"#).unwrap();
        let mut expected = BTreeMap::new();
        expected.insert("a".to_string(), num(1.0));
        expected.insert("b".to_string(), num(2.0));
        assert_eq!(result, JsonValue::Object(expected));
        assert_eq!(parse_str("{ }"), Ok(JsonValue::Object(BTreeMap::new())));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let result = parse_str(r#"{"a":1,"a":2}"#).unwrap();
        assert_eq!(result.as_object().unwrap().len(), 1);
        assert_eq!(result.get("a"), Some(&num(2.0)));
    }

    #[test]
    fn test_nested_structure() {
        let result = parse_str(r#"{"arr": [1, {"nested": true}], "num": 42}"#).unwrap();
        assert!(result.is_object());
        let arr = result.get("arr").unwrap();
        assert!(arr.is_array());
        assert_eq!(
            arr.get_index(1).and_then(|v| v.get("nested")),
            Some(&JsonValue::Bool(true))
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_str(""), Err(ErrorCode::E101_InvalidValue(0)));
        assert_eq!(parse_str("   "), Err(ErrorCode::E101_InvalidValue(3)));
    }

    #[test]
    fn test_invalid_value_start() {
        assert_eq!(parse_str("[1, ?]"), Err(ErrorCode::E101_InvalidValue(4)));
        assert_eq!(parse_str("{\"a\": }"), Err(ErrorCode::E101_InvalidValue(6)));
    }

    #[test]
    fn test_missing_structural_tokens() {
        assert_eq!(
            parse_str(r#"{"a" 1}"#),
            Err(ErrorCode::E100_UnexpectedToken(':', 5))
        );
        assert_eq!(
            parse_str(r#"{"a": 1 "b": 2}"#),
            Err(ErrorCode::E100_UnexpectedToken(',', 8))
        );
        assert_eq!(parse_str("[1 2]"), Err(ErrorCode::E100_UnexpectedToken(',', 3)));
        assert_eq!(parse_str("{1: 2}"), Err(ErrorCode::E100_UnexpectedToken('"', 1)));
        assert_eq!(parse_str("[1, 2"), Err(ErrorCode::E100_UnexpectedToken(',', 5)));
    }

    #[test]
    fn test_trailing_comma_rejected() {
        assert_eq!(parse_str("[1,2,]"), Err(ErrorCode::E113_TrailingComma(5)));
        assert_eq!(parse_str(r#"{"a":1,}"#), Err(ErrorCode::E113_TrailingComma(7)));
        assert_eq!(parse_str("[1, ]"), Err(ErrorCode::E113_TrailingComma(4)));
    }

    #[test]
    fn test_trailing_content_rejected() {
        assert_eq!(parse_str("null extra"), Err(ErrorCode::E110_TrailingContent(5)));
        assert_eq!(parse_str("{} {}"), Err(ErrorCode::E110_TrailingContent(3)));
        assert_eq!(parse_str("[1] \n"), Ok(JsonValue::Array(vec![num(1.0)])));
    }

    #[test]
    fn test_invalid_literals() {
        assert_eq!(parse_str("tru"), Err(ErrorCode::E108_InvalidLiteral(3)));
        assert_eq!(parse_str("[nul]"), Err(ErrorCode::E108_InvalidLiteral(4)));
        assert_eq!(parse_str("fals e"), Err(ErrorCode::E108_InvalidLiteral(4)));
    }

    #[test]
    fn test_invalid_numbers() {
        assert_eq!(parse_str("[1.2.3]"), Err(ErrorCode::E107_InvalidNumber(1)));
        assert_eq!(parse_str("-"), Err(ErrorCode::E107_InvalidNumber(0)));
        assert_eq!(parse_str("[-]"), Err(ErrorCode::E107_InvalidNumber(1)));
    }

    #[test]
    fn test_nesting_depth_limit() {
        let mut limits = Limits::strict();
        limits.max_nesting_depth = 2;

        // Depth 2 is allowed
        assert!(parse_with_limits(b"[[1]]", limits).is_ok());
        assert!(parse_with_limits(br#"{"a": {"b": 1}}"#, limits).is_ok());

        // Depth 3 exceeds limit
        assert_eq!(
            parse_with_limits(b"[[[1]]]", limits),
            Err(ErrorCode::E121_NestingTooDeep(2, 2))
        );
    }

    #[test]
    fn test_configured_depth_is_capped() {
        let limits = Limits {
            max_input_size: u64::MAX,
            max_nesting_depth: u64::MAX,
            ..Limits::strict()
        };
        let input = "[".repeat(500_000) + &"]".repeat(500_000);
        assert_eq!(
            parse_with_limits(input.as_bytes(), limits),
            Err(ErrorCode::E121_NestingTooDeep(MAX_SUPPORTED_DEPTH, 1024))
        );

        // the cap itself is reachable
        let depth = MAX_SUPPORTED_DEPTH as usize;
        let input = "[".repeat(depth) + &"]".repeat(depth);
        assert!(parse_with_limits(input.as_bytes(), limits).is_ok());
    }

    #[test]
    fn test_depth_released_between_siblings() {
        let mut limits = Limits::strict();
        limits.max_nesting_depth = 2;
        assert!(parse_with_limits(b"[[1], [2], [3], {}]", limits).is_ok());
    }

    #[test]
    fn test_deep_nesting_fails_safely() {
        let input = "[".repeat(10_000) + &"]".repeat(10_000);
        assert!(matches!(
            parse_str(&input),
            Err(ErrorCode::E121_NestingTooDeep(128, 128))
        ));
    }

    #[test]
    fn test_object_field_limit() {
        let mut limits = Limits::lenient();
        limits.max_object_fields = 2;

        let result = parse_with_limits(br#"{"a": 1, "b": 2, "c": 3}"#, limits);
        assert!(matches!(result, Err(ErrorCode::E123_TooManyFields(2, _))));

        // repeated keys do not add fields
        assert!(parse_with_limits(br#"{"a": 1, "a": 2, "b": 3}"#, limits).is_ok());
    }

    #[test]
    fn test_array_length_limit() {
        let mut limits = Limits::lenient();
        limits.max_array_length = 2;

        let result = parse_with_limits(b"[1, 2, 3]", limits);
        assert!(matches!(result, Err(ErrorCode::E124_ArrayTooLong(2, _))));
    }

    #[test]
    fn test_containers_only_at_root() {
        let mut limits = Limits::strict();
        limits.containers_only_at_root = true;

        assert_eq!(
            parse_with_limits(b"  42", limits),
            Err(ErrorCode::E109_InvalidTopLevel(2))
        );
        assert_eq!(
            parse_with_limits(br#""s""#, limits),
            Err(ErrorCode::E109_InvalidTopLevel(0))
        );
        assert!(parse_with_limits(b"[42]", limits).is_ok());
        assert!(parse_with_limits(b"{}", limits).is_ok());

        // nested scalars are unaffected
        assert!(parse_with_limits(br#"{"k": "v"}"#, limits).is_ok());
    }

    #[test]
    fn test_lenient_escapes() {
        assert_eq!(
            parse_str(r#"["\x"]"#),
            Err(ErrorCode::E106_UnknownEscape('x', 2))
        );
        assert_eq!(
            parse_lenient(r#"["\x"]"#),
            Ok(JsonValue::Array(vec![JsonValue::from("x")]))
        );
    }

    #[test]
    fn test_string_errors_propagate() {
        assert_eq!(
            parse_str(r#"{"a": "b"#),
            Err(ErrorCode::E102_UnterminatedString(8))
        );
        assert_eq!(
            parse_str(r#"["\uDC00"]"#),
            Err(ErrorCode::E105_UnexpectedLowSurrogate(0xDC00, 2))
        );
    }
}
