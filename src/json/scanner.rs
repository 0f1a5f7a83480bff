//! Cursor over the input text.
//!
//! The scanner owns the only mutable parsing state: a byte offset that only
//! ever moves forward. It provides the token-level primitives used by the
//! parser (whitespace, lookahead, mandatory tokens, keyword literals and
//! numbers); string literals live in [`super::string`].

use super::limits::Limits;
use crate::error::{ErrorCode, JsonResult};

/// Single-pass cursor over validated UTF-8 input.
pub struct Scanner<'a> {
    pub(super) input: &'a str,
    pub(super) pos: usize,
    pub(super) limits: Limits,
}

impl<'a> Scanner<'a> {
    /// Create a scanner, checking the input size and UTF-8 validity first.
    pub fn new(input: &'a [u8], limits: Limits) -> JsonResult<Self> {
        let size = input.len() as u64;
        if size > limits.max_input_size {
            return Err(ErrorCode::E120_InputTooLarge(size, limits.max_input_size));
        }

        let input = std::str::from_utf8(input)
            .map_err(|e| ErrorCode::E111_InvalidUtf8(e.valid_up_to()))?;

        Ok(Self {
            input,
            pos: 0,
            limits,
        })
    }

    /// Get the current position in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Current byte, whitespace included.
    pub(super) fn current(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Consume and return the current byte.
    pub(super) fn advance(&mut self) -> Option<u8> {
        let b = self.current();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    /// Skip space, tab, newline and carriage return.
    pub fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.current() {
            self.pos += 1;
        }
    }

    /// Skip whitespace and return the next byte without consuming it.
    pub fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.current()
    }

    /// Skip whitespace and consume `expected` if it is next.
    pub fn consume(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Like [`Scanner::consume`], but a mismatch is an error.
    pub fn expect(&mut self, expected: u8) -> JsonResult<()> {
        if self.consume(expected) {
            Ok(())
        } else {
            Err(ErrorCode::E100_UnexpectedToken(char::from(expected), self.pos))
        }
    }

    /// Match a keyword byte by byte.
    pub fn read_literal(&mut self, literal: &str) -> JsonResult<()> {
        for expected in literal.bytes() {
            if self.current() != Some(expected) {
                return Err(ErrorCode::E108_InvalidLiteral(self.pos));
            }
            self.pos += 1;
        }
        Ok(())
    }

    /// Read a number starting at the cursor.
    ///
    /// Scans an optional `-` followed by the longest run of digits, `.`,
    /// `e`, `E`, `+` and `-`, then converts the whole slice. Anything the
    /// conversion does not accept in full, and any infinite result, is
    /// reported at the offset where scanning began.
    pub fn read_number(&mut self) -> JsonResult<f64> {
        let start = self.pos;

        if self.current() == Some(b'-') {
            self.pos += 1;
        }
        while let Some(b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-') = self.current() {
            self.pos += 1;
        }

        match self.input[start..self.pos].parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ErrorCode::E107_InvalidNumber(start)),
        }
    }
}
