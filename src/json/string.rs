//! String literal decoding.
//!
//! Unescaped runs are copied straight from the input, which is already known
//! to be UTF-8. Escapes are decoded to a `char` and re-encoded as UTF-8;
//! `\uXXXX` escapes are UTF-16 code units, so a high surrogate must be
//! followed immediately by a `\u` low surrogate and the pair combines into a
//! single scalar value above U+FFFF.

use super::scanner::Scanner;
use crate::error::{ErrorCode, JsonResult};

const HIGH_SURROGATES: std::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;
const LOW_SURROGATES: std::ops::RangeInclusive<u16> = 0xDC00..=0xDFFF;

impl Scanner<'_> {
    /// Read a quoted string, returning its decoded contents.
    pub fn read_string(&mut self) -> JsonResult<String> {
        self.expect(b'"')?;

        let mut result = String::new();
        let mut run_start = self.pos;

        loop {
            match self.current() {
                None => return Err(ErrorCode::E102_UnterminatedString(self.input.len())),
                Some(b'"') => {
                    result.push_str(&self.input[run_start..self.pos]);
                    self.pos += 1;
                    return Ok(result);
                }
                Some(b'\\') => {
                    result.push_str(&self.input[run_start..self.pos]);
                    let ch = self.read_escape_sequence()?;
                    result.push(ch);
                    run_start = self.pos;
                }
                Some(b) if b < 0x20 => {
                    return Err(ErrorCode::E112_ControlCharacter(b, self.pos));
                }
                Some(_) => self.pos += 1,
            }

            let decoded_len = (result.len() + self.pos - run_start) as u64;
            if decoded_len > self.limits.max_string_length {
                return Err(ErrorCode::E122_StringTooLong(
                    self.limits.max_string_length,
                    self.pos,
                ));
            }
        }
    }

    /// Decode the escape sequence starting at the backslash under the cursor.
    fn read_escape_sequence(&mut self) -> JsonResult<char> {
        let start = self.pos;
        self.pos += 1;

        match self.advance() {
            None => Err(ErrorCode::E102_UnterminatedString(self.input.len())),
            Some(b'"') => Ok('"'),
            Some(b'\\') => Ok('\\'),
            Some(b'/') => Ok('/'),
            Some(b'b') => Ok('\x08'),
            Some(b'f') => Ok('\x0C'),
            Some(b'n') => Ok('\n'),
            Some(b'r') => Ok('\r'),
            Some(b't') => Ok('\t'),
            Some(b'u') => self.read_unicode_escape(start),
            Some(_) => {
                // the escaped character may be multi-byte
                self.pos -= 1;
                let ch = self.input[self.pos..]
                    .chars()
                    .next()
                    .ok_or(ErrorCode::E102_UnterminatedString(self.input.len()))?;
                if !self.limits.lenient_escapes {
                    return Err(ErrorCode::E106_UnknownEscape(ch, start));
                }
                self.pos += ch.len_utf8();
                Ok(ch)
            }
        }
    }

    /// Decode the code unit(s) of a `\u` escape; `start` is its backslash.
    fn read_unicode_escape(&mut self, start: usize) -> JsonResult<char> {
        let unit = self.read_hex4()?;

        if HIGH_SURROGATES.contains(&unit) {
            if !self.input[self.pos..].starts_with("\\u") {
                return Err(ErrorCode::E104_UnpairedHighSurrogate(unit, start));
            }
            self.pos += 2;
            let low = self.read_hex4()?;
            if !LOW_SURROGATES.contains(&low) {
                return Err(ErrorCode::E104_UnpairedHighSurrogate(unit, start));
            }
            let scalar = combine_surrogates(unit, low);
            return char::from_u32(scalar).ok_or(ErrorCode::E104_UnpairedHighSurrogate(unit, start));
        }

        if LOW_SURROGATES.contains(&unit) {
            return Err(ErrorCode::E105_UnexpectedLowSurrogate(unit, start));
        }

        // every non-surrogate BMP code unit is a scalar value
        char::from_u32(u32::from(unit)).ok_or(ErrorCode::E105_UnexpectedLowSurrogate(unit, start))
    }

    /// Read exactly four hex digits.
    fn read_hex4(&mut self) -> JsonResult<u16> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let b = self
                .current()
                .ok_or(ErrorCode::E102_UnterminatedString(self.input.len()))?;
            let digit = char::from(b)
                .to_digit(16)
                .ok_or(ErrorCode::E103_InvalidHexDigit(self.pos))?;
            value = (value << 4) | digit as u16;
            self.pos += 1;
        }
        Ok(value)
    }
}

/// Combine a UTF-16 surrogate pair into a scalar value in U+10000..=U+10FFFF.
fn combine_surrogates(high: u16, low: u16) -> u32 {
    0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
}
