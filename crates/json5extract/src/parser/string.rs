//! Single- and double-quoted string literals.
//!
//! Scanning copies the literal into `raw` verbatim and only validates escapes.
//! Decoding is a second pass over `raw` in [`unescape`].
use std::str::Chars;

use super::Parser;
use crate::{
    cursor::CharSource,
    error::{PResult, SyntaxError},
    escape_buffer::decode_hex,
    value::{Payload, Value},
};

const REPLACEMENT: char = '\u{FFFD}';

impl<S: CharSource> Parser<S> {
    pub(super) fn parse_string(&mut self, quote: char) -> PResult<Value> {
        let raw = self.scan_string(quote)?;
        Ok(Value::new(Payload::String(unescape(&raw)), raw))
    }

    /// Scans the literal opened by `quote` and returns its raw text, quotes
    /// included.
    pub(super) fn scan_string(&mut self, quote: char) -> PResult<String> {
        let mut raw = String::new();
        raw.push(quote);
        loop {
            let c = self.next_or_eof()?;
            raw.push(c);
            match c {
                '\\' => self.scan_escape(&mut raw)?,
                '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                    return Err(SyntaxError::UnescapedLineTerminator.into());
                }
                c if c == quote => return Ok(raw),
                _ => {}
            }
        }
    }

    fn scan_escape(&mut self, raw: &mut String) -> PResult<()> {
        let c = self.next_or_eof()?;
        raw.push(c);
        match c {
            'u' => {
                self.scan_hex_escape::<4>(raw)?;
            }
            'x' => {
                self.scan_hex_escape::<2>(raw)?;
            }
            '1'..='9' => return Err(SyntaxError::OctalEscape(c).into()),
            // `\r\n` continues the line as a unit.
            '\r' => match self.next_char()? {
                Some('\n') => raw.push('\n'),
                Some(_) => self.unread()?,
                None => {}
            },
            _ => {}
        }
        Ok(())
    }
}

/// Decodes the raw text of a string literal produced by
/// [`Parser::scan_string`].
///
/// The first character is taken as the quote; decoding stops at the matching
/// closing quote.
pub(crate) fn unescape(raw: &str) -> String {
    let mut chars = raw.chars();
    let Some(quote) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(raw.len());
    while let Some(c) = chars.next() {
        if c == quote {
            break;
        }
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{C}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('v') => out.push('\u{B}'),
            Some('0') => out.push('\0'),
            Some('u') => out.push(decode_utf16_escape(&mut chars)),
            Some('x') => out.push(
                decode_hex::<2>(&mut chars)
                    .and_then(char::from_u32)
                    .unwrap_or(REPLACEMENT),
            ),
            Some('\r') => {
                if chars.clone().next() == Some('\n') {
                    chars.next();
                }
            }
            Some('\n' | '\u{2028}' | '\u{2029}') => {}
            Some(other) => out.push(other),
            None => break,
        }
    }
    out
}

/// Decodes the digits of a `\u` escape. A high surrogate directly followed by
/// a `\u` low surrogate combines into one scalar value; an unpaired surrogate
/// becomes U+FFFD.
fn decode_utf16_escape(chars: &mut Chars<'_>) -> char {
    let Some(unit) = decode_hex::<4>(chars) else {
        return REPLACEMENT;
    };
    if !(0xD800..=0xDBFF).contains(&unit) {
        return char::from_u32(unit).unwrap_or(REPLACEMENT);
    }

    let mut lookahead = chars.clone();
    if lookahead.next() != Some('\\') || lookahead.next() != Some('u') {
        return REPLACEMENT;
    }
    match decode_hex::<4>(&mut lookahead) {
        Some(low @ 0xDC00..=0xDFFF) => {
            *chars = lookahead;
            char::from_u32(0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00))
                .unwrap_or(REPLACEMENT)
        }
        _ => REPLACEMENT,
    }
}
