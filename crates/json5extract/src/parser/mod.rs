//! Recursive-descent parsing of a single candidate.
//!
//! The scanner hands [`Parser::parse_value`] a character it has already read.
//! The dispatcher routes it to the sub-parser for that kind of literal, which
//! pulls as many characters from the cursor as its grammar needs:
//!
//! - `"` / `'` → [`string`]
//! - ASCII digit, `+`, `-`, `.`, `I`, `N` → [`number`]
//! - `t` / `f` / `n` → keyword literals
//! - `[` / `{` → [`composite`], which recurses back into the dispatcher
//!
//! Any other character is not a value start and yields `Ok(None)` without
//! consuming input. Sub-parsers fail with [`Failure`]; nothing is retried here.
//! Recovery from a failed candidate belongs to the scanner.

mod comment;
mod composite;
mod identifier;
mod number;
mod string;

use crate::{
    cursor::{CharSource, Cursor},
    error::{Failure, PResult, SyntaxError},
    escape_buffer::HexEscapeBuffer,
    literal_buffer::{ExpectedLiteralBuffer, Literal, Step},
    options::ScanOptions,
    value::{Payload, Value},
};

pub(crate) use string::unescape;

/// Characters skipped between tokens of arrays and objects.
pub(crate) fn is_insignificant(c: char) -> bool {
    c.is_whitespace() || c.is_control() || c == '\u{FEFF}'
}

#[derive(Debug)]
pub(crate) struct Parser<S> {
    pub(crate) cursor: Cursor<S>,
    max_depth: usize,
    depth: usize,
}

impl<S: CharSource> Parser<S> {
    pub(crate) fn new(cursor: Cursor<S>, options: &ScanOptions) -> Self {
        Self {
            cursor,
            max_depth: options.max_depth,
            depth: 0,
        }
    }

    /// Routes `first` to the matching sub-parser.
    pub(crate) fn parse_value(&mut self, first: char) -> PResult<Option<Value>> {
        let value = match first {
            '"' | '\'' => self.parse_string(first)?,
            '0'..='9' | '+' | '-' | '.' | 'I' | 'N' => self.parse_number(first)?,
            't' | 'f' | 'n' => self.parse_keyword(first)?,
            '[' => self.nested(Self::parse_array)?,
            '{' => self.nested(Self::parse_object)?,
            _ => return Ok(None),
        };
        Ok(Some(value))
    }

    fn parse_keyword(&mut self, first: char) -> PResult<Value> {
        let literal = self.match_literal(first)?;
        let payload = match literal {
            Literal::True => Payload::Boolean(true),
            Literal::False => Payload::Boolean(false),
            Literal::Null => Payload::Null,
            Literal::Infinity | Literal::NaN => {
                return Err(SyntaxError::InvalidCharacter(first).into());
            }
        };
        Ok(Value::new(payload, literal.text().into()))
    }

    /// Matches the rest of the literal whose first character was `first`.
    fn match_literal(&mut self, first: char) -> PResult<Literal> {
        let mut expected =
            ExpectedLiteralBuffer::new(first).ok_or(SyntaxError::InvalidCharacter(first))?;
        loop {
            let c = self.next_or_eof()?;
            match expected.step(c) {
                Step::NeedMore => {}
                Step::Done(literal) => return Ok(literal),
                Step::Reject(expected) => {
                    return Err(SyntaxError::UnexpectedLiteralChar { expected, found: c }.into());
                }
            }
        }
    }

    /// Runs a composite sub-parser one nesting level deeper.
    fn nested(&mut self, parse: fn(&mut Self) -> PResult<Value>) -> PResult<Value> {
        if self.depth >= self.max_depth {
            return Err(SyntaxError::DepthLimitExceeded(self.max_depth).into());
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Consumes the `N` hex digits of a `\x`/`\u` escape, copying them into
    /// `raw`, and returns the decoded code unit.
    fn scan_hex_escape<const N: usize>(&mut self, raw: &mut String) -> PResult<u32> {
        let mut digits = HexEscapeBuffer::<N>::new();
        loop {
            let c = self.next_or_eof()?;
            raw.push(c);
            match digits.feed(c) {
                Ok(Some(unit)) => return Ok(unit),
                Ok(None) => {}
                Err(c) => return Err(SyntaxError::InvalidHexEscape(c).into()),
            }
        }
    }

    /// Reads past whitespace, control characters and comments, returning the
    /// next significant character.
    fn next_significant(&mut self) -> PResult<char> {
        loop {
            match self.next_or_eof()? {
                '/' => self.skip_comment()?,
                c if is_insignificant(c) => {}
                c => return Ok(c),
            }
        }
    }

    fn next_char(&mut self) -> PResult<Option<char>> {
        Ok(self.cursor.read_char()?)
    }

    fn next_or_eof(&mut self) -> PResult<char> {
        self.next_char()?
            .ok_or(Failure::Syntax(SyntaxError::UnexpectedEndOfInput))
    }

    fn unread(&mut self) -> PResult<()> {
        Ok(self.cursor.unread()?)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::cursor::StrSource;

    /// Parses the candidate at the start of `text` and returns it with the
    /// unconsumed remainder.
    pub(crate) fn parse_candidate(text: &str) -> (Result<Option<Value>, SyntaxError>, String) {
        parse_candidate_with(text, &ScanOptions::default())
    }

    pub(crate) fn parse_candidate_with(
        text: &str,
        options: &ScanOptions,
    ) -> (Result<Option<Value>, SyntaxError>, String) {
        let mut parser = Parser::new(Cursor::new(StrSource::new(text)), options);
        let result = match parser.cursor.read_char().unwrap() {
            Some(first) => parser.parse_value(first),
            None => Ok(None),
        };
        let result = result.map_err(|failure| match failure {
            Failure::Syntax(err) => err,
            other => panic!("unexpected failure: {other:?}"),
        });
        let mut rest = String::new();
        while let Some(c) = parser.cursor.read_char().unwrap() {
            rest.push(c);
        }
        (result, rest)
    }

    pub(crate) fn parse_ok(text: &str) -> Value {
        match parse_candidate(text) {
            (Ok(Some(value)), _) => value,
            (other, _) => panic!("{text:?} did not parse: {other:?}"),
        }
    }

    pub(crate) fn parse_err(text: &str) -> SyntaxError {
        match parse_candidate(text) {
            (Err(err), _) => err,
            (other, _) => panic!("{text:?} unexpectedly parsed: {other:?}"),
        }
    }
}
