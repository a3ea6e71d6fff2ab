//! Object member names: quoted strings or ECMAScript identifier names.

use super::{Parser, is_insignificant, unescape};
use crate::{
    cursor::CharSource,
    error::{PResult, SyntaxError},
};

/// ECMAScript 5.1 reserved and future-reserved words, sorted for binary
/// search. None of them may be used as an unquoted key.
static RESERVED_WORDS: &[&str] = &[
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "new",
    "return",
    "super",
    "switch",
    "this",
    "throw",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
];

fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.binary_search(&name).is_ok()
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '$' || c == '_'
}

fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_alphanumeric()
}

/// A parsed object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Key {
    /// Decoded member name.
    pub(super) name: String,
    /// Source text of the key token.
    pub(super) raw: String,
}

impl<S: CharSource> Parser<S> {
    /// Parses a key starting at `first` and consumes its terminating `:`.
    pub(super) fn parse_key(&mut self, first: char) -> PResult<Key> {
        if matches!(first, '"' | '\'') {
            let raw = self.scan_string(first)?;
            self.expect_colon()?;
            return Ok(Key {
                name: unescape(&raw),
                raw,
            });
        }

        let mut raw = String::new();
        let start = self.identifier_char(first, &mut raw)?;
        if !is_identifier_start(start) {
            return Err(SyntaxError::InvalidCharacter(start).into());
        }
        let mut name = String::from(start);

        loop {
            match self.next_or_eof()? {
                ':' => break,
                '/' => {
                    self.skip_comment()?;
                    self.expect_colon()?;
                    break;
                }
                c if is_insignificant(c) => {
                    self.expect_colon()?;
                    break;
                }
                c => {
                    let part = self.identifier_char(c, &mut raw)?;
                    if !is_identifier_part(part) {
                        return Err(SyntaxError::InvalidCharacter(part).into());
                    }
                    name.push(part);
                }
            }
        }

        if is_reserved(&name) {
            return Err(SyntaxError::ReservedWord(name).into());
        }
        Ok(Key { name, raw })
    }

    /// Appends `c` to `raw` and decodes it, expanding a `\uXXXX` escape.
    /// Escapes that do not form a scalar value decode to U+FFFD.
    fn identifier_char(&mut self, c: char, raw: &mut String) -> PResult<char> {
        raw.push(c);
        if c != '\\' {
            return Ok(c);
        }
        match self.next_or_eof()? {
            'u' => {
                raw.push('u');
                let unit = self.scan_hex_escape::<4>(raw)?;
                Ok(char::from_u32(unit).unwrap_or('\u{FFFD}'))
            }
            other => Err(SyntaxError::InvalidCharacter(other).into()),
        }
    }

    /// Skips insignificant characters and comments up to the `:` that ends a
    /// key.
    fn expect_colon(&mut self) -> PResult<()> {
        match self.next_significant()? {
            ':' => Ok(()),
            c => Err(SyntaxError::InvalidCharacter(c).into()),
        }
    }
}
