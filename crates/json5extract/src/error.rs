use std::{io, path::PathBuf};

use thiserror::Error;

use crate::value::Kind;

/// A candidate matched a value-start character but violated the JSON5
/// grammar.
///
/// Syntax errors never reach the caller of a scan: the scanner drops the
/// candidate and keeps going. They are exposed for diagnostics and logging.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    #[error("invalid hexadecimal digit '{0}' in escape sequence")]
    InvalidHexEscape(char),
    #[error("octal escape '\\{0}' is not allowed")]
    OctalEscape(char),
    #[error("unescaped line terminator in string")]
    UnescapedLineTerminator,
    #[error("expected '{expected}' but found '{found}'")]
    UnexpectedLiteralChar { expected: char, found: char },
    #[error("number has more than one decimal point")]
    DoubleDecimalPoint,
    #[error("number has more than one exponent")]
    DoubleExponent,
    #[error("exponent has no digits")]
    EmptyExponent,
    #[error("hexadecimal number has no digits")]
    EmptyHex,
    #[error("number literal '{0}' is out of range")]
    NumberOutOfRange(String),
    #[error("'{0}' is a reserved word")]
    ReservedWord(String),
    #[error("missing ',' between values")]
    MissingSeparator,
    #[error("unexpected ','")]
    UnexpectedSeparator,
    #[error("invalid comment")]
    InvalidComment,
    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

/// A [`SyntaxError`] with the position at which it was detected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{source} at {line}:{column}")]
pub struct ParseError {
    pub source: SyntaxError,
    pub line: usize,
    pub column: usize,
}

/// Misuse of the cursor's single-slot pushback.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    #[error("no character to unread")]
    NothingToUnread,
}

/// A fatal error that aborts a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("read fault at {line}:{column}: {source}")]
    Read {
        source: io::Error,
        line: usize,
        column: usize,
    },
    #[error("cannot open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Cursor(#[from] CursorError),
}

/// A payload accessor was called on a value of another kind.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("expected a value of kind {expected}, found {found}")]
pub struct KindError {
    pub expected: Kind,
    pub found: Kind,
}

/// Why a sub-parser gave up on a candidate.
#[derive(Debug)]
pub(crate) enum Failure {
    Syntax(SyntaxError),
    Read(io::Error),
    Cursor(CursorError),
}

impl From<SyntaxError> for Failure {
    fn from(err: SyntaxError) -> Self {
        Failure::Syntax(err)
    }
}

impl From<io::Error> for Failure {
    fn from(err: io::Error) -> Self {
        Failure::Read(err)
    }
}

impl From<CursorError> for Failure {
    fn from(err: CursorError) -> Self {
        Failure::Cursor(err)
    }
}

pub(crate) type PResult<T> = Result<T, Failure>;
