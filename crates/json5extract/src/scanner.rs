//! Top-level scan loop.
//!
//! The scanner reads one character at a time and offers it to the dispatcher.
//! Characters that cannot start a value are skipped. A candidate that fails to
//! parse is dropped, logged at `debug` level, and scanning resumes according to
//! [`Recovery`]. Only read faults of the source end a scan with an error.
use std::{
    fs::File,
    io::{self, BufReader, Read},
    iter::FusedIterator,
    path::Path,
};

use tracing::{debug, trace, warn};

use crate::{
    cursor::{ByteSource, CharSource, Cursor, Position, ReadSource, StrSource},
    error::{CursorError, Failure, ParseError, ScanError, SyntaxError},
    options::{Recovery, ScanOptions},
    parser::Parser,
    value::Value,
};

/// Iterator over the values embedded in a character source.
///
/// Yields `Ok` for every extracted value in source order. A read fault is
/// yielded once as `Err`, after which the iterator is exhausted.
///
/// # Examples
///
/// ```
/// use json5extract::{Extractor, ScanOptions, StrSource};
///
/// let text = "retries: 3, hosts: ['a', 'b'] // done";
/// let raw: Vec<String> = Extractor::new(StrSource::new(text), ScanOptions::default())
///     .map(|value| value.unwrap().raw_text().to_owned())
///     .collect();
/// assert_eq!(raw, ["3", "['a','b']"]);
/// ```
#[derive(Debug)]
pub struct Extractor<S> {
    parser: Parser<S>,
    recovery: Recovery,
    done: bool,
}

impl<S: CharSource> Extractor<S> {
    pub fn new(source: S, options: ScanOptions) -> Self {
        Self {
            parser: Parser::new(Cursor::new(source), &options),
            recovery: options.recovery,
            done: false,
        }
    }

    /// Position of the next character to be scanned.
    #[must_use]
    pub fn position(&self) -> Position {
        self.parser.cursor.position()
    }

    fn next_value(&mut self) -> Result<Option<Value>, ScanError> {
        loop {
            let start = self.parser.cursor.position();
            let first = match self.parser.cursor.read_char() {
                Ok(Some(c)) => c,
                Ok(None) => return Ok(None),
                Err(source) => return Err(self.read_fault(source)),
            };
            if self.recovery == Recovery::Rewind {
                self.parser.cursor.begin_candidate();
            }

            match self.parser.parse_value(first) {
                Ok(Some(value)) => {
                    self.parser.cursor.commit_candidate();
                    trace!(
                        line = start.line,
                        column = start.column,
                        kind = %value.kind(),
                        "extracted value"
                    );
                    return Ok(Some(value));
                }
                Ok(None) => self.parser.cursor.commit_candidate(),
                Err(Failure::Syntax(source)) => {
                    let at = self.parser.cursor.position();
                    let err = ParseError {
                        source,
                        line: at.line,
                        column: at.column,
                    };
                    debug!(
                        line = start.line,
                        column = start.column,
                        recovery = ?self.recovery,
                        "dropped malformed candidate: {err}"
                    );
                    self.recover(start, &err.source)?;
                }
                Err(Failure::Read(source)) => return Err(self.read_fault(source)),
                Err(Failure::Cursor(err)) => return Err(err.into()),
            }
        }
    }

    /// Decides where scanning resumes after the candidate that began at
    /// `start` failed with `err`.
    fn recover(&mut self, start: Position, err: &SyntaxError) -> Result<(), CursorError> {
        let cursor = &mut self.parser.cursor;
        match self.recovery {
            Recovery::Rewind => cursor.abandon_candidate(),
            // The character that broke the candidate may begin the next one.
            // The candidate's own first character is never handed back.
            Recovery::Forward => {
                if *err != SyntaxError::UnexpectedEndOfInput
                    && cursor.position().offset > start.offset + 1
                    && cursor.can_unread()
                {
                    cursor.unread()?;
                }
            }
        }
        Ok(())
    }

    fn read_fault(&self, source: io::Error) -> ScanError {
        let at = self.parser.cursor.position();
        ScanError::Read {
            source,
            line: at.line,
            column: at.column,
        }
    }
}

impl<S: CharSource> Iterator for Extractor<S> {
    type Item = Result<Value, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_value() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                warn!("scan aborted: {err}");
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<S: CharSource> FusedIterator for Extractor<S> {}

/// Extracts every value from `source` with default options.
///
/// # Errors
///
/// Returns [`ScanError`] if the source faults; malformed candidates are
/// skipped, never reported.
pub fn scan<S: CharSource>(source: S) -> Result<Vec<Value>, ScanError> {
    scan_with(source, ScanOptions::default())
}

/// Extracts every value from `source`.
///
/// # Errors
///
/// See [`scan`].
pub fn scan_with<S: CharSource>(source: S, options: ScanOptions) -> Result<Vec<Value>, ScanError> {
    Extractor::new(source, options).collect()
}

/// Extracts every value from a string.
///
/// # Errors
///
/// Only [`ScanError::Cursor`], which indicates a bug; a string never faults.
pub fn scan_str(text: &str) -> Result<Vec<Value>, ScanError> {
    scan_str_with(text, ScanOptions::default())
}

/// Extracts every value from a string.
///
/// # Errors
///
/// See [`scan_str`].
pub fn scan_str_with(text: &str, options: ScanOptions) -> Result<Vec<Value>, ScanError> {
    scan_with(StrSource::new(text), options)
}

/// Extracts every value from a byte buffer, decoding it as lossy UTF-8.
///
/// # Errors
///
/// See [`scan_str`].
pub fn scan_bytes(bytes: &[u8]) -> Result<Vec<Value>, ScanError> {
    scan_bytes_with(bytes, ScanOptions::default())
}

/// Extracts every value from a byte buffer, decoding it as lossy UTF-8.
///
/// # Errors
///
/// See [`scan_str`].
pub fn scan_bytes_with(bytes: &[u8], options: ScanOptions) -> Result<Vec<Value>, ScanError> {
    scan_with(ByteSource::new(bytes), options)
}

/// Extracts every value from a reader, decoding it as lossy UTF-8.
///
/// # Errors
///
/// [`ScanError::Read`] if the reader faults.
pub fn scan_reader<R: Read>(reader: R) -> Result<Vec<Value>, ScanError> {
    scan_reader_with(reader, ScanOptions::default())
}

/// Extracts every value from a reader, decoding it as lossy UTF-8.
///
/// # Errors
///
/// See [`scan_reader`].
pub fn scan_reader_with<R: Read>(reader: R, options: ScanOptions) -> Result<Vec<Value>, ScanError> {
    scan_with(ReadSource::new(BufReader::new(reader)), options)
}

/// Extracts every value from the file at `path`.
///
/// # Errors
///
/// [`ScanError::Open`] if the file cannot be opened, [`ScanError::Read`] if
/// reading it faults.
pub fn scan_path(path: impl AsRef<Path>) -> Result<Vec<Value>, ScanError> {
    scan_path_with(path, ScanOptions::default())
}

/// Extracts every value from the file at `path`.
///
/// # Errors
///
/// See [`scan_path`].
pub fn scan_path_with(
    path: impl AsRef<Path>,
    options: ScanOptions,
) -> Result<Vec<Value>, ScanError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ScanError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "scanning file");
    scan_reader_with(file, options)
}
