//! Cursor: single-character reader with one-slot pushback.
//!
//! Every sub-parser consumes input exclusively through [`Cursor`]. The cursor
//! pulls Unicode scalar values from a [`CharSource`], tracks `line`/`column`,
//! and can hand back exactly the most recently read character.
//!
//! Sources
//! - [`StrSource`] walks a `&str`.
//! - [`ByteSource`] decodes a byte slice lossily: every invalid UTF-8 sequence
//!   becomes U+FFFD.
//! - [`ReadSource`] decodes any [`BufRead`] the same way, including sequences
//!   split across buffer refills.
//!
//! Candidate journal
//! - When rewinding recovery is enabled the scanner opens a journal at each
//!   candidate. Abandoning the candidate queues every character read after its
//!   first one for replay, so scanning resumes at start + 1.
use std::{
    collections::VecDeque,
    io::{self, BufRead},
    str::Chars,
};

use crate::error::CursorError;

const REPLACEMENT: char = '\u{FFFD}';

/// A stream of Unicode scalar values.
///
/// `Ok(None)` marks the end of input. Once a source has returned `Ok(None)` it
/// must keep doing so.
pub trait CharSource {
    /// Reads the next character.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the source faults.
    fn next_char(&mut self) -> io::Result<Option<char>>;
}

/// Characters of a string slice.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { chars: text.chars() }
    }
}

impl CharSource for StrSource<'_> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Lossily decoded characters of a byte slice.
#[derive(Debug, Clone)]
pub struct ByteSource<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteSource<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }
}

impl CharSource for ByteSource<'_> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        if self.bytes.is_empty() {
            return Ok(None);
        }
        let (ch, size) = bstr::decode_utf8(self.bytes);
        self.bytes = &self.bytes[size..];
        Ok(Some(ch.unwrap_or(REPLACEMENT)))
    }
}

/// Lossily decoded characters of a buffered reader.
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: R,
}

impl<R: BufRead> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Length of the UTF-8 sequence introduced by `lead`, or `None` if `lead`
/// cannot start one.
fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

impl<R: BufRead> CharSource for ReadSource<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        // Bytes of an incomplete sequence already consumed from the reader.
        let mut carry = [0u8; 4];
        let mut carried = 0;

        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };

            if buf.is_empty() {
                return Ok((carried > 0).then_some(REPLACEMENT));
            }

            let take = (carry.len() - carried).min(buf.len());
            carry[carried..carried + take].copy_from_slice(&buf[..take]);
            let available = carried + take;

            let (ch, size) = bstr::decode_utf8(&carry[..available]);
            if let Some(ch) = ch {
                self.reader.consume(size - carried);
                return Ok(Some(ch));
            }

            let incomplete = size == available
                && sequence_len(carry[0]).is_some_and(|len| available < len);
            if incomplete {
                self.reader.consume(take);
                carried = available;
                continue;
            }

            self.reader.consume(size.saturating_sub(carried));
            return Ok(Some(REPLACEMENT));
        }
    }
}

/// Position of the next character to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Characters consumed so far.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Position {
    fn advance(&mut self, ch: char) {
        self.offset += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

/// A character read from the source, with the position it was read at.
#[derive(Debug, Clone, Copy)]
struct Read {
    ch: char,
    at: Position,
}

/// Single-character-lookahead reader with one-slot pushback.
#[derive(Debug)]
pub struct Cursor<S> {
    source: S,
    position: Position,
    /// Most recently read character, while it may still be unread.
    last: Option<Read>,
    /// Character handed back by `unread`, served before anything else.
    pushed_back: Option<Read>,
    /// Characters of an abandoned candidate waiting to be read again.
    replay: VecDeque<Read>,
    /// Characters read since the current candidate began.
    journal: Option<Vec<Read>>,
}

impl<S: CharSource> Cursor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            position: Position::default(),
            last: None,
            pushed_back: None,
            replay: VecDeque::new(),
            journal: None,
        }
    }

    /// Reads the next character. `Ok(None)` is the end of input.
    ///
    /// # Errors
    ///
    /// Propagates read faults of the underlying source.
    pub fn read_char(&mut self) -> io::Result<Option<char>> {
        let read = if let Some(read) = self.pushed_back.take() {
            read
        } else if let Some(read) = self.replay.pop_front() {
            read
        } else {
            match self.source.next_char()? {
                Some(ch) => Read {
                    ch,
                    at: self.position,
                },
                None => {
                    self.last = None;
                    return Ok(None);
                }
            }
        };

        self.position = read.at;
        self.position.advance(read.ch);
        self.last = Some(read);
        if let Some(journal) = &mut self.journal {
            journal.push(read);
        }
        Ok(Some(read.ch))
    }

    /// Hands back the most recently read character so the next
    /// [`read_char`](Self::read_char) returns it again.
    ///
    /// # Errors
    ///
    /// [`CursorError::NothingToUnread`] if nothing was read since the last
    /// unread, or the last read hit the end of input.
    pub fn unread(&mut self) -> Result<(), CursorError> {
        let read = self.last.take().ok_or(CursorError::NothingToUnread)?;
        self.position = read.at;
        if let Some(journal) = &mut self.journal {
            journal.pop();
        }
        self.pushed_back = Some(read);
        Ok(())
    }

    #[must_use]
    pub fn can_unread(&self) -> bool {
        self.last.is_some()
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Starts journaling a candidate whose first character was just read.
    pub(crate) fn begin_candidate(&mut self) {
        self.journal = Some(self.last.into_iter().collect());
    }

    pub(crate) fn commit_candidate(&mut self) {
        self.journal = None;
    }

    /// Queues everything read after the candidate's first character for
    /// replay.
    pub(crate) fn abandon_candidate(&mut self) {
        let Some(journal) = self.journal.take() else {
            return;
        };
        let first_was_unread = journal.is_empty();
        let mut tail: VecDeque<Read> = journal.into_iter().skip(1).collect();
        if let Some(read) = self.pushed_back.take() {
            if first_was_unread {
                self.position = read.at;
                self.position.advance(read.ch);
            } else {
                tail.push_back(read);
            }
        }
        if let Some(first) = tail.front() {
            self.position = first.at;
        }
        tail.extend(self.replay.drain(..));
        self.replay = tail;
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Cursor as IoCursor};

    use rstest::rstest;

    use super::*;

    fn drain<S: CharSource>(mut source: S) -> String {
        let mut out = String::new();
        while let Some(ch) = source.next_char().unwrap() {
            out.push(ch);
        }
        out
    }

    #[test]
    fn unread_returns_the_last_character_once() {
        let mut cursor = Cursor::new(StrSource::new("ab"));
        assert_eq!(cursor.read_char().unwrap(), Some('a'));
        cursor.unread().unwrap();
        assert_eq!(cursor.unread(), Err(CursorError::NothingToUnread));
        assert_eq!(cursor.read_char().unwrap(), Some('a'));
        assert_eq!(cursor.read_char().unwrap(), Some('b'));
        assert_eq!(cursor.read_char().unwrap(), None);
        assert_eq!(cursor.read_char().unwrap(), None);
        assert_eq!(cursor.unread(), Err(CursorError::NothingToUnread));
    }

    #[test]
    fn unread_before_any_read_fails() {
        let mut cursor = Cursor::new(StrSource::new("x"));
        assert!(!cursor.can_unread());
        assert_eq!(cursor.unread(), Err(CursorError::NothingToUnread));
    }

    #[test]
    fn tracks_lines_and_columns_through_unread() {
        let mut cursor = Cursor::new(StrSource::new("a\nb"));
        cursor.read_char().unwrap();
        cursor.read_char().unwrap();
        assert_eq!(
            cursor.position(),
            Position {
                offset: 2,
                line: 2,
                column: 1
            }
        );
        cursor.unread().unwrap();
        assert_eq!(
            cursor.position(),
            Position {
                offset: 1,
                line: 1,
                column: 2
            }
        );
    }

    #[test]
    fn abandoned_candidate_replays_from_second_character() {
        let mut cursor = Cursor::new(StrSource::new("[1,,2]"));
        assert_eq!(cursor.read_char().unwrap(), Some('['));
        cursor.begin_candidate();
        for _ in 0..3 {
            cursor.read_char().unwrap();
        }
        cursor.unread().unwrap();
        cursor.abandon_candidate();
        assert_eq!(cursor.position().offset, 1);

        let mut rest = String::new();
        while let Some(ch) = cursor.read_char().unwrap() {
            rest.push(ch);
        }
        assert_eq!(rest, "1,,2]");
    }

    #[test]
    fn committed_candidate_is_not_replayed() {
        let mut cursor = Cursor::new(StrSource::new("ab"));
        cursor.read_char().unwrap();
        cursor.begin_candidate();
        cursor.read_char().unwrap();
        cursor.commit_candidate();
        cursor.abandon_candidate();
        assert_eq!(cursor.read_char().unwrap(), None);
    }

    #[rstest]
    #[case(b"plain", "plain")]
    #[case(b"caf\xC3\xA9", "caf\u{e9}")]
    #[case(b"a\xFFb", "a\u{FFFD}b")]
    #[case(b"\xE2\x82", "\u{FFFD}")]
    #[case(b"\xE2\x82x", "\u{FFFD}x")]
    #[case(b"\xF0\x9F\x98\x80!", "\u{1F600}!")]
    fn byte_sources_decode_lossily(#[case] input: &[u8], #[case] expected: &str) {
        assert_eq!(drain(ByteSource::new(input)), expected);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(64)]
    fn read_sources_survive_split_sequences(#[case] capacity: usize) {
        let mut input = "\u{1F600} caf\u{e9} \u{2028}".as_bytes().to_vec();
        input.extend_from_slice(b"\xFF\xE2\x82");
        let reader = BufReader::with_capacity(capacity, IoCursor::new(input.clone()));
        assert_eq!(drain(ReadSource::new(reader)), drain(ByteSource::new(&input)));
    }
}
