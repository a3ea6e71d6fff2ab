use super::Parser;
use crate::{
    cursor::CharSource,
    error::{PResult, SyntaxError},
};

impl<S: CharSource> Parser<S> {
    /// Skips a comment whose leading `/` has already been consumed.
    ///
    /// Line comments end at `\n`, `\r`, U+2028 or U+2029; the terminator is
    /// consumed with the comment. End of input inside either form fails.
    pub(super) fn skip_comment(&mut self) -> PResult<()> {
        match self.next_or_eof()? {
            '/' => loop {
                if matches!(self.next_or_eof()?, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
                    return Ok(());
                }
            },
            '*' => {
                let mut star = false;
                loop {
                    match self.next_or_eof()? {
                        '/' if star => return Ok(()),
                        c => star = c == '*',
                    }
                }
            }
            _ => Err(SyntaxError::InvalidComment.into()),
        }
    }
}
