//! Arrays and objects.
//!
//! Both recurse into [`Parser::parse_value`] for their children and rebuild
//! `raw` from the children's raw text: comments, whitespace and a trailing
//! comma are not reproduced.

use super::Parser;
use crate::{
    cursor::CharSource,
    error::{PResult, SyntaxError},
    value::{Map, Payload, Value},
};

/// Where a composite parser stands relative to its `,` separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Separator {
    /// Right after the opening delimiter.
    Start,
    /// Right after a child value.
    AfterValue,
    /// Right after a `,`.
    AfterComma,
}

impl Separator {
    /// Handles `c` when it is a `,` or when a child may not start here.
    /// Returns `Ok(true)` if `c` was consumed as a separator.
    fn separate(&mut self, c: char) -> Result<bool, SyntaxError> {
        match (*self, c) {
            (Separator::AfterValue, ',') => {
                *self = Separator::AfterComma;
                Ok(true)
            }
            (Separator::Start | Separator::AfterComma, ',') => {
                Err(SyntaxError::UnexpectedSeparator)
            }
            (Separator::AfterValue, _) => Err(SyntaxError::MissingSeparator),
            (Separator::Start | Separator::AfterComma, _) => Ok(false),
        }
    }
}

impl<S: CharSource> Parser<S> {
    /// Parses the rest of an array whose `[` has been consumed.
    pub(super) fn parse_array(&mut self) -> PResult<Value> {
        let mut items = Vec::new();
        let mut separator = Separator::Start;

        loop {
            let c = self.next_significant()?;
            if c == ']' {
                break;
            }
            if separator.separate(c)? {
                continue;
            }
            items.push(self.parse_child(c)?);
            separator = Separator::AfterValue;
        }

        let raw = enclose('[', items.iter().map(Value::raw_text), ']');
        Ok(Value::new(Payload::Array(items), raw))
    }

    /// Parses the rest of an object whose `{` has been consumed.
    ///
    /// A repeated key keeps its last value; the raw text keeps every member.
    pub(super) fn parse_object(&mut self) -> PResult<Value> {
        let mut map = Map::new();
        let mut members = Vec::new();
        let mut separator = Separator::Start;

        loop {
            let c = self.next_significant()?;
            if c == '}' {
                break;
            }
            if separator.separate(c)? {
                continue;
            }
            let key = self.parse_key(c)?;
            let first = self.next_significant()?;
            let value = self.parse_child(first)?;
            members.push(format!("{}:{}", key.raw, value.raw_text()));
            map.insert(key.name, value);
            separator = Separator::AfterValue;
        }

        let raw = enclose('{', members.iter().map(String::as_str), '}');
        Ok(Value::new(Payload::Object(map), raw))
    }

    fn parse_child(&mut self, first: char) -> PResult<Value> {
        self.parse_value(first)?
            .ok_or_else(|| SyntaxError::InvalidCharacter(first).into())
    }
}

fn enclose<'a>(open: char, parts: impl Iterator<Item = &'a str>, close: char) -> String {
    let mut raw = String::from(open);
    for (i, part) in parts.enumerate() {
        if i > 0 {
            raw.push(',');
        }
        raw.push_str(part);
    }
    raw.push(close);
    raw
}
