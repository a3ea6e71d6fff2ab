/// Keyword-like literals matched character by character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    Null,
    True,
    False,
    Infinity,
    NaN,
}

impl Literal {
    pub(crate) fn text(self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::True => "true",
            Literal::False => "false",
            Literal::Infinity => "Infinity",
            Literal::NaN => "NaN",
        }
    }
}

/// What happened after feeding one more character into the literal matcher?
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Character matched, but the literal is not finished yet.
    NeedMore,
    /// Character matched *and* it was the last one of the literal.
    Done(Literal),
    /// Character did **not** match; carries the expected character.
    Reject(char),
}

/// `(remaining_bytes, literal)` while matching.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ExpectedLiteralBuffer(&'static [u8], Literal);

impl ExpectedLiteralBuffer {
    /// Start matching after the *first* character (`n`, `t`, `f`, `I` or `N`).
    pub(crate) fn new(first: char) -> Option<Self> {
        let literal = match first {
            'n' => Literal::Null,
            't' => Literal::True,
            'f' => Literal::False,
            'I' => Literal::Infinity,
            'N' => Literal::NaN,
            _ => return None,
        };
        Some(ExpectedLiteralBuffer(&literal.text().as_bytes()[1..], literal))
    }

    /// Give the matcher the next input character and learn what to do next.
    pub(crate) fn step(&mut self, c: char) -> Step {
        let ExpectedLiteralBuffer(bytes, literal) = *self;
        let Some((&expected, rest)) = bytes.split_first() else {
            return Step::Done(literal);
        };

        if expected as char != c {
            return Step::Reject(expected as char);
        }

        self.0 = rest;
        if rest.is_empty() {
            Step::Done(literal)
        } else {
            Step::NeedMore
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(first: char, rest: &str) -> Step {
        let mut buf = ExpectedLiteralBuffer::new(first).unwrap();
        let mut last = Step::NeedMore;
        for c in rest.chars() {
            last = buf.step(c);
            if last != Step::NeedMore {
                break;
            }
        }
        last
    }

    #[test]
    fn completes_every_literal() {
        assert_eq!(feed('n', "ull"), Step::Done(Literal::Null));
        assert_eq!(feed('t', "rue"), Step::Done(Literal::True));
        assert_eq!(feed('f', "alse"), Step::Done(Literal::False));
        assert_eq!(feed('I', "nfinity"), Step::Done(Literal::Infinity));
        assert_eq!(feed('N', "aN"), Step::Done(Literal::NaN));
    }

    #[test]
    fn rejects_with_expected_character() {
        assert_eq!(feed('t', "ru3"), Step::Reject('e'));
        assert_eq!(feed('N', "an"), Step::Reject('N'));
    }

    #[test]
    fn only_literal_initials_start_a_match() {
        assert!(ExpectedLiteralBuffer::new('x').is_none());
        assert!(ExpectedLiteralBuffer::new('T').is_none());
    }
}
