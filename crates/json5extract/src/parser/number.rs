use super::{Parser, is_insignificant};
use crate::{
    cursor::CharSource,
    error::{PResult, SyntaxError},
    literal_buffer::Literal,
    value::{Payload, Value},
};

/// Position inside a numeric literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    /// After a leading `+` or `-`.
    Sign,
    /// A lone `0`.
    Zero,
    /// Inside a decimal digit run that started with `1`–`9`.
    Integer,
    /// After a `.` that has no digit yet.
    LeadingPoint,
    /// After the decimal point, at least one digit seen (or `1.`).
    Fraction,
    /// After `e`/`E`.
    ExponentMarker,
    /// After the exponent's sign.
    ExponentSign,
    /// Inside the exponent digits.
    Exponent,
    /// After `0x`/`0X`.
    HexMarker,
    /// Inside the hexadecimal digits.
    Hex,
}

use NumberState::{
    Exponent, ExponentMarker, ExponentSign, Fraction, Hex, HexMarker, Integer, LeadingPoint, Sign,
    Zero,
};

impl NumberState {
    fn start(first: char) -> Option<Self> {
        Some(match first {
            '+' | '-' => Sign,
            '0' => Zero,
            '1'..='9' => Integer,
            '.' => LeadingPoint,
            _ => return None,
        })
    }

    /// Whether the characters seen so far form a complete number.
    fn is_terminal(self) -> bool {
        matches!(self, Zero | Integer | Fraction | Exponent | Hex)
    }

    fn step(self, c: char) -> Result<Self, SyntaxError> {
        Ok(match (self, c) {
            (Sign, _) => Self::start(c)
                .filter(|next| *next != Sign)
                .ok_or(SyntaxError::InvalidCharacter(c))?,
            (Zero, '.') => LeadingPoint,
            (Zero, 'x' | 'X') => HexMarker,
            (Zero | Integer | Fraction, 'e' | 'E') => ExponentMarker,
            (Integer, '0'..='9') => Integer,
            (Integer, '.') => Fraction,
            (LeadingPoint | Fraction, '0'..='9') => Fraction,
            (Fraction, '.') => return Err(SyntaxError::DoubleDecimalPoint),
            (ExponentMarker, '+' | '-') => ExponentSign,
            (ExponentMarker | ExponentSign | Exponent, '0'..='9') => Exponent,
            (Exponent, 'e' | 'E') => return Err(SyntaxError::DoubleExponent),
            (ExponentMarker | ExponentSign, _) => return Err(SyntaxError::EmptyExponent),
            (HexMarker | Hex, c) if c.is_ascii_hexdigit() => Hex,
            (HexMarker, _) => return Err(SyntaxError::EmptyHex),
            _ => return Err(SyntaxError::InvalidCharacter(c)),
        })
    }
}

/// Characters that end a number without belonging to it.
fn is_delimiter(c: char) -> bool {
    matches!(c, ',' | ']' | '}' | '/') || is_insignificant(c)
}

impl<S: CharSource> Parser<S> {
    pub(super) fn parse_number(&mut self, first: char) -> PResult<Value> {
        if matches!(first, 'I' | 'N') {
            return self.parse_non_finite(String::new(), first);
        }
        let mut state = NumberState::start(first).ok_or(SyntaxError::InvalidCharacter(first))?;
        let mut raw = String::from(first);

        loop {
            let Some(c) = self.next_char()? else {
                if state.is_terminal() {
                    break;
                }
                return Err(SyntaxError::UnexpectedEndOfInput.into());
            };
            if state.is_terminal() && is_delimiter(c) {
                self.unread()?;
                break;
            }
            if state == Sign && matches!(c, 'I' | 'N') {
                return self.parse_non_finite(raw, c);
            }
            state = state.step(c)?;
            raw.push(c);
        }

        let payload = match state {
            Hex => Payload::Integer(hex_value(&raw)?),
            Zero | Integer => Payload::Integer(
                raw.parse()
                    .map_err(|_| SyntaxError::NumberOutOfRange(raw.clone()))?,
            ),
            _ => Payload::Float(
                raw.parse()
                    .map_err(|_| SyntaxError::NumberOutOfRange(raw.clone()))?,
            ),
        };
        Ok(Value::new(payload, raw))
    }

    /// Completes `Infinity` or `NaN` after an optional sign held in `raw`.
    fn parse_non_finite(&mut self, mut raw: String, first: char) -> PResult<Value> {
        let literal = self.match_literal(first)?;
        let negative = raw == "-";
        let payload = match literal {
            Literal::Infinity if negative => Payload::Infinity(f64::NEG_INFINITY),
            Literal::Infinity => Payload::Infinity(f64::INFINITY),
            Literal::NaN if negative => Payload::NaN(-f64::NAN),
            Literal::NaN => Payload::NaN(f64::NAN),
            _ => return Err(SyntaxError::InvalidCharacter(first).into()),
        };
        raw.push_str(literal.text());
        Ok(Value::new(payload, raw))
    }
}

/// Decodes a hexadecimal literal such as `-0x1F`, applying the sign after the
/// magnitude.
fn hex_value(raw: &str) -> Result<i64, SyntaxError> {
    let out_of_range = || SyntaxError::NumberOutOfRange(raw.to_owned());
    let (negative, unsigned) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let magnitude = u64::from_str_radix(&unsigned[2..], 16).map_err(|_| out_of_range())?;
    let signed = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(signed).map_err(|_| out_of_range())
}
