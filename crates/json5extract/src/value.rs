//! Extracted JSON5 values.
//!
//! A [`Value`] couples a decoded [`Payload`] with the source text it was parsed
//! from. Scalars keep their literal exactly as it appeared, escapes included.
//! Arrays and objects keep a canonical reconstruction: delimiters, the raw
//! text of every child and a single `,` between children. Whitespace,
//! comments and trailing commas that were skipped while parsing are not
//! reproduced.
use std::{collections::BTreeMap, fmt};

use crate::error::KindError;

pub type Map = BTreeMap<String, Value>;
pub type Array = Vec<Value>;

/// The kind of an extracted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Integer,
    Float,
    Infinity,
    NaN,
    Boolean,
    Null,
    Array,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Infinity => "infinity",
            Kind::NaN => "nan",
            Kind::Boolean => "boolean",
            Kind::Null => "null",
            Kind::Array => "array",
            Kind::Object => "object",
        })
    }
}

/// Decoded content of a value.
///
/// `Infinity` and `NaN` carry their float pattern (signed for infinities) but
/// stay distinct from `Float` so callers can tell them apart.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    String(String),
    Integer(i64),
    Float(f64),
    Infinity(f64),
    NaN(f64),
    Boolean(bool),
    Null,
    Array(Array),
    Object(Map),
}

impl Payload {
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Payload::String(_) => Kind::String,
            Payload::Integer(_) => Kind::Integer,
            Payload::Float(_) => Kind::Float,
            Payload::Infinity(_) => Kind::Infinity,
            Payload::NaN(_) => Kind::NaN,
            Payload::Boolean(_) => Kind::Boolean,
            Payload::Null => Kind::Null,
            Payload::Array(_) => Kind::Array,
            Payload::Object(_) => Kind::Object,
        }
    }
}

/// One JSON5 value extracted from a text stream.
///
/// # Examples
///
/// ```
/// use json5extract::{Kind, scan_str};
///
/// let values = scan_str("port = 0x1F90, name = 'web\\x31'").unwrap();
/// assert_eq!(values[0].kind(), Kind::Integer);
/// assert_eq!(values[0].as_i64(), Ok(8080));
/// assert_eq!(values[1].as_str(), Ok("web1"));
/// assert_eq!(values[1].raw_text(), "'web\\x31'");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    payload: Payload,
    raw: String,
}

impl Value {
    pub(crate) fn new(payload: Payload, raw: String) -> Self {
        Self { payload, raw }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.payload.kind()
    }

    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[must_use]
    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// The literal as it appeared in the source (scalars) or its canonical
    /// reconstruction (arrays and objects).
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn raw_bytes(&self) -> &[u8] {
        self.raw.as_bytes()
    }

    fn mismatch(&self, expected: Kind) -> KindError {
        KindError {
            expected,
            found: self.kind(),
        }
    }

    /// Returns the decoded string.
    ///
    /// # Errors
    ///
    /// Fails with [`KindError`] unless the value is a [`Kind::String`].
    pub fn as_str(&self) -> Result<&str, KindError> {
        match &self.payload {
            Payload::String(s) => Ok(s),
            _ => Err(self.mismatch(Kind::String)),
        }
    }

    /// Returns the integer payload.
    ///
    /// # Errors
    ///
    /// Fails with [`KindError`] unless the value is a [`Kind::Integer`].
    pub fn as_i64(&self) -> Result<i64, KindError> {
        match self.payload {
            Payload::Integer(n) => Ok(n),
            _ => Err(self.mismatch(Kind::Integer)),
        }
    }

    /// Returns the float payload of a `Float`, `Infinity` or `NaN` value.
    ///
    /// # Errors
    ///
    /// Fails with [`KindError`] for every other kind. Integers are not
    /// widened.
    pub fn as_f64(&self) -> Result<f64, KindError> {
        match self.payload {
            Payload::Float(n) | Payload::Infinity(n) | Payload::NaN(n) => Ok(n),
            _ => Err(self.mismatch(Kind::Float)),
        }
    }

    /// Returns the boolean payload.
    ///
    /// # Errors
    ///
    /// Fails with [`KindError`] unless the value is a [`Kind::Boolean`].
    pub fn as_bool(&self) -> Result<bool, KindError> {
        match self.payload {
            Payload::Boolean(b) => Ok(b),
            _ => Err(self.mismatch(Kind::Boolean)),
        }
    }

    /// Returns the elements of an array.
    ///
    /// # Errors
    ///
    /// Fails with [`KindError`] unless the value is a [`Kind::Array`].
    pub fn as_array(&self) -> Result<&[Value], KindError> {
        match &self.payload {
            Payload::Array(items) => Ok(items),
            _ => Err(self.mismatch(Kind::Array)),
        }
    }

    /// Returns the members of an object.
    ///
    /// # Errors
    ///
    /// Fails with [`KindError`] unless the value is a [`Kind::Object`].
    pub fn as_object(&self) -> Result<&Map, KindError> {
        match &self.payload {
            Payload::Object(map) => Ok(map),
            _ => Err(self.mismatch(Kind::Object)),
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.payload, Payload::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(any(test, feature = "serde"))]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};

        match &self.payload {
            Payload::String(s) => serializer.serialize_str(s),
            Payload::Integer(n) => serializer.serialize_i64(*n),
            Payload::Float(n) | Payload::Infinity(n) | Payload::NaN(n) => {
                serializer.serialize_f64(*n)
            }
            Payload::Boolean(b) => serializer.serialize_bool(*b),
            Payload::Null => serializer.serialize_unit(),
            Payload::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Payload::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn scalar(payload: Payload, raw: &str) -> Value {
        Value::new(payload, raw.into())
    }

    #[rstest]
    #[case(scalar(Payload::Integer(7), "7"), Kind::Integer)]
    #[case(scalar(Payload::Float(0.5), ".5"), Kind::Float)]
    #[case(scalar(Payload::Infinity(f64::NEG_INFINITY), "-Infinity"), Kind::Infinity)]
    #[case(scalar(Payload::NaN(f64::NAN), "NaN"), Kind::NaN)]
    #[case(scalar(Payload::Null, "null"), Kind::Null)]
    fn kind_follows_payload(#[case] value: Value, #[case] kind: Kind) {
        assert_eq!(value.kind(), kind);
    }

    #[test]
    fn mismatched_accessors_return_kind_error() {
        let value = scalar(Payload::Boolean(true), "true");
        assert_eq!(
            value.as_str(),
            Err(KindError {
                expected: Kind::String,
                found: Kind::Boolean
            })
        );
        assert_eq!(value.as_i64().unwrap_err().found, Kind::Boolean);
        assert_eq!(value.as_f64().unwrap_err().expected, Kind::Float);
        assert!(value.as_array().is_err());
        assert!(value.as_object().is_err());
        assert_eq!(value.as_bool(), Ok(true));
    }

    #[test]
    fn integers_are_not_widened_to_floats() {
        let value = scalar(Payload::Integer(3), "3");
        assert_eq!(
            value.as_f64().unwrap_err().to_string(),
            "expected a value of kind float, found integer"
        );
    }

    #[test]
    fn display_writes_raw_text() {
        let value = scalar(Payload::String("a\n".into()), r#""a\n""#);
        assert_eq!(value.to_string(), r#""a\n""#);
        assert_eq!(value.raw_bytes(), br#""a\n""#);
    }

    #[test]
    fn serializes_by_payload() {
        let mut map = Map::new();
        map.insert("k".into(), scalar(Payload::Integer(1), "0x1"));
        let value = Value::new(
            Payload::Array(vec![
                Value::new(Payload::Object(map), "{k:0x1}".into()),
                scalar(Payload::String("s".into()), "'s'"),
                scalar(Payload::Null, "null"),
            ]),
            "[{k:0x1},'s',null]".into(),
        );
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"[{"k":1},"s",null]"#
        );
    }
}
