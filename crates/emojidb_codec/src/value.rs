//! Field value type.

use crate::error::CodecResult;
use crate::symbol::{decode_integer, encode_integer};
use std::borrow::Cow;
use std::fmt;

/// A decoded field value.
///
/// Integers are written with the digit alphabet, text is written as-is.
/// Negative numbers have no encoding, so integers are unsigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Non-negative integer.
    Integer(u64),
    /// Symbol string.
    Text(String),
}

impl Value {
    /// Create a text value.
    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    /// Returns the integer, if this is an integer value.
    #[must_use]
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    /// Returns the text, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Integer(_) => None,
            Value::Text(s) => Some(s),
        }
    }

    /// Renders this value in its on-disk form.
    #[must_use]
    pub fn encode(&self) -> Cow<'_, str> {
        match self {
            Value::Integer(n) => Cow::Owned(encode_integer(*n)),
            Value::Text(s) => Cow::Borrowed(s),
        }
    }

    /// Decodes a value segment from a record line.
    ///
    /// A segment made only of digit symbols is an integer; anything else is
    /// kept as text.
    ///
    /// # Errors
    ///
    /// Returns an error if a digit-only segment overflows a `u64`.
    pub fn decode(segment: &[&str]) -> CodecResult<Self> {
        Ok(match decode_integer(segment)? {
            Some(n) => Value::Integer(n),
            None => Value::Text(segment.concat()),
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Integer(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(u64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl PartialEq<u64> for Value {
    fn eq(&self, other: &u64) -> bool {
        self.as_integer() == Some(*other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::tokenize;

    #[test]
    fn encode_integer_value() {
        assert_eq!(Value::Integer(7).encode(), "7️⃣");
    }

    #[test]
    fn encode_text_passes_through() {
        assert_eq!(Value::text("👮‍♂️").encode(), "👮‍♂️");
    }

    #[test]
    fn decode_digit_segment_as_integer() {
        let tokens = tokenize("4️⃣2️⃣");
        assert_eq!(Value::decode(&tokens).unwrap(), Value::Integer(42));
    }

    #[test]
    fn decode_mixed_segment_as_text() {
        let tokens = tokenize("3️⃣܂🔟");
        assert_eq!(Value::decode(&tokens).unwrap(), Value::text("3️⃣܂🔟"));
    }

    #[test]
    fn comparisons() {
        assert_eq!(Value::from(5u64), 5u64);
        assert_eq!(Value::from("x"), "x");
        assert_ne!(Value::from("5"), 5u64);
    }

    #[test]
    fn display() {
        assert_eq!(Value::Integer(1000).to_string(), "1000");
        assert_eq!(Value::text("🥩").to_string(), "🥩");
    }
}
