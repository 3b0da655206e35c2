//! Symbol alphabet and tokenizer.
//!
//! A *symbol* is one extended grapheme cluster. Keycap emoji form the digit
//! alphabet, and the keycap number sign is the record-count marker. Field
//! markers and entity names are drawn from every other symbol.

use crate::error::{CodecError, CodecResult};
use unicode_segmentation::UnicodeSegmentation;

/// Keycap digit symbols, indexed by the decimal digit they encode.
pub const DIGITS: [&str; 10] = [
    "0\u{FE0F}\u{20E3}",
    "1\u{FE0F}\u{20E3}",
    "2\u{FE0F}\u{20E3}",
    "3\u{FE0F}\u{20E3}",
    "4\u{FE0F}\u{20E3}",
    "5\u{FE0F}\u{20E3}",
    "6\u{FE0F}\u{20E3}",
    "7\u{FE0F}\u{20E3}",
    "8\u{FE0F}\u{20E3}",
    "9\u{FE0F}\u{20E3}",
];

/// Separates an entity header's field markers from its record count.
pub const COUNT_MARKER: &str = "#\u{FE0F}\u{20E3}";

/// Line terminator written after every line of an encoded store.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Line terminator written after every line of an encoded store.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Splits text into its flat symbol sequence.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

/// Returns the decimal digit a symbol encodes, if it is a digit symbol.
pub fn digit_value(symbol: &str) -> Option<u8> {
    DIGITS
        .iter()
        .position(|digit| *digit == symbol)
        .and_then(|d| u8::try_from(d).ok())
}

/// Returns true if `symbol` belongs to the digit alphabet.
pub fn is_digit_symbol(symbol: &str) -> bool {
    digit_value(symbol).is_some()
}

/// Encodes a non-negative integer with the digit alphabet.
pub fn encode_integer(value: u64) -> String {
    value
        .to_string()
        .bytes()
        .map(|b| DIGITS[usize::from(b - b'0')])
        .collect()
}

/// Decodes a digit-symbol sequence.
///
/// Returns `Ok(None)` when the sequence is empty or contains a symbol
/// outside the digit alphabet.
///
/// # Errors
///
/// Returns [`CodecError::IntegerOverflow`] if the number does not fit in a
/// `u64`.
pub fn decode_integer(symbols: &[&str]) -> CodecResult<Option<u64>> {
    if symbols.is_empty() {
        return Ok(None);
    }
    let mut value: u64 = 0;
    for symbol in symbols {
        let Some(digit) = digit_value(symbol) else {
            return Ok(None);
        };
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or(CodecError::IntegerOverflow)?;
    }
    Ok(Some(value))
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

/// Validates an entity name or field marker.
///
/// The symbol must be exactly one grapheme, must not be a digit symbol or
/// the count marker, and must not merge with the symbols around it.
///
/// # Errors
///
/// Returns [`CodecError::InvalidSymbol`] describing the first violation.
pub fn check_symbol(symbol: &str) -> CodecResult<()> {
    let reject = |message: &str| Err(CodecError::invalid_symbol(symbol, message));

    if symbol.is_empty() {
        return reject("empty symbol");
    }
    if has_line_break(symbol) {
        return reject("contains a line break");
    }
    if symbol.graphemes(true).count() != 1 {
        return reject("must be exactly one symbol");
    }
    if is_digit_symbol(symbol) {
        return reject("digit symbols are reserved for numbers");
    }
    if symbol == COUNT_MARKER {
        return reject("the count marker is reserved");
    }
    Ok(())
}

/// Validates that an entity header tokenizes back into its parts.
///
/// # Errors
///
/// Returns [`CodecError::InvalidSymbol`] if any symbol is invalid or if
/// adjacent symbols would merge into one.
pub fn check_header<S: AsRef<str>>(name: &str, fields: &[S]) -> CodecResult<()> {
    check_symbol(name)?;
    for field in fields {
        check_symbol(field.as_ref())?;
    }

    let mut line = String::from(name);
    for field in fields {
        line.push_str(field.as_ref());
    }
    line.push_str(COUNT_MARKER);

    let tokens = tokenize(&line);
    let expected = std::iter::once(name)
        .chain(fields.iter().map(AsRef::as_ref))
        .chain(std::iter::once(COUNT_MARKER));
    if tokens.len() != fields.len() + 2 || !tokens.iter().copied().eq(expected) {
        return Err(CodecError::invalid_symbol(
            line,
            "adjacent symbols merge into one",
        ));
    }
    Ok(())
}

/// Validates a text value for the field `marker` of an entity.
///
/// `next_marker` is the marker that follows `marker` on a record line, if
/// any, and `markers` is the entity's complete schema. A valid text value
/// survives a round trip through a record line unchanged.
///
/// # Errors
///
/// Returns [`CodecError::InvalidText`] if the text is empty, spans lines,
/// would decode as an integer, contains a field marker of the entity, or
/// merges with the markers around it.
pub fn check_text<S: AsRef<str>>(
    text: &str,
    marker: &str,
    next_marker: Option<&str>,
    markers: &[S],
) -> CodecResult<()> {
    let reject = |message: &str| Err(CodecError::invalid_text(text, message));

    if text.is_empty() {
        return reject("empty text");
    }
    if has_line_break(text) {
        return reject("contains a line break");
    }

    let tokens = tokenize(text);
    if tokens.iter().all(|t| is_digit_symbol(t)) {
        return reject("digit-only text would decode as a number");
    }
    if tokens
        .iter()
        .any(|t| markers.iter().any(|m| m.as_ref() == *t))
    {
        return reject("contains a field marker of its entity");
    }

    let mut line = String::from(marker);
    line.push_str(text);
    if let Some(next) = next_marker {
        line.push_str(next);
    }
    let in_context = tokenize(&line);
    let expected = std::iter::once(marker)
        .chain(tokens.iter().copied())
        .chain(next_marker);
    if !in_context.iter().copied().eq(expected) {
        return reject("does not start and end on a symbol boundary");
    }
    Ok(())
}

/// Validates a store name, which occupies the whole first line.
///
/// # Errors
///
/// Returns [`CodecError::InvalidSymbol`] if the name is empty or spans lines.
pub fn check_store_name(name: &str) -> CodecResult<()> {
    if name.is_empty() {
        return Err(CodecError::invalid_symbol(name, "empty store name"));
    }
    if has_line_break(name) {
        return Err(CodecError::invalid_symbol(name, "contains a line break"));
    }
    Ok(())
}
