//! # EmojiDB Codec
//!
//! Symbolic text encoding/decoding for EmojiDB.
//!
//! A store is written as one text blob in which symbols (extended grapheme
//! clusters) serve both as data and as delimiters:
//!
//! ```text
//! <store-name>
//! <entity><marker-1>...<marker-k>#️⃣<count>
//! <marker-1><value-1>...<marker-k><value-k>
//! ```
//!
//! ## Encoding Rules
//!
//! - Integers are written digit by digit with keycap symbols `0️⃣`..`9️⃣`
//! - Text values are written as-is, with no escaping
//! - Record counts use the same digit alphabet, after the `#️⃣` marker
//! - A record line is split back into fields using only the schema's marker
//!   sequence, so values may span any number of symbols
//!
//! Because there is no escaping, a text value must never contain one of its
//! entity's field markers. [`check_text`] enforces this (and the other value
//! rules) before anything is written.
//!
//! ## Usage
//!
//! ```
//! use emojidb_codec::{from_text, to_text, Document, EntityBlock, Value};
//!
//! let mut entity = EntityBlock::new("E", vec!["A".to_string(), "B".to_string()]);
//! entity.records.push(vec![Value::Integer(1), Value::text("x")]);
//! let mut doc = Document::new("S");
//! doc.entities.push(entity);
//!
//! let text = to_text(&doc);
//! assert_eq!(from_text(&text).unwrap(), doc);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decoder;
mod document;
mod encoder;
mod error;
mod symbol;
mod value;

pub use decoder::{from_text, TextDecoder};
pub use document::{Document, EntityBlock};
pub use encoder::{to_text, TextEncoder};
pub use error::{CodecError, CodecResult};
pub use symbol::{
    check_header, check_store_name, check_symbol, check_text, decode_integer, digit_value,
    encode_integer, is_digit_symbol, tokenize, COUNT_MARKER, DIGITS, LINE_ENDING,
};
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_document() -> Document {
        let mut orders = EntityBlock::new(
            "📑",
            vec!["🆔".to_string(), "🕓".to_string(), "🪑".to_string()],
        );
        orders
            .records
            .push(vec![Value::Integer(2), Value::Integer(1_700_000_000_000), Value::Integer(4)]);
        orders
            .records
            .push(vec![Value::Integer(1), Value::Integer(1_699_999_999_999), Value::Integer(7)]);

        let mut menu = EntityBlock::new("🍴", vec!["🍽".to_string(), "🧟".to_string()]);
        menu.records.push(vec![Value::text("🥗"), Value::text("❌")]);
        menu.records.push(vec![Value::text("🥩"), Value::text("✅")]);

        let mut doc = Document::new("👨‍🍳");
        doc.entities.push(orders);
        doc.entities.push(menu);
        doc.entities
            .push(EntityBlock::new("🗒", vec!["📑".to_string()]));
        doc
    }

    #[test]
    fn roundtrip_document() {
        let doc = sample_document();
        let decoded = from_text(&to_text(&doc)).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn encoding_is_deterministic() {
        let doc = sample_document();
        assert_eq!(to_text(&doc), to_text(&doc.clone()));
    }

    proptest! {
        #[test]
        fn integers_roundtrip(n in any::<u64>()) {
            let encoded = encode_integer(n);
            prop_assert_eq!(decode_integer(&tokenize(&encoded)).unwrap(), Some(n));
        }

        #[test]
        fn header_counts_roundtrip(count in 0usize..300) {
            let mut encoder = TextEncoder::new("S");
            encoder.entity_header("E", &["A"], count);
            for i in 0..count {
                encoder.record(&["A"], &[Value::Integer(i as u64)]);
            }
            let doc = from_text(&encoder.into_string()).unwrap();
            prop_assert_eq!(doc.entities[0].records.len(), count);
        }
    }
}
