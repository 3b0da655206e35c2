//! Symbolic text encoder.

use crate::document::Document;
use crate::symbol::{encode_integer, COUNT_MARKER, LINE_ENDING};
use crate::value::Value;

/// Render a document to its on-disk text.
///
/// The document is assumed to be valid, as produced by the decoder or by a
/// store that validated its values on write.
pub fn to_text(document: &Document) -> String {
    let mut encoder = TextEncoder::new(&document.name);
    for entity in &document.entities {
        encoder.entity_header(&entity.name, &entity.fields, entity.records.len());
        for record in &entity.records {
            encoder.record(&entity.fields, record);
        }
    }
    encoder.into_string()
}

/// A streaming encoder for a whole store.
///
/// Callers write the store name first (via [`TextEncoder::new`]), then for
/// each entity one header followed by exactly as many records as the header
/// announced. The encoder does not validate; that happens when values are
/// written into the store.
#[derive(Debug)]
pub struct TextEncoder {
    buffer: String,
}

impl TextEncoder {
    /// Start encoding a store with the given name.
    pub fn new(store_name: &str) -> Self {
        let mut buffer = String::with_capacity(store_name.len() + LINE_ENDING.len());
        buffer.push_str(store_name);
        buffer.push_str(LINE_ENDING);
        Self { buffer }
    }

    /// Write an entity header line.
    pub fn entity_header<S: AsRef<str>>(&mut self, name: &str, fields: &[S], count: usize) {
        self.buffer.push_str(name);
        for field in fields {
            self.buffer.push_str(field.as_ref());
        }
        self.buffer.push_str(COUNT_MARKER);
        self.buffer.push_str(&encode_integer(count as u64));
        self.buffer.push_str(LINE_ENDING);
    }

    /// Write a record line, pairing each field marker with its value.
    pub fn record<'v, S, I>(&mut self, fields: &[S], values: I)
    where
        S: AsRef<str>,
        I: IntoIterator<Item = &'v Value>,
    {
        for (field, value) in fields.iter().zip(values) {
            self.buffer.push_str(field.as_ref());
            self.buffer.push_str(&value.encode());
        }
        self.buffer.push_str(LINE_ENDING);
    }

    /// Returns the text written so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consume this encoder and return the encoded text.
    pub fn into_string(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::EntityBlock;

    fn fields(markers: &[&str]) -> Vec<String> {
        markers.iter().map(|m| (*m).to_string()).collect()
    }

    #[test]
    fn encode_empty_store() {
        let text = to_text(&Document::new("🗂"));
        assert_eq!(text, format!("🗂{LINE_ENDING}"));
    }

    #[test]
    fn encode_header_with_zero_records() {
        let mut doc = Document::new("🗂");
        doc.entities.push(EntityBlock::new("📂", fields(&["🆔", "📆"])));
        let text = to_text(&doc);
        assert_eq!(text, format!("🗂{LINE_ENDING}📂🆔📆#️⃣0️⃣{LINE_ENDING}"));
    }

    #[test]
    fn encode_records_in_schema_order() {
        let mut entity = EntityBlock::new("E", fields(&["A", "B"]));
        entity.records.push(vec![Value::Integer(1), Value::text("x")]);
        entity.records.push(vec![Value::Integer(10), Value::text("🥩")]);
        let mut doc = Document::new("S");
        doc.entities.push(entity);

        let expected = [
            "S",
            "EAB#️⃣2️⃣",
            "A1️⃣Bx",
            "A1️⃣0️⃣B🥩",
        ]
        .iter()
        .map(|line| format!("{line}{LINE_ENDING}"))
        .collect::<String>();
        assert_eq!(to_text(&doc), expected);
    }

    #[test]
    fn streaming_matches_document() {
        let mut encoder = TextEncoder::new("S");
        let values = [Value::Integer(3)];
        encoder.entity_header("E", &["A"], 1);
        encoder.record(&["A"], &values);
        assert_eq!(
            encoder.as_str(),
            format!("S{LINE_ENDING}EA#️⃣1️⃣{LINE_ENDING}A3️⃣{LINE_ENDING}")
        );
    }
}
