//! Symbolic text decoder.
//!
//! Decoding runs two small state machines. The line scanner alternates
//! between expecting an entity header and expecting the record lines that
//! header announced. The record splitter walks one record line's symbols and
//! assigns them to schema fields, using only the expected marker sequence to
//! find segment boundaries.

use crate::document::{Document, EntityBlock};
use crate::error::{CodecError, CodecResult};
use crate::symbol::{decode_integer, tokenize, COUNT_MARKER};
use crate::value::Value;

/// Decode a whole store from its on-disk text.
///
/// # Errors
///
/// Returns an error if the text violates the store grammar: no name line,
/// malformed headers or counts, records that do not split into the
/// entity's fields, or fewer record lines than announced.
pub fn from_text(text: &str) -> CodecResult<Document> {
    TextDecoder::new(text).decode()
}

/// Line scanner state.
enum ScanState {
    /// The next non-empty line is an entity header.
    ExpectHeader,
    /// The next `remaining` non-empty lines are records of `block`.
    ExpectRecords { block: EntityBlock, remaining: u64 },
}

/// A decoder over one encoded store.
pub struct TextDecoder<'a> {
    text: &'a str,
}

impl<'a> TextDecoder<'a> {
    /// Create a new decoder for the given text.
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Decode the store.
    ///
    /// # Errors
    ///
    /// See [`from_text`].
    pub fn decode(&self) -> CodecResult<Document> {
        let mut lines = self.text.lines().enumerate().map(|(i, l)| (i + 1, l));

        let name = match lines.next() {
            Some((_, line)) if !line.is_empty() => line.to_string(),
            _ => return Err(CodecError::MissingStoreName),
        };
        let mut document = Document::new(name);
        let mut state = ScanState::ExpectHeader;

        for (line_no, line) in lines {
            if line.is_empty() {
                continue;
            }
            state = match state {
                ScanState::ExpectHeader => {
                    let (block, count) = parse_header(line_no, line)?;
                    begin_block(&mut document, block, count)
                }
                ScanState::ExpectRecords {
                    mut block,
                    remaining,
                } => {
                    let record = RecordSplitter::new(line_no, &block.fields).split(line)?;
                    block.records.push(record);
                    begin_block(&mut document, block, remaining - 1)
                }
            };
        }

        match state {
            ScanState::ExpectHeader => Ok(document),
            ScanState::ExpectRecords { block, remaining } => {
                let found = block.records.len() as u64;
                Err(CodecError::MissingRecords {
                    entity: block.name,
                    expected: found + remaining,
                    found,
                })
            }
        }
    }
}

/// Either finishes `block` or waits for `remaining` more record lines.
fn begin_block(document: &mut Document, block: EntityBlock, remaining: u64) -> ScanState {
    if remaining == 0 {
        document.entities.push(block);
        ScanState::ExpectHeader
    } else {
        ScanState::ExpectRecords { block, remaining }
    }
}

/// Parses `<name><marker>...<marker><COUNT-MARKER><digits>`.
fn parse_header(line_no: usize, line: &str) -> CodecResult<(EntityBlock, u64)> {
    let tokens = tokenize(line);
    let split = tokens
        .iter()
        .position(|t| *t == COUNT_MARKER)
        .ok_or_else(|| CodecError::malformed_header(line_no, "missing count marker"))?;

    let (schema, count) = (&tokens[..split], &tokens[split + 1..]);
    let Some((name, fields)) = schema.split_first() else {
        return Err(CodecError::malformed_header(line_no, "missing entity name"));
    };
    if fields.is_empty() {
        return Err(CodecError::malformed_header(
            line_no,
            format!("entity {name} declares no fields"),
        ));
    }
    for (i, field) in fields.iter().enumerate() {
        if fields[..i].contains(field) {
            return Err(CodecError::malformed_header(
                line_no,
                format!("duplicate field marker {field}"),
            ));
        }
    }

    let count = decode_integer(count)?.ok_or(CodecError::InvalidCount { line: line_no })?;
    let fields = fields.iter().map(|f| (*f).to_string()).collect();
    Ok((EntityBlock::new(*name, fields), count))
}

/// Splitter state for one record line.
#[derive(Debug, Clone, Copy)]
enum SplitState {
    /// The next symbol must be the marker of field `index`.
    ExpectMarker(usize),
    /// Collecting the value segment of field `index`.
    InValue(usize),
}

/// Schema-driven splitter for record lines.
struct RecordSplitter<'f> {
    line_no: usize,
    fields: &'f [String],
}

impl<'f> RecordSplitter<'f> {
    fn new(line_no: usize, fields: &'f [String]) -> Self {
        Self { line_no, fields }
    }

    fn is_marker(&self, symbol: &str) -> bool {
        self.fields.iter().any(|f| f == symbol)
    }

    fn split(&self, line: &str) -> CodecResult<Vec<Value>> {
        let mut values = Vec::with_capacity(self.fields.len());
        let mut segment: Vec<&str> = Vec::new();
        let mut state = SplitState::ExpectMarker(0);

        for symbol in tokenize(line) {
            state = match state {
                SplitState::ExpectMarker(index) => {
                    let expected = self.fields.get(index).ok_or_else(|| {
                        CodecError::malformed_record(self.line_no, "too many fields")
                    })?;
                    if symbol != expected.as_str() {
                        return Err(CodecError::malformed_record(
                            self.line_no,
                            format!("expected field marker {expected}, found {symbol}"),
                        ));
                    }
                    SplitState::InValue(index)
                }
                SplitState::InValue(index) => {
                    let next = self.fields.get(index + 1);
                    if next.is_some_and(|n| n == symbol) {
                        values.push(self.finish_segment(index, &mut segment)?);
                        SplitState::InValue(index + 1)
                    } else if self.is_marker(symbol) {
                        return Err(CodecError::malformed_record(
                            self.line_no,
                            format!("unexpected field marker {symbol}"),
                        ));
                    } else {
                        segment.push(symbol);
                        SplitState::InValue(index)
                    }
                }
            };
        }

        match state {
            SplitState::InValue(index) if index + 1 == self.fields.len() => {
                values.push(self.finish_segment(index, &mut segment)?);
                Ok(values)
            }
            SplitState::InValue(_) | SplitState::ExpectMarker(_) => Err(
                CodecError::malformed_record(self.line_no, "record does not contain every field"),
            ),
        }
    }

    fn finish_segment(&self, index: usize, segment: &mut Vec<&str>) -> CodecResult<Value> {
        if segment.is_empty() {
            return Err(CodecError::malformed_record(
                self.line_no,
                format!("empty value for field {}", self.fields[index]),
            ));
        }
        let value = Value::decode(segment)?;
        segment.clear();
        Ok(value)
    }
}
