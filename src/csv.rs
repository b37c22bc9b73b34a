/*
    annograph (JSON to stand-off annotation graph)

        Licensed under the GNU General Public License v3
*/

//! Tabular (CSV) export of a [`Document`], one table per kind of item.

use sealed::sealed;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::datavalue::MetaValue;
use crate::document::Document;
use crate::error::AnnoError;
use crate::types::*;

#[derive(Serialize)]
struct TokenCsv<'a> {
    #[serde(rename = "Index")]
    index: usize,
    #[serde(rename = "Begin")]
    begin: usize,
    #[serde(rename = "End")]
    end: usize,
    #[serde(rename = "Text")]
    text: Cow<'a, str>,
}

#[derive(Serialize)]
struct SpanCsv<'a> {
    #[serde(rename = "Layer")]
    layer: Cow<'a, str>,
    #[serde(rename = "Value")]
    value: Cow<'a, str>,
    /// first token index
    #[serde(rename = "BeginToken")]
    begin: usize,
    /// last token index (inclusive)
    #[serde(rename = "EndToken")]
    end: usize,
}

#[derive(Serialize)]
struct MetadataCsv<'a> {
    #[serde(rename = "Key")]
    key: Cow<'a, str>,
    #[serde(rename = "Value")]
    value: &'a MetaValue,
}

#[derive(Clone, Copy, PartialEq, Debug, Deserialize, Serialize)]
pub enum CsvTable {
    Tokens,
    Spans,
    Metadata,
}

#[sealed]
pub trait ToCsv {
    /// Writes CSV output, for the specified table, to the writer
    fn csv_writer<W>(&self, writer: W, table: CsvTable) -> Result<(), AnnoError>
    where
        W: std::io::Write;

    /// Writes CSV output, for the specified table, to a string
    fn to_csv_string(&self, table: CsvTable) -> Result<String, AnnoError> {
        let mut buffer: Vec<u8> = Vec::new();
        self.csv_writer(&mut buffer, table)?;
        String::from_utf8(buffer).map_err(|e| {
            AnnoError::SerializationError(format!("CSV output is not valid UTF-8: {}", e))
        })
    }
}

fn csv_error(e: csv::Error) -> AnnoError {
    AnnoError::SerializationError(format!("Failure serializing CSV: {:?}", e))
}

#[sealed]
impl ToCsv for Document {
    fn csv_writer<W>(&self, writer: W, table: CsvTable) -> Result<(), AnnoError>
    where
        W: std::io::Write,
    {
        let mut writer = csv::Writer::from_writer(writer);
        match table {
            CsvTable::Tokens => {
                for (handle, token) in self.iter_tokens() {
                    writer
                        .serialize(TokenCsv {
                            index: handle.as_usize(),
                            begin: token.begin(),
                            end: token.end(),
                            text: Cow::Borrowed(token.text()),
                        })
                        .map_err(csv_error)?;
                }
            }
            CsvTable::Spans => {
                for span in self.spans() {
                    writer
                        .serialize(SpanCsv {
                            layer: Cow::Borrowed(span.layer()),
                            value: Cow::Borrowed(span.value()),
                            begin: span.begin().as_usize(),
                            end: span.end().as_usize(),
                        })
                        .map_err(csv_error)?;
                }
            }
            CsvTable::Metadata => {
                for (key, value) in self.metadata() {
                    writer
                        .serialize(MetadataCsv {
                            key: Cow::Borrowed(key.as_str()),
                            value,
                        })
                        .map_err(csv_error)?;
                }
            }
        }
        writer.flush().map_err(|e| {
            AnnoError::IOError(e, "(csv writer)".to_string(), "Flushing CSV output failed")
        })
    }
}
