/*
    annograph (JSON to stand-off annotation graph)

        Licensed under the GNU General Public License v3
*/

//! This module implements the mapping of a single JSON document onto a [`Document`].
//!
//! The mapping is a pure, single-pass transformation: text, then metadata, then tokens, then one
//! pass over every configured annotation group. It does no I/O and holds no state between documents.

use nanoid::nanoid;
use serde_json::{Map, Value};

use crate::config::{AnnotationGroupMapping, Config};
use crate::datavalue::MetaValue;
use crate::document::Document;
use crate::error::AnnoError;
use crate::file::open_file_reader;
use crate::json::FromJson;
use crate::span::Span;
use crate::token::{Token, TokenHandle};
use crate::types::*;

/// Builds the annotation graph for a parsed JSON document.
///
/// Fails on the first error encountered; every error returned here concerns only this document.
pub fn build(json: &Value, config: &Config) -> Result<Document, AnnoError> {
    build_with_id(json, None, config)
}

/// Like [`build()`], but assigns an identifier to the document.
/// If no identifier is passed and [`Config::generate_ids()`] is enabled, a random one is generated.
pub fn build_with_id(
    json: &Value,
    id: Option<&str>,
    config: &Config,
) -> Result<Document, AnnoError> {
    let root = json
        .as_object()
        .ok_or_else(|| AnnoError::MissingField("(root)".to_string(), "document is not a JSON object"))?;

    let mut document = Document::new(extract_text(root, config)?);
    document.id = match id {
        Some(id) => Some(id.to_string()),
        None if config.generate_ids() => Some(format!("D{}", nanoid!())),
        None => None,
    };
    debug(config, || {
        format!(
            "build: document={:?} textlen={}",
            document.id(),
            document.textlen()
        )
    });

    extract_metadata(&mut document, root, config)?;
    extract_tokens(&mut document, root, config)?;
    for mapping in config.groups() {
        extract_spans(&mut document, root, mapping, config)?;
    }

    debug(config, || {
        format!(
            "build: ^--- document={:?} tokens={} spans={} metadata={}",
            document.id(),
            document.tokens().len(),
            document.spans().len(),
            document.metadata().len()
        )
    });
    Ok(document)
}

fn extract_text(root: &Map<String, Value>, config: &Config) -> Result<String, AnnoError> {
    match root.get(config.text_key()) {
        Some(Value::String(text)) if !text.is_empty() => Ok(text.clone()),
        Some(Value::String(_)) => Err(AnnoError::MissingField(
            config.text_key().to_string(),
            "text is empty",
        )),
        Some(_) => Err(AnnoError::MissingField(
            config.text_key().to_string(),
            "text is not a string",
        )),
        None => Err(AnnoError::MissingField(
            config.text_key().to_string(),
            "text is absent",
        )),
    }
}

/// Copies the configured metadata fields from the nested metadata object. Fields that are absent or null are not copied,
/// neither is anything that is not a string or an integer.
fn extract_metadata(
    document: &mut Document,
    root: &Map<String, Value>,
    config: &Config,
) -> Result<(), AnnoError> {
    let meta = match root.get(config.metadata_key()) {
        None | Some(Value::Null) => {
            debug(config, || "build: no metadata".to_string());
            return Ok(());
        }
        Some(Value::Object(meta)) => meta,
        Some(_) => {
            return Err(AnnoError::MissingField(
                config.metadata_key().to_string(),
                "metadata is not an object",
            ))
        }
    };
    for field in config.metadata_fields() {
        match meta.get(field.key()) {
            None | Some(Value::Null) => continue,
            Some(value) => {
                if let Some(value) = MetaValue::from_json(value) {
                    document.set_metadata(field.name(), value);
                } else {
                    tracing::warn!(
                        document = ?document.id(),
                        field = field.name(),
                        "metadata value is neither a string nor an integer, skipped"
                    );
                }
            }
        }
    }
    Ok(())
}

fn extract_tokens(
    document: &mut Document,
    root: &Map<String, Value>,
    config: &Config,
) -> Result<(), AnnoError> {
    let tokens = root
        .get(config.tokens_key())
        .and_then(|tokens| tokens.as_array())
        .ok_or_else(|| {
            AnnoError::MissingTokens(config.tokens_key().to_string(), "build")
        })?;
    document.tokens.reserve(tokens.len());
    let mut previous_end = 0;
    for (index, tokenobj) in tokens.iter().enumerate() {
        let tokenobj = tokenobj.as_object().ok_or_else(|| AnnoError::MalformedToken {
            index,
            reason: "token is not an object".to_string(),
        })?;
        let text = tokenobj
            .get(config.token_text_key())
            .and_then(|v| v.as_str())
            .ok_or_else(|| AnnoError::MalformedToken {
                index,
                reason: format!("missing or non-string {}", config.token_text_key()),
            })?;
        let begin = token_offset(tokenobj, config.token_begin_key(), index)?;
        let end = token_offset(tokenobj, config.token_end_key(), index)?;
        // part-of-speech, lemma and root are deliberately not carried over to the token
        if config.validate_offsets() {
            let reason = if begin > end {
                Some("begin offset beyond end offset")
            } else if end > document.textlen() {
                Some("end offset beyond the end of the text")
            } else if begin < previous_end {
                Some("token overlaps or precedes the previous token")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(AnnoError::InvalidTokenOffsets {
                    index,
                    begin,
                    end,
                    reason,
                });
            }
            previous_end = end;
        }
        document.push_token(Token::new(begin, end, text));
    }
    debug(config, || {
        format!("build: {} tokens", document.tokens().len())
    });
    Ok(())
}

fn token_offset(
    tokenobj: &Map<String, Value>,
    key: &str,
    index: usize,
) -> Result<usize, AnnoError> {
    let value = tokenobj.get(key).ok_or_else(|| AnnoError::MalformedToken {
        index,
        reason: format!("missing {}", key),
    })?;
    value
        .as_u64()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| AnnoError::MalformedToken {
            index,
            reason: format!("{} is not a non-negative integer: {}", key, value),
        })
}

/// Builds spans for one annotation group. A group that is absent (or empty) in the document is simply skipped.
fn extract_spans(
    document: &mut Document,
    root: &Map<String, Value>,
    mapping: &AnnotationGroupMapping,
    config: &Config,
) -> Result<(), AnnoError> {
    let annotations = match root.get(mapping.group()) {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Array(annotations)) if annotations.is_empty() => return Ok(()),
        Some(Value::Array(annotations)) => annotations,
        Some(_) => {
            return Err(AnnoError::MalformedAnnotation {
                group: mapping.group().to_string(),
                index: 0,
                reason: "annotation group is not an array".to_string(),
            })
        }
    };
    let tokencount = document.tokens().len();
    for (index, annotation) in annotations.iter().enumerate() {
        let malformed = |reason: String| AnnoError::MalformedAnnotation {
            group: mapping.group().to_string(),
            index,
            reason,
        };
        let annotation = annotation
            .as_object()
            .ok_or_else(|| malformed("annotation is not an object".to_string()))?;
        let value = annotation
            .get(config.annotation_value_key())
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                malformed(format!(
                    "missing or non-string {}",
                    config.annotation_value_key()
                ))
            })?;
        let begin = annotation
            .get(config.annotation_begin_key())
            .and_then(|v| v.as_i64())
            .ok_or_else(|| {
                malformed(format!(
                    "missing or non-integer {}",
                    config.annotation_begin_key()
                ))
            })?;
        let end = annotation
            .get(config.annotation_end_key())
            .and_then(|v| v.as_i64())
            .ok_or_else(|| {
                malformed(format!(
                    "missing or non-integer {}",
                    config.annotation_end_key()
                ))
            })?;

        // the end token is included in the span
        if begin < 0 || end < begin || end as u64 >= tokencount as u64 {
            return Err(AnnoError::TokenRangeOutOfBounds {
                group: mapping.group().to_string(),
                value: value.to_string(),
                begin,
                end,
                tokens: tokencount,
            });
        }
        document.push_span(Span::new(
            mapping.layer(),
            value,
            TokenHandle::new(begin as usize),
            TokenHandle::new(end as usize),
        ));
    }
    debug(config, || {
        format!(
            "build: {} annotations in group {} -> layer {}",
            annotations.len(),
            mapping.group(),
            mapping.layer()
        )
    });
    Ok(())
}

impl FromJson for Document {
    /// Reads and builds a document from a JSON file. The document is not given an identifier, use
    /// [`crate::import_file()`] for that.
    fn from_json_file(filename: &str, config: &Config) -> Result<Self, AnnoError> {
        debug(config, || format!("Document::from_json_file: {}", filename));
        let reader = open_file_reader(filename, config.workdir())?;
        let deserializer = &mut serde_json::Deserializer::from_reader(reader);
        let result: Result<Value, _> = serde_path_to_error::deserialize(deserializer);
        let json = result.map_err(|e| {
            AnnoError::JsonError(e, filename.to_string(), "Reading document from file")
        })?;
        build(&json, config)
    }

    fn from_json_str(string: &str, config: &Config) -> Result<Self, AnnoError> {
        let deserializer = &mut serde_json::Deserializer::from_str(string);
        let result: Result<Value, _> = serde_path_to_error::deserialize(deserializer);
        let json = result.map_err(|e| {
            AnnoError::JsonError(e, "(string)".to_string(), "Reading document from string")
        })?;
        build(&json, config)
    }
}
