/*
    annograph (JSON to stand-off annotation graph)

        Licensed under the GNU General Public License v3
*/

//! This module defines the single error type [`AnnoError`] used throughout the library.

use std::error::Error;
use std::fmt;
use std::io;

// ------------------------------ ERROR DEFINITIONS & IMPLEMENTATIONS -------------------------------------------------------------

#[derive(Debug)]
/// This is the error type that is used throughout the library.
/// Configuration errors ([`AnnoError::MissingConfigKey`], [`AnnoError::DuplicateGroup`]) are fatal for an entire run,
/// all other content errors only concern the document being built.
pub enum AnnoError {
    /// A required configuration key was not resolved (absent or empty)
    MissingConfigKey(String, &'static str),

    /// An annotation group was configured more than once
    DuplicateGroup(String, &'static str),

    /// A required field is missing (or has the wrong type) in the JSON document
    MissingField(String, &'static str),

    /// The tokens array is missing in the JSON document
    MissingTokens(String, &'static str),

    /// A token object lacks required fields or has non-integer offsets.
    MalformedToken {
        index: usize,
        reason: String,
    },

    /// A token has offsets that are out of range for the text, or not in ascending non-overlapping order
    InvalidTokenOffsets {
        index: usize,
        begin: usize,
        end: usize,
        reason: &'static str,
    },

    /// An annotation object in an annotation group lacks required fields or has wrongly typed ones
    MalformedAnnotation {
        group: String,
        index: usize,
        reason: String,
    },

    /// An annotation references a token range that does not exist in the document
    TokenRangeOutOfBounds {
        group: String,
        value: String,
        begin: i64,
        end: i64,
        tokens: usize,
    },

    /// A handle does not resolve to an item in the document
    HandleError(&'static str),

    /// A character offset is beyond the end of the text
    CursorOutOfBounds(usize, &'static str),

    /// Parse error in a properties source (line number, message)
    PropertiesError(usize, String, &'static str),

    /// Error in (de)serialisation of JSON, with path information
    JsonError(
        serde_path_to_error::Error<serde_json::Error>,
        String,
        &'static str,
    ),

    SerializationError(String),

    IOError(io::Error, String, &'static str),

    /// Wraps another error with the identifier of the document it occurred in
    DocumentError(String, Box<AnnoError>),
}

impl From<&AnnoError> for String {
    /// Returns the error message as a String
    fn from(error: &AnnoError) -> String {
        match error {
            AnnoError::MissingConfigKey(key, contextmsg) => {
                format!(
                    "MissingConfigKey: Configuration key is absent or empty: {} ({})",
                    key, contextmsg
                )
            }
            AnnoError::DuplicateGroup(group, contextmsg) => {
                format!(
                    "DuplicateGroup: Annotation group configured more than once: {} ({})",
                    group, contextmsg
                )
            }
            AnnoError::MissingField(field, contextmsg) => {
                format!(
                    "MissingField: Required field is absent or invalid: {} ({})",
                    field, contextmsg
                )
            }
            AnnoError::MissingTokens(field, contextmsg) => {
                format!(
                    "MissingTokens: No tokens array under key {} ({})",
                    field, contextmsg
                )
            }
            AnnoError::MalformedToken { index, reason } => {
                format!("MalformedToken: Token #{}: {}", index, reason)
            }
            AnnoError::InvalidTokenOffsets {
                index,
                begin,
                end,
                reason,
            } => {
                format!(
                    "InvalidTokenOffsets: Token #{} with offset {}-{}: {}",
                    index, begin, end, reason
                )
            }
            AnnoError::MalformedAnnotation {
                group,
                index,
                reason,
            } => {
                format!(
                    "MalformedAnnotation: Annotation #{} in group {}: {}",
                    index, group, reason
                )
            }
            AnnoError::TokenRangeOutOfBounds {
                group,
                value,
                begin,
                end,
                tokens,
            } => {
                format!(
                    "TokenRangeOutOfBounds: group={} value={} range={}-{} but the document has {} tokens",
                    group, value, begin, end, tokens
                )
            }
            AnnoError::HandleError(contextmsg) => {
                format!("HandleError: Unable to get item by handle ({})", contextmsg)
            }
            AnnoError::CursorOutOfBounds(cursor, contextmsg) => {
                format!(
                    "CursorOutOfBounds: Cursor {} is out of bounds for the text ({})",
                    cursor, contextmsg
                )
            }
            AnnoError::PropertiesError(line, msg, contextmsg) => {
                format!(
                    "PropertiesError: line {}: {} ({})",
                    line, msg, contextmsg
                )
            }
            AnnoError::JsonError(err, path, contextmsg) => {
                format!(
                    "JsonError: Parsing JSON failed: {} at {} ({}) ({})",
                    err,
                    err.path().to_string(),
                    path,
                    contextmsg
                )
            }
            AnnoError::SerializationError(msg) => {
                format!("SerializationError: Serialization failed: {}", msg)
            }
            AnnoError::IOError(err, path, contextmsg) => {
                format!("IOError: {} ({}) ({})", err, path, contextmsg)
            }
            AnnoError::DocumentError(id, err) => {
                format!("DocumentError: in document {}: {}", id, String::from(err.as_ref()))
            }
        }
    }
}

impl fmt::Display for AnnoError {
    /// Formats the error message for printing
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let errmsg: String = String::from(self);
        write!(f, "[AnnoError] {}", errmsg)
    }
}

impl Error for AnnoError {}

impl AnnoError {
    /// Returns true for errors that concern the configuration and should abort an entire run
    pub fn is_config_error(&self) -> bool {
        match self {
            Self::MissingConfigKey(..) | Self::DuplicateGroup(..) | Self::PropertiesError(..) => {
                true
            }
            Self::DocumentError(_, err) => err.is_config_error(),
            _ => false,
        }
    }

    /// Returns the underlying error, looking through any document attribution
    pub fn inner(&self) -> &AnnoError {
        match self {
            Self::DocumentError(_, err) => err.inner(),
            _ => self,
        }
    }

    /// Attributes this error to the document with the specified identifier
    pub fn in_document(self, id: impl Into<String>) -> Self {
        match self {
            Self::DocumentError(..) => self,
            _ => Self::DocumentError(id.into(), Box::new(self)),
        }
    }
}
