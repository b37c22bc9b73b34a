/*
    annograph (JSON to stand-off annotation graph)

        Licensed under the GNU General Public License v3
*/

use serde::{Deserialize, Serialize};
use std::fmt;

/// A document metadata value. Metadata values keep the native type they had in the JSON input.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum MetaValue {
    String(String),
    Int(i64),
}

impl MetaValue {
    /// Converts a JSON value, only strings and integers are valid metadata values
    pub(crate) fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self::String(s.clone())),
            serde_json::Value::Number(n) => n.as_i64().map(Self::Int),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{}", s),
            Self::Int(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(item: &str) -> Self {
        Self::String(item.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(item: String) -> Self {
        Self::String(item)
    }
}

impl From<i64> for MetaValue {
    fn from(item: i64) -> Self {
        Self::Int(item)
    }
}

impl From<i32> for MetaValue {
    fn from(item: i32) -> Self {
        Self::Int(item as i64)
    }
}

// These PartialEq implementation allow for more direct comparisons

impl PartialEq<str> for MetaValue {
    fn eq(&self, other: &str) -> bool {
        match self {
            Self::String(v) => v == other,
            _ => false,
        }
    }
}

impl PartialEq<&str> for MetaValue {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<i64> for MetaValue {
    fn eq(&self, other: &i64) -> bool {
        match self {
            Self::Int(v) => v == other,
            _ => false,
        }
    }
}
