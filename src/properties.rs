/*
    annograph (JSON to stand-off annotation graph)

        Licensed under the GNU General Public License v3
*/

//! This module contains [`Properties`], the flat key/value table that configurations are resolved from.
//! It can be parsed from the common `.properties` file format or be constructed from any iterator of pairs.

use regex::Regex;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::AnnoError;
use crate::file::open_file_reader;

/// Splits a logical line into key and value: the key runs up to the first unescaped separator (`=`, `:` or whitespace),
/// the separator may be surrounded by whitespace.
fn keyvalue_regex() -> &'static Regex {
    static KEYVALUE: OnceLock<Regex> = OnceLock::new();
    KEYVALUE.get_or_init(|| {
        Regex::new(r"(?s)^((?:\\.|[^\\=:\s])*)[ \t\x0C]*(?:[=:][ \t\x0C]*)?(.*)$")
            .expect("key/value regular expression must compile")
    })
}

/// A flat, ordered key/value table. Later assignments to the same key replace earlier ones,
/// but the key keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses properties from a string in `.properties` syntax
    pub fn from_str(data: &str) -> Result<Self, AnnoError> {
        let mut properties = Self::new();
        let data = data.strip_prefix('\u{feff}').unwrap_or(data);
        let mut lines = data.lines().enumerate();
        while let Some((lineindex, line)) = lines.next() {
            let line = line.trim_start_matches([' ', '\t', '\x0C']);
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let mut logical = String::with_capacity(line.len());
            let mut current = line;
            loop {
                if ends_with_continuation(current) {
                    logical.push_str(&current[..current.len() - 1]);
                    match lines.next() {
                        Some((_, next)) => current = next.trim_start_matches([' ', '\t', '\x0C']),
                        None => break,
                    }
                } else {
                    logical.push_str(current);
                    break;
                }
            }
            let lineno = lineindex + 1;
            let captures = keyvalue_regex().captures(&logical).ok_or_else(|| {
                AnnoError::PropertiesError(
                    lineno,
                    "unable to split key and value".to_string(),
                    "Properties::from_str",
                )
            })?;
            let key = unescape(captures.get(1).map_or("", |m| m.as_str()), lineno)?;
            let value = unescape(captures.get(2).map_or("", |m| m.as_str()), lineno)?;
            properties.insert(key, value);
        }
        Ok(properties)
    }

    /// Loads properties from a `.properties` file
    /// Relative filenames are resolved against `workdir` first, if specified.
    pub fn from_file(filename: &str, workdir: Option<&Path>) -> Result<Self, AnnoError> {
        tracing::debug!(target: "annograph", "Properties::from_file: {}", filename);
        let mut reader = open_file_reader(filename, workdir)?;
        let mut data = String::new();
        reader.read_to_string(&mut data).map_err(|e| {
            AnnoError::IOError(e, filename.to_string(), "Reading properties file failed")
        })?;
        Self::from_str(&data)
    }

    /// Sets a property, replacing the value of an existing key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Builder pattern variant of [`Self::insert()`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the raw value for a key, if set
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value for a key, only if it is set and not empty (or whitespace only)
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    /// Returns the value for a key, or a [`AnnoError::MissingConfigKey`] if it is absent or empty
    pub fn require(&self, key: &str) -> Result<&str, AnnoError> {
        self.resolve(key)
            .ok_or_else(|| AnnoError::MissingConfigKey(key.to_string(), "Properties::require"))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut properties = Self::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}

/// A line continues on the next one if it ends in an odd number of backslashes
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn unescape(s: &str, lineno: usize) -> Result<String, AnnoError> {
    if !s.contains('\\') {
        return Ok(s.to_string());
    }
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => result.push('\t'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('f') => result.push('\x0C'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let codepoint = if hex.len() == 4 {
                    u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
                } else {
                    None
                };
                match codepoint {
                    Some(c) => result.push(c),
                    None => {
                        return Err(AnnoError::PropertiesError(
                            lineno,
                            format!("malformed \\u escape: \\u{}", hex),
                            "Properties::from_str",
                        ))
                    }
                }
            }
            Some(other) => result.push(other),
            None => {}
        }
    }
    Ok(result)
}
