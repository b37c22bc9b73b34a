/*
    annograph (JSON to stand-off annotation graph)

        Licensed under the GNU General Public License v3
*/

//! This module contains the [`ToJson`] and [`FromJson`] traits that are used
//! in serialisation to/from JSON. Reading corpus documents is implemented by the builder,
//! not here.

use std::path::Path;

use crate::config::Config;
use crate::error::AnnoError;
use crate::file::*;
use crate::types::*;

pub trait ToJson
where
    Self: TypeInfo + serde::Serialize,
{
    /// Writes a serialisation to any writer
    /// Lower-level function
    fn to_json_writer<W>(&self, writer: W, compact: bool) -> Result<(), AnnoError>
    where
        W: std::io::Write,
    {
        match compact {
            false => serde_json::to_writer_pretty(writer, &self),
            true => serde_json::to_writer(writer, &self),
        }
        .map_err(|e| {
            AnnoError::SerializationError(format!("Writing {} to file: {}", Self::typeinfo(), e))
        })
    }

    /// Writes this structure to a file, relative filenames are resolved against `workdir`
    fn to_json_file(
        &self,
        filename: &str,
        workdir: Option<&Path>,
        compact: bool,
    ) -> Result<(), AnnoError> {
        tracing::debug!(target: "annograph", "{}.to_json_file: filename={:?}", Self::typeinfo(), filename);
        let writer = open_file_writer(filename, workdir)?;
        self.to_json_writer(writer, compact)
    }

    /// Serializes this structure to one string.
    fn to_json_string(&self, compact: bool) -> Result<String, AnnoError> {
        match compact {
            false => serde_json::to_string_pretty(&self),
            true => serde_json::to_string(&self),
        }
        .map_err(|e| {
            AnnoError::SerializationError(format!("Writing {} to string: {}", Self::typeinfo(), e))
        })
    }
}

pub trait FromJson
where
    Self: TypeInfo + Sized,
{
    fn from_json_file(filename: &str, config: &Config) -> Result<Self, AnnoError>;

    fn from_json_str(string: &str, config: &Config) -> Result<Self, AnnoError>;
}
