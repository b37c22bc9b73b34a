/*
    annograph (JSON to stand-off annotation graph)

        Licensed under the GNU General Public License v3
*/

//! ## Introduction
//!
//! `annograph` maps per-document JSON corpus exports onto an in-memory stand-off annotation graph.
//! Each input document carries a text, a tokenization with character offsets into that text, a nested
//! metadata object and any number of annotation groups: arrays of `{value, start, end}` objects
//! where `start` and `end` are (inclusive) token indices. Which JSON keys hold what is not hardcoded
//! but resolved from a flat key/value configuration.
//!
//! **What can you do with this library?**
//!
//! * Resolve a [`Config`] once from a `.properties` file, any iterator of key/value pairs ([`Properties`]),
//!   a serialised JSON configuration, or programmatically via [`ConfigBuilder`].
//! * Build a [`Document`] from a parsed JSON value with [`build()`]: primary text, [`Token`]s anchored to
//!   unicode codepoint offsets, [`Span`]s over inclusive token ranges (one layer per annotation group)
//!   and typed metadata ([`MetaValue`]).
//! * Import files and batches with [`import_file()`], [`import_files()`] and [`build_batch()`]; batches are
//!   processed in parallel and one malformed document never stops the others, see [`ImportReport`].
//! * Inspect documents: offset-based token lookup, span text, spans by layer or by token.
//! * Export documents to JSON ([`ToJson`]) or CSV ([`ToCsv`]), and checksum their text.
//!
//! The library emits log events through `tracing` but never installs a subscriber; verbose events are
//! only emitted in debug mode ([`Config::with_debug()`]).

mod builder;
mod config;
mod datavalue;
mod document;
mod error;
mod file;
mod import;
mod json;
mod properties;
mod span;
mod token;
mod types;

#[cfg(feature = "csv")]
mod csv;

#[cfg(feature = "textvalidation")]
mod textvalidation;

// Our internal crate structure is not very relevant to the outside world,
// expose all structs and traits in the root namespace, and be explicit about it:

#[cfg(feature = "csv")]
pub use crate::csv::{CsvTable, ToCsv};
pub use builder::{build, build_with_id};
pub use config::{
    AnnotationGroupMapping, Config, ConfigBuilder, MetadataField, SourceTypes, DEFAULT_GROUPS,
    METADATA_FIELDS,
};
pub use datavalue::MetaValue;
pub use document::Document;
pub use error::AnnoError;
pub use import::{build_batch, import_file, import_files, is_metadata_file, ImportReport};
pub use json::{FromJson, ToJson};
pub use properties::Properties;
pub use span::{Span, SpanHandle};
pub use token::{Token, TokenHandle};
pub use types::{Handle, Type, TypeInfo};
