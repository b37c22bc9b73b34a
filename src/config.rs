/*
    annograph (JSON to stand-off annotation graph)

        Licensed under the GNU General Public License v3
*/

//! This module contains the [`Config`] that tells the builder where to find things in the JSON documents
//! of a particular corpus export, and the [`ConfigBuilder`] to construct one programmatically.
//!
//! A configuration is resolved once, up front, and is immutable afterwards. It can be shared freely
//! (read-only) between threads that build documents concurrently.

use sealed::sealed;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::AnnoError;
use crate::file::open_file_reader;
use crate::json::ToJson;
use crate::properties::Properties;
use crate::types::*;

/// The (group property, label property) pairs that are resolved by [`Config::from_properties()`].
/// The first property holds the name of the annotation group array in the JSON documents, the second the layer label for its spans.
pub const DEFAULT_GROUPS: &[(&str, &str)] = &[
    ("persons", "key_person"),
    ("metamotives", "key_metamotive"),
    ("motives", "key_motive"),
    ("sections", "key_section"),
    ("pages", "key_page"),
];

/// The fixed set of logical document metadata fields.
pub const METADATA_FIELDS: &[&str] = &[
    "madhab_name",
    "madhab_id",
    "tafsir_name",
    "tafsir_id",
    "sura",
    "aya_ini",
    "aya_end",
    "book_id",
    "book_name",
    "chapter_id",
    "chapter_name",
    "subchapter_id",
    "subchapter_name",
    "section_id",
    "section_name",
    "pages",
    "title",
    "author",
    "date",
    "url",
];

/// Maps an annotation group (a named array in the JSON document) to the layer label its spans get.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationGroupMapping {
    group: String,
    layer: String,
}

impl AnnotationGroupMapping {
    pub fn new(group: impl Into<String>, layer: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            layer: layer.into(),
        }
    }

    /// The key of the annotation array in the JSON document
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The output layer label
    pub fn layer(&self) -> &str {
        &self.layer
    }
}

/// Maps a logical metadata field to the key it has in the nested metadata object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    name: String,
    key: String,
}

impl MetadataField {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Source type tagging: a document whose file stem ends in one of the markers gets a metadata entry `key = marker`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTypes {
    key: String,
    markers: Vec<String>,
}

impl SourceTypes {
    pub fn new(key: impl Into<String>, markers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            key: key.into(),
            markers: markers.into_iter().map(|m| m.into()).collect(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Returns the first marker the file stem ends with, if any
    pub(crate) fn detect<'a>(&'a self, stem: &str) -> Option<&'a str> {
        self.markers
            .iter()
            .find(|marker| stem.ends_with(marker.as_str()))
            .map(|marker| marker.as_str())
    }
}

/// This holds the resolved configuration. Field names in serialisation correspond with the property keys.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Key of the primary text
    #[serde(rename = "text")]
    pub(crate) text_key: String,

    /// Key of the tokens array
    #[serde(rename = "tokens")]
    pub(crate) tokens_key: String,

    /// Key of the nested metadata object
    #[serde(rename = "meta")]
    pub(crate) metadata_key: String,

    /// Key of the (normalized) token text inside a token object
    #[serde(rename = "tok_tok")]
    pub(crate) token_text_key: String,

    /// Key of the begin offset inside a token object
    #[serde(rename = "tok_ini")]
    pub(crate) token_begin_key: String,

    /// Key of the end offset inside a token object
    #[serde(rename = "tok_end")]
    pub(crate) token_end_key: String,

    /// Key of the value inside an annotation object
    #[serde(rename = "annotation_val")]
    pub(crate) annotation_value_key: String,

    /// Key of the first token index inside an annotation object
    #[serde(rename = "annotation_ini")]
    pub(crate) annotation_begin_key: String,

    /// Key of the last (inclusive!) token index inside an annotation object
    #[serde(rename = "annotation_end")]
    pub(crate) annotation_end_key: String,

    /// Annotation groups, processed in this order
    pub(crate) groups: Vec<AnnotationGroupMapping>,

    #[serde(default = "default_metadata_fields")]
    pub(crate) metadata_fields: Vec<MetadataField>,

    /// Files with this suffix (before the extension) hold corpus metadata and are skipped by the importer
    #[serde(rename = "meta_file_suf", default)]
    pub(crate) metadata_file_suffix: Option<String>,

    #[serde(default)]
    pub(crate) source_types: Option<SourceTypes>,

    /// Debug mode
    #[serde(default)]
    pub(crate) debug: bool,

    /// Validate that token offsets fall within the text and are ascending and non-overlapping
    #[serde(default = "default_true")]
    pub(crate) validate_offsets: bool,

    ///generate pseudo-random document identifiers when missing. Each will consist of 21 URL-friendly ASCII symbols after a `D` prefix
    #[serde(default)]
    pub(crate) generate_ids: bool,

    /// The working directory
    #[serde(default)]
    pub(crate) workdir: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_metadata_fields() -> Vec<MetadataField> {
    METADATA_FIELDS
        .iter()
        .map(|name| MetadataField::new(*name, *name))
        .collect()
}

#[sealed]
impl TypeInfo for Config {
    fn typeinfo() -> Type {
        Type::Config
    }
}

impl ToJson for Config {}

impl Config {
    /// Resolves a configuration from properties, using the [`DEFAULT_GROUPS`]
    pub fn from_properties(properties: &Properties) -> Result<Self, AnnoError> {
        Self::from_properties_with_groups(properties, DEFAULT_GROUPS)
    }

    /// Resolves a configuration from properties. `groups` lists (group property, label property) pairs,
    /// both properties of every pair must resolve.
    pub fn from_properties_with_groups(
        properties: &Properties,
        groups: &[(&str, &str)],
    ) -> Result<Self, AnnoError> {
        let mut builder = ConfigBuilder::new()
            .with_text_key(properties.require("text")?)
            .with_tokens_key(properties.require("tokens")?)
            .with_metadata_key(properties.require("meta")?)
            .with_token_keys(
                properties.require("tok_tok")?,
                properties.require("tok_ini")?,
                properties.require("tok_end")?,
            )
            .with_annotation_keys(
                properties.require("annotation_val")?,
                properties.require("annotation_ini")?,
                properties.require("annotation_end")?,
            );
        for (groupkey, labelkey) in groups {
            builder = builder.with_group(properties.require(groupkey)?, properties.require(labelkey)?);
        }
        builder = builder.with_metadata_fields(
            METADATA_FIELDS
                .iter()
                .map(|name| MetadataField::new(*name, properties.resolve(name).unwrap_or(name))),
        );
        if let Some(suffix) = properties.resolve("meta_file_suf") {
            builder = builder.with_metadata_file_suffix(suffix);
        }
        if let Some(key) = properties.resolve("source_type_key") {
            let markers: Vec<&str> = ["original", "commentary"]
                .iter()
                .filter_map(|name| properties.resolve(name))
                .collect();
            builder = builder.with_source_types(SourceTypes::new(key, markers));
        }
        builder.build()
    }

    /// Loads and resolves a configuration from a `.properties` file, using the [`DEFAULT_GROUPS`]
    pub fn from_properties_file(filename: &str) -> Result<Self, AnnoError> {
        let properties = Properties::from_file(filename, None)?;
        Self::from_properties(&properties)
    }

    /// Loads a serialised configuration from a JSON file
    pub fn from_file(filename: &str) -> Result<Self, AnnoError> {
        let reader = open_file_reader(filename, None)?;
        let deserializer = &mut serde_json::Deserializer::from_reader(reader);
        let result: Result<Self, _> = serde_path_to_error::deserialize(deserializer);
        let config = result.map_err(|e| {
            AnnoError::JsonError(e, filename.to_string(), "Reading config from file")
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that all required keys are set and no annotation group occurs twice
    pub(crate) fn validate(&self) -> Result<(), AnnoError> {
        for (name, value) in [
            ("text", &self.text_key),
            ("tokens", &self.tokens_key),
            ("meta", &self.metadata_key),
            ("tok_tok", &self.token_text_key),
            ("tok_ini", &self.token_begin_key),
            ("tok_end", &self.token_end_key),
            ("annotation_val", &self.annotation_value_key),
            ("annotation_ini", &self.annotation_begin_key),
            ("annotation_end", &self.annotation_end_key),
        ] {
            if value.trim().is_empty() {
                return Err(AnnoError::MissingConfigKey(
                    name.to_string(),
                    "Config::validate",
                ));
            }
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for mapping in self.groups.iter() {
            if mapping.group.trim().is_empty() || mapping.layer.trim().is_empty() {
                return Err(AnnoError::MissingConfigKey(
                    format!("group {:?} -> layer {:?}", mapping.group, mapping.layer),
                    "Config::validate",
                ));
            }
            if !seen.insert(mapping.group.as_str()) {
                return Err(AnnoError::DuplicateGroup(
                    mapping.group.clone(),
                    "Config::validate",
                ));
            }
        }
        for field in self.metadata_fields.iter() {
            if field.key.trim().is_empty() {
                return Err(AnnoError::MissingConfigKey(
                    field.name.clone(),
                    "Config::validate (metadata field)",
                ));
            }
        }
        Ok(())
    }

    pub fn text_key(&self) -> &str {
        &self.text_key
    }

    pub fn tokens_key(&self) -> &str {
        &self.tokens_key
    }

    pub fn metadata_key(&self) -> &str {
        &self.metadata_key
    }

    pub fn token_text_key(&self) -> &str {
        &self.token_text_key
    }

    pub fn token_begin_key(&self) -> &str {
        &self.token_begin_key
    }

    pub fn token_end_key(&self) -> &str {
        &self.token_end_key
    }

    pub fn annotation_value_key(&self) -> &str {
        &self.annotation_value_key
    }

    pub fn annotation_begin_key(&self) -> &str {
        &self.annotation_begin_key
    }

    pub fn annotation_end_key(&self) -> &str {
        &self.annotation_end_key
    }

    /// Returns the annotation group mappings in processing order
    pub fn groups(&self) -> &[AnnotationGroupMapping] {
        &self.groups
    }

    pub fn metadata_fields(&self) -> &[MetadataField] {
        &self.metadata_fields
    }

    pub fn metadata_file_suffix(&self) -> Option<&str> {
        self.metadata_file_suffix.as_deref()
    }

    pub fn source_types(&self) -> Option<&SourceTypes> {
        self.source_types.as_ref()
    }

    /// Enable or disable debug mode. In debug mode, verbose debug events will be logged
    pub fn with_debug(mut self, value: bool) -> Self {
        self.debug = value;
        self
    }

    /// Is debug mode enabled or not?
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Enable/disable validation of token offsets against the text (bounds, ascending order, no overlap)
    pub fn with_validate_offsets(mut self, value: bool) -> Self {
        self.validate_offsets = value;
        self
    }

    pub fn validate_offsets(&self) -> bool {
        self.validate_offsets
    }

    /// Generate document identifiers when missing.
    pub fn with_generate_ids(mut self, value: bool) -> Self {
        self.generate_ids = value;
        self
    }

    /// Is generation of document identifiers enabled or not?
    pub fn generate_ids(&self) -> bool {
        self.generate_ids
    }

    /// Sets the working directory, relative filenames are resolved against it first
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(workdir.into());
        self
    }

    ///  Return the working directory, if set
    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }
}

/// Builds a [`Config`] programmatically. All keys start out unset, [`ConfigBuilder::build()`] fails
/// with [`AnnoError::MissingConfigKey`] for any required key that is still unset.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    text_key: String,
    tokens_key: String,
    metadata_key: String,
    token_text_key: String,
    token_begin_key: String,
    token_end_key: String,
    annotation_value_key: String,
    annotation_begin_key: String,
    annotation_end_key: String,
    groups: Vec<AnnotationGroupMapping>,
    metadata_fields: Option<Vec<MetadataField>>,
    metadata_file_suffix: Option<String>,
    source_types: Option<SourceTypes>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text_key(mut self, key: impl Into<String>) -> Self {
        self.text_key = key.into();
        self
    }

    pub fn with_tokens_key(mut self, key: impl Into<String>) -> Self {
        self.tokens_key = key.into();
        self
    }

    pub fn with_metadata_key(mut self, key: impl Into<String>) -> Self {
        self.metadata_key = key.into();
        self
    }

    /// Sets the keys of the token text, begin offset and end offset inside token objects
    pub fn with_token_keys(
        mut self,
        text: impl Into<String>,
        begin: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.token_text_key = text.into();
        self.token_begin_key = begin.into();
        self.token_end_key = end.into();
        self
    }

    /// Sets the keys of the value, first token index and last token index inside annotation objects
    pub fn with_annotation_keys(
        mut self,
        value: impl Into<String>,
        begin: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.annotation_value_key = value.into();
        self.annotation_begin_key = begin.into();
        self.annotation_end_key = end.into();
        self
    }

    /// Adds an annotation group, groups are processed in the order they are added
    pub fn with_group(mut self, group: impl Into<String>, layer: impl Into<String>) -> Self {
        self.groups.push(AnnotationGroupMapping::new(group, layer));
        self
    }

    /// Replaces the metadata fields, by default all [`METADATA_FIELDS`] are extracted from keys of the same name
    pub fn with_metadata_fields(mut self, fields: impl IntoIterator<Item = MetadataField>) -> Self {
        self.metadata_fields = Some(fields.into_iter().collect());
        self
    }

    pub fn with_metadata_file_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.metadata_file_suffix = Some(suffix.into());
        self
    }

    pub fn with_source_types(mut self, source_types: SourceTypes) -> Self {
        self.source_types = Some(source_types);
        self
    }

    /// Validates and returns the final configuration
    pub fn build(self) -> Result<Config, AnnoError> {
        let config = Config {
            text_key: self.text_key,
            tokens_key: self.tokens_key,
            metadata_key: self.metadata_key,
            token_text_key: self.token_text_key,
            token_begin_key: self.token_begin_key,
            token_end_key: self.token_end_key,
            annotation_value_key: self.annotation_value_key,
            annotation_begin_key: self.annotation_begin_key,
            annotation_end_key: self.annotation_end_key,
            groups: self.groups,
            metadata_fields: self.metadata_fields.unwrap_or_else(default_metadata_fields),
            metadata_file_suffix: self.metadata_file_suffix,
            source_types: self.source_types,
            debug: false,
            validate_offsets: true,
            generate_ids: false,
            workdir: None,
        };
        config.validate()?;
        Ok(config)
    }
}
