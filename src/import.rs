/*
    annograph (JSON to stand-off annotation graph)

        Licensed under the GNU General Public License v3
*/

//! This module contains the importer, which reads corpus documents from file and builds them in batches.
//!
//! Documents in a batch are built in parallel against one shared, read-only [`Config`]. A document that
//! fails does not affect the others: its error is recorded in the [`ImportReport`] along with its identifier.

use rayon::prelude::*;
use serde_json::Value;

use crate::builder::build_with_id;
use crate::config::Config;
use crate::datavalue::MetaValue;
use crate::document::Document;
use crate::error::AnnoError;
use crate::file::{file_stem, open_file_reader};
use crate::types::*;

/// The outcome of a batch import. Documents and failures are kept in input order.
#[derive(Debug, Default)]
pub struct ImportReport {
    documents: Vec<Document>,
    failures: Vec<(String, AnnoError)>,
    skipped: Vec<String>,
}

impl ImportReport {
    /// The successfully built documents
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }

    /// Identifiers of the documents that failed, along with the error
    pub fn failures(&self) -> &[(String, AnnoError)] {
        &self.failures
    }

    /// Files that were skipped because they hold corpus metadata rather than a document
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Returns true if no document failed
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    fn add(&mut self, id: String, result: Result<Option<Document>, AnnoError>) {
        match result {
            Ok(Some(document)) => self.documents.push(document),
            Ok(None) => self.skipped.push(id),
            Err(err) => {
                tracing::warn!(document = %id, error = %err, "document failed");
                self.failures.push((id, err));
            }
        }
    }
}

/// Returns true if the file holds corpus metadata (as per the configured suffix) rather than a document
pub fn is_metadata_file(filename: &str, config: &Config) -> bool {
    if let Some(suffix) = config.metadata_file_suffix() {
        filename.ends_with(suffix) || file_stem(filename).ends_with(suffix)
    } else {
        false
    }
}

/// Reads a JSON file and builds a document from it. The document identifier is the file stem.
/// Returns `Ok(None)` for corpus metadata files, which are skipped.
///
/// If source types are configured and the file stem ends with one of the markers, the marker is added
/// to the document metadata.
pub fn import_file(filename: &str, config: &Config) -> Result<Option<Document>, AnnoError> {
    if is_metadata_file(filename, config) {
        debug(config, || format!("import_file: skipping metadata file {}", filename));
        return Ok(None);
    }
    let id = file_stem(filename);
    debug(config, || format!("import_file: {} (id={})", filename, id));
    let reader = open_file_reader(filename, config.workdir())?;
    let deserializer = &mut serde_json::Deserializer::from_reader(reader);
    let result: Result<Value, _> = serde_path_to_error::deserialize(deserializer);
    let json = result
        .map_err(|e| AnnoError::JsonError(e, filename.to_string(), "Reading document from file"))?;
    let mut document = build_with_id(&json, Some(id), config)?;
    if let Some(source_types) = config.source_types() {
        if let Some(marker) = source_types.detect(id) {
            document.set_metadata(source_types.key(), MetaValue::from(marker));
        }
    }
    Ok(Some(document))
}

/// Imports many files in parallel. Errors are attributed to the file they occurred in and do not stop the batch.
pub fn import_files<S>(filenames: &[S], config: &Config) -> ImportReport
where
    S: AsRef<str> + Sync,
{
    let results: Vec<_> = filenames
        .par_iter()
        .map(|filename| {
            let filename = filename.as_ref();
            (
                filename.to_string(),
                import_file(filename, config).map_err(|e| e.in_document(filename)),
            )
        })
        .collect();
    let mut report = ImportReport::default();
    for (filename, result) in results {
        report.add(filename, result);
    }
    debug(config, || {
        format!(
            "import_files: {} documents, {} failures, {} skipped",
            report.documents.len(),
            report.failures.len(),
            report.skipped.len()
        )
    });
    report
}

/// Builds many already parsed documents in parallel. Each document is given the identifier it is paired with.
pub fn build_batch<S>(documents: &[(S, Value)], config: &Config) -> ImportReport
where
    S: AsRef<str> + Sync,
{
    let results: Vec<_> = documents
        .par_iter()
        .map(|(id, json)| {
            let id = id.as_ref();
            (
                id.to_string(),
                build_with_id(json, Some(id), config)
                    .map(Some)
                    .map_err(|e| e.in_document(id)),
            )
        })
        .collect();
    let mut report = ImportReport::default();
    for (id, result) in results {
        report.add(id, result);
    }
    report
}
