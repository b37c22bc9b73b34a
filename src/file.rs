/*
    annograph (JSON to stand-off annotation graph)

        Licensed under the GNU General Public License v3
*/

//! This module contains some common helper functions for dealing with file I/O

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::AnnoError;

/// Get a file for reading or writing, this resolves relative files against the working directory (if configured)
pub(crate) fn get_filepath(filename: &str, workdir: Option<&Path>) -> Result<PathBuf, AnnoError> {
    if filename == "-" {
        //designates stdin or stdout
        return Ok(filename.into());
    }
    if filename.starts_with("https://") || filename.starts_with("http://") {
        return Err(AnnoError::IOError(
            std::io::Error::new(std::io::ErrorKind::Unsupported, "remote location"),
            filename.to_string(),
            "Loading URLs is not supported",
        ));
    }
    let path = if let Some(stripped) = filename.strip_prefix("file://") {
        PathBuf::from(stripped)
    } else {
        PathBuf::from(filename)
    };
    if path.is_absolute() {
        Ok(path)
    } else {
        //check whether we can find one in our workdir first
        if let Some(workdir) = workdir {
            let path = workdir.join(&path);
            if path.is_file() {
                //should also work with symlinks
                return Ok(path);
            }
        }

        //final fallback is simply relative to the current working directory
        // we don't test for existence here
        Ok(path)
    }
}

/// Auxiliary function to help open files
pub(crate) fn open_file(filename: &str, workdir: Option<&Path>) -> Result<File, AnnoError> {
    let found_filename = get_filepath(filename, workdir)?;
    File::open(found_filename.as_path()).map_err(|e| {
        AnnoError::IOError(
            e,
            found_filename.to_string_lossy().into_owned(),
            "Opening file for reading failed",
        )
    })
}

/// Auxiliary function to help open files
pub(crate) fn create_file(filename: &str, workdir: Option<&Path>) -> Result<File, AnnoError> {
    let found_filename = get_filepath(filename, workdir)?;
    File::create(found_filename.as_path()).map_err(|e| {
        AnnoError::IOError(
            e,
            found_filename.to_string_lossy().into_owned(),
            "Opening file for writing failed",
        )
    })
}

/// Auxiliary function to help open files
pub(crate) fn open_file_reader(
    filename: &str,
    workdir: Option<&Path>,
) -> Result<Box<dyn BufRead>, AnnoError> {
    if filename == "-" {
        //read from stdin
        Ok(Box::new(std::io::stdin().lock()))
    } else {
        Ok(Box::new(BufReader::new(open_file(filename, workdir)?)))
    }
}

/// Auxiliary function to help open files
pub(crate) fn open_file_writer(
    filename: &str,
    workdir: Option<&Path>,
) -> Result<Box<dyn Write>, AnnoError> {
    if filename == "-" {
        Ok(Box::new(std::io::stdout()))
    } else {
        Ok(Box::new(BufWriter::new(create_file(filename, workdir)?)))
    }
}

/// Returns the file name without directories and without its (last) extension,
/// this is what document identifiers are derived from.
pub(crate) fn file_stem(filename: &str) -> &str {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    match basename.rfind('.') {
        Some(pos) if pos > 0 => &basename[..pos],
        _ => basename,
    }
}
