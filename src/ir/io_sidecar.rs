//! JSON sidecar files holding one document's annotations.
//!
//! A sidecar is a pretty-printed JSON array of annotation objects:
//!
//! ```json
//! [
//!   { "page": 0, "bbox_pdf": [72.0, 90.5, 410.0, 118.0], "label": "TITLE", "text": "..." }
//! ]
//! ```
//!
//! Sidecars live in an annotations directory and are named after the
//! document: `report.pdf` maps to `report_annotations.json`.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use super::io_atomic::write_atomic;
use super::model::Annotation;
use crate::error::DoclabelError;

const SIDECAR_SUFFIX: &str = "_annotations.json";

/// Returns the sidecar path for `document` inside `annotations_dir`.
pub fn sidecar_path(annotations_dir: &Path, document: &Path) -> PathBuf {
    annotations_dir.join(format!("{}{}", document_stem(document), SIDECAR_SUFFIX))
}

/// File stem of a document path, used for sidecar and image names.
pub fn document_stem(document: &Path) -> String {
    document
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Reads the annotations stored in a sidecar file.
///
/// A missing file is not an error: it yields an empty list.
///
/// # Errors
/// Returns [`DoclabelError::CorruptSidecar`] if the file is not a valid
/// annotation array, or an IO error if it exists but can't be read.
pub fn read_sidecar(path: &Path) -> Result<Vec<Annotation>, DoclabelError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(DoclabelError::Io(err)),
    };
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| DoclabelError::CorruptSidecar {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes annotations to a sidecar file, replacing it atomically.
///
/// # Errors
/// Returns an error if the file cannot be written. The previous sidecar is
/// left intact in that case.
pub fn write_sidecar(path: &Path, annotations: &[Annotation]) -> Result<(), DoclabelError> {
    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(writer, annotations).map_err(|source| {
            DoclabelError::SidecarWrite {
                path: path.to_path_buf(),
                source,
            }
        })
    })
}

/// Parses sidecar content from a string.
///
/// Useful for testing without file I/O.
pub fn from_sidecar_str(json: &str) -> Result<Vec<Annotation>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parses sidecar content from raw bytes.
///
/// Used by the fuzz target.
pub fn from_sidecar_slice(bytes: &[u8]) -> Result<Vec<Annotation>, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Serializes annotations to a pretty-printed sidecar string.
pub fn to_sidecar_string(annotations: &[Annotation]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(annotations)
}
