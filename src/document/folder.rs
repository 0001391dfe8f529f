//! Discovery of the documents in a folder.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::DoclabelError;

const DOCUMENT_EXTENSIONS: [&str; 1] = ["pdf"];

/// Lists the documents directly inside `folder`, sorted by file name.
///
/// Only regular files with a document extension (case-insensitive) count;
/// subdirectories are not searched.
///
/// # Errors
/// Returns [`DoclabelError::MissingInput`] if the folder holds no documents,
/// and an IO error if it can't be listed.
pub fn list_documents(folder: &Path) -> Result<Vec<PathBuf>, DoclabelError> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(folder).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|source| {
            DoclabelError::Io(source.into_io_error().unwrap_or_else(|| {
                std::io::Error::other(format!("failed while listing {}", folder.display()))
            }))
        })?;

        if entry.file_type().is_file() && has_extension(entry.path(), &DOCUMENT_EXTENSIONS) {
            documents.push(entry.path().to_path_buf());
        }
    }

    if documents.is_empty() {
        return Err(DoclabelError::MissingInput {
            path: folder.to_path_buf(),
        });
    }

    documents.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(documents)
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    allowed
        .iter()
        .any(|allowed_ext| ext.eq_ignore_ascii_case(allowed_ext))
}
