use std::path::PathBuf;
use thiserror::Error;

/// The main error type for doclabel operations.
#[derive(Debug, Error)]
pub enum DoclabelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No documents found in {path}")]
    MissingInput { path: PathBuf },

    #[error("Failed to parse annotation sidecar {path}: {source}")]
    CorruptSidecar {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write annotation sidecar {path}: {source}")]
    SidecarWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write COCO JSON to {path}: {source}")]
    CocoJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write YOLO labels at {path}: {message}")]
    YoloWrite { path: PathBuf, message: String },

    #[error("Failed to encode page image {path}: {source}")]
    ImageEncode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Document error in {path}: {message}")]
    Document { path: PathBuf, message: String },

    #[error("Page {page} is out of range (document has {page_count} page(s))")]
    PageOutOfRange { page: usize, page_count: usize },

    #[error("Label {label} is not part of the label catalog")]
    LabelNotInCatalog { label: String },

    #[error("Invalid label catalog: {0}")]
    InvalidCatalog(String),

    #[error("Document backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
