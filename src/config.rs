//! Where annotations and exports live on disk.

use std::path::{Path, PathBuf};

use crate::ir::io_sidecar::sidecar_path;

pub const DEFAULT_ANNOTATIONS_DIR: &str = "annotations";
pub const DEFAULT_EXPORT_DIR: &str = "exports";

/// Output directories shared by the session, the exporters and the CLI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workspace {
    pub annotations_dir: PathBuf,
    pub export_dir: PathBuf,
}

impl Workspace {
    pub fn new(annotations_dir: impl Into<PathBuf>, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            annotations_dir: annotations_dir.into(),
            export_dir: export_dir.into(),
        }
    }

    /// Both directories under `root`, with their default names.
    pub fn rooted_at(root: &Path) -> Self {
        Self::new(
            root.join(DEFAULT_ANNOTATIONS_DIR),
            root.join(DEFAULT_EXPORT_DIR),
        )
    }

    /// Sidecar file of `document`.
    pub fn sidecar_for(&self, document: &Path) -> PathBuf {
        sidecar_path(&self.annotations_dir, document)
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(DEFAULT_ANNOTATIONS_DIR, DEFAULT_EXPORT_DIR)
    }
}
