//! The annotation record.
//!
//! One [`Annotation`] is a labeled rectangle on one page of one document.
//! Records are persisted in sidecar files and aggregated by the exporters.

use serde::{Deserialize, Serialize};

use super::bbox::BBoxXYXY;
use super::ids::AnnotationId;
use super::label::Label;
use super::space::Doc;

/// A labeled rectangle on a document page.
///
/// Equality is by [`AnnotationId`], not by content: two auto-detected boxes
/// with identical geometry are still distinct records.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Annotation {
    /// Store-assigned identifier. Not persisted.
    #[serde(skip)]
    pub id: AnnotationId,

    /// Zero-based page index.
    pub page: usize,

    /// Rectangle in document units. Not guaranteed to be ordered.
    #[serde(rename = "bbox_pdf", alias = "bbox_doc")]
    pub bbox: BBoxXYXY<Doc>,

    pub label: Label,

    /// Text inside the rectangle, filled in when the store is saved.
    #[serde(default)]
    pub text: String,
}

impl Annotation {
    /// Creates an annotation with empty text and no id yet.
    pub fn new(page: usize, bbox: BBoxXYXY<Doc>, label: Label) -> Self {
        Self {
            id: AnnotationId::default(),
            page,
            bbox,
            label,
            text: String::new(),
        }
    }

    /// Sets the text of the annotation.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Compares everything except the id.
    pub fn same_content(&self, other: &Annotation) -> bool {
        self.page == other.page
            && self.bbox == other.bbox
            && self.label == other.label
            && self.text == other.text
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Annotation {}

/// Rendered pages of a folder of documents together with their annotations.
///
/// Built by the export pipeline and consumed by the COCO and YOLO writers.
/// Image order is document order (lexicographic) then page order.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub images: Vec<DatasetImage>,
}

impl Dataset {
    /// Total number of annotations across all images.
    pub fn annotation_count(&self) -> usize {
        self.images.iter().map(|img| img.annotations.len()).sum()
    }
}

/// One rendered page image in a [`Dataset`].
#[derive(Clone, Debug)]
pub struct DatasetImage {
    /// File name relative to the export `images/` directory.
    pub file_name: String,

    /// Width of the rendered page in pixels.
    pub width: u32,

    /// Height of the rendered page in pixels.
    pub height: u32,

    /// Annotations on this page, in sidecar order.
    pub annotations: Vec<Annotation>,
}

impl DatasetImage {
    /// Creates an image entry without annotations.
    pub fn new(file_name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            file_name: file_name.into(),
            width,
            height,
            annotations: Vec::new(),
        }
    }

    /// Adds an annotation to this image.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}
