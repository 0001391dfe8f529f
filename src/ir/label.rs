//! Region labels and the ordered label catalog.
//!
//! The catalog order is a wire-format contract: COCO `category_id` is the
//! 1-based position of a label, and the YOLO class index is that id minus one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::CategoryId;
use crate::error::DoclabelError;

/// Semantic label of an annotated document region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Title,
    H1,
    H2,
    H3,
    H4,
    Body,
}

impl Label {
    /// All labels in catalog order.
    pub const ALL: [Label; 6] = [
        Label::Title,
        Label::H1,
        Label::H2,
        Label::H3,
        Label::H4,
        Label::Body,
    ];

    /// Name as written to sidecars and COCO categories.
    pub fn name(&self) -> &'static str {
        match self {
            Label::Title => "TITLE",
            Label::H1 => "H1",
            Label::H2 => "H2",
            Label::H3 => "H3",
            Label::H4 => "H4",
            Label::Body => "BODY",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Label {
    type Err = DoclabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::ALL
            .into_iter()
            .find(|label| label.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DoclabelError::LabelNotInCatalog {
                label: s.to_string(),
            })
    }
}

/// Ordered mapping from labels to 1-based category ids.
///
/// An immutable value handed to the exporters, the heading detector and the
/// editor. Reordering entries changes every exported class id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelCatalog {
    labels: Vec<Label>,
}

impl LabelCatalog {
    /// Builds a catalog from an explicit ordering.
    ///
    /// # Errors
    /// Fails if the list is empty or names a label twice.
    pub fn new(labels: Vec<Label>) -> Result<Self, DoclabelError> {
        if labels.is_empty() {
            return Err(DoclabelError::InvalidCatalog(
                "catalog must contain at least one label".to_string(),
            ));
        }
        for (idx, label) in labels.iter().enumerate() {
            if labels[..idx].contains(label) {
                return Err(DoclabelError::InvalidCatalog(format!(
                    "label {} appears more than once",
                    label
                )));
            }
        }
        Ok(Self { labels })
    }

    /// TITLE, H1, H2, H3, H4, BODY.
    pub fn standard() -> Self {
        Self {
            labels: Label::ALL.to_vec(),
        }
    }

    /// Category id of `label`, if the catalog contains it.
    pub fn category_id(&self, label: Label) -> Option<CategoryId> {
        self.labels
            .iter()
            .position(|l| *l == label)
            .map(|idx| CategoryId::new(idx as u64 + 1))
    }

    /// Like [`category_id`](Self::category_id) but reports a missing label.
    pub fn require(&self, label: Label) -> Result<CategoryId, DoclabelError> {
        self.category_id(label)
            .ok_or_else(|| DoclabelError::LabelNotInCatalog {
                label: label.name().to_string(),
            })
    }

    pub fn contains(&self, label: Label) -> bool {
        self.labels.contains(&label)
    }

    /// Iterates `(category id, label)` pairs in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = (CategoryId, Label)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .map(|(idx, label)| (CategoryId::new(idx as u64 + 1), *label))
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for LabelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
