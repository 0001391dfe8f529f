//! Font-size heading classifier.

use crate::document::TextSpan;
use crate::error::DoclabelError;
use crate::ir::{Annotation, Label, LabelCatalog};

/// Spans whose trimmed text has this many chars or fewer are ignored.
pub const MIN_SPAN_CHARS: usize = 2;

/// Font-size cut-offs, exclusive lower bounds, in document units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadingThresholds {
    pub title: f64,
    pub h1: f64,
    pub h2: f64,
}

impl Default for HeadingThresholds {
    fn default() -> Self {
        Self {
            title: 18.0,
            h1: 14.0,
            h2: 12.0,
        }
    }
}

impl HeadingThresholds {
    /// Label for a span of the given font size.
    pub fn classify(&self, font_size: f64) -> Label {
        if font_size > self.title {
            Label::Title
        } else if font_size > self.h1 {
            Label::H1
        } else if font_size > self.h2 {
            Label::H2
        } else {
            Label::Body
        }
    }
}

/// Labels every span could receive, in threshold order.
const EMITTED_LABELS: [Label; 4] = [Label::Title, Label::H1, Label::H2, Label::Body];

/// Classifies text spans into heading annotations.
#[derive(Clone, Debug)]
pub struct HeadingDetector {
    thresholds: HeadingThresholds,
}

impl HeadingDetector {
    /// Creates a detector, failing if the catalog lacks a label it emits.
    pub fn new(catalog: &LabelCatalog, thresholds: HeadingThresholds) -> Result<Self, DoclabelError> {
        for label in EMITTED_LABELS {
            catalog.require(label)?;
        }
        Ok(Self { thresholds })
    }

    /// One annotation per qualifying span on `page`, in span order.
    ///
    /// The caller appends the result to its store; running twice on the same
    /// page yields duplicates.
    pub fn detect(&self, page: usize, spans: &[TextSpan]) -> Vec<Annotation> {
        spans
            .iter()
            .filter_map(|span| {
                let text = span.text.trim();
                if text.chars().count() <= MIN_SPAN_CHARS {
                    return None;
                }
                let label = self.thresholds.classify(span.font_size);
                Some(Annotation::new(page, span.bbox, label).with_text(text))
            })
            .collect()
    }
}
