//! Export summary types.
//!
//! Counts what an export wrote and collects notes about records that were
//! altered or skipped on the way out, the way a conversion report would.

use serde::Serialize;
use std::fmt;

/// What a dataset export produced.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ExportSummary {
    /// Output formats written (`coco`, `yolo`).
    pub formats: Vec<String>,
    pub documents: usize,
    pub images: usize,
    pub annotations: usize,
    /// Files written, images included.
    pub files_written: usize,
    pub issues: Vec<ExportIssue>,
}

impl ExportSummary {
    pub fn add(&mut self, issue: ExportIssue) {
        self.issues.push(issue);
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ExportSeverity::Warning)
            .count()
    }

    pub fn info_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ExportSeverity::Info)
            .count()
    }
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  {} documents, {} images, {} annotations",
            self.documents, self.images, self.annotations
        )?;
        writeln!(
            f,
            "  {} file(s) written ({})",
            self.files_written,
            self.formats.join(", ")
        )?;

        for (title, severity, count) in [
            ("Warnings", ExportSeverity::Warning, self.warning_count()),
            ("Notes", ExportSeverity::Info, self.info_count()),
        ] {
            if count == 0 {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "{} ({}):", title, count)?;
            for issue in self.issues.iter().filter(|i| i.severity == severity) {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        Ok(())
    }
}

/// One note about the export.
#[derive(Clone, Debug, Serialize)]
pub struct ExportIssue {
    pub severity: ExportSeverity,
    pub code: ExportIssueCode,
    pub message: String,
}

impl ExportIssue {
    /// Records were dropped.
    pub fn warning(code: ExportIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ExportSeverity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Records were kept but adjusted.
    pub fn info(code: ExportIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ExportSeverity::Info,
            code,
            message: message.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportSeverity {
    Warning,
    Info,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportIssueCode {
    /// Annotation refers to a page the document doesn't have.
    PageOutOfRange,
    /// Annotation extends past the page and YOLO output clips it.
    ClippedToPage,
    /// Document has no sidecar; its pages are exported unannotated.
    NoSidecar,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_counts_and_issues() {
        let mut summary = ExportSummary {
            formats: vec!["coco".to_string(), "yolo".to_string()],
            documents: 2,
            images: 5,
            annotations: 7,
            files_written: 12,
            issues: Vec::new(),
        };
        summary.add(ExportIssue::warning(
            ExportIssueCode::PageOutOfRange,
            "a.pdf: 1 annotation(s) on missing pages skipped",
        ));
        summary.add(ExportIssue::info(
            ExportIssueCode::ClippedToPage,
            "b.pdf: 2 annotation(s) clipped",
        ));

        let text = summary.to_string();
        assert!(text.contains("2 documents, 5 images, 7 annotations"));
        assert!(text.contains("12 file(s) written (coco, yolo)"));
        assert!(text.contains("Warnings (1):"));
        assert!(text.contains("Notes (1):"));
        assert_eq!(summary.warning_count(), 1);
        assert_eq!(summary.info_count(), 1);
    }

    #[test]
    fn clean_summary_has_no_issue_sections() {
        let summary = ExportSummary::default();
        let text = summary.to_string();
        assert!(!text.contains("Warnings"));
        assert!(!text.contains("Notes"));
    }
}
