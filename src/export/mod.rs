//! Folder-to-dataset export.
//!
//! Export runs in two passes over the documents of a folder:
//!
//! 1. every sidecar is read, so a corrupt one aborts the export before any
//!    file is written;
//! 2. every page of every document is rendered once at
//!    [`EXPORT_ZOOM`](crate::ir::zoom::EXPORT_ZOOM), written to
//!    `images/{stem}_page_{n}.{ext}`, and paired with its annotations.
//!
//! The resulting [`Dataset`] is handed to the COCO and YOLO writers.

pub mod report;

use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::{ImageFormat, RgbImage};
use log::{debug, info};

use crate::config::Workspace;
use crate::document::{DocumentOpener, PageImage, PageRenderer};
use crate::error::DoclabelError;
use crate::ir::io_atomic::write_bytes_atomic;
use crate::ir::io_coco_json::write_coco_json;
use crate::ir::io_sidecar::{document_stem, read_sidecar};
use crate::ir::io_yolo::write_yolo_dir;
use crate::ir::{Annotation, Dataset, DatasetImage, LabelCatalog, Zoom};

pub use report::{ExportIssue, ExportIssueCode, ExportSeverity, ExportSummary};

pub const IMAGES_DIR: &str = "images";
pub const COCO_FILE: &str = "coco.json";

/// Which dataset files to write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Coco,
    Yolo,
    All,
}

impl ExportFormat {
    fn writes_coco(self) -> bool {
        matches!(self, ExportFormat::Coco | ExportFormat::All)
    }

    fn writes_yolo(self) -> bool {
        matches!(self, ExportFormat::Yolo | ExportFormat::All)
    }
}

impl FromStr for ExportFormat {
    type Err = DoclabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "coco" | "coco-json" => Ok(ExportFormat::Coco),
            "yolo" => Ok(ExportFormat::Yolo),
            "all" => Ok(ExportFormat::All),
            other => Err(DoclabelError::UnsupportedFormat(format!(
                "'{}' (supported: coco, yolo, all)",
                other
            ))),
        }
    }
}

/// Raster format of exported page images.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageFormatKind {
    #[default]
    Jpg,
    Png,
}

impl ImageFormatKind {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormatKind::Jpg => "jpg",
            ImageFormatKind::Png => "png",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            ImageFormatKind::Jpg => ImageFormat::Jpeg,
            ImageFormatKind::Png => ImageFormat::Png,
        }
    }
}

impl FromStr for ImageFormatKind {
    type Err = DoclabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(ImageFormatKind::Jpg),
            "png" => Ok(ImageFormatKind::Png),
            other => Err(DoclabelError::UnsupportedFormat(format!(
                "'{}' (supported: jpg, png)",
                other
            ))),
        }
    }
}

impl fmt::Display for ImageFormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Export settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub image_format: ImageFormatKind,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::All,
            image_format: ImageFormatKind::Jpg,
        }
    }
}

/// File name of page `page` (zero-based) of the document with `stem`.
pub fn page_image_name(stem: &str, page: usize, format: ImageFormatKind) -> String {
    format!("{}_page_{}.{}", stem, page + 1, format.extension())
}

/// Renders all pages of `documents` into `out_dir/images/` and collects the
/// dataset the writers consume.
///
/// `documents` are processed in the given order; pass them sorted for
/// deterministic ids.
pub fn build_dataset(
    documents: &[PathBuf],
    opener: &dyn DocumentOpener,
    workspace: &Workspace,
    catalog: &LabelCatalog,
    out_dir: &Path,
    image_format: ImageFormatKind,
    summary: &mut ExportSummary,
) -> Result<Dataset, DoclabelError> {
    // Pass 1: read and check every sidecar before touching the output directory.
    let mut sidecars: Vec<(PathBuf, Vec<Annotation>)> = Vec::with_capacity(documents.len());
    for document in documents {
        let sidecar = workspace.sidecar_for(document);
        if !sidecar.is_file() {
            summary.add(ExportIssue::info(
                ExportIssueCode::NoSidecar,
                format!("{}: no sidecar, exporting pages unannotated", display_name(document)),
            ));
        }
        let annotations = read_sidecar(&sidecar)?;
        for ann in &annotations {
            catalog.require(ann.label)?;
        }
        sidecars.push((document.clone(), annotations));
    }

    // Pass 2: render pages and attach annotations.
    let images_dir = out_dir.join(IMAGES_DIR);
    let zoom = Zoom::unit();
    let mut dataset = Dataset::default();

    for (path, annotations) in sidecars {
        let document = opener.open(&path)?;
        let page_count = document.page_count();
        let stem = document_stem(&path);

        let skipped = annotations.iter().filter(|a| a.page >= page_count).count();
        if skipped > 0 {
            summary.add(ExportIssue::warning(
                ExportIssueCode::PageOutOfRange,
                format!(
                    "{}: {} annotation(s) on pages past {} skipped",
                    display_name(&path),
                    skipped,
                    page_count
                ),
            ));
        }

        for page in 0..page_count {
            let raster = document.render(page, zoom)?;
            let file_name = page_image_name(&stem, page, image_format);
            write_page_image(&images_dir.join(&file_name), &raster, image_format)?;
            summary.files_written += 1;
            debug!("wrote {} ({}x{})", file_name, raster.width, raster.height);

            let mut image = DatasetImage::new(file_name, raster.width, raster.height);
            image.annotations = annotations
                .iter()
                .filter(|a| a.page == page)
                .cloned()
                .collect();
            dataset.images.push(image);
        }
        summary.documents += 1;
    }

    summary.images = dataset.images.len();
    summary.annotations = dataset.annotation_count();
    Ok(dataset)
}

/// Exports `documents` into `workspace.export_dir`.
pub fn run_export(
    documents: &[PathBuf],
    opener: &dyn DocumentOpener,
    workspace: &Workspace,
    catalog: &LabelCatalog,
    options: &ExportOptions,
) -> Result<ExportSummary, DoclabelError> {
    let out_dir = workspace.export_dir.as_path();
    let mut summary = ExportSummary::default();

    let dataset = build_dataset(
        documents,
        opener,
        workspace,
        catalog,
        out_dir,
        options.image_format,
        &mut summary,
    )?;

    if options.format.writes_coco() {
        write_coco_json(&out_dir.join(COCO_FILE), &dataset, catalog)?;
        summary.formats.push("coco".to_string());
        summary.files_written += 1;
    }

    if options.format.writes_yolo() {
        let clipped = count_clipped(&dataset);
        if clipped > 0 {
            summary.add(ExportIssue::info(
                ExportIssueCode::ClippedToPage,
                format!("{} annotation(s) extend past their page and were clipped", clipped),
            ));
        }
        let written = write_yolo_dir(out_dir, &dataset, catalog)?;
        summary.formats.push("yolo".to_string());
        // label files plus data.yaml
        summary.files_written += written + 1;
    }

    info!(
        "exported {} image(s), {} annotation(s) to {}",
        summary.images,
        summary.annotations,
        out_dir.display()
    );
    Ok(summary)
}

fn write_page_image(
    path: &Path,
    raster: &PageImage,
    format: ImageFormatKind,
) -> Result<(), DoclabelError> {
    let image = RgbImage::from_raw(raster.width, raster.height, raster.pixels.clone()).ok_or_else(
        || DoclabelError::Document {
            path: path.to_path_buf(),
            message: format!(
                "rendered buffer does not match {}x{} RGB",
                raster.width, raster.height
            ),
        },
    )?;

    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format.image_format())
        .map_err(|source| DoclabelError::ImageEncode {
            path: path.to_path_buf(),
            source,
        })?;
    write_bytes_atomic(path, &bytes)
}

fn count_clipped(dataset: &Dataset) -> usize {
    dataset
        .images
        .iter()
        .map(|image| {
            let (w, h) = (image.width as f64, image.height as f64);
            image
                .annotations
                .iter()
                .filter(|a| {
                    let b = a.bbox.normalized();
                    b.xmin() < 0.0 || b.ymin() < 0.0 || b.xmax() > w || b.ymax() > h
                })
                .count()
        })
        .sum()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
