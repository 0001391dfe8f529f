//! Ultralytics-style YOLO label writer.
//!
//! Every rendered page gets a sibling label file under `labels/` with the
//! same base name as its image under `images/`. Each line is
//!
//! ```text
//! <class> <x_center> <y_center> <width> <height>
//! ```
//!
//! with values normalized by the page's pixel size and printed with six
//! decimals. The class index is the catalog category id minus one. A
//! `data.yaml` listing the class names is written next to the two trees.

use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::Path;

use super::io_atomic::write_atomic;
use super::label::LabelCatalog;
use super::model::{Dataset, DatasetImage};
use super::zoom::EXPORT_ZOOM;
use crate::error::DoclabelError;

const LABEL_EXTENSION: &str = "txt";

/// Write label files for every image of `dataset` under `path/labels/`, plus
/// `path/data.yaml`.
///
/// Image binaries are written by the export pipeline, not here. Pages
/// without annotations still get an (empty) label file.
pub fn write_yolo_dir(
    path: &Path,
    dataset: &Dataset,
    catalog: &LabelCatalog,
) -> Result<usize, DoclabelError> {
    let labels_dir = path.join("labels");
    fs::create_dir_all(&labels_dir).map_err(DoclabelError::Io)?;

    let mut written = 0;
    for image in &dataset.images {
        let label_path = labels_dir.join(Path::new(&image.file_name).with_extension(LABEL_EXTENSION));
        let content = yolo_label_lines(image, catalog)?;

        write_atomic(&label_path, |writer| {
            writer
                .write_all(content.as_bytes())
                .map_err(|err| DoclabelError::YoloWrite {
                    path: label_path.clone(),
                    message: err.to_string(),
                })
        })?;
        written += 1;
    }

    write_data_yaml(path, catalog)?;

    Ok(written)
}

/// Renders the label file content for one image.
///
/// Boxes are normalized, then clipped to the page so every value stays in
/// `[0, 1]`.
///
/// # Errors
/// Fails if the image has a zero dimension or an annotation's label is not in
/// the catalog.
pub fn yolo_label_lines(image: &DatasetImage, catalog: &LabelCatalog) -> Result<String, DoclabelError> {
    if image.width == 0 || image.height == 0 {
        return Err(DoclabelError::YoloWrite {
            path: Path::new(&image.file_name).to_path_buf(),
            message: format!(
                "image has invalid dimensions {}x{}",
                image.width, image.height
            ),
        });
    }

    let width = image.width as f64;
    let height = image.height as f64;
    let mut out = String::new();

    for ann in &image.annotations {
        let class_index = catalog.require(ann.label)?.class_index();
        let bbox_norm = ann
            .bbox
            .to_pixel(EXPORT_ZOOM)
            .clip_to(width, height)
            .to_normalized(width, height);
        let (cx, cy, w, h) = bbox_norm.to_cxcywh();

        // Writing to a String can't fail.
        let _ = writeln!(out, "{} {:.6} {:.6} {:.6} {:.6}", class_index, cx, cy, w, h);
    }

    Ok(out)
}

fn write_data_yaml(output_root: &Path, catalog: &LabelCatalog) -> Result<(), DoclabelError> {
    let mut yaml = format!("path: .\ntrain: images\nval: images\nnc: {}\nnames:\n", catalog.len());
    for (id, label) in catalog.entries() {
        yaml.push_str(&format!(
            "  {}: {}\n",
            id.class_index(),
            yaml_single_quoted(label.name())
        ));
    }

    let path = output_root.join("data.yaml");
    write_atomic(&path, |writer| {
        writer.write_all(yaml.as_bytes()).map_err(DoclabelError::Io)
    })
}

fn yaml_single_quoted(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', "''"))
}
