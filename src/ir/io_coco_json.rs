//! COCO JSON writer.
//!
//! # COCO Format Reference
//!
//! COCO bounding boxes use `[x, y, width, height]` format where:
//! - `(x, y)` is the top-left corner in absolute pixel coordinates
//! - `width` and `height` are the dimensions
//!
//! Pages are rasterized at [`EXPORT_ZOOM`](super::zoom::EXPORT_ZOOM), so the
//! document-space annotation boxes are already in export pixel units. Boxes
//! are normalized before conversion; widths and heights are never negative.
//!
//! # Deterministic Output
//!
//! Image ids follow dataset order starting at 1. Annotation ids are
//! sequential across the whole export, also starting at 1. Every catalog
//! label becomes a category whether or not it is used.

use std::path::Path;

use serde::Serialize;

use super::io_atomic::write_atomic;
use super::label::LabelCatalog;
use super::model::Dataset;
use super::zoom::EXPORT_ZOOM;
use super::{AnnotationId, ImageId};
use crate::error::DoclabelError;

// ============================================================================
// COCO Schema Types (internal to this module)
// ============================================================================

/// Top-level COCO dataset structure.
#[derive(Debug, Serialize)]
struct CocoDataset {
    images: Vec<CocoImage>,
    annotations: Vec<CocoAnnotation>,
    categories: Vec<CocoCategory>,
}

/// COCO image entry.
#[derive(Debug, Serialize)]
struct CocoImage {
    id: u64,
    file_name: String,
    width: u32,
    height: u32,
}

/// COCO category entry.
#[derive(Debug, Serialize)]
struct CocoCategory {
    id: u64,
    name: String,
}

/// COCO annotation entry.
#[derive(Debug, Serialize)]
struct CocoAnnotation {
    id: u64,
    image_id: u64,

    /// COCO bbox format: [x, y, width, height] with (x,y) as top-left corner
    bbox: [f64; 4],

    area: f64,
    category_id: u64,
    iscrowd: u8,
}

// ============================================================================
// Public API
// ============================================================================

/// Writes a dataset to a COCO JSON file.
///
/// The file is replaced atomically; a failed export leaves an earlier
/// `coco.json` intact.
///
/// # Errors
/// Returns an error if an annotation's label is missing from `catalog` or the
/// file cannot be written.
pub fn write_coco_json(
    path: &Path,
    dataset: &Dataset,
    catalog: &LabelCatalog,
) -> Result<(), DoclabelError> {
    let coco = dataset_to_coco(dataset, catalog)?;

    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(writer, &coco).map_err(|source| {
            DoclabelError::CocoJsonWrite {
                path: path.to_path_buf(),
                source,
            }
        })
    })
}

/// Writes a dataset to a COCO JSON string.
///
/// Useful for testing without file I/O.
pub fn to_coco_string(dataset: &Dataset, catalog: &LabelCatalog) -> Result<String, DoclabelError> {
    let coco = dataset_to_coco(dataset, catalog)?;
    serde_json::to_string_pretty(&coco).map_err(|source| DoclabelError::CocoJsonWrite {
        path: Path::new("<string>").to_path_buf(),
        source,
    })
}

// ============================================================================
// Conversion: Dataset -> COCO
// ============================================================================

fn dataset_to_coco(dataset: &Dataset, catalog: &LabelCatalog) -> Result<CocoDataset, DoclabelError> {
    let categories = catalog
        .entries()
        .map(|(id, label)| CocoCategory {
            id: id.as_u64(),
            name: label.name().to_string(),
        })
        .collect();

    let mut images = Vec::with_capacity(dataset.images.len());
    let mut annotations = Vec::with_capacity(dataset.annotation_count());
    let mut next_annotation_id = AnnotationId::new(1);

    for (index, image) in dataset.images.iter().enumerate() {
        let image_id = ImageId::new(index as u64 + 1);
        images.push(CocoImage {
            id: image_id.as_u64(),
            file_name: image.file_name.clone(),
            width: image.width,
            height: image.height,
        });

        for ann in &image.annotations {
            let category_id = catalog.require(ann.label)?;
            let bbox = ann.bbox.normalized().to_pixel(EXPORT_ZOOM);
            let (x, y, w, h) = bbox.to_xywh();

            annotations.push(CocoAnnotation {
                id: next_annotation_id.as_u64(),
                image_id: image_id.as_u64(),
                bbox: [x, y, w, h],
                area: bbox.area(),
                category_id: category_id.as_u64(),
                iscrowd: 0,
            });
            next_annotation_id = AnnotationId::new(next_annotation_id.as_u64() + 1);
        }
    }

    Ok(CocoDataset {
        images,
        annotations,
        categories,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Annotation, BBoxXYXY, DatasetImage, Label};

    fn single_page_dataset() -> Dataset {
        Dataset {
            images: vec![DatasetImage::new("report_page_1.jpg", 612, 792).with_annotation(
                Annotation::new(0, BBoxXYXY::from_xyxy(10.0, 20.0, 110.0, 70.0), Label::H1),
            )],
        }
    }

    fn parse(json: &str) -> serde_json::Value {
        serde_json::from_str(json).expect("valid json")
    }

    #[test]
    fn test_single_annotation_export() {
        let catalog = LabelCatalog::standard();
        let json = to_coco_string(&single_page_dataset(), &catalog).expect("serialize");
        let parsed = parse(&json);

        assert_eq!(parsed["images"].as_array().unwrap().len(), 1);
        assert_eq!(parsed["images"][0]["id"], 1);
        assert_eq!(parsed["images"][0]["file_name"], "report_page_1.jpg");
        assert_eq!(parsed["images"][0]["width"], 612);
        assert_eq!(parsed["images"][0]["height"], 792);

        let ann = &parsed["annotations"][0];
        assert_eq!(ann["id"], 1);
        assert_eq!(ann["image_id"], 1);
        assert_eq!(ann["bbox"], serde_json::json!([10.0, 20.0, 100.0, 50.0]));
        assert_eq!(ann["area"], 5000.0);
        assert_eq!(ann["category_id"], 2);
        assert_eq!(ann["iscrowd"], 0);

        let categories = parsed["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0], serde_json::json!({"id": 1, "name": "TITLE"}));
        assert_eq!(categories[5], serde_json::json!({"id": 6, "name": "BODY"}));
    }

    #[test]
    fn test_inverted_boxes_are_normalized() {
        let dataset = Dataset {
            images: vec![DatasetImage::new("a_page_1.jpg", 100, 100).with_annotation(
                Annotation::new(0, BBoxXYXY::from_xyxy(60.0, 50.0, 10.0, 20.0), Label::Body),
            )],
        };
        let parsed = parse(&to_coco_string(&dataset, &LabelCatalog::standard()).unwrap());
        assert_eq!(
            parsed["annotations"][0]["bbox"],
            serde_json::json!([10.0, 20.0, 50.0, 30.0])
        );
    }

    #[test]
    fn test_ids_are_sequential_across_images() {
        let bbox = BBoxXYXY::from_xyxy(0.0, 0.0, 10.0, 10.0);
        let dataset = Dataset {
            images: vec![
                DatasetImage::new("a_page_1.jpg", 100, 100)
                    .with_annotation(Annotation::new(0, bbox, Label::Title))
                    .with_annotation(Annotation::new(0, bbox, Label::Body)),
                DatasetImage::new("a_page_2.jpg", 100, 100),
                DatasetImage::new("b_page_1.jpg", 100, 100)
                    .with_annotation(Annotation::new(0, bbox, Label::H2)),
            ],
        };
        let parsed = parse(&to_coco_string(&dataset, &LabelCatalog::standard()).unwrap());

        let images = parsed["images"].as_array().unwrap();
        assert_eq!(images.len(), 3);
        assert_eq!(images[2]["id"], 3);

        let anns = parsed["annotations"].as_array().unwrap();
        assert_eq!(anns.len(), 3);
        assert_eq!(anns[0]["id"], 1);
        assert_eq!(anns[1]["id"], 2);
        assert_eq!(anns[2]["id"], 3);
        assert_eq!(anns[2]["image_id"], 3);
        assert_eq!(anns[2]["category_id"], 3);
    }

    #[test]
    fn test_label_outside_catalog_fails() {
        let catalog = LabelCatalog::new(vec![Label::Title, Label::Body]).unwrap();
        let err = to_coco_string(&single_page_dataset(), &catalog).unwrap_err();
        assert!(matches!(err, DoclabelError::LabelNotInCatalog { .. }));
    }

    #[test]
    fn test_write_coco_json_file() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("coco.json");
        write_coco_json(&path, &single_page_dataset(), &LabelCatalog::standard())
            .expect("write coco");

        let parsed = parse(&std::fs::read_to_string(&path).unwrap());
        assert_eq!(parsed["annotations"].as_array().unwrap().len(), 1);
    }
}
