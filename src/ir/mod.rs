//! Core annotation types for doclabel.
//!
//! This module defines the annotation record, its geometry, the label
//! catalog, and the file formats annotations are read from and written to.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: Marker types keep document-space, pixel-space and
//!    normalized coordinates apart at compile time. Converting between them
//!    goes through the [`mapper`] functions.
//!
//! 2. **Permissive Geometry**: A box dragged past its opposite edge is still
//!    representable. Consumers normalize on read instead of the editor
//!    rejecting the gesture.
//!
//! 3. **Deterministic Output**: Writers assign ids from dataset order, so
//!    the same inputs always produce the same files.
//!
//! # Example
//!
//! ```
//! use doclabel::ir::{Annotation, BBoxXYXY, Doc, Label, LabelCatalog};
//!
//! let ann = Annotation::new(0, BBoxXYXY::<Doc>::from_xyxy(72.0, 90.0, 400.0, 118.0), Label::Title);
//! let catalog = LabelCatalog::standard();
//! assert_eq!(catalog.category_id(ann.label).map(|id| id.as_u64()), Some(1));
//! ```

mod bbox;
mod coord;
mod ids;
pub mod io_atomic;
pub mod io_coco_json;
pub mod io_sidecar;
pub mod io_yolo;
mod label;
pub mod mapper;
mod model;
mod space;
pub mod zoom;

// Re-export core types for convenient access
pub use bbox::BBoxXYXY;
pub use coord::Coord;
pub use ids::{AnnotationId, CategoryId, ImageId};
pub use label::{Label, LabelCatalog};
pub use model::{Annotation, Dataset, DatasetImage};
pub use space::{Doc, Normalized, Pixel};
pub use zoom::Zoom;
