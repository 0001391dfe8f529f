//! Bounding box types in canonical XYXY format.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeTuple, Serializer};

use super::coord::Coord;

/// An axis-aligned bounding box in XYXY format (x0, y0, x1, y1).
///
/// The `TSpace` parameter is one of [`Doc`](super::Doc),
/// [`Pixel`](super::Pixel) or [`Normalized`](super::Normalized).
///
/// Note: this type does NOT enforce that min <= max. A box resized past its
/// opposite edge is still representable; consumers call [`normalized`]
/// before reading widths or testing overlap.
///
/// [`normalized`]: BBoxXYXY::normalized
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYXY<TSpace> {
    pub min: Coord<TSpace>,
    pub max: Coord<TSpace>,
}

impl<TSpace> BBoxXYXY<TSpace> {
    /// Creates a new bounding box from min and max coordinates.
    #[inline]
    pub fn new(min: Coord<TSpace>, max: Coord<TSpace>) -> Self {
        Self { min, max }
    }

    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn from_xyxy(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            min: Coord::new(x0, y0),
            max: Coord::new(x1, y1),
        }
    }

    /// Creates a box spanning two arbitrary corner points.
    #[inline]
    pub fn from_corners(a: Coord<TSpace>, b: Coord<TSpace>) -> Self {
        Self::new(a, b)
    }

    #[inline]
    pub fn xmin(&self) -> f64 {
        self.min.x
    }

    #[inline]
    pub fn ymin(&self) -> f64 {
        self.min.y
    }

    #[inline]
    pub fn xmax(&self) -> f64 {
        self.max.x
    }

    #[inline]
    pub fn ymax(&self) -> f64 {
        self.max.y
    }

    /// Returns the width of the bounding box.
    ///
    /// May be negative if the box is not normalized.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Returns the height of the bounding box.
    ///
    /// May be negative if the box is not normalized.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns true if all coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns true if the box is properly ordered (min <= max for both axes).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Returns the same rectangle with min <= max on both axes.
    pub fn normalized(&self) -> Self {
        Self::from_xyxy(
            self.min.x.min(self.max.x),
            self.min.y.min(self.max.y),
            self.min.x.max(self.max.x),
            self.min.y.max(self.max.y),
        )
    }

    /// Inclusive point containment, after normalization.
    pub fn contains(&self, point: &Coord<TSpace>) -> bool {
        let b = self.normalized();
        b.min.x <= point.x && point.x <= b.max.x && b.min.y <= point.y && point.y <= b.max.y
    }

    /// Strict overlap on both axes: touching edges do not count.
    pub fn overlaps(&self, other: &Self) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a.max.x > b.min.x && a.min.x < b.max.x && a.max.y > b.min.y && a.min.y < b.max.y
    }

    /// Clips the (normalized) box to `[0, width] x [0, height]`.
    pub fn clip_to(&self, width: f64, height: f64) -> Self {
        let b = self.normalized();
        Self::from_xyxy(
            b.min.x.clamp(0.0, width),
            b.min.y.clamp(0.0, height),
            b.max.x.clamp(0.0, width),
            b.max.y.clamp(0.0, height),
        )
    }

    /// Returns the box as an `[x0, y0, x1, y1]` array.
    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.min.x, self.min.y, self.max.x, self.max.y]
    }

    /// Converts to XYWH format (x, y, width, height), as used by COCO.
    #[inline]
    pub fn to_xywh(&self) -> (f64, f64, f64, f64) {
        (self.xmin(), self.ymin(), self.width(), self.height())
    }

    /// Converts to center/size format (cx, cy, width, height), as used by YOLO.
    #[inline]
    pub fn to_cxcywh(&self) -> (f64, f64, f64, f64) {
        let w = self.width();
        let h = self.height();
        (self.min.x + w / 2.0, self.min.y + h / 2.0, w, h)
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("x0", &self.min.x)
            .field("y0", &self.min.y)
            .field("x1", &self.max.x)
            .field("y1", &self.max.y)
            .finish()
    }
}

impl<TSpace> Default for BBoxXYXY<TSpace> {
    fn default() -> Self {
        Self::from_xyxy(0.0, 0.0, 0.0, 0.0)
    }
}

// Serialized as a bare `[x0, y0, x1, y1]` array, which is what sidecar files
// carry. Custom impls avoid TSpace: Serialize/Deserialize bounds.
impl<TSpace> Serialize for BBoxXYXY<TSpace> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_tuple(4)?;
        for value in self.to_array() {
            seq.serialize_element(&value)?;
        }
        seq.end()
    }
}

impl<'de, TSpace> Deserialize<'de> for BBoxXYXY<TSpace> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [x0, y0, x1, y1] = <[f64; 4]>::deserialize(deserializer)?;
        Ok(BBoxXYXY::from_xyxy(x0, y0, x1, y1))
    }
}

use super::{Normalized, Pixel};

impl BBoxXYXY<Pixel> {
    /// Converts pixel coordinates to normalized coordinates.
    ///
    /// # Arguments
    /// * `image_width` - The width of the image in pixels
    /// * `image_height` - The height of the image in pixels
    pub fn to_normalized(&self, image_width: f64, image_height: f64) -> BBoxXYXY<Normalized> {
        BBoxXYXY::from_xyxy(
            self.min.x / image_width,
            self.min.y / image_height,
            self.max.x / image_width,
            self.max.y / image_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Doc, Pixel};

    #[test]
    fn test_bbox_from_xyxy() {
        let bbox: BBoxXYXY<Doc> = BBoxXYXY::from_xyxy(10.0, 20.0, 100.0, 80.0);
        assert_eq!(bbox.xmin(), 10.0);
        assert_eq!(bbox.ymin(), 20.0);
        assert_eq!(bbox.xmax(), 100.0);
        assert_eq!(bbox.ymax(), 80.0);
    }

    #[test]
    fn test_bbox_dimensions() {
        let bbox: BBoxXYXY<Doc> = BBoxXYXY::from_xyxy(10.0, 20.0, 100.0, 80.0);
        assert_eq!(bbox.width(), 90.0);
        assert_eq!(bbox.height(), 60.0);
        assert_eq!(bbox.area(), 5400.0);
    }

    #[test]
    fn test_bbox_normalization() {
        let flipped: BBoxXYXY<Doc> = BBoxXYXY::from_xyxy(100.0, 80.0, 10.0, 20.0);
        assert!(!flipped.is_ordered());

        let fixed = flipped.normalized();
        assert!(fixed.is_ordered());
        assert_eq!(fixed.to_array(), [10.0, 20.0, 100.0, 80.0]);
    }

    #[test]
    fn test_contains_is_inclusive_and_order_independent() {
        let bbox: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(50.0, 50.0, 0.0, 0.0);
        assert!(bbox.contains(&Coord::new(0.0, 0.0)));
        assert!(bbox.contains(&Coord::new(25.0, 50.0)));
        assert!(!bbox.contains(&Coord::new(50.1, 10.0)));
    }

    #[test]
    fn test_overlap_is_strict() {
        let a: BBoxXYXY<Doc> = BBoxXYXY::from_xyxy(0.0, 0.0, 10.0, 10.0);
        let touching: BBoxXYXY<Doc> = BBoxXYXY::from_xyxy(10.0, 0.0, 20.0, 10.0);
        let inside: BBoxXYXY<Doc> = BBoxXYXY::from_xyxy(9.0, 9.0, 20.0, 20.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
    }

    #[test]
    fn test_clip_to_page() {
        let bbox: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(-5.0, 10.0, 250.0, 20.0);
        assert_eq!(bbox.clip_to(200.0, 400.0).to_array(), [0.0, 10.0, 200.0, 20.0]);
    }

    #[test]
    fn test_serializes_as_array() {
        let bbox: BBoxXYXY<Doc> = BBoxXYXY::from_xyxy(1.5, 2.0, 3.0, 4.25);
        let json = serde_json::to_string(&bbox).unwrap();
        assert_eq!(json, "[1.5,2.0,3.0,4.25]");

        let back: BBoxXYXY<Doc> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bbox);
    }

    #[test]
    fn test_cxcywh() {
        let bbox: BBoxXYXY<Pixel> = BBoxXYXY::from_xyxy(10.0, 20.0, 110.0, 70.0);
        assert_eq!(bbox.to_cxcywh(), (60.0, 45.0, 100.0, 50.0));
    }
}
