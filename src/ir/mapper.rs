//! Conversions between document space and zoom-scaled pixel space.
//!
//! All functions are pure. No rounding happens here; callers round only when
//! they hand geometry to a rasterizer.

use super::{BBoxXYXY, Coord, Doc, Pixel};

/// Scales a document-space value into pixel space.
#[inline]
pub fn to_pixel(value: f64, zoom: f64) -> f64 {
    value * zoom
}

/// Scales a pixel-space value back into document space.
#[inline]
pub fn to_doc(value: f64, zoom: f64) -> f64 {
    value / zoom
}

impl Coord<Doc> {
    #[inline]
    pub fn to_pixel(&self, zoom: f64) -> Coord<Pixel> {
        Coord::new(to_pixel(self.x, zoom), to_pixel(self.y, zoom))
    }
}

impl Coord<Pixel> {
    #[inline]
    pub fn to_doc(&self, zoom: f64) -> Coord<Doc> {
        Coord::new(to_doc(self.x, zoom), to_doc(self.y, zoom))
    }
}

impl BBoxXYXY<Doc> {
    /// Maps every corner into pixel space at `zoom`.
    pub fn to_pixel(&self, zoom: f64) -> BBoxXYXY<Pixel> {
        BBoxXYXY::new(self.min.to_pixel(zoom), self.max.to_pixel(zoom))
    }
}

impl BBoxXYXY<Pixel> {
    /// Maps every corner back into document space at `zoom`.
    pub fn to_doc(&self, zoom: f64) -> BBoxXYXY<Doc> {
        BBoxXYXY::new(self.min.to_doc(zoom), self.max.to_doc(zoom))
    }
}
