//! Points on a page, tagged with the space they were measured in.

use std::marker::PhantomData;

/// A point on a page.
///
/// Annotations live in [`Doc`](super::Doc) units, pointer events arrive in
/// [`Pixel`](super::Pixel) units of the current raster, and YOLO output uses
/// [`Normalized`](super::Normalized) fractions. Moving between them goes
/// through [`mapper`](super::mapper), never through a plain field copy.
#[derive(Clone, Copy, PartialEq)]
pub struct Coord<TSpace> {
    pub x: f64,
    pub y: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> Coord<TSpace> {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            _space: PhantomData,
        }
    }

    /// False when a backend handed back NaN or infinite geometry.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// This point expressed relative to `origin`, in the same space.
    #[inline]
    pub fn relative_to(&self, origin: &Self) -> Self {
        Self::new(self.x - origin.x, self.y - origin.y)
    }
}

impl<TSpace> std::fmt::Debug for Coord<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<TSpace> Default for Coord<TSpace> {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
