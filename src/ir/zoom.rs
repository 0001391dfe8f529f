//! Display zoom factor.

/// Smallest zoom a session accepts.
pub const MIN_ZOOM: f64 = 0.5;

/// Zoom a freshly opened document starts at.
pub const DEFAULT_ZOOM: f64 = 1.5;

/// Increment used by zoom-in / zoom-out.
pub const ZOOM_STEP: f64 = 0.2;

/// Zoom used when rasterizing pages for export; document units equal pixels.
pub const EXPORT_ZOOM: f64 = 1.0;

/// A display zoom factor, never below [`MIN_ZOOM`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zoom(f64);

impl Zoom {
    /// Creates a zoom, clamping values under [`MIN_ZOOM`] (and NaN) up to it.
    pub fn new(factor: f64) -> Self {
        if factor.is_nan() {
            return Self(MIN_ZOOM);
        }
        Self(factor.max(MIN_ZOOM))
    }

    /// Zoom that renders one document unit as one pixel.
    pub fn unit() -> Self {
        Self(EXPORT_ZOOM)
    }

    #[inline]
    pub fn factor(&self) -> f64 {
        self.0
    }

    /// Returns the zoom changed by `delta`, clamped to the minimum.
    pub fn stepped(&self, delta: f64) -> Self {
        Self::new(self.0 + delta)
    }

    /// Zoom rounded to one decimal, in tenths. Used as a render cache key.
    pub fn cache_key(&self) -> i64 {
        (self.0 * 10.0).round() as i64
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}
