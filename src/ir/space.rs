//! Uninhabited markers for the three coordinate spaces of a labeled page.

use std::fmt;

/// PDF points (1/72 inch), independent of zoom.
///
/// Sidecars, COCO boxes and text extraction all work in this space.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Doc {}

/// Pixels of a page rendered at some [`Zoom`](super::Zoom), origin top-left.
///
/// Only the editor and page rasters see this space.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Fractions of the page size, as written to YOLO label files.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

macro_rules! uninhabited_debug {
    ($($space:ty),*) => {
        $(
            impl fmt::Debug for $space {
                fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                    match *self {}
                }
            }
        )*
    };
}

uninhabited_debug!(Doc, Pixel, Normalized);
