//! Document collaborators: page rendering and page text geometry.
//!
//! The annotation core never talks to a PDF library directly. It consumes the
//! traits below, which a backend (see [`pdf`] behind the `pdf` feature) or a
//! test fake implements.

pub mod cache;
pub mod folder;
#[cfg(feature = "pdf")]
pub mod pdf;

use std::path::Path;

use crate::error::DoclabelError;
use crate::ir::{BBoxXYXY, Doc, Zoom};

pub use cache::RenderCache;
pub use folder::list_documents;

/// An RGB8 raster of one rendered page.
#[derive(Clone, PartialEq, Eq)]
pub struct PageImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB triples, `width * height * 3` bytes.
    pub pixels: Vec<u8>,
}

impl PageImage {
    /// Creates a page image, checking the buffer length.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, DoclabelError> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(DoclabelError::Document {
                path: Path::new("<raster>").to_path_buf(),
                message: format!(
                    "pixel buffer has {} bytes, expected {} for {}x{} RGB",
                    pixels.len(),
                    expected,
                    width,
                    height
                ),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A white page of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![255; width as usize * height as usize * 3],
        }
    }
}

impl std::fmt::Debug for PageImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// A run of text sharing one font size.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSpan {
    pub bbox: BBoxXYXY<Doc>,
    pub font_size: f64,
    pub text: String,
}

/// A single glyph and its box.
#[derive(Clone, Debug, PartialEq)]
pub struct TextChar {
    pub bbox: BBoxXYXY<Doc>,
    pub ch: char,
}

/// Turns a page into pixels.
pub trait PageRenderer {
    /// Rasterizes `page` at `zoom`.
    fn render(&self, page: usize, zoom: Zoom) -> Result<PageImage, DoclabelError>;
}

/// Text layout of a page in document space.
pub trait TextSource {
    /// Font-size-tagged text runs of `page`.
    fn spans(&self, page: usize) -> Result<Vec<TextSpan>, DoclabelError>;

    /// Individual characters of `page`.
    fn chars(&self, page: usize) -> Result<Vec<TextChar>, DoclabelError>;

    /// Text clipped to `rect`, when the backend can do that natively.
    ///
    /// Returning `None` makes the caller fall back to reconstructing text
    /// from [`chars`](Self::chars).
    fn clipped_text(&self, _page: usize, _rect: &BBoxXYXY<Doc>) -> Option<String> {
        None
    }
}

/// An open document: a renderer and a text source with a known page count.
pub trait Document: PageRenderer + TextSource {
    /// Path the document was opened from.
    fn path(&self) -> &Path;

    fn page_count(&self) -> usize;

    /// Returns `Ok(())` if `page` is a valid index.
    fn check_page(&self, page: usize) -> Result<(), DoclabelError> {
        let page_count = self.page_count();
        if page < page_count {
            Ok(())
        } else {
            Err(DoclabelError::PageOutOfRange { page, page_count })
        }
    }
}

/// Opens documents from disk.
pub trait DocumentOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn Document>, DoclabelError>;
}

/// The opener compiled into this build.
///
/// With the `pdf` feature this is the mupdf backend; without it every open
/// fails with [`DoclabelError::BackendUnavailable`].
pub fn default_opener() -> Box<dyn DocumentOpener> {
    #[cfg(feature = "pdf")]
    {
        Box::new(pdf::PdfOpener)
    }
    #[cfg(not(feature = "pdf"))]
    {
        Box::new(UnavailableOpener)
    }
}

/// Opener used when no document backend is compiled in.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableOpener;

impl DocumentOpener for UnavailableOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn Document>, DoclabelError> {
        Err(DoclabelError::BackendUnavailable(format!(
            "cannot open {}: doclabel was built without the `pdf` feature",
            path.display()
        )))
    }
}
