//! mupdf-backed document collaborator.
//!
//! Spans are built from mupdf text lines split into runs of equal font size;
//! a glyph's box spans from its origin to the next glyph's origin (or the
//! line end) horizontally and the full line height vertically.

use std::path::{Path, PathBuf};

use log::debug;
use mupdf::text_page::TextBlockType;
use mupdf::{Colorspace, Matrix, Page, Pixmap, TextPageFlags};

use super::{Document, DocumentOpener, PageImage, PageRenderer, TextChar, TextSource, TextSpan};
use crate::error::DoclabelError;
use crate::ir::{BBoxXYXY, Zoom};

/// Opens PDF files with mupdf.
#[derive(Clone, Copy, Debug, Default)]
pub struct PdfOpener;

impl DocumentOpener for PdfOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn Document>, DoclabelError> {
        Ok(Box::new(PdfDocument::open(path)?))
    }
}

/// A PDF opened through mupdf.
pub struct PdfDocument {
    path: PathBuf,
    doc: mupdf::Document,
    page_count: usize,
}

impl PdfDocument {
    pub fn open(path: &Path) -> Result<Self, DoclabelError> {
        let doc = mupdf::Document::open(path.to_string_lossy().as_ref())
            .map_err(|err| pdf_error(path, err))?;
        let page_count = doc.page_count().map_err(|err| pdf_error(path, err))?;
        debug!("opened {} ({} pages)", path.display(), page_count);

        Ok(Self {
            path: path.to_path_buf(),
            doc,
            page_count: page_count.max(0) as usize,
        })
    }

    fn load_page(&self, page: usize) -> Result<Page, DoclabelError> {
        self.check_page(page)?;
        self.doc
            .load_page(page as i32)
            .map_err(|err| pdf_error(&self.path, err))
    }

    /// Walks every text line of `page`, handing each one's glyphs to `visit`.
    fn for_each_line<F>(&self, page: usize, mut visit: F) -> Result<(), DoclabelError>
    where
        F: FnMut(BBoxXYXY<crate::ir::Doc>, Vec<Glyph>),
    {
        let page = self.load_page(page)?;
        let text_page = page
            .to_text_page(TextPageFlags::COLLECT_STYLES)
            .map_err(|err| pdf_error(&self.path, err))?;

        for block in text_page.blocks() {
            if block.r#type() != TextBlockType::Text {
                continue;
            }
            for line in block.lines() {
                let bounds = line.bounds();
                let line_box = BBoxXYXY::from_xyxy(
                    bounds.x0 as f64,
                    bounds.y0 as f64,
                    bounds.x1 as f64,
                    bounds.y1 as f64,
                );
                let glyphs: Vec<Glyph> = line
                    .chars()
                    .filter_map(|ch| {
                        ch.char().map(|c| Glyph {
                            ch: c,
                            x: ch.origin().x as f64,
                            size: ch.size() as f64,
                        })
                    })
                    .collect();
                if !glyphs.is_empty() {
                    visit(line_box, glyphs);
                }
            }
        }
        Ok(())
    }
}

struct Glyph {
    ch: char,
    x: f64,
    size: f64,
}

/// Right edge of glyph `idx`: the next glyph's origin, or the line end.
fn glyph_right(glyphs: &[Glyph], idx: usize, line_right: f64) -> f64 {
    glyphs
        .get(idx + 1)
        .map(|next| next.x)
        .filter(|x| *x > glyphs[idx].x)
        .unwrap_or(line_right)
}

impl PageRenderer for PdfDocument {
    fn render(&self, page: usize, zoom: Zoom) -> Result<PageImage, DoclabelError> {
        let page = self.load_page(page)?;
        let scale = zoom.factor() as f32;
        let rgb = Colorspace::device_rgb();
        let pixmap = page
            .to_pixmap(&Matrix::new_scale(scale, scale), &rgb, false, false)
            .map_err(|err| pdf_error(&self.path, err))?;

        let pixels = pixmap_to_rgb(&pixmap).map_err(|message| DoclabelError::Document {
            path: self.path.clone(),
            message,
        })?;
        PageImage::new(pixmap.width() as u32, pixmap.height() as u32, pixels)
    }
}

impl TextSource for PdfDocument {
    fn spans(&self, page: usize) -> Result<Vec<TextSpan>, DoclabelError> {
        let mut spans = Vec::new();

        self.for_each_line(page, |line_box, glyphs| {
            let mut start = 0;
            while start < glyphs.len() {
                let size = glyphs[start].size;
                let mut end = start + 1;
                while end < glyphs.len() && (glyphs[end].size - size).abs() < 0.01 {
                    end += 1;
                }

                let x1 = glyph_right(&glyphs, end - 1, line_box.xmax());
                spans.push(TextSpan {
                    bbox: BBoxXYXY::from_xyxy(glyphs[start].x, line_box.ymin(), x1, line_box.ymax()),
                    font_size: size,
                    text: glyphs[start..end].iter().map(|g| g.ch).collect(),
                });
                start = end;
            }
        })?;

        Ok(spans)
    }

    fn chars(&self, page: usize) -> Result<Vec<TextChar>, DoclabelError> {
        let mut chars = Vec::new();

        self.for_each_line(page, |line_box, glyphs| {
            for (idx, glyph) in glyphs.iter().enumerate() {
                let x1 = glyph_right(&glyphs, idx, line_box.xmax());
                chars.push(TextChar {
                    bbox: BBoxXYXY::from_xyxy(glyph.x, line_box.ymin(), x1, line_box.ymax()),
                    ch: glyph.ch,
                });
            }
        })?;

        Ok(chars)
    }
}

impl Document for PdfDocument {
    fn path(&self) -> &Path {
        &self.path
    }

    fn page_count(&self) -> usize {
        self.page_count
    }
}

fn pixmap_to_rgb(pixmap: &Pixmap) -> Result<Vec<u8>, String> {
    let n = pixmap.n() as usize;
    if n < 3 {
        return Err(format!("unsupported pixmap format: {n} channels"));
    }

    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let stride = pixmap.stride() as usize;
    let samples = pixmap.samples();
    let row_bytes = width * n;
    if samples.len() < stride.saturating_mul(height) || row_bytes > stride {
        return Err("pixmap buffer size mismatch".to_string());
    }

    let mut out = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        let row = &samples[y * stride..y * stride + row_bytes];
        if n == 3 {
            out.extend_from_slice(row);
        } else {
            for px in row.chunks_exact(n) {
                out.extend_from_slice(&px[..3]);
            }
        }
    }

    Ok(out)
}

fn pdf_error(path: &Path, err: mupdf::error::Error) -> DoclabelError {
    DoclabelError::Document {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
