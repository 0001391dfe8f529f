#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use doclabel::document::{
    Document, DocumentOpener, PageImage, PageRenderer, TextChar, TextSource, TextSpan,
};
use doclabel::ir::{BBoxXYXY, Doc, Zoom};
use doclabel::DoclabelError;

/// One page of an in-memory document.
#[derive(Clone, Debug)]
pub struct FakePage {
    pub width: f64,
    pub height: f64,
    pub spans: Vec<TextSpan>,
    pub chars: Vec<TextChar>,
}

impl FakePage {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            spans: Vec::new(),
            chars: Vec::new(),
        }
    }

    /// Adds a line of text as a span plus one char per glyph, 0.6 em wide.
    pub fn with_line(mut self, text: &str, x: f64, y: f64, font_size: f64) -> Self {
        let advance = font_size * 0.6;
        for (i, ch) in text.chars().enumerate() {
            let x0 = x + i as f64 * advance;
            self.chars.push(TextChar {
                bbox: BBoxXYXY::from_xyxy(x0, y, x0 + advance, y + font_size),
                ch,
            });
        }
        let len = text.chars().count() as f64;
        self.spans.push(TextSpan {
            bbox: BBoxXYXY::from_xyxy(x, y, x + len * advance, y + font_size),
            font_size,
            text: text.to_string(),
        });
        self
    }
}

/// A document held entirely in memory. Renders blank pages.
#[derive(Clone, Debug)]
pub struct FakeDocument {
    pub path: PathBuf,
    pub pages: Vec<FakePage>,
}

impl FakeDocument {
    pub fn new(path: impl Into<PathBuf>, pages: Vec<FakePage>) -> Self {
        Self {
            path: path.into(),
            pages,
        }
    }

    fn page(&self, page: usize) -> Result<&FakePage, DoclabelError> {
        self.check_page(page)?;
        Ok(&self.pages[page])
    }
}

impl PageRenderer for FakeDocument {
    fn render(&self, page: usize, zoom: Zoom) -> Result<PageImage, DoclabelError> {
        let p = self.page(page)?;
        let width = (p.width * zoom.factor()).round() as u32;
        let height = (p.height * zoom.factor()).round() as u32;
        Ok(PageImage::blank(width, height))
    }
}

impl TextSource for FakeDocument {
    fn spans(&self, page: usize) -> Result<Vec<TextSpan>, DoclabelError> {
        Ok(self.page(page)?.spans.clone())
    }

    fn chars(&self, page: usize) -> Result<Vec<TextChar>, DoclabelError> {
        Ok(self.page(page)?.chars.clone())
    }
}

impl Document for FakeDocument {
    fn path(&self) -> &Path {
        &self.path
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Opens [`FakeDocument`]s registered by file name.
#[derive(Clone, Debug, Default)]
pub struct FakeOpener {
    documents: HashMap<String, Vec<FakePage>>,
}

impl FakeOpener {
    pub fn with(mut self, file_name: &str, pages: Vec<FakePage>) -> Self {
        self.documents.insert(file_name.to_string(), pages);
        self
    }
}

impl DocumentOpener for FakeOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn Document>, DoclabelError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let pages = self
            .documents
            .get(&name)
            .ok_or_else(|| DoclabelError::Document {
                path: path.to_path_buf(),
                message: "unknown fake document".to_string(),
            })?;
        Ok(Box::new(FakeDocument::new(path, pages.clone())))
    }
}

/// Creates an empty placeholder file so folder listing picks it up.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, b"%PDF-1.7\n").expect("write placeholder document");
}

pub fn doc_box(x0: f64, y0: f64, x1: f64, y1: f64) -> BBoxXYXY<Doc> {
    BBoxXYXY::from_xyxy(x0, y0, x1, y1)
}
