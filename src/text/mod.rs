//! Reading-order text reconstruction inside a rectangle.
//!
//! This is best-effort layout recovery from glyph boxes, not a layout
//! engine: no right-to-left or vertical text, and no column detection beyond
//! the query rectangle.

use log::warn;

use crate::document::{TextChar, TextSource};
use crate::ir::{Annotation, BBoxXYXY, Doc};

/// Glyphs closer than this on both axes with the same character are merged.
pub const DUPLICATE_TOLERANCE: f64 = 1.5;

/// A vertical jump larger than this from the line anchor starts a new line.
pub const LINE_BREAK_GAP: f64 = 3.0;

struct Placed {
    ch: char,
    x: f64,
    y: f64,
}

/// Extracts the text of every char overlapping `rect`, in reading order.
///
/// Steps: collect chars whose box strictly overlaps the (normalized) query
/// rectangle; sort by `(y rounded to 0.1, x)`; drop a char that repeats the
/// last kept glyph within [`DUPLICATE_TOLERANCE`]; break lines when y moves
/// more than [`LINE_BREAK_GAP`] from the line's first char; join lines with
/// `\n` and trim.
pub fn extract_text(chars: &[TextChar], rect: &BBoxXYXY<Doc>) -> String {
    let query = rect.normalized();

    let mut placed: Vec<Placed> = chars
        .iter()
        .filter(|c| c.bbox.overlaps(&query))
        .map(|c| {
            let b = c.bbox.normalized();
            Placed {
                ch: c.ch,
                x: b.xmin(),
                y: b.ymin(),
            }
        })
        .collect();

    if placed.is_empty() {
        return String::new();
    }

    placed.sort_by(|a, b| {
        round_tenth(a.y)
            .total_cmp(&round_tenth(b.y))
            .then(a.x.total_cmp(&b.x))
    });

    let mut kept: Vec<Placed> = Vec::with_capacity(placed.len());
    for c in placed {
        if let Some(last) = kept.last() {
            if last.ch == c.ch
                && (c.x - last.x).abs() < DUPLICATE_TOLERANCE
                && (c.y - last.y).abs() < DUPLICATE_TOLERANCE
            {
                continue;
            }
        }
        kept.push(c);
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut anchor_y = kept[0].y;
    for c in &kept {
        if (c.y - anchor_y).abs() > LINE_BREAK_GAP {
            lines.push(std::mem::take(&mut current));
            anchor_y = c.y;
        }
        current.push(c.ch);
    }
    lines.push(current);

    lines.join("\n").trim().to_string()
}

/// Fills the `text` field of every annotation whose page is below
/// `page_count`.
///
/// The source's native clipping wins; char geometry is fetched at most once
/// per page, and only for annotations the clip call can't answer. If a page's
/// chars can't be read, those annotations keep their previous text.
pub fn backfill_text<S>(annotations: &mut [Annotation], source: &S, page_count: usize)
where
    S: TextSource + ?Sized,
{
    let mut pages: Vec<usize> = annotations
        .iter()
        .map(|ann| ann.page)
        .filter(|page| *page < page_count)
        .collect();
    pages.sort_unstable();
    pages.dedup();

    for page in pages {
        let mut chars: Option<Result<Vec<TextChar>, ()>> = None;

        for ann in annotations.iter_mut().filter(|ann| ann.page == page) {
            if let Some(text) = source.clipped_text(page, &ann.bbox.normalized()) {
                ann.text = text.trim().to_string();
                continue;
            }

            let page_chars = chars.get_or_insert_with(|| {
                source.chars(page).map_err(|err| {
                    warn!("skipping text backfill for page {}: {}", page, err);
                })
            });
            if let Ok(page_chars) = page_chars.as_ref() {
                ann.text = extract_text(page_chars, &ann.bbox);
            }
        }
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
