//! Fuzz target for reading-order text extraction.
//!
//! Arbitrary bytes are decoded into glyph boxes (including NaN and inverted
//! rectangles) and fed to the extractor, checking for panics.

#![no_main]

use doclabel::document::TextChar;
use doclabel::ir::BBoxXYXY;
use doclabel::text::extract_text;
use libfuzzer_sys::fuzz_target;

const RECORD: usize = 4 * 4 + 1;

fn f32_at(bytes: &[u8], offset: usize) -> f64 {
    let raw = [
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ];
    f32::from_le_bytes(raw) as f64
}

fuzz_target!(|data: &[u8]| {
    if data.len() < RECORD || data.len() > 64 * 1024 {
        return;
    }

    let rect = BBoxXYXY::from_xyxy(
        f32_at(data, 0),
        f32_at(data, 4),
        f32_at(data, 8),
        f32_at(data, 12),
    );
    let chars: Vec<TextChar> = data[RECORD..]
        .chunks_exact(RECORD)
        .map(|rec| TextChar {
            bbox: BBoxXYXY::from_xyxy(f32_at(rec, 0), f32_at(rec, 4), f32_at(rec, 8), f32_at(rec, 12)),
            ch: char::from(rec[16]),
        })
        .collect();

    let _ = extract_text(&chars, &rect);
});
