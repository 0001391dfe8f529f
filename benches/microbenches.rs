//! Criterion microbenches for doclabel text extraction and dataset writing.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Reading-order text extraction over a dense page (extract_text)
//! - Sidecar parsing (from_sidecar_str)
//! - COCO JSON and YOLO label rendering (to_coco_string, yolo_label_lines)

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use doclabel::document::TextChar;
use doclabel::ir::io_coco_json::to_coco_string;
use doclabel::ir::io_sidecar::{from_sidecar_str, to_sidecar_string};
use doclabel::ir::io_yolo::yolo_label_lines;
use doclabel::ir::{Annotation, BBoxXYXY, Dataset, DatasetImage, Label, LabelCatalog};
use doclabel::text::extract_text;

const LINES: usize = 60;
const CHARS_PER_LINE: usize = 80;

/// A letter-size page full of 10pt monospaced text.
fn dense_page() -> Vec<TextChar> {
    let alphabet: Vec<char> = "abcdefghijklmnopqrstuvwxyz ".chars().collect();
    let mut chars = Vec::with_capacity(LINES * CHARS_PER_LINE);
    for line in 0..LINES {
        let y = 40.0 + line as f64 * 12.0;
        for col in 0..CHARS_PER_LINE {
            let x = 36.0 + col as f64 * 6.0;
            chars.push(TextChar {
                bbox: BBoxXYXY::from_xyxy(x, y, x + 6.0, y + 10.0),
                ch: alphabet[(line * 7 + col) % alphabet.len()],
            });
        }
    }
    chars
}

fn sample_annotations(count: usize) -> Vec<Annotation> {
    (0..count)
        .map(|i| {
            let y = 40.0 + (i % 50) as f64 * 14.0;
            Annotation::new(
                i / 50,
                BBoxXYXY::from_xyxy(36.0, y, 560.0, y + 12.0),
                Label::ALL[i % Label::ALL.len()],
            )
            .with_text(format!("Region {}", i))
        })
        .collect()
}

fn sample_dataset(pages: usize) -> Dataset {
    let annotations = sample_annotations(pages * 50);
    let images = (0..pages)
        .map(|page| {
            let mut image = DatasetImage::new(format!("report_page_{}.jpg", page + 1), 612, 792);
            image.annotations = annotations
                .iter()
                .filter(|a| a.page == page)
                .cloned()
                .collect();
            image
        })
        .collect();
    Dataset { images }
}

/// Benchmark text extraction for a quarter-page and a full-page rectangle.
fn bench_extract_text(c: &mut Criterion) {
    let chars = dense_page();
    let mut group = c.benchmark_group("extract_text");
    group.throughput(Throughput::Elements(chars.len() as u64));

    let quarter = BBoxXYXY::from_xyxy(36.0, 40.0, 276.0, 400.0);
    group.bench_function("quarter_page", |b| {
        b.iter(|| black_box(extract_text(black_box(&chars), black_box(&quarter))))
    });

    let full = BBoxXYXY::from_xyxy(0.0, 0.0, 612.0, 792.0);
    group.bench_function("full_page", |b| {
        b.iter(|| black_box(extract_text(black_box(&chars), black_box(&full))))
    });

    group.finish();
}

/// Benchmark sidecar parsing.
fn bench_sidecar_parse(c: &mut Criterion) {
    let json = to_sidecar_string(&sample_annotations(500)).expect("serialize sidecar");
    let mut group = c.benchmark_group("sidecar_parse");
    group.throughput(Throughput::Bytes(json.len() as u64));

    group.bench_function("from_sidecar_str", |b| {
        b.iter(|| {
            let anns = from_sidecar_str(black_box(&json)).unwrap();
            black_box(anns)
        })
    });

    group.finish();
}

/// Benchmark COCO and YOLO rendering of a 20-page dataset.
fn bench_dataset_write(c: &mut Criterion) {
    let dataset = sample_dataset(20);
    let catalog = LabelCatalog::standard();
    let mut group = c.benchmark_group("dataset_write");
    group.throughput(Throughput::Elements(dataset.annotation_count() as u64));

    group.bench_function("to_coco_string", |b| {
        b.iter(|| {
            let json = to_coco_string(black_box(&dataset), &catalog).unwrap();
            black_box(json)
        })
    });

    group.bench_function("yolo_label_lines", |b| {
        b.iter(|| {
            for image in &dataset.images {
                black_box(yolo_label_lines(black_box(image), &catalog).unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_extract_text,
    bench_sidecar_parse,
    bench_dataset_write,
);
criterion_main!(benches);
