#![allow(dead_code)]

use doclabel::document::TextChar;
use doclabel::ir::{Annotation, BBoxXYXY, Dataset, DatasetImage, Doc, Label};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const EPS_MAPPER: f64 = 1e-9;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps * a.abs().max(b.abs()).max(1.0)
}

pub fn arb_label() -> BoxedStrategy<Label> {
    prop::sample::select(Label::ALL.to_vec()).boxed()
}

pub fn arb_zoom_factor() -> BoxedStrategy<f64> {
    (0.5f64..8.0).boxed()
}

pub fn arb_coord_value() -> BoxedStrategy<f64> {
    (-2000.0f64..2000.0).boxed()
}

/// Any box, ordered or not, possibly reaching past a page.
pub fn arb_doc_bbox() -> BoxedStrategy<BBoxXYXY<Doc>> {
    (
        arb_coord_value(),
        arb_coord_value(),
        arb_coord_value(),
        arb_coord_value(),
    )
        .prop_map(|(x0, y0, x1, y1)| BBoxXYXY::from_xyxy(x0, y0, x1, y1))
        .boxed()
}

/// A page with up to `max_anns` arbitrary annotations.
pub fn arb_dataset_image(max_anns: usize) -> BoxedStrategy<DatasetImage> {
    (
        1u32..=2000,
        1u32..=2000,
        proptest::collection::vec((arb_doc_bbox(), arb_label()), 0..=max_anns),
    )
        .prop_map(|(width, height, anns)| {
            let mut image = DatasetImage::new("doc_page_1.jpg", width, height);
            image.annotations = anns
                .into_iter()
                .map(|(bbox, label)| Annotation::new(0, bbox, label))
                .collect();
            image
        })
        .boxed()
}

pub fn arb_dataset(max_images: usize, max_anns: usize) -> BoxedStrategy<Dataset> {
    proptest::collection::vec(arb_dataset_image(max_anns), 1..=max_images)
        .prop_map(|images| {
            let images = images
                .into_iter()
                .enumerate()
                .map(|(i, mut image)| {
                    image.file_name = format!("doc_page_{}.jpg", i + 1);
                    image
                })
                .collect();
            Dataset { images }
        })
        .boxed()
}

/// Lays `text` out left to right from `(x, y)` with a fixed advance.
pub fn layout_line(text: &str, x: f64, y: f64, advance: f64, height: f64) -> Vec<TextChar> {
    text.chars()
        .enumerate()
        .map(|(i, ch)| {
            let x0 = x + i as f64 * advance;
            TextChar {
                bbox: BBoxXYXY::from_xyxy(x0, y, x0 + advance * 0.9, y + height),
                ch,
            }
        })
        .collect()
}

/// Short words without whitespace and without two equal neighbours.
pub fn arb_word() -> BoxedStrategy<String> {
    "[A-Za-z0-9]{1,12}"
        .prop_filter("no repeated neighbours", |w| {
            let chars: Vec<char> = w.chars().collect();
            chars.windows(2).all(|pair| pair[0] != pair[1])
        })
        .boxed()
}
