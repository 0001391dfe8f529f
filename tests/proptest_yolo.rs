use doclabel::ir::io_yolo::yolo_label_lines;
use doclabel::ir::LabelCatalog;
use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn yolo_lines_are_normalized_with_six_decimals(
        image in proptest_helpers::arb_dataset_image(10)
    ) {
        let catalog = LabelCatalog::standard();
        let content = yolo_label_lines(&image, &catalog).expect("yolo lines");
        let lines: Vec<&str> = content.lines().collect();
        prop_assert_eq!(lines.len(), image.annotations.len());

        for (line, ann) in lines.iter().zip(&image.annotations) {
            let fields: Vec<&str> = line.split(' ').collect();
            prop_assert_eq!(fields.len(), 5);

            let class: u64 = fields[0].parse().expect("class index");
            prop_assert_eq!(class, catalog.category_id(ann.label).unwrap().class_index());

            for field in &fields[1..] {
                let decimals = field.split('.').nth(1).map(str::len);
                prop_assert_eq!(decimals, Some(6), "field {}", field);
                let value: f64 = field.parse().expect("float");
                prop_assert!((0.0..=1.0).contains(&value), "value {} out of range", value);
            }
        }
    }
}
