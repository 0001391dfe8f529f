use doclabel::ir::BBoxXYXY;
use doclabel::text::extract_text;
use proptest::prelude::*;

mod proptest_helpers;

use proptest_helpers::layout_line;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn single_line_inside_rect_is_recovered(
        word in proptest_helpers::arb_word(),
        x in 0.0f64..500.0,
        y in 0.0f64..500.0,
    ) {
        let chars = layout_line(&word, x, y, 6.0, 10.0);
        let rect = BBoxXYXY::from_xyxy(x - 1.0, y - 1.0, x + 6.0 * 13.0, y + 11.0);
        prop_assert_eq!(extract_text(&chars, &rect), word);
    }

    #[test]
    fn input_order_does_not_matter(
        first in proptest_helpers::arb_word(),
        second in proptest_helpers::arb_word(),
        seed in any::<u64>(),
    ) {
        let mut chars = layout_line(&first, 10.0, 10.0, 6.0, 10.0);
        chars.extend(layout_line(&second, 10.0, 40.0, 6.0, 10.0));
        let rect = BBoxXYXY::from_xyxy(0.0, 0.0, 200.0, 100.0);
        let expected = extract_text(&chars, &rect);

        // deterministic shuffle
        let len = chars.len();
        let mut state = seed;
        for i in (1..len).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = (state >> 33) as usize % (i + 1);
            chars.swap(i, j);
        }

        prop_assert_eq!(extract_text(&chars, &rect), expected.clone());
        prop_assert_eq!(expected, format!("{}\n{}", first, second));
    }

    #[test]
    fn disjoint_rect_yields_nothing(
        word in proptest_helpers::arb_word(),
        gap in 0.0f64..100.0,
    ) {
        let chars = layout_line(&word, 0.0, 0.0, 6.0, 10.0);
        let rect = BBoxXYXY::from_xyxy(0.0, 10.0 + gap, 100.0, 50.0 + gap);
        prop_assert_eq!(extract_text(&chars, &rect), "");
    }
}
