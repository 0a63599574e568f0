use super::*;

fn range(max_width: u32, min_width: u32, step: u32) -> SizeRange {
    SizeRange {
        max_width,
        min_width,
        step,
    }
}

#[test]
fn reference_cascade_has_eleven_sizes() {
    let r = range(120, 20, 10);
    let widths = cascade_widths(r).unwrap();
    assert_eq!(widths, vec![120, 110, 100, 90, 80, 70, 60, 50, 40, 30, 20]);
    assert_eq!(cascade_len(r), 11);
}

#[test]
fn widths_form_an_arithmetic_sequence_above_min() {
    for max in 1..=60u32 {
        for min in 1..=max {
            for step in 1..=12u32 {
                let r = range(max, min, step);
                let widths = cascade_widths(r).unwrap();
                assert_eq!(widths[0], max);
                assert!(widths.iter().all(|w| *w >= min));
                assert!(widths.windows(2).all(|p| p[0] - p[1] == step));
                // The next width would fall below the minimum.
                let last = *widths.last().unwrap();
                assert!(last < min + step);

                if (max - min) % step == 0 {
                    assert_eq!(widths.len() as u32, cascade_len(r));
                } else {
                    assert!(cascade_len(r).abs_diff(widths.len() as u32) <= 1);
                }
            }
        }
    }
}

#[test]
fn single_size_when_max_equals_min() {
    assert_eq!(cascade_widths(range(32, 32, 8)).unwrap(), vec![32]);
    assert_eq!(cascade_len(range(32, 32, 8)), 1);
}

#[test]
fn count_formula_rounds_half_to_even() {
    // (120 - 20 + 40) / 40 = 3.5
    assert_eq!(cascade_len(range(120, 20, 40)), 4);
    // (100 - 20 + 40) / 40 = 3.0
    assert_eq!(cascade_len(range(100, 20, 40)), 3);
    // (110 - 20 + 20) / 20 = 5.5
    assert_eq!(cascade_len(range(110, 20, 20)), 6);
    assert_eq!(cascade_widths(range(120, 20, 40)).unwrap(), vec![120, 80, 40]);
}

#[test]
fn invalid_ranges_fail() {
    assert!(cascade_widths(range(120, 20, 0)).is_err());
    assert!(cascade_widths(range(10, 20, 1)).is_err());
    assert_eq!(cascade_len(range(10, 20, 1)), 0);
}

#[test]
fn derived_height_preserves_aspect() {
    assert_eq!(derived_height(100, 1920, 1080), 56);
    assert_eq!(derived_height(120, 400, 400), 120);
    assert_eq!(derived_height(50, 200, 100), 25);
    // 5 * 3 / 2 = 7.5 rounds to even
    assert_eq!(derived_height(5, 2, 3), 8);
    // 3 * 5 / 2 = 7.5
    assert_eq!(derived_height(3, 2, 5), 8);
    // 1 * 5 / 2 = 2.5
    assert_eq!(derived_height(1, 2, 5), 2);
}

#[test]
fn derived_height_never_zero() {
    assert_eq!(derived_height(10, 10_000, 1), 1);
    assert_eq!(derived_height(10, 0, 10), 1);
}
