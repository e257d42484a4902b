//! Tests for repeated-pattern detection and stripe review

#[cfg(test)]
mod tests {
    use bitart::analysis::patterns::{find_pattern_in, repeated_pattern, stripe_fraction};
    use bitart::expression::{Value, parse_equation};
    use bitart::spatial::Grid;
    use proptest::prelude::*;
    use rstest::rstest;

    // Tests the shortest repeating prefix is found
    // Verified by growing the candidate to the mismatch index instead of past it
    #[rstest]
    #[case(&[1, 2, 1, 2, 1, 2], 2, Some(&[1, 2][..]))]
    #[case(&[1, 2, 1, 2, 1, 2], 16, Some(&[1, 2][..]))]
    #[case(&[7, 7, 7, 7], 1, Some(&[7][..]))]
    #[case(&[1, 2, 3, 1, 2, 3, 1], 3, Some(&[1, 2, 3][..]))]
    #[case(&[1, 2, 3, 4, 5], 2, None)]
    #[case(&[1, 1, 2, 1, 1, 2], 2, None)]
    fn test_find_pattern(
        #[case] stripe: &[i32],
        #[case] max_pattern_length: usize,
        #[case] expected: Option<&[i32]>,
    ) {
        assert_eq!(find_pattern_in(stripe, max_pattern_length), expected);
    }

    // Tests a candidate whose mismatch reaches past the end is accepted
    // Verified by requiring the candidate to tile the whole sequence
    #[test]
    fn test_candidate_reaching_past_end_is_accepted() {
        // Candidate [1, 2, 3] first deviates at 3, and 3 + 3 exceeds the length
        let stripe = [1, 2, 3, 4, 9];
        assert_eq!(find_pattern_in(&stripe, 5), Some(&[1, 2, 3][..]));
    }

    // Tests empty input never matches
    // Verified by returning the first element of an empty stripe
    #[test]
    fn test_empty_stripe() {
        let stripe: [i32; 0] = [];
        assert_eq!(find_pattern_in(&stripe, 16), None);
    }

    // Tests rows and columns of a grid are examined by orientation
    // Verified by reading rows when vertical is requested
    #[test]
    fn test_repeated_pattern_on_grid() {
        let grid = Grid::evaluated(6, 6, &parse_equation("x % 2 + 10 * (y % 3)").expect("valid"));

        let row = repeated_pattern(&grid, 0, false, 16).expect("row exists");
        assert_eq!(row, Some(vec![Value::new(0), Value::new(1)]));

        let column = repeated_pattern(&grid, 0, true, 16).expect("column exists");
        assert_eq!(
            column,
            Some(vec![Value::new(0), Value::new(10), Value::new(20)])
        );

        assert!(repeated_pattern(&grid, 6, true, 16).is_err());
    }

    // Tests column parity is reported as striped and a ramp is not
    // Verified by dividing the column count by the height
    #[test]
    fn test_stripe_fraction() {
        let stripes = Grid::evaluated(32, 32, &parse_equation("x % 2").expect("valid"));
        let report = stripe_fraction(&stripes, 16, 0.95);
        assert_eq!((report.rows, report.columns), (32, 32));
        assert!(report.striped);

        let ramp = Grid::evaluated(32, 32, &parse_equation("x * y").expect("valid"));
        let ramp_report = stripe_fraction(&ramp, 16, 0.95);
        assert!(!ramp_report.striped);
    }

    // Tests an empty grid is never striped
    // Verified by treating zero lanes as fully patterned
    #[test]
    fn test_stripe_fraction_empty_grid() {
        let report = stripe_fraction(&Grid::new(0, 0), 16, 0.95);
        assert!(!report.striped);
        assert_eq!((report.rows, report.columns), (0, 0));
    }

    proptest! {
        // A lane no longer than the pattern bound always explains itself
        #[test]
        fn prop_short_lane_is_always_patterned(
            stripe in prop::collection::vec(any::<i32>(), 1..=16),
        ) {
            prop_assert!(find_pattern_in(&stripe, 16).is_some());
        }
    }
}
