//! Tests for histograms and summary statistics

#[cfg(test)]
mod tests {
    use bitart::analysis::statistics::{Analysis, Histogram};
    use bitart::expression::{Value, parse_equation};
    use bitart::spatial::Grid;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::new).collect()
    }

    // Tests counting and first-seen ordering
    // Verified by sorting entries by value
    #[test]
    fn test_histogram_counts() {
        let values = ints(&[3, 1, 3, 2, 1, 3]);
        let histogram = Histogram::from_values(&values);

        assert_eq!(histogram.num_keys(), 3);
        assert_eq!(histogram.total(), 6);
        assert_eq!(histogram.count(&Value::new(3)), 3);
        assert_eq!(histogram.count(&Value::new(9)), 0);

        let order: Vec<Value> = histogram.iter().map(|(value, _)| value.clone()).collect();
        assert_eq!(order, ints(&[3, 1, 2]));
    }

    // Tests ties for most common resolve to the value seen first
    // Verified by replacing the best entry on equal counts
    #[test]
    fn test_most_common_tie_break() {
        let values = ints(&[5, 4, 4, 5, 6]);
        let histogram = Histogram::from_values(&values);

        assert_eq!(histogram.most_common(), Some((&Value::new(5), 2)));
    }

    // Tests first-seen order survives many distinct keys and late ties
    // Verified by collecting counts into a HashMap
    #[test]
    fn test_first_seen_order_with_many_keys() {
        let mut raw: Vec<i64> = (0..500).rev().collect();
        raw.extend([250, 3, 250, 3]);
        let values = ints(&raw);
        let histogram = Histogram::from_values(&values);

        let order: Vec<Value> = histogram.iter().map(|(value, _)| value.clone()).collect();
        assert_eq!(order, ints(&(0..500).rev().collect::<Vec<_>>()));
        assert_eq!(histogram.most_common(), Some((&Value::new(250), 3)));
        assert_eq!(histogram.count(&Value::new(3)), 3);
        assert_eq!(histogram.min_key(), Some(&Value::new(0)));
        assert_eq!(histogram.max_key(), Some(&Value::new(499)));
    }

    // Tests the tie-break follows the row-major scan of a grid
    // Verified by scanning the grid column-major
    #[test]
    fn test_grid_tie_break_is_row_major() {
        // Column parity: row 0 reads 0, 1, 0, 1 so zero is seen first
        let grid = Grid::evaluated(4, 4, &parse_equation("x % 2").expect("valid equation"));
        let histogram = grid.histogram();

        assert_eq!(histogram.most_common(), Some((&Value::new(0), 8)));
    }

    // Tests a single-valued grid is fully dominant
    // Verified by dividing dominance by the key count
    #[test]
    fn test_single_value_analysis() {
        let grid = Grid::filled(5, 4, &Value::new(7));
        let analysis = grid.analysis();

        assert_eq!(analysis.num_keys, 1);
        assert_eq!(analysis.most_common_key, Value::new(7));
        assert_eq!(analysis.most_common_key_count, 20);
        assert!((analysis.dominance - 1.0).abs() < f64::EPSILON);
        assert!((analysis.density - 1.0).abs() < f64::EPSILON);
    }

    // Tests density and dominance formulas
    // Verified by omitting the +1 in the key range
    #[test]
    fn test_density_and_dominance() {
        let values = ints(&[0, 0, 0, 9]);
        let analysis = Analysis::from_histogram(&Histogram::from_values(&values));

        assert_eq!(analysis.min_key, Value::new(0));
        assert_eq!(analysis.max_key, Value::new(9));
        assert!((analysis.density - 0.2).abs() < 1e-12);
        assert!((analysis.dominance - 0.75).abs() < 1e-12);
    }

    // Tests an empty histogram yields all-zero statistics
    // Verified by unwrapping the minimum of an empty histogram
    #[test]
    fn test_empty_analysis() {
        let histogram = Histogram::from_values(std::iter::empty::<&Value>());

        assert!(histogram.is_empty());
        assert_eq!(histogram.most_common(), None);
        assert_eq!(Analysis::from_histogram(&histogram), Analysis::default());
    }

    // Tests statistics flatten into YAML with plain integer keys
    // Verified by serializing the most common key as a string
    #[test]
    fn test_analysis_serializes() {
        let grid = Grid::evaluated(4, 4, &parse_equation("x % 2").expect("valid equation"));
        let yaml = serde_yaml::to_string(&grid.analysis()).expect("serializable");

        assert!(yaml.contains("num_keys: 2"));
        assert!(yaml.contains("dominance: 0.5"));
        assert!(yaml.contains("most_common_key: 0"));
    }
}
