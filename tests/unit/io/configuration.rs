//! Tests for generation constants

#[cfg(test)]
mod tests {
    use bitart::io::configuration::{
        CUSTOM_DISCRETE_KEY_LIMIT, DEFAULT_ATTEMPTS, DEFAULT_DEPTH, DEFAULT_LITERAL_RATE,
        DEFAULT_MAX_LITERAL, DEFAULT_UNARY_RATE, DEFAULT_ZOOM, DOMINANCE_THRESHOLD, EXTENT,
        MAX_EQUATION_LENGTH, MAX_EQUATION_NESTING, MAX_PATTERN_LENGTH, MAX_ZOOM,
        MIN_RANDOM_DEPTH, MODULUS_CHANCE, MODULUS_MAX, MODULUS_MIN, RANDOM_ZOOM_CHANCE,
        STRIPE_FRACTION,
    };

    // Tests every zoom level divides the extent evenly
    // Verified by raising the maximum zoom to 10
    #[test]
    fn test_extent_divisible_by_every_scale() {
        for zoom in 0..=MAX_ZOOM {
            let scale = 1_usize << zoom;
            assert_eq!(EXTENT % scale, 0);
            assert_eq!((EXTENT / scale) * scale, 512);
        }
        assert!((0..=MAX_ZOOM).contains(&DEFAULT_ZOOM));
    }

    // Tests review and generation defaults
    // Verified by changing the default depth
    #[test]
    fn test_generation_defaults() {
        assert_eq!(DEFAULT_DEPTH, 4);
        assert_eq!(DEFAULT_ATTEMPTS, 20);
        assert_eq!(MIN_RANDOM_DEPTH, 2);
        assert_eq!((MODULUS_MIN, MODULUS_MAX), (2, 13));
        assert_eq!(MAX_PATTERN_LENGTH, 16);
        assert_eq!(CUSTOM_DISCRETE_KEY_LIMIT, 30);
        assert_ne!(DEFAULT_MAX_LITERAL, 0);
    }

    // Tests every probability lies in the unit interval
    // Verified by setting the modulus chance to 9
    #[test]
    fn test_probabilities_are_valid() {
        for probability in [
            RANDOM_ZOOM_CHANCE,
            DEFAULT_UNARY_RATE,
            DEFAULT_LITERAL_RATE,
            MODULUS_CHANCE,
            DOMINANCE_THRESHOLD,
            STRIPE_FRACTION,
        ] {
            assert!((0.0..=1.0).contains(&probability));
        }
    }

    // Tests parser limits
    // Verified by lowering the equation length limit
    #[test]
    fn test_parser_limits() {
        assert_eq!(MAX_EQUATION_LENGTH, 4096);
        assert_eq!(MAX_EQUATION_NESTING, 128);
    }
}
