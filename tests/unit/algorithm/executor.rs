//! Tests for the generate, evaluate and review loop

#[cfg(test)]
mod tests {
    use bitart::BitartError;
    use bitart::algorithm::executor::{Orchestrator, Outcome, RunConfig, RunState};
    use bitart::algorithm::generator::GenerationConfig;
    use bitart::algorithm::review::Problem;
    use bitart::expression::{Value, parse_equation};
    use bitart::io::palette::ColorMode;
    use rstest::rstest;

    fn constant_config() -> RunConfig {
        RunConfig::default()
            .with_generation(
                GenerationConfig::default()
                    .with_depth(0)
                    .with_literal_rate(1.0),
            )
            .with_size(8, 8)
            .with_attempts(5)
    }

    // Tests the defaults of a run
    // Verified by halving the default canvas extent
    #[test]
    fn test_default_run_config() {
        let config = RunConfig::default();

        assert_eq!((config.width, config.height), (256, 256));
        assert_eq!(config.attempts, 20);
        assert!(config.reject_bad);
        assert!((config.modulus_probability - 0.9).abs() < f64::EPSILON);
        assert_eq!((config.modulus_min, config.modulus_max), (2, 13));
        assert_eq!(config.color_override, None);
        assert!(config.validate().is_ok());
    }

    // Tests invalid run parameters are rejected by field
    // Verified by skipping the modulus range check in validate
    #[rstest]
    #[case(RunConfig::default().with_size(0, 4), "width")]
    #[case(RunConfig::default().with_size(4, 0), "height")]
    #[case(RunConfig::default().with_attempts(0), "attempts")]
    #[case(RunConfig::default().with_modulus_probability(2.0), "modulus_probability")]
    #[case(RunConfig::default().with_modulus_range(1, 5), "modulus_min")]
    #[case(RunConfig::default().with_modulus_range(9, 3), "modulus_max")]
    fn test_invalid_run_config(#[case] config: RunConfig, #[case] field: &str) {
        match Orchestrator::new(config, 0) {
            Err(BitartError::InvalidParameter { parameter, .. }) => assert_eq!(parameter, field),
            Err(other) => panic!("expected InvalidParameter, got {other}"),
            Ok(_) => panic!("expected {field} to be rejected"),
        }
    }

    // Tests constant expressions exhaust the budget when rejection is enabled
    // Verified by returning the first rejected attempt as accepted
    #[test]
    fn test_constant_expressions_exhaust() {
        let mut orchestrator = Orchestrator::new(constant_config(), 7).expect("valid config");
        assert_eq!(orchestrator.state(), RunState::Idle);

        let mut observed = Vec::new();
        let outcome = orchestrator.run_with(|number, attempt| {
            observed.push(number);
            assert_eq!(attempt.analysis.num_keys, 1);
        });

        assert_eq!(observed, vec![1, 2, 3, 4, 5]);
        assert_eq!(orchestrator.state(), RunState::Exhausted);
        match outcome {
            Outcome::Exhausted(exhaustion) => {
                assert_eq!(exhaustion.attempts, 5);
                assert_eq!(exhaustion.last_problem, Some(Problem::SolidColour));
                assert!(exhaustion.last_expression.is_some());
                assert_eq!(exhaustion.to_string(), "Solid colour");
            }
            Outcome::Accepted(artwork) => panic!("unexpected acceptance of {}", artwork.expression),
        }
    }

    // Tests exhaustion maps to an error carrying the reason
    // Verified by dropping the last problem from the exhaustion record
    #[test]
    fn test_exhaustion_into_error() {
        let mut orchestrator = Orchestrator::new(constant_config(), 7).expect("valid config");
        let outcome = orchestrator.run();

        assert!(!outcome.is_accepted());
        match outcome.into_artwork() {
            Err(BitartError::NoInterestingPattern { attempts, reason }) => {
                assert_eq!(attempts, 5);
                assert_eq!(reason, "Solid colour");
            }
            Err(other) => panic!("expected NoInterestingPattern, got {other}"),
            Ok(artwork) => panic!("unexpected artwork {}", artwork.expression),
        }
    }

    // Tests disabling rejection keeps the first attempt with its problem
    // Verified by ignoring the reject flag
    #[test]
    fn test_keep_first_attempt() {
        let config = constant_config().with_reject_bad(false);
        let mut orchestrator = Orchestrator::new(config, 7).expect("valid config");

        let artwork = orchestrator.run().into_artwork().expect("first attempt kept");

        assert_eq!(orchestrator.state(), RunState::Accepted);
        assert_eq!(artwork.attempts, 1);
        assert_eq!(artwork.problem, Some(Problem::SolidColour));
        assert_eq!(artwork.grid.len(), 64);
    }

    // Tests a modulus-wrapped result is colored as onebit
    // Verified by inferring the color mode from the value count for generated runs
    #[test]
    fn test_modulus_selects_onebit() {
        let config = constant_config()
            .with_reject_bad(false)
            .with_modulus_probability(1.0);
        let mut orchestrator = Orchestrator::new(config, 3).expect("valid config");

        let artwork = orchestrator.run().into_artwork().expect("first attempt kept");
        assert!(artwork.modulus.is_some_and(|m| (2..=13).contains(&m)));
        assert_eq!(artwork.color_mode, ColorMode::OneBit);
    }

    // Tests a run without a modulus defaults to the gradient and honours overrides
    // Verified by checking the override after the modulus
    #[test]
    fn test_color_override_wins() {
        let plain = constant_config()
            .with_reject_bad(false)
            .with_modulus_probability(0.0);
        let mut orchestrator = Orchestrator::new(plain, 3).expect("valid config");
        assert_eq!(
            orchestrator.run().into_artwork().expect("kept").color_mode,
            ColorMode::Gradient
        );

        let forced = plain.with_color_override(Some(ColorMode::Magenta));
        let mut orchestrator = Orchestrator::new(forced, 3).expect("valid config");
        assert_eq!(
            orchestrator.run().into_artwork().expect("kept").color_mode,
            ColorMode::Magenta
        );
    }

    // Tests the parity equation on a 4x4 grid
    // Verified by choosing the most common key from the last value seen
    #[test]
    fn test_render_custom_parity() {
        let config = RunConfig::default().with_size(4, 4);
        let mut orchestrator = Orchestrator::new(config, 0).expect("valid config");

        let artwork = orchestrator.render_custom(parse_equation("x % 2").expect("valid"));

        assert_eq!(artwork.analysis.num_keys, 2);
        assert!((artwork.analysis.dominance - 0.5).abs() < f64::EPSILON);
        assert_eq!(artwork.analysis.most_common_key, Value::new(0));
        assert_eq!(artwork.color_mode, ColorMode::OneBit);
        assert_eq!(artwork.modulus, None);
        assert_eq!(artwork.attempts, 1);
    }

    // Tests a custom expression with many values uses the gradient
    // Verified by lowering the custom discrete key limit to zero
    #[test]
    fn test_render_custom_gradient() {
        let config = RunConfig::default().with_size(64, 64);
        let mut orchestrator = Orchestrator::new(config, 0).expect("valid config");

        let artwork = orchestrator.render_custom(parse_equation("x * 64 + y").expect("valid"));
        assert_eq!(artwork.analysis.num_keys, 4096);
        assert_eq!(artwork.color_mode, ColorMode::Gradient);
        assert_eq!(artwork.problem, None);
    }

    // Tests lanes no longer than the pattern bound always count as stripes
    // Verified by comparing pattern length with >= instead of >
    #[test]
    fn test_render_custom_short_lanes_are_striped() {
        let config = RunConfig::default().with_size(16, 16);
        let mut orchestrator = Orchestrator::new(config, 0).expect("valid config");

        let artwork = orchestrator.render_custom(parse_equation("x * 16 + y").expect("valid"));
        assert_eq!(artwork.analysis.num_keys, 256);
        assert_eq!(
            artwork.problem,
            Some(Problem::Striped {
                rows: 16,
                columns: 16
            })
        );
    }

    // Tests runs are reproducible from the seed
    // Verified by drawing the modulus from a fresh thread rng
    #[test]
    fn test_seeded_runs_repeat() {
        let config = RunConfig::default().with_size(48, 48);

        let first = Orchestrator::new(config, 1234).expect("valid config").run();
        let second = Orchestrator::new(config, 1234).expect("valid config").run();

        match (first, second) {
            (Outcome::Accepted(a), Outcome::Accepted(b)) => {
                assert_eq!(a.expression, b.expression);
                assert_eq!(a.attempts, b.attempts);
                assert_eq!(a.grid, b.grid);
            }
            (Outcome::Exhausted(a), Outcome::Exhausted(b)) => {
                assert_eq!(a.last_expression, b.last_expression);
            }
            _ => panic!("runs with the same seed diverged"),
        }
    }

    // Tests every accepted attempt passed review when rejection is enabled
    // Verified by accepting attempts that carry a problem
    #[test]
    fn test_accepted_artwork_has_no_problem() {
        let config = RunConfig::default().with_size(32, 32);

        for seed in 0..5 {
            let mut orchestrator = Orchestrator::new(config, seed).expect("valid config");
            if let Outcome::Accepted(artwork) = orchestrator.run() {
                assert_eq!(artwork.problem, None);
                assert!(artwork.attempts >= 1 && artwork.attempts <= config.attempts);
            }
        }
    }
}
