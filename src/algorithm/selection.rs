//! Random modulus choice and color mode selection

use crate::analysis::statistics::Analysis;
use crate::io::configuration::CUSTOM_DISCRETE_KEY_LIMIT;
use crate::io::palette::ColorMode;
use rand::Rng;
use std::ops::RangeInclusive;

/// Pick a modulus from `range` with the given probability, otherwise none
///
/// An empty range never yields a modulus.
pub fn choose_modulus<R: Rng + ?Sized>(
    rng: &mut R,
    probability: f64,
    range: &RangeInclusive<u32>,
) -> Option<u32> {
    if range.is_empty() || rng.random::<f64>() >= probability {
        return None;
    }
    Some(rng.random_range(range.clone()))
}

/// Color mode for a generated expression
///
/// Modular images take few values and read best as two tones.
pub const fn choose_color_mode(color_override: Option<ColorMode>, modulus: Option<u32>) -> ColorMode {
    match (color_override, modulus) {
        (Some(mode), _) => mode,
        (None, Some(_)) => ColorMode::OneBit,
        (None, None) => ColorMode::Gradient,
    }
}

/// Color mode for a custom expression, inferred from its value spread
pub const fn infer_color_mode(color_override: Option<ColorMode>, analysis: &Analysis) -> ColorMode {
    match color_override {
        Some(mode) => mode,
        None if analysis.num_keys < CUSTOM_DISCRETE_KEY_LIMIT => ColorMode::OneBit,
        None => ColorMode::Gradient,
    }
}
