//! Color modes and value-to-color mapping

use crate::analysis::statistics::Analysis;
use crate::expression::Value;
use clap::ValueEnum;
use image::Rgb;
use serde::Serialize;
use std::f64::consts::PI;
use std::fmt;

/// Strategy for turning grid values into colors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Most common value black, everything else white
    #[value(name = "onebit")]
    OneBit,
    /// Grey ramp from the smallest to the largest value
    Gradient,
    /// Red rises, green peaks mid-range, blue falls
    Rgb,
    /// Red ramp
    Red,
    /// Green ramp
    Green,
    /// Blue ramp
    Blue,
    /// Cyan ramp
    Cyan,
    /// Magenta ramp
    Magenta,
    /// Yellow ramp
    Yellow,
    /// Orange ramp
    Orange,
    /// Grey ramp
    #[value(alias = "gray")]
    Grey,
}

impl ColorMode {
    /// Lowercase name used on the command line and in metadata
    pub const fn name(self) -> &'static str {
        match self {
            Self::OneBit => "onebit",
            Self::Gradient => "gradient",
            Self::Rgb => "rgb",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Cyan => "cyan",
            Self::Magenta => "magenta",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Grey => "grey",
        }
    }

    // Per-channel weights of a single-color ramp
    const fn channels(self) -> Option<[f64; 3]> {
        match self {
            Self::Gradient | Self::Grey => Some([1.0, 1.0, 1.0]),
            Self::Red => Some([1.0, 0.0, 0.0]),
            Self::Green => Some([0.0, 1.0, 0.0]),
            Self::Blue => Some([0.0, 0.0, 1.0]),
            Self::Cyan => Some([0.0, 1.0, 1.0]),
            Self::Magenta => Some([1.0, 0.0, 1.0]),
            Self::Yellow => Some([1.0, 1.0, 0.0]),
            Self::Orange => Some([1.0, 0.647, 0.0]),
            Self::OneBit | Self::Rgb => None,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Color function bound to the statistics of one grid
#[derive(Clone, Debug)]
pub struct Palette {
    mode: ColorMode,
    min_key: Value,
    span: f64,
    most_common_key: Value,
}

impl Palette {
    /// Bind a color mode to a grid's value range
    pub fn new(mode: ColorMode, analysis: &Analysis) -> Self {
        let span = (&analysis.max_key - &analysis.min_key).to_f64();
        Self {
            mode,
            min_key: analysis.min_key.clone(),
            span: if span == 0.0 { 1.0 } else { span },
            most_common_key: analysis.most_common_key.clone(),
        }
    }

    /// Mode this palette was built for
    pub const fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Position of a value within the range, clamped to `[0, 1]`
    pub fn magnitude(&self, value: &Value) -> f64 {
        let t = (value - &self.min_key).to_f64() / self.span;
        if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
    }

    /// Color of one value
    pub fn color(&self, value: &Value) -> Rgb<u8> {
        if self.mode == ColorMode::OneBit {
            return if *value == self.most_common_key {
                BLACK
            } else {
                WHITE
            };
        }

        let t = self.magnitude(value);
        match self.mode.channels() {
            Some([r, g, b]) => Rgb([channel(t * r), channel(t * g), channel(t * b)]),
            None => Rgb([
                channel(t),
                channel((PI * t).sin()),
                channel((0.5 * PI * t).cos()),
            ]),
        }
    }
}

// Scale a unit intensity to a byte, truncating like an integer cast
fn channel(intensity: f64) -> u8 {
    (255.0 * intensity).clamp(0.0, 255.0) as u8
}
