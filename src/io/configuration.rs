//! Generation constants and runtime configuration defaults

// Image geometry
/// Side length of the rendered image in pixels
pub const EXTENT: usize = 512;
/// Largest supported zoom power (scale is `2^zoom`)
pub const MAX_ZOOM: u32 = 3;
/// Zoom power used when none is requested
pub const DEFAULT_ZOOM: u32 = 1;
/// Chance of picking a random zoom when none is requested
pub const RANDOM_ZOOM_CHANCE: f64 = 0.2;

// Expression generation
/// Default expression depth
pub const DEFAULT_DEPTH: usize = 4;
/// Lower bound for randomly chosen depths
pub const MIN_RANDOM_DEPTH: usize = 2;
/// Probability that an inner node is unary
pub const DEFAULT_UNARY_RATE: f64 = 0.3;
/// Probability that an unconstrained leaf is a literal
pub const DEFAULT_LITERAL_RATE: f64 = 0.5;
/// Largest literal magnitude produced by the generator
pub const DEFAULT_MAX_LITERAL: u32 = 24;

// Modulus wrapping
/// Chance that a generated expression is wrapped in `% m`
pub const MODULUS_CHANCE: f64 = 0.9;
/// Smallest generated modulus
pub const MODULUS_MIN: u32 = 2;
/// Largest generated modulus
pub const MODULUS_MAX: u32 = 13;

// Quality review
/// Maximum generate-evaluate-review cycles before giving up
pub const DEFAULT_ATTEMPTS: usize = 20;
/// Images whose most common value covers more than this fraction are rejected
pub const DOMINANCE_THRESHOLD: f64 = 0.98;
/// Longest repeating row/column pattern still counted as a stripe
pub const MAX_PATTERN_LENGTH: usize = 16;
/// Fraction of striped rows or columns above which an image is rejected
pub const STRIPE_FRACTION: f64 = 0.95;

// Custom equations carry no modulus, so coloring is inferred from the histogram
/// Distinct value count below which custom equations are colored as two-tone
pub const CUSTOM_DISCRETE_KEY_LIMIT: usize = 30;

/// Longest accepted equation text in bytes
pub const MAX_EQUATION_LENGTH: usize = 4096;
/// Deepest accepted parenthesis/unary nesting in equation text
pub const MAX_EQUATION_NESTING: usize = 128;

// Output settings
/// Extension of rendered images
pub const IMAGE_EXTENSION: &str = "png";
/// Extension of metadata files
pub const METADATA_EXTENSION: &str = "yaml";
/// Width of the attempt progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;
