//! Generate, evaluate and review loop
//!
//! The orchestrator owns the random source and drives attempts until one
//! passes review or the budget runs out. Each attempt evaluates a fresh grid;
//! nothing carries over between attempts except the random state.

use crate::algorithm::generator::{ExpressionGenerator, GenerationConfig};
use crate::algorithm::review::{Problem, ReviewThresholds, review};
use crate::algorithm::selection::{choose_color_mode, choose_modulus, infer_color_mode};
use crate::analysis::statistics::Analysis;
use crate::expression::Expression;
use crate::io::configuration::{
    DEFAULT_ATTEMPTS, DEFAULT_ZOOM, EXTENT, MODULUS_CHANCE, MODULUS_MAX, MODULUS_MIN,
};
use crate::io::error::{BitartError, Result, invalid_parameter};
use crate::io::palette::ColorMode;
use crate::spatial::Grid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use tracing::{debug, info, warn};

/// Parameters for one orchestrated run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunConfig {
    /// Shape of generated trees
    pub generation: GenerationConfig,
    /// Grid columns
    pub width: usize,
    /// Grid rows
    pub height: usize,
    /// Attempt budget
    pub attempts: usize,
    /// Whether attempts with a review problem are discarded
    pub reject_bad: bool,
    /// Chance that a generated tree is wrapped in a modulus
    pub modulus_probability: f64,
    /// Smallest modulus
    pub modulus_min: u32,
    /// Largest modulus
    pub modulus_max: u32,
    /// Color mode forced by the caller
    pub color_override: Option<ColorMode>,
    /// Review limits
    pub thresholds: ReviewThresholds,
}

impl Default for RunConfig {
    fn default() -> Self {
        let extent = EXTENT >> DEFAULT_ZOOM;
        Self {
            generation: GenerationConfig::default(),
            width: extent,
            height: extent,
            attempts: DEFAULT_ATTEMPTS,
            reject_bad: true,
            modulus_probability: MODULUS_CHANCE,
            modulus_min: MODULUS_MIN,
            modulus_max: MODULUS_MAX,
            color_override: None,
            thresholds: ReviewThresholds::default(),
        }
    }
}

impl RunConfig {
    /// Set the tree shape
    #[must_use]
    pub const fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Set the grid dimensions
    #[must_use]
    pub const fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the attempt budget
    #[must_use]
    pub const fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    /// Enable or disable rejection of problematic attempts
    #[must_use]
    pub const fn with_reject_bad(mut self, reject_bad: bool) -> Self {
        self.reject_bad = reject_bad;
        self
    }

    /// Set the modulus probability
    #[must_use]
    pub const fn with_modulus_probability(mut self, probability: f64) -> Self {
        self.modulus_probability = probability;
        self
    }

    /// Set the inclusive modulus range
    #[must_use]
    pub const fn with_modulus_range(mut self, min: u32, max: u32) -> Self {
        self.modulus_min = min;
        self.modulus_max = max;
        self
    }

    /// Force a color mode
    #[must_use]
    pub const fn with_color_override(mut self, color_override: Option<ColorMode>) -> Self {
        self.color_override = color_override;
        self
    }

    /// Set review limits
    #[must_use]
    pub const fn with_thresholds(mut self, thresholds: ReviewThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Validate every field
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for the first field outside its allowed range
    pub fn validate(&self) -> Result<()> {
        self.generation.validate()?;

        if self.width == 0 {
            return Err(invalid_parameter("width", &self.width, &"must be at least 1"));
        }
        if self.height == 0 {
            return Err(invalid_parameter("height", &self.height, &"must be at least 1"));
        }
        if self.attempts == 0 {
            return Err(invalid_parameter(
                "attempts",
                &self.attempts,
                &"must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.modulus_probability) {
            return Err(invalid_parameter(
                "modulus_probability",
                &self.modulus_probability,
                &"must be within [0, 1]",
            ));
        }
        if self.modulus_min < 2 {
            return Err(invalid_parameter(
                "modulus_min",
                &self.modulus_min,
                &"must be at least 2",
            ));
        }
        if self.modulus_max < self.modulus_min {
            return Err(invalid_parameter(
                "modulus_max",
                &self.modulus_max,
                &format!("must not be below modulus_min ({})", self.modulus_min),
            ));
        }
        Ok(())
    }
}

/// Progress of the orchestration state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// No attempt made yet
    Idle,
    /// Working on the given attempt, counted from one
    Attempting {
        /// Current attempt number
        attempt: usize,
    },
    /// An attempt was accepted
    Accepted,
    /// The budget ran out
    Exhausted,
}

/// One evaluated and reviewed expression
#[derive(Clone, Debug)]
pub struct Attempt {
    /// Generated tree, including any modulus wrapper
    pub expression: Expression,
    /// Modulus the tree was wrapped in
    pub modulus: Option<u32>,
    /// Evaluated values
    pub grid: Grid,
    /// Value statistics of the grid
    pub analysis: Analysis,
    /// Review verdict, `None` when the image passed
    pub problem: Option<Problem>,
}

impl Attempt {
    fn into_artwork(self, color_mode: ColorMode, attempts: usize) -> Artwork {
        Artwork {
            expression: self.expression,
            grid: self.grid,
            analysis: self.analysis,
            color_mode,
            modulus: self.modulus,
            problem: self.problem,
            attempts,
        }
    }
}

/// Accepted result, ready for rendering
#[derive(Clone, Debug)]
pub struct Artwork {
    /// Expression that produced the grid
    pub expression: Expression,
    /// Evaluated values
    pub grid: Grid,
    /// Value statistics of the grid
    pub analysis: Analysis,
    /// Selected color mode
    pub color_mode: ColorMode,
    /// Modulus the expression was wrapped in
    pub modulus: Option<u32>,
    /// Review problem kept as a diagnostic when rejection was disabled
    pub problem: Option<Problem>,
    /// Attempts used to reach this result
    pub attempts: usize,
}

/// Record of a run that never produced an acceptable image
#[derive(Clone, Debug)]
pub struct Exhaustion {
    /// Attempts made
    pub attempts: usize,
    /// Problem of the final attempt
    pub last_problem: Option<Problem>,
    /// Expression of the final attempt
    pub last_expression: Option<Expression>,
}

impl fmt::Display for Exhaustion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.last_problem {
            Some(problem) => write!(f, "{problem}"),
            None => write!(f, "no attempt was made"),
        }
    }
}

impl From<Exhaustion> for BitartError {
    fn from(exhaustion: Exhaustion) -> Self {
        Self::NoInterestingPattern {
            attempts: exhaustion.attempts,
            reason: exhaustion.to_string(),
        }
    }
}

/// Result of a run
#[derive(Clone, Debug)]
pub enum Outcome {
    /// An attempt passed review, or rejection was disabled
    Accepted(Artwork),
    /// Every attempt had a problem
    Exhausted(Exhaustion),
}

impl Outcome {
    /// Unwrap the accepted artwork
    ///
    /// # Errors
    ///
    /// Returns `NoInterestingPattern` carrying the last problem when the run was exhausted
    pub fn into_artwork(self) -> Result<Artwork> {
        match self {
            Self::Accepted(artwork) => Ok(artwork),
            Self::Exhausted(exhaustion) => Err(exhaustion.into()),
        }
    }

    /// Check whether the run produced artwork
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Drives repeated generate, evaluate and review cycles
pub struct Orchestrator<R: Rng = StdRng> {
    config: RunConfig,
    generator: ExpressionGenerator,
    rng: R,
    state: RunState,
}

impl Orchestrator<StdRng> {
    /// Create an orchestrator with a seeded standard generator
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when the configuration fails validation
    pub fn new(config: RunConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Orchestrator<R> {
    /// Create an orchestrator around any random source
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when the configuration fails validation
    pub fn with_rng(config: RunConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            generator: ExpressionGenerator::new(config.generation)?,
            config,
            rng,
            state: RunState::Idle,
        })
    }

    /// Current state
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Generate one expression and judge it, without touching the state
    pub fn attempt(&mut self) -> Attempt {
        let range = self.config.modulus_min..=self.config.modulus_max;
        let modulus = choose_modulus(&mut self.rng, self.config.modulus_probability, &range);
        let expression = self.generator.generate_with_modulus(&mut self.rng, modulus);
        self.judge(expression, modulus)
    }

    /// Run until acceptance or exhaustion
    pub fn run(&mut self) -> Outcome {
        self.run_with(|_, _| {})
    }

    /// Run, reporting every finished attempt with its number to `observer`
    pub fn run_with(&mut self, mut observer: impl FnMut(usize, &Attempt)) -> Outcome {
        let mut last: Option<Attempt> = None;

        for number in 1..=self.config.attempts {
            self.state = RunState::Attempting { attempt: number };
            let attempt = self.attempt();
            observer(number, &attempt);

            match attempt.problem {
                Some(problem) if self.config.reject_bad => {
                    debug!(
                        attempt = number,
                        expression = %attempt.expression,
                        %problem,
                        "Rejected attempt"
                    );
                    last = Some(attempt);
                }
                problem => {
                    if let Some(problem) = problem {
                        debug!(%problem, "Keeping attempt despite problem");
                    }
                    let color_mode =
                        choose_color_mode(self.config.color_override, attempt.modulus);
                    info!(
                        attempt = number,
                        expression = %attempt.expression,
                        %color_mode,
                        "Accepted attempt"
                    );
                    self.state = RunState::Accepted;
                    return Outcome::Accepted(attempt.into_artwork(color_mode, number));
                }
            }
        }

        self.state = RunState::Exhausted;
        let exhaustion = Exhaustion {
            attempts: self.config.attempts,
            last_problem: last.as_ref().and_then(|attempt| attempt.problem),
            last_expression: last.map(|attempt| attempt.expression),
        };
        warn!(
            attempts = exhaustion.attempts,
            reason = %exhaustion,
            "No acceptable image found"
        );
        Outcome::Exhausted(exhaustion)
    }

    /// Evaluate a caller-supplied expression once
    ///
    /// Review still runs, but its verdict is only kept as a diagnostic.
    /// The color mode is inferred from the value spread.
    pub fn render_custom(&mut self, expression: Expression) -> Artwork {
        self.state = RunState::Attempting { attempt: 1 };
        let attempt = self.judge(expression, None);
        if let Some(problem) = attempt.problem {
            debug!(%problem, "Custom expression has a review problem");
        }
        let color_mode = infer_color_mode(self.config.color_override, &attempt.analysis);
        self.state = RunState::Accepted;
        attempt.into_artwork(color_mode, 1)
    }

    fn judge(&self, expression: Expression, modulus: Option<u32>) -> Attempt {
        let grid = Grid::evaluated(self.config.width, self.config.height, &expression);
        let analysis = grid.analysis();
        let problem = review(&grid, &analysis, &self.config.thresholds);
        Attempt {
            expression,
            modulus,
            grid,
            analysis,
            problem,
        }
    }
}
