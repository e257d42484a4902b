//! Random expression trees under a probabilistic grammar
//!
//! Every inner node passes a variable requirement down to at least one of
//! its children, so any tree of depth one or more reads `x` or `y`.

use crate::expression::{BinaryOp, Expression, UnaryOp, Variable};
use crate::io::configuration::{
    DEFAULT_DEPTH, DEFAULT_LITERAL_RATE, DEFAULT_MAX_LITERAL, DEFAULT_UNARY_RATE,
};
use crate::io::error::{Result, invalid_parameter};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Shape parameters for generated trees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationConfig {
    /// Height of the tree; leaves sit at depth zero
    pub depth: usize,
    /// Probability that an inner node is unary rather than binary
    pub unary_rate: f64,
    /// Probability that an unconstrained leaf is a literal rather than a variable
    pub literal_rate: f64,
    /// Largest literal value, literals are drawn from `1..=max_literal`
    pub max_literal: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            unary_rate: DEFAULT_UNARY_RATE,
            literal_rate: DEFAULT_LITERAL_RATE,
            max_literal: DEFAULT_MAX_LITERAL,
        }
    }
}

impl GenerationConfig {
    /// Set the tree depth
    #[must_use]
    pub const fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Set the unary branching probability
    #[must_use]
    pub const fn with_unary_rate(mut self, unary_rate: f64) -> Self {
        self.unary_rate = unary_rate;
        self
    }

    /// Set the literal leaf probability
    #[must_use]
    pub const fn with_literal_rate(mut self, literal_rate: f64) -> Self {
        self.literal_rate = literal_rate;
        self
    }

    /// Check that rates are probabilities and literals have a non-empty range
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first offending field
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.unary_rate) {
            return Err(invalid_parameter(
                "unary_rate",
                &self.unary_rate,
                &"must be within [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.literal_rate) {
            return Err(invalid_parameter(
                "literal_rate",
                &self.literal_rate,
                &"must be within [0, 1]",
            ));
        }
        if self.max_literal == 0 {
            return Err(invalid_parameter(
                "max_literal",
                &self.max_literal,
                &"must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Builds random expression trees from a validated configuration
#[derive(Clone, Copy, Debug)]
pub struct ExpressionGenerator {
    config: GenerationConfig,
}

impl ExpressionGenerator {
    /// Create a generator
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when the configuration fails validation
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generate a tree of the configured depth
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Expression {
        self.make(self.config.depth, false, rng)
    }

    /// Generate a tree and wrap it in `% modulus` when one is given
    pub fn generate_with_modulus<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        modulus: Option<u32>,
    ) -> Expression {
        let tree = self.generate(rng);
        match modulus {
            Some(modulus) => Expression::binary(
                BinaryOp::Modulo,
                tree,
                Expression::literal(i64::from(modulus)),
            ),
            None => tree,
        }
    }

    fn make<R: Rng + ?Sized>(&self, depth: usize, force_variable: bool, rng: &mut R) -> Expression {
        if depth == 0 {
            return self.make_leaf(force_variable, rng);
        }

        if rng.random::<f64>() < self.config.unary_rate {
            self.make_unary(depth, rng)
        } else {
            self.make_binary(depth, rng)
        }
    }

    fn make_leaf<R: Rng + ?Sized>(&self, force_variable: bool, rng: &mut R) -> Expression {
        if !force_variable && rng.random::<f64>() < self.config.literal_rate {
            let magnitude = rng.random_range(1..=self.config.max_literal);
            return Expression::literal(i64::from(magnitude));
        }

        let variable = Variable::ALL.choose(rng).copied().unwrap_or(Variable::X);
        Expression::lookup(variable)
    }

    fn make_unary<R: Rng + ?Sized>(&self, depth: usize, rng: &mut R) -> Expression {
        let op = UnaryOp::ALL.choose(rng).copied().unwrap_or(UnaryOp::Negate);
        let operand = self.make(depth - 1, true, rng);
        Expression::unary(op, operand)
    }

    fn make_binary<R: Rng + ?Sized>(&self, depth: usize, rng: &mut R) -> Expression {
        let op = BinaryOp::ALL.choose(rng).copied().unwrap_or(BinaryOp::Add);
        let forced = self.make(depth - 1, true, rng);
        let free = self.make(depth - 1, false, rng);

        if rng.random_bool(0.5) {
            Expression::binary(op, free, forced)
        } else {
            Expression::binary(op, forced, free)
        }
    }
}
