//! Expression model: values, operators, trees and equation parsing
//!
//! This module contains:
//! - Exact integer values with a machine-word fast path
//! - The unary and binary operator sets
//! - Immutable expression trees and their evaluation rule
//! - A parser for the canonical text form

/// Unary and binary operators
pub mod operator;
/// Equation text parsing
pub mod parser;
/// Expression trees and evaluation
pub mod tree;
/// Arbitrary precision values
pub mod value;

pub use operator::{BinaryOp, UnaryOp};
pub use parser::parse_equation;
pub use tree::{Bindings, Expression, Variable};
pub use value::Value;
