//! Unary and binary operator sets

use crate::expression::Value;
use crate::math::arithmetic::{safe_div, safe_mod};
use std::fmt;

/// Operators taking a single operand
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Arithmetic negation
    Negate,
    /// Two's complement bitwise not
    BitNot,
}

impl UnaryOp {
    /// Every unary operator, in generator selection order
    pub const ALL: [Self; 2] = [Self::Negate, Self::BitNot];

    /// Internal symbol; negation carries an `@` marker to tell it apart from subtraction
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-@",
            Self::BitNot => "~",
        }
    }

    /// Symbol as written in canonical text
    pub const fn display_symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::BitNot => "~",
        }
    }

    /// Look up an operator by its internal symbol
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Apply the operator
    pub fn apply(self, operand: &Value) -> Value {
        match self {
            Self::Negate => -operand,
            Self::BitNot => !operand,
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_symbol())
    }
}

/// Operators taking two operands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Addition
    Add,
    /// Subtraction
    Subtract,
    /// Multiplication
    Multiply,
    /// Total floor division
    Divide,
    /// Total floor remainder
    Modulo,
    /// Bitwise and
    BitAnd,
    /// Bitwise or
    BitOr,
    /// Bitwise exclusive or
    BitXor,
}

impl BinaryOp {
    /// Every binary operator, in generator selection order
    pub const ALL: [Self; 8] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::BitAnd,
        Self::BitOr,
        Self::BitXor,
        Self::Divide,
        Self::Modulo,
    ];

    /// Symbol used both internally and in canonical text
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
        }
    }

    /// Look up an operator by its symbol
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Apply the operator; division and remainder by zero are defined
    pub fn apply(self, lhs: &Value, rhs: &Value) -> Value {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => safe_div(lhs, rhs),
            Self::Modulo => safe_mod(lhs, rhs),
            Self::BitAnd => lhs & rhs,
            Self::BitOr => lhs | rhs,
            Self::BitXor => lhs ^ rhs,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
