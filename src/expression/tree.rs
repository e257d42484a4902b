//! Expression trees over the two grid coordinates

use crate::expression::{BinaryOp, UnaryOp, Value};
use crate::io::error::{BitartError, Result};
use std::fmt;
use std::str::FromStr;

/// Input variable readable by a lookup leaf
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variable {
    /// Column coordinate
    X,
    /// Row coordinate
    Y,
}

impl Variable {
    /// Both variables, in generator selection order
    pub const ALL: [Self; 2] = [Self::X, Self::Y];

    /// Name used in canonical text
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

impl FromStr for Variable {
    type Err = BitartError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            _ => Err(BitartError::UnknownVariable {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Values bound to `x` and `y` for one evaluation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bindings {
    /// Value of `x`
    pub x: Value,
    /// Value of `y`
    pub y: Value,
}

impl Bindings {
    /// Bind both coordinates
    pub const fn new(x: i64, y: i64) -> Self {
        Self {
            x: Value::new(x),
            y: Value::new(y),
        }
    }

    /// Read a bound variable
    pub const fn get(&self, variable: Variable) -> &Value {
        match variable {
            Variable::X => &self.x,
            Variable::Y => &self.y,
        }
    }
}

/// Immutable function of `x` and `y`
///
/// Each node owns its operands, so trees are acyclic by construction and
/// evaluation never mutates them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    /// Integer constant
    Literal(Value),
    /// Reads a bound variable
    Lookup(Variable),
    /// Operator applied to one operand
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand subtree
        operand: Box<Expression>,
    },
    /// Operator applied to two operands
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand subtree
        lhs: Box<Expression>,
        /// Right operand subtree
        rhs: Box<Expression>,
    },
}

impl Expression {
    /// Constant leaf
    pub const fn literal(value: i64) -> Self {
        Self::Literal(Value::new(value))
    }

    /// Variable leaf
    pub const fn lookup(variable: Variable) -> Self {
        Self::Lookup(variable)
    }

    /// Unary node
    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Binary node
    pub fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Convert a leaf token into a literal or lookup
    ///
    /// # Errors
    ///
    /// Returns `UnknownVariable` for identifiers other than `x` and `y`, and
    /// `UnwrappableLeaf` for anything that is neither an integer nor an identifier.
    pub fn wrap(token: &str) -> Result<Self> {
        let token = token.trim();
        if let Ok(value) = token.parse::<Value>() {
            return Ok(Self::Literal(value));
        }

        let is_identifier = token
            .chars()
            .next()
            .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
            && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

        if is_identifier {
            token.parse::<Variable>().map(Self::Lookup)
        } else {
            Err(BitartError::UnwrappableLeaf {
                token: token.to_string(),
            })
        }
    }

    /// Build a node from an operator symbol and its operands
    ///
    /// One operand selects a unary operator (`-@`, `~`), two select a binary one.
    ///
    /// # Errors
    ///
    /// Returns `UnknownOperator` when the symbol has no operator of that arity
    /// and `WrongArity` for any other operand count.
    pub fn apply(symbol: &str, operands: Vec<Self>) -> Result<Self> {
        let found = operands.len();
        let unknown = || BitartError::UnknownOperator {
            symbol: symbol.to_string(),
            arity: found,
        };

        let mut operands = operands.into_iter();
        match (found, operands.next(), operands.next()) {
            (1, Some(operand), _) => UnaryOp::from_symbol(symbol)
                .map(|op| Self::unary(op, operand))
                .ok_or_else(unknown),
            (2, Some(lhs), Some(rhs)) => BinaryOp::from_symbol(symbol)
                .map(|op| Self::binary(op, lhs, rhs))
                .ok_or_else(unknown),
            _ => Err(BitartError::WrongArity {
                symbol: symbol.to_string(),
                found,
            }),
        }
    }

    /// Evaluate with both variables bound
    ///
    /// Total for every tree: arithmetic edge cases resolve to defined values.
    /// The right operand of a binary node is evaluated before the left.
    pub fn evaluate(&self, bindings: &Bindings) -> Value {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Lookup(variable) => bindings.get(*variable).clone(),
            Self::Unary { op, operand } => op.apply(&operand.evaluate(bindings)),
            Self::Binary { op, lhs, rhs } => {
                let right = rhs.evaluate(bindings);
                let left = lhs.evaluate(bindings);
                op.apply(&left, &right)
            }
        }
    }

    /// Evaluate at a single coordinate
    pub fn evaluate_at(&self, x: i64, y: i64) -> Value {
        self.evaluate(&Bindings::new(x, y))
    }

    /// Check for a constant leaf
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Check for a variable leaf
    pub const fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }

    /// Check for a unary node
    pub const fn is_unary(&self) -> bool {
        matches!(self, Self::Unary { .. })
    }

    /// Check for a binary node
    pub const fn is_binary(&self) -> bool {
        matches!(self, Self::Binary { .. })
    }

    /// Height of the tree; leaves have depth 0
    pub fn depth(&self) -> usize {
        match self {
            Self::Literal(_) | Self::Lookup(_) => 0,
            Self::Unary { operand, .. } => operand.depth() + 1,
            Self::Binary { lhs, rhs, .. } => lhs.depth().max(rhs.depth()) + 1,
        }
    }

    /// Total number of nodes
    pub fn node_count(&self) -> usize {
        match self {
            Self::Literal(_) | Self::Lookup(_) => 1,
            Self::Unary { operand, .. } => operand.node_count() + 1,
            Self::Binary { lhs, rhs, .. } => lhs.node_count() + rhs.node_count() + 1,
        }
    }

    /// Whether any leaf reads a variable
    pub fn references_variable(&self) -> bool {
        match self {
            Self::Literal(_) => false,
            Self::Lookup(_) => true,
            Self::Unary { operand, .. } => operand.references_variable(),
            Self::Binary { lhs, rhs, .. } => lhs.references_variable() || rhs.references_variable(),
        }
    }

    // Compound operands and negative literals are parenthesized so the text reparses to itself
    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let negative_literal = matches!(self, Self::Literal(value) if value.is_negative());
        if self.is_unary() || self.is_binary() || negative_literal {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl From<Variable> for Expression {
    fn from(variable: Variable) -> Self {
        Self::Lookup(variable)
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

/// Canonical text form, stable enough to serve as a content fingerprint
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Lookup(variable) => write!(f, "{variable}"),
            Self::Unary { op, operand } => {
                write!(f, "{op}")?;
                operand.fmt_operand(f)
            }
            Self::Binary { op, lhs, rhs } => {
                lhs.fmt_operand(f)?;
                write!(f, " {op} ")?;
                rhs.fmt_operand(f)
            }
        }
    }
}
