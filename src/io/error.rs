//! Error types for expression construction, evaluation grids and output

use std::fmt;
use std::path::PathBuf;

/// Main error type for all bitart operations
#[derive(Debug)]
pub enum BitartError {
    /// Operator symbol is not part of the supported operator set
    UnknownOperator {
        /// The rejected symbol
        symbol: String,
        /// Number of operands the symbol was applied to
        arity: usize,
    },

    /// Operator applied to the wrong number of operands
    WrongArity {
        /// Operator symbol
        symbol: String,
        /// Number of operands supplied
        found: usize,
    },

    /// Leaf token is neither an integer nor a variable name
    UnwrappableLeaf {
        /// The token that could not be wrapped
        token: String,
    },

    /// Variable name outside of `x` and `y`
    UnknownVariable {
        /// The rejected name
        name: String,
    },

    /// Equation text could not be parsed
    Parse {
        /// Byte offset in the equation text
        position: usize,
        /// Description of what went wrong
        reason: String,
    },

    /// Grid access outside of `[0, width) x [0, height)`
    OutOfBounds {
        /// Requested column
        x: usize,
        /// Requested row
        y: usize,
        /// Grid width
        width: usize,
        /// Grid height
        height: usize,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Attempt budget ran out without an acceptable image
    NoInterestingPattern {
        /// Number of attempts made
        attempts: usize,
        /// Review outcome of the final attempt
        reason: String,
    },

    /// Failed to save rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Metadata could not be serialized
    Metadata {
        /// Underlying YAML error
        source: serde_yaml::Error,
    },

    /// Post-render command failed to launch or exited unsuccessfully
    Command {
        /// Command line that was run
        command: String,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for BitartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOperator { symbol, arity } => {
                write!(f, "Unknown operator '{symbol}' for {arity} operand(s)")
            }
            Self::WrongArity { symbol, found } => {
                write!(f, "Operator '{symbol}' cannot take {found} operand(s)")
            }
            Self::UnwrappableLeaf { token } => {
                write!(f, "Unwrappable leaf '{token}'")
            }
            Self::UnknownVariable { name } => {
                write!(f, "Unknown variable '{name}': only 'x' and 'y' are allowed")
            }
            Self::Parse { position, reason } => {
                write!(f, "Parse error at offset {position}: {reason}")
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Position ({x}, {y}) is out of bounds for a {width}x{height} grid"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::NoInterestingPattern { attempts, reason } => {
                write!(
                    f,
                    "Failed to generate interesting pattern after {attempts} attempts: {reason}"
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Metadata { source } => {
                write!(f, "Failed to serialize metadata: {source}")
            }
            Self::Command { command, reason } => {
                write!(f, "Command '{command}' failed: {reason}")
            }
        }
    }
}

impl std::error::Error for BitartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Metadata { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for bitart results
pub type Result<T> = std::result::Result<T, BitartError>;

impl From<std::io::Error> for BitartError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for BitartError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Metadata { source: err }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> BitartError {
    BitartError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a parse error at the given byte offset
pub fn parse_error(position: usize, reason: &impl ToString) -> BitartError {
    BitartError::Parse {
        position,
        reason: reason.to_string(),
    }
}
