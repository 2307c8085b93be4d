use std::fmt;

use thiserror::Error;

/// Shape of a statement's result: a row set or an update count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    RowSet,
    UpdateCount,
}

impl fmt::Display for ResultShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultShape::RowSet => f.write_str("a row set"),
            ResultShape::UpdateCount => f.write_str("an update count"),
        }
    }
}

/// Errors that can be raised from this library.
///
/// Nothing here is retried or repaired locally; every variant is a terminal
/// signal to the immediate caller. Query resubmission after transient cluster
/// errors is the execution service's concern.
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Cursor is already closed")]
    ClosedCursor,

    #[error("Statement is already closed")]
    ClosedStatement,

    #[error("Result set does not contain column \"{0}\"")]
    ColumnNotFound(String),

    #[error("Result set does not contain column with index {0}")]
    ColumnIndexOutOfBounds(usize),

    #[error("Cannot convert {value} to {target}")]
    Conversion {
        /// Display form of the original value.
        value: String,
        /// Name of the requested target representation.
        target: &'static str,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Statement produced {actual}, but {expected} was expected")]
    ShapeMismatch {
        expected: ResultShape,
        actual: ResultShape,
    },

    #[error("Operation is not supported: {0}")]
    Unsupported(&'static str),

    /// Failure inside the execution service or its row stream.
    #[error("Execution service error: {0}")]
    Execution(Box<dyn std::error::Error + Send + Sync>),
}

impl DriverError {
    /// Wrap an execution-service failure.
    pub fn execution<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        DriverError::Execution(Box::new(source))
    }
}
