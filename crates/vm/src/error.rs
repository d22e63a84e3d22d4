//! Runtime errors for the Alice VM.
//!
//! Most edge cases in the command set are recoverable by definition (empty
//! pops yield defaults, non-numeric text coerces to 0). The variants here
//! are the conditions that stop a run. Position-carrying variants record
//! the IP (`at`) of the command that failed.

use alice_common::Vector2D;
use thiserror::Error;

/// Errors that abort program execution.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A cell was classified as a command but has no entry in the mode's
    /// opcode table. This is an internal consistency failure.
    #[error("cell {cell} at {at} is not a command in {mode} mode")]
    UnknownCommand { at: Vector2D, cell: i64, mode: &'static str },

    /// Integer division, modulo, or a negative power of zero.
    #[error("division by zero at {at}")]
    DivisionByZero { at: Vector2D },

    /// Output of an integer that is not a Unicode scalar value.
    #[error("{value} is not a valid Unicode scalar value (output at {at})")]
    InvalidCodePoint { at: Vector2D, value: String },

    /// A coordinate popped from the stack does not fit the grid's address space.
    #[error("coordinate {value} out of range at {at}")]
    CoordinateOutOfRange { at: Vector2D, value: String },

    /// A value written to the grid does not fit in a cell.
    #[error("cell value {value} out of range at {at}")]
    CellOutOfRange { at: Vector2D, value: String },

    /// Exponent too large to evaluate.
    #[error("exponent {value} too large at {at}")]
    ExponentTooLarge { at: Vector2D, value: String },

    /// The IP is trapped in a loop of terrain and non-command cells.
    #[error("no command reachable from {at} after {steps} steps")]
    NoReachableCommand { at: Vector2D, steps: u64 },

    /// The host input or output stream failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
