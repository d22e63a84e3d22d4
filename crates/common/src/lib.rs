//! Alice common types.
//!
//! This crate provides the data structures shared by the interpreter and
//! its tooling:
//!
//! - [`Vector2D`] — integer grid coordinates and displacements
//! - [`Direction`] — the eight compass directions and their rotation algebra
//! - [`Mirror`] — the four terrain glyphs `/ \ _ |`
//! - [`Grid`] — the self-modifying program grid with growth and shrink
//! - [`Value`] — a stack slot: arbitrary-precision integer or text
//!
//! Nothing in here performs I/O.

pub mod direction;
pub mod grid;
pub mod value;
pub mod vector;

// Re-export commonly used types at the crate root.
pub use direction::{Direction, Mirror, ALL_DIRECTIONS, ALL_MIRRORS};
pub use grid::{Grid, OUT_OF_BOUNDS};
pub use value::{decimal_runs, Value};
pub use vector::Vector2D;
