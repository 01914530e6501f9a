//! Core module - pure game rules with no I/O
//!
//! Contains the grid, the piece geometry, the seeded piece source and the
//! command/tick state machine. It has zero dependencies on UI, timers or
//! networking; the caller schedules ticks and renders snapshots.

pub mod game;
pub mod grid;
pub mod piece;
pub mod rng;

// Re-export commonly used types
pub use game::Game;
pub use grid::Grid;
pub use piece::{canonical_shape, Piece, ShapeMatrix};
pub use rng::SimpleRng;
