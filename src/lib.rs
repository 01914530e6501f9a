//! blockfall - rules engine for a falling-block puzzle game
//!
//! Covers piece spawning, movement and rotation validation, collision
//! against the settled grid, line-clear detection and compaction, and
//! game-over detection. Rendering, input polling and tick scheduling are
//! external collaborators: the caller feeds [`Command`]s and tick calls in,
//! and observes grid snapshots and the three game events.

pub mod config;
pub mod core;
pub mod events;
pub mod types;

pub use config::GameConfig;
pub use core::{Game, Grid, Piece};
pub use events::Events;
pub use types::{Cell, Command, PieceKind};
