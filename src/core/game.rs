//! Game module - the command/tick state machine
//!
//! The game is the sole arbiter of legality for piece state changes. It
//! owns the settled grid, the current and next pieces, the line counter and
//! the game-over flag, and drives `Piece` through tentative mutations that
//! it reverts when the grid rejects them.
//!
//! Processing is single-threaded and command-driven: one command or tick
//! runs to completion before the next is accepted. A reentrancy flag drops
//! any command or tick that arrives while a tick is mid-mutation, modelling
//! a real-time input source that must never corrupt the grid.

use anyhow::{ensure, Result};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::core::{Grid, Piece, SimpleRng};
use crate::events::Events;
use crate::types::{Command, PieceKind};

#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    current: Piece,
    next: Piece,
    rng: SimpleRng,
    total_lines_cleared: u32,
    game_over: bool,
    /// Reentrancy guard: true while a tick is mutating the grid
    ticking: bool,
    events: Events,
}

impl Game {
    /// Create a game over an empty grid. Degenerate configurations are
    /// rejected; illegal play never is.
    pub fn new(config: GameConfig, seed: u32) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        Ok(Self::from_parts(config, seed, grid))
    }

    /// Create a game over a pre-seeded grid (puzzle setups, tests)
    pub fn with_grid(config: GameConfig, seed: u32, grid: Grid) -> Result<Self> {
        config.validate()?;
        ensure!(
            grid.width() == config.width && grid.height() == config.height,
            "grid is {}x{} but config wants {}x{}",
            grid.width(),
            grid.height(),
            config.width,
            config.height
        );
        Ok(Self::from_parts(config, seed, grid))
    }

    fn from_parts(config: GameConfig, seed: u32, grid: Grid) -> Self {
        let mut rng = SimpleRng::new(seed);
        let current = Self::spawn_piece(&config, &mut rng);
        let next = Self::spawn_piece(&config, &mut rng);

        Self {
            config,
            grid,
            current,
            next,
            rng,
            total_lines_cleared: 0,
            game_over: false,
            ticking: false,
            events: Events::default(),
        }
    }

    /// Draw a kind uniformly from the game-lifetime RNG and place it at the
    /// spawn position
    fn spawn_piece(config: &GameConfig, rng: &mut SimpleRng) -> Piece {
        let kind = PieceKind::from_index(rng.next_range(7));
        Piece::new(kind, config.spawn_x as i8, 0)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Deep copy of the settled grid
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn total_lines_cleared(&self) -> u32 {
        self.total_lines_cleared
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Subscribe to the game-over notification
    pub fn on_game_over(&mut self, handler: impl FnMut() + 'static) {
        self.events.on_game_over(handler);
    }

    /// Subscribe to the pre-compaction grid snapshot notification
    pub fn on_lines_about_to_clear(&mut self, handler: impl FnMut(&Grid) + 'static) {
        self.events.on_lines_about_to_clear(handler);
    }

    /// Subscribe to the cleared-row-indices notification
    pub fn on_lines_cleared(&mut self, handler: impl FnMut(&[usize]) + 'static) {
        self.events.on_lines_cleared(handler);
    }

    /// Apply one player command.
    ///
    /// Illegal moves are rejected silently: an out-of-bounds or colliding
    /// translation is reverted and nothing is reported. Commands arriving
    /// while a tick is in flight, or after game over, are dropped.
    pub fn apply(&mut self, command: Command) {
        if self.ticking || self.game_over {
            return;
        }

        match command {
            Command::SoftDrop => self.tick(),
            Command::MoveLeft => {
                if self.current.x > 0 {
                    self.current.x -= 1;
                    if self.grid.collides(&self.current) {
                        self.current.x += 1;
                    }
                }
            }
            Command::MoveRight => {
                if self.current.rightmost_x() < self.grid.width() as i8 {
                    self.current.x += 1;
                    if self.grid.collides(&self.current) {
                        self.current.x -= 1;
                    }
                }
            }
            Command::RotateCw => {
                self.current.rotate_cw();
                self.correct_position_after_rotation();
            }
            Command::RotateCcw => {
                self.current.rotate_ccw();
                self.correct_position_after_rotation();
            }
        }
    }

    /// Pull a rotated piece back inside the right wall and above the floor.
    ///
    /// Left and top underflow cannot happen with an origin-zero bounding
    /// box. Post-rotation overlap with settled cells is not re-checked here;
    /// an overlapping piece simply lands on the next tick. Recorded as an
    /// open question in DESIGN.md.
    fn correct_position_after_rotation(&mut self) {
        let overflow = self.current.rightmost_x() - self.grid.width() as i8;
        if overflow > 0 {
            self.current.x -= overflow;
        }
        let overflow = self.current.bottommost_y() - self.grid.height() as i8;
        if overflow > 0 {
            self.current.y -= overflow;
        }
    }

    /// One gravity step: advance the current piece a row, or land it.
    ///
    /// On landing the piece is deactivated and merged, full rows are swept,
    /// the queued piece is promoted and a fresh one spawned. If the newly
    /// promoted piece collides at its spawn position the game is over.
    pub fn tick(&mut self) {
        if self.ticking || self.game_over {
            return;
        }
        self.ticking = true;

        self.current.y += 1;
        if self.grid.collides(&self.current) {
            self.current.y -= 1;
            self.current.deactivate();
            self.grid.merge(&self.current);
            self.sweep_lines();

            let fresh = Self::spawn_piece(&self.config, &mut self.rng);
            self.current = std::mem::replace(&mut self.next, fresh);
            debug!(kind = ?self.current.kind, "promoted next piece");

            if self.grid.collides(&self.current) {
                self.game_over = true;
                info!(
                    lines = self.total_lines_cleared,
                    "spawned piece blocked, game over"
                );
                self.events.emit_game_over();
            }
        }

        self.ticking = false;
    }

    /// Snapshot, sweep, and notify subscribers if anything cleared
    fn sweep_lines(&mut self) {
        let before = self.grid.clone();
        let cleared = self.grid.sweep_full_rows();
        if cleared.is_empty() {
            return;
        }

        self.total_lines_cleared += cleared.len() as u32;
        info!(
            rows = ?cleared,
            total = self.total_lines_cleared,
            "lines cleared"
        );
        self.events.emit_lines_about_to_clear(&before);
        self.events.emit_lines_cleared(&cleared);
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, piece: Piece) {
        self.current = piece;
    }

    #[cfg(test)]
    pub(crate) fn set_ticking(&mut self, ticking: bool) {
        self.ticking = ticking;
    }
}
