//! Synchronous observer registry
//!
//! Subscribers are boxed closures held per notification type and invoked in
//! registration order, before the emitting call returns. The line-clear
//! snapshot payload is a deep copy taken before compaction, never a live
//! reference into the game.

use std::fmt;

use crate::core::Grid;

type GameOverHandler = Box<dyn FnMut()>;
type LinesAboutToClearHandler = Box<dyn FnMut(&Grid)>;
type LinesClearedHandler = Box<dyn FnMut(&[usize])>;

#[derive(Default)]
pub struct Events {
    game_over: Vec<GameOverHandler>,
    lines_about_to_clear: Vec<LinesAboutToClearHandler>,
    lines_cleared: Vec<LinesClearedHandler>,
}

impl Events {
    /// Subscribe to the game-over notification
    pub fn on_game_over(&mut self, handler: impl FnMut() + 'static) {
        self.game_over.push(Box::new(handler));
    }

    /// Subscribe to the pre-compaction grid snapshot notification
    pub fn on_lines_about_to_clear(&mut self, handler: impl FnMut(&Grid) + 'static) {
        self.lines_about_to_clear.push(Box::new(handler));
    }

    /// Subscribe to the cleared-row-indices notification
    pub fn on_lines_cleared(&mut self, handler: impl FnMut(&[usize]) + 'static) {
        self.lines_cleared.push(Box::new(handler));
    }

    pub(crate) fn emit_game_over(&mut self) {
        for handler in &mut self.game_over {
            handler();
        }
    }

    pub(crate) fn emit_lines_about_to_clear(&mut self, snapshot: &Grid) {
        for handler in &mut self.lines_about_to_clear {
            handler(snapshot);
        }
    }

    pub(crate) fn emit_lines_cleared(&mut self, rows: &[usize]) {
        for handler in &mut self.lines_cleared {
            handler(rows);
        }
    }
}

impl fmt::Debug for Events {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Events")
            .field("game_over", &self.game_over.len())
            .field("lines_about_to_clear", &self.lines_about_to_clear.len())
            .field("lines_cleared", &self.lines_cleared.len())
            .finish()
    }
}
