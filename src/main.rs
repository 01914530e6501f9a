//! Headless demo runner (default binary).
//!
//! Drives a seeded game with random commands until game over, printing the
//! line-clear and game-over events. Tick scheduling lives here, outside the
//! core, as it would in a real frontend.

use std::thread;
use std::time::Duration;

use anyhow::Result;

use blockfall::core::SimpleRng;
use blockfall::{Command, Game, GameConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let seed = std::process::id();
    let config = GameConfig {
        // Run flat out; set a real interval to watch the log unfold
        tick_ms: 0,
        ..GameConfig::default()
    };
    let mut game = Game::new(config, seed)?;

    game.on_lines_about_to_clear(|grid| {
        println!("clearing with {} settled cells", grid.filled_count());
    });
    game.on_lines_cleared(|rows| println!("cleared rows {:?}", rows));
    game.on_game_over(|| println!("game over"));

    let mut driver = SimpleRng::new(seed ^ 0x9e37_79b9);
    let mut ticks: u64 = 0;

    while !game.is_game_over() {
        match driver.next_range(5) {
            0 => game.apply(Command::MoveLeft),
            1 => game.apply(Command::MoveRight),
            2 => game.apply(Command::RotateCw),
            3 => game.apply(Command::RotateCcw),
            _ => {}
        }
        game.tick();
        ticks += 1;

        if config.tick_ms > 0 {
            thread::sleep(Duration::from_millis(config.tick_ms as u64));
        }
    }

    println!(
        "seed {}: survived {} ticks, cleared {} lines",
        seed,
        ticks,
        game.total_lines_cleared()
    );
    Ok(())
}
