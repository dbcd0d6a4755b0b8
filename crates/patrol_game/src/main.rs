//! Patrol game
//!
//! Steer the player to the spinning goal while the goal's three enemies walk
//! their patrol routes. Runs headless: input comes from a script or a seeded
//! random walk, and frames are written to the log.
//!
//! Usage: `patrol_game [config.toml|config.ron]`

mod actors;
mod config;
mod game;
mod input;
mod renderer;

use config::GameConfig;
use game::PatrolGame;
use scene_engine::config::Config;
use scene_engine::foundation::logging;
use scene_engine::Engine;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_filter("info");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {}", path);
            GameConfig::load_from_file(&path)?
        }
        None => GameConfig::default(),
    };

    let mut game = PatrolGame::new(&config);
    Engine::run(config.engine.clone(), &mut game)?;
    Ok(())
}
