//! Application trait and lifecycle management

use crate::engine::{Engine, EngineError};
use crate::scene::{SceneError, Space};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to create your game using the engine.
pub trait Application<S: Space> {
    /// Initialize the application
    ///
    /// Called once before the main loop. Use this to spawn actors and build
    /// the scenes.
    fn initialize(&mut self, engine: &mut Engine<S>) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame before the current scene updates. Input handling
    /// belongs here.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, engine: &mut Engine<S>, delta_time: f32) -> Result<(), AppError>;

    /// Render the application
    ///
    /// Called after the scene update. Draw through
    /// [`SceneManager::draw`](crate::scene::SceneManager::draw).
    fn render(&mut self, _engine: &mut Engine<S>) -> Result<(), AppError> {
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called once after the loop exits and the current scene has ended.
    fn cleanup(&mut self, engine: &mut Engine<S>);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Scene operation failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Game logic error
    #[error("Game logic error: {0}")]
    GameLogic(String),
}
