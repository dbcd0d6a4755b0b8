//! Core engine implementation

use crate::{
    application::Application,
    config::{Config, ConfigError},
    foundation::time::Timer,
    scene::{FrameReport, SceneConfig, SceneManager, Space},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Main engine struct
///
/// The engine owns the scene manager and the frame timer, and drives the
/// application through the main loop.
#[derive(Debug)]
pub struct Engine<S: Space> {
    /// Actors and scenes
    pub scenes: SceneManager<S>,

    /// Frame timing
    timer: Timer,

    /// Engine configuration
    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,

    /// Counters from the most recent scene update
    last_report: Option<FrameReport>,
}

impl<S: Space> Engine<S> {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Self {
        log::info!("Initializing engine...");
        let timer = match config.fixed_delta_time {
            Some(step) => Timer::fixed(step),
            None => Timer::new(),
        };

        Self {
            scenes: SceneManager::new(),
            timer,
            config,
            running: true,
            last_report: None,
        }
    }

    /// Create an engine from a TOML or RON configuration file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let config = EngineConfig::load_from_file(path)?;
        log::info!("Loaded engine config from {}", path.display());
        Ok(Self::new(config))
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application<S>>(config: EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config);

        app.initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");
        let result = engine.run_loop(app);

        engine.scenes.end();
        app.cleanup(&mut engine);

        log::info!(
            "Engine shutdown complete after {} frames ({:.1} fps average)",
            engine.timer.frame_count(),
            engine.timer.average_fps()
        );
        result
    }

    fn run_loop<T: Application<S>>(&mut self, app: &mut T) -> Result<(), EngineError> {
        while self.step(app)? {}
        Ok(())
    }

    /// Run one iteration: tick the timer, update the application, update the
    /// current scene, render.
    ///
    /// Returns whether the loop should continue.
    pub fn step<T: Application<S>>(&mut self, app: &mut T) -> Result<bool, EngineError> {
        if !self.is_running() {
            return Ok(false);
        }
        let delta_time = self.timer.tick();

        app.update(self, delta_time)
            .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;

        self.last_report = self.scenes.update(delta_time);

        app.render(self)
            .map_err(|e| EngineError::ApplicationError(format!("App render: {}", e)))?;

        if self.config.max_frames.is_some_and(|max| self.timer.frame_count() >= max) {
            log::info!("Frame limit reached");
            self.running = false;
        }
        Ok(self.is_running())
    }

    /// Whether neither [`quit`](Self::quit) nor a behavior stop request has
    /// ended the loop
    pub fn is_running(&self) -> bool {
        self.running && !self.scenes.stop_requested()
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.timer.delta_time()
    }

    /// Number of frames run so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }

    /// Counters from the most recent scene update
    pub fn last_report(&self) -> Option<FrameReport> {
        self.last_report
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Report this many seconds per frame instead of wall-clock time
    pub fixed_delta_time: Option<f32>,

    /// Stop after this many frames
    pub max_frames: Option<u64>,

    /// Settings for scenes created from this configuration
    pub scene: SceneConfig,
}

impl Config for EngineConfig {}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
