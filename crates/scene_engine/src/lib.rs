//! # Scene Engine
//!
//! A small actor/scene simulation core: hierarchical transforms, per-frame
//! actor updates, radius-based collision response, and a fixed-step or
//! wall-clock main loop.
//!
//! ## Features
//!
//! - **Actors**: translation/rotation/scale transforms with parent/child links
//! - **Scenes**: ordered actor lists with a world transform; actors may be
//!   shared between scenes
//! - **Behaviors**: override start, update, collision, and end hooks per actor
//! - **2D and 3D**: the same code runs on [`Planar`](scene::Planar) (3x3
//!   matrices) and [`Spatial`](scene::Spatial) (4x4 matrices)
//! - **Config**: engine settings load from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application<Planar> for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine<Planar>) -> Result<(), AppError> {
//!         let id = engine.scenes.spawn(Actor::new(Vec2::zeros()).with_velocity(Vec2::new(1.0, 0.0)));
//!         let mut scene = Scene::new();
//!         scene.add_actor(id);
//!         engine.scenes.add_scene(scene);
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine<Planar>, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine<Planar>) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig { max_frames: Some(60), ..EngineConfig::default() };
//!     let mut app = MyApp;
//!     Engine::run(config, &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod scene;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineConfig, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::{
            collections::ActorId,
            math::{Mat3, Mat3Ext, Mat4, Mat4Ext, Vec2, Vec3, VectorExt},
            time::Timer,
        },
        scene::{
            Actor, ActorContext, ActorRegistry, ActorView, Appearance, Behavior, Color, FrameControl,
            FrameReport, Planar, Renderer, Scene, SceneCommand, SceneConfig, SceneError, SceneManager,
            Space, Spatial, SweepMode, UpdateOrder,
        },
        AppError, Application, Engine, EngineConfig, EngineError,
    };
}
