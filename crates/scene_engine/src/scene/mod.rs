//! Scene system
//!
//! Actors, their hierarchy, and the scenes that update them.
//!
//! ## Architecture
//!
//! ```text
//! SceneManager
//!   ├── ActorRegistry   (owns every Actor, addressed by ActorId)
//!   ├── Scene[]         (ordered ActorId lists + world transform)
//!   └── FrameControl    (stop flag + deferred SceneCommands)
//! ```
//!
//! Each frame the current scene updates its actors, sweeps them for
//! overlaps, then applies whatever structural changes behaviors queued.
//! Everything is generic over [`Space`], so the same code drives 2D
//! ([`Planar`]) and 3D ([`Spatial`]) scenes.

mod actor;
mod behavior;
pub mod collision;
mod error;
mod frame;
mod registry;
#[allow(clippy::module_inception)]
mod scene;
mod scene_manager;
mod space;
mod transform;
mod view;

#[cfg(test)]
mod tests;

pub use actor::{Actor, ActorState, Appearance, Color, DEFAULT_COLLISION_RADIUS};
pub use behavior::{ActorContext, Behavior};
pub use collision::SweepMode;
pub use error::{SceneError, SceneResult};
pub use frame::{FrameControl, FrameReport, SceneCommand};
pub use registry::ActorRegistry;
pub use scene::{Scene, SceneConfig, UpdateOrder};
pub use scene_manager::SceneManager;
pub use space::{Planar, Space, Spatial};
pub use transform::TransformNode;
pub use view::{ActorView, RecordingRenderer, Renderer};
