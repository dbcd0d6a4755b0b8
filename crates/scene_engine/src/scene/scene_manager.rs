//! Scene management
//!
//! The [`SceneManager`] owns the actor registry, the list of scenes, the index
//! of the current scene, and the frame control surface that behaviors use to
//! request a stop or queue structural changes.

use super::actor::Actor;
use super::error::{SceneError, SceneResult};
use super::frame::{FrameControl, FrameReport};
use super::registry::ActorRegistry;
use super::scene::Scene;
use super::space::Space;
use super::view::Renderer;
use crate::foundation::collections::ActorId;
use log::{debug, info};

/// Owner of all actors and scenes of a running game
#[derive(Debug)]
pub struct SceneManager<S: Space> {
    actors: ActorRegistry<S>,
    scenes: Vec<Scene<S>>,
    current: usize,
    control: FrameControl,
}

impl<S: Space> Default for SceneManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Space> SceneManager<S> {
    /// Manager with no scenes and no actors
    pub fn new() -> Self {
        Self {
            actors: ActorRegistry::new(),
            scenes: Vec::new(),
            current: 0,
            control: FrameControl::new(),
        }
    }

    /// Actor registry
    pub fn actors(&self) -> &ActorRegistry<S> {
        &self.actors
    }

    /// Mutable actor registry
    pub fn actors_mut(&mut self) -> &mut ActorRegistry<S> {
        &mut self.actors
    }

    /// Store an actor in the registry
    pub fn spawn(&mut self, actor: Actor<S>) -> ActorId {
        self.actors.spawn(actor)
    }

    /// Append a scene and return its index
    pub fn add_scene(&mut self, scene: Scene<S>) -> usize {
        self.scenes.push(scene);
        self.scenes.len() - 1
    }

    /// Remove the scene at `index`, ending it first if it is started.
    ///
    /// The current index keeps pointing at the same scene when possible.
    pub fn remove_scene(&mut self, index: usize) -> SceneResult<Scene<S>> {
        if index >= self.scenes.len() {
            return Err(SceneError::SceneNotFound { index, len: self.scenes.len() });
        }
        let mut scene = self.scenes.remove(index);
        if scene.is_started() {
            scene.end(&mut self.actors);
        }

        if index < self.current || (self.current > 0 && self.current >= self.scenes.len()) {
            self.current -= 1;
        }
        debug!("Removed scene {} ({} remaining)", index, self.scenes.len());
        Ok(scene)
    }

    /// Scene at `index`
    pub fn scene(&self, index: usize) -> Option<&Scene<S>> {
        self.scenes.get(index)
    }

    /// Mutable scene at `index`
    pub fn scene_mut(&mut self, index: usize) -> Option<&mut Scene<S>> {
        self.scenes.get_mut(index)
    }

    /// Number of scenes
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Index of the current scene
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The current scene, if any scene exists
    pub fn current_scene(&self) -> Option<&Scene<S>> {
        self.scenes.get(self.current)
    }

    /// Mutable current scene
    pub fn current_scene_mut(&mut self) -> Option<&mut Scene<S>> {
        self.scenes.get_mut(self.current)
    }

    /// Switch scenes, ending the previous current scene if it was started.
    ///
    /// The new scene starts lazily on the next [`update`](Self::update).
    pub fn set_current_scene(&mut self, index: usize) -> SceneResult<()> {
        if index >= self.scenes.len() {
            return Err(SceneError::SceneNotFound { index, len: self.scenes.len() });
        }
        if let Some(previous) = self.scenes.get_mut(self.current) {
            if previous.is_started() {
                previous.end(&mut self.actors);
            }
        }
        self.current = index;
        info!("Switched to scene {}", index);
        Ok(())
    }

    /// Update the current scene, starting it first if needed.
    ///
    /// Returns `None` when there is no scene to update.
    pub fn update(&mut self, delta_time: f32) -> Option<FrameReport> {
        let scene = self.scenes.get_mut(self.current)?;
        if !scene.is_started() {
            debug!("Starting scene {}", self.current);
        }
        Some(scene.update(&mut self.actors, delta_time, &mut self.control))
    }

    /// Draw the current scene
    pub fn draw<R: Renderer<S> + ?Sized>(&self, renderer: &mut R) {
        if let Some(scene) = self.scenes.get(self.current) {
            scene.draw(&self.actors, renderer);
        }
    }

    /// End the current scene if it is started
    pub fn end(&mut self) {
        if let Some(scene) = self.scenes.get_mut(self.current) {
            if scene.is_started() {
                scene.end(&mut self.actors);
            }
        }
    }

    /// Ask the engine loop to stop after the current iteration
    pub fn request_stop(&mut self) {
        self.control.request_stop();
    }

    /// Whether a stop has been requested
    pub fn stop_requested(&self) -> bool {
        self.control.stop_requested()
    }

    /// Frame control surface
    pub fn control_mut(&mut self) -> &mut FrameControl {
        &mut self.control
    }
}
