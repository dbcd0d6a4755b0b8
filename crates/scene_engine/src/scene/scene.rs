//! Scenes: ordered actor collections with a world transform
//!
//! A scene stores handles, not actors. Each [`Scene::update`]:
//!
//! 1. starts the scene if needed and drops handles whose actors were
//!    despawned,
//! 2. starts any actor that is not yet started and runs its update hook,
//! 3. sweeps every pair for overlaps in insertion order,
//! 4. applies the [`SceneCommand`]s behaviors queued during the frame.

use super::actor::Actor;
use super::collision::{self, SweepMode};
use super::error::{SceneError, SceneResult};
use super::frame::{FrameControl, FrameReport, SceneCommand};
use super::registry::ActorRegistry;
use super::space::Space;
use super::view::{ActorView, Renderer};
use crate::foundation::collections::{ActorId, SecondaryMap};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Order in which actors receive their update hook
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOrder {
    /// Depth-first from scene roots, parents before children, so every child
    /// composes against its parent's global transform from this frame
    #[default]
    Hierarchy,
    /// Plain insertion order; a child inserted before its parent composes
    /// against the parent's transform from the previous frame
    Insertion,
}

/// Per-scene simulation settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Pair enumeration for the collision sweep
    pub sweep_mode: SweepMode,
    /// Update hook ordering
    pub update_order: UpdateOrder,
}

/// Ordered collection of actor handles
#[derive(Debug, Clone)]
pub struct Scene<S: Space> {
    actors: Vec<ActorId>,
    world: S::Matrix,
    started: bool,
    config: SceneConfig,
}

impl<S: Space> Default for Scene<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Space> Scene<S> {
    /// Empty scene with an identity world transform
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Empty scene with explicit settings
    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            actors: Vec::new(),
            world: S::identity(),
            started: false,
            config,
        }
    }

    /// Builder pattern: set the world transform
    pub fn with_world(mut self, world: S::Matrix) -> Self {
        self.world = world;
        self
    }

    /// Append an actor.
    ///
    /// Returns `false` if the actor is already in the scene; it is not
    /// added twice.
    pub fn add_actor(&mut self, id: ActorId) -> bool {
        if self.actors.contains(&id) {
            return false;
        }
        self.actors.push(id);
        true
    }

    /// Remove an actor, ending it if it was started.
    ///
    /// The actor's children are detached and become roots; the actor itself
    /// stays in the registry.
    pub fn remove_actor(&mut self, actors: &mut ActorRegistry<S>, id: ActorId) -> SceneResult<()> {
        let index = self
            .actors
            .iter()
            .position(|&member| member == id)
            .ok_or(SceneError::NotInScene(id))?;
        self.remove_actor_at(actors, index).map(|_| ())
    }

    /// Remove the actor at `index`, ending it if it was started
    pub fn remove_actor_at(&mut self, actors: &mut ActorRegistry<S>, index: usize) -> SceneResult<ActorId> {
        if index >= self.actors.len() {
            return Err(SceneError::IndexOutOfRange { index, len: self.actors.len() });
        }
        let id = self.actors.remove(index);
        actors.end_actor(id);
        let orphaned = actors.detach_children(id);
        debug!("Removed actor {:?} from scene ({} children detached)", id, orphaned.len());
        Ok(id)
    }

    /// Actor handle at `index`
    pub fn actor_at(&self, index: usize) -> Option<ActorId> {
        self.actors.get(index).copied()
    }

    /// Whether the scene holds `id`
    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains(&id)
    }

    /// Actor handles in insertion order
    pub fn actors(&self) -> &[ActorId] {
        &self.actors
    }

    /// Number of actors
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether the scene has no actors
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// World transform applied to root actors
    pub fn world(&self) -> &S::Matrix {
        &self.world
    }

    /// Replace the world transform
    pub fn set_world(&mut self, world: S::Matrix) {
        self.world = world;
    }

    /// Simulation settings
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Mutable simulation settings
    pub fn config_mut(&mut self) -> &mut SceneConfig {
        &mut self.config
    }

    /// Whether [`start`](Self::start) ran since the last [`end`](Self::end)
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Mark the scene started; actors start lazily on their first update
    pub fn start(&mut self) {
        self.started = true;
    }

    /// Advance the scene by one frame, starting it first if it is not
    /// started (including after [`end`](Self::end))
    pub fn update(
        &mut self,
        actors: &mut ActorRegistry<S>,
        delta_time: f32,
        control: &mut FrameControl,
    ) -> FrameReport {
        if !self.started {
            self.start();
            debug!("Scene started on first update");
        }
        self.prune(actors);

        let mut report = FrameReport::default();
        for id in self.frame_order(actors) {
            if !actors.contains(id) {
                continue;
            }
            actors.start_actor(id);
            actors.update_actor(id, &self.world, control, delta_time);
            report.updated += 1;
        }

        report.collisions = collision::sweep(actors, &self.actors, self.config.sweep_mode, &self.world, control);
        report.commands_applied = self.apply_commands(actors, control);
        report
    }

    /// Hand a view of every live actor to `renderer`, in insertion order
    pub fn draw<R: Renderer<S> + ?Sized>(&self, actors: &ActorRegistry<S>, renderer: &mut R) {
        renderer.begin_frame();
        for view in self.views(actors) {
            renderer.draw_actor(&view);
        }
        renderer.end_frame();
    }

    /// Snapshot every live actor, in insertion order
    pub fn views(&self, actors: &ActorRegistry<S>) -> Vec<ActorView<S>> {
        self.actors
            .iter()
            .filter_map(|&id| actors.get(id).map(|actor| ActorView::of(id, actor)))
            .collect()
    }

    /// End every started actor and mark the scene not started
    pub fn end(&mut self, actors: &mut ActorRegistry<S>) {
        let ended = self.actors.iter().filter(|&&id| actors.end_actor(id)).count();
        self.started = false;
        debug!("Scene ended ({} actors ended)", ended);
    }

    fn prune(&mut self, actors: &ActorRegistry<S>) {
        let before = self.actors.len();
        self.actors.retain(|&id| actors.contains(id));
        if self.actors.len() != before {
            debug!("Pruned {} despawned actors from scene", before - self.actors.len());
        }
    }

    fn frame_order(&self, actors: &ActorRegistry<S>) -> Vec<ActorId> {
        match self.config.update_order {
            UpdateOrder::Insertion => self.actors.clone(),
            UpdateOrder::Hierarchy => self.hierarchy_order(actors),
        }
    }

    /// Depth-first pre-order over the scene's forest. An actor whose parent is
    /// not in this scene counts as a root.
    fn hierarchy_order(&self, actors: &ActorRegistry<S>) -> Vec<ActorId> {
        let mut members = SecondaryMap::new();
        for &id in &self.actors {
            members.insert(id, ());
        }

        let mut visited = SecondaryMap::new();
        let mut order = Vec::with_capacity(self.actors.len());
        let mut stack = Vec::new();

        for &root in &self.actors {
            let is_root = actors
                .get(root)
                .and_then(Actor::parent)
                .map_or(true, |parent| !members.contains_key(parent));
            if !is_root {
                continue;
            }

            stack.push(root);
            while let Some(id) = stack.pop() {
                if visited.insert(id, ()).is_some() {
                    continue;
                }
                order.push(id);
                if let Some(actor) = actors.get(id) {
                    stack.extend(
                        actor
                            .children()
                            .iter()
                            .rev()
                            .filter(|&&child| members.contains_key(child)),
                    );
                }
            }
        }

        // Only reachable if the hierarchy was corrupted into a cycle
        order.extend(self.actors.iter().filter(|&&id| !visited.contains_key(id)));
        order
    }

    fn apply_commands(&mut self, actors: &mut ActorRegistry<S>, control: &mut FrameControl) -> usize {
        let mut applied = 0;
        for command in control.take_commands() {
            match command {
                SceneCommand::Add(id) => {
                    if !actors.contains(id) {
                        warn!("Dropping add of despawned actor {:?}", id);
                    } else if self.add_actor(id) {
                        applied += 1;
                    }
                }
                SceneCommand::Remove(id) => match self.remove_actor(actors, id) {
                    Ok(()) => applied += 1,
                    Err(e) => warn!("Dropping deferred removal: {}", e),
                },
            }
        }
        applied
    }
}
