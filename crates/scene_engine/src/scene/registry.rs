//! Actor storage and hierarchy bookkeeping
//!
//! The registry owns every actor; scenes only hold [`ActorId`] handles into it,
//! which is what lets one actor belong to several scenes. Parent and child
//! links are kept mutually consistent here: for any parent `p` and child `c`,
//! `c` appears in `p.children()` exactly when `c.parent() == Some(p)`.

use super::actor::Actor;
use super::behavior::ActorContext;
use super::collision;
use super::error::{SceneError, SceneResult};
use super::frame::FrameControl;
use super::space::Space;
use crate::foundation::collections::{ActorId, ActorMap};
use log::{debug, trace};

/// Arena of actors addressed by generational handles
#[derive(Debug)]
pub struct ActorRegistry<S: Space> {
    actors: ActorMap<Actor<S>>,
}

impl<S: Space> Default for ActorRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Space> ActorRegistry<S> {
    /// Empty registry
    pub fn new() -> Self {
        Self { actors: ActorMap::with_key() }
    }

    /// Store an actor and return its handle
    pub fn spawn(&mut self, actor: Actor<S>) -> ActorId {
        let id = self.actors.insert(actor);
        trace!("Spawned actor {:?}", id);
        id
    }

    /// Remove an actor for good.
    ///
    /// The actor is ended if it was started, detached from its parent, and its
    /// children become roots.
    pub fn despawn(&mut self, id: ActorId) -> SceneResult<Actor<S>> {
        if !self.actors.contains_key(id) {
            return Err(SceneError::ActorNotFound(id));
        }
        self.end_actor(id);
        self.detach_from_parent(id);
        self.detach_children(id);

        let actor = self.actors.remove(id).ok_or(SceneError::ActorNotFound(id))?;
        debug!("Despawned actor {:?}", id);
        Ok(actor)
    }

    /// Look up an actor
    pub fn get(&self, id: ActorId) -> Option<&Actor<S>> {
        self.actors.get(id)
    }

    /// Look up an actor mutably
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor<S>> {
        self.actors.get_mut(id)
    }

    /// Whether `id` refers to a live actor
    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(id)
    }

    /// Number of live actors
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Iterate over all live actors
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &Actor<S>)> {
        self.actors.iter()
    }

    /// Attach `child` under `parent`, detaching it from any previous parent.
    ///
    /// Fails if either handle is stale, if the link already exists, or if it
    /// would make an actor its own ancestor.
    pub fn add_child(&mut self, parent: ActorId, child: ActorId) -> SceneResult<()> {
        if parent == child {
            return Err(SceneError::SelfParent(child));
        }
        let current_parent = self.actors.get(child).ok_or(SceneError::ActorNotFound(child))?.parent();
        if !self.actors.contains_key(parent) {
            return Err(SceneError::ActorNotFound(parent));
        }
        if current_parent == Some(parent) {
            return Err(SceneError::AlreadyChild { parent, child });
        }
        if self.is_ancestor(child, parent) {
            return Err(SceneError::HierarchyCycle { parent, child });
        }

        self.detach_from_parent(child);
        if let Some(actor) = self.actors.get_mut(parent) {
            actor.children_mut().push(child);
        }
        if let Some(actor) = self.actors.get_mut(child) {
            actor.set_parent(Some(parent));
        }
        trace!("Attached {:?} under {:?}", child, parent);
        Ok(())
    }

    /// Detach `child` from `parent`.
    ///
    /// The child keeps its local transform, so its global position changes
    /// on the next refresh.
    pub fn remove_child(&mut self, parent: ActorId, child: ActorId) -> SceneResult<()> {
        let parent_actor = self.actors.get_mut(parent).ok_or(SceneError::ActorNotFound(parent))?;
        let children = parent_actor.children_mut();
        let index = children
            .iter()
            .position(|&id| id == child)
            .ok_or(SceneError::NotAChild { parent, child })?;
        children.remove(index);

        if let Some(actor) = self.actors.get_mut(child) {
            if actor.parent() == Some(parent) {
                actor.set_parent(None);
            }
        }
        trace!("Detached {:?} from {:?}", child, parent);
        Ok(())
    }

    /// Turn every child of `id` into a root and return their handles
    pub fn detach_children(&mut self, id: ActorId) -> Vec<ActorId> {
        let children = match self.actors.get_mut(id) {
            Some(actor) => std::mem::take(actor.children_mut()),
            None => return Vec::new(),
        };
        for &child in &children {
            if let Some(actor) = self.actors.get_mut(child) {
                actor.set_parent(None);
            }
        }
        children
    }

    /// Whether `ancestor` lies on the parent chain above `id`
    pub fn is_ancestor(&self, ancestor: ActorId, id: ActorId) -> bool {
        let mut cursor = self.actors.get(id).and_then(Actor::parent);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.actors.get(current).and_then(Actor::parent);
        }
        false
    }

    /// Global transform of the actor's parent, if it has a live one
    pub fn parent_global(&self, id: ActorId) -> Option<S::Matrix> {
        let parent = self.actors.get(id)?.parent()?;
        self.actors.get(parent).map(|actor| *actor.transform().global())
    }

    /// Recompute the local transform, then the global transform against the
    /// parent's current global (or `world` for a root)
    pub fn refresh_transform(&mut self, id: ActorId, world: &S::Matrix) {
        let parent_global = self.parent_global(id);
        if let Some(actor) = self.actors.get_mut(id) {
            let transform = actor.transform_mut();
            transform.update_local_transform();
            transform.update_global_transform(parent_global.as_ref(), world);
        }
    }

    /// Default per-frame update: face the velocity, refresh transforms, then
    /// move by `velocity * delta_time`.
    ///
    /// The move lands in the translation factor after the refresh, so the
    /// global position lags the local one by a frame.
    pub fn integrate(&mut self, id: ActorId, world: &S::Matrix, delta_time: f32) {
        if let Some(actor) = self.actors.get_mut(id) {
            actor.face_velocity();
        }
        self.refresh_transform(id, world);
        if let Some(actor) = self.actors.get_mut(id) {
            actor.advance(delta_time);
        }
    }

    /// Start an actor; `false` if it is missing or already started
    pub fn start_actor(&mut self, id: ActorId) -> bool {
        self.actors.get_mut(id).is_some_and(Actor::start)
    }

    /// End an actor; `false` if it is missing or not started
    pub fn end_actor(&mut self, id: ActorId) -> bool {
        self.actors.get_mut(id).is_some_and(Actor::end)
    }

    /// Run the actor's update hook (or the default update)
    pub(crate) fn update_actor(
        &mut self,
        id: ActorId,
        world: &S::Matrix,
        control: &mut FrameControl,
        delta_time: f32,
    ) {
        let Some(actor) = self.actors.get_mut(id) else {
            return;
        };
        match actor.take_behavior() {
            Some(mut behavior) => {
                behavior.update(&mut ActorContext::new(id, self, world, control), delta_time);
                if let Some(actor) = self.actors.get_mut(id) {
                    actor.restore_behavior(behavior);
                }
            }
            None => self.integrate(id, world, delta_time),
        }
    }

    /// Run the actor's collision hook (or the default push-apart)
    pub(crate) fn dispatch_collision(
        &mut self,
        id: ActorId,
        other: ActorId,
        world: &S::Matrix,
        control: &mut FrameControl,
    ) {
        let Some(actor) = self.actors.get_mut(id) else {
            return;
        };
        match actor.take_behavior() {
            Some(mut behavior) => {
                behavior.on_collision(&mut ActorContext::new(id, self, world, control), other);
                if let Some(actor) = self.actors.get_mut(id) {
                    actor.restore_behavior(behavior);
                }
            }
            None => {
                collision::push_apart(self, id, other);
            }
        }
    }

    fn detach_from_parent(&mut self, child: ActorId) {
        let Some(parent) = self.actors.get(child).and_then(Actor::parent) else {
            return;
        };
        if let Some(actor) = self.actors.get_mut(parent) {
            actor.children_mut().retain(|&id| id != child);
        }
        if let Some(actor) = self.actors.get_mut(child) {
            actor.set_parent(None);
        }
    }
}
