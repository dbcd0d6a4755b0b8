//! Actor behaviors
//!
//! A [`Behavior`] customizes the four lifecycle hooks of an actor. Every hook
//! has a default, so a behavior only overrides what it changes; an actor with
//! no behavior at all runs the defaults.
//!
//! Update and collision hooks receive an [`ActorContext`], which borrows the
//! whole registry so a behavior can look at other actors (a patrol target,
//! the player) while it mutates its own.

use super::actor::Actor;
use super::collision;
use super::frame::{FrameControl, SceneCommand};
use super::registry::ActorRegistry;
use super::space::Space;
use crate::foundation::collections::ActorId;

/// Overridable lifecycle hooks of an actor
pub trait Behavior<S: Space> {
    /// Called once when the actor enters the started state
    fn start(&mut self, _actor: &mut Actor<S>) {}

    /// Called once per frame while the actor's scene is updating.
    ///
    /// The default faces the velocity, refreshes the transforms, and moves the
    /// actor by `velocity * delta_time`.
    fn update(&mut self, ctx: &mut ActorContext<'_, S>, delta_time: f32) {
        ctx.integrate(delta_time);
    }

    /// Called when the sweep finds this actor overlapping `other`.
    ///
    /// The default nudges `other` one unit away from this actor.
    fn on_collision(&mut self, ctx: &mut ActorContext<'_, S>, other: ActorId) {
        ctx.push_apart(other);
    }

    /// Called once when the actor leaves the started state
    fn end(&mut self, _actor: &mut Actor<S>) {}
}

/// View of the running frame handed to update and collision hooks
pub struct ActorContext<'a, S: Space> {
    id: ActorId,
    actors: &'a mut ActorRegistry<S>,
    world: &'a S::Matrix,
    control: &'a mut FrameControl,
}

impl<'a, S: Space> ActorContext<'a, S> {
    pub(crate) fn new(
        id: ActorId,
        actors: &'a mut ActorRegistry<S>,
        world: &'a S::Matrix,
        control: &'a mut FrameControl,
    ) -> Self {
        Self { id, actors, world, control }
    }

    /// Handle of the actor running the hook
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// The actor running the hook
    pub fn actor(&self) -> Option<&Actor<S>> {
        self.actors.get(self.id)
    }

    /// Mutable access to the actor running the hook
    pub fn actor_mut(&mut self) -> Option<&mut Actor<S>> {
        self.actors.get_mut(self.id)
    }

    /// Every actor in the registry
    pub fn actors(&self) -> &ActorRegistry<S> {
        &*self.actors
    }

    /// Mutable access to every actor in the registry
    pub fn actors_mut(&mut self) -> &mut ActorRegistry<S> {
        &mut *self.actors
    }

    /// World transform of the updating scene
    pub fn world(&self) -> &S::Matrix {
        self.world
    }

    /// Default update: face velocity, refresh transforms, advance
    pub fn integrate(&mut self, delta_time: f32) {
        self.actors.integrate(self.id, self.world, delta_time);
    }

    /// Recompute the local then global transform of this actor
    pub fn refresh_transform(&mut self) {
        self.actors.refresh_transform(self.id, self.world);
    }

    /// Move this actor by `velocity * delta_time`
    pub fn advance(&mut self, delta_time: f32) {
        if let Some(actor) = self.actors.get_mut(self.id) {
            actor.advance(delta_time);
        }
    }

    /// Default collision response: push `other` one unit away from this actor
    pub fn push_apart(&mut self, other: ActorId) -> bool {
        collision::push_apart(self.actors, self.id, other)
    }

    /// Ask the engine loop to stop after this frame
    pub fn request_stop(&mut self) {
        self.control.request_stop();
    }

    /// Queue a structural change for the end of the frame
    pub fn queue(&mut self, command: SceneCommand) {
        self.control.queue(command);
    }

    /// Frame control surface
    pub fn control(&mut self) -> &mut FrameControl {
        &mut *self.control
    }
}
