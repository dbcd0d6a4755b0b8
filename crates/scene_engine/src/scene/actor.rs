//! Actors: positioned, updatable entities
//!
//! An actor owns its [`TransformNode`], a velocity, a collision radius, and an
//! opaque [`Appearance`] handed through to the renderer. Hierarchy links are
//! stored as [`ActorId`] handles; the [`ActorRegistry`](super::ActorRegistry)
//! keeps both directions consistent.

use super::behavior::Behavior;
use super::space::Space;
use super::transform::TransformNode;
use crate::foundation::collections::ActorId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Collision radius given to actors unless configured otherwise
pub const DEFAULT_COLLISION_RADIUS: f32 = 0.5;

/// RGBA color, passed through to the renderer untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Opaque black
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque red
    pub const RED: Color = Color::rgb(230, 41, 55);
    /// Opaque green
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    /// Opaque blue
    pub const BLUE: Color = Color::rgb(0, 121, 241);
    /// Opaque yellow
    pub const YELLOW: Color = Color::rgb(253, 249, 0);

    /// Opaque color from red, green, and blue channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Display identity of an actor (opaque to the simulation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    /// Glyph drawn for the actor
    pub icon: char,
    /// Draw color
    pub color: Color,
}

impl Appearance {
    /// Appearance with the given glyph and color
    pub fn new(icon: char, color: Color) -> Self {
        Self { icon, color }
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self { icon: ' ', color: Color::WHITE }
    }
}

/// Lifecycle state of an actor within its current scene membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActorState {
    /// Created but never started
    #[default]
    Uninitialized,
    /// Started and receiving updates
    Started,
    /// Ended after removal or scene shutdown; may be started again
    Ended,
}

/// A positioned entity with a transform, velocity, and collision radius
pub struct Actor<S: Space> {
    appearance: Appearance,
    transform: TransformNode<S>,
    velocity: S::Vector,
    collision_radius: f32,
    parent: Option<ActorId>,
    children: Vec<ActorId>,
    state: ActorState,
    behavior: Option<Box<dyn Behavior<S>>>,
}

impl<S: Space> Actor<S> {
    /// Actor at `position` with zero velocity and the default radius
    pub fn new(position: S::Vector) -> Self {
        Self {
            appearance: Appearance::default(),
            transform: TransformNode::from_position(position),
            velocity: S::zero(),
            collision_radius: DEFAULT_COLLISION_RADIUS,
            parent: None,
            children: Vec::new(),
            state: ActorState::Uninitialized,
            behavior: None,
        }
    }

    /// Builder pattern: set velocity
    pub fn with_velocity(mut self, velocity: S::Vector) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder pattern: set collision radius
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.collision_radius = radius;
        self
    }

    /// Builder pattern: set appearance
    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    /// Builder pattern: attach a behavior
    pub fn with_behavior(mut self, behavior: impl Behavior<S> + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    /// Replace the behavior
    pub fn set_behavior(&mut self, behavior: Box<dyn Behavior<S>>) {
        self.behavior = Some(behavior);
    }

    /// Whether a behavior is attached
    pub fn has_behavior(&self) -> bool {
        self.behavior.is_some()
    }

    /// Enter the started state.
    ///
    /// Returns `false` without side effects if the actor is already started.
    pub fn start(&mut self) -> bool {
        if self.state == ActorState::Started {
            return false;
        }
        self.state = ActorState::Started;
        if let Some(mut behavior) = self.behavior.take() {
            behavior.start(self);
            self.restore_behavior(behavior);
        }
        true
    }

    /// Leave the started state.
    ///
    /// Returns `false` without side effects if the actor is not started.
    pub fn end(&mut self) -> bool {
        if self.state != ActorState::Started {
            return false;
        }
        self.state = ActorState::Ended;
        if let Some(mut behavior) = self.behavior.take() {
            behavior.end(self);
            self.restore_behavior(behavior);
        }
        true
    }

    /// Current lifecycle state
    pub fn state(&self) -> ActorState {
        self.state
    }

    /// Whether the actor is started
    pub fn is_started(&self) -> bool {
        self.state == ActorState::Started
    }

    /// Display identity
    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// Mutable display identity
    pub fn appearance_mut(&mut self) -> &mut Appearance {
        &mut self.appearance
    }

    /// Velocity in units per second
    pub fn velocity(&self) -> S::Vector {
        self.velocity
    }

    /// Set velocity
    pub fn set_velocity(&mut self, velocity: S::Vector) {
        self.velocity = velocity;
    }

    /// Collision radius
    pub fn collision_radius(&self) -> f32 {
        self.collision_radius
    }

    /// Set collision radius
    pub fn set_collision_radius(&mut self, radius: f32) {
        self.collision_radius = radius;
    }

    /// Transform node
    pub fn transform(&self) -> &TransformNode<S> {
        &self.transform
    }

    /// Mutable transform node
    pub fn transform_mut(&mut self) -> &mut TransformNode<S> {
        &mut self.transform
    }

    /// Position relative to the parent
    pub fn local_position(&self) -> S::Vector {
        self.transform.local_position()
    }

    /// Overwrite the position relative to the parent
    pub fn set_local_position(&mut self, position: S::Vector) {
        self.transform.set_local_position(position);
    }

    /// Position in scene space as of the last transform refresh
    pub fn global_position(&self) -> S::Vector {
        self.transform.global_position()
    }

    /// Facing direction as of the last transform refresh
    pub fn forward(&self) -> S::Vector {
        self.transform.forward()
    }

    /// Parent handle, if attached
    pub fn parent(&self) -> Option<ActorId> {
        self.parent
    }

    /// Child handles in attachment order
    pub fn children(&self) -> &[ActorId] {
        &self.children
    }

    /// Turn to face the velocity; a velocity with no heading (zero, or
    /// straight along Z in 3D) keeps the current facing
    pub fn face_velocity(&mut self) {
        if let Some(rotation) = S::facing(&self.velocity) {
            self.transform.set_rotation_matrix(rotation);
        }
    }

    /// Move the local position by `velocity * delta_time`
    pub fn advance(&mut self, delta_time: f32) {
        let position = self.local_position() + self.velocity * delta_time;
        self.set_local_position(position);
    }

    pub(crate) fn set_parent(&mut self, parent: Option<ActorId>) {
        self.parent = parent;
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<ActorId> {
        &mut self.children
    }

    pub(crate) fn take_behavior(&mut self) -> Option<Box<dyn Behavior<S>>> {
        self.behavior.take()
    }

    /// Put a behavior back unless it replaced itself while running
    pub(crate) fn restore_behavior(&mut self, behavior: Box<dyn Behavior<S>>) {
        if self.behavior.is_none() {
            self.behavior = Some(behavior);
        }
    }
}

impl<S: Space> fmt::Debug for Actor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("appearance", &self.appearance)
            .field("transform", &self.transform)
            .field("velocity", &self.velocity)
            .field("collision_radius", &self.collision_radius)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("state", &self.state)
            .field("has_behavior", &self.behavior.is_some())
            .finish()
    }
}
