//! Read-only actor snapshots for renderers

use super::actor::{Actor, Color};
use super::space::Space;
use crate::foundation::collections::ActorId;

/// What a renderer needs to draw one actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorView<S: Space> {
    /// Handle of the drawn actor
    pub id: ActorId,
    /// Glyph
    pub icon: char,
    /// Color
    pub color: Color,
    /// Global position
    pub position: S::Vector,
    /// Facing direction
    pub forward: S::Vector,
    /// Collision radius
    pub radius: f32,
}

impl<S: Space> ActorView<S> {
    /// Snapshot an actor
    pub fn of(id: ActorId, actor: &Actor<S>) -> Self {
        let appearance = actor.appearance();
        Self {
            id,
            icon: appearance.icon,
            color: appearance.color,
            position: actor.global_position(),
            forward: actor.forward(),
            radius: actor.collision_radius(),
        }
    }
}

/// Draw sink fed by [`Scene::draw`](super::Scene::draw).
///
/// Drawing never mutates simulation state.
pub trait Renderer<S: Space> {
    /// Called before the first actor of a frame
    fn begin_frame(&mut self) {}

    /// Draw one actor
    fn draw_actor(&mut self, view: &ActorView<S>);

    /// Called after the last actor of a frame
    fn end_frame(&mut self) {}
}

/// Renderer that keeps the views of the last drawn frame
#[derive(Debug, Default)]
pub struct RecordingRenderer<S: Space> {
    frame: Vec<ActorView<S>>,
    frames_drawn: u64,
}

impl<S: Space> RecordingRenderer<S> {
    /// Empty recorder
    pub fn new() -> Self {
        Self { frame: Vec::new(), frames_drawn: 0 }
    }

    /// Views of the most recent frame, in draw order
    pub fn last_frame(&self) -> &[ActorView<S>] {
        &self.frame
    }

    /// Number of completed frames
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}

impl<S: Space> Renderer<S> for RecordingRenderer<S> {
    fn begin_frame(&mut self) {
        self.frame.clear();
    }

    fn draw_actor(&mut self, view: &ActorView<S>) {
        self.frame.push(*view);
    }

    fn end_frame(&mut self) {
        self.frames_drawn += 1;
    }
}
