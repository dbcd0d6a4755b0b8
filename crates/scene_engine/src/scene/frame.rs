//! Per-frame control surface shared by behaviors and the scene

use crate::foundation::collections::ActorId;

/// Structural change requested while a frame is running.
///
/// Applied by the scene after the collision sweep so the actor list never
/// changes under an in-flight iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    /// Append an actor to the updating scene
    Add(ActorId),
    /// Remove an actor from the updating scene (ending it if started)
    Remove(ActorId),
}

/// Stop flag and deferred command queue for the running frame
#[derive(Debug, Default)]
pub struct FrameControl {
    stop_requested: bool,
    commands: Vec<SceneCommand>,
}

impl FrameControl {
    /// Empty control surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the engine loop to stop after the current iteration
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    /// Whether a stop has been requested
    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// Withdraw a pending stop request
    pub fn clear_stop(&mut self) {
        self.stop_requested = false;
    }

    /// Queue a structural change for the end of the frame
    pub fn queue(&mut self, command: SceneCommand) {
        self.commands.push(command);
    }

    /// Commands queued so far this frame
    pub fn pending_commands(&self) -> &[SceneCommand] {
        &self.commands
    }

    pub(crate) fn take_commands(&mut self) -> Vec<SceneCommand> {
        std::mem::take(&mut self.commands)
    }
}

/// Counters for one scene update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Actors whose update hook ran
    pub updated: usize,
    /// Collision callbacks dispatched by the sweep
    pub collisions: usize,
    /// Deferred commands applied after the sweep
    pub commands_applied: usize,
}
