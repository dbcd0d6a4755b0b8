//! Player input sources
//!
//! The game runs headless, so keys come from an [`InputSource`]: either a
//! scripted timeline or a seeded random walk.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scene_engine::foundation::math::{Vec2, VectorExt};
use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Move up (screen space, y grows downward)
    MoveUp,
    /// Move down
    MoveDown,
    /// Move left
    MoveLeft,
    /// Move right
    MoveRight,
    /// Lower the player's speed
    SlowDown,
    /// Raise the player's speed
    SpeedUp,
    /// Grow the player
    ScaleUp,
    /// Shrink the player
    ScaleDown,
    /// Cycle to the next scene
    SwitchScene,
    /// Quit the game
    Exit,
}

/// Keys held during one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyState {
    held: Vec<Key>,
}

impl KeyState {
    /// State with the given keys held
    pub fn new(held: impl IntoIterator<Item = Key>) -> Self {
        Self { held: held.into_iter().collect() }
    }

    /// Whether `key` is held
    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Normalized movement direction from the four movement keys
    pub fn direction(&self) -> Vec2 {
        let axis = |negative: Key, positive: Key| {
            f32::from(u8::from(self.is_down(positive))) - f32::from(u8::from(self.is_down(negative)))
        };
        Vec2::new(axis(Key::MoveLeft, Key::MoveRight), axis(Key::MoveUp, Key::MoveDown)).normalized_or_zero()
    }
}

/// Source of per-frame key state
pub trait InputSource {
    /// Keys held during the next frame
    fn poll(&mut self) -> KeyState;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// One segment of a scripted key timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// How many frames the keys are held
    pub frames: u32,
    /// Keys held
    #[serde(default)]
    pub keys: Vec<Key>,
}

impl ScriptStep {
    /// Hold `keys` for `frames` frames
    pub fn new(frames: u32, keys: Vec<Key>) -> Self {
        Self { frames, keys }
    }
}

/// Replays a fixed timeline, then reports no keys
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    steps: Vec<ScriptStep>,
    step: usize,
    frame_in_step: u32,
}

impl ScriptedInput {
    /// Timeline from steps
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self { steps, step: 0, frame_in_step: 0 }
    }

    /// Whether every step has been replayed
    pub fn is_finished(&self) -> bool {
        self.step >= self.steps.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> KeyState {
        while let Some(step) = self.steps.get(self.step) {
            if self.frame_in_step < step.frames {
                self.frame_in_step += 1;
                return KeyState::new(step.keys.iter().copied());
            }
            self.step += 1;
            self.frame_in_step = 0;
        }
        KeyState::default()
    }

    fn describe(&self) -> String {
        format!("scripted input ({} steps)", self.steps.len())
    }
}

/// Random walk: picks a new movement key every `change_every` frames
#[derive(Debug, Clone)]
pub struct WanderInput {
    rng: StdRng,
    change_every: u32,
    frames_left: u32,
    current: KeyState,
}

impl WanderInput {
    const MOVES: [Key; 4] = [Key::MoveUp, Key::MoveDown, Key::MoveLeft, Key::MoveRight];

    /// Deterministic wanderer for a given seed
    pub fn new(seed: u64, change_every: u32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            change_every: change_every.max(1),
            frames_left: 0,
            current: KeyState::default(),
        }
    }
}

impl InputSource for WanderInput {
    fn poll(&mut self) -> KeyState {
        if self.frames_left == 0 {
            let mut keys = vec![Self::MOVES[self.rng.gen_range(0..Self::MOVES.len())]];
            if self.rng.gen_bool(0.25) {
                keys.push(Self::MOVES[self.rng.gen_range(0..Self::MOVES.len())]);
            }
            self.current = KeyState::new(keys);
            self.frames_left = self.change_every;
        }
        self.frames_left -= 1;
        self.current.clone()
    }

    fn describe(&self) -> String {
        format!("wandering input (new direction every {} frames)", self.change_every)
    }
}
