//! Game configuration

use crate::input::{Key, ScriptStep};
use scene_engine::config::Config;
use scene_engine::foundation::math::Vec2;
use scene_engine::scene::{SceneConfig, SweepMode};
use scene_engine::EngineConfig;
use serde::{Deserialize, Serialize};

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Engine loop and scene settings
    pub engine: EngineConfig,

    /// Gameplay settings
    pub gameplay: GameplayConfig,

    /// Input settings
    pub input: InputConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig {
                fixed_delta_time: Some(1.0 / 24.0),
                max_frames: Some(2400),
                scene: SceneConfig {
                    sweep_mode: SweepMode::Symmetric,
                    ..SceneConfig::default()
                },
            },
            gameplay: GameplayConfig::default(),
            input: InputConfig::default(),
        }
    }
}

impl Config for GameConfig {}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Player starting speed (units per second)
    pub player_speed: f32,

    /// Speed change per frame while a speed key is held
    pub speed_step: f32,

    /// Scale change per frame while a scale key is held
    pub scale_step: f32,

    /// Smallest player scale
    pub min_scale: f32,

    /// Largest player scale
    pub max_scale: f32,

    /// Enemy patrol speed (units per second)
    pub enemy_speed: f32,

    /// Whether enemies walk their patrol route
    pub enemies_patrol: bool,

    /// Half-angle of an enemy's view cone in radians
    pub sight_angle: f32,

    /// How far an enemy can see
    pub sight_distance: f32,

    /// Goal rotation added every frame, in radians
    pub goal_spin_step: f32,

    /// Collision radius of every actor in the game
    pub actor_radius: f32,

    /// Lower corner of the playable area
    pub arena_min: Vec2,

    /// Upper corner of the playable area
    pub arena_max: Vec2,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            player_speed: 5.0,
            speed_step: 1.0,
            scale_step: 0.1,
            min_scale: 0.5,
            max_scale: 3.0,
            enemy_speed: 2.0,
            enemies_patrol: true,
            sight_angle: 0.75,
            sight_distance: 5.0,
            goal_spin_step: 0.07,
            actor_radius: scene_engine::scene::DEFAULT_COLLISION_RADIUS,
            arena_min: Vec2::new(0.0, 0.0),
            arena_max: Vec2::new(32.0, 24.0),
        }
    }
}

/// Where player input comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Replay `script`, then hold no keys
    Scripted,
    /// Seeded random wandering
    #[default]
    Wander,
}

/// Input configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Input source
    pub mode: InputMode,

    /// Seed for the wandering input
    pub seed: u64,

    /// Frames between wandering direction changes
    pub change_every: u32,

    /// Key timeline for scripted input
    pub script: Vec<ScriptStep>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mode: InputMode::Wander,
            seed: 7,
            change_every: 12,
            script: vec![
                ScriptStep::new(20, vec![Key::MoveRight]),
                ScriptStep::new(10, vec![Key::MoveDown, Key::SpeedUp]),
                ScriptStep::new(30, vec![Key::MoveDown]),
            ],
        }
    }
}
