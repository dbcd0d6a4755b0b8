//! The patrol game: a player, three patrolling enemies, and a spinning goal

use crate::actors::{EnemyBehavior, GoalBehavior};
use crate::config::{GameConfig, GameplayConfig, InputMode};
use crate::input::{InputSource, Key, KeyState, ScriptedInput, WanderInput};
use crate::renderer::LogRenderer;
use scene_engine::foundation::collections::ActorId;
use scene_engine::foundation::math::Vec2;
use scene_engine::scene::{Actor, Appearance, Color, Planar, Scene};
use scene_engine::{AppError, Application, Engine};

/// Enemy spawn offsets (relative to the goal) and patrol routes
fn enemy_layout() -> [(Vec2, Vec2, Vec2); 3] {
    [
        (Vec2::new(2.0, -5.0), Vec2::new(0.0, 5.0), Vec2::new(30.0, 5.0)),
        (Vec2::new(10.0, 10.0), Vec2::new(0.0, 10.0), Vec2::new(30.0, 10.0)),
        (Vec2::new(0.1, 7.0), Vec2::new(0.0, 20.0), Vec2::new(30.0, 20.0)),
    ]
}

fn player_start() -> Vec2 {
    Vec2::new(0.0, 0.0)
}

fn goal_position() -> Vec2 {
    Vec2::new(11.0, 16.0)
}

/// Game application driving the player from an [`InputSource`]
pub struct PatrolGame {
    gameplay: GameplayConfig,
    input: Box<dyn InputSource>,
    renderer: LogRenderer,
    player: Option<ActorId>,
    goal: Option<ActorId>,
    enemies: Vec<ActorId>,
    player_speed: f32,
    player_scale: f32,
}

impl PatrolGame {
    /// Game reading input from the source named in `config`
    pub fn new(config: &GameConfig) -> Self {
        let input: Box<dyn InputSource> = match config.input.mode {
            InputMode::Scripted => Box::new(ScriptedInput::new(config.input.script.clone())),
            InputMode::Wander => Box::new(WanderInput::new(config.input.seed, config.input.change_every)),
        };
        Self::with_input(config, input)
    }

    /// Game reading input from an explicit source
    pub fn with_input(config: &GameConfig, input: Box<dyn InputSource>) -> Self {
        Self {
            gameplay: config.gameplay.clone(),
            input,
            renderer: LogRenderer::new(24),
            player: None,
            goal: None,
            enemies: Vec::new(),
            player_speed: config.gameplay.player_speed,
            player_scale: 1.0,
        }
    }

    /// Player handle once initialized
    pub fn player(&self) -> Option<ActorId> {
        self.player
    }

    /// Goal handle once initialized
    pub fn goal(&self) -> Option<ActorId> {
        self.goal
    }

    /// Enemy handles once initialized
    pub fn enemies(&self) -> &[ActorId] {
        &self.enemies
    }

    /// Current player speed
    pub fn player_speed(&self) -> f32 {
        self.player_speed
    }

    /// Current player scale
    pub fn player_scale(&self) -> f32 {
        self.player_scale
    }

    fn build_scenes(&mut self, engine: &mut Engine<Planar>) -> Result<(), AppError> {
        let radius = self.gameplay.actor_radius;
        let scene_config = engine.config().scene;

        let player = engine.scenes.spawn(
            Actor::new(player_start())
                .with_radius(radius)
                .with_appearance(Appearance::new('@', Color::BLUE)),
        );
        let goal = engine.scenes.spawn(
            Actor::new(goal_position())
                .with_radius(radius)
                .with_appearance(Appearance::new('G', Color::GREEN))
                .with_behavior(GoalBehavior::new(player, self.gameplay.goal_spin_step)),
        );

        let layout = enemy_layout();
        let mut enemies = Vec::with_capacity(layout.len());
        for (offset, patrol_a, patrol_b) in layout {
            let behavior = EnemyBehavior::new(patrol_a, patrol_b, self.gameplay.enemy_speed)
                .with_target(player)
                .with_sight(self.gameplay.sight_angle, self.gameplay.sight_distance)
                .with_patrol(self.gameplay.enemies_patrol);
            let enemy = engine.scenes.spawn(
                Actor::new(offset)
                    .with_radius(radius)
                    .with_appearance(Appearance::new('■', Color::GREEN))
                    .with_behavior(behavior),
            );
            engine.scenes.actors_mut().add_child(goal, enemy)?;
            enemies.push(enemy);
        }

        let mut patrol = Scene::with_config(scene_config);
        patrol.add_actor(player);
        for &enemy in &enemies {
            patrol.add_actor(enemy);
        }
        patrol.add_actor(goal);

        let mut open_field = Scene::with_config(scene_config);
        open_field.add_actor(player);
        open_field.add_actor(goal);

        let first = engine.scenes.add_scene(patrol);
        engine.scenes.add_scene(open_field);
        engine.scenes.set_current_scene(first)?;

        self.player = Some(player);
        self.goal = Some(goal);
        self.enemies = enemies;
        Ok(())
    }

    fn apply_input(&mut self, engine: &mut Engine<Planar>, keys: &KeyState) -> Result<(), AppError> {
        if keys.is_down(Key::Exit) {
            engine.quit();
        }
        if keys.is_down(Key::SwitchScene) && engine.scenes.scene_count() > 0 {
            let next = (engine.scenes.current_index() + 1) % engine.scenes.scene_count();
            engine.scenes.set_current_scene(next)?;
        }

        let gameplay = &self.gameplay;
        if keys.is_down(Key::SpeedUp) {
            self.player_speed += gameplay.speed_step;
        }
        if keys.is_down(Key::SlowDown) {
            self.player_speed = (self.player_speed - gameplay.speed_step).max(0.0);
        }
        if keys.is_down(Key::ScaleUp) {
            self.player_scale = (self.player_scale + gameplay.scale_step).min(gameplay.max_scale);
        }
        if keys.is_down(Key::ScaleDown) {
            self.player_scale = (self.player_scale - gameplay.scale_step).max(gameplay.min_scale);
        }

        let player = self.player.ok_or_else(|| AppError::GameLogic("player not spawned".to_string()))?;
        let actor = engine
            .scenes
            .actors_mut()
            .get_mut(player)
            .ok_or_else(|| AppError::GameLogic("player despawned".to_string()))?;

        actor.set_velocity(keys.direction() * self.player_speed);
        actor.transform_mut().set_scale_xy(self.player_scale, self.player_scale);
        let clamped = actor.local_position().sup(&gameplay.arena_min).inf(&gameplay.arena_max);
        actor.set_local_position(clamped);
        Ok(())
    }
}

impl Application<Planar> for PatrolGame {
    fn initialize(&mut self, engine: &mut Engine<Planar>) -> Result<(), AppError> {
        log::info!("Player driven by {}", self.input.describe());
        self.build_scenes(engine)?;
        log::info!(
            "Spawned player, goal, and {} enemies across {} scenes",
            self.enemies.len(),
            engine.scenes.scene_count()
        );
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine<Planar>, _delta_time: f32) -> Result<(), AppError> {
        let keys = self.input.poll();
        self.apply_input(engine, &keys)
    }

    fn render(&mut self, engine: &mut Engine<Planar>) -> Result<(), AppError> {
        engine.scenes.draw(&mut self.renderer);
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine<Planar>) {
        log::debug!("Rendered {} frames", self.renderer.frames());
        if engine.scenes.stop_requested() {
            log::info!("Game over: goal reached after {} frames", engine.frame_count());
        } else {
            log::info!("Game ended after {} frames", engine.frame_count());
        }
    }
}
