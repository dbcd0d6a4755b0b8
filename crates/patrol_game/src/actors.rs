//! Game-specific actor behaviors

use scene_engine::foundation::collections::ActorId;
use scene_engine::foundation::math::{Vec2, VectorExt};
use scene_engine::scene::{Actor, ActorContext, ActorRegistry, Behavior, Color, Planar};

/// Whether `target` lies within `observer`'s view cone.
///
/// The angle between the observer's forward direction and the direction to
/// the target must not exceed `max_angle` radians, and the target must be no
/// farther than `max_distance`. A target on top of the observer is always seen.
pub fn target_in_sight(observer: &Actor<Planar>, target: &Actor<Planar>, max_angle: f32, max_distance: f32) -> bool {
    let direction = target.global_position() - observer.global_position();
    let distance = direction.magnitude();
    if distance > max_distance {
        return false;
    }
    if distance == 0.0 {
        return true;
    }
    let cos_angle = observer.forward().dot(&direction.normalized_or_zero()).clamp(-1.0, 1.0);
    cos_angle.acos() <= max_angle
}

/// Patrolling enemy that turns red while it can see its target
#[derive(Debug, Clone)]
pub struct EnemyBehavior {
    target: Option<ActorId>,
    patrol_a: Vec2,
    patrol_b: Vec2,
    heading_to_b: bool,
    speed: f32,
    patrols: bool,
    sight_angle: f32,
    sight_distance: f32,
    alert_color: Color,
    calm_color: Color,
    target_seen: bool,
}

impl EnemyBehavior {
    /// Enemy walking between two points in its parent's space
    pub fn new(patrol_a: Vec2, patrol_b: Vec2, speed: f32) -> Self {
        Self {
            target: None,
            patrol_a,
            patrol_b,
            heading_to_b: false,
            speed,
            patrols: true,
            sight_angle: 0.75,
            sight_distance: 5.0,
            alert_color: Color::RED,
            calm_color: Color::BLUE,
            target_seen: false,
        }
    }

    /// Builder pattern: set the actor to watch for
    pub fn with_target(mut self, target: ActorId) -> Self {
        self.target = Some(target);
        self
    }

    /// Builder pattern: set the view cone
    pub fn with_sight(mut self, max_angle: f32, max_distance: f32) -> Self {
        self.sight_angle = max_angle;
        self.sight_distance = max_distance;
        self
    }

    /// Builder pattern: enable or disable patrolling
    pub fn with_patrol(mut self, patrols: bool) -> Self {
        self.patrols = patrols;
        self
    }

    /// Point the enemy is currently walking toward
    pub fn current_point(&self) -> Vec2 {
        if self.heading_to_b {
            self.patrol_b
        } else {
            self.patrol_a
        }
    }

    /// Whether the target was in sight on the last update
    pub fn target_seen(&self) -> bool {
        self.target_seen
    }

    /// Sight check against the configured target; no target means nothing
    /// to see
    pub fn check_target_in_sight(&self, actors: &ActorRegistry<Planar>, observer: ActorId) -> bool {
        let Some(target) = self.target.and_then(|id| actors.get(id)) else {
            return false;
        };
        actors
            .get(observer)
            .is_some_and(|me| target_in_sight(me, target, self.sight_angle, self.sight_distance))
    }

    /// Switch points when within one unit of the current one, then aim the
    /// velocity at it
    fn patrol_velocity(&mut self, local_position: Vec2) -> Vec2 {
        if (self.current_point() - local_position).magnitude() <= 1.0 {
            self.heading_to_b = !self.heading_to_b;
        }
        (self.current_point() - local_position).normalized_or_zero() * self.speed
    }
}

impl Behavior<Planar> for EnemyBehavior {
    fn update(&mut self, ctx: &mut ActorContext<'_, Planar>, delta_time: f32) {
        let seen = self.check_target_in_sight(ctx.actors(), ctx.id());
        if seen != self.target_seen {
            log::debug!("Enemy {:?} {} its target", ctx.id(), if seen { "spotted" } else { "lost" });
        }
        self.target_seen = seen;

        let color = if seen { self.alert_color } else { self.calm_color };
        let patrols = self.patrols;
        if let Some(actor) = ctx.actor_mut() {
            actor.appearance_mut().color = color;
            if patrols {
                let velocity = self.patrol_velocity(actor.local_position());
                actor.set_velocity(velocity);
            }
        }
        ctx.integrate(delta_time);
    }
}

/// Spinning goal; touching the player ends the game
#[derive(Debug, Clone)]
pub struct GoalBehavior {
    player: ActorId,
    spin_step: f32,
    angle: f32,
}

impl GoalBehavior {
    /// Goal watching for `player`, turning `spin_step` radians per frame
    pub fn new(player: ActorId, spin_step: f32) -> Self {
        Self { player, spin_step, angle: 0.0 }
    }

    /// Accumulated rotation in radians
    pub fn angle(&self) -> f32 {
        self.angle
    }
}

impl Behavior<Planar> for GoalBehavior {
    fn update(&mut self, ctx: &mut ActorContext<'_, Planar>, delta_time: f32) {
        self.angle += self.spin_step;
        if let Some(actor) = ctx.actor_mut() {
            actor.transform_mut().set_rotation(self.angle);
        }
        ctx.refresh_transform();
        ctx.advance(delta_time);
    }

    fn on_collision(&mut self, ctx: &mut ActorContext<'_, Planar>, other: ActorId) {
        ctx.push_apart(other);
        if other == self.player {
            log::info!("Player reached the goal");
            ctx.request_stop();
        }
    }
}
