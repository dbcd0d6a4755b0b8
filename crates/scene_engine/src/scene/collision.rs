//! Circle/sphere overlap tests and the per-frame collision sweep

use super::actor::Actor;
use super::frame::FrameControl;
use super::registry::ActorRegistry;
use super::space::Space;
use crate::foundation::collections::ActorId;
use log::trace;
use serde::{Deserialize, Serialize};

/// Pair enumeration used by the collision sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepMode {
    /// For every actor except the last, check against every actor.
    ///
    /// Pairs involving the last actor as the initiator are never checked, so
    /// the last actor only ever receives collisions.
    #[default]
    Legacy,
    /// Check every unordered pair once in each direction
    Symmetric,
}

/// Whether two actors' bounding circles (or spheres) overlap.
///
/// Uses global positions and is strict: touching circles do not overlap.
pub fn overlaps<S: Space>(a: &Actor<S>, b: &Actor<S>) -> bool {
    let distance = S::distance(&a.global_position(), &b.global_position());
    distance < a.collision_radius() + b.collision_radius()
}

/// Overlap test by handle; an actor never overlaps itself and stale handles
/// never overlap anything
pub fn actors_overlap<S: Space>(actors: &ActorRegistry<S>, a: ActorId, b: ActorId) -> bool {
    if a == b {
        return false;
    }
    match (actors.get(a), actors.get(b)) {
        (Some(first), Some(second)) => overlaps(first, second),
        _ => false,
    }
}

/// Nudge `target` one unit along the direction from `from` to it.
///
/// The offset lands in the target's local position; coincident actors have
/// no direction and are left alone. Returns `false` for stale handles.
pub fn push_apart<S: Space>(actors: &mut ActorRegistry<S>, from: ActorId, target: ActorId) -> bool {
    let Some(origin) = actors.get(from).map(Actor::global_position) else {
        return false;
    };
    let Some(actor) = actors.get_mut(target) else {
        return false;
    };
    let direction = S::normalized_or_zero(&(actor.global_position() - origin));
    let position = actor.local_position() + direction;
    actor.set_local_position(position);
    true
}

/// Test `id` against `other` and, on overlap, run `id`'s collision hook.
///
/// Returns whether the hook was dispatched.
pub fn check_collision<S: Space>(
    actors: &mut ActorRegistry<S>,
    id: ActorId,
    other: ActorId,
    world: &S::Matrix,
    control: &mut FrameControl,
) -> bool {
    if !actors_overlap(actors, id, other) {
        return false;
    }
    trace!("Collision {:?} -> {:?}", id, other);
    actors.dispatch_collision(id, other, world, control);
    true
}

/// Run the sweep over `order` and return the number of dispatched callbacks
pub fn sweep<S: Space>(
    actors: &mut ActorRegistry<S>,
    order: &[ActorId],
    mode: SweepMode,
    world: &S::Matrix,
    control: &mut FrameControl,
) -> usize {
    let mut dispatched = 0;
    match mode {
        SweepMode::Legacy => {
            for i in 0..order.len().saturating_sub(1) {
                for &other in order {
                    if check_collision(actors, order[i], other, world, control) {
                        dispatched += 1;
                    }
                }
            }
        }
        SweepMode::Symmetric => {
            for (i, &first) in order.iter().enumerate() {
                for &second in &order[i + 1..] {
                    if check_collision(actors, first, second, world, control) {
                        dispatched += 1;
                    }
                    if check_collision(actors, second, first, world, control) {
                        dispatched += 1;
                    }
                }
            }
        }
    }
    dispatched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat3, Vec2};
    use crate::scene::space::Planar;
    use approx::assert_relative_eq;

    fn spawn_refreshed(registry: &mut ActorRegistry<Planar>, position: Vec2, radius: f32) -> ActorId {
        let id = registry.spawn(Actor::new(position).with_radius(radius));
        registry.refresh_transform(id, &Mat3::identity());
        id
    }

    #[test]
    fn test_overlap_is_strict_and_symmetric() {
        let mut registry = ActorRegistry::<Planar>::new();
        let a = spawn_refreshed(&mut registry, Vec2::new(0.0, 0.0), 0.5);
        let b = spawn_refreshed(&mut registry, Vec2::new(1.0, 0.0), 0.5);
        let c = spawn_refreshed(&mut registry, Vec2::new(0.9, 0.0), 0.5);

        assert!(!actors_overlap(&registry, a, b));
        assert!(actors_overlap(&registry, a, c));
        assert!(actors_overlap(&registry, c, a));
        assert!(!actors_overlap(&registry, a, a));
    }

    #[test]
    fn test_default_radii_overlap_by_distance() {
        let mut registry = ActorRegistry::<Planar>::new();
        let a = registry.spawn(Actor::new(Vec2::zeros()));
        let near = registry.spawn(Actor::new(Vec2::new(0.4, 0.0)));
        let far = registry.spawn(Actor::new(Vec2::new(1.5, 0.0)));
        for id in [a, near, far] {
            registry.refresh_transform(id, &Mat3::identity());
        }

        assert!(actors_overlap(&registry, a, near));
        assert!(!actors_overlap(&registry, a, far));
    }

    #[test]
    fn test_push_apart_moves_target_one_unit() {
        let mut registry = ActorRegistry::<Planar>::new();
        let a = spawn_refreshed(&mut registry, Vec2::new(0.0, 0.0), 0.5);
        let b = spawn_refreshed(&mut registry, Vec2::new(1.0, 0.0), 0.5);

        assert!(push_apart(&mut registry, a, b));
        assert_relative_eq!(registry.get(b).unwrap().local_position(), Vec2::new(2.0, 0.0));
        assert_relative_eq!(registry.get(a).unwrap().local_position(), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_push_apart_coincident_is_noop() {
        let mut registry = ActorRegistry::<Planar>::new();
        let a = spawn_refreshed(&mut registry, Vec2::new(3.0, 3.0), 0.5);
        let b = spawn_refreshed(&mut registry, Vec2::new(3.0, 3.0), 0.5);

        assert!(push_apart(&mut registry, a, b));
        assert_relative_eq!(registry.get(b).unwrap().local_position(), Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_check_collision_dispatches_default_response() {
        let mut registry = ActorRegistry::<Planar>::new();
        let mut control = FrameControl::new();
        let a = spawn_refreshed(&mut registry, Vec2::new(0.0, 0.0), 1.0);
        let b = spawn_refreshed(&mut registry, Vec2::new(1.0, 0.0), 1.0);

        assert!(check_collision(&mut registry, a, b, &Mat3::identity(), &mut control));
        assert_relative_eq!(registry.get(b).unwrap().local_position(), Vec2::new(2.0, 0.0));
        assert!(!check_collision(&mut registry, a, a, &Mat3::identity(), &mut control));
    }

    #[test]
    fn test_legacy_sweep_skips_last_initiator() {
        let mut registry = ActorRegistry::<Planar>::new();
        let mut control = FrameControl::new();
        let a = spawn_refreshed(&mut registry, Vec2::new(0.0, 0.0), 1.0);
        let b = spawn_refreshed(&mut registry, Vec2::new(1.0, 0.0), 1.0);

        let dispatched = sweep(&mut registry, &[a, b], SweepMode::Legacy, &Mat3::identity(), &mut control);

        assert_eq!(dispatched, 1);
        assert_relative_eq!(registry.get(a).unwrap().local_position(), Vec2::new(0.0, 0.0));
        assert_relative_eq!(registry.get(b).unwrap().local_position(), Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_symmetric_sweep_checks_both_directions() {
        let mut registry = ActorRegistry::<Planar>::new();
        let mut control = FrameControl::new();
        let a = spawn_refreshed(&mut registry, Vec2::new(0.0, 0.0), 1.0);
        let b = spawn_refreshed(&mut registry, Vec2::new(1.0, 0.0), 1.0);

        let dispatched = sweep(&mut registry, &[a, b], SweepMode::Symmetric, &Mat3::identity(), &mut control);

        // Globals are not refreshed mid-sweep, so b still overlaps a when it is checked
        assert_eq!(dispatched, 2);
        assert_relative_eq!(registry.get(a).unwrap().local_position(), Vec2::new(-1.0, 0.0));
        assert_relative_eq!(registry.get(b).unwrap().local_position(), Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_sweep_over_empty_and_single() {
        let mut registry = ActorRegistry::<Planar>::new();
        let mut control = FrameControl::new();
        let a = spawn_refreshed(&mut registry, Vec2::zeros(), 1.0);

        assert_eq!(sweep(&mut registry, &[], SweepMode::Legacy, &Mat3::identity(), &mut control), 0);
        assert_eq!(sweep(&mut registry, &[a], SweepMode::Symmetric, &Mat3::identity(), &mut control), 0);
    }
}
