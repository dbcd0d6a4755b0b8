//! Scene update, removal, sharing, and collision behavior end to end

use crate::foundation::collections::ActorId;
use crate::foundation::math::{constants::HALF_PI, Mat3, Mat3Ext, Mat4, Vec2, Vec3};
use crate::scene::{
    Actor, ActorContext, ActorRegistry, Behavior, FrameControl, Planar, RecordingRenderer, Scene,
    SceneCommand, SceneConfig, SceneError, Spatial, SweepMode,
};
use approx::assert_relative_eq;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct HookCounts {
    starts: Rc<Cell<u32>>,
    ends: Rc<Cell<u32>>,
    updates: Rc<Cell<u32>>,
}

impl Behavior<Planar> for HookCounts {
    fn start(&mut self, _actor: &mut Actor<Planar>) {
        self.starts.set(self.starts.get() + 1);
    }

    fn update(&mut self, ctx: &mut ActorContext<'_, Planar>, delta_time: f32) {
        self.updates.set(self.updates.get() + 1);
        ctx.integrate(delta_time);
    }

    fn end(&mut self, _actor: &mut Actor<Planar>) {
        self.ends.set(self.ends.get() + 1);
    }
}

fn planar_scene(mode: SweepMode) -> Scene<Planar> {
    Scene::with_config(SceneConfig { sweep_mode: mode, ..SceneConfig::default() })
}

#[test]
fn test_single_frame_moves_local_but_not_global() {
    let mut actors = ActorRegistry::<Planar>::new();
    let mut control = FrameControl::new();
    let mut scene = Scene::new();
    let id = actors.spawn(Actor::new(Vec2::zeros()).with_velocity(Vec2::new(1.0, 0.0)));
    scene.add_actor(id);

    let report = scene.update(&mut actors, 1.0, &mut control);

    let actor = actors.get(id).unwrap();
    assert_eq!(report.updated, 1);
    assert_relative_eq!(actor.local_position(), Vec2::new(1.0, 0.0));
    assert_relative_eq!(actor.global_position(), Vec2::new(0.0, 0.0));
    assert_relative_eq!(actor.forward(), Vec2::new(1.0, 0.0), epsilon = 1e-6);

    scene.update(&mut actors, 1.0, &mut control);
    let actor = actors.get(id).unwrap();
    assert_relative_eq!(actor.global_position(), Vec2::new(1.0, 0.0));
    assert_relative_eq!(actor.local_position(), Vec2::new(2.0, 0.0));
}

#[test]
fn test_world_transform_offsets_roots() {
    let mut actors = ActorRegistry::<Planar>::new();
    let mut control = FrameControl::new();
    let mut scene = Scene::new().with_world(Mat3::create_translation(Vec2::new(10.0, 0.0)));
    let id = actors.spawn(Actor::new(Vec2::new(1.0, 1.0)));
    scene.add_actor(id);

    scene.update(&mut actors, 0.5, &mut control);

    assert_relative_eq!(actors.get(id).unwrap().global_position(), Vec2::new(11.0, 1.0));
}

#[test]
fn test_actors_start_lazily_once() {
    let hooks = HookCounts::default();
    let mut actors = ActorRegistry::<Planar>::new();
    let mut control = FrameControl::new();
    let mut scene = Scene::new();
    let id = actors.spawn(Actor::new(Vec2::zeros()).with_behavior(hooks.clone()));
    scene.add_actor(id);

    assert_eq!(hooks.starts.get(), 0);
    for _ in 0..3 {
        scene.update(&mut actors, 0.1, &mut control);
    }

    assert_eq!(hooks.starts.get(), 1);
    assert_eq!(hooks.updates.get(), 3);
}

#[test]
fn test_removal_ends_started_actor_exactly_once() {
    let hooks = HookCounts::default();
    let mut actors = ActorRegistry::<Planar>::new();
    let mut control = FrameControl::new();
    let mut scene = Scene::new();
    let id = actors.spawn(Actor::new(Vec2::zeros()).with_behavior(hooks.clone()));
    scene.add_actor(id);
    scene.update(&mut actors, 0.1, &mut control);

    scene.remove_actor(&mut actors, id).unwrap();
    assert_eq!(scene.remove_actor(&mut actors, id), Err(SceneError::NotInScene(id)));

    assert_eq!(hooks.ends.get(), 1);
    assert!(scene.is_empty());
    assert!(actors.contains(id));
}

#[test]
fn test_removing_unstarted_actor_skips_end() {
    let hooks = HookCounts::default();
    let mut actors = ActorRegistry::<Planar>::new();
    let mut scene = Scene::new();
    let id = actors.spawn(Actor::new(Vec2::zeros()).with_behavior(hooks.clone()));
    scene.add_actor(id);

    assert_eq!(scene.remove_actor_at(&mut actors, 0), Ok(id));
    assert_eq!(hooks.ends.get(), 0);
}

#[test]
fn test_index_lookups() {
    let mut actors = ActorRegistry::<Planar>::new();
    let mut scene = Scene::new();
    let first = actors.spawn(Actor::new(Vec2::zeros()));
    let second = actors.spawn(Actor::new(Vec2::zeros()));
    scene.add_actor(first);
    scene.add_actor(second);

    assert!(!scene.add_actor(first));
    assert_eq!(scene.len(), 2);
    assert_eq!(scene.actor_at(1), Some(second));
    assert_eq!(scene.actor_at(2), None);
    assert_eq!(
        scene.remove_actor_at(&mut actors, 5),
        Err(SceneError::IndexOutOfRange { index: 5, len: 2 })
    );
}

#[test]
fn test_removal_detaches_children() {
    let mut actors = ActorRegistry::<Planar>::new();
    let mut scene = Scene::new();
    let parent = actors.spawn(Actor::new(Vec2::zeros()));
    let child = actors.spawn(Actor::new(Vec2::new(1.0, 0.0)));
    actors.add_child(parent, child).unwrap();
    scene.add_actor(parent);
    scene.add_actor(child);

    scene.remove_actor(&mut actors, parent).unwrap();

    assert!(actors.get(child).unwrap().parent().is_none());
    assert!(actors.get(parent).unwrap().children().is_empty());
    assert!(scene.contains(child));
}

#[test]
fn test_shared_actor_is_visible_from_both_scenes() {
    let mut actors = ActorRegistry::<Planar>::new();
    let mut control = FrameControl::new();
    let mut first = Scene::new();
    let mut second = Scene::new();
    let id = actors.spawn(Actor::new(Vec2::zeros()).with_velocity(Vec2::new(0.0, 2.0)));
    first.add_actor(id);
    second.add_actor(id);

    first.update(&mut actors, 1.0, &mut control);

    let seen_from_second = second.views(&actors);
    assert_eq!(seen_from_second.len(), 1);
    assert_eq!(seen_from_second[0].id, id);
    assert_relative_eq!(actors.get(id).unwrap().local_position(), Vec2::new(0.0, 2.0));
}

#[test]
fn test_despawned_actor_is_pruned_from_scene() {
    let mut actors = ActorRegistry::<Planar>::new();
    let mut control = FrameControl::new();
    let mut scene = Scene::new();
    let keep = actors.spawn(Actor::new(Vec2::zeros()));
    let gone = actors.spawn(Actor::new(Vec2::zeros()));
    scene.add_actor(keep);
    scene.add_actor(gone);

    actors.despawn(gone).unwrap();
    let report = scene.update(&mut actors, 0.1, &mut control);

    assert_eq!(report.updated, 1);
    assert_eq!(scene.actors(), &[keep]);
}

#[test]
fn test_legacy_sweep_pushes_only_the_later_actor() {
    let mut actors = ActorRegistry::<Planar>::new();
    let mut control = FrameControl::new();
    let mut scene = planar_scene(SweepMode::Legacy);
    let a = actors.spawn(Actor::new(Vec2::new(0.0, 0.0)).with_radius(1.0));
    let b = actors.spawn(Actor::new(Vec2::new(1.0, 0.0)).with_radius(1.0));
    scene.add_actor(a);
    scene.add_actor(b);

    let report = scene.update(&mut actors, 0.0, &mut control);

    assert_eq!(report.collisions, 1);
    assert_relative_eq!(actors.get(a).unwrap().local_position(), Vec2::new(0.0, 0.0));
    assert_relative_eq!(actors.get(b).unwrap().local_position(), Vec2::new(2.0, 0.0));
}

#[test]
fn test_symmetric_sweep_pushes_both_actors() {
    let mut actors = ActorRegistry::<Planar>::new();
    let mut control = FrameControl::new();
    let mut scene = planar_scene(SweepMode::Symmetric);
    let a = actors.spawn(Actor::new(Vec2::new(0.0, 0.0)).with_radius(1.0));
    let b = actors.spawn(Actor::new(Vec2::new(1.0, 0.0)).with_radius(1.0));
    scene.add_actor(a);
    scene.add_actor(b);

    let report = scene.update(&mut actors, 0.0, &mut control);

    assert_eq!(report.collisions, 2);
    assert_relative_eq!(actors.get(a).unwrap().local_position(), Vec2::new(-1.0, 0.0));
    assert_relative_eq!(actors.get(b).unwrap().local_position(), Vec2::new(2.0, 0.0));
}

#[test]
fn test_touching_default_radii_do_not_collide() {
    let mut actors = ActorRegistry::<Planar>::new();
    let mut control = FrameControl::new();
    let mut scene = planar_scene(SweepMode::Symmetric);
    let a = actors.spawn(Actor::new(Vec2::new(0.0, 0.0)));
    let b = actors.spawn(Actor::new(Vec2::new(1.0, 0.0)));
    scene.add_actor(a);
    scene.add_actor(b);

    assert_eq!(scene.update(&mut actors, 0.0, &mut control).collisions, 0);
}

struct SelfRemover {
    replacement: ActorId,
}

impl Behavior<Planar> for SelfRemover {
    fn update(&mut self, ctx: &mut ActorContext<'_, Planar>, delta_time: f32) {
        ctx.integrate(delta_time);
        ctx.queue(SceneCommand::Remove(ctx.id()));
        ctx.queue(SceneCommand::Add(self.replacement));
    }
}

#[test]
fn test_commands_apply_after_the_frame() {
    let hooks = HookCounts::default();
    let mut actors = ActorRegistry::<Planar>::new();
    let mut control = FrameControl::new();
    let mut scene = Scene::new();
    let replacement = actors.spawn(Actor::new(Vec2::zeros()).with_behavior(hooks.clone()));
    let remover = actors.spawn(Actor::new(Vec2::new(5.0, 0.0)).with_behavior(SelfRemover { replacement }));
    let bystander = actors.spawn(Actor::new(Vec2::new(-5.0, 0.0)));
    scene.add_actor(remover);
    scene.add_actor(bystander);

    let report = scene.update(&mut actors, 0.1, &mut control);

    assert_eq!(report.updated, 2);
    assert_eq!(report.commands_applied, 2);
    assert_eq!(scene.actors(), &[bystander, replacement]);
    assert!(!actors.get(remover).unwrap().is_started());
    assert_eq!(hooks.starts.get(), 0);
    assert!(control.pending_commands().is_empty());

    scene.update(&mut actors, 0.1, &mut control);
    assert_eq!(hooks.starts.get(), 1);
}

#[test]
fn test_invalid_commands_are_dropped() {
    let mut actors = ActorRegistry::<Planar>::new();
    let mut control = FrameControl::new();
    let mut scene = Scene::new();
    let stranger = actors.spawn(Actor::new(Vec2::zeros()));
    let dead = actors.spawn(Actor::new(Vec2::zeros()));
    actors.despawn(dead).unwrap();

    control.queue(SceneCommand::Remove(stranger));
    control.queue(SceneCommand::Add(dead));
    let report = scene.update(&mut actors, 0.1, &mut control);

    assert_eq!(report.commands_applied, 0);
    assert!(scene.is_empty());
}

struct StopOnContact;

impl Behavior<Planar> for StopOnContact {
    fn on_collision(&mut self, ctx: &mut ActorContext<'_, Planar>, other: ActorId) {
        ctx.push_apart(other);
        ctx.request_stop();
    }
}

#[test]
fn test_collision_hook_can_request_stop() {
    let mut actors = ActorRegistry::<Planar>::new();
    let mut control = FrameControl::new();
    let mut scene = Scene::new();
    let goal = actors.spawn(Actor::new(Vec2::zeros()).with_behavior(StopOnContact));
    let player = actors.spawn(Actor::new(Vec2::new(0.5, 0.0)));
    scene.add_actor(goal);
    scene.add_actor(player);

    scene.update(&mut actors, 0.0, &mut control);

    assert!(control.stop_requested());
    assert_relative_eq!(actors.get(player).unwrap().local_position(), Vec2::new(1.5, 0.0));
}

#[test]
fn test_end_ends_started_actors_and_draw_reports_views() {
    let hooks = HookCounts::default();
    let mut actors = ActorRegistry::<Planar>::new();
    let mut control = FrameControl::new();
    let mut scene = Scene::new();
    let first = actors.spawn(Actor::new(Vec2::new(1.0, 0.0)).with_behavior(hooks.clone()));
    let second = actors.spawn(Actor::new(Vec2::new(2.0, 0.0)));
    scene.add_actor(first);
    scene.add_actor(second);
    scene.start();
    scene.update(&mut actors, 0.0, &mut control);

    let mut renderer = RecordingRenderer::new();
    scene.draw(&actors, &mut renderer);
    let ids: Vec<_> = renderer.last_frame().iter().map(|view| view.id).collect();
    assert_eq!(ids, vec![first, second]);
    assert_eq!(renderer.frames_drawn(), 1);

    scene.end(&mut actors);
    assert!(!scene.is_started());
    assert_eq!(hooks.ends.get(), 1);
    assert!(!actors.get(second).unwrap().is_started());
}

#[test]
fn test_spatial_scene_uses_same_rules() {
    let mut actors = ActorRegistry::<Spatial>::new();
    let mut control = FrameControl::new();
    let mut scene = Scene::<Spatial>::new().with_world(Mat4::identity());
    let id = actors.spawn(Actor::new(Vec3::new(0.0, 0.0, 1.0)).with_velocity(Vec3::new(0.0, 1.0, 0.0)));
    scene.add_actor(id);

    scene.update(&mut actors, 2.0, &mut control);

    let actor = actors.get(id).unwrap();
    assert_relative_eq!(actor.local_position(), Vec3::new(0.0, 2.0, 1.0), epsilon = 1e-6);
    assert_relative_eq!(actor.global_position(), Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    assert_relative_eq!(actor.forward(), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
}

#[test]
fn test_spatial_motion_along_z_keeps_caller_rotation() {
    let mut actors = ActorRegistry::<Spatial>::new();
    let mut control = FrameControl::new();
    let mut scene = Scene::<Spatial>::new();
    let mut actor = Actor::<Spatial>::new(Vec3::zeros()).with_velocity(Vec3::new(0.0, 0.0, 1.0));
    actor.transform_mut().set_rotation_y(HALF_PI);
    let id = actors.spawn(actor);
    scene.add_actor(id);

    scene.update(&mut actors, 1.0, &mut control);
    scene.update(&mut actors, 1.0, &mut control);

    let actor = actors.get(id).unwrap();
    assert_relative_eq!(actor.forward(), Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    assert_relative_eq!(actor.local_position(), Vec3::new(0.0, 0.0, 2.0), epsilon = 1e-6);
    assert_relative_eq!(actor.global_position(), Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
}

#[test]
fn test_update_starts_scene_again_after_end() {
    let hooks = HookCounts::default();
    let mut actors = ActorRegistry::<Planar>::new();
    let mut control = FrameControl::new();
    let mut scene = Scene::new();
    let id = actors.spawn(Actor::new(Vec2::zeros()).with_behavior(hooks.clone()));
    scene.add_actor(id);

    scene.update(&mut actors, 0.1, &mut control);
    assert!(scene.is_started());

    scene.end(&mut actors);
    assert!(!scene.is_started());
    assert_eq!(hooks.ends.get(), 1);

    scene.update(&mut actors, 0.1, &mut control);
    assert!(scene.is_started());
    assert!(actors.get(id).unwrap().is_started());
    assert_eq!(hooks.starts.get(), 2);
}
