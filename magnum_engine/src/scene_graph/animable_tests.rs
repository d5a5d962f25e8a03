//! Unit tests for animable.rs
//!
//! Tests the animation state machine driven by Scene::step_animables:
//! start, pause, resume and stop hooks, repeat handling and the running
//! count that lets idle groups skip their step.

use super::*;
use crate::math::Matrix4;
use crate::scene_graph::{Feature, MatrixTransformation3D};

type Scene3D = Scene<MatrixTransformation3D>;

// ============================================================================
// TEST HELPERS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Event {
    Started,
    Paused,
    Resumed,
    Stopped,
    Step(f32),
}

/// Animable recording hooks and step times
struct Recorder {
    animation: Animation,
    events: Vec<Event>,
}

impl Recorder {
    fn new(animation: Animation) -> Self {
        Self { animation, events: Vec::new() }
    }
}

impl Feature<Matrix4> for Recorder {
    fn as_animable(&self) -> Option<&dyn Animable> {
        Some(self)
    }

    fn as_animable_mut(&mut self) -> Option<&mut dyn Animable> {
        Some(self)
    }
}

impl Animable for Recorder {
    fn animation(&self) -> &Animation {
        &self.animation
    }

    fn animation_mut(&mut self) -> &mut Animation {
        &mut self.animation
    }

    fn animation_step(&mut self, time: f32, _delta: f32) {
        self.events.push(Event::Step(time));
    }

    fn animation_started(&mut self) {
        self.events.push(Event::Started);
    }

    fn animation_paused(&mut self) {
        self.events.push(Event::Paused);
    }

    fn animation_resumed(&mut self) {
        self.events.push(Event::Resumed);
    }

    fn animation_stopped(&mut self) {
        self.events.push(Event::Stopped);
    }
}

struct Plain;

impl Feature<Matrix4> for Plain {}

fn setup(animation: Animation) -> (Scene3D, GroupKey, FeatureKey) {
    let mut scene = Scene3D::new();
    let object = scene.add_object(Some(scene.root())).unwrap();
    let group = scene.add_group(FeatureGroupKind::Animables);
    let feature = scene
        .add_grouped_feature(object, group, Recorder::new(animation))
        .unwrap();
    (scene, group, feature)
}

fn events(scene: &Scene3D, feature: FeatureKey) -> Vec<Event> {
    scene.feature::<Recorder>(feature).unwrap().events.clone()
}

// ============================================================================
// ANIMATION
// ============================================================================

#[test]
fn test_animation_defaults() {
    let animation = Animation::default();
    assert_eq!(animation.state(), AnimationState::Stopped);
    assert_eq!(animation.previous_state(), AnimationState::Stopped);
    assert_eq!(animation.duration(), 0.0);
    assert!(!animation.is_repeated());
    assert_eq!(animation.repeat_count(), 0);
    assert_eq!(animation.repeats(), 0);
}

#[test]
fn test_pausing_stopped_animation_is_ignored() {
    let animation = Animation::new().with_state(AnimationState::Paused);
    assert_eq!(animation.state(), AnimationState::Stopped);

    let (mut scene, group, feature) = setup(Animation::new());
    scene.set_animation_state(feature, AnimationState::Paused).unwrap();
    assert_eq!(scene.animation(feature).unwrap().state(), AnimationState::Stopped);
    assert!(!scene.group(group).unwrap().is_woken_up());
}

// ============================================================================
// STEPPING
// ============================================================================

#[test]
fn test_idle_group_is_skipped() {
    let (mut scene, group, feature) = setup(Animation::new());

    scene.step_animables(group, 1.0, 0.5).unwrap();

    assert!(events(&scene, feature).is_empty());
    assert_eq!(scene.group(group).unwrap().running_count(), 0);
}

#[test]
fn test_start_and_step() {
    let (mut scene, group, feature) = setup(Animation::new());
    scene.set_animation_state(feature, AnimationState::Running).unwrap();
    assert!(scene.group(group).unwrap().is_woken_up());

    scene.step_animables(group, 1.0, 0.5).unwrap();
    assert_eq!(scene.group(group).unwrap().running_count(), 1);
    assert!(!scene.group(group).unwrap().is_woken_up());

    scene.step_animables(group, 3.0, 2.0).unwrap();
    assert_eq!(events(&scene, feature), vec![Event::Started, Event::Step(0.0), Event::Step(2.0)]);
    assert_eq!(scene.animation(feature).unwrap().previous_state(), AnimationState::Running);
}

#[test]
fn test_initial_running_state_wakes_group() {
    let (mut scene, group, feature) = setup(Animation::new().with_state(AnimationState::Running));
    assert!(scene.group(group).unwrap().is_woken_up());

    scene.step_animables(group, 2.0, 0.0).unwrap();
    assert_eq!(events(&scene, feature), vec![Event::Started, Event::Step(0.0)]);
}

#[test]
fn test_pause_and_resume() {
    let (mut scene, group, feature) = setup(Animation::new());
    scene.set_animation_state(feature, AnimationState::Running).unwrap();
    scene.step_animables(group, 1.0, 0.0).unwrap();

    scene.set_animation_state(feature, AnimationState::Paused).unwrap();
    scene.step_animables(group, 3.0, 2.0).unwrap();
    assert_eq!(scene.group(group).unwrap().running_count(), 0);

    // Nothing running, nothing pending
    scene.step_animables(group, 4.0, 1.0).unwrap();

    scene.set_animation_state(feature, AnimationState::Running).unwrap();
    scene.step_animables(group, 5.0, 1.0).unwrap();

    assert_eq!(events(&scene, feature), vec![
        Event::Started,
        Event::Step(0.0),
        Event::Paused,
        Event::Resumed,
        Event::Step(2.0),
    ]);
    assert_eq!(scene.group(group).unwrap().running_count(), 1);
}

#[test]
fn test_stop_while_running() {
    let (mut scene, group, feature) = setup(Animation::new());
    scene.set_animation_state(feature, AnimationState::Running).unwrap();
    scene.step_animables(group, 0.0, 0.0).unwrap();

    scene.set_animation_state(feature, AnimationState::Stopped).unwrap();
    scene.step_animables(group, 1.0, 1.0).unwrap();

    assert_eq!(events(&scene, feature), vec![Event::Started, Event::Step(0.0), Event::Stopped]);
    assert_eq!(scene.group(group).unwrap().running_count(), 0);
    assert_eq!(scene.animation(feature).unwrap().previous_state(), AnimationState::Stopped);
}

#[test]
fn test_duration_exceeded_stops() {
    let (mut scene, group, feature) = setup(Animation::new().with_duration(5.0));
    scene.set_animation_state(feature, AnimationState::Running).unwrap();

    scene.step_animables(group, 0.0, 0.0).unwrap();
    scene.step_animables(group, 4.0, 4.0).unwrap();
    scene.step_animables(group, 6.0, 2.0).unwrap();

    assert_eq!(events(&scene, feature), vec![
        Event::Started,
        Event::Step(0.0),
        Event::Step(4.0),
        Event::Stopped,
    ]);
    assert_eq!(scene.animation(feature).unwrap().state(), AnimationState::Stopped);
    assert_eq!(scene.group(group).unwrap().running_count(), 0);
}

#[test]
fn test_endless_repeat() {
    let animation = Animation::new().with_duration(10.0).with_repeated(true);
    let (mut scene, group, feature) = setup(animation);
    scene.set_animation_state(feature, AnimationState::Running).unwrap();

    scene.step_animables(group, 1.0, 0.0).unwrap();
    scene.step_animables(group, 11.5, 10.5).unwrap();
    scene.step_animables(group, 25.5, 14.0).unwrap();

    assert_eq!(events(&scene, feature), vec![
        Event::Started,
        Event::Step(0.0),
        Event::Step(0.5),
        Event::Step(4.5),
    ]);
    assert_eq!(scene.animation(feature).unwrap().repeats(), 2);
}

#[test]
fn test_repeat_count_limits_repeats() {
    let animation = Animation::new()
        .with_duration(10.0)
        .with_repeated(true)
        .with_repeat_count(2);
    let (mut scene, group, feature) = setup(animation);
    scene.set_animation_state(feature, AnimationState::Running).unwrap();

    scene.step_animables(group, 1.0, 0.0).unwrap();
    scene.step_animables(group, 11.5, 10.5).unwrap();
    scene.step_animables(group, 25.5, 14.0).unwrap();

    assert_eq!(events(&scene, feature), vec![
        Event::Started,
        Event::Step(0.0),
        Event::Step(0.5),
        Event::Stopped,
    ]);
    assert_eq!(scene.group(group).unwrap().running_count(), 0);
}

#[test]
fn test_endless_repeat_counter_wraps() {
    let animation = Animation::new().with_duration(1.0).with_repeated(true);
    let (mut scene, group, feature) = setup(animation);
    scene.set_animation_state(feature, AnimationState::Running).unwrap();

    scene.step_animables(group, 0.0, 0.0).unwrap();
    for step in 1..=70_000u32 {
        scene.step_animables(group, step as f32 * 1.5, 1.5).unwrap();
    }

    let animation = scene.animation(feature).unwrap();
    assert_eq!(animation.state(), AnimationState::Running);
    assert_eq!(animation.repeats(), (70_000u32 % 65_536) as u16);
    assert_eq!(scene.group(group).unwrap().running_count(), 1);
    assert!(!events(&scene, feature).contains(&Event::Stopped));
}

#[test]
fn test_restart_resets_time_and_repeats() {
    let animation = Animation::new().with_duration(10.0).with_repeated(true);
    let (mut scene, group, feature) = setup(animation);
    scene.set_animation_state(feature, AnimationState::Running).unwrap();
    scene.step_animables(group, 0.0, 0.0).unwrap();
    scene.step_animables(group, 12.0, 12.0).unwrap();
    assert_eq!(scene.animation(feature).unwrap().repeats(), 1);

    scene.set_animation_state(feature, AnimationState::Stopped).unwrap();
    scene.step_animables(group, 13.0, 1.0).unwrap();
    scene.set_animation_state(feature, AnimationState::Running).unwrap();
    scene.step_animables(group, 20.0, 7.0).unwrap();

    assert_eq!(scene.animation(feature).unwrap().repeats(), 0);
    assert_eq!(events(&scene, feature).last(), Some(&Event::Step(0.0)));
}

// ============================================================================
// GROUP BOOKKEEPING
// ============================================================================

#[test]
fn test_removing_running_animable_updates_count() {
    let (mut scene, group, feature) = setup(Animation::new());
    scene.set_animation_state(feature, AnimationState::Running).unwrap();
    scene.step_animables(group, 0.0, 0.0).unwrap();
    assert_eq!(scene.group(group).unwrap().running_count(), 1);

    scene.remove_feature(feature).unwrap();
    assert_eq!(scene.group(group).unwrap().running_count(), 0);
}

#[test]
fn test_moving_running_animable_moves_count() {
    let (mut scene, group, feature) = setup(Animation::new());
    let other = scene.add_group(FeatureGroupKind::Animables);
    scene.set_animation_state(feature, AnimationState::Running).unwrap();
    scene.step_animables(group, 0.0, 0.0).unwrap();

    scene.group_add(other, feature).unwrap();
    assert_eq!(scene.group(group).unwrap().running_count(), 0);
    assert_eq!(scene.group(other).unwrap().running_count(), 1);

    scene.step_animables(other, 2.0, 2.0).unwrap();
    assert_eq!(events(&scene, feature).last(), Some(&Event::Step(2.0)));
}

#[test]
fn test_non_animable_access_fails() {
    let mut scene = Scene3D::new();
    let object = scene.add_object(None).unwrap();
    let plain = scene.add_feature(object, Plain).unwrap();
    let generic = scene.add_group(FeatureGroupKind::Generic);

    assert!(matches!(scene.animation(plain), Err(Error::CapabilityMismatch(_))));
    assert!(matches!(
        scene.set_animation_state(plain, AnimationState::Running),
        Err(Error::CapabilityMismatch(_))
    ));
    assert!(matches!(scene.step_animables(generic, 0.0, 0.0), Err(Error::CapabilityMismatch(_))));
}
