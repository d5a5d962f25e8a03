/// Animables: features advanced in time by their feature group.
///
/// Each animable carries an [`Animation`] state machine. State changes
/// requested through [`Scene::set_animation_state`] take effect on the next
/// [`Scene::step_animables`] call, which fires the start, pause, resume and
/// stop hooks and drives `animation_step` with the time elapsed since the
/// animation started.

use crate::engine_trace;
use crate::error::{Error, Result};
use super::feature::FeatureKey;
use super::feature_group::{FeatureGroupKind, GroupKey};
use super::scene::Scene;
use super::transformation::Transformation;
use super::LOG_SOURCE;

/// Animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    /// Not running; starting again resets the animation time
    #[default]
    Stopped,
    /// Not running; resuming continues from the pause time
    Paused,
    Running,
}

/// Timing and state of an animable
///
/// # Example
///
/// ```
/// use magnum_engine::magnum::scene_graph::{Animation, AnimationState};
///
/// let animation = Animation::new()
///     .with_duration(10.0)
///     .with_repeated(true)
///     .with_repeat_count(3);
/// assert_eq!(animation.state(), AnimationState::Stopped);
/// assert_eq!(animation.repeat_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    /// Duration in seconds, `0.0` for endless
    duration: f32,
    pub(super) start_time: f32,
    pub(super) pause_time: f32,
    /// State seen by the last step
    pub(super) previous_state: AnimationState,
    /// Requested state
    pub(super) current_state: AnimationState,
    repeated: bool,
    /// `0` repeats forever
    repeat_count: u16,
    pub(super) repeats: u16,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation {
    /// Stopped, endless, non-repeated animation
    pub fn new() -> Self {
        Self {
            duration: 0.0,
            start_time: 0.0,
            pause_time: 0.0,
            previous_state: AnimationState::Stopped,
            current_state: AnimationState::Stopped,
            repeated: false,
            repeat_count: 0,
            repeats: 0,
        }
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_repeated(mut self, repeated: bool) -> Self {
        self.repeated = repeated;
        self
    }

    pub fn with_repeat_count(mut self, count: u16) -> Self {
        self.repeat_count = count;
        self
    }

    /// Initial requested state, processed by the first step
    pub fn with_state(mut self, state: AnimationState) -> Self {
        self.request_state(state);
        self
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: f32) -> &mut Self {
        self.duration = duration;
        self
    }

    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    pub fn set_repeated(&mut self, repeated: bool) -> &mut Self {
        self.repeated = repeated;
        self
    }

    pub fn repeat_count(&self) -> u16 {
        self.repeat_count
    }

    pub fn set_repeat_count(&mut self, count: u16) -> &mut Self {
        self.repeat_count = count;
        self
    }

    /// Requested state
    pub fn state(&self) -> AnimationState {
        self.current_state
    }

    /// State at the end of the last step
    pub fn previous_state(&self) -> AnimationState {
        self.previous_state
    }

    /// Completed repeats since the animation started
    pub fn repeats(&self) -> u16 {
        self.repeats
    }

    /// Request a state change, returns whether anything changed
    ///
    /// Pausing an animation that was never started is ignored.
    pub(super) fn request_state(&mut self, state: AnimationState) -> bool {
        if self.current_state == state {
            return false;
        }
        if self.previous_state == AnimationState::Stopped && state == AnimationState::Paused {
            return false;
        }
        self.current_state = state;
        true
    }
}

/// Feature capability advanced by [`Scene::step_animables`]
///
/// Implementors also implement `Feature` and return `Some(self)` from
/// `as_animable` and `as_animable_mut`.
pub trait Animable {
    fn animation(&self) -> &Animation;

    /// Timing configuration; state changes go through [`Scene::set_animation_state`]
    fn animation_mut(&mut self) -> &mut Animation;

    /// Advance the animation
    ///
    /// # Arguments
    ///
    /// * `time` - Time since the animation started, repeats excluded
    /// * `delta` - Time since the previous step
    fn animation_step(&mut self, time: f32, delta: f32);

    fn animation_started(&mut self) {}

    fn animation_paused(&mut self) {}

    fn animation_resumed(&mut self) {}

    fn animation_stopped(&mut self) {}
}

impl<T: Transformation> Scene<T> {
    /// Animation of an animable feature
    pub fn animation(&self, feature: FeatureKey) -> Result<&Animation> {
        let entry = self.checked_feature(feature)?;
        entry
            .feature
            .as_animable()
            .map(|animable| animable.animation())
            .ok_or_else(|| not_animable(feature))
    }

    /// Request an animation state change
    ///
    /// The change is processed by the next [`Scene::step_animables`] of the
    /// feature's group, which is woken up so that the step is not skipped.
    pub fn set_animation_state(&mut self, feature: FeatureKey, state: AnimationState) -> Result<()> {
        let entry = self.checked_feature_mut(feature)?;
        let group = entry.group;
        let animable = entry.feature.as_animable_mut().ok_or_else(|| not_animable(feature))?;
        if !animable.animation_mut().request_state(state) {
            return Ok(());
        }
        engine_trace!(LOG_SOURCE, "Animable {:?} requested state {:?}", feature, state);
        if let Some(group) = group.and_then(|group| self.groups.get_mut(group)) {
            group.wake_up = true;
        }
        Ok(())
    }

    /// Step all animables of a group
    ///
    /// Does nothing if no animation is running and no state change is
    /// pending.
    ///
    /// # Arguments
    ///
    /// * `group` - Group of kind `Animables`
    /// * `time` - Absolute time of this frame
    /// * `delta` - Time since the previous frame
    pub fn step_animables(&mut self, group: GroupKey, time: f32, delta: f32) -> Result<()> {
        let group_entry = self.checked_group_mut(group)?;
        if group_entry.kind() != FeatureGroupKind::Animables {
            return Err(Error::CapabilityMismatch(format!(
                "AnimableGroup::step(): group {:?} is a group of {:?}", group, group_entry.kind()
            )).logged(LOG_SOURCE));
        }
        if group_entry.running_count == 0 && !group_entry.wake_up {
            return Ok(());
        }
        group_entry.wake_up = false;

        let mut running_count = group_entry.running_count;
        let members = group_entry.features().to_vec();
        for feature in members {
            let Some(animable) = self
                .features
                .get_mut(feature)
                .and_then(|entry| entry.feature.as_animable_mut())
            else {
                continue;
            };
            step_animable(animable, time, delta, &mut running_count);
        }
        self.groups[group].running_count = running_count;
        Ok(())
    }
}

fn step_animable(animable: &mut dyn Animable, time: f32, delta: f32, running_count: &mut usize) {
    use AnimationState::*;

    let animation = animable.animation_mut();
    match (animation.previous_state, animation.current_state) {
        // Stopped since the last step
        (Running | Paused, Stopped) => {
            if animation.previous_state == Running {
                *running_count -= 1;
            }
            animation.previous_state = Stopped;
            animable.animation_stopped();
            return;
        }
        // Paused since the last step
        (Running, Paused) => {
            animation.previous_state = Paused;
            animation.pause_time = time;
            *running_count -= 1;
            animable.animation_paused();
            return;
        }
        (_, Stopped | Paused) => return,
        // Started since the last step
        (Stopped, Running) => {
            animation.previous_state = Running;
            animation.start_time = time;
            animation.repeats = 0;
            *running_count += 1;
            animable.animation_started();
        }
        // Resumed since the last step
        (Paused, Running) => {
            animation.previous_state = Running;
            animation.start_time += time - animation.pause_time;
            *running_count += 1;
            animable.animation_resumed();
        }
        (Running, Running) => {}
    }

    let animation = animable.animation_mut();
    if animation.duration != 0.0 && time - animation.start_time > animation.duration {
        let last_repeat = animation.repeat_count != 0 && animation.repeats.wrapping_add(1) == animation.repeat_count;
        if !animation.repeated || last_repeat {
            animation.previous_state = Stopped;
            animation.current_state = Stopped;
            *running_count -= 1;
            animable.animation_stopped();
            return;
        }
        // Endless repeats wrap the counter
        animation.repeats = animation.repeats.wrapping_add(1);
        animation.start_time += animation.duration;
    }

    let elapsed = time - animation.start_time;
    animable.animation_step(elapsed, delta);
}

fn not_animable(feature: FeatureKey) -> Error {
    Error::CapabilityMismatch(format!("feature {:?} is not an animable", feature)).logged(LOG_SOURCE)
}

#[cfg(test)]
#[path = "animable_tests.rs"]
mod tests;
