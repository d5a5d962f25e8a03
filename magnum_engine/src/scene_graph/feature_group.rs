/// Feature groups.
///
/// A group is an ordered collection of features that are processed
/// together: drawables rendered by a camera, animables stepped each frame.
/// A feature belongs to at most one group at a time.

use slotmap::new_key_type;
use crate::{engine_debug, engine_trace};
use crate::error::{Error, Result};
use super::animable::AnimationState;
use super::feature::FeatureKey;
use super::scene::Scene;
use super::transformation::Transformation;
use super::LOG_SOURCE;

new_key_type! {
    /// Stable key for a FeatureGroup within a Scene.
    pub struct GroupKey;
}

/// Capability required from group members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FeatureGroupKind {
    /// Any feature
    #[default]
    Generic,
    /// Features implementing `Drawable`
    Drawables,
    /// Features implementing `Animable`
    Animables,
}

/// Ordered collection of features
#[derive(Debug, Clone, Default)]
pub struct FeatureGroup {
    kind: FeatureGroupKind,
    /// Members in insertion order
    features: Vec<FeatureKey>,
    /// Animables counted as running by the last step
    pub(super) running_count: usize,
    /// Forces the next step even when nothing is running
    pub(super) wake_up: bool,
}

impl FeatureGroup {
    pub(super) fn new(kind: FeatureGroupKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> FeatureGroupKind {
        self.kind
    }

    /// Members in insertion order
    pub fn features(&self) -> &[FeatureKey] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn contains(&self, feature: FeatureKey) -> bool {
        self.features.contains(&feature)
    }

    /// Number of animables that were running after the last step
    pub fn running_count(&self) -> usize {
        self.running_count
    }

    /// Whether the next step is forced to process members
    pub fn is_woken_up(&self) -> bool {
        self.wake_up
    }
}

impl<T: Transformation> Scene<T> {
    /// Create an empty group
    pub fn add_group(&mut self, kind: FeatureGroupKind) -> GroupKey {
        let key = self.groups.insert(FeatureGroup::new(kind));
        engine_trace!(LOG_SOURCE, "Added {:?} group {:?}", kind, key);
        key
    }

    /// Remove a group
    ///
    /// Members stay attached to their objects and become ungrouped.
    pub fn remove_group(&mut self, group: GroupKey) -> Result<FeatureGroup> {
        let removed = self
            .groups
            .remove(group)
            .ok_or_else(|| Error::StaleGroup(group).logged(LOG_SOURCE))?;
        for &feature in &removed.features {
            if let Some(entry) = self.features.get_mut(feature) {
                entry.group = None;
            }
        }
        engine_trace!(LOG_SOURCE, "Removed group {:?} with {} features", group, removed.len());
        Ok(removed)
    }

    pub fn group(&self, group: GroupKey) -> Result<&FeatureGroup> {
        self.checked_group(group)
    }

    pub fn contains_group(&self, group: GroupKey) -> bool {
        self.groups.contains_key(group)
    }

    /// Add a feature to a group
    ///
    /// A feature in another group is moved out of it first. Adding a feature
    /// to the group it already belongs to does nothing.
    ///
    /// # Errors
    ///
    /// `CapabilityMismatch` if the feature lacks the capability the group
    /// kind requires.
    pub fn group_add(&mut self, group: GroupKey, feature: FeatureKey) -> Result<()> {
        let kind = self.checked_group(group)?.kind;
        let entry = self.checked_feature_mut(feature)?;
        if entry.group == Some(group) {
            return Ok(());
        }

        let capable = match kind {
            FeatureGroupKind::Generic => true,
            FeatureGroupKind::Drawables => entry.feature.as_drawable_mut().is_some(),
            FeatureGroupKind::Animables => entry.feature.as_animable().is_some(),
        };
        if !capable {
            return Err(Error::CapabilityMismatch(format!(
                "FeatureGroup::add(): feature {:?} can't be added to a group of {:?}", feature, kind
            )).logged(LOG_SOURCE));
        }

        let (previous, current) = entry
            .feature
            .as_animable()
            .map(|animable| (animable.animation().previous_state(), animable.animation().state()))
            .unwrap_or((AnimationState::Stopped, AnimationState::Stopped));

        if entry.group.is_some() {
            engine_debug!(LOG_SOURCE, "Moving feature {:?} to group {:?}", feature, group);
            self.detach_from_group(feature);
        }

        if let Some(entry) = self.features.get_mut(feature) {
            entry.group = Some(group);
        }
        let target = &mut self.groups[group];
        target.features.push(feature);
        if kind == FeatureGroupKind::Animables {
            if previous == AnimationState::Running {
                target.running_count += 1;
            }
            if previous != current {
                target.wake_up = true;
            }
        }
        Ok(())
    }

    /// Remove a feature from a group
    ///
    /// The feature stays attached to its object.
    ///
    /// # Errors
    ///
    /// `NotInGroup` if the feature is not a member of `group`.
    pub fn group_remove(&mut self, group: GroupKey, feature: FeatureKey) -> Result<()> {
        self.checked_group(group)?;
        if self.checked_feature(feature)?.group != Some(group) {
            return Err(Error::NotInGroup { feature, group }.logged(LOG_SOURCE));
        }
        self.detach_from_group(feature);
        Ok(())
    }

    /// Group a feature belongs to
    pub fn feature_group(&self, feature: FeatureKey) -> Result<Option<GroupKey>> {
        Ok(self.checked_feature(feature)?.group)
    }

    pub(super) fn checked_group(&self, group: GroupKey) -> Result<&FeatureGroup> {
        self.groups
            .get(group)
            .ok_or_else(|| Error::StaleGroup(group).logged(LOG_SOURCE))
    }

    pub(super) fn checked_group_mut(&mut self, group: GroupKey) -> Result<&mut FeatureGroup> {
        self.groups
            .get_mut(group)
            .ok_or_else(|| Error::StaleGroup(group).logged(LOG_SOURCE))
    }

    /// Take a feature out of its group, keeping the running count in sync
    pub(super) fn detach_from_group(&mut self, feature: FeatureKey) {
        let Some(entry) = self.features.get_mut(feature) else {
            return;
        };
        let Some(group) = entry.group.take() else {
            return;
        };
        let counted = entry
            .feature
            .as_animable()
            .is_some_and(|animable| animable.animation().previous_state() == AnimationState::Running);

        if let Some(group) = self.groups.get_mut(group) {
            group.features.retain(|&key| key != feature);
            if counted && group.kind == FeatureGroupKind::Animables {
                group.running_count = group.running_count.saturating_sub(1);
            }
        }
    }
}

#[cfg(test)]
#[path = "feature_group_tests.rs"]
mod tests;
