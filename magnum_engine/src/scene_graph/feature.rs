/// Features attached to scene graph objects.
///
/// A feature is user-supplied behavior bound to one object. It can ask the
/// scene to hand it the object's absolute transformation (or its inverse)
/// whenever the object goes from dirty to clean, and it is told when the
/// object becomes dirty. Drawing and animation are optional capabilities
/// exposed through `as_drawable_mut` and `as_animable_mut`.

use std::any::{type_name, Any};
use bitflags::bitflags;
use slotmap::new_key_type;
use crate::engine_trace;
use crate::error::{Error, Result};
use super::animable::Animable;
use super::drawable::Drawable;
use super::feature_group::GroupKey;
use super::object::ObjectKey;
use super::scene::Scene;
use super::transformation::{Transformation, TransformationMatrix};
use super::LOG_SOURCE;

new_key_type! {
    /// Stable key for a Feature within a Scene.
    ///
    /// Keys remain valid after other features are removed. Using a key of a
    /// removed feature yields `Error::StaleFeature`.
    pub struct FeatureKey;
}

bitflags! {
    /// Transformations a feature wants cached on every clean pass
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CachedTransformations: u8 {
        /// `Feature::clean` receives the absolute transformation matrix
        const ABSOLUTE = 1 << 0;
        /// `Feature::clean_inverted` receives the inverted absolute transformation matrix
        const INVERTED_ABSOLUTE = 1 << 1;
    }
}

/// Behavior attached to an object
///
/// `M` is the matrix type of the scene's transformation policy
/// (`Matrix3` for 2D scenes, `Matrix4` for 3D scenes).
///
/// # Example
///
/// ```no_run
/// use magnum_engine::magnum::scene_graph::{CachedTransformations, Feature};
/// use magnum_engine::magnum::math::Matrix4;
///
/// #[derive(Default)]
/// struct PositionTracker {
///     position: Option<Matrix4>,
/// }
///
/// impl Feature<Matrix4> for PositionTracker {
///     fn cached_transformations(&self) -> CachedTransformations {
///         CachedTransformations::ABSOLUTE
///     }
///
///     fn mark_dirty(&mut self) {
///         self.position = None;
///     }
///
///     fn clean(&mut self, absolute: &Matrix4) {
///         self.position = Some(*absolute);
///     }
/// }
/// ```
pub trait Feature<M: TransformationMatrix>: Any {
    /// Transformations requested when the feature is attached
    ///
    /// Can be changed later with [`Scene::set_cached_transformations`].
    fn cached_transformations(&self) -> CachedTransformations {
        CachedTransformations::empty()
    }

    /// The owning object became dirty
    fn mark_dirty(&mut self) {}

    /// The owning object was cleaned, `absolute` is its absolute transformation
    fn clean(&mut self, _absolute: &M) {}

    /// The owning object was cleaned, `inverted_absolute` is the inverse of
    /// its absolute transformation
    fn clean_inverted(&mut self, _inverted_absolute: &M) {}

    /// Drawing capability
    fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable<M>> {
        None
    }

    /// Animation capability
    fn as_animable(&self) -> Option<&dyn Animable> {
        None
    }

    fn as_animable_mut(&mut self) -> Option<&mut dyn Animable> {
        None
    }
}

/// Arena slot of a feature
pub(super) struct FeatureEntry<M: TransformationMatrix> {
    pub(super) object: ObjectKey,
    pub(super) cached: CachedTransformations,
    pub(super) group: Option<GroupKey>,
    pub(super) feature: Box<dyn Feature<M>>,
}

impl<T: Transformation> Scene<T> {
    // ===== FEATURE LIFECYCLE =====

    /// Attach a feature to an object
    ///
    /// The feature is appended to the object's feature list. Its cached
    /// transformations are taken from `Feature::cached_transformations`.
    ///
    /// # Arguments
    ///
    /// * `object` - Owning object
    /// * `feature` - Feature to attach
    ///
    /// # Returns
    ///
    /// Key of the new feature
    pub fn add_feature<F: Feature<T::Matrix>>(&mut self, object: ObjectKey, feature: F) -> Result<FeatureKey> {
        self.checked_object(object)?;
        let cached = feature.cached_transformations();
        let key = self.features.insert(FeatureEntry {
            object,
            cached,
            group: None,
            feature: Box::new(feature),
        });
        self.objects[object].features.push(key);
        engine_trace!(LOG_SOURCE, "Attached feature {:?} to object {:?}", key, object);
        Ok(key)
    }

    /// Attach a feature to an object and add it to a group
    ///
    /// Nothing is attached if the group rejects the feature.
    pub fn add_grouped_feature<F: Feature<T::Matrix>>(
        &mut self,
        object: ObjectKey,
        group: GroupKey,
        feature: F,
    ) -> Result<FeatureKey> {
        self.checked_group(group)?;
        let key = self.add_feature(object, feature)?;
        if let Err(error) = self.group_add(group, key) {
            self.remove_feature(key)?;
            return Err(error);
        }
        Ok(key)
    }

    /// Detach a feature from its object and group
    ///
    /// # Returns
    ///
    /// The detached feature
    pub fn remove_feature(&mut self, feature: FeatureKey) -> Result<Box<dyn Feature<T::Matrix>>> {
        self.checked_feature(feature)?;
        self.detach_from_group(feature);
        let entry = self
            .features
            .remove(feature)
            .ok_or_else(|| Error::StaleFeature(feature).logged(LOG_SOURCE))?;
        if let Some(object) = self.objects.get_mut(entry.object) {
            object.features.retain(|&key| key != feature);
        }
        engine_trace!(LOG_SOURCE, "Removed feature {:?} from object {:?}", feature, entry.object);
        Ok(entry.feature)
    }

    pub fn contains_feature(&self, feature: FeatureKey) -> bool {
        self.features.contains_key(feature)
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    // ===== TYPED ACCESS =====

    /// Borrow a feature as its concrete type
    pub fn feature<F: Feature<T::Matrix>>(&self, feature: FeatureKey) -> Result<&F> {
        let entry = self.checked_feature(feature)?;
        let any: &dyn Any = &*entry.feature;
        any.downcast_ref::<F>().ok_or_else(|| {
            Error::FeatureTypeMismatch { feature, expected: type_name::<F>() }.logged(LOG_SOURCE)
        })
    }

    /// Mutably borrow a feature as its concrete type
    pub fn feature_mut<F: Feature<T::Matrix>>(&mut self, feature: FeatureKey) -> Result<&mut F> {
        let entry = self.checked_feature_mut(feature)?;
        let any: &mut dyn Any = &mut *entry.feature;
        any.downcast_mut::<F>().ok_or_else(|| {
            Error::FeatureTypeMismatch { feature, expected: type_name::<F>() }.logged(LOG_SOURCE)
        })
    }

    /// Borrow a feature through its trait object
    pub fn feature_dyn(&self, feature: FeatureKey) -> Result<&dyn Feature<T::Matrix>> {
        Ok(&*self.checked_feature(feature)?.feature)
    }

    pub fn feature_dyn_mut(&mut self, feature: FeatureKey) -> Result<&mut dyn Feature<T::Matrix>> {
        Ok(&mut *self.checked_feature_mut(feature)?.feature)
    }

    // ===== FEATURE LISTS =====

    /// Features of an object in attachment order
    pub fn features(&self, object: ObjectKey) -> Result<&[FeatureKey]> {
        Ok(&self.checked_object(object)?.features)
    }

    pub fn first_feature(&self, object: ObjectKey) -> Result<Option<FeatureKey>> {
        Ok(self.checked_object(object)?.features.first().copied())
    }

    pub fn last_feature(&self, object: ObjectKey) -> Result<Option<FeatureKey>> {
        Ok(self.checked_object(object)?.features.last().copied())
    }

    /// Feature attached after `feature` on the same object
    pub fn next_feature(&self, feature: FeatureKey) -> Result<Option<FeatureKey>> {
        let siblings = &self.objects[self.checked_feature(feature)?.object].features;
        let index = siblings.iter().position(|&key| key == feature);
        Ok(index.and_then(|i| siblings.get(i + 1).copied()))
    }

    /// Feature attached before `feature` on the same object
    pub fn previous_feature(&self, feature: FeatureKey) -> Result<Option<FeatureKey>> {
        let siblings = &self.objects[self.checked_feature(feature)?.object].features;
        let index = siblings.iter().position(|&key| key == feature);
        Ok(index.and_then(|i| i.checked_sub(1)).and_then(|i| siblings.get(i).copied()))
    }

    /// Object a feature is attached to
    pub fn feature_object(&self, feature: FeatureKey) -> Result<ObjectKey> {
        Ok(self.checked_feature(feature)?.object)
    }

    // ===== CACHED TRANSFORMATIONS =====

    /// Change which transformations the feature receives on clean
    ///
    /// Takes effect on the next dirty to clean transition of the object.
    pub fn set_cached_transformations(
        &mut self,
        feature: FeatureKey,
        cached: CachedTransformations,
    ) -> Result<()> {
        self.checked_feature_mut(feature)?.cached = cached;
        Ok(())
    }

    pub fn cached_transformations(&self, feature: FeatureKey) -> Result<CachedTransformations> {
        Ok(self.checked_feature(feature)?.cached)
    }

    // ===== INTERNAL =====

    pub(super) fn checked_feature(&self, feature: FeatureKey) -> Result<&FeatureEntry<T::Matrix>> {
        self.features
            .get(feature)
            .ok_or_else(|| Error::StaleFeature(feature).logged(LOG_SOURCE))
    }

    pub(super) fn checked_feature_mut(&mut self, feature: FeatureKey) -> Result<&mut FeatureEntry<T::Matrix>> {
        self.features
            .get_mut(feature)
            .ok_or_else(|| Error::StaleFeature(feature).logged(LOG_SOURCE))
    }
}

#[cfg(test)]
#[path = "feature_tests.rs"]
mod tests;
