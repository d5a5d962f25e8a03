/// Scene: arena owning the transformation hierarchy.
///
/// All objects, features and feature groups of one scene live in slot map
/// arenas addressed by generation-checked keys. The root object is created
/// with the scene, is always clean and its transformation is always
/// identity.
///
/// Dirty tracking is lazy: changing an object's transformation marks its
/// whole subtree dirty, and absolute transformations are only recomputed
/// when an object is explicitly cleaned (or when a camera needs them).

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use crate::{engine_debug, engine_trace};
use crate::error::{Error, Result};
use super::feature::{CachedTransformations, FeatureEntry, FeatureKey};
use super::feature_group::{FeatureGroup, GroupKey};
use super::object::{Object, ObjectFlags, ObjectKey, ObjectMut};
use super::transformation::Transformation;
use super::LOG_SOURCE;

/// Transformation hierarchy with attached features
///
/// # Example
///
/// ```no_run
/// use magnum_engine::magnum::scene_graph::{MatrixTransformation3D, Scene};
/// use magnum_engine::magnum::math::Vector3;
///
/// let mut scene = Scene::<MatrixTransformation3D>::new();
/// let parent = scene.add_object(None)?;
/// let child = scene.add_object(Some(parent))?;
/// scene.object_mut(parent)?.translate(Vector3::new(1.0, 0.0, 0.0));
/// scene.set_clean(child)?;
/// assert!(!scene.is_dirty(child)?);
/// # Ok::<(), magnum_engine::magnum::Error>(())
/// ```
pub struct Scene<T: Transformation> {
    /// All objects, the root included
    pub(super) objects: SlotMap<ObjectKey, Object<T>>,
    /// All attached features
    pub(super) features: SlotMap<FeatureKey, FeatureEntry<T::Matrix>>,
    /// Feature groups
    pub(super) groups: SlotMap<GroupKey, FeatureGroup>,
    /// Root object
    pub(super) root: ObjectKey,
}

impl<T: Transformation> Default for Scene<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transformation> Scene<T> {
    /// Create an empty scene holding only its root
    pub fn new() -> Self {
        let mut objects = SlotMap::with_key();
        let root = objects.insert(Object::new_scene());
        engine_debug!(LOG_SOURCE, "Created scene with {} transformation", T::NAME);
        Self {
            objects,
            features: SlotMap::with_key(),
            groups: SlotMap::with_key(),
            root,
        }
    }

    /// Root object
    pub fn root(&self) -> ObjectKey {
        self.root
    }

    // ===== OBJECT LIFECYCLE =====

    /// Create an object
    ///
    /// # Arguments
    ///
    /// * `parent` - Parent object, `None` for a free-standing object
    ///
    /// # Returns
    ///
    /// Key of the new object, dirty and with identity transformation
    pub fn add_object(&mut self, parent: Option<ObjectKey>) -> Result<ObjectKey> {
        if let Some(parent) = parent {
            self.checked_object(parent)?;
        }
        let mut object = Object::new();
        object.parent = parent;
        let key = self.objects.insert(object);
        if let Some(parent) = parent {
            self.objects[parent].children.push(key);
        }
        engine_trace!(LOG_SOURCE, "Added object {:?} under {:?}", key, parent);
        Ok(key)
    }

    /// Create a child of `parent` and return a handle to it
    pub fn add_child(&mut self, parent: ObjectKey) -> Result<ObjectMut<'_, T>> {
        let key = self.add_object(Some(parent))?;
        Ok(ObjectMut::new(self, key))
    }

    /// Destroy an object
    ///
    /// The object is detached from its parent, its features are removed and
    /// its children become free-standing (and dirty).
    ///
    /// # Errors
    ///
    /// `Hierarchy` when removing the scene root.
    pub fn remove_object(&mut self, object: ObjectKey) -> Result<()> {
        let entry = self.checked_object(object)?;
        if entry.is_scene() {
            return Err(Error::Hierarchy(
                "Scene::remove_object(): can't remove the scene root".to_string(),
            ).logged(LOG_SOURCE));
        }
        let features = entry.features.clone();
        for feature in features {
            self.remove_feature(feature)?;
        }

        self.unlink_from_parent(object);
        engine_trace!(LOG_SOURCE, "Removing object {:?}", object);
        if let Some(removed) = self.objects.remove(object) {
            for child in removed.children {
                if let Some(child_object) = self.objects.get_mut(child) {
                    child_object.parent = None;
                }
                self.mark_subtree_dirty(child);
            }
        }
        Ok(())
    }

    /// Borrow an object
    pub fn object(&self, object: ObjectKey) -> Result<&Object<T>> {
        self.checked_object(object)
    }

    /// Mutable handle to an object
    pub fn object_mut(&mut self, object: ObjectKey) -> Result<ObjectMut<'_, T>> {
        self.checked_object(object)?;
        Ok(ObjectMut::new(self, object))
    }

    pub fn contains_object(&self, object: ObjectKey) -> bool {
        self.objects.contains_key(object)
    }

    /// Number of objects, the root included
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Local transformation of an object
    pub fn transformation(&self, object: ObjectKey) -> Result<T::DataType> {
        Ok(self.checked_object(object)?.transformation)
    }

    // ===== HIERARCHY =====

    pub fn parent(&self, object: ObjectKey) -> Result<Option<ObjectKey>> {
        Ok(self.checked_object(object)?.parent)
    }

    /// Children in insertion order
    pub fn children(&self, object: ObjectKey) -> Result<&[ObjectKey]> {
        Ok(&self.checked_object(object)?.children)
    }

    pub fn first_child(&self, object: ObjectKey) -> Result<Option<ObjectKey>> {
        Ok(self.checked_object(object)?.children.first().copied())
    }

    pub fn last_child(&self, object: ObjectKey) -> Result<Option<ObjectKey>> {
        Ok(self.checked_object(object)?.children.last().copied())
    }

    pub fn next_sibling(&self, object: ObjectKey) -> Result<Option<ObjectKey>> {
        let siblings = self.siblings(object)?;
        let index = siblings.iter().position(|&key| key == object);
        Ok(index.and_then(|i| siblings.get(i + 1).copied()))
    }

    pub fn previous_sibling(&self, object: ObjectKey) -> Result<Option<ObjectKey>> {
        let siblings = self.siblings(object)?;
        let index = siblings.iter().position(|&key| key == object);
        Ok(index.and_then(|i| i.checked_sub(1)).and_then(|i| siblings.get(i).copied()))
    }

    /// Re-parent an object
    ///
    /// The object is appended to the new parent's children and its subtree
    /// marked dirty. Setting the current parent again, or re-parenting the
    /// scene root, does nothing.
    ///
    /// # Errors
    ///
    /// `Hierarchy` if `parent` is the object itself or one of its descendants.
    pub fn set_parent(&mut self, object: ObjectKey, parent: Option<ObjectKey>) -> Result<()> {
        let entry = self.checked_object(object)?;
        if let Some(parent) = parent {
            self.checked_object(parent)?;
        }
        if entry.parent == parent || entry.is_scene() {
            return Ok(());
        }

        let mut ancestor = parent;
        while let Some(key) = ancestor {
            if key == object {
                return Err(Error::Hierarchy(format!(
                    "Object::set_parent(): can't make {:?} a child of itself or of its descendant {:?}",
                    object, parent
                )).logged(LOG_SOURCE));
            }
            ancestor = self.objects[key].parent;
        }

        self.unlink_from_parent(object);
        self.objects[object].parent = parent;
        if let Some(parent) = parent {
            self.objects[parent].children.push(object);
        }
        self.mark_subtree_dirty(object);
        Ok(())
    }

    /// Re-parent an object so that its absolute transformation is unchanged
    ///
    /// # Errors
    ///
    /// `Hierarchy` if the object and `parent` belong to different scenes,
    /// or if `parent` is the object itself or one of its descendants.
    pub fn set_parent_keep_transformation(&mut self, object: ObjectKey, parent: ObjectKey) -> Result<()> {
        if self.scene_of(object)? != self.scene_of(parent)? {
            return Err(Error::Hierarchy(
                "Object::set_parent_keep_transformation(): both parents must be in the same scene".to_string(),
            ).logged(LOG_SOURCE));
        }
        let relative = T::compose(
            &T::inverted(&self.compute_absolute(parent)),
            &self.compute_absolute(object),
        );
        self.set_parent(object, Some(parent))?;
        self.store_transformation(object, relative);
        Ok(())
    }

    /// Move an object within its parent's children
    ///
    /// # Arguments
    ///
    /// * `object` - Object to move
    /// * `before` - Sibling to insert in front of, `None` to move to the end
    pub fn move_before(&mut self, object: ObjectKey, before: Option<ObjectKey>) -> Result<()> {
        let parent = self.checked_object(object)?.parent;
        if let Some(before) = before {
            if self.checked_object(before)?.parent != parent || parent.is_none() {
                return Err(Error::Hierarchy(format!(
                    "Object::move(): {:?} is not a sibling of {:?}", before, object
                )).logged(LOG_SOURCE));
            }
        }
        let Some(parent) = parent else {
            return Ok(());
        };
        if before == Some(object) {
            return Ok(());
        }

        let children = &mut self.objects[parent].children;
        children.retain(|&key| key != object);
        let index = before
            .and_then(|before| children.iter().position(|&key| key == before))
            .unwrap_or(children.len());
        children.insert(index, object);
        Ok(())
    }

    /// Scene root at the top of an object's tree
    ///
    /// `None` for objects in a free-standing tree.
    pub fn scene_of(&self, object: ObjectKey) -> Result<Option<ObjectKey>> {
        self.checked_object(object)?;
        let top = self.top_of(object);
        Ok(self.objects[top].is_scene().then_some(top))
    }

    /// Whether an object is the scene root
    pub fn is_scene(&self, object: ObjectKey) -> Result<bool> {
        Ok(self.checked_object(object)?.is_scene())
    }

    // ===== DIRTY TRACKING =====

    /// Mark an object and all its descendants dirty
    pub fn set_dirty(&mut self, object: ObjectKey) -> Result<()> {
        self.checked_object(object)?;
        self.mark_subtree_dirty(object);
        Ok(())
    }

    pub fn is_dirty(&self, object: ObjectKey) -> Result<bool> {
        Ok(self.checked_object(object)?.is_dirty())
    }

    /// Recompute the cached absolute transformation of an object
    ///
    /// Dirty ancestors are cleaned too, top-down. Features receive their
    /// requested cached transformations once per dirty to clean transition.
    /// Cleaning a clean object does nothing.
    pub fn set_clean(&mut self, object: ObjectKey) -> Result<()> {
        self.checked_object(object)?;
        self.clean_object(object);
        Ok(())
    }

    /// Clean several objects, computing shared ancestors once
    pub fn set_clean_many(&mut self, objects: &[ObjectKey]) -> Result<()> {
        for &object in objects {
            self.checked_object(object)?;
        }
        for &object in objects {
            self.clean_object(object);
        }
        Ok(())
    }

    // ===== ABSOLUTE TRANSFORMATIONS =====

    /// Absolute transformation, computed from the hierarchy without
    /// touching the cache
    pub fn absolute_transformation(&self, object: ObjectKey) -> Result<T::DataType> {
        self.checked_object(object)?;
        Ok(self.compute_absolute(object))
    }

    pub fn absolute_transformation_matrix(&self, object: ObjectKey) -> Result<T::Matrix> {
        Ok(T::to_matrix(&self.absolute_transformation(object)?))
    }

    /// Absolute transformations of many objects at once
    ///
    /// Transformations of shared ancestors are computed only once. The
    /// cache is not used nor updated.
    ///
    /// # Arguments
    ///
    /// * `objects` - Objects of this scene
    /// * `initial` - Transformation applied above the scene root
    ///
    /// # Errors
    ///
    /// `Hierarchy` if an object is not part of this scene's tree.
    pub fn transformations(&self, objects: &[ObjectKey], initial: T::DataType) -> Result<Vec<T::DataType>> {
        let mut computed: FxHashMap<ObjectKey, T::DataType> = FxHashMap::default();
        computed.insert(self.root, T::compose(&initial, &self.objects[self.root].transformation));

        let mut path = Vec::new();
        let mut result = Vec::with_capacity(objects.len());
        for &object in objects {
            self.checked_object(object)?;

            // Walk up until an already computed ancestor
            path.clear();
            let mut current = object;
            let mut base = loop {
                if let Some(transformation) = computed.get(&current) {
                    break *transformation;
                }
                path.push(current);
                match self.objects[current].parent {
                    Some(parent) => current = parent,
                    None => {
                        return Err(Error::Hierarchy(format!(
                            "Object::transformations(): {:?} is not part of the scene", object
                        )).logged(LOG_SOURCE));
                    }
                }
            };

            for &key in path.iter().rev() {
                base = T::compose(&base, &self.objects[key].transformation);
                computed.insert(key, base);
            }
            result.push(base);
        }
        Ok(result)
    }

    /// Absolute transformation matrices of many objects at once
    ///
    /// See [`Scene::transformations`]. Fails also if `initial` is not
    /// representable by the transformation policy.
    pub fn transformation_matrices(&self, objects: &[ObjectKey], initial: T::Matrix) -> Result<Vec<T::Matrix>> {
        let initial = T::from_matrix(&initial)?;
        Ok(self
            .transformations(objects, initial)?
            .iter()
            .map(T::to_matrix)
            .collect())
    }

    // ===== INTERNAL =====

    pub(super) fn checked_object(&self, object: ObjectKey) -> Result<&Object<T>> {
        self.objects
            .get(object)
            .ok_or_else(|| Error::StaleObject(object).logged(LOG_SOURCE))
    }

    /// Store a local transformation and dirty the subtree
    ///
    /// Ignored on the scene root. `object` must be live.
    pub(super) fn store_transformation(&mut self, object: ObjectKey, transformation: T::DataType) {
        let entry = &mut self.objects[object];
        if entry.is_scene() {
            engine_trace!(LOG_SOURCE, "Ignoring transformation change of scene root {:?}", object);
            return;
        }
        entry.transformation = transformation;
        self.mark_subtree_dirty(object);
    }

    /// Absolute transformation from local transformations up the tree
    pub(super) fn compute_absolute(&self, object: ObjectKey) -> T::DataType {
        let mut absolute = self.objects[object].transformation;
        let mut current = self.objects[object].parent;
        while let Some(key) = current {
            let entry = &self.objects[key];
            absolute = T::compose(&entry.transformation, &absolute);
            current = entry.parent;
        }
        absolute
    }

    /// Mark the subtree of a live object dirty, notifying features
    pub(super) fn mark_subtree_dirty(&mut self, object: ObjectKey) {
        let mut stack = vec![object];
        while let Some(key) = stack.pop() {
            let Some(entry) = self.objects.get_mut(key) else {
                continue;
            };
            entry.flags.insert(ObjectFlags::DIRTY);
            for &feature in &entry.features {
                if let Some(feature) = self.features.get_mut(feature) {
                    feature.feature.mark_dirty();
                }
            }
            stack.extend(entry.children.iter().copied());
        }
    }

    /// Clean a live object and its dirty ancestors
    pub(super) fn clean_object(&mut self, object: ObjectKey) {
        if !self.objects[object].is_dirty() {
            return;
        }

        // Dirty chain from the object up to the first clean ancestor
        let mut path = Vec::new();
        let mut base = T::identity();
        let mut current = Some(object);
        while let Some(key) = current {
            let entry = &self.objects[key];
            if !entry.is_dirty() {
                base = entry.absolute_transformation;
                break;
            }
            path.push(key);
            current = entry.parent;
        }

        for key in path.into_iter().rev() {
            let entry = &mut self.objects[key];
            base = T::compose(&base, &entry.transformation);
            entry.absolute_transformation = base;
            entry.flags.remove(ObjectFlags::DIRTY);

            let mut absolute_matrix = None;
            let mut inverted_matrix = None;
            for &feature in &entry.features {
                let Some(feature) = self.features.get_mut(feature) else {
                    continue;
                };
                if feature.cached.contains(CachedTransformations::ABSOLUTE) {
                    let matrix = *absolute_matrix.get_or_insert_with(|| T::to_matrix(&base));
                    feature.feature.clean(&matrix);
                }
                if feature.cached.contains(CachedTransformations::INVERTED_ABSOLUTE) {
                    let matrix = *inverted_matrix.get_or_insert_with(|| T::to_matrix(&T::inverted(&base)));
                    feature.feature.clean_inverted(&matrix);
                }
            }
        }
    }

    fn top_of(&self, object: ObjectKey) -> ObjectKey {
        let mut current = object;
        while let Some(parent) = self.objects[current].parent {
            current = parent;
        }
        current
    }

    fn siblings(&self, object: ObjectKey) -> Result<&[ObjectKey]> {
        Ok(match self.checked_object(object)?.parent {
            Some(parent) => &self.objects[parent].children,
            None => &[],
        })
    }

    fn unlink_from_parent(&mut self, object: ObjectKey) {
        if let Some(parent) = self.objects[object].parent.take() {
            if let Some(parent) = self.objects.get_mut(parent) {
                parent.children.retain(|&key| key != object);
            }
        }
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
