/// Scene graph objects and the mutable object handle.
///
/// An object stores its local transformation relative to its parent and a
/// cached absolute transformation that is valid only while the object is
/// clean. Objects live in the arena of their `Scene` and are addressed by
/// `ObjectKey`.

use bitflags::bitflags;
use slotmap::new_key_type;
use crate::engine_bail;
use crate::error::Result;
use super::feature::FeatureKey;
use super::scene::Scene;
use super::transformation::Transformation;
use super::LOG_SOURCE;

new_key_type! {
    /// Stable key for an Object within a Scene.
    ///
    /// Keys remain valid after other objects are removed. Using a key of a
    /// removed object yields `Error::StaleObject`.
    pub struct ObjectKey;
}

bitflags! {
    /// Object state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ObjectFlags: u8 {
        /// The cached absolute transformation is out of date
        const DIRTY = 1 << 0;
        /// The object is the root of its scene
        const SCENE = 1 << 1;
    }
}

/// Node of the transformation hierarchy
#[derive(Debug, Clone)]
pub struct Object<T: Transformation> {
    /// Transformation relative to the parent
    pub(super) transformation: T::DataType,
    /// Absolute transformation computed by the last clean pass
    pub(super) absolute_transformation: T::DataType,
    pub(super) flags: ObjectFlags,
    pub(super) parent: Option<ObjectKey>,
    /// Children in insertion order
    pub(super) children: Vec<ObjectKey>,
    /// Attached features in attachment order
    pub(super) features: Vec<FeatureKey>,
}

impl<T: Transformation> Object<T> {
    /// New dirty object with identity transformation and no parent
    pub(super) fn new() -> Self {
        Self {
            transformation: T::identity(),
            absolute_transformation: T::identity(),
            flags: ObjectFlags::DIRTY,
            parent: None,
            children: Vec::new(),
            features: Vec::new(),
        }
    }

    /// Clean scene root
    pub(super) fn new_scene() -> Self {
        Self {
            flags: ObjectFlags::SCENE,
            ..Self::new()
        }
    }

    /// Local transformation
    pub fn transformation(&self) -> T::DataType {
        self.transformation
    }

    /// Local transformation as a matrix
    pub fn transformation_matrix(&self) -> T::Matrix {
        T::to_matrix(&self.transformation)
    }

    /// Absolute transformation stored by the last clean pass
    ///
    /// `None` while the object is dirty.
    pub fn cached_absolute_transformation(&self) -> Option<T::DataType> {
        if self.is_dirty() {
            None
        } else {
            Some(self.absolute_transformation)
        }
    }

    pub fn flags(&self) -> ObjectFlags {
        self.flags
    }

    pub fn is_dirty(&self) -> bool {
        self.flags.contains(ObjectFlags::DIRTY)
    }

    /// Whether this object is a scene root
    pub fn is_scene(&self) -> bool {
        self.flags.contains(ObjectFlags::SCENE)
    }

    pub fn parent(&self) -> Option<ObjectKey> {
        self.parent
    }

    pub fn children(&self) -> &[ObjectKey] {
        &self.children
    }

    pub fn features(&self) -> &[FeatureKey] {
        &self.features
    }
}

/// Mutable handle to a live object
///
/// Obtained from [`Scene::object_mut`]. The handle borrows the scene, so the
/// key it wraps is guaranteed to stay valid for the handle's lifetime.
/// Transformation setters return `&mut Self` for chaining.
///
/// # Example
///
/// ```no_run
/// use magnum_engine::magnum::scene_graph::{MatrixTransformation3D, Scene};
/// use magnum_engine::magnum::math::{Deg, Vector3};
///
/// let mut scene = Scene::<MatrixTransformation3D>::new();
/// let object = scene.add_object(None)?;
/// scene.object_mut(object)?
///     .rotate_y(Deg(15.0))
///     .translate(Vector3::new(5.0, 0.0, 0.0));
/// # Ok::<(), magnum_engine::magnum::Error>(())
/// ```
pub struct ObjectMut<'a, T: Transformation> {
    scene: &'a mut Scene<T>,
    key: ObjectKey,
}

impl<'a, T: Transformation> ObjectMut<'a, T> {
    pub(super) fn new(scene: &'a mut Scene<T>, key: ObjectKey) -> Self {
        Self { scene, key }
    }

    pub fn key(&self) -> ObjectKey {
        self.key
    }

    /// The object behind this handle
    pub fn object(&self) -> &Object<T> {
        &self.scene.objects[self.key]
    }

    /// Local transformation
    pub fn transformation(&self) -> T::DataType {
        self.object().transformation
    }

    /// Local transformation as a matrix
    pub fn transformation_matrix(&self) -> T::Matrix {
        self.object().transformation_matrix()
    }

    /// Absolute transformation, computed without touching the cache
    pub fn absolute_transformation(&self) -> T::DataType {
        self.scene.compute_absolute(self.key)
    }

    pub fn is_dirty(&self) -> bool {
        self.object().is_dirty()
    }

    /// Replace the local transformation
    ///
    /// Fails if the policy rejects the value (e.g. a non-normalized dual
    /// complex number); the stored transformation is left unchanged. On a
    /// scene root the call is accepted and ignored.
    pub fn set_transformation(&mut self, transformation: T::DataType) -> Result<&mut Self> {
        Self::validate(&transformation, "set_transformation")?;
        Ok(self.set_transformation_unchecked(transformation))
    }

    /// Reset the local transformation to identity
    pub fn reset_transformation(&mut self) -> &mut Self {
        self.set_transformation_unchecked(T::identity())
    }

    /// Apply `transformation` after the current one, `transformation ∘ current`
    pub fn transform(&mut self, transformation: T::DataType) -> Result<&mut Self> {
        Self::validate(&transformation, "transform")?;
        Ok(self.transform_unchecked(transformation))
    }

    /// Apply `transformation` before the current one, `current ∘ transformation`
    pub fn transform_local(&mut self, transformation: T::DataType) -> Result<&mut Self> {
        Self::validate(&transformation, "transform_local")?;
        Ok(self.transform_local_unchecked(transformation))
    }

    /// Re-parent the object, see [`Scene::set_parent`]
    pub fn set_parent(&mut self, parent: Option<ObjectKey>) -> Result<&mut Self> {
        self.scene.set_parent(self.key, parent)?;
        Ok(self)
    }

    /// Re-parent the object keeping its absolute transformation, see
    /// [`Scene::set_parent_keep_transformation`]
    pub fn set_parent_keep_transformation(&mut self, parent: ObjectKey) -> Result<&mut Self> {
        self.scene.set_parent_keep_transformation(self.key, parent)?;
        Ok(self)
    }

    /// Mark the object and its subtree dirty
    pub fn set_dirty(&mut self) -> &mut Self {
        self.scene.mark_subtree_dirty(self.key);
        self
    }

    /// Recompute the cached absolute transformation of the object and its
    /// dirty ancestors
    pub fn set_clean(&mut self) -> &mut Self {
        self.scene.clean_object(self.key);
        self
    }

    fn validate(transformation: &T::DataType, caller: &str) -> Result<()> {
        if let Some(reason) = T::validate(transformation) {
            engine_bail!(LOG_SOURCE, "{}::{}(): {}", T::NAME, caller, reason);
        }
        Ok(())
    }

    pub(crate) fn set_transformation_unchecked(&mut self, transformation: T::DataType) -> &mut Self {
        self.scene.store_transformation(self.key, transformation);
        self
    }

    pub(crate) fn transform_unchecked(&mut self, transformation: T::DataType) -> &mut Self {
        let current = self.transformation();
        self.set_transformation_unchecked(T::compose(&transformation, &current))
    }

    pub(crate) fn transform_local_unchecked(&mut self, transformation: T::DataType) -> &mut Self {
        let current = self.transformation();
        self.set_transformation_unchecked(T::compose(&current, &transformation))
    }
}

#[cfg(test)]
#[path = "object_tests.rs"]
mod tests;
