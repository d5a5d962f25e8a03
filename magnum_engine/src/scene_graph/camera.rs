/// Cameras and drawing.
///
/// A camera is a feature caching the inverted absolute transformation of
/// its object, which is the camera matrix. Combined with a projection
/// matrix corrected for the viewport aspect ratio it turns drawable
/// features into `(FeatureKey, object-to-camera matrix)` pairs.

use crate::error::{Error, Result};
use crate::math::{Matrix3, Matrix4, Rad, Real, Vector2};
use super::feature::{CachedTransformations, Feature, FeatureKey};
use super::feature_group::{FeatureGroupKind, GroupKey};
use super::object::ObjectKey;
use super::scene::Scene;
use super::transformation::{Transformation, TransformationMatrix};
use super::LOG_SOURCE;

/// How the projection adapts to a viewport of different aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AspectRatioPolicy {
    /// The projection is stretched to the viewport
    #[default]
    NotPreserved,
    /// The projected area grows on the longer viewport side
    Extend,
    /// The projected area is cut on the shorter viewport side
    Clip,
}

/// Camera feature
#[derive(Debug, Clone, PartialEq)]
pub struct Camera<M: TransformationMatrix> {
    aspect_ratio_policy: AspectRatioPolicy,
    /// Projection as set by the user
    raw_projection_matrix: M,
    /// Projection corrected for the viewport aspect ratio
    projection_matrix: M,
    /// Inverted absolute transformation of the camera object
    camera_matrix: M,
    viewport: Vector2<i32>,
}

/// 2D camera
pub type Camera2D<T = f32> = Camera<Matrix3<T>>;

/// 3D camera
pub type Camera3D<T = f32> = Camera<Matrix4<T>>;

impl<M: TransformationMatrix> Default for Camera<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: TransformationMatrix> Camera<M> {
    /// Camera with identity projection and an empty viewport
    pub fn new() -> Self {
        Self {
            aspect_ratio_policy: AspectRatioPolicy::NotPreserved,
            raw_projection_matrix: M::identity_matrix(),
            projection_matrix: M::identity_matrix(),
            camera_matrix: M::identity_matrix(),
            viewport: Vector2::zero(),
        }
    }

    pub fn aspect_ratio_policy(&self) -> AspectRatioPolicy {
        self.aspect_ratio_policy
    }

    pub fn set_aspect_ratio_policy(&mut self, policy: AspectRatioPolicy) -> &mut Self {
        self.aspect_ratio_policy = policy;
        self.fix_aspect_ratio();
        self
    }

    /// Projection matrix with the aspect ratio correction applied
    pub fn projection_matrix(&self) -> M {
        self.projection_matrix
    }

    /// Projection matrix as passed to [`Camera::set_projection_matrix`]
    pub fn raw_projection_matrix(&self) -> M {
        self.raw_projection_matrix
    }

    pub fn set_projection_matrix(&mut self, matrix: M) -> &mut Self {
        self.raw_projection_matrix = matrix;
        self.fix_aspect_ratio();
        self
    }

    /// Size of the projected area on the near plane
    pub fn projection_size(&self) -> Vector2<M::Scalar> {
        let scale = self.projection_matrix.projection_scale();
        let two = <M::Scalar as Real>::two();
        Vector2::new(two / scale.x(), two / scale.y())
    }

    pub fn viewport(&self) -> Vector2<i32> {
        self.viewport
    }

    /// Set the viewport size, recomputing the aspect ratio correction
    pub fn set_viewport(&mut self, size: Vector2<i32>) -> &mut Self {
        self.viewport = size;
        self.fix_aspect_ratio();
        self
    }

    /// Camera matrix as of the last clean pass of the camera object
    ///
    /// Use [`Scene::camera_matrix`] to get an up-to-date value.
    pub fn camera_matrix(&self) -> M {
        self.camera_matrix
    }

    fn fix_aspect_ratio(&mut self) {
        let fix = aspect_ratio_fix::<M>(
            self.aspect_ratio_policy,
            self.raw_projection_matrix.projection_scale(),
            self.viewport,
        );
        self.projection_matrix = fix * self.raw_projection_matrix;
    }
}

impl<T: Real> Camera<Matrix3<T>> {
    /// Projection of a rectangle of `size` centered on the camera
    pub fn set_projection(&mut self, size: Vector2<T>) -> &mut Self {
        self.set_projection_matrix(Matrix3::projection(size))
    }
}

impl<T: Real> Camera<Matrix4<T>> {
    /// Orthographic projection of a box of `size` between `near` and `far`
    pub fn set_orthographic(&mut self, size: Vector2<T>, near: T, far: T) -> &mut Self {
        self.set_projection_matrix(Matrix4::orthographic_projection(size, near, far))
    }

    /// Perspective projection with the near plane of given `size`
    pub fn set_perspective(&mut self, size: Vector2<T>, near: T, far: T) -> &mut Self {
        self.set_projection_matrix(Matrix4::perspective_projection(size, near, far))
    }

    /// Perspective projection from horizontal field of view
    pub fn set_perspective_fov(
        &mut self,
        fov: impl Into<Rad<T>>,
        aspect_ratio: T,
        near: T,
        far: T,
    ) -> &mut Self {
        self.set_projection_matrix(Matrix4::perspective_projection_fov(fov, aspect_ratio, near, far))
    }
}

impl<M: TransformationMatrix> Feature<M> for Camera<M> {
    fn cached_transformations(&self) -> CachedTransformations {
        CachedTransformations::INVERTED_ABSOLUTE
    }

    fn clean_inverted(&mut self, inverted_absolute: &M) {
        self.camera_matrix = *inverted_absolute;
    }
}

/// Scaling that makes a projection preserve the viewport aspect ratio
///
/// Identity when the policy is `NotPreserved` or when the projection scale
/// or the viewport has a zero component.
pub(crate) fn aspect_ratio_fix<M: TransformationMatrix>(
    policy: AspectRatioPolicy,
    projection_scale: Vector2<M::Scalar>,
    viewport: Vector2<i32>,
) -> M {
    let zero = <M::Scalar as num_traits::Zero>::zero();
    if projection_scale.x() == zero
        || projection_scale.y() == zero
        || viewport.x() == 0
        || viewport.y() == 0
        || policy == AspectRatioPolicy::NotPreserved
    {
        return M::identity_matrix();
    }

    let viewport = Vector2::new(
        <M::Scalar as Real>::from_f64(f64::from(viewport.x())),
        <M::Scalar as Real>::from_f64(f64::from(viewport.y())),
    );
    let relative = viewport * projection_scale;
    let one = <M::Scalar as num_traits::One>::one();

    // Extend scales the larger side down, Clip scales the smaller side up
    let scale = if (relative.x() > relative.y()) == (policy == AspectRatioPolicy::Extend) {
        Vector2::new(relative.y() / relative.x(), one)
    } else {
        Vector2::new(one, relative.x() / relative.y())
    };
    M::from_xy_scaling(scale)
}

impl<T: Transformation> Scene<T> {
    /// Up-to-date camera matrix
    ///
    /// Cleans the camera object first.
    pub fn camera_matrix(&mut self, camera: FeatureKey) -> Result<T::Matrix> {
        let object = self.feature_object(camera)?;
        self.clean_object(object);
        Ok(self.feature::<Camera<T::Matrix>>(camera)?.camera_matrix())
    }

    /// Object-to-camera matrices of all drawables of a group
    ///
    /// Every drawable object is cleaned. Pairs are returned in group order.
    ///
    /// # Errors
    ///
    /// `CapabilityMismatch` if `group` is not a drawable group, `Hierarchy`
    /// if a drawable object is not part of this scene.
    pub fn drawable_transformations(
        &mut self,
        camera: FeatureKey,
        group: GroupKey,
    ) -> Result<Vec<(FeatureKey, T::Matrix)>> {
        let camera_matrix = self.camera_matrix(camera)?;
        let group_entry = self.checked_group(group)?;
        if group_entry.kind() != FeatureGroupKind::Drawables {
            return Err(Error::CapabilityMismatch(format!(
                "Camera::draw(): group {:?} is a group of {:?}", group, group_entry.kind()
            )).logged(LOG_SOURCE));
        }

        let members = group_entry.features().to_vec();
        let objects = members
            .iter()
            .map(|&feature| self.feature_object(feature))
            .collect::<Result<Vec<ObjectKey>>>()?;
        for &object in &objects {
            if self.scene_of(object)? != Some(self.root) {
                return Err(Error::Hierarchy(format!(
                    "Camera::draw(): object {:?} is not part of the camera scene", object
                )).logged(LOG_SOURCE));
            }
        }
        self.set_clean_many(&objects)?;

        Ok(members
            .into_iter()
            .zip(objects)
            .map(|(feature, object)| {
                let absolute = T::to_matrix(&self.objects[object].absolute_transformation);
                (feature, camera_matrix * absolute)
            })
            .collect())
    }

    /// Draw features with precomputed object-to-camera matrices
    ///
    /// The camera is copied before drawing, so drawables observe its state
    /// at the time of the call.
    pub fn draw_transformations(
        &mut self,
        camera: FeatureKey,
        transformations: &[(FeatureKey, T::Matrix)],
    ) -> Result<()> {
        let camera = self.feature::<Camera<T::Matrix>>(camera)?.clone();
        for (feature, matrix) in transformations {
            let entry = self.checked_feature_mut(*feature)?;
            let drawable = entry.feature.as_drawable_mut().ok_or_else(|| {
                Error::CapabilityMismatch(format!("feature {:?} is not a drawable", feature))
                    .logged(LOG_SOURCE)
            })?;
            drawable.draw(matrix, &camera);
        }
        Ok(())
    }

    /// Draw all drawables of a group through a camera
    pub fn draw(&mut self, camera: FeatureKey, group: GroupKey) -> Result<()> {
        let transformations = self.drawable_transformations(camera, group)?;
        self.draw_transformations(camera, &transformations)
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
