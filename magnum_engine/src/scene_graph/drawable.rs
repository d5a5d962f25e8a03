/// Drawable capability.
///
/// Drawables are features rendered through a camera. The scene graph only
/// computes object-to-camera matrices and hands them over; what drawing
/// means is up to the implementor.

use super::camera::Camera;
use super::transformation::TransformationMatrix;

/// Feature capability invoked by [`Scene::draw`](super::Scene::draw)
///
/// Implementors also implement `Feature` and return `Some(self)` from
/// `as_drawable_mut`.
pub trait Drawable<M: TransformationMatrix> {
    /// Draw the feature
    ///
    /// # Arguments
    ///
    /// * `transformation_matrix` - Object transformation relative to the camera
    /// * `camera` - Camera used for drawing
    fn draw(&mut self, transformation_matrix: &M, camera: &Camera<M>);
}
