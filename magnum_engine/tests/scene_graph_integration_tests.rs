//! Integration tests for the scene graph
//!
//! These tests drive complete scenes through the public API: hierarchies
//! under every transformation policy, dirty tracking, cameras with drawable
//! groups and animables stepped frame by frame.
//!
//! Run with: cargo test --test scene_graph_integration_tests

use magnum_engine::magnum::Error;
use magnum_engine::magnum::math::{
    Deg, DualComplex, DualQuaternion, Matrix3, Matrix4, Quaternion, Vector2, Vector3,
};
use magnum_engine::magnum::scene_graph::{
    Animable, Animation, AnimationState, AspectRatioPolicy, CachedTransformations, Camera3D,
    Drawable, DualComplexTransformation, DualQuaternionTransformation, Feature,
    FeatureGroupKind, MatrixTransformation2D, MatrixTransformation3D, ObjectKey,
    RigidMatrixTransformation2D, RigidMatrixTransformation3D, Scene, Transformation,
    TranslationTransformation3D,
};

// ============================================================================
// HELPERS
// ============================================================================

/// Chain root -> a -> b -> c in a fresh scene
fn chain<T: Transformation>(scene: &mut Scene<T>) -> [ObjectKey; 3] {
    let a = scene.add_object(Some(scene.root())).unwrap();
    let b = scene.add_object(Some(a)).unwrap();
    let c = scene.add_object(Some(b)).unwrap();
    [a, b, c]
}

/// Feature counting clean notifications
#[derive(Default)]
struct CleanCounter {
    cleaned: usize,
    dirtied: usize,
    last: Option<Matrix4>,
}

impl Feature<Matrix4> for CleanCounter {
    fn cached_transformations(&self) -> CachedTransformations {
        CachedTransformations::ABSOLUTE
    }

    fn mark_dirty(&mut self) {
        self.dirtied += 1;
    }

    fn clean(&mut self, absolute: &Matrix4) {
        self.cleaned += 1;
        self.last = Some(*absolute);
    }
}

// ============================================================================
// POLICIES
// ============================================================================

#[test]
fn test_integration_3d_policies_agree() {
    let mut matrices = Scene::<MatrixTransformation3D>::new();
    let mut rigid = Scene::<RigidMatrixTransformation3D>::new();
    let mut duals = Scene::<DualQuaternionTransformation>::new();
    let [ma, mb, mc] = chain(&mut matrices);
    let [ra, rb, rc] = chain(&mut rigid);
    let [da, db, dc] = chain(&mut duals);

    matrices.object_mut(ma).unwrap().rotate_x(Deg(30.0f32)).translate(Vector3::new(1.0, 0.0, 0.0));
    rigid.object_mut(ra).unwrap().rotate_x(Deg(30.0f32)).translate(Vector3::new(1.0, 0.0, 0.0));
    duals.object_mut(da).unwrap().rotate_x(Deg(30.0f32)).translate(Vector3::new(1.0, 0.0, 0.0));

    matrices.object_mut(mb).unwrap().translate(Vector3::new(0.0, 2.0, 0.0)).rotate_z_local(Deg(-45.0f32));
    rigid.object_mut(rb).unwrap().translate(Vector3::new(0.0, 2.0, 0.0)).rotate_z_local(Deg(-45.0f32));
    duals.object_mut(db).unwrap().translate(Vector3::new(0.0, 2.0, 0.0)).rotate_z_local(Deg(-45.0f32));

    matrices.object_mut(mc).unwrap().rotate_y(Deg(90.0f32));
    rigid.object_mut(rc).unwrap().rotate_y(Deg(90.0f32));
    duals.object_mut(dc).unwrap().rotate_y(Deg(90.0f32));

    let expected = matrices.absolute_transformation_matrix(mc).unwrap();
    assert_eq!(rigid.absolute_transformation_matrix(rc).unwrap(), expected);
    assert_eq!(duals.absolute_transformation_matrix(dc).unwrap(), expected);
    assert_eq!(
        DualQuaternionTransformation::<f32>::to_matrix(&DualQuaternionTransformation::inverted(
            &duals.absolute_transformation(dc).unwrap()
        )),
        expected.inverted().unwrap()
    );
}

#[test]
fn test_integration_2d_policies_agree() {
    let mut matrices = Scene::<MatrixTransformation2D>::new();
    let mut rigid = Scene::<RigidMatrixTransformation2D>::new();
    let mut duals = Scene::<DualComplexTransformation>::new();
    let [ma, _, mc] = chain(&mut matrices);
    let [ra, _, rc] = chain(&mut rigid);
    let [da, _, dc] = chain(&mut duals);

    matrices.object_mut(ma).unwrap().rotate(Deg(17.0f32)).translate(Vector2::new(1.0, -0.3));
    rigid.object_mut(ra).unwrap().rotate(Deg(17.0f32)).translate(Vector2::new(1.0, -0.3));
    duals.object_mut(da).unwrap().rotate(Deg(17.0f32)).translate(Vector2::new(1.0, -0.3));

    matrices.object_mut(mc).unwrap().rotate_local(Deg(-96.0f32));
    rigid.object_mut(rc).unwrap().rotate_local(Deg(-96.0f32));
    duals.object_mut(dc).unwrap().rotate_local(Deg(-96.0f32));

    let expected = Matrix3::from_translation(Vector2::new(1.0, -0.3))
        * Matrix3::from_rotation(Deg(17.0f32))
        * Matrix3::from_rotation(Deg(-96.0f32));
    assert_eq!(matrices.absolute_transformation_matrix(mc).unwrap(), expected);
    assert_eq!(rigid.absolute_transformation_matrix(rc).unwrap(), expected);
    assert_eq!(duals.absolute_transformation_matrix(dc).unwrap(), expected);
}

#[test]
fn test_integration_non_rigid_values_rejected() {
    let mut duals = Scene::<DualQuaternionTransformation>::new();
    let [a, ..] = chain(&mut duals);
    let stretched = DualQuaternion::from_translation(Vector3::new(1.0, 0.0, 0.0)) * DualQuaternion::new(
        Quaternion::new(Vector3::new(0.0, 0.0, 0.0), 1.5),
        Quaternion::zero(),
    );
    assert!(matches!(duals.object_mut(a).unwrap().transform(stretched), Err(Error::Precondition(_))));
    assert_eq!(duals.transformation(a).unwrap(), DualQuaternion::identity());

    let scaling = Matrix4::from_scaling(Vector3::new(1.0, 1.0, 3.0));
    assert!(matches!(
        duals.transformation_matrices(&[a], scaling),
        Err(Error::Precondition(_))
    ));

    let mut rigid = Scene::<RigidMatrixTransformation3D>::new();
    let [b, ..] = chain(&mut rigid);
    assert!(matches!(rigid.object_mut(b).unwrap().set_transformation(scaling), Err(Error::Precondition(_))));
    assert!(rigid.transformation(b).unwrap().is_identity());
}

// ============================================================================
// HIERARCHY AND CACHING
// ============================================================================

#[test]
fn test_integration_clean_is_idempotent() {
    let mut scene = Scene::<MatrixTransformation3D>::new();
    let [a, _, c] = chain(&mut scene);
    let counter = scene.add_feature(c, CleanCounter::default()).unwrap();
    scene.object_mut(a).unwrap().translate(Vector3::new(0.0, 0.0, -3.0));

    scene.set_clean(c).unwrap();
    let first = scene.object(c).unwrap().cached_absolute_transformation();
    scene.set_clean(c).unwrap();

    assert_eq!(scene.object(c).unwrap().cached_absolute_transformation(), first);
    assert_eq!(first, Some(Matrix4::from_translation(Vector3::new(0.0, 0.0, -3.0))));
    assert_eq!(scene.feature::<CleanCounter>(counter).unwrap().cleaned, 1);
}

#[test]
fn test_integration_dirty_propagates_down_only() {
    let mut scene = Scene::<MatrixTransformation3D>::new();
    let [a, b, c] = chain(&mut scene);
    let counter = scene.add_feature(c, CleanCounter::default()).unwrap();
    scene.set_clean(c).unwrap();

    scene.object_mut(b).unwrap().scale(Vector3::new(2.0, 2.0, 2.0));

    assert!(!scene.is_dirty(a).unwrap());
    assert!(scene.is_dirty(b).unwrap());
    assert!(scene.is_dirty(c).unwrap());
    assert_eq!(scene.object(c).unwrap().cached_absolute_transformation(), None);

    scene.set_clean(c).unwrap();
    let counter = scene.feature::<CleanCounter>(counter).unwrap();
    assert_eq!(counter.cleaned, 2);
    assert!(counter.dirtied >= 1);
    assert_eq!(counter.last, Some(Matrix4::from_scaling(Vector3::new(2.0, 2.0, 2.0))));
}

#[test]
fn test_integration_scene_root_is_immutable() {
    let mut scene = Scene::<TranslationTransformation3D>::new();
    let root = scene.root();
    let [a, ..] = chain(&mut scene);
    scene.object_mut(a).unwrap().translate(Vector3::new(1.0, 0.0, 0.0));

    scene.object_mut(root).unwrap().translate(Vector3::new(5.0, 5.0, 5.0));
    assert!(scene.set_parent(root, Some(a)).is_ok());

    assert_eq!(scene.transformation(root).unwrap(), Vector3::new(0.0, 0.0, 0.0));
    assert_eq!(scene.parent(root).unwrap(), None);
    assert!(!scene.is_dirty(root).unwrap());
    assert_eq!(scene.absolute_transformation(a).unwrap(), Vector3::new(1.0, 0.0, 0.0));
    assert!(matches!(scene.remove_object(root), Err(Error::Hierarchy(_))));
}

#[test]
fn test_integration_reparent_keeping_transformation() {
    let mut scene = Scene::<RigidMatrixTransformation3D>::new();
    let [a, b, c] = chain(&mut scene);
    let other = scene.add_object(Some(scene.root())).unwrap();
    scene.object_mut(a).unwrap().rotate_y(Deg(90.0f32));
    scene.object_mut(b).unwrap().translate(Vector3::new(0.0, 1.0, 0.0));
    scene.object_mut(other).unwrap().translate(Vector3::new(-4.0, 0.0, 2.0)).rotate_z(Deg(30.0f32));
    let before = scene.absolute_transformation_matrix(c).unwrap();

    scene.set_parent_keep_transformation(c, other).unwrap();

    assert_eq!(scene.parent(c).unwrap(), Some(other));
    assert_eq!(scene.absolute_transformation_matrix(c).unwrap(), before);
    assert!(scene.transformation(c).unwrap().is_rigid_transformation());
}

#[test]
fn test_integration_batch_transformations() {
    let mut scene = Scene::<DualComplexTransformation>::new();
    let [a, b, c] = chain(&mut scene);
    scene.object_mut(a).unwrap().translate(Vector2::new(1.0, 0.0));
    scene.object_mut(b).unwrap().rotate(Deg(90.0f32));
    scene.object_mut(c).unwrap().translate(Vector2::new(0.0, 2.0));

    let initial = DualComplex::from_translation(Vector2::new(0.0, 10.0));
    let result = scene.transformations(&[c, a, c], initial).unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(result[0], initial * scene.absolute_transformation(c).unwrap());
    assert_eq!(result[1], initial * scene.absolute_transformation(a).unwrap());
    assert_eq!(result[0], result[2]);
    assert_eq!(result[0].translation(), Vector2::new(-1.0, 10.0));

    let free = scene.add_object(None).unwrap();
    assert!(matches!(
        scene.transformations(&[a, free], DualComplex::identity()),
        Err(Error::Hierarchy(_))
    ));
}

// ============================================================================
// CAMERA, DRAWABLES AND ANIMABLES
// ============================================================================

/// Drawable remembering the last matrix it was drawn with
#[derive(Default)]
struct Marker {
    last: Option<Matrix4>,
    draws: usize,
}

impl Feature<Matrix4> for Marker {
    fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable<Matrix4>> {
        Some(self)
    }
}

impl Drawable<Matrix4> for Marker {
    fn draw(&mut self, transformation_matrix: &Matrix4, _camera: &Camera3D) {
        self.last = Some(*transformation_matrix);
        self.draws += 1;
    }
}

/// Animable accumulating an angle in degrees
struct Turntable {
    animation: Animation,
    degrees: f32,
}

impl Feature<Matrix4> for Turntable {
    fn as_animable(&self) -> Option<&dyn Animable> {
        Some(self)
    }

    fn as_animable_mut(&mut self) -> Option<&mut dyn Animable> {
        Some(self)
    }
}

impl Animable for Turntable {
    fn animation(&self) -> &Animation {
        &self.animation
    }

    fn animation_mut(&mut self) -> &mut Animation {
        &mut self.animation
    }

    fn animation_step(&mut self, time: f32, _delta: f32) {
        self.degrees = time * 90.0;
    }
}

#[test]
fn test_integration_frame_loop() {
    let mut scene = Scene::<MatrixTransformation3D>::new();
    let root = scene.root();
    let eye = scene.add_object(Some(root)).unwrap();
    let body = scene.add_object(Some(root)).unwrap();
    scene.object_mut(eye).unwrap().translate(Vector3::new(0.0, 0.0, 5.0));

    let mut lens = Camera3D::new();
    lens.set_aspect_ratio_policy(AspectRatioPolicy::Extend)
        .set_orthographic(Vector2::new(2.0, 2.0), 0.1, 100.0)
        .set_viewport(Vector2::new(400, 200));
    assert_eq!(lens.projection_size(), Vector2::new(4.0, 2.0));
    let camera = scene.add_feature(eye, lens).unwrap();

    let drawables = scene.add_group(FeatureGroupKind::Drawables);
    let animables = scene.add_group(FeatureGroupKind::Animables);
    let marker = scene.add_grouped_feature(body, drawables, Marker::default()).unwrap();
    let turntable = scene
        .add_grouped_feature(body, animables, Turntable {
            animation: Animation::new().with_duration(2.0),
            degrees: 0.0,
        })
        .unwrap();
    scene.set_animation_state(turntable, AnimationState::Running).unwrap();

    let mut time = 0.0f32;
    for _ in 0..4 {
        scene.step_animables(animables, time, 0.5).unwrap();
        let degrees = scene.feature::<Turntable>(turntable).unwrap().degrees;
        scene.object_mut(body).unwrap().set_transformation(Matrix4::from_rotation_y(Deg(degrees))).unwrap();
        scene.draw(camera, drawables).unwrap();
        time += 0.5;
    }

    let marker = scene.feature::<Marker>(marker).unwrap();
    assert_eq!(marker.draws, 4);
    assert_eq!(
        marker.last,
        Some(Matrix4::from_translation(Vector3::new(0.0, 0.0, -5.0)) * Matrix4::from_rotation_y(Deg(135.0f32)))
    );

    // Past the duration the animation stops and the group goes idle
    scene.step_animables(animables, 2.5, 1.0).unwrap();
    assert_eq!(scene.animation(turntable).unwrap().state(), AnimationState::Stopped);
    assert_eq!(scene.group(animables).unwrap().running_count(), 0);
}

#[test]
fn test_integration_drawables_outside_camera_scene() {
    let mut scene = Scene::<MatrixTransformation3D>::new();
    let eye = scene.add_object(Some(scene.root())).unwrap();
    let camera = scene.add_feature(eye, Camera3D::new()).unwrap();
    let drawables = scene.add_group(FeatureGroupKind::Drawables);

    let detached = scene.add_object(None).unwrap();
    let marker = scene.add_grouped_feature(detached, drawables, Marker::default()).unwrap();
    assert!(matches!(scene.draw(camera, drawables), Err(Error::Hierarchy(_))));

    scene.set_parent(detached, Some(scene.root())).unwrap();
    scene.draw(camera, drawables).unwrap();
    assert_eq!(scene.feature::<Marker>(marker).unwrap().draws, 1);
}
