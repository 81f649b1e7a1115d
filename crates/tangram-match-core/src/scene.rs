//! Model-space to scene-space conventions.
//!
//! Model space (vision output and puzzle definitions) is y-down; the scene
//! renderer is y-up. The whole relation between the two is the single sign
//! constant below: vertical coordinates and rotation sense negate, nothing
//! else changes. Composing this flip with a mirrored model transform flips
//! handedness, which is why the parallelogram flip check is inverted in the
//! validator.

use nalgebra::Point2;

use crate::piece::Pose;
use crate::transform::ModelTransform;

/// Sign relating model-space vertical axis and rotation sense to scene space.
pub const MODEL_TO_SCENE_SIGN: f64 = -1.0;

/// Reference canvas the renderer lays frames out in, in scene units.
///
/// Normalized detection coordinates are always mapped into this one canvas;
/// no other component may define its own copy of these dimensions.
pub const REFERENCE_CANVAS_WIDTH: f64 = 1080.0;
pub const REFERENCE_CANVAS_HEIGHT: f64 = 1920.0;

/// Map a raw model-space position into scene space.
#[inline]
pub fn scene_position(raw: Point2<f64>) -> Point2<f64> {
    Point2::new(raw.x, MODEL_TO_SCENE_SIGN * raw.y)
}

/// Map a raw model-space angle into scene sense.
#[inline]
pub fn scene_angle(raw: f64) -> f64 {
    MODEL_TO_SCENE_SIGN * raw
}

/// Scene-space pose of a target transform.
///
/// The flip state comes from the transform's determinant sign and is
/// carried through unchanged.
pub fn scene_pose(transform: &ModelTransform) -> Pose {
    Pose {
        position: scene_position(transform.translation()),
        rotation: scene_angle(transform.rotation()),
        is_flipped: transform.is_mirrored(),
    }
}
