//! Core types and geometry for tangram placement matching.
//!
//! This crate is intentionally small and purely geometric. It knows nothing
//! about vision pipelines, event buses or rendering; it only converts poses
//! between the model and scene conventions and compares them under each
//! piece's rotational symmetry.

mod angle;
mod feature;
mod logger;
mod piece;
mod scene;
mod transform;

pub use angle::{is_rotation_valid, normalize_angle, rotation_difference_to_nearest};
pub use feature::{piece_feature_angle, target_feature_angle};
pub use piece::{PieceType, PlacedPiece, Pose, PuzzleDefinition, PuzzleError, TargetPiece};
pub use scene::{
    scene_angle, scene_position, scene_pose, MODEL_TO_SCENE_SIGN, REFERENCE_CANVAS_HEIGHT,
    REFERENCE_CANVAS_WIDTH,
};
pub use transform::ModelTransform;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
