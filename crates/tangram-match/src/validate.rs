use log::debug;
use serde::{Deserialize, Serialize};

use crate::params::ValidationParams;
use tangram_match_core::{
    is_rotation_valid, piece_feature_angle, scene_pose, target_feature_angle, PlacedPiece,
    TargetPiece,
};

/// Per-check verdict for one (observation, target) pair.
///
/// Derived fresh on every call, never stored; callers wanting targeted
/// feedback read the individual flags.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub position_valid: bool,
    pub rotation_valid: bool,
    pub flip_valid: bool,
}

impl ValidationResult {
    /// All checks failed; also the verdict for a piece-type mismatch.
    pub const INVALID: ValidationResult = ValidationResult {
        position_valid: false,
        rotation_valid: false,
        flip_valid: false,
    };

    /// Overall match: every check passed.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.position_valid && self.rotation_valid && self.flip_valid
    }
}

/// Validates observed pieces against individual puzzle targets.
///
/// Stateless apart from its tolerances; one instance per session is the
/// expected use, and rebuilding with different params per call is cheap.
#[derive(Clone, Copy, Debug)]
pub struct PieceValidator {
    params: ValidationParams,
}

impl PieceValidator {
    pub fn new(params: ValidationParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &ValidationParams {
        &self.params
    }

    /// Overall verdict for one observation against one target.
    pub fn validate(&self, placed: &PlacedPiece, target: &TargetPiece) -> bool {
        self.validate_with_features(placed, target).is_valid()
    }

    /// Per-check verdict for one observation against one target.
    ///
    /// A piece-type mismatch short-circuits to [`ValidationResult::INVALID`]
    /// regardless of geometry. The parallelogram flip check is inverted on
    /// purpose: the y-flip between model and scene space swaps handedness,
    /// so a mirrored target transform matches an unflipped piece.
    pub fn validate_with_features(
        &self,
        placed: &PlacedPiece,
        target: &TargetPiece,
    ) -> ValidationResult {
        if placed.piece_type != target.piece_type {
            debug!(
                "piece {} is a {:?}, target {} wants {:?}",
                placed.piece_id, placed.piece_type, target.id, target.piece_type
            );
            return ValidationResult::INVALID;
        }

        let target_pose = scene_pose(&target.transform);
        let distance = (placed.position - target_pose.position).norm();
        let position_valid = distance < self.params.position_tolerance;

        let flip_valid = if placed.piece_type.is_chiral() {
            placed.is_flipped != target_pose.is_flipped
        } else {
            true
        };

        let current = piece_feature_angle(
            placed.rotation_deg.to_radians(),
            placed.piece_type,
            placed.is_flipped,
        );
        let wanted = target_feature_angle(&target.transform, target.piece_type);
        let rotation_valid = is_rotation_valid(
            current,
            wanted,
            placed.piece_type,
            placed.is_flipped,
            self.params.rotation_tolerance_deg,
        );

        ValidationResult {
            position_valid,
            rotation_valid,
            flip_valid,
        }
    }
}
