//! Feature angles: the comparable reference frame for rotations.
//!
//! Raw rotations are never compared directly. Each shape has a canonical
//! feature direction (its diagonal for triangles and the square) and every
//! rotation is expressed as the scene angle of that feature, with the
//! offset sign following the flip state. This keeps comparisons stable
//! across symmetry and mirroring.

use crate::angle::normalize_angle;
use crate::piece::PieceType;
use crate::scene::scene_angle;
use crate::transform::ModelTransform;

/// Feature angle of an observed piece from its scene rotation in radians.
#[inline]
pub fn piece_feature_angle(rotation: f64, piece_type: PieceType, is_flipped: bool) -> f64 {
    let offset = piece_type.canonical_piece_angle();
    let offset = if is_flipped { -offset } else { offset };
    normalize_angle(rotation + offset)
}

/// Feature angle of a target transform, mapped into scene sense.
///
/// The offset sign follows the transform's mirroring, read through
/// [`ModelTransform::is_mirrored`].
#[inline]
pub fn target_feature_angle(transform: &ModelTransform, piece_type: PieceType) -> f64 {
    let offset = piece_type.canonical_target_angle();
    let offset = if transform.is_mirrored() {
        -offset
    } else {
        offset
    };
    normalize_angle(scene_angle(transform.rotation()) + offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn flip_negates_the_piece_offset() {
        let up = piece_feature_angle(0.0, PieceType::SmallTriangle1, false);
        let flipped = piece_feature_angle(0.0, PieceType::SmallTriangle1, true);
        assert_relative_eq!(up, FRAC_PI_4);
        assert_relative_eq!(flipped, -FRAC_PI_4);
    }

    #[test]
    fn matching_poses_share_a_feature_angle() {
        // A target rotated by θ in model space appears at −θ in the scene;
        // an observation sitting exactly on it reads the same feature angle.
        let theta = 0.6;
        let target = ModelTransform::from_rotation_translation(theta, 0.0, 0.0);
        let observed = piece_feature_angle(-theta, PieceType::MediumTriangle, false);
        assert_relative_eq!(
            target_feature_angle(&target, PieceType::MediumTriangle),
            observed,
            epsilon = 1e-12
        );
    }

    #[test]
    fn mirrored_target_uses_the_negated_offset() {
        let plain = ModelTransform::identity();
        let mirrored = ModelTransform::from_parts(1.0, 0.0, 0.0, -1.0, 0.0, 0.0);
        assert_relative_eq!(
            target_feature_angle(&plain, PieceType::LargeTriangle1),
            FRAC_PI_4
        );
        assert_relative_eq!(
            target_feature_angle(&mirrored, PieceType::LargeTriangle1),
            -FRAC_PI_4
        );
    }
}
