//! Angle normalization and symmetry-aware rotation comparison.
//!
//! All comparisons happen on feature angles in the canonical half-open
//! range (−π, π]. A piece with symmetry order N admits N congruent target
//! angles spaced 2π/N apart; the comparator always answers against the
//! nearest one.

use std::f64::consts::{PI, TAU};

use crate::piece::PieceType;

/// Wrap an angle into the canonical range (−π, π].
///
/// Idempotent; used before every comparison so differences never cross the
/// wrap boundary.
#[inline]
pub fn normalize_angle(theta: f64) -> f64 {
    let t = theta.rem_euclid(TAU);
    if t > PI {
        t - TAU
    } else {
        t
    }
}

/// Signed difference from `current` to the nearest symmetry-congruent
/// target angle, in radians.
///
/// The candidates are `target + k·(2π/N)` for k in [0, N), N the piece's
/// symmetry order. The scan keeps the first candidate on ties (strict `<`
/// on magnitude), so a difference landing exactly on the symmetry boundary
/// π/N resolves to the smaller k.
///
/// A flipped chiral piece rotates in the mirrored sense, so its current
/// angle is negated before comparison.
pub fn rotation_difference_to_nearest(
    current: f64,
    target: f64,
    piece_type: PieceType,
    is_flipped: bool,
) -> f64 {
    let cur = if piece_type.is_chiral() && is_flipped {
        -current
    } else {
        current
    };

    let order = piece_type.symmetry_order();
    let step = TAU / f64::from(order);

    let mut best = normalize_angle(cur - target);
    for k in 1..order {
        let candidate = target + f64::from(k) * step;
        let diff = normalize_angle(cur - candidate);
        if diff.abs() < best.abs() {
            best = diff;
        }
    }
    best
}

/// Whether `current` matches `target` under the piece's symmetry within
/// `tolerance_deg` degrees.
pub fn is_rotation_valid(
    current: f64,
    target: f64,
    piece_type: PieceType,
    is_flipped: bool,
    tolerance_deg: f64,
) -> bool {
    let diff = rotation_difference_to_nearest(current, target, piece_type, is_flipped);
    diff.abs().to_degrees() <= tolerance_deg
}
