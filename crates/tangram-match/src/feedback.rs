use std::collections::{HashMap, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::params::{
    ValidationParams, DEMO_DURATION_SECS, PULSE_DURATION_SECS, PULSE_INTENSITY,
};
use tangram_match_core::{
    normalize_angle, piece_feature_angle, rotation_difference_to_nearest, target_feature_angle,
    PlacedPiece, PuzzleDefinition, TargetPiece,
};

/// Severity tier of a nudge.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum NudgeLevel {
    /// Quiet positive reinforcement.
    Subtle,
    /// A concrete correction worth the player's attention.
    Gentle,
}

/// Visual treatment the presentation layer should play.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum VisualHint {
    Pulse { intensity: f64 },
    FlipDemo,
    /// Directional rotation demo from the current to the desired scene
    /// angle, both in degrees.
    RotationDemo { current_deg: f64, target_deg: f64 },
}

/// One feedback artifact for the UI; ephemeral, consumed per frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NudgeContent {
    pub level: NudgeLevel,
    pub message: String,
    pub visual: VisualHint,
    pub duration_secs: f64,
}

/// Outcome of one orientation pass over a frame.
#[derive(Clone, Debug, Default)]
pub struct OrientationFeedback {
    /// Target ids considered correctly oriented this frame.
    pub oriented: HashSet<String>,
    /// At most one nudge per observed piece, keyed by piece id.
    pub nudges: HashMap<String, NudgeContent>,
}

/// Pre-anchor orientation feedback.
///
/// Before a piece is pinned to one specific target, every same-type target
/// is a candidate; the advisor picks the rotationally closest one and
/// decides between a success pulse, a flip demo, a rotation demo or
/// silence.
#[derive(Clone, Copy, Debug)]
pub struct OrientationAdvisor {
    params: ValidationParams,
}

impl OrientationAdvisor {
    pub fn new(params: ValidationParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &ValidationParams {
        &self.params
    }

    /// Evaluate one frame of observations against the puzzle.
    ///
    /// `already_valid` holds piece ids whose success was announced earlier;
    /// they can stay oriented without drawing another pulse. Candidates are
    /// scanned in the puzzle's declared target order with a strict-`<`
    /// best, so the earlier target wins when two are rotationally
    /// equidistant. A piece whose type has no target in the puzzle produces
    /// neither an orientation nor a nudge.
    pub fn evaluate(
        &self,
        pieces: &[PlacedPiece],
        puzzle: &PuzzleDefinition,
        already_valid: &HashSet<String>,
    ) -> OrientationFeedback {
        let mut feedback = OrientationFeedback::default();

        for piece in pieces {
            let current = piece_feature_angle(
                piece.rotation_deg.to_radians(),
                piece.piece_type,
                piece.is_flipped,
            );

            let mut best: Option<(&TargetPiece, f64)> = None;
            for candidate in puzzle.targets_of_type(piece.piece_type) {
                let wanted = target_feature_angle(&candidate.transform, candidate.piece_type);
                let diff = rotation_difference_to_nearest(
                    current,
                    wanted,
                    piece.piece_type,
                    piece.is_flipped,
                );
                match best {
                    Some((_, best_diff)) if diff.abs() >= best_diff.abs() => {}
                    _ => best = Some((candidate, diff)),
                }
            }

            let Some((candidate, diff)) = best else {
                debug!("no {:?} target for piece {}", piece.piece_type, piece.piece_id);
                continue;
            };

            let flip_ok = !piece.piece_type.is_chiral()
                || piece.is_flipped != candidate.transform.is_mirrored();
            let error_deg = diff.abs().to_degrees();
            let rotation_ok = error_deg <= self.params.orientation_tolerance_deg;

            if rotation_ok && flip_ok {
                feedback.oriented.insert(candidate.id.clone());
                if !already_valid.contains(&piece.piece_id) {
                    feedback.nudges.insert(
                        piece.piece_id.clone(),
                        NudgeContent {
                            level: NudgeLevel::Subtle,
                            message: format!("{} looks right", piece.piece_type.label()),
                            visual: VisualHint::Pulse {
                                intensity: PULSE_INTENSITY,
                            },
                            duration_secs: PULSE_DURATION_SECS,
                        },
                    );
                }
            } else if !flip_ok {
                // Flip beats rotation advice: rotating a mirrored
                // parallelogram never lines it up.
                feedback.nudges.insert(
                    piece.piece_id.clone(),
                    NudgeContent {
                        level: NudgeLevel::Gentle,
                        message: format!("Try flipping the {} over", piece.piece_type.label()),
                        visual: VisualHint::FlipDemo,
                        duration_secs: DEMO_DURATION_SECS,
                    },
                );
            } else if error_deg <= self.params.rotation_nudge_upper_deg {
                let rotation = piece.rotation_deg.to_radians();
                // Undo the signed error in the piece's own rotation sense; a
                // flipped chiral piece turns the mirrored way.
                let desired = if piece.piece_type.is_chiral() && piece.is_flipped {
                    normalize_angle(rotation + diff)
                } else {
                    normalize_angle(rotation - diff)
                };
                feedback.nudges.insert(
                    piece.piece_id.clone(),
                    NudgeContent {
                        level: NudgeLevel::Gentle,
                        message: format!("Try rotating the {}", piece.piece_type.label()),
                        visual: VisualHint::RotationDemo {
                            current_deg: piece.rotation_deg,
                            target_deg: desired.to_degrees(),
                        },
                        duration_secs: DEMO_DURATION_SECS,
                    },
                );
            }
        }

        feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point2;
    use tangram_match_core::{ModelTransform, PieceType};

    fn target(id: &str, piece_type: PieceType, model_rotation: f64) -> TargetPiece {
        TargetPiece {
            id: id.to_string(),
            piece_type,
            transform: ModelTransform::from_rotation_translation(model_rotation, 0.0, 0.0),
        }
    }

    fn placed(id: &str, piece_type: PieceType, rotation_deg: f64) -> PlacedPiece {
        PlacedPiece {
            piece_id: id.to_string(),
            piece_type,
            position: Point2::new(0.0, 0.0),
            rotation_deg,
            is_flipped: false,
        }
    }

    fn advisor() -> OrientationAdvisor {
        OrientationAdvisor::new(ValidationParams::default())
    }

    #[test]
    fn aligned_piece_is_oriented_and_pulsed_once() {
        let puzzle = PuzzleDefinition::new(
            "swan",
            vec![target("t1", PieceType::MediumTriangle, 0.0)],
        )
        .unwrap();
        let pieces = vec![placed("p1", PieceType::MediumTriangle, 0.0)];

        let fresh = advisor().evaluate(&pieces, &puzzle, &HashSet::new());
        assert!(fresh.oriented.contains("t1"));
        let nudge = &fresh.nudges["p1"];
        assert_eq!(NudgeLevel::Subtle, nudge.level);
        assert!(matches!(nudge.visual, VisualHint::Pulse { .. }));

        let seen: HashSet<String> = ["p1".to_string()].into();
        let again = advisor().evaluate(&pieces, &puzzle, &seen);
        assert!(again.oriented.contains("t1"));
        assert!(again.nudges.is_empty());
    }

    #[test]
    fn near_miss_gets_a_rotation_demo_not_an_orientation() {
        let puzzle = PuzzleDefinition::new(
            "swan",
            vec![target("t1", PieceType::LargeTriangle1, 0.0)],
        )
        .unwrap();
        // 12° off with a 10° tolerance and a 30° upper bound
        let pieces = vec![placed("p1", PieceType::LargeTriangle1, 12.0)];

        let feedback = advisor().evaluate(&pieces, &puzzle, &HashSet::new());
        assert!(feedback.oriented.is_empty());
        let nudge = &feedback.nudges["p1"];
        assert_eq!(NudgeLevel::Gentle, nudge.level);
        let VisualHint::RotationDemo {
            current_deg,
            target_deg,
        } = nudge.visual
        else {
            panic!("expected a rotation demo, got {:?}", nudge.visual);
        };
        assert_relative_eq!(current_deg, 12.0);
        assert_relative_eq!(target_deg, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn far_off_rotation_stays_silent() {
        let puzzle = PuzzleDefinition::new(
            "swan",
            vec![target("t1", PieceType::LargeTriangle1, 0.0)],
        )
        .unwrap();
        let pieces = vec![placed("p1", PieceType::LargeTriangle1, 48.0)];

        let feedback = advisor().evaluate(&pieces, &puzzle, &HashSet::new());
        assert!(feedback.oriented.is_empty());
        assert!(feedback.nudges.is_empty());
    }

    #[test]
    fn same_handedness_parallelogram_draws_a_flip_demo_even_when_rotation_is_close() {
        let puzzle = PuzzleDefinition::new(
            "swan",
            vec![target("t1", PieceType::Parallelogram, 0.0)],
        )
        .unwrap();
        // Flip state matches the target's handedness (both plain), which the
        // inverted rule reads as wrong.
        let pieces = vec![placed("p1", PieceType::Parallelogram, 0.0)];

        let feedback = advisor().evaluate(&pieces, &puzzle, &HashSet::new());
        assert!(feedback.oriented.is_empty());
        let nudge = &feedback.nudges["p1"];
        assert_eq!(VisualHint::FlipDemo, nudge.visual);
        assert_eq!(NudgeLevel::Gentle, nudge.level);
    }

    #[test]
    fn equidistant_candidates_resolve_to_the_declared_order() {
        let puzzle = PuzzleDefinition::new(
            "swan",
            vec![
                target("first", PieceType::SmallTriangle1, 5f64.to_radians()),
                target("second", PieceType::SmallTriangle1, -5f64.to_radians()),
            ],
        )
        .unwrap();
        // Scene angles of the targets are −5° and +5°; a piece at 0° is
        // equally close to both, so the first declared target wins.
        let pieces = vec![placed("p1", PieceType::SmallTriangle1, 0.0)];

        let feedback = advisor().evaluate(&pieces, &puzzle, &HashSet::new());
        assert!(feedback.oriented.contains("first"));
        assert!(!feedback.oriented.contains("second"));
    }

    #[test]
    fn piece_without_candidates_produces_nothing() {
        let puzzle =
            PuzzleDefinition::new("swan", vec![target("t1", PieceType::Square, 0.0)]).unwrap();
        let pieces = vec![placed("p1", PieceType::Parallelogram, 0.0)];

        let feedback = advisor().evaluate(&pieces, &puzzle, &HashSet::new());
        assert!(feedback.oriented.is_empty());
        assert!(feedback.nudges.is_empty());
    }
}
