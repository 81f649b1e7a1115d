use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

use crate::transform::ModelTransform;

/// The seven physical tangram shapes.
///
/// The variant determines the rotational symmetry order, the chirality and
/// the canonical feature-angle offsets used by every comparison.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    SmallTriangle1,
    SmallTriangle2,
    MediumTriangle,
    LargeTriangle1,
    LargeTriangle2,
    Square,
    Parallelogram,
}

impl PieceType {
    /// Number of rotations that map the silhouette onto itself.
    ///
    /// Triangles have no rotational symmetry, the square repeats every 90°
    /// and the parallelogram every 180°.
    #[inline]
    pub fn symmetry_order(self) -> u32 {
        match self {
            PieceType::Square => 4,
            PieceType::Parallelogram => 2,
            _ => 1,
        }
    }

    /// Whether a flip produces a visually distinct silhouette.
    ///
    /// Only the parallelogram is chiral; every other shape is its own
    /// mirror image up to rotation.
    #[inline]
    pub fn is_chiral(self) -> bool {
        matches!(self, PieceType::Parallelogram)
    }

    /// Feature-angle offset of the sprite art relative to its local origin.
    ///
    /// For the right-isoceles triangles and the square this is the diagonal
    /// direction (45°); the parallelogram art is axis-aligned.
    #[inline]
    pub fn canonical_piece_angle(self) -> f64 {
        match self {
            PieceType::Parallelogram => 0.0,
            _ => FRAC_PI_4,
        }
    }

    /// Feature-angle offset of the puzzle-outline geometry.
    ///
    /// The outline assets share the sprite geometry, so the table matches
    /// [`PieceType::canonical_piece_angle`]; kept as a separate entry point
    /// because the two assets are maintained independently.
    #[inline]
    pub fn canonical_target_angle(self) -> f64 {
        self.canonical_piece_angle()
    }

    /// Class id assigned by the detection model.
    #[inline]
    pub fn class_id(self) -> u32 {
        match self {
            PieceType::LargeTriangle1 => 0,
            PieceType::LargeTriangle2 => 1,
            PieceType::MediumTriangle => 2,
            PieceType::Parallelogram => 3,
            PieceType::SmallTriangle1 => 4,
            PieceType::SmallTriangle2 => 5,
            PieceType::Square => 6,
        }
    }

    /// Inverse of [`PieceType::class_id`]; `None` for unknown ids.
    pub fn from_class_id(id: u32) -> Option<PieceType> {
        match id {
            0 => Some(PieceType::LargeTriangle1),
            1 => Some(PieceType::LargeTriangle2),
            2 => Some(PieceType::MediumTriangle),
            3 => Some(PieceType::Parallelogram),
            4 => Some(PieceType::SmallTriangle1),
            5 => Some(PieceType::SmallTriangle2),
            6 => Some(PieceType::Square),
            _ => None,
        }
    }

    /// Class label used by the detection model and the UI.
    pub fn label(self) -> &'static str {
        match self {
            PieceType::LargeTriangle1 => "largeTriangle1",
            PieceType::LargeTriangle2 => "largeTriangle2",
            PieceType::MediumTriangle => "mediumTriangle",
            PieceType::Parallelogram => "parallelogram",
            PieceType::SmallTriangle1 => "smallTriangle1",
            PieceType::SmallTriangle2 => "smallTriangle2",
            PieceType::Square => "square",
        }
    }
}

/// A piece pose in scene-space convention (y-up, radians).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point2<f64>,
    /// Rotation in radians, scene sense.
    pub rotation: f64,
    pub is_flipped: bool,
}

/// One observed piece from a single detection cycle.
///
/// Ephemeral: superseded by the next frame's observation for the same
/// physical piece. Position and rotation are already in scene convention;
/// rotation is in degrees as delivered by the vision adapter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub piece_id: String,
    pub piece_type: PieceType,
    pub position: Point2<f64>,
    pub rotation_deg: f64,
    #[serde(default)]
    pub is_flipped: bool,
}

/// One target slot of a puzzle definition, in model space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetPiece {
    pub id: String,
    pub piece_type: PieceType,
    pub transform: ModelTransform,
}

/// Errors raised when assembling a puzzle definition.
#[derive(thiserror::Error, Debug)]
pub enum PuzzleError {
    #[error("duplicate target id `{id}`")]
    DuplicateTargetId { id: String },
}

/// An ordered collection of target pieces with unique ids.
///
/// The declared order matters: candidate scans resolve rotation ties in
/// favour of the earlier target. Deserialization goes through
/// [`PuzzleDefinition::new`], so the unique-id invariant also holds for
/// puzzles loaded from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPuzzleDefinition")]
pub struct PuzzleDefinition {
    pub name: String,
    pieces: Vec<TargetPiece>,
}

#[derive(Deserialize)]
struct RawPuzzleDefinition {
    name: String,
    pieces: Vec<TargetPiece>,
}

impl TryFrom<RawPuzzleDefinition> for PuzzleDefinition {
    type Error = PuzzleError;

    fn try_from(raw: RawPuzzleDefinition) -> Result<Self, Self::Error> {
        PuzzleDefinition::new(raw.name, raw.pieces)
    }
}

impl PuzzleDefinition {
    /// Build a puzzle, rejecting duplicate target ids.
    pub fn new(name: impl Into<String>, pieces: Vec<TargetPiece>) -> Result<Self, PuzzleError> {
        let mut seen = std::collections::HashSet::new();
        for piece in &pieces {
            if !seen.insert(piece.id.as_str()) {
                return Err(PuzzleError::DuplicateTargetId {
                    id: piece.id.clone(),
                });
            }
        }
        Ok(Self {
            name: name.into(),
            pieces,
        })
    }

    /// All target pieces in declared order.
    #[inline]
    pub fn pieces(&self) -> &[TargetPiece] {
        &self.pieces
    }

    /// Look up a target by id.
    pub fn target(&self, id: &str) -> Option<&TargetPiece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Targets of the given type, in declared order.
    pub fn targets_of_type(
        &self,
        piece_type: PieceType,
    ) -> impl Iterator<Item = &TargetPiece> + '_ {
        self.pieces.iter().filter(move |p| p.piece_type == piece_type)
    }
}
