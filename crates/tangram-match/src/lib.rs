//! Placement validation and orientation feedback for tangram puzzles.
//!
//! This crate decides, from per-frame vision observations and a puzzle
//! definition, whether each physical piece sits on its target within the
//! configured tolerances, and what corrective nudge to show when it almost
//! does. The geometry lives in [`tangram_match_core`], re-exported here as
//! [`core`].
//!
//! ## Quickstart
//!
//! ```
//! use tangram_match::core::{ModelTransform, PieceType, PlacedPiece, TargetPiece};
//! use tangram_match::{PieceValidator, ValidationParams};
//! use nalgebra::Point2;
//!
//! let target = TargetPiece {
//!     id: "sq".into(),
//!     piece_type: PieceType::Square,
//!     transform: ModelTransform::from_rotation_translation(0.0, 100.0, 200.0),
//! };
//! let placed = PlacedPiece {
//!     piece_id: "p1".into(),
//!     piece_type: PieceType::Square,
//!     position: Point2::new(100.0, -200.0),
//!     rotation_deg: 0.0,
//!     is_flipped: false,
//! };
//!
//! let validator = PieceValidator::new(ValidationParams::default());
//! assert!(validator.validate(&placed, &target));
//! ```
//!
//! ## API map
//! - [`core`]: piece taxonomy, transforms, scene mapping, angle math.
//! - [`PieceValidator`]: per-pair validation against one target.
//! - [`OrientationAdvisor`]: pre-anchor candidate search and nudges.
//! - [`map_frame`]: typed detection-frame events in scene coordinates.

pub use tangram_match_core as core;

mod feedback;
mod frame;
mod params;
mod validate;

pub use feedback::{
    NudgeContent, NudgeLevel, OrientationAdvisor, OrientationFeedback, VisualHint,
};
pub use frame::{map_frame, DetectedObject, DetectionPose, FrameEvent, RawDetection};
pub use params::ValidationParams;
pub use validate::{PieceValidator, ValidationResult};
