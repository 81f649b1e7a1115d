use serde::{Deserialize, Serialize};

/// Suggested pulse intensity for a success nudge.
pub const PULSE_INTENSITY: f64 = 0.35;
/// Display duration of a success pulse, in seconds.
pub const PULSE_DURATION_SECS: f64 = 0.6;
/// Display duration of a flip or rotation demonstration, in seconds.
pub const DEMO_DURATION_SECS: f64 = 2.0;

/// Tolerances for placement validation and orientation feedback.
///
/// All fields are plain session configuration: callers override them per
/// session, or rebuild a validator with different values per call.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ValidationParams {
    /// Max scene-space distance between a piece and its target (strict `<`).
    #[serde(default = "default_position_tolerance")]
    pub position_tolerance: f64,
    /// Rotation tolerance in degrees for anchored validation.
    #[serde(default = "default_rotation_tolerance_deg")]
    pub rotation_tolerance_deg: f64,
    /// Rotation tolerance in degrees for pre-anchor orientation matching.
    #[serde(default = "default_orientation_tolerance_deg")]
    pub orientation_tolerance_deg: f64,
    /// Rotation errors beyond this bound (degrees) draw no nudge at all.
    #[serde(default = "default_rotation_nudge_upper_deg")]
    pub rotation_nudge_upper_deg: f64,
}

fn default_position_tolerance() -> f64 {
    25.0
}

fn default_rotation_tolerance_deg() -> f64 {
    10.0
}

fn default_orientation_tolerance_deg() -> f64 {
    10.0
}

fn default_rotation_nudge_upper_deg() -> f64 {
    30.0
}

impl Default for ValidationParams {
    fn default() -> Self {
        Self {
            position_tolerance: default_position_tolerance(),
            rotation_tolerance_deg: default_rotation_tolerance_deg(),
            orientation_tolerance_deg: default_orientation_tolerance_deg(),
            rotation_nudge_upper_deg: default_rotation_nudge_upper_deg(),
        }
    }
}
