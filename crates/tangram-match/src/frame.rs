//! Typed detection-frame events in scene coordinates.
//!
//! The vision pipeline reports normalized [0, 1] coordinates in model
//! convention (y-down). This module is the one place those are mapped into
//! the fixed reference canvas the renderer expects, and the boundary is a
//! plain struct contract: no field of the upstream result object is read
//! dynamically.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use tangram_match_core::{
    PieceType, MODEL_TO_SCENE_SIGN, REFERENCE_CANVAS_HEIGHT, REFERENCE_CANVAS_WIDTH,
};

/// One raw detection from the vision pipeline, normalized model coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    pub class_id: u32,
    /// Bounding box `[x, y, w, h]` in normalized [0, 1] coordinates.
    pub bbox: [f64; 4],
    /// Integrated pose result; absent when refinement did not converge.
    #[serde(default)]
    pub pose: Option<DetectionPose>,
}

/// Refined per-detection pose in normalized model coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionPose {
    /// Rotation in degrees, model sense.
    pub rotation_deg: f64,
    /// Translation `[x, y]` in normalized [0, 1] coordinates.
    pub translation: [f64; 2],
    /// Refined polygon vertices, normalized; may be empty.
    #[serde(default)]
    pub polygon: Vec<[f64; 2]>,
    /// Upstream homography, row-major. Carried through untouched for future
    /// perspective-aware consumers; nothing here reads it.
    #[serde(default)]
    pub homography: Option<[[f64; 3]; 3]>,
}

/// One detected object mapped into the reference canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub name: String,
    pub class_id: u32,
    /// Rotation in degrees, scene sense.
    pub rotation_deg: f64,
    pub translation: Point2<f64>,
    /// Polygon vertices in scene canvas coordinates.
    pub vertices: Vec<Point2<f64>>,
}

/// Frame-level event bundling every detection of one vision cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameEvent {
    pub objects: Vec<DetectedObject>,
}

/// Map one frame of raw detections into a scene-space event.
///
/// Degrades silently rather than failing: a missing pose falls back to zero
/// rotation and the bbox centre, an empty polygon to the bbox corners, and
/// an unknown class id to a generic `class-{id}` label.
pub fn map_frame(detections: &[RawDetection]) -> FrameEvent {
    FrameEvent {
        objects: detections.iter().map(map_detection).collect(),
    }
}

fn map_detection(det: &RawDetection) -> DetectedObject {
    let name = match PieceType::from_class_id(det.class_id) {
        Some(piece_type) => piece_type.label().to_string(),
        None => format!("class-{}", det.class_id),
    };

    let [bx, by, bw, bh] = det.bbox;
    let bbox_centre = [bx + bw / 2.0, by + bh / 2.0];
    let bbox_corners = vec![
        [bx, by],
        [bx + bw, by],
        [bx + bw, by + bh],
        [bx, by + bh],
    ];

    let (rotation_deg, translation, polygon) = match &det.pose {
        Some(pose) => {
            let polygon = if pose.polygon.is_empty() {
                bbox_corners
            } else {
                pose.polygon.clone()
            };
            (
                MODEL_TO_SCENE_SIGN * pose.rotation_deg,
                pose.translation,
                polygon,
            )
        }
        None => (0.0, bbox_centre, bbox_corners),
    };

    DetectedObject {
        name,
        class_id: det.class_id,
        rotation_deg,
        translation: to_canvas(translation),
        vertices: polygon.into_iter().map(to_canvas).collect(),
    }
}

/// Normalized y-down model coordinates to the y-up reference canvas.
#[inline]
fn to_canvas([nx, ny]: [f64; 2]) -> Point2<f64> {
    Point2::new(
        nx * REFERENCE_CANVAS_WIDTH,
        (1.0 - ny) * REFERENCE_CANVAS_HEIGHT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn missing_pose_falls_back_to_bbox() {
        let det = RawDetection {
            class_id: PieceType::Square.class_id(),
            bbox: [0.25, 0.25, 0.5, 0.5],
            pose: None,
        };
        let event = map_frame(std::slice::from_ref(&det));
        let obj = &event.objects[0];

        assert_eq!("square", obj.name);
        assert_relative_eq!(obj.rotation_deg, 0.0);
        // bbox centre (0.5, 0.5) maps to the canvas midpoint
        assert_relative_eq!(obj.translation.x, REFERENCE_CANVAS_WIDTH / 2.0);
        assert_relative_eq!(obj.translation.y, REFERENCE_CANVAS_HEIGHT / 2.0);
        assert_eq!(4, obj.vertices.len());
        // normalized top-left corner lands at the canvas top-left, y-up
        assert_relative_eq!(obj.vertices[0].x, 0.25 * REFERENCE_CANVAS_WIDTH);
        assert_relative_eq!(obj.vertices[0].y, 0.75 * REFERENCE_CANVAS_HEIGHT);
    }

    #[test]
    fn pose_rotation_flips_sense_and_polygon_maps_into_canvas() {
        let det = RawDetection {
            class_id: PieceType::Parallelogram.class_id(),
            bbox: [0.0, 0.0, 1.0, 1.0],
            pose: Some(DetectionPose {
                rotation_deg: 30.0,
                translation: [0.1, 0.2],
                polygon: vec![[0.0, 0.0], [0.1, 0.0], [0.1, 0.1]],
                homography: None,
            }),
        };
        let event = map_frame(std::slice::from_ref(&det));
        let obj = &event.objects[0];

        assert_eq!("parallelogram", obj.name);
        assert_relative_eq!(obj.rotation_deg, -30.0);
        assert_relative_eq!(obj.translation.x, 0.1 * REFERENCE_CANVAS_WIDTH);
        assert_relative_eq!(obj.translation.y, 0.8 * REFERENCE_CANVAS_HEIGHT);
        assert_eq!(3, obj.vertices.len());
    }

    #[test]
    fn empty_polygon_with_pose_uses_bbox_corners() {
        let det = RawDetection {
            class_id: PieceType::MediumTriangle.class_id(),
            bbox: [0.1, 0.1, 0.2, 0.2],
            pose: Some(DetectionPose {
                rotation_deg: 15.0,
                translation: [0.2, 0.2],
                polygon: Vec::new(),
                homography: Some([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]),
            }),
        };
        let event = map_frame(std::slice::from_ref(&det));
        let obj = &event.objects[0];

        assert_relative_eq!(obj.rotation_deg, -15.0);
        assert_eq!(4, obj.vertices.len());
    }

    #[test]
    fn unknown_class_id_keeps_a_generic_label() {
        let det = RawDetection {
            class_id: 42,
            bbox: [0.0, 0.0, 0.1, 0.1],
            pose: None,
        };
        let event = map_frame(std::slice::from_ref(&det));
        assert_eq!("class-42", event.objects[0].name);
    }
}
