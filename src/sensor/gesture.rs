//! Hand-pose classification from landmark geometry.
//!
//! Landmarks follow the common 21-point hand layout (wrist, then four joints
//! per finger from thumb to pinky) in normalized image coordinates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const MIDDLE_MCP: usize = 9;

/// (knuckle, middle joint, tip) for index, middle, ring and pinky
const FINGERS: [(usize, usize, usize); 4] = [(5, 6, 8), (9, 10, 12), (13, 14, 16), (17, 18, 20)];

/// One detected hand
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLandmarks {
    pub points: [Vec2; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Vec2; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Wrist to middle knuckle; the scale every positional threshold is relative to
    pub fn palm_length(&self) -> f32 {
        self.points[WRIST].distance(self.points[MIDDLE_MCP])
    }
}

/// Calibration for [`classify`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    /// Middle-joint angle (degrees) below which a finger counts as curled
    pub curl_angle_deg: f32,
    /// Thumb tip distance to the index knuckle, as a fraction of palm length
    pub thumb_tuck_ratio: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            curl_angle_deg: GESTURE_CURL_ANGLE_DEG,
            thumb_tuck_ratio: GESTURE_THUMB_TUCK_RATIO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// All four fingers curled and the thumb tucked in
    Fist,
}

/// Angle at `joint` between the segments to `a` and `b`, in degrees.
/// A straight finger reads close to 180.
fn joint_angle_deg(a: Vec2, joint: Vec2, b: Vec2) -> f32 {
    let u = a - joint;
    let v = b - joint;
    let denom = u.length() * v.length();
    if denom <= f32::EPSILON {
        return 180.0;
    }
    (u.dot(v) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Classify a single hand. Pure function of the landmarks and thresholds.
pub fn classify(hand: &HandLandmarks, thresholds: &GestureThresholds) -> Option<Gesture> {
    let palm = hand.palm_length();
    if palm <= f32::EPSILON {
        return None;
    }

    let p = &hand.points;
    let fingers_curled = FINGERS.iter().all(|&(mcp, pip, tip)| {
        joint_angle_deg(p[mcp], p[pip], p[tip]) < thresholds.curl_angle_deg
    });
    let thumb_tucked = p[THUMB_TIP].distance(p[INDEX_MCP]) < thresholds.thumb_tuck_ratio * palm;

    (fingers_curled && thumb_tucked).then_some(Gesture::Fist)
}
