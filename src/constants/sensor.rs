//! Presence sensor constants.

/// Back-off after a failed capture read, in milliseconds
pub const SENSOR_RETRY_BACKOFF_MS: u64 = 5;
/// Frame interval for replayed capture sequences (~30 fps)
pub const FRAME_SEQUENCE_INTERVAL_MS: u64 = 33;

/// A finger counts as curled when its middle joint bends below this angle (degrees)
pub const GESTURE_CURL_ANGLE_DEG: f32 = 100.0;
/// Thumb tip must sit within this fraction of the palm length from the index knuckle
pub const GESTURE_THUMB_TUCK_RATIO: f32 = 0.8;

/// Half-width of the square drawn over each landmark when annotating frames
pub const LANDMARK_MARKER_RADIUS: i32 = 1;
/// Landmark marker color
pub const LANDMARK_MARKER_COLOR: [u8; 3] = [0, 255, 0];
