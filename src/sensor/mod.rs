//! Background presence/gesture sensing.
//!
//! A [`SensorBridge`] owns one capture device and one thread. The thread reads
//! frames at the device's own pace, runs hand detection, and publishes the
//! newest result under a single lock. The game loop only ever reads that
//! latest sample and never waits for a new one.

pub mod capture;
pub mod gesture;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::constants::*;

pub use capture::{CaptureDevice, FrameSequence};
pub use gesture::{classify, Gesture, GestureThresholds, HandLandmarks};

/// Error type for sensor startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorError {
    /// The capture device could not be opened
    DeviceUnavailable(String),
    /// The background thread could not be started
    ThreadSpawn(String),
}

impl std::fmt::Display for SensorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorError::DeviceUnavailable(msg) => write!(f, "Capture device unavailable: {}", msg),
            SensorError::ThreadSpawn(msg) => write!(f, "Failed to start sensor thread: {}", msg),
        }
    }
}

impl std::error::Error for SensorError {}

/// Hand detection over a single frame. Runs on the sensor thread.
pub trait HandModel: Send + 'static {
    /// Every hand found in `frame`; empty when there is none.
    fn detect(&mut self, frame: &RgbImage) -> Vec<HandLandmarks>;
}

/// Presence and gesture flags taken from the same published sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presence {
    pub present: bool,
    pub gesture: bool,
}

/// Anything the game loop can ask "is a hand there?"
pub trait PresenceSource {
    /// Both flags from one reading; they never come from two different frames.
    fn presence(&self) -> Presence;
}

/// The latest published detection result
#[derive(Debug, Clone, Default)]
pub struct SensorSample {
    pub present: bool,
    pub gesture: bool,
    /// Annotated capture frame
    pub frame: Option<RgbImage>,
    /// When this sample was published; `None` before the first frame
    pub timestamp: Option<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Pause after a failed capture read before trying again
    pub retry_backoff_ms: u64,
    pub gesture: GestureThresholds,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            retry_backoff_ms: SENSOR_RETRY_BACKOFF_MS,
            gesture: GestureThresholds::default(),
        }
    }
}

/// Draw a small square over every landmark.
pub fn annotate(frame: &mut RgbImage, hands: &[HandLandmarks]) {
    let (width, height) = frame.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let r = LANDMARK_MARKER_RADIUS;

    for hand in hands {
        for point in &hand.points {
            let (Some(cx), Some(cy)) = (marker_center(point.x, width), marker_center(point.y, height)) else {
                continue;
            };
            for y in (cy - r)..=(cy + r) {
                for x in (cx - r)..=(cx + r) {
                    if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
                        frame.put_pixel(x as u32, y as u32, Rgb(LANDMARK_MARKER_COLOR));
                    }
                }
            }
        }
    }
}

/// Pixel coordinate of a normalized landmark, or `None` when its marker would
/// fall entirely outside a frame `extent` pixels wide. Non-finite input is `None`.
fn marker_center(norm: f32, extent: u32) -> Option<i32> {
    let r = LANDMARK_MARKER_RADIUS as f32;
    let c = (norm * (extent - 1) as f32).round();
    (c >= -r && c <= (extent - 1) as f32 + r).then_some(c as i32)
}

fn lock_sample(shared: &Mutex<SensorSample>) -> MutexGuard<'_, SensorSample> {
    // A panic mid-publish leaves a complete sample behind; keep using it
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct SensorBridge {
    shared: Arc<Mutex<SensorSample>>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SensorBridge {
    /// Open `device` and start the sensor thread.
    ///
    /// An open failure is returned here and no thread is started.
    pub fn start<D, M>(mut device: D, model: M, config: SensorConfig) -> Result<Self, SensorError>
    where
        D: CaptureDevice,
        M: HandModel,
    {
        device.open()?;
        // Released when dropped, including if the thread never starts
        let device = ReleaseOnDrop(device);

        let shared = Arc::new(Mutex::new(SensorSample::default()));
        let running = Arc::new(AtomicBool::new(true));

        let worker_shared = Arc::clone(&shared);
        let worker_running = Arc::clone(&running);
        let handle = thread::Builder::new()
            .name("sensor-bridge".to_string())
            .spawn(move || detect_loop(device, model, config, worker_shared, worker_running))
            .map_err(|e| SensorError::ThreadSpawn(e.to_string()))?;

        tracing::info!("sensor bridge started");

        Ok(Self {
            shared,
            running,
            handle: Some(handle),
        })
    }

    pub fn is_present(&self) -> bool {
        lock_sample(&self.shared).present
    }

    pub fn is_gesture(&self) -> bool {
        lock_sample(&self.shared).gesture
    }

    /// Copy of the most recent annotated frame
    pub fn latest_frame(&self) -> Option<RgbImage> {
        lock_sample(&self.shared).frame.clone()
    }

    pub fn presence(&self) -> Presence {
        let sample = lock_sample(&self.shared);
        Presence {
            present: sample.present,
            gesture: sample.gesture,
        }
    }

    pub fn latest_sample(&self) -> SensorSample {
        lock_sample(&self.shared).clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Ask the thread to finish its current iteration, wait for it, and let it
    /// release the device. Safe to call more than once.
    pub fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        self.running.store(false, Ordering::Relaxed);
        if handle.join().is_err() {
            tracing::warn!("sensor thread panicked");
        }
        tracing::info!("sensor bridge stopped");
    }
}

impl PresenceSource for SensorBridge {
    fn presence(&self) -> Presence {
        SensorBridge::presence(self)
    }
}

impl Drop for SensorBridge {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Owns an opened device and releases it when dropped, unwinding included.
struct ReleaseOnDrop<D: CaptureDevice>(D);

impl<D: CaptureDevice> Drop for ReleaseOnDrop<D> {
    fn drop(&mut self) {
        self.0.release();
        tracing::debug!("capture device released");
    }
}

fn detect_loop<D: CaptureDevice, M: HandModel>(
    mut device: ReleaseOnDrop<D>,
    mut model: M,
    config: SensorConfig,
    shared: Arc<Mutex<SensorSample>>,
    running: Arc<AtomicBool>,
) {
    let backoff = Duration::from_millis(config.retry_backoff_ms);

    while running.load(Ordering::Relaxed) {
        let Some(mut frame) = device.0.read_frame() else {
            // A failed read says nothing about presence; keep the last sample
            if !backoff.is_zero() {
                thread::sleep(backoff);
            }
            continue;
        };

        let hands = model.detect(&frame);
        let present = !hands.is_empty();
        let gesture = hands
            .iter()
            .any(|hand| classify(hand, &config.gesture).is_some());
        annotate(&mut frame, &hands);

        let mut sample = lock_sample(&shared);
        *sample = SensorSample {
            present,
            gesture,
            frame: Some(frame),
            timestamp: Some(Instant::now()),
        };
    }
}
