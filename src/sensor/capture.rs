//! Capture device abstraction and a file-backed implementation.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use image::RgbImage;

use super::SensorError;
use crate::constants::*;

/// A source of camera frames, driven from the sensor thread.
pub trait CaptureDevice: Send + 'static {
    /// Acquire the device. Called once, before the sensor thread starts.
    fn open(&mut self) -> Result<(), SensorError>;

    /// Block until the next frame is available. `None` is a transient read
    /// failure; the caller retries.
    fn read_frame(&mut self) -> Option<RgbImage>;

    /// Give the device back. Called once, from the sensor thread, on shutdown.
    fn release(&mut self);
}

/// Replays a fixed list of image files in a loop at a steady cadence.
/// Unreadable files count as failed reads.
pub struct FrameSequence {
    paths: Vec<PathBuf>,
    interval: Duration,
    cursor: usize,
    last_frame: Option<Instant>,
    opened: bool,
}

impl FrameSequence {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            interval: Duration::from_millis(FRAME_SEQUENCE_INTERVAL_MS),
            cursor: 0,
            last_frame: None,
            opened: false,
        }
    }

    /// Every regular file in `dir`, in name order.
    pub fn from_dir(dir: &Path) -> Result<Self, SensorError> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            SensorError::DeviceUnavailable(format!("Failed to read {}: {}", dir.display(), e))
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        Ok(Self::new(paths))
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }

    fn wait_for_cadence(&mut self) {
        if let Some(last) = self.last_frame {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                std::thread::sleep(self.interval - elapsed);
            }
        }
        self.last_frame = Some(Instant::now());
    }
}

impl CaptureDevice for FrameSequence {
    fn open(&mut self) -> Result<(), SensorError> {
        if self.paths.is_empty() {
            return Err(SensorError::DeviceUnavailable(
                "frame sequence has no frames".to_string(),
            ));
        }
        if let Some(missing) = self.paths.iter().find(|p| !p.is_file()) {
            return Err(SensorError::DeviceUnavailable(format!(
                "missing frame {}",
                missing.display()
            )));
        }
        self.opened = true;
        Ok(())
    }

    fn read_frame(&mut self) -> Option<RgbImage> {
        if !self.opened || self.paths.is_empty() {
            return None;
        }

        self.wait_for_cadence();
        let path = &self.paths[self.cursor];
        self.cursor = (self.cursor + 1) % self.paths.len();

        match image::open(path) {
            Ok(img) => Some(img.into_rgb8()),
            Err(e) => {
                tracing::trace!(path = %path.display(), error = %e, "frame read failed");
                None
            }
        }
    }

    fn release(&mut self) {
        self.opened = false;
        self.last_frame = None;
    }
}
