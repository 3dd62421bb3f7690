//! The player's torch: presence-gated light with a sinusoidal flicker.

use serde::{Deserialize, Serialize};

use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorchConfig {
    pub base_radius: f32,
    /// Radians added to the flicker angle per lit frame
    pub flicker_speed: f32,
    pub flicker_amplitude: f32,
}

impl Default for TorchConfig {
    fn default() -> Self {
        Self {
            base_radius: TORCH_BASE_RADIUS,
            flicker_speed: TORCH_FLICKER_SPEED,
            flicker_amplitude: TORCH_FLICKER_AMPLITUDE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Torch {
    config: TorchConfig,
    angle: f32,
    radius: f32,
}

impl Torch {
    pub fn new(config: TorchConfig) -> Self {
        Self {
            config,
            angle: 0.0,
            radius: 0.0,
        }
    }

    /// Advance one frame. Returns the reveal radius in whole tiles while lit,
    /// `None` otherwise. The flicker only moves while the torch is lit.
    pub fn advance(&mut self, lit: bool) -> Option<i32> {
        if !lit {
            self.radius = 0.0;
            return None;
        }

        self.angle += self.config.flicker_speed;
        self.radius = self.config.base_radius + self.config.flicker_amplitude * self.angle.sin();
        Some(self.radius as i32)
    }

    /// Fractional radius from the last frame, 0 when unlit
    pub fn light_radius(&self) -> f32 {
        self.radius
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }
}

impl Default for Torch {
    fn default() -> Self {
        Self::new(TorchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlit_torch_reveals_nothing() {
        let mut torch = Torch::default();
        assert_eq!(torch.advance(false), None);
        assert_eq!(torch.light_radius(), 0.0);
        assert_eq!(torch.angle(), 0.0);
    }

    #[test]
    fn test_flicker_stays_around_base() {
        let mut torch = Torch::default();
        // sin(0.1) ~ 0.0998, so the first lit frame is 7.0998 -> 7
        assert_eq!(torch.advance(true), Some(7));
        assert!((torch.light_radius() - 7.0998).abs() < 1e-3);

        for _ in 0..200 {
            let r = torch.advance(true).unwrap();
            assert!((6..=8).contains(&r));
        }
    }

    #[test]
    fn test_angle_pauses_while_unlit() {
        let mut torch = Torch::default();
        torch.advance(true);
        torch.advance(true);
        let angle = torch.angle();
        torch.advance(false);
        torch.advance(false);
        assert_eq!(torch.angle(), angle);
        torch.advance(true);
        assert!((torch.angle() - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_trough_truncates_down() {
        let mut torch = Torch::new(TorchConfig {
            flicker_speed: -std::f32::consts::FRAC_PI_2,
            ..TorchConfig::default()
        });
        // sin(-pi/2) = -1 -> 6.0, may land just under
        let r = torch.advance(true).unwrap();
        assert!(r == 6 || r == 5);
        assert!((torch.light_radius() - 6.0).abs() < 1e-4);
    }
}
