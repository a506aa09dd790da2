//! Silence gating with an adaptive noise floor

/// Per-frame energy gate.
///
/// Keeps a smoothed estimate of the background noise energy. A frame whose
/// mean energy stays below `noise_floor * threshold` counts as silence and
/// drags the floor toward its own energy; louder frames leave the floor
/// untouched. A long loud passage therefore freezes the floor, so the first
/// quiet frame after it may still be classified silent against the old
/// estimate.
#[derive(Debug, Clone)]
pub struct SilenceDetector {
    noise_floor: f64,
    initial_floor: f64,
    alpha: f64,
    threshold: f64,
}

impl SilenceDetector {
    /// Detector with the stock tuning: initial floor 1e-6, smoothing 0.95,
    /// threshold factor 3.
    pub fn new() -> Self {
        Self::with_tuning(1e-6, 0.95, 3.0)
    }

    /// Detector with explicit tuning. `alpha` is the exponential smoothing
    /// factor for the noise floor (clamped into [0, 1]); `threshold` is the
    /// factor a frame's energy must exceed the floor by to count as voiced.
    pub fn with_tuning(noise_floor: f64, alpha: f64, threshold: f64) -> Self {
        SilenceDetector {
            noise_floor,
            initial_floor: noise_floor,
            alpha: alpha.clamp(0.0, 1.0),
            threshold,
        }
    }

    /// Current noise floor estimate.
    pub fn noise_floor(&self) -> f64 {
        self.noise_floor
    }

    /// Forget everything learned and return to the initial floor.
    pub fn reset(&mut self) {
        self.noise_floor = self.initial_floor;
    }

    /// Check one frame against the adaptive threshold. Empty frames are
    /// silent.
    pub fn is_silence(&mut self, frame: &[f32]) -> bool {
        if frame.is_empty() {
            return true;
        }

        let mut energy = 0.0f64;
        for &v in frame {
            let v = v as f64;
            energy += v * v;
        }
        energy /= frame.len() as f64;

        // update the floor estimate only while below threshold
        if energy < self.noise_floor * self.threshold {
            self.noise_floor = self.alpha * self.noise_floor + (1.0 - self.alpha) * energy;
        }

        energy < self.noise_floor * self.threshold
    }
}

impl Default for SilenceDetector {
    fn default() -> Self {
        Self::new()
    }
}
