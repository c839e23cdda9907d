use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Waveform shapes the table generator can evaluate
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveformKind {
    Pulse,
    Sine,
}

impl WaveformKind {
    /// Evaluate this waveform at time offset `t` (seconds)
    pub fn value(&self, t: f64, cfg: &WaveformConfig) -> f64 {
        match self {
            WaveformKind::Pulse => pulse_value(t, cfg),
            WaveformKind::Sine => sine_value(t, cfg),
        }
    }
}

/// Per-evaluation waveform parameters.
///
/// Every field has a documented default, so callers only set what they need:
///
/// ```
/// use wavegen::WaveformConfig;
///
/// let cfg = WaveformConfig::new(40.0).with_gain(5.0);
/// assert_eq!(cfg.tolerance, 0.001);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformConfig {
    /// Signal frequency in Hz (default 10.0)
    pub frequency: f64,
    /// Pulse amplitude (default 1.0)
    pub gain: f64,
    /// Half-cycle boundary snap distance for pulses (default 0.001)
    pub tolerance: f64,
    /// Phase offset in radians (default 0.0)
    pub phase: f64,
}

impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            frequency: 10.0,
            gain: 1.0,
            tolerance: 0.001,
            phase: 0.0,
        }
    }
}

impl WaveformConfig {
    /// Create a configuration for the given frequency with default
    /// gain, tolerance, and phase
    pub fn new(frequency: f64) -> Self {
        Self {
            frequency,
            ..Self::default()
        }
    }

    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }
}

/// Instantaneous sine value at time offset `t` (seconds):
/// `sin(2π · frequency · t + phase)`.
///
/// `gain` and `tolerance` are accepted for parity with [`pulse_value`] but
/// are not applied; the result is the raw unit-amplitude sine. Downstream
/// table consumers depend on the unscaled output, so callers that want a
/// scaled sine must multiply themselves.
pub fn sine_value(t: f64, cfg: &WaveformConfig) -> f64 {
    (TAU * cfg.frequency * t + cfg.phase).sin()
}

/// Instantaneous square-pulse value at time offset `t` (seconds), either
/// `0.0` or `cfg.gain`.
///
/// The wave is high wherever the underlying sine is non-negative. Sample
/// points that land within `cfg.tolerance` of a half-cycle boundary are
/// snapped: even boundaries (rising edges) are forced high, odd boundaries
/// (falling edges) forced low. The even-boundary check takes precedence, and
/// `t == 0` is always high.
pub fn pulse_value(t: f64, cfg: &WaveformConfig) -> f64 {
    if t == 0.0 {
        return cfg.gain;
    }

    // Half-periods elapsed since t = 0
    let half_cycles = cfg.frequency * t / 0.5;
    let nearest = half_cycles.round();
    let on_boundary = (nearest - half_cycles).abs() < cfg.tolerance;

    if on_boundary && nearest as u64 % 2 == 0 {
        cfg.gain
    } else if sine_value(t, cfg) < 0.0 || (on_boundary && nearest as u64 % 2 == 1) {
        0.0
    } else {
        cfg.gain
    }
}
