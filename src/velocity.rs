//! Stillness-aware velocity integration.
//!
//! Integrating raw acceleration drifts without bound: sensor noise and
//! residual bias accumulate into a velocity that never returns to zero. This
//! integrator counters drift in two ways:
//!
//! 1. Noise suppression: samples with `|a| < noise_threshold` become exactly 0.
//! 2. Zero-velocity reset: once more than `stationary_run` consecutive samples
//!    are zero, the device is `Stationary` and velocity is forced to exactly
//!    0.0 until a non-zero sample arrives.
//!
//! Otherwise velocity accumulates trapezoidally:
//! `v[i] = v[i-1] + (a[i-1] + a[i]) / 2 · delta`.
//!
//! All edits happen on a private copy of the input.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ensure_non_empty, FeatureError, Result};
use crate::filter::maybe_filter;

/// Magnitude below which a suppressed sample counts as zero.
pub const ZERO_EPSILON: f64 = 1e-7;

/// Parameters for velocity integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StillnessConfig {
    /// Sample spacing (the sample period for uniformly sampled data).
    /// Must be finite and > 0. Default: 1.0 (dimensionless).
    pub delta: f64,

    /// Velocity at the first sample. Default: 0.0.
    pub init_velocity: f64,

    /// Acceleration magnitude treated as exact zero.
    /// Must be >= 0. 0.0 disables noise suppression.
    pub noise_threshold: f64,

    /// Zero samples in a row (K) that must be exceeded before velocity is
    /// forced to zero. `None` disables the reset. Must be > 0 when set.
    pub stationary_run: Option<usize>,

    /// Boxcar half-width for optional pre-smoothing. `None` disables it.
    /// Typical: 2.
    pub smoothing_half_width: Option<usize>,
}

impl Default for StillnessConfig {
    fn default() -> Self {
        Self {
            delta: 1.0,
            init_velocity: 0.0,
            noise_threshold: 0.0,
            stationary_run: None,
            smoothing_half_width: None,
        }
    }
}

impl StillnessConfig {
    pub fn validate(&self) -> Result<()> {
        validate_delta(self.delta)?;
        if !self.init_velocity.is_finite() {
            return Err(FeatureError::invalid("init_velocity", "must be finite"));
        }
        if !(self.noise_threshold >= 0.0 && self.noise_threshold.is_finite()) {
            return Err(FeatureError::invalid(
                "noise_threshold",
                "must be a finite value >= 0",
            ));
        }
        if self.stationary_run == Some(0) {
            return Err(FeatureError::invalid("stationary_run", "must be greater than zero"));
        }
        Ok(())
    }
}

pub(crate) fn validate_delta(delta: f64) -> Result<()> {
    if delta > 0.0 && delta.is_finite() {
        Ok(())
    } else {
        Err(FeatureError::invalid("delta", "must be a finite value greater than zero"))
    }
}

/// Whether the device is considered moving at a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionState {
    /// Velocity accumulates from acceleration.
    Moving,
    /// Velocity is pinned to zero.
    Stationary,
}

/// Consecutive-zero counter driving the `Moving`/`Stationary` transition.
#[derive(Debug, Clone)]
struct StillnessTracker {
    zero_run: usize,
    min_run: Option<usize>,
    state: MotionState,
}

impl StillnessTracker {
    fn new(min_run: Option<usize>) -> Self {
        Self {
            zero_run: 0,
            min_run,
            state: MotionState::Moving,
        }
    }

    fn observe(&mut self, index: usize, sample: f64) -> MotionState {
        if sample.abs() < ZERO_EPSILON {
            self.zero_run += 1;
        } else {
            self.zero_run = 0;
        }

        let next = match self.min_run {
            Some(k) if self.zero_run > k => MotionState::Stationary,
            _ => MotionState::Moving,
        };
        if next != self.state {
            trace!(index, zero_run = self.zero_run, state = ?next, "stillness transition");
            self.state = next;
        }
        next
    }
}

/// Per-sample velocity together with the state used for each sample.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityProfile {
    pub velocity: Vec<f64>,
    pub states: Vec<MotionState>,
}

impl VelocityProfile {
    /// Velocity at the last sample.
    pub fn final_velocity(&self) -> f64 {
        self.velocity.last().copied().unwrap_or(0.0)
    }

    /// Number of samples pinned to zero by the stationary reset.
    pub fn stationary_samples(&self) -> usize {
        self.states
            .iter()
            .filter(|s| **s == MotionState::Stationary)
            .count()
    }
}

/// Integrates acceleration into velocity with noise suppression and
/// zero-velocity reset.
#[derive(Debug, Clone)]
pub struct StillnessAwareVelocityIntegrator {
    config: StillnessConfig,
}

impl StillnessAwareVelocityIntegrator {
    pub fn new(config: StillnessConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StillnessConfig {
        &self.config
    }

    /// Velocity and motion state for every sample.
    pub fn profile(&self, accel: &[f64]) -> Result<VelocityProfile> {
        let mut samples = maybe_filter(accel, self.config.smoothing_half_width)?;
        suppress_noise(&mut samples, self.config.noise_threshold);

        let mut tracker = StillnessTracker::new(self.config.stationary_run);
        let mut velocity = Vec::with_capacity(samples.len());
        let mut states = Vec::with_capacity(samples.len());

        velocity.push(self.config.init_velocity);
        states.push(MotionState::Moving);

        for i in 1..samples.len() {
            let state = tracker.observe(i, samples[i]);
            let v = match state {
                MotionState::Stationary => 0.0,
                MotionState::Moving => {
                    velocity[i - 1] + (samples[i - 1] + samples[i]) / 2.0 * self.config.delta
                }
            };
            velocity.push(v);
            states.push(state);
        }

        Ok(VelocityProfile { velocity, states })
    }

    /// Velocity for every sample.
    pub fn integrate(&self, accel: &[f64]) -> Result<Vec<f64>> {
        Ok(self.profile(accel)?.velocity)
    }

    /// Velocity at the last sample.
    pub fn final_velocity(&self, accel: &[f64]) -> Result<f64> {
        Ok(self.profile(accel)?.final_velocity())
    }
}

/// Sets every sample with `|x| < threshold` to exactly zero.
pub fn suppress_noise(samples: &mut [f64], threshold: f64) {
    for sample in samples.iter_mut() {
        if sample.abs() < threshold {
            *sample = 0.0;
        }
    }
}

/// Velocity sequence for `accel` under `config`.
pub fn velocity(accel: &[f64], config: &StillnessConfig) -> Result<Vec<f64>> {
    ensure_non_empty("accel", accel)?;
    StillnessAwareVelocityIntegrator::new(config.clone())?.integrate(accel)
}

/// Last element of [`velocity`].
pub fn final_velocity(accel: &[f64], config: &StillnessConfig) -> Result<f64> {
    ensure_non_empty("accel", accel)?;
    StillnessAwareVelocityIntegrator::new(config.clone())?.final_velocity(accel)
}
