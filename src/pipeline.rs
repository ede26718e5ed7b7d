//! Motion feature pipeline over multi-channel frame sequences.
//!
//! This module ties the rotation and integration stages together:
//! 1. **Rotation**: every AMG frame is rotated into the global reference
//!    frame by the orientation quaternion recorded for that sample
//! 2. **Channel extraction**: the acceleration or gyroscope channel is sliced
//!    out as a 3 × N matrix
//! 3. **Per-axis integration**: each global axis is integrated on its own,
//!    with its own spacing, initial velocity and noise threshold
//!
//! Acceleration goes through the stillness-aware velocity integrator (and
//! the distance estimator for displacement). Angular rate is integrated
//! directly, with optional smoothing but no stillness suppression, giving
//! the rotation angle about each global axis.
//!
//! Each call processes one fixed, in-memory recording and keeps no state
//! between calls.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distance::{displacement, DEFAULT_DISTANCE_DEGREE};
use crate::duration::{DurationConfig, EffectiveDurationDetector};
use crate::error::Result;
use crate::features::amplitude_track;
use crate::rotation::{rotate_frame_matrix, unpack_channel};
use crate::types::{Axis, Channel, ChannelMatrix, FrameMatrix, IndexPair, IntegrationDegree, RotationTrack};
use crate::velocity::{StillnessAwareVelocityIntegrator, StillnessConfig};

/// Configuration for the motion pipeline.
///
/// Array fields are indexed by global axis (x, y, z).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Sample spacing per axis. Typical: 1 / sample rate. Default: 1.0.
    pub delta: [f64; 3],

    /// Velocity at the first sample, per axis. Default: 0.0.
    pub init_velocity: [f64; 3],

    /// Acceleration magnitude treated as zero, per axis. Default: 0.0 (off).
    pub noise_threshold: [f64; 3],

    /// Zero samples in a row that must be exceeded before velocity is reset.
    /// Shared by all axes. Default: `None` (no reset).
    pub stationary_run: Option<usize>,

    /// Boxcar half-width applied before integration. Default: `None`.
    pub smoothing_half_width: Option<usize>,

    /// Stencil used for displacement and rotation angle. Default: 3.
    pub degree: IntegrationDegree,

    /// Active segment detection on the global acceleration magnitude.
    pub duration: DurationConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            delta: [1.0; 3],
            init_velocity: [0.0; 3],
            noise_threshold: [0.0; 3],
            stationary_run: None,
            smoothing_half_width: None,
            degree: DEFAULT_DISTANCE_DEGREE,
            duration: DurationConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Same spacing on every axis, e.g. `1.0 / sample_rate_hz`.
    pub fn with_uniform_delta(delta: f64) -> Self {
        Self {
            delta: [delta; 3],
            ..Default::default()
        }
    }

    /// Velocity integration parameters for one global axis.
    pub fn stillness_for(&self, axis: Axis) -> StillnessConfig {
        let i = axis.index();
        StillnessConfig {
            delta: self.delta[i],
            init_velocity: self.init_velocity[i],
            noise_threshold: self.noise_threshold[i],
            stationary_run: self.stationary_run,
            smoothing_half_width: self.smoothing_half_width,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for axis in Axis::ALL {
            self.stillness_for(axis).validate()?;
        }
        self.duration.validate()
    }
}

/// Every per-recording feature the pipeline produces.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionSummary {
    /// Number of samples in the recording.
    pub samples: usize,
    /// Velocity at the last sample, per global axis.
    pub final_velocity: Vector3<f64>,
    /// Net displacement, per global axis.
    pub displacement: Vector3<f64>,
    /// Integrated rotation angle about each global axis.
    pub rotation_angle: Vector3<f64>,
    /// Active stretches of the global acceleration magnitude.
    pub active_segments: Vec<IndexPair>,
}

/// Rotates frame sequences into the global frame and integrates them.
#[derive(Debug, Clone)]
pub struct MotionPipeline {
    config: PipelineConfig,
    integrators: [StillnessAwareVelocityIntegrator; 3],
    duration_detector: EffectiveDurationDetector,
}

impl MotionPipeline {
    /// Creates a pipeline, validating the whole configuration up front.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let [x, y, z] = Axis::ALL.map(|axis| config.stillness_for(axis));

        Ok(Self {
            integrators: [
                StillnessAwareVelocityIntegrator::new(x)?,
                StillnessAwareVelocityIntegrator::new(y)?,
                StillnessAwareVelocityIntegrator::new(z)?,
            ],
            duration_detector: EffectiveDurationDetector::new(config.duration.clone())?,
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Rotates every frame by its sample's orientation.
    pub fn rotate(&self, track: &RotationTrack, frames: &FrameMatrix) -> Result<FrameMatrix> {
        debug!(samples = frames.ncols(), "rotating frames into global frame");
        rotate_frame_matrix(track, frames)
    }

    /// One channel of the rotated frames as a 3 × N matrix.
    pub fn global_channel(
        &self,
        track: &RotationTrack,
        frames: &FrameMatrix,
        channel: Channel,
    ) -> Result<ChannelMatrix> {
        Ok(unpack_channel(&self.rotate(track, frames)?, channel))
    }

    /// Velocity at the last sample along each global axis.
    pub fn final_velocity(&self, track: &RotationTrack, frames: &FrameMatrix) -> Result<Vector3<f64>> {
        let accel = self.global_channel(track, frames, Channel::Accel)?;
        self.final_velocity_of(&accel)
    }

    /// Net displacement along each global axis.
    pub fn displacement(&self, track: &RotationTrack, frames: &FrameMatrix) -> Result<Vector3<f64>> {
        let accel = self.global_channel(track, frames, Channel::Accel)?;
        self.displacement_of(&accel)
    }

    /// Integrated rotation angle about each global axis.
    pub fn rotation_angle(&self, track: &RotationTrack, frames: &FrameMatrix) -> Result<Vector3<f64>> {
        let gyro = self.global_channel(track, frames, Channel::Gyro)?;
        self.rotation_angle_of(&gyro)
    }

    /// Active segments of the global acceleration magnitude.
    pub fn active_segments(
        &self,
        track: &RotationTrack,
        frames: &FrameMatrix,
    ) -> Result<Vec<IndexPair>> {
        let accel = self.global_channel(track, frames, Channel::Accel)?;
        self.duration_detector.detect(&amplitude_track(&accel))
    }

    /// Computes every feature from a single rotation pass.
    pub fn summarize(&self, track: &RotationTrack, frames: &FrameMatrix) -> Result<MotionSummary> {
        let rotated = self.rotate(track, frames)?;
        let accel = unpack_channel(&rotated, Channel::Accel);
        let gyro = unpack_channel(&rotated, Channel::Gyro);

        let summary = MotionSummary {
            samples: frames.ncols(),
            final_velocity: self.final_velocity_of(&accel)?,
            displacement: self.displacement_of(&accel)?,
            rotation_angle: self.rotation_angle_of(&gyro)?,
            active_segments: self.duration_detector.detect(&amplitude_track(&accel))?,
        };
        debug!(
            samples = summary.samples,
            segments = summary.active_segments.len(),
            "motion summary complete"
        );
        Ok(summary)
    }

    fn final_velocity_of(&self, accel: &ChannelMatrix) -> Result<Vector3<f64>> {
        let mut result = Vector3::zeros();
        for axis in Axis::ALL {
            let i = axis.index();
            result[i] = self.integrators[i].final_velocity(&axis_samples(accel, axis))?;
        }
        debug!(?result, "final velocity");
        Ok(result)
    }

    fn displacement_of(&self, accel: &ChannelMatrix) -> Result<Vector3<f64>> {
        let mut result = Vector3::zeros();
        for axis in Axis::ALL {
            let i = axis.index();
            let velocity = self.integrators[i].integrate(&axis_samples(accel, axis))?;
            result[i] = displacement(&velocity, self.config.delta[i], self.config.degree, None)?;
        }
        debug!(?result, "displacement");
        Ok(result)
    }

    fn rotation_angle_of(&self, gyro: &ChannelMatrix) -> Result<Vector3<f64>> {
        let mut result = Vector3::zeros();
        for axis in Axis::ALL {
            let i = axis.index();
            result[i] = displacement(
                &axis_samples(gyro, axis),
                self.config.delta[i],
                self.config.degree,
                self.config.smoothing_half_width,
            )?;
        }
        debug!(?result, "rotation angle");
        Ok(result)
    }
}

fn axis_samples(m: &ChannelMatrix, axis: Axis) -> Vec<f64> {
    m.row(axis.index()).iter().copied().collect()
}
