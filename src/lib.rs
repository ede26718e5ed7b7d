//! Motion Feature Extraction Library
//!
//! Numerical building blocks for turning inertial sensor recordings into
//! motion features: velocity, displacement, rotation angle and the active
//! stretches of a recording.
//!
//! # Design Philosophy
//!
//! - **Drift resistance**: acceleration noise is suppressed and velocity is
//!   pinned to zero once the device has been still long enough, so
//!   integration error does not accumulate through rest periods.
//! - **Explicit contracts**: bad parameters and malformed sequences are
//!   reported as [`FeatureError`] values, never panics or partial results.
//! - **Pure computation**: every operation is a synchronous function of its
//!   inputs over one in-memory recording.
//!
//! # Example
//!
//! ```
//! use motion_features::integration::integrate;
//! use motion_features::types::IntegrationDegree;
//!
//! let area = integrate(&[1.0, 2.0, 3.0, 4.0, 5.0], IntegrationDegree::TWO).unwrap();
//! assert!((area - 12.0).abs() < 1e-12);
//! ```

pub mod config;
pub mod distance;
pub mod duration;
pub mod error;
pub mod features;
pub mod filter;
pub mod integration;
pub mod pipeline;
pub mod rotation;
pub mod types;
pub mod velocity;

#[cfg(test)]
mod integration_tests;

// Re-export commonly used types
pub use config::{load_config, ConfigError};
pub use duration::{DurationConfig, EffectiveDurationDetector};
pub use error::{FeatureError, Result};
pub use pipeline::{MotionPipeline, MotionSummary, PipelineConfig};
pub use types::{
    AmgFrame, Axis, Channel, ChannelMatrix, FrameMatrix, IndexPair, IntegrationDegree,
    RotationTrack,
};
pub use velocity::{StillnessAwareVelocityIntegrator, StillnessConfig, VelocityProfile};
