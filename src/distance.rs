//! Displacement from velocity.
//!
//! Net displacement is the Newton–Cotes integral of the velocity sequence
//! scaled by the sample spacing. Fed angular rate instead of velocity, the
//! same computation yields an integrated rotation angle.

use crate::error::Result;
use crate::filter::maybe_filter;
use crate::integration::integrate;
use crate::types::IntegrationDegree;
use crate::velocity::{validate_delta, StillnessAwareVelocityIntegrator, StillnessConfig};

/// Default stencil for displacement.
pub const DEFAULT_DISTANCE_DEGREE: IntegrationDegree = IntegrationDegree::THREE;

/// `delta · integrate(velocity, degree)`, optionally smoothing `velocity`
/// with a boxcar of the given half-width first.
pub fn displacement(
    velocity: &[f64],
    delta: f64,
    degree: IntegrationDegree,
    smoothing_half_width: Option<usize>,
) -> Result<f64> {
    validate_delta(delta)?;
    let samples = maybe_filter(velocity, smoothing_half_width)?;
    Ok(delta * integrate(&samples, degree)?)
}

/// Integrates acceleration to velocity under `stillness`, then velocity to
/// displacement with the same spacing.
///
/// Smoothing, when configured, is applied to the acceleration only.
pub fn distance_from_acceleration(
    accel: &[f64],
    stillness: &StillnessConfig,
    degree: IntegrationDegree,
) -> Result<f64> {
    let integrator = StillnessAwareVelocityIntegrator::new(stillness.clone())?;
    let velocity = integrator.integrate(accel)?;
    displacement(&velocity, stillness.delta, degree, None)
}
