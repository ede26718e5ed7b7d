//! Time-domain helpers built on the integration core.
//!
//! These are small per-signal features that reuse the same conventions as
//! the rest of the crate: unit sample spacing, `&[f64]` signals and
//! [`ChannelMatrix`] for 3-axis data.

use nalgebra::Vector3;

use crate::error::{ensure_non_empty, Result};
use crate::integration::integrate;
use crate::types::{ChannelMatrix, IntegrationDegree};

/// Euclidean magnitude of one 3-axis sample.
pub fn three_axis_amplitude(v: &Vector3<f64>) -> f64 {
    v.norm()
}

/// Magnitude of every column of a 3 × N channel matrix.
pub fn amplitude_track(m: &ChannelMatrix) -> Vec<f64> {
    m.column_iter().map(|column| column.norm()).collect()
}

/// Signal magnitude area: area between `|signal|` and the time axis, using
/// the trapezoid rule with unit spacing.
pub fn signal_magnitude_area(signal: &[f64]) -> Result<f64> {
    let magnitude: Vec<f64> = signal.iter().map(|x| x.abs()).collect();
    integrate(&magnitude, IntegrationDegree::TWO)
}

/// Indices whose magnitude is strictly greater than both neighbours.
///
/// The first and last samples are never peaks.
pub fn peak_indices(signal: &[f64]) -> Vec<usize> {
    signal
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[1].abs() > w[0].abs() && w[1].abs() > w[2].abs())
        .map(|(i, _)| i + 1)
        .collect()
}

/// Indices `i` where the sign changes between `i - 1` and `i`.
///
/// Touching zero counts as a crossing (`x[i-1] · x[i] <= 0`).
pub fn zero_crossing_indices(signal: &[f64]) -> Result<Vec<usize>> {
    ensure_non_empty("signal", signal)?;
    Ok(signal
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] * w[1] <= 0.0)
        .map(|(i, _)| i + 1)
        .collect())
}
