//! Newton–Cotes numerical integration over sampled data.
//!
//! [`integrate`] assumes unit spacing between samples; scale the result by
//! the sample period to get physical units. Every interior sample carries
//! weight 1 and the stencil only changes the weights of the first and last
//! `degree - 1` samples:
//!
//! - degree 2: `(d[0] + d[n-1]) / 2`
//! - degree 3: `(d[0] + 5·d[1] + 5·d[n-2] + d[n-1]) / 6`
//! - degree 4: `(d[0] + 4·d[1] + 7·d[2] + 7·d[n-3] + 4·d[n-2] + d[n-1]) / 8`
//!
//! Higher degrees leave part of the last interval uncovered, so for a
//! constant signal `c` the result is `c·(n - degree + 1)`.
//!
//! Reference: <https://en.wikipedia.org/wiki/Newton%E2%80%93Cotes_formulas>

use crate::error::{ensure_non_empty, FeatureError, Result};
use crate::types::IntegrationDegree;

/// Definite integral of `data` with unit sample spacing.
///
/// Fails if `data` is shorter than `degree.min_samples()`, which is the
/// smallest length where the two boundary stencils do not overlap.
pub fn integrate(data: &[f64], degree: IntegrationDegree) -> Result<f64> {
    ensure_non_empty("data", data)?;

    let n = data.len();
    if n < degree.min_samples() {
        return Err(FeatureError::TooShort {
            degree: degree.get(),
            required: degree.min_samples(),
            actual: n,
        });
    }

    let edge = degree.boundary_len();
    let interior: f64 = data[edge..n - edge].iter().sum();

    let boundary = match degree.get() {
        2 => (data[0] + data[n - 1]) / 2.0,
        3 => (data[0] + 5.0 * data[1] + 5.0 * data[n - 2] + data[n - 1]) / 6.0,
        _ => {
            (data[0]
                + 4.0 * data[1]
                + 7.0 * data[2]
                + 7.0 * data[n - 3]
                + 4.0 * data[n - 2]
                + data[n - 1])
                / 8.0
        }
    };

    Ok(interior + boundary)
}

/// Trapezoidal integral over non-uniform spacing.
///
/// `deltas[i]` is the spacing between `data[i]` and `data[i + 1]`, so
/// `deltas` must be exactly one element shorter than `data`.
pub fn integrate_with_delta(data: &[f64], deltas: &[f64]) -> Result<f64> {
    ensure_non_empty("data", data)?;

    if deltas.len() != data.len() - 1 {
        return Err(FeatureError::LengthMismatch {
            what: "deltas must have one element fewer than data",
            expected: data.len() - 1,
            actual: deltas.len(),
        });
    }

    Ok(data
        .windows(2)
        .zip(deltas)
        .map(|(pair, delta)| (pair[0] + pair[1]) / 2.0 * delta)
        .sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_trapezoid_small_sequence() {
        let result = integrate(&[1.0, 2.0, 3.0, 4.0, 5.0], IntegrationDegree::TWO).unwrap();
        assert!((result - 12.0).abs() < EPS);
    }

    #[test]
    fn test_degree_three_weights() {
        // interior: data[2..4] = 3 + 4, boundary: (1 + 10 + 25 + 6) / 6 = 7
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let result = integrate(&data, IntegrationDegree::THREE).unwrap();
        assert!((result - 14.0).abs() < EPS);
    }

    #[test]
    fn test_degree_four_weights() {
        // interior: data[3..4] = 4, boundary: (1 + 8 + 21 + 35 + 24 + 7) / 8 = 12
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let result = integrate(&data, IntegrationDegree::FOUR).unwrap();
        assert!((result - 16.0).abs() < EPS);
    }

    #[test]
    fn test_constant_signal_per_degree() {
        let data = vec![2.5; 20];
        let two = integrate(&data, IntegrationDegree::TWO).unwrap();
        let three = integrate(&data, IntegrationDegree::THREE).unwrap();
        let four = integrate(&data, IntegrationDegree::FOUR).unwrap();

        assert!((two - 2.5 * 19.0).abs() < EPS);
        assert!((three - 2.5 * 18.0).abs() < EPS);
        assert!((four - 2.5 * 17.0).abs() < EPS);
    }

    #[test]
    fn test_minimum_lengths() {
        assert!(integrate(&[1.0, 1.0], IntegrationDegree::TWO).is_ok());
        assert!(integrate(&[1.0], IntegrationDegree::TWO).is_err());
        assert!(integrate(&[1.0; 4], IntegrationDegree::THREE).is_ok());
        assert_eq!(
            integrate(&[1.0; 5], IntegrationDegree::FOUR),
            Err(FeatureError::TooShort {
                degree: 4,
                required: 6,
                actual: 5
            })
        );
        assert_eq!(
            integrate(&[], IntegrationDegree::TWO),
            Err(FeatureError::EmptyInput("data"))
        );
    }

    #[test]
    fn test_integrate_with_delta() {
        let data = [0.0, 2.0, 4.0];
        let deltas = [0.5, 1.5];
        // (0 + 2) / 2 * 0.5 + (2 + 4) / 2 * 1.5 = 0.5 + 4.5
        let result = integrate_with_delta(&data, &deltas).unwrap();
        assert!((result - 5.0).abs() < EPS);
    }

    #[test]
    fn test_integrate_with_unit_delta_matches_trapezoid() {
        let data = [1.0, -2.0, 6.0, 7.0, 3.0];
        let deltas = [1.0; 4];
        let with_delta = integrate_with_delta(&data, &deltas).unwrap();
        let uniform = integrate(&data, IntegrationDegree::TWO).unwrap();
        assert!((with_delta - uniform).abs() < EPS);
    }

    #[test]
    fn test_integrate_with_delta_length_mismatch() {
        let result = integrate_with_delta(&[1.0, 2.0, 3.0], &[1.0]);
        assert!(matches!(result, Err(FeatureError::LengthMismatch { .. })));
        assert!(integrate_with_delta(&[], &[]).is_err());
        assert_eq!(integrate_with_delta(&[3.0], &[]).unwrap(), 0.0);
    }
}
