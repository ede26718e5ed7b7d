//! Boxcar (moving-average) smoothing with boundary clamping.
//!
//! The window for sample `i` is `[i - half_width, i + half_width]`, clipped
//! to the valid index range. Near the edges the window shrinks instead of
//! wrapping or padding, so edge averages are taken over fewer samples.
//!
//! A half-width of 0 is the identity filter.

use std::ops::Range;

use crate::error::{ensure_non_empty, FeatureError, Result};

/// Mean of `data` over the clamped window centred on `index`.
pub fn filtered_value(data: &[f64], half_width: usize, index: usize) -> Result<f64> {
    ensure_non_empty("data", data)?;
    if index >= data.len() {
        return Err(FeatureError::IndexOutOfBounds {
            index,
            len: data.len(),
        });
    }

    Ok(window_mean(data, half_width, index))
}

/// Smooths the half-open index range `range`, returning one value per index.
pub fn filter_range(data: &[f64], half_width: usize, range: Range<usize>) -> Result<Vec<f64>> {
    ensure_non_empty("data", data)?;
    if range.start > range.end || range.end > data.len() {
        return Err(FeatureError::InvalidRange {
            start: range.start,
            end: range.end,
            len: data.len(),
        });
    }

    Ok(range.map(|i| window_mean(data, half_width, i)).collect())
}

/// Smooths the whole sequence.
pub fn filter(data: &[f64], half_width: usize) -> Result<Vec<f64>> {
    filter_range(data, half_width, 0..data.len())
}

/// Smooths when `half_width` is set, otherwise returns a copy of `data`.
///
/// Both paths reject empty input so callers see the same error either way.
pub(crate) fn maybe_filter(data: &[f64], half_width: Option<usize>) -> Result<Vec<f64>> {
    match half_width {
        Some(width) => filter(data, width),
        None => {
            ensure_non_empty("data", data)?;
            Ok(data.to_vec())
        }
    }
}

fn window_mean(data: &[f64], half_width: usize, index: usize) -> f64 {
    let low = index.saturating_sub(half_width);
    let high = index.saturating_add(half_width).min(data.len() - 1);

    let window = &data[low..=high];
    window.iter().sum::<f64>() / window.len() as f64
}
