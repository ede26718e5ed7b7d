//! Effective duration detection.
//!
//! Finds the "active" stretches of a signal: contiguous ranges whose
//! magnitude stays at or above a fraction of the signal's peak magnitude.
//! These ranges bound where motion features are worth computing at all.
//!
//! Design: two-state scan
//! - `SearchingStart` counts consecutive samples at or above the threshold
//! - `SearchingEnd` counts consecutive samples below it
//! - when the count reaches `min_duration_frames` the state flips and a
//!   boundary is recorded at the first (start) or last (end) active sample
//!
//! A segment still open when the signal ends is discarded.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ensure_non_empty, FeatureError, Result};
use crate::types::IndexPair;

/// Parameters for effective duration detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationConfig {
    /// Consecutive samples needed to open or close a segment.
    /// Must be > 0. Typical: 5 at 50Hz.
    pub min_duration_frames: usize,

    /// Fraction of the peak absolute amplitude used as the activity threshold.
    /// Must be > 0. Values above 1.0 put the threshold above the peak, so
    /// nothing is ever active. Typical: 0.2.
    pub effective_percentage: f64,
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            min_duration_frames: 1,
            effective_percentage: 0.2,
        }
    }
}

impl DurationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_duration_frames == 0 {
            return Err(FeatureError::invalid("min_duration_frames", "must be greater than zero"));
        }
        if !(self.effective_percentage > 0.0 && self.effective_percentage.is_finite()) {
            return Err(FeatureError::invalid(
                "effective_percentage",
                "must be a finite value greater than zero",
            ));
        }
        Ok(())
    }
}

/// Scan state of the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Waiting for `min_duration_frames` active samples in a row.
    SearchingStart,
    /// Inside a segment, waiting for `min_duration_frames` quiet samples.
    SearchingEnd { start: usize },
}

/// Detects active segments in a signal.
#[derive(Debug, Clone)]
pub struct EffectiveDurationDetector {
    config: DurationConfig,
}

impl EffectiveDurationDetector {
    /// Create a detector, rejecting invalid configuration up front.
    pub fn new(config: DurationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DurationConfig {
        &self.config
    }

    /// Activity threshold for `signal`: peak absolute value times the
    /// configured percentage.
    pub fn threshold(&self, signal: &[f64]) -> Result<f64> {
        ensure_non_empty("signal", signal)?;
        let peak = signal.iter().map(|x| x.abs()).fold(0.0, f64::max);
        Ok(peak * self.config.effective_percentage)
    }

    /// Returns the closed index ranges of every completed active segment,
    /// in signal order.
    pub fn detect(&self, signal: &[f64]) -> Result<Vec<IndexPair>> {
        let threshold = self.threshold(signal)?;
        let min_frames = self.config.min_duration_frames;

        let mut segments = Vec::new();
        let mut state = ScanState::SearchingStart;
        let mut run = 0usize;

        for (pos, value) in signal.iter().map(|x| x.abs()).enumerate() {
            match state {
                ScanState::SearchingStart => {
                    if value >= threshold {
                        run += 1;
                        if run == min_frames {
                            state = ScanState::SearchingEnd {
                                start: pos + 1 - min_frames,
                            };
                            run = 0;
                        }
                    } else {
                        run = 0;
                    }
                }
                ScanState::SearchingEnd { start } => {
                    if value < threshold {
                        run += 1;
                        if run == min_frames {
                            let segment = IndexPair::new(start, pos - min_frames);
                            trace!(start = segment.start, end = segment.end, "active segment");
                            segments.push(segment);
                            state = ScanState::SearchingStart;
                            run = 0;
                        }
                    } else {
                        run = 0;
                    }
                }
            }
        }

        if let ScanState::SearchingEnd { start } = state {
            trace!(start, "discarding segment left open at end of signal");
        }

        Ok(segments)
    }
}

/// One-shot form of [`EffectiveDurationDetector::detect`].
pub fn effective_duration(
    signal: &[f64],
    min_duration_frames: usize,
    effective_percentage: f64,
) -> Result<Vec<IndexPair>> {
    EffectiveDurationDetector::new(DurationConfig {
        min_duration_frames,
        effective_percentage,
    })?
    .detect(signal)
}
