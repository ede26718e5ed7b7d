//! Core data types for motion feature extraction.
//!
//! Signals are plain `&[f64]` slices. Everything with geometric structure
//! (3-vectors, quaternions, multi-channel frames, per-sample orientation
//! tracks) uses nalgebra types so that row counts are fixed by the type
//! system and only the sample count is dynamic.
//!
//! Design principle: if a concept exists, it gets a type. Sample ranges are
//! [`IndexPair`]s, integration orders are [`IntegrationDegree`]s, and frame
//! channels are [`Channel`]s rather than bare integers.

use std::fmt;
use std::str::FromStr;

use nalgebra::{Dyn, Matrix3xX, Matrix4xX, OMatrix, SVector, Vector3, U9};
use serde::{Deserialize, Serialize};

use crate::error::FeatureError;

/// One multi-channel sample: acceleration, magnetic field and angular rate
/// concatenated in that order.
pub type AmgFrame = SVector<f64, 9>;

/// A sequence of [`AmgFrame`]s stored as 9 rows × N columns, one column per
/// time sample.
pub type FrameMatrix = OMatrix<f64, U9, Dyn>;

/// Per-sample orientation quaternions stored as 4 rows × N columns.
///
/// Rows are ordered (w, x, y, z).
pub type RotationTrack = Matrix4xX<f64>;

/// A single channel of a frame matrix: 3 rows × N columns.
pub type ChannelMatrix = Matrix3xX<f64>;

/// Number of components in an [`AmgFrame`].
pub const FRAME_LEN: usize = 9;

/// A sensor channel inside an [`AmgFrame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Accelerometer, components 0..3.
    Accel,
    /// Magnetometer, components 3..6.
    Mag,
    /// Gyroscope, components 6..9.
    Gyro,
}

impl Channel {
    /// All channels in frame order.
    pub const ALL: [Channel; 3] = [Channel::Accel, Channel::Mag, Channel::Gyro];

    /// Channel index within the frame (0, 1 or 2).
    pub fn index(self) -> usize {
        match self {
            Channel::Accel => 0,
            Channel::Mag => 1,
            Channel::Gyro => 2,
        }
    }

    /// Offset of the channel's first component within the frame.
    pub fn offset(self) -> usize {
        self.index() * 3
    }

    /// Looks up a channel by its index within the frame.
    pub fn from_index(index: usize) -> Result<Self, FeatureError> {
        Channel::ALL
            .get(index)
            .copied()
            .ok_or(FeatureError::IndexOutOfBounds { index, len: 3 })
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Accel => "Acce",
            Channel::Mag => "Mag",
            Channel::Gyro => "Gyro",
        };
        f.write_str(name)
    }
}

impl FromStr for Channel {
    type Err = FeatureError;

    /// Accepts the sensor log names (`Acce`, `Mag`, `Gyro`) and their
    /// lowercase forms. `Rot` names the orientation stream, which is not a
    /// frame channel.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Acce" | "acce" | "accel" => Ok(Channel::Accel),
            "Mag" | "mag" => Ok(Channel::Mag),
            "Gyro" | "gyro" => Ok(Channel::Gyro),
            _ => Err(FeatureError::UnknownChannel(s.to_string())),
        }
    }
}

/// A spatial axis of the global reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along this axis.
    pub fn unit(self) -> Vector3<f64> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }
}

/// Inclusive (start, end) sample indices of one active segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexPair {
    /// First sample of the segment.
    pub start: usize,
    /// Last sample of the segment.
    pub end: usize,
}

impl IndexPair {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of samples covered, both ends included.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }

    /// A segment always covers at least one sample.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }

    /// Borrow the covered samples out of `data`.
    ///
    /// Returns `None` if the segment reaches past the end of `data`.
    pub fn slice<'a>(&self, data: &'a [f64]) -> Option<&'a [f64]> {
        data.get(self.start..=self.end)
    }
}

impl From<(usize, usize)> for IndexPair {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

/// Order of the Newton–Cotes stencil used by [`crate::integration::integrate`].
///
/// Only 2, 3 and 4 are valid; the value is checked once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct IntegrationDegree(u8);

impl IntegrationDegree {
    /// Trapezoid rule.
    pub const TWO: IntegrationDegree = IntegrationDegree(2);
    pub const THREE: IntegrationDegree = IntegrationDegree(3);
    pub const FOUR: IntegrationDegree = IntegrationDegree(4);

    pub fn new(degree: u8) -> Result<Self, FeatureError> {
        match degree {
            2..=4 => Ok(IntegrationDegree(degree)),
            other => Err(FeatureError::InvalidDegree(other)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Samples at each end that carry stencil weights instead of weight 1.
    pub fn boundary_len(self) -> usize {
        usize::from(self.0) - 1
    }

    /// Smallest sequence the stencil can be applied to.
    pub fn min_samples(self) -> usize {
        2 * self.boundary_len()
    }
}

impl Default for IntegrationDegree {
    fn default() -> Self {
        IntegrationDegree::TWO
    }
}

impl TryFrom<u8> for IntegrationDegree {
    type Error = FeatureError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        IntegrationDegree::new(value)
    }
}

impl From<IntegrationDegree> for u8 {
    fn from(degree: IntegrationDegree) -> Self {
        degree.0
    }
}
