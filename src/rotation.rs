//! Quaternion rotation of 3-vectors and multi-channel frames.
//!
//! Orientation quaternions are supplied by the caller (one per sample); this
//! module never estimates attitude. It only applies a given orientation to
//! local-frame measurements to express them in the global reference frame.
//!
//! Quaternions use (w, x, y, z) order with w the scalar part. Rotation is
//! only correct for unit quaternions, and unit norm is NOT enforced: callers
//! normalize explicitly with [`normalize_quaternion`] when their source is
//! not already normalized.
//!
//! An [`AmgFrame`] packs acceleration, magnetic and gyroscope vectors at
//! offsets 0, 3 and 6. Rotating a frame rotates each channel independently
//! by the same quaternion.

use nalgebra::{Quaternion, SVector, Vector3};

use crate::error::{FeatureError, Result};
use crate::types::{AmgFrame, Channel, ChannelMatrix, FrameMatrix, RotationTrack};

/// Identity rotation (w = 1).
pub fn identity_rotation() -> Quaternion<f64> {
    Quaternion::new(1.0, 0.0, 0.0, 0.0)
}

/// Quaternion from explicit components.
pub fn quaternion(w: f64, x: f64, y: f64, z: f64) -> Quaternion<f64> {
    Quaternion::new(w, x, y, z)
}

/// Rotation of `angle` radians about `axis`.
///
/// `axis` is assumed to be unit length already; it is not normalized here.
pub fn from_axis_angle(axis: &Vector3<f64>, angle: f64) -> Quaternion<f64> {
    let half = angle / 2.0;
    let s = half.sin();
    Quaternion::new(half.cos(), s * axis.x, s * axis.y, s * axis.z)
}

/// Divides every component by the Euclidean norm.
///
/// Works the same for 3-vectors and 4-vectors (or any fixed dimension).
pub fn normalize<const D: usize>(v: &SVector<f64, D>) -> Result<SVector<f64, D>> {
    let norm = v.norm();
    if norm == 0.0 || !norm.is_finite() {
        return Err(FeatureError::ZeroNorm);
    }
    Ok(v / norm)
}

/// Unit-norm copy of `q`.
pub fn normalize_quaternion(q: &Quaternion<f64>) -> Result<Quaternion<f64>> {
    Ok(Quaternion::from_vector(normalize(&q.coords)?))
}

/// Rotates `v` by `q`: `v + 2w·(u×v) + 2·(u×(u×v))` with `u` the vector part.
///
/// Equivalent to `q·v·q*` for unit `q`, without building the intermediate
/// quaternion products.
pub fn rotate(q: &Quaternion<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    let u = Vector3::new(q.i, q.j, q.k);
    let uv = u.cross(v);
    let uuv = u.cross(&uv);

    v + uv * (2.0 * q.w) + uuv * 2.0
}

/// Concatenates three channel vectors into one frame.
pub fn pack_frame(accel: &Vector3<f64>, mag: &Vector3<f64>, gyro: &Vector3<f64>) -> AmgFrame {
    AmgFrame::from_fn(|r, _| {
        let source = match r / 3 {
            0 => accel,
            1 => mag,
            _ => gyro,
        };
        source[r % 3]
    })
}

/// Slices one channel vector out of a frame.
pub fn unpack_frame(frame: &AmgFrame, channel: Channel) -> Vector3<f64> {
    let o = channel.offset();
    Vector3::new(frame[o], frame[o + 1], frame[o + 2])
}

/// Rotates each channel of `frame` by the same quaternion.
pub fn rotate_frame(q: &Quaternion<f64>, frame: &AmgFrame) -> AmgFrame {
    let [accel, mag, gyro] = Channel::ALL.map(|channel| rotate(q, &unpack_frame(frame, channel)));
    pack_frame(&accel, &mag, &gyro)
}

/// Quaternion stored in column `index` of a rotation track.
///
/// Panics if `index` is out of bounds, like slice indexing.
pub fn quaternion_at(track: &RotationTrack, index: usize) -> Quaternion<f64> {
    Quaternion::new(
        track[(0, index)],
        track[(1, index)],
        track[(2, index)],
        track[(3, index)],
    )
}

/// Builds a rotation track from per-sample quaternions.
pub fn track_from_quaternions(quaternions: &[Quaternion<f64>]) -> RotationTrack {
    RotationTrack::from_fn(quaternions.len(), |r, c| {
        let q = &quaternions[c];
        match r {
            0 => q.w,
            1 => q.i,
            2 => q.j,
            _ => q.k,
        }
    })
}

/// Builds a frame matrix from per-sample frames.
pub fn frames_from_samples(frames: &[AmgFrame]) -> FrameMatrix {
    FrameMatrix::from_fn(frames.len(), |r, c| frames[c][r])
}

/// Rotates every sample by the quaternion at the same column of `track`.
///
/// Orientation may vary per sample. The track and the frames must have the
/// same number of columns.
pub fn rotate_frame_matrix(track: &RotationTrack, frames: &FrameMatrix) -> Result<FrameMatrix> {
    if track.ncols() != frames.ncols() {
        return Err(FeatureError::LengthMismatch {
            what: "rotation track and frame matrix sample counts",
            expected: frames.ncols(),
            actual: track.ncols(),
        });
    }

    let mut rotated = FrameMatrix::zeros(frames.ncols());
    for (i, column) in frames.column_iter().enumerate() {
        let q = quaternion_at(track, i);
        rotated.set_column(i, &rotate_frame(&q, &column.into_owned()));
    }
    Ok(rotated)
}

/// Rotates every sample by one fixed quaternion.
pub fn rotate_frame_matrix_fixed(q: &Quaternion<f64>, frames: &FrameMatrix) -> FrameMatrix {
    let mut rotated = FrameMatrix::zeros(frames.ncols());
    for (i, column) in frames.column_iter().enumerate() {
        rotated.set_column(i, &rotate_frame(q, &column.into_owned()));
    }
    rotated
}

/// Extracts one channel of every sample as a 3 × N matrix.
pub fn unpack_channel(frames: &FrameMatrix, channel: Channel) -> ChannelMatrix {
    let o = channel.offset();
    ChannelMatrix::from_fn(frames.ncols(), |r, c| frames[(o + r, c)])
}

/// Interleaves three 3 × N channel matrices into a frame matrix.
pub fn pack_frame_matrix(
    accel: &ChannelMatrix,
    mag: &ChannelMatrix,
    gyro: &ChannelMatrix,
) -> Result<FrameMatrix> {
    let n = accel.ncols();
    for (what, other) in [("magnetic channel sample count", mag), ("gyroscope channel sample count", gyro)] {
        if other.ncols() != n {
            return Err(FeatureError::LengthMismatch {
                what,
                expected: n,
                actual: other.ncols(),
            });
        }
    }

    Ok(FrameMatrix::from_fn(n, |r, c| {
        let source = match r / 3 {
            0 => accel,
            1 => mag,
            _ => gyro,
        };
        source[(r % 3, c)]
    }))
}
