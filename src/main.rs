//! Motion Feature Extraction demo
//!
//! Runs the motion pipeline over a synthetic recording and prints the
//! resulting summary. An optional TOML config path may be given as the
//! first argument.

use anyhow::{Context, Result};
use nalgebra::Vector3;
use tracing::{info, warn};

use motion_features::rotation::{frames_from_samples, from_axis_angle, pack_frame, track_from_quaternions};
use motion_features::{load_config, MotionPipeline, PipelineConfig};

const SAMPLE_RATE_HZ: f64 = 100.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "motion_features=info".into()),
        )
        .init();

    info!("Motion Feature Extraction v{}", env!("CARGO_PKG_VERSION"));

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path).with_context(|| format!("loading {path}"))?,
        None => {
            warn!("No config given, using defaults for {SAMPLE_RATE_HZ} Hz");
            PipelineConfig {
                noise_threshold: [0.05; 3],
                stationary_run: Some(10),
                ..PipelineConfig::with_uniform_delta(1.0 / SAMPLE_RATE_HZ)
            }
        }
    };

    let (track, frames) = synthetic_recording();
    let pipeline = MotionPipeline::new(config)?;
    let summary = pipeline.summarize(&track, &frames)?;

    println!("Samples:        {}", summary.samples);
    println!("Final velocity: {:.3?}", summary.final_velocity.as_slice());
    println!("Displacement:   {:.3?}", summary.displacement.as_slice());
    println!("Rotation angle: {:.3?}", summary.rotation_angle.as_slice());
    for segment in &summary.active_segments {
        println!("Active:         samples {}..={}", segment.start, segment.end);
    }

    Ok(())
}

/// Three seconds of a device that pushes forward, brakes and rests while
/// slowly yawing. Acceleration is gravity-compensated.
fn synthetic_recording() -> (motion_features::RotationTrack, motion_features::FrameMatrix) {
    let n = (3.0 * SAMPLE_RATE_HZ) as usize;
    let yaw_rate = 0.2;
    let mag = Vector3::new(0.3, 0.0, -0.4);

    let mut orientations = Vec::with_capacity(n);
    let mut samples = Vec::with_capacity(n);
    for i in 0..n {
        let t = i as f64 / SAMPLE_RATE_HZ;
        let accel = match t {
            t if t < 1.0 => Vector3::new(1.0, 0.0, 0.0),
            t if t < 2.0 => Vector3::new(-1.0, 0.0, 0.0),
            _ => Vector3::new(0.01, -0.01, 0.0),
        };
        let gyro = Vector3::new(0.0, 0.0, yaw_rate);

        orientations.push(from_axis_angle(&Vector3::z(), yaw_rate * t));
        samples.push(pack_frame(&accel, &mag, &gyro));
    }

    (track_from_quaternions(&orientations), frames_from_samples(&samples))
}
