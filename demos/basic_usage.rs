/// Basic usage example: integrate one axis of acceleration, then run the
/// full pipeline over a short recording
use motion_features::distance::displacement;
use motion_features::duration::effective_duration;
use motion_features::rotation::{frames_from_samples, identity_rotation, pack_frame, track_from_quaternions};
use motion_features::{
    IntegrationDegree, MotionPipeline, PipelineConfig, StillnessAwareVelocityIntegrator,
    StillnessConfig,
};
use nalgebra::Vector3;

fn main() -> motion_features::Result<()> {
    println!("=== Motion Features: Basic Example ===\n");

    // Single axis at 50Hz: accelerate, brake, then sit still with jitter
    let mut accel = vec![0.8; 25];
    accel.extend(vec![-0.8; 25]);
    accel.extend(vec![0.02, -0.03, 0.01, 0.0, -0.02].repeat(10));

    let stillness = StillnessConfig {
        delta: 0.02,
        noise_threshold: 0.05,
        stationary_run: Some(5),
        ..Default::default()
    };
    let integrator = StillnessAwareVelocityIntegrator::new(stillness.clone())?;
    let profile = integrator.profile(&accel)?;

    println!("Samples:            {}", accel.len());
    println!("Final velocity:     {:.4}", profile.final_velocity());
    println!("Stationary samples: {}", profile.stationary_samples());

    let distance = displacement(&profile.velocity, stillness.delta, IntegrationDegree::THREE, None)?;
    println!("Displacement:       {:.4}", distance);

    for segment in effective_duration(&accel, 5, 0.2)? {
        println!("Active segment:     {}..={}", segment.start, segment.end);
    }

    // Same motion on the global x axis of a full AMG recording
    let frames: Vec<_> = accel
        .iter()
        .map(|&a| pack_frame(&Vector3::new(a, 0.0, 0.0), &Vector3::zeros(), &Vector3::zeros()))
        .collect();
    let track = track_from_quaternions(&vec![identity_rotation(); frames.len()]);

    let config = PipelineConfig {
        noise_threshold: [0.05; 3],
        stationary_run: Some(5),
        ..PipelineConfig::with_uniform_delta(0.02)
    };
    let summary = MotionPipeline::new(config)?.summarize(&track, &frames_from_samples(&frames))?;

    println!("\n=== Pipeline Summary ===");
    println!("{:#?}", summary);

    Ok(())
}
