/// Integration tests for the complete motion feature pipeline
/// Exercises realistic recordings end to end: rotation into the global
/// frame, stillness-aware integration, displacement and segment detection.

#[cfg(test)]
mod integration_tests {
    use crate::config::from_toml_str;
    use crate::duration::effective_duration;
    use crate::features::{amplitude_track, peak_indices};
    use crate::pipeline::*;
    use crate::rotation::*;
    use crate::types::*;
    use crate::FeatureError;
    use nalgebra::{Quaternion, Vector3};
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    /// Helper: build a recording from per-sample orientation and
    /// device-frame acceleration and angular rate
    fn recording(
        orientations: &[Quaternion<f64>],
        accel: &[Vector3<f64>],
        gyro: &[Vector3<f64>],
    ) -> (RotationTrack, FrameMatrix) {
        let frames: Vec<AmgFrame> = accel
            .iter()
            .zip(gyro)
            .map(|(a, g)| pack_frame(a, &Vector3::zeros(), g))
            .collect();
        (track_from_quaternions(orientations), frames_from_samples(&frames))
    }

    /// Helper: device yawing at `rate` rad per sample about global z
    fn yawing(n: usize, rate: f64) -> Vec<Quaternion<f64>> {
        (0..n)
            .map(|i| from_axis_angle(&Vector3::z(), rate * i as f64))
            .collect()
    }

    #[test]
    fn test_reference_acceleration_through_pipeline() {
        let accel: Vec<Vector3<f64>> = [1.0, -2.0, 6.0, 7.0, 3.0, 10.0, 21.0, 15.0, -5.0, 2.0]
            .iter()
            .map(|&a| Vector3::new(a, 0.0, 0.0))
            .collect();
        let n = accel.len();
        let (track, frames) = recording(&vec![identity_rotation(); n], &accel, &vec![Vector3::zeros(); n]);

        let pipeline = MotionPipeline::new(PipelineConfig::default()).unwrap();
        let v = pipeline.final_velocity(&track, &frames).unwrap();
        assert!((v.x - 56.5).abs() < EPS);
        assert_eq!(v.y, 0.0);
        assert_eq!(v.z, 0.0);
    }

    #[test]
    fn test_varying_orientation_recovers_global_acceleration() {
        // The device turns while the body accelerates along global x, so
        // the device-frame reading rotates the other way.
        let n = 51;
        let rate = 0.05;
        let orientations = yawing(n, rate);
        let global = Vector3::new(1.0, 0.0, 0.0);
        let accel: Vec<Vector3<f64>> = orientations
            .iter()
            .map(|q| rotate(&q.conjugate(), &global))
            .collect();
        let gyro = vec![Vector3::new(0.0, 0.0, rate); n];
        let (track, frames) = recording(&orientations, &accel, &gyro);

        let config = PipelineConfig {
            degree: IntegrationDegree::TWO,
            ..Default::default()
        };
        let summary = MotionPipeline::new(config).unwrap().summarize(&track, &frames).unwrap();

        assert_eq!(summary.samples, n);
        assert!((summary.final_velocity.x - 50.0).abs() < 1e-6);
        assert!(summary.final_velocity.y.abs() < 1e-6);
        // v[i] = i, trapezoid over 0..=50
        assert!((summary.displacement.x - 1250.0).abs() < 1e-6);
        // yaw axis is unchanged by a yaw rotation
        assert!((summary.rotation_angle.z - rate * (n - 1) as f64).abs() < EPS);
    }

    #[test]
    fn test_fixed_tilt_moves_gyro_to_global_axis() {
        let n = 20;
        let q = from_axis_angle(&Vector3::y(), FRAC_PI_2);
        // device x points along global -z
        let gyro = vec![Vector3::new(0.1, 0.0, 0.0); n];
        let (track, frames) = recording(&vec![q; n], &vec![Vector3::zeros(); n], &gyro);

        let config = PipelineConfig {
            degree: IntegrationDegree::TWO,
            ..Default::default()
        };
        let angle = MotionPipeline::new(config).unwrap().rotation_angle(&track, &frames).unwrap();
        assert!(angle.x.abs() < EPS);
        assert!((angle.z + 0.1 * (n - 1) as f64).abs() < EPS);
    }

    #[test]
    fn test_rest_period_does_not_drift() {
        // push, brake, then rest with sensor jitter on every axis
        let mut accel = vec![Vector3::new(1.0, 0.5, 0.0); 10];
        accel.extend(vec![Vector3::new(-1.0, -0.5, 0.0); 10]);
        accel.extend((0..40).map(|i| {
            let jitter = if i % 2 == 0 { 0.03 } else { -0.03 };
            Vector3::new(jitter, -jitter, jitter)
        }));
        let n = accel.len();
        let (track, frames) = recording(&vec![identity_rotation(); n], &accel, &vec![Vector3::zeros(); n]);

        let config = PipelineConfig {
            noise_threshold: [0.1; 3],
            stationary_run: Some(3),
            ..Default::default()
        };
        let pipeline = MotionPipeline::new(config.clone()).unwrap();
        let v = pipeline.final_velocity(&track, &frames).unwrap();
        assert_eq!(v, Vector3::zeros());

        // same recording without the reset keeps the braking residue
        let drifting = MotionPipeline::new(PipelineConfig {
            stationary_run: None,
            ..config
        })
        .unwrap();
        let v = drifting.final_velocity(&track, &frames).unwrap();
        assert!((v.x + 0.5).abs() < EPS);
        assert!((v.y + 0.25).abs() < EPS);
    }

    #[test]
    fn test_active_segments_from_rotated_magnitude() {
        let n = 50;
        let accel: Vec<Vector3<f64>> = (0..n)
            .map(|i| {
                if (10..30).contains(&i) {
                    Vector3::new(0.0, 2.0, 0.0)
                } else {
                    Vector3::zeros()
                }
            })
            .collect();
        let q = from_axis_angle(&Vector3::new(1.0, 1.0, 0.0).normalize(), 0.7);
        let (track, frames) = recording(&vec![q; n], &accel, &vec![Vector3::zeros(); n]);

        let config = PipelineConfig {
            duration: crate::duration::DurationConfig {
                min_duration_frames: 3,
                effective_percentage: 0.5,
            },
            ..Default::default()
        };
        let pipeline = MotionPipeline::new(config).unwrap();
        let segments = pipeline.active_segments(&track, &frames).unwrap();
        assert_eq!(segments, vec![IndexPair::new(10, 29)]);

        // rotation preserves magnitude, so the device-frame track agrees
        let device = unpack_channel(&frames, Channel::Accel);
        assert_eq!(
            effective_duration(&amplitude_track(&device), 3, 0.5).unwrap(),
            segments
        );
    }

    #[test]
    fn test_config_text_drives_pipeline() {
        let config = from_toml_str(
            r#"
            delta = [0.5, 0.5, 0.5]
            init_velocity = [2.0, 0.0, 0.0]
            degree = 2
            "#,
        )
        .unwrap();
        let n = 5;
        let (track, frames) = recording(
            &vec![identity_rotation(); n],
            &vec![Vector3::zeros(); n],
            &vec![Vector3::zeros(); n],
        );

        let summary = MotionPipeline::new(config).unwrap().summarize(&track, &frames).unwrap();
        assert!((summary.final_velocity.x - 2.0).abs() < EPS);
        // 2.0 m/s for 4 intervals of 0.5 s
        assert!((summary.displacement.x - 4.0).abs() < EPS);
        assert!(summary.active_segments.is_empty());
    }

    #[test]
    fn test_channel_names_select_matrix_rows() {
        let frame = AmgFrame::from_column_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let frames = frames_from_samples(&[frame, frame * 2.0]);

        let gyro = unpack_channel(&frames, "Gyro".parse().unwrap());
        assert_eq!(gyro[(0, 1)], 14.0);
        let mag = unpack_channel(&frames, "Mag".parse().unwrap());
        assert_eq!(mag[(2, 0)], 6.0);

        assert_eq!(
            "Rot".parse::<Channel>(),
            Err(FeatureError::UnknownChannel("Rot".to_string()))
        );
    }

    #[test]
    fn test_peaks_in_amplitude_track() {
        let n = 9;
        let magnitudes = [0.0, 1.0, 3.0, 1.0, 0.5, 2.0, 0.5, 0.0, 0.0];
        let accel: Vec<Vector3<f64>> = magnitudes.iter().map(|&m| Vector3::new(0.0, 0.0, m)).collect();
        let (_, frames) = recording(&vec![identity_rotation(); n], &accel, &vec![Vector3::zeros(); n]);

        let track = amplitude_track(&unpack_channel(&frames, Channel::Accel));
        assert_eq!(peak_indices(&track), vec![2, 5]);
    }

    #[test]
    fn test_errors_surface_without_partial_results() {
        let n = 2;
        let (track, frames) = recording(
            &vec![identity_rotation(); n],
            &vec![Vector3::x(); n],
            &vec![Vector3::zeros(); n],
        );
        // degree 3 needs four samples for displacement
        let pipeline = MotionPipeline::new(PipelineConfig::default()).unwrap();
        assert!(matches!(
            pipeline.summarize(&track, &frames),
            Err(FeatureError::TooShort { .. })
        ));
        assert!(pipeline.final_velocity(&track, &frames).is_ok());
    }
}
