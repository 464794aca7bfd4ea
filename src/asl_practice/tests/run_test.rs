use crate::asl_practice::core::{Gate, Status};
use crate::asl_practice::tests::fixture::{nothing_forever, Fixture, FixtureOptions};
use crate::device_camera::impl_fake::DeviceCameraFakeConfig;
use crate::device_camera::interface::{DeviceCameraError, FrameSize};
use crate::image_encoder::impl_fake::ImageEncoderFake;
use crate::inference_client::interface::{InferenceError, InferenceResponse};
use std::time::Duration;

const RUN_TIME: Duration = Duration::from_millis(400);

#[test]
fn test_slow_service_never_sees_overlapping_requests() {
    let mut f = Fixture::new(FixtureOptions {
        latency: Duration::from_millis(60),
        script: nothing_forever(),
        ..FixtureOptions::default()
    });

    f.run_for(RUN_TIME);

    assert!(f.inference_client.calls() >= 2);
    assert_eq!(f.inference_client.max_in_flight(), 1);
}

#[test]
fn test_detection_then_silence_keeps_letter() {
    let mut script = vec![Ok(InferenceResponse::detected("A"))];
    script.extend(nothing_forever());
    let mut f = Fixture::new(FixtureOptions {
        script,
        ..FixtureOptions::default()
    });

    let state = f.run_for(RUN_TIME);

    assert!(f.inference_client.calls() >= 2);
    assert_eq!(state.result.map(|r| r.letter), Some("A".to_string()));

    let screen = f.device_display.last_screen().unwrap();
    assert_eq!(screen[1], "Detected letter: A");
    assert!(screen[2].starts_with("Updated "));
}

#[test]
fn test_network_error_does_not_stall_the_loop() {
    let mut script = vec![
        Err(InferenceError::Network("connection refused".to_string())),
        Ok(InferenceResponse::detected("B")),
    ];
    script.extend(nothing_forever());
    let mut f = Fixture::new(FixtureOptions {
        script,
        ..FixtureOptions::default()
    });

    let state = f.run_for(RUN_TIME);

    assert!(f.inference_client.calls() >= 3);
    assert_eq!(state.result.map(|r| r.letter), Some("B".to_string()));
}

#[test]
fn test_permission_denied_never_submits() {
    let mut f = Fixture::new(FixtureOptions {
        camera: DeviceCameraFakeConfig {
            start_result: Err(DeviceCameraError::PermissionDenied),
            warmup: Duration::ZERO,
            ..DeviceCameraFakeConfig::default()
        },
        ..FixtureOptions::default()
    });

    let state = f.run_for(Duration::from_millis(150));

    assert_eq!(state.status, Status::PermissionDenied);
    assert_eq!(f.image_encoder.calls(), 0);
    assert_eq!(f.inference_client.calls(), 0);

    let screen = f.device_display.last_screen().unwrap();
    assert_eq!(screen[0], "Unable to access camera");
    assert_eq!(screen[1], "Detected letter: -");
    assert_eq!(screen[3], "Enable your camera");
}

#[test]
fn test_zero_sized_stream_never_samples() {
    let mut f = Fixture::new(FixtureOptions {
        camera: DeviceCameraFakeConfig {
            frame_size: FrameSize::new(0, 0),
            warmup: Duration::ZERO,
            ..DeviceCameraFakeConfig::default()
        },
        ..FixtureOptions::default()
    });

    let state = f.run_for(Duration::from_millis(150));

    assert_eq!(state.status, Status::Initializing);
    assert_eq!(f.image_encoder.calls(), 0);
    assert_eq!(f.inference_client.calls(), 0);
}

#[test]
fn test_encode_failures_skip_submission() {
    let mut f = Fixture::new(FixtureOptions {
        encoder: ImageEncoderFake::failing(),
        ..FixtureOptions::default()
    });

    let state = f.run_for(Duration::from_millis(150));

    assert!(f.image_encoder.calls() >= 2);
    assert_eq!(f.inference_client.calls(), 0);
    assert_eq!(state.status, Status::CameraReady);
    assert_ne!(state.gate, Gate::Submitting);
}

#[test]
fn test_camera_released_once_on_shutdown() {
    let mut f = Fixture::new(FixtureOptions {
        script: nothing_forever(),
        ..FixtureOptions::default()
    });

    f.run_for(Duration::from_millis(100));

    assert_eq!(f.device_camera.acquisitions(), 1);
    assert_eq!(f.device_camera.releases(), 1);
}
