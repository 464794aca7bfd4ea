use crate::device_camera::interface::{DeviceCameraError, DeviceCameraEvent, FrameSize};
use crate::image_encoder::interface::{Sample, SampleError};
use crate::inference_client::interface::{InferenceError, InferenceResponse};
use chrono::{DateTime, Utc};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Initializing,
    CameraUnsupported,
    PermissionDenied,
    CameraReady,
    Analyzing,
    LiveDetection,
    NoDetection,
    NetworkError,
}

impl Status {
    pub fn key(&self) -> &'static str {
        match self {
            Status::Initializing => "initializing",
            Status::CameraUnsupported => "camera-unsupported",
            Status::PermissionDenied => "permission-denied",
            Status::CameraReady => "camera-ready",
            Status::Analyzing => "analyzing",
            Status::LiveDetection => "live-detection",
            Status::NoDetection => "no-detection",
            Status::NetworkError => "network-error",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Status::Initializing => "Initializing camera",
            Status::CameraUnsupported => "Camera not supported on this device",
            Status::PermissionDenied => "Unable to access camera",
            Status::CameraReady => "Camera ready",
            Status::Analyzing => "Analyzing sign",
            Status::LiveDetection => "Live ASL detection",
            Status::NoDetection => "No hand detected",
            Status::NetworkError => "Unable to reach ASL server",
        }
    }
}

/// Single-flight gate. Anything but `Idle` means a sample is on its way to
/// the inference service and ticks are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gate {
    #[default]
    Idle,
    Sampling,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceResult {
    pub letter: String,
    pub produced_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    pub status: Status,
    pub frame_size: Option<FrameSize>,
    pub gate: Gate,
    pub result: Option<InferenceResult>,
}

#[derive(Debug)]
pub enum Event {
    CameraStartDone(Result<(), DeviceCameraError>),
    CameraEvent(DeviceCameraEvent),
    Tick(Instant),
    SampleDone(Result<Sample, SampleError>),
    SubmitDone {
        result: Result<InferenceResponse, InferenceError>,
        received_at: DateTime<Utc>,
    },
    Shutdown,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    StartCamera,
    SubscribeToCameraEvents,
    SubscribeTick,
    CaptureSample,
    SubmitSample { sample: Sample },
}

pub fn init() -> (State, Vec<Effect>) {
    (
        State::default(),
        vec![
            Effect::SubscribeToCameraEvents,
            Effect::StartCamera,
            Effect::SubscribeTick,
        ],
    )
}

pub fn transition(state: State, event: Event) -> (State, Vec<Effect>) {
    match event {
        // Capture source
        Event::CameraStartDone(Ok(())) => (state, vec![]),
        Event::CameraStartDone(Err(error)) => {
            let status = match error {
                DeviceCameraError::Unsupported => Status::CameraUnsupported,
                DeviceCameraError::PermissionDenied | DeviceCameraError::Other(_) => {
                    Status::PermissionDenied
                }
            };
            (
                State {
                    status,
                    frame_size: None,
                    ..state
                },
                vec![],
            )
        }
        Event::CameraEvent(DeviceCameraEvent::FrameReady(size)) => {
            if size.is_empty() {
                return (state, vec![]);
            }
            let status = match state.status {
                Status::Initializing => Status::CameraReady,
                status => status,
            };
            (
                State {
                    status,
                    frame_size: Some(size),
                    ..state
                },
                vec![],
            )
        }

        // Sampler
        Event::Tick(_) => {
            let ready = state.frame_size.is_some_and(|size| !size.is_empty());
            if state.gate != Gate::Idle || !ready {
                return (state, vec![]);
            }
            (
                State {
                    gate: Gate::Sampling,
                    ..state
                },
                vec![Effect::CaptureSample],
            )
        }
        Event::SampleDone(sample) => {
            if state.gate != Gate::Sampling {
                return (state, vec![]);
            }
            match sample {
                Ok(sample) => (
                    State {
                        gate: Gate::Submitting,
                        status: Status::Analyzing,
                        ..state
                    },
                    vec![Effect::SubmitSample { sample }],
                ),
                Err(_) => (
                    State {
                        gate: Gate::Idle,
                        ..state
                    },
                    vec![],
                ),
            }
        }

        // Submission
        Event::SubmitDone {
            result,
            received_at,
        } => {
            if state.gate != Gate::Submitting {
                return (state, vec![]);
            }
            let state = State {
                gate: Gate::Idle,
                ..state
            };
            match result {
                Ok(response) => match response.detected_letter() {
                    Some(letter) => (
                        State {
                            status: Status::LiveDetection,
                            result: Some(InferenceResult {
                                letter: letter.to_string(),
                                produced_at: received_at,
                            }),
                            ..state
                        },
                        vec![],
                    ),
                    None => (
                        State {
                            status: Status::NoDetection,
                            ..state
                        },
                        vec![],
                    ),
                },
                Err(_) => (
                    State {
                        status: Status::NetworkError,
                        ..state
                    },
                    vec![],
                ),
            }
        }

        Event::Shutdown => (state, vec![]),
    }
}
