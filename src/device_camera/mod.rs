pub mod event_hub;
pub mod guard;
pub mod impl_fake;
#[cfg(feature = "camera-v4l2")]
pub mod impl_v4l2;
pub mod interface;
