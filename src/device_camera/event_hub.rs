use crate::device_camera::interface::DeviceCameraEvent;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

/// Fans camera events out to subscribers. A subscriber that arrives after the
/// stream became ready is replayed the latest event, so subscribing and
/// starting the camera may race freely.
#[derive(Default)]
pub struct CameraEventHub {
    inner: Mutex<Hub>,
}

#[derive(Default)]
struct Hub {
    subscribers: Vec<Sender<DeviceCameraEvent>>,
    latest: Option<DeviceCameraEvent>,
}

impl CameraEventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Receiver<DeviceCameraEvent> {
        let (tx, rx) = channel();
        let mut hub = match self.inner.lock() {
            Ok(hub) => hub,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(event) = hub.latest.clone() {
            let _ = tx.send(event);
        }
        hub.subscribers.push(tx);
        rx
    }

    pub fn publish(&self, event: DeviceCameraEvent) {
        let mut hub = match self.inner.lock() {
            Ok(hub) => hub,
            Err(poisoned) => poisoned.into_inner(),
        };
        hub.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
        hub.latest = Some(event);
    }

    /// Forget the replayed event once the stream it described is released.
    pub fn reset(&self) {
        let mut hub = match self.inner.lock() {
            Ok(hub) => hub,
            Err(poisoned) => poisoned.into_inner(),
        };
        hub.latest = None;
    }
}
