//! Poll timer for devices that only report on request

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

use analogsense_transport::BoxedDevice;
use tracing::{debug, warn};

use crate::decoder::PollRequest;

/// Periodically sends a poll request on its own thread
///
/// The first poll goes out immediately. [`Poller::stop`] returns only after
/// the thread has exited, so no poll is sent after it returns.
pub struct Poller {
    stop: Option<mpsc::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl Poller {
    /// Start polling `device` every `interval`
    pub fn start(
        device: BoxedDevice,
        request: PollRequest,
        interval: Duration,
    ) -> std::io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let thread = std::thread::Builder::new()
            .name("analog-poll".into())
            .spawn(move || {
                debug!("Poll timer started ({:?})", interval);
                loop {
                    if let Err(e) = device.send_report(request.report_id, request.payload()) {
                        warn!("Poll send failed: {}", e);
                    }
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        // Explicit stop or the sender was dropped
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("Poll timer stopped");
            })?;

        Ok(Self {
            stop: Some(stop_tx),
            thread: Some(thread),
        })
    }

    /// Stop the timer and wait for its thread
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        drop(self.stop.take());
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Poll thread panicked");
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.shutdown();
    }
}
