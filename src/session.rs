//! A matched device bound to its decoder

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use analogsense_transport::{BoxedDevice, DeviceDescriptor};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::decoder::{ActiveKeySnapshot, Decoder, DecoderVariant, ReportDecoder};
use crate::devices::RuleGroup;
use crate::diagnostics::SharedSink;
use crate::error::Result;
use crate::poller::Poller;

/// Default delay between poll requests
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Per-session settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Delay between poll requests for devices that need polling
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// An opened, supported device
///
/// Snapshots are delivered on the transport's report thread, in report
/// order. The handler may itself call [`Session::stop_listening`] or
/// [`Session::forget`].
pub struct Session {
    device: BoxedDevice,
    group: RuleGroup,
    decoder: Arc<Mutex<Decoder>>,
    poller: Mutex<Option<Poller>>,
    listening: AtomicBool,
    config: SessionConfig,
}

impl Session {
    pub fn new(
        device: BoxedDevice,
        group: RuleGroup,
        sink: SharedSink,
        config: SessionConfig,
    ) -> Self {
        let decoder = group.variant.decoder(sink);
        Self {
            device,
            group,
            decoder: Arc::new(Mutex::new(decoder)),
            poller: Mutex::new(None),
            listening: AtomicBool::new(false),
            config,
        }
    }

    pub fn descriptor(&self) -> &DeviceDescriptor {
        self.device.descriptor()
    }

    pub fn product_name(&self) -> &str {
        &self.device.descriptor().product_name
    }

    pub fn vendor_id(&self) -> u16 {
        self.device.descriptor().vendor_id
    }

    pub fn product_id(&self) -> u16 {
        self.device.descriptor().product_id
    }

    /// Name of the matched device family
    pub fn family(&self) -> &'static str {
        self.group.name
    }

    pub fn variant(&self) -> DecoderVariant {
        self.group.variant
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    /// Route decoded snapshots to `handler`
    ///
    /// Replaces any handler from an earlier call. Starts the poll timer for
    /// devices that need one.
    pub fn start_listening<F>(&self, mut handler: F) -> Result<()>
    where
        F: FnMut(ActiveKeySnapshot) + Send + 'static,
    {
        self.stop_listening();

        let decoder = Arc::clone(&self.decoder);
        self.device.set_report_handler(Some(Box::new(move |report| {
            let snapshot = decoder.lock().on_report(&report);
            if let Some(snapshot) = snapshot {
                handler(snapshot);
            }
        })));

        if let Some(request) = self.group.variant.poll_request() {
            let interval = self.config.poll_interval;
            match Poller::start(Arc::clone(&self.device), *request, interval) {
                Ok(poller) => *self.poller.lock() = Some(poller),
                Err(e) => {
                    self.device.set_report_handler(None);
                    return Err(e.into());
                }
            }
        }

        self.listening.store(true, Ordering::SeqCst);
        info!("Listening to {} ({})", self.product_name(), self.group.variant);
        Ok(())
    }

    /// Stop delivering snapshots
    ///
    /// Safe to call repeatedly or before listening. When it returns, the
    /// handler will not run again and no further poll is sent.
    pub fn stop_listening(&self) {
        let poller = self.poller.lock().take();
        if let Some(poller) = poller {
            poller.stop();
        }
        self.device.set_report_handler(None);
        self.decoder.lock().reset();

        if self.listening.swap(false, Ordering::SeqCst) {
            debug!("Stopped listening to {}", self.product_name());
        }
    }

    /// Stop listening and release the device
    pub fn forget(&self) -> Result<()> {
        self.stop_listening();
        self.device.forget()?;
        info!("Forgot {}", self.product_name());
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.is_listening() {
            self.stop_listening();
        }
    }
}
