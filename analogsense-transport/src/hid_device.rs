//! `hidapi`-backed device handle

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::TransportError;
use crate::handler::HandlerSlot;
use crate::reader::{run_reader_loop, ReaderConfig};
use crate::types::DeviceDescriptor;
use crate::{Device, ReportHandler};

/// Reader thread plus the flag that stops it
struct Reader {
    shutdown: Arc<AtomicBool>,
    thread: JoinHandle<()>,
}

/// HID device handle for one interface
///
/// Input reports are read on a dedicated thread that is started by
/// [`Device::open`] and stopped by [`Device::forget`] or drop.
pub struct HidDevice {
    /// Descriptor captured at enumeration time
    descriptor: DeviceDescriptor,
    /// Whether input reports carry a leading report ID byte
    numbered: bool,
    /// Open handle, shared with the reader thread
    device: Arc<Mutex<Option<hidapi::HidDevice>>>,
    /// Installed report handler, shared with the reader thread
    handler: Arc<HandlerSlot>,
    /// Running reader thread
    reader: Mutex<Option<Reader>>,
    config: ReaderConfig,
}

impl HidDevice {
    /// Create an unopened handle for an enumerated interface
    ///
    /// # Arguments
    /// * `descriptor` - Descriptor built during enumeration (`path` must be set)
    /// * `numbered` - Whether the report descriptor declares report IDs
    pub fn new(descriptor: DeviceDescriptor, numbered: bool) -> Self {
        Self::with_reader_config(descriptor, numbered, ReaderConfig::default())
    }

    /// Like [`HidDevice::new`], with custom reader thread settings
    pub fn with_reader_config(
        descriptor: DeviceDescriptor,
        numbered: bool,
        config: ReaderConfig,
    ) -> Self {
        Self {
            descriptor,
            numbered,
            device: Arc::new(Mutex::new(None)),
            handler: Arc::new(HandlerSlot::new()),
            reader: Mutex::new(None),
            config,
        }
    }

    pub fn reader_config(&self) -> &ReaderConfig {
        &self.config
    }

    fn start_reader(&self) -> Result<(), TransportError> {
        let mut reader = self.reader.lock();
        if reader.is_some() {
            return Ok(());
        }

        let shutdown = Arc::new(AtomicBool::new(false));
        let device = Arc::clone(&self.device);
        let handler = Arc::clone(&self.handler);
        let shutdown_clone = Arc::clone(&shutdown);
        let numbered = self.numbered;
        let config = self.config.clone();

        let thread = std::thread::Builder::new()
            .name(config.name.clone())
            .spawn(move || run_reader_loop(device, handler, shutdown_clone, numbered, config))?;
        *reader = Some(Reader { shutdown, thread });
        Ok(())
    }

    fn stop_reader(&self) {
        let reader = self.reader.lock().take();
        if let Some(reader) = reader {
            reader.shutdown.store(true, Ordering::SeqCst);
            // Forgetting from inside the handler runs on the reader itself
            if reader.thread.thread().id() == std::thread::current().id() {
                return;
            }
            if reader.thread.join().is_err() {
                warn!("Report reader thread panicked");
            }
        }
    }
}

impl Device for HidDevice {
    fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    fn is_opened(&self) -> bool {
        self.device.lock().is_some()
    }

    fn open(&self) -> Result<(), TransportError> {
        if self.is_opened() {
            return Ok(());
        }

        let api = hidapi::HidApi::new()?;
        let path = std::ffi::CString::new(self.descriptor.path.as_str())
            .map_err(|_| TransportError::InvalidPath(self.descriptor.path.clone()))?;
        let device = api.open_path(&path)?;
        install(&*self.device, device, || self.start_reader())?;

        info!(
            "Opened {:04X}:{:04X} ({})",
            self.descriptor.vendor_id,
            self.descriptor.product_id,
            self.descriptor.display_name()
        );
        Ok(())
    }

    fn send_report(&self, report_id: u8, data: &[u8]) -> Result<(), TransportError> {
        let mut buf = Vec::with_capacity(data.len() + 1);
        buf.push(report_id);
        buf.extend_from_slice(data);

        let guard = self.device.lock();
        let device = guard.as_ref().ok_or(TransportError::NotOpened)?;
        device.write(&buf)?;
        Ok(())
    }

    fn set_report_handler(&self, handler: Option<ReportHandler>) {
        self.handler.set(handler);
    }

    fn forget(&self) -> Result<(), TransportError> {
        self.set_report_handler(None);
        self.stop_reader();
        if self.device.lock().take().is_some() {
            debug!("Closed {}", self.descriptor.path);
        }
        Ok(())
    }
}

/// Store an opened handle, then start its reader; the handle is dropped again
/// if the reader cannot start, so a failed open never reports as opened
fn install<D>(
    slot: &Mutex<Option<D>>,
    device: D,
    start: impl FnOnce() -> Result<(), TransportError>,
) -> Result<(), TransportError> {
    *slot.lock() = Some(device);
    if let Err(e) = start() {
        warn!("Failed to spawn report reader thread: {}", e);
        slot.lock().take();
        return Err(e);
    }
    Ok(())
}

impl Drop for HidDevice {
    fn drop(&mut self) {
        self.stop_reader();
    }
}
