//! In-memory transport for driving the registry and sessions in tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use analogsense_transport::{
    BoxedDevice, CollectionInfo, Device, DeviceDescriptor, DeviceFilter, DeviceHost, HandlerSlot,
    RawReport, ReportHandler, TransportError,
};
use parking_lot::Mutex;

/// Scripted device: reports are pushed in with [`FakeDevice::deliver`]
pub struct FakeDevice {
    desc: DeviceDescriptor,
    opened: AtomicBool,
    fail_open: bool,
    forgotten: AtomicBool,
    open_calls: AtomicUsize,
    handler: HandlerSlot,
    sent: Mutex<Vec<(u8, Vec<u8>)>>,
}

impl FakeDevice {
    pub fn new(desc: DeviceDescriptor) -> Arc<Self> {
        Arc::new(Self::build(desc, false))
    }

    pub fn failing_open(desc: DeviceDescriptor) -> Arc<Self> {
        Arc::new(Self::build(desc, true))
    }

    fn build(desc: DeviceDescriptor, fail_open: bool) -> Self {
        Self {
            desc,
            opened: AtomicBool::new(false),
            fail_open,
            forgotten: AtomicBool::new(false),
            open_calls: AtomicUsize::new(0),
            handler: HandlerSlot::new(),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Hand a report to the installed handler; false if none is installed
    pub fn deliver(&self, report: RawReport) -> bool {
        self.handler.dispatch(report)
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_set()
    }

    pub fn sent(&self) -> Vec<(u8, Vec<u8>)> {
        self.sent.lock().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn open_calls(&self) -> usize {
        self.open_calls.load(Ordering::SeqCst)
    }

    pub fn was_forgotten(&self) -> bool {
        self.forgotten.load(Ordering::SeqCst)
    }

    pub fn boxed(self: &Arc<Self>) -> BoxedDevice {
        Arc::clone(self) as BoxedDevice
    }
}

impl Device for FakeDevice {
    fn descriptor(&self) -> &DeviceDescriptor {
        &self.desc
    }

    fn is_opened(&self) -> bool {
        self.opened.load(Ordering::SeqCst)
    }

    fn open(&self) -> Result<(), TransportError> {
        self.open_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_open {
            return Err(TransportError::HidPermissionDenied(self.desc.display_name()));
        }
        self.opened.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn send_report(&self, report_id: u8, data: &[u8]) -> Result<(), TransportError> {
        if !self.is_opened() {
            return Err(TransportError::NotOpened);
        }
        self.sent.lock().push((report_id, data.to_vec()));
        Ok(())
    }

    fn set_report_handler(&self, handler: Option<ReportHandler>) {
        self.handler.set(handler);
    }

    fn forget(&self) -> Result<(), TransportError> {
        self.handler.set(None);
        self.opened.store(false, Ordering::SeqCst);
        self.forgotten.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Host with a fixed set of known devices and one device to offer on request
#[derive(Default)]
pub struct FakeHost {
    known: Vec<BoxedDevice>,
    offer: Mutex<Option<BoxedDevice>>,
    requests: Mutex<Vec<Vec<DeviceFilter>>>,
}

impl FakeHost {
    pub fn with_known(known: Vec<BoxedDevice>) -> Self {
        Self {
            known,
            ..Self::default()
        }
    }

    pub fn offering(device: Option<BoxedDevice>) -> Self {
        Self {
            offer: Mutex::new(device),
            ..Self::default()
        }
    }

    /// Filter sets passed to `request_new_device`, in call order
    pub fn requests(&self) -> Vec<Vec<DeviceFilter>> {
        self.requests.lock().clone()
    }
}

impl DeviceHost for FakeHost {
    fn list_known_devices(&self) -> Result<Vec<BoxedDevice>, TransportError> {
        Ok(self.known.clone())
    }

    fn request_new_device(
        &self,
        filters: &[DeviceFilter],
    ) -> Result<Option<BoxedDevice>, TransportError> {
        self.requests.lock().push(filters.to_vec());
        let offer = self.offer.lock().clone();
        Ok(offer.filter(|d| filters.iter().any(|f| f.matches(d.descriptor()))))
    }
}

pub fn wooting() -> DeviceDescriptor {
    DeviceDescriptor::new(0x31E3, 0x1312, "Wooting 60HE")
        .with_collection(CollectionInfo::new(0x0001, 0x06))
        .with_collection(CollectionInfo::new(0xFF54, 0x01))
}

pub fn razer_v2() -> DeviceDescriptor {
    DeviceDescriptor::new(0x1532, 0x0266, "Razer Huntsman V2 Analog")
        .with_collection(CollectionInfo::new(0x0001, 0x06).with_input_report(1))
        .with_collection(CollectionInfo::new(0x000C, 0x01).with_input_report(7))
}

pub fn razer_v3() -> DeviceDescriptor {
    DeviceDescriptor::new(0x1532, 0x02A6, "Razer Huntsman V3 Pro")
        .with_collection(CollectionInfo::new(0x0001, 0x06).with_input_report(1))
        .with_collection(CollectionInfo::new(0x000C, 0x01).with_input_report(11))
}

pub fn drunkdeer() -> DeviceDescriptor {
    DeviceDescriptor::new(0x352D, 0x2383, "DrunkDeer G75")
        .with_collection(CollectionInfo::new(0xFF00, 0x01))
}

pub fn mouse() -> DeviceDescriptor {
    DeviceDescriptor::new(0x046D, 0xC077, "USB Optical Mouse")
        .with_collection(CollectionInfo::new(0x0001, 0x02))
}

/// 63-byte DrunkDeer frame with `(payload offset, value)` pairs set
pub fn drunkdeer_frame(index: u8, values: &[(usize, u8)]) -> RawReport {
    let mut data = vec![0u8; 63];
    data[0] = 0xB7;
    data[3] = index;
    for &(offset, value) in values {
        data[4 + offset] = value;
    }
    RawReport::unnumbered(data)
}

/// Poll `cond` until it holds or `timeout` passes
pub fn wait_until(timeout: Duration, cond: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    cond()
}
