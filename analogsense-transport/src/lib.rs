//! Device host and transport seam for analog keyboard sensing
//!
//! This crate is the boundary between the analog decoding core and whatever
//! actually talks to HID hardware:
//!
//! - [`DeviceHost`] enumerates already-authorized devices or asks for a new one
//! - [`Device`] is one opened (or openable) HID interface that delivers raw
//!   input reports and accepts outbound reports
//! - [`HidHost`] / [`HidDevice`] implement both on top of `hidapi`

pub mod descriptor;
pub mod error;
pub mod filter;
pub mod handler;
pub mod types;

mod discovery;
mod hid_device;
mod reader;

pub use descriptor::{parse_report_descriptor, ParsedDescriptor};
pub use discovery::{DeviceChooser, HidHost};
pub use error::TransportError;
pub use filter::DeviceFilter;
pub use handler::HandlerSlot;
pub use hid_device::HidDevice;
pub use reader::ReaderConfig;
pub use types::{CollectionInfo, DeviceDescriptor, RawReport, ReportInfo};

use std::sync::Arc;

/// Callback receiving every raw input report, in arrival order
pub type ReportHandler = Box<dyn FnMut(RawReport) + Send>;

/// A single HID device handle - all backends implement this
pub trait Device: Send + Sync {
    /// Descriptor captured when the device was enumerated
    fn descriptor(&self) -> &DeviceDescriptor;

    /// Check if the handle is currently open
    fn is_opened(&self) -> bool;

    /// Open the handle (no-op if already open)
    fn open(&self) -> Result<(), TransportError>;

    /// Send an output report
    ///
    /// # Arguments
    /// * `report_id` - Report ID (0 for unnumbered reports)
    /// * `data` - Report payload, without the report ID byte
    fn send_report(&self, report_id: u8, data: &[u8]) -> Result<(), TransportError>;

    /// Install or clear the input report callback
    ///
    /// Replaces any previous handler. Once a call passing `None` returns, the
    /// previous handler is never invoked again. May be called from inside the
    /// handler itself.
    fn set_report_handler(&self, handler: Option<ReportHandler>);

    /// Close the handle and release the device
    fn forget(&self) -> Result<(), TransportError>;
}

/// Device enumeration and authorization facility
pub trait DeviceHost: Send + Sync {
    /// Devices the host has already been granted access to
    fn list_known_devices(&self) -> Result<Vec<BoxedDevice>, TransportError>;

    /// Ask for a new device covered by at least one of `filters`
    ///
    /// Returns `None` when nothing was chosen.
    fn request_new_device(
        &self,
        filters: &[DeviceFilter],
    ) -> Result<Option<BoxedDevice>, TransportError>;
}

/// Type alias for a shared device handle
pub type BoxedDevice = Arc<dyn Device>;
