//! Device discovery on top of `hidapi`

use std::collections::HashSet;
use std::sync::Arc;

use hidapi::HidApi;
use tracing::{debug, info};

use crate::descriptor::{parse_report_descriptor, ParsedDescriptor};
use crate::error::TransportError;
use crate::filter::DeviceFilter;
use crate::hid_device::HidDevice;
use crate::types::{CollectionInfo, DeviceDescriptor};
use crate::{BoxedDevice, DeviceHost};

/// Maximum HID report descriptor size (HID_MAX_DESCRIPTOR_SIZE on Linux)
const MAX_REPORT_DESCRIPTOR_SIZE: usize = 4096;

/// Picks one of the candidate devices offered by [`HidHost::request_new_device`]
///
/// Returns the index of the chosen candidate, or `None` to cancel.
pub type DeviceChooser = Box<dyn Fn(&[DeviceDescriptor]) -> Option<usize> + Send + Sync>;

/// HID device host
///
/// Devices count as already authorized when their interface can be opened
/// and their report descriptor read with the current permissions. Probing
/// closes the interface again; handles are returned unopened.
pub struct HidHost {
    chooser: DeviceChooser,
}

impl Default for HidHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HidHost {
    /// Create a host that picks the first matching candidate
    pub fn new() -> Self {
        Self {
            chooser: Box::new(|candidates| if candidates.is_empty() { None } else { Some(0) }),
        }
    }

    /// Create a host that asks `chooser` which candidate to use
    pub fn with_chooser(chooser: DeviceChooser) -> Self {
        Self { chooser }
    }

    /// List every HID interface without opening anything
    pub fn enumerate(&self) -> Result<Vec<DeviceDescriptor>, TransportError> {
        let api = HidApi::new()?;
        Ok(api.device_list().map(basic_descriptor).collect())
    }
}

/// Descriptor from enumeration data alone (one collection, no report IDs)
fn basic_descriptor(info: &hidapi::DeviceInfo) -> DeviceDescriptor {
    DeviceDescriptor::new(
        info.vendor_id(),
        info.product_id(),
        info.product_string().unwrap_or_default(),
    )
    .with_path(info.path().to_string_lossy())
    .with_collection(CollectionInfo::new(info.usage_page(), info.usage()))
}

/// Keep only the first entry seen for each interface path
///
/// `hidapi` lists one entry per top-level usage of an interface, all sharing
/// the interface's path. The report descriptor already covers every usage.
fn unique_by_path<T>(
    entries: impl IntoIterator<Item = T>,
    path: impl Fn(&T) -> String,
) -> Vec<T> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(path(entry)))
        .collect()
}

fn interface_path(info: &hidapi::DeviceInfo) -> String {
    info.path().to_string_lossy().into_owned()
}

/// Open an interface, read its report descriptor and close it again
fn probe(api: &HidApi, info: &hidapi::DeviceInfo) -> Result<ParsedDescriptor, TransportError> {
    let device = info.open_device(api)?;
    let mut buf = vec![0u8; MAX_REPORT_DESCRIPTOR_SIZE];
    let len = device.get_report_descriptor(&mut buf)?;
    Ok(parse_report_descriptor(&buf[..len]))
}

/// Descriptor with collections from the parsed report descriptor
fn full_descriptor(info: &hidapi::DeviceInfo, parsed: &ParsedDescriptor) -> DeviceDescriptor {
    let mut desc = basic_descriptor(info);
    if !parsed.collections.is_empty() {
        desc.collections = parsed.collections.clone();
    }
    desc
}

impl DeviceHost for HidHost {
    fn list_known_devices(&self) -> Result<Vec<BoxedDevice>, TransportError> {
        let api = HidApi::new()?;
        let mut devices: Vec<BoxedDevice> = Vec::new();

        for info in unique_by_path(api.device_list(), |info| interface_path(info)) {
            match probe(&api, info) {
                Ok(parsed) => {
                    let desc = full_descriptor(info, &parsed);
                    debug!(
                        "Known device: VID={:04X} PID={:04X} collections={} path={}",
                        desc.vendor_id,
                        desc.product_id,
                        desc.collections.len(),
                        desc.path
                    );
                    devices.push(Arc::new(HidDevice::new(desc, parsed.uses_report_ids)));
                }
                Err(e) => {
                    debug!(
                        "Skipping {:04X}:{:04X} at {:?}: {}",
                        info.vendor_id(),
                        info.product_id(),
                        info.path(),
                        e
                    );
                }
            }
        }

        info!("Found {} accessible HID interfaces", devices.len());
        Ok(devices)
    }

    fn request_new_device(
        &self,
        filters: &[DeviceFilter],
    ) -> Result<Option<BoxedDevice>, TransportError> {
        let api = HidApi::new()?;

        // (descriptor, numbered) for every interface at least one filter covers
        let interfaces = unique_by_path(api.device_list(), |info| interface_path(info));
        let candidates: Vec<(DeviceDescriptor, bool)> = interfaces
            .into_iter()
            .filter_map(|info| {
                let (desc, numbered) = match probe(&api, info) {
                    Ok(parsed) => (full_descriptor(info, &parsed), parsed.uses_report_ids),
                    Err(_) => (basic_descriptor(info), false),
                };
                filters
                    .iter()
                    .any(|f| f.matches(&desc))
                    .then_some((desc, numbered))
            })
            .collect();

        debug!("{} candidate devices for request", candidates.len());

        let descriptors: Vec<DeviceDescriptor> =
            candidates.iter().map(|(d, _)| d.clone()).collect();
        let Some(index) = (self.chooser)(&descriptors) else {
            info!("Device request cancelled");
            return Ok(None);
        };

        let (desc, numbered) = candidates
            .into_iter()
            .nth(index)
            .ok_or(TransportError::NoSuchCandidate(index))?;

        info!(
            "Selected {:04X}:{:04X} ({})",
            desc.vendor_id,
            desc.product_id,
            desc.display_name()
        );
        Ok(Some(Arc::new(HidDevice::new(desc, numbered))))
    }
}
