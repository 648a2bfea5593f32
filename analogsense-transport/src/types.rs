//! Common types for the transport layer

use serde::Serialize;

/// Input report declared by a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ReportInfo {
    /// Report ID (0 when the device does not use numbered reports)
    pub report_id: u8,
}

/// Top-level HID collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionInfo {
    /// Usage page of the collection
    pub usage_page: u16,
    /// Usage of the collection
    pub usage: u16,
    /// Input reports declared inside the collection
    pub input_reports: Vec<ReportInfo>,
}

impl CollectionInfo {
    /// Create a collection without any declared input reports
    pub fn new(usage_page: u16, usage: u16) -> Self {
        Self {
            usage_page,
            usage,
            input_reports: Vec::new(),
        }
    }

    /// Add a declared input report
    pub fn with_input_report(mut self, report_id: u8) -> Self {
        self.input_reports.push(ReportInfo { report_id });
        self
    }

    /// Check if this collection declares an input report with the given ID
    pub fn has_input_report(&self, report_id: u8) -> bool {
        self.input_reports.iter().any(|r| r.report_id == report_id)
    }
}

/// Device identification as presented by the host
///
/// Immutable once handed out; decoders only ever borrow it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceDescriptor {
    /// USB Vendor ID
    pub vendor_id: u16,
    /// USB Product ID
    pub product_id: u16,
    /// Human-readable product name
    pub product_name: String,
    /// Device path or identifier (backend-specific)
    pub path: String,
    /// Top-level collections from the report descriptor
    pub collections: Vec<CollectionInfo>,
}

impl DeviceDescriptor {
    pub fn new(vendor_id: u16, product_id: u16, product_name: impl Into<String>) -> Self {
        Self {
            vendor_id,
            product_id,
            product_name: product_name.into(),
            path: String::new(),
            collections: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_collection(mut self, collection: CollectionInfo) -> Self {
        self.collections.push(collection);
        self
    }

    /// Check if any collection uses the given usage page
    pub fn has_usage_page(&self, usage_page: u16) -> bool {
        self.collections.iter().any(|c| c.usage_page == usage_page)
    }

    /// Check if any collection declares an input report with the given ID
    pub fn has_input_report(&self, report_id: u8) -> bool {
        self.collections.iter().any(|c| c.has_input_report(report_id))
    }

    /// Display name, falling back to `vid:pid`
    pub fn display_name(&self) -> String {
        if self.product_name.is_empty() {
            format!("{:04x}:{:04x}", self.vendor_id, self.product_id)
        } else {
            self.product_name.clone()
        }
    }
}

/// One HID input event as delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReport {
    /// Report ID, if the device uses numbered reports
    pub report_id: Option<u8>,
    /// Report payload (never includes the report ID byte)
    pub data: Vec<u8>,
}

impl RawReport {
    /// Report from a device that does not use report IDs
    pub fn unnumbered(data: impl Into<Vec<u8>>) -> Self {
        Self {
            report_id: None,
            data: data.into(),
        }
    }

    /// Report tagged with a report ID
    pub fn numbered(report_id: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            report_id: Some(report_id),
            data: data.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_lookups() {
        let desc = DeviceDescriptor::new(0x1532, 0x02a6, "Razer Huntsman V3 Pro")
            .with_collection(CollectionInfo::new(0x0001, 0x0006).with_input_report(1))
            .with_collection(CollectionInfo::new(0x000C, 0x0001).with_input_report(11));

        assert!(desc.has_usage_page(0x000C));
        assert!(!desc.has_usage_page(0xFF54));
        assert!(desc.has_input_report(11));
        assert!(!desc.has_input_report(7));
    }

    #[test]
    fn test_display_name_fallback() {
        let desc = DeviceDescriptor::new(0x31e3, 0x1402, "");
        assert_eq!(desc.display_name(), "31e3:1402");
    }
}
