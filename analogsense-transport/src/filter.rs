//! Declarative device filters
//!
//! A filter is the `{vendorId?, productId?, usagePage?, reportId?}` tuple
//! handed verbatim to the host when asking it to enumerate or authorize
//! devices. Unset fields are wildcards.

use std::fmt;

use serde::Serialize;

use crate::types::DeviceDescriptor;

/// Device selection filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_page: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<u8>,
}

impl DeviceFilter {
    /// Filter matching every device
    pub const ANY: Self = Self {
        vendor_id: None,
        product_id: None,
        usage_page: None,
        report_id: None,
    };

    pub const fn vendor(vendor_id: u16) -> Self {
        Self {
            vendor_id: Some(vendor_id),
            ..Self::ANY
        }
    }

    pub const fn product(self, product_id: u16) -> Self {
        Self {
            product_id: Some(product_id),
            ..self
        }
    }

    pub const fn usage_page(self, usage_page: u16) -> Self {
        Self {
            usage_page: Some(usage_page),
            ..self
        }
    }

    pub const fn report_id(self, report_id: u8) -> Self {
        Self {
            report_id: Some(report_id),
            ..self
        }
    }

    /// Check whether every constraint this filter sets holds for `desc`
    ///
    /// Usage page and report ID match if *any* collection carries them.
    pub fn matches(&self, desc: &DeviceDescriptor) -> bool {
        if self.vendor_id.is_some_and(|vid| vid != desc.vendor_id) {
            return false;
        }
        if self.product_id.is_some_and(|pid| pid != desc.product_id) {
            return false;
        }
        if let Some(page) = self.usage_page {
            if !desc.has_usage_page(page) {
                return false;
            }
        }
        if let Some(id) = self.report_id {
            if !desc.has_input_report(id) {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for DeviceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(vid) = self.vendor_id {
            parts.push(format!("vid={vid:04x}"));
        }
        if let Some(pid) = self.product_id {
            parts.push(format!("pid={pid:04x}"));
        }
        if let Some(page) = self.usage_page {
            parts.push(format!("page={page:04x}"));
        }
        if let Some(id) = self.report_id {
            parts.push(format!("report={id}"));
        }
        if parts.is_empty() {
            write!(f, "*")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}
