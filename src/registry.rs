//! Turns host devices into ready-to-use sessions

use std::sync::Arc;

use analogsense_transport::{BoxedDevice, DeviceFilter, DeviceHost};
use tracing::{debug, info, warn};

use crate::devices::{RuleGroup, SUPPORTED};
use crate::diagnostics::{SharedSink, TracingSink};
use crate::error::Result;
use crate::matcher::{find_rule_group, union_filters};
use crate::session::{Session, SessionConfig};

/// Entry point for finding analog keyboards
pub struct Registry {
    host: Arc<dyn DeviceHost>,
    groups: &'static [RuleGroup],
    sink: SharedSink,
    config: SessionConfig,
}

impl Registry {
    /// Registry over every supported family, logging diagnostics via `tracing`
    pub fn new(host: Arc<dyn DeviceHost>) -> Self {
        Self {
            host,
            groups: SUPPORTED,
            sink: Arc::new(TracingSink),
            config: SessionConfig::default(),
        }
    }

    pub fn with_rule_groups(mut self, groups: &'static [RuleGroup]) -> Self {
        self.groups = groups;
        self
    }

    /// Sink handed to every session's decoder
    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_session_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Filters covering every supported device
    pub fn filters(&self) -> Vec<DeviceFilter> {
        union_filters(self.groups)
    }

    /// Sessions for every already-authorized supported device
    ///
    /// Unsupported devices are left out. Devices that fail to open are
    /// logged and skipped.
    pub fn list_sessions(&self) -> Result<Vec<Session>> {
        let devices = self.host.list_known_devices()?;
        let mut sessions = Vec::new();

        for device in devices {
            match self.bind(device) {
                Ok(Some(session)) => sessions.push(session),
                Ok(None) => {}
                Err(e) => warn!("Skipping device: {}", e),
            }
        }

        info!("{} supported devices", sessions.len());
        Ok(sessions)
    }

    /// Ask the host for a new device and bind it
    ///
    /// `None` if the request was cancelled or the chosen device is not
    /// supported.
    pub fn request_session(&self) -> Result<Option<Session>> {
        let filters = self.filters();
        let Some(device) = self.host.request_new_device(&filters)? else {
            return Ok(None);
        };
        self.bind(device)
    }

    /// Match, open and wrap one device
    fn bind(&self, device: BoxedDevice) -> Result<Option<Session>> {
        let desc = device.descriptor();
        let Some(group) = find_rule_group(desc, self.groups) else {
            debug!(
                "Unsupported device {:04X}:{:04X} ({})",
                desc.vendor_id,
                desc.product_id,
                desc.display_name()
            );
            return Ok(None);
        };

        if !device.is_opened() {
            device.open()?;
        }

        debug!("{} matched {} ({})", desc.display_name(), group.name, group.variant);
        Ok(Some(Session::new(device, *group, Arc::clone(&self.sink), self.config)))
    }
}
