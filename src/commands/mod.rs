//! Command handlers for the CLI application.
//!
//! - `query`: Read-only commands (devices, filters, list)
//! - `watch`: Live analog readout
//! - `config`: Config file commands (config-path, init-config)

pub mod config;
pub mod query;
pub mod watch;

use std::sync::Arc;

use analogsense::{Config, Registry};
use analogsense_transport::{DeviceDescriptor, HidHost};
use tracing::info;

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Registry over the system HID host, configured from `config`
///
/// With `index`, a device request picks that candidate instead of the first.
pub fn hid_registry(config: &Config, index: Option<usize>) -> Registry {
    let host = match index {
        Some(index) => HidHost::with_chooser(Box::new(move |candidates: &[DeviceDescriptor]| {
            pick_candidate(candidates, index)
        })),
        None => HidHost::new(),
    };
    Registry::new(Arc::new(host)).with_session_config(config.session_config())
}

/// Log the candidates and pick `index`; out-of-range indices reach the host as errors
fn pick_candidate(candidates: &[DeviceDescriptor], index: usize) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    for (i, desc) in candidates.iter().enumerate() {
        info!("Candidate {}: {}", i, desc.display_name());
    }
    Some(index)
}
