//! Input report reader loop
//!
//! Each opened [`HidDevice`](crate::HidDevice) owns one dedicated thread that
//! reads input reports and hands them to the installed report handler through
//! a [`HandlerSlot`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::handler::HandlerSlot;
use crate::types::RawReport;

/// Upper bound for one input report including the report ID
const READ_BUFFER_SIZE: usize = 1025;

/// Configuration for the reader loop
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Read timeout in milliseconds (for checking shutdown flag when idle)
    pub read_timeout_ms: i32,
    /// Sleep duration on error before retrying
    pub error_sleep_ms: u64,
    /// Thread name
    pub name: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            read_timeout_ms: 5,
            error_sleep_ms: 100,
            name: "hid-report-reader".into(),
        }
    }
}

/// Split a raw read into report ID and payload
///
/// `hidapi` prefixes the data with the report ID only when the device uses
/// numbered reports.
pub(crate) fn split_report(buf: &[u8], numbered: bool) -> RawReport {
    match buf.split_first() {
        Some((&id, rest)) if numbered => RawReport::numbered(id, rest),
        _ => RawReport::unnumbered(buf),
    }
}

/// Reader loop body
///
/// Runs until `shutdown` is set. Read errors are logged and retried after a
/// short sleep; HID input reports cannot be re-requested, so nothing is
/// replayed.
pub(crate) fn run_reader_loop(
    device: Arc<Mutex<Option<hidapi::HidDevice>>>,
    handler: Arc<HandlerSlot>,
    shutdown: Arc<AtomicBool>,
    numbered: bool,
    config: ReaderConfig,
) {
    debug!("{} started", config.name);
    let mut buf = [0u8; READ_BUFFER_SIZE];

    while !shutdown.load(Ordering::Relaxed) {
        let read = {
            let guard = device.lock();
            match guard.as_ref() {
                Some(dev) => dev.read_timeout(&mut buf, config.read_timeout_ms),
                None => break,
            }
        };

        match read {
            Ok(len) if len > 0 => {
                let report = split_report(&buf[..len], numbered);
                trace!(
                    "{} got {} bytes (report {:?}): {:02X?}",
                    config.name,
                    len,
                    report.report_id,
                    &report.data[..report.data.len().min(16)]
                );
                handler.dispatch(report);
            }
            Ok(_) => {
                // Timeout, loop around to check shutdown
            }
            Err(e) => {
                warn!("{} read error: {}", config.name, e);
                std::thread::sleep(Duration::from_millis(config.error_sleep_ms));
            }
        }
    }

    debug!("{} exiting", config.name);
}
