//! Transport error types

use thiserror::Error;

/// Errors from device hosts and device handles
#[derive(Error, Debug)]
pub enum TransportError {
    /// Chooser returned an index outside the candidate list
    #[error("No such candidate device: {0}")]
    NoSuchCandidate(usize),

    /// Operation needs an opened handle
    #[error("Device not opened")]
    NotOpened,

    /// Interface path cannot be passed to the HID library
    #[error("Invalid device path {0:?}")]
    InvalidPath(String),

    #[error("HID error: {0}")]
    Hid(String),

    /// Reader thread could not be started
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Usually a missing udev rule for the device
    #[error("HID permission denied: {0}")]
    HidPermissionDenied(String),
}

impl From<hidapi::HidError> for TransportError {
    fn from(e: hidapi::HidError) -> Self {
        let msg = e.to_string();
        if msg.contains("Permission denied") || msg.contains("EACCES") {
            TransportError::HidPermissionDenied(msg)
        } else {
            TransportError::Hid(msg)
        }
    }
}
