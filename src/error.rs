//! Library error types

use analogsense_transport::TransportError;
use thiserror::Error;

/// Errors from sessions, the registry and config handling
///
/// Decoding never fails: unsupported devices, unmapped codes and malformed
/// reports are handled without an `Err`.
#[derive(Error, Debug)]
pub enum AnalogSenseError {
    /// Transport layer error
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Thread spawn or file I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be serialized
    #[error("Config serialization failed: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, AnalogSenseError>;
