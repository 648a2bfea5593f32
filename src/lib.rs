//! Analog keyboard input for Wooting, Razer and DrunkDeer keyboards
//!
//! Devices are matched against declarative filters to select a decoder; the
//! decoder turns each vendor's raw input reports into snapshots of
//! `(key, magnitude)` pairs using HID usage IDs as the common key space.
//!
//! ```no_run
//! use std::sync::Arc;
//! use analogsense::Registry;
//! use analogsense_transport::HidHost;
//!
//! let registry = Registry::new(Arc::new(HidHost::new()));
//! for session in registry.list_sessions()? {
//!     session.start_listening(|keys| println!("{keys:?}"))?;
//! }
//! # Ok::<(), analogsense::AnalogSenseError>(())
//! ```

pub mod config;
pub mod decoder;
pub mod devices;
pub mod diagnostics;
pub mod error;
pub mod keycode;
pub mod matcher;
pub mod poller;
pub mod registry;
pub mod scancode;
pub mod session;

pub use config::{Config, OutputFormat};
pub use decoder::{ActiveKey, ActiveKeySnapshot, Decoder, DecoderVariant, ReportDecoder};
pub use devices::{RuleGroup, SUPPORTED};
pub use diagnostics::{Diagnostic, DiagnosticSink, RecordingSink, SharedSink, TracingSink};
pub use error::AnalogSenseError;
pub use keycode::{key_name, KeyId, FN_KEY, UNMAPPED};
pub use matcher::{find_rule_group, union_filters};
pub use registry::Registry;
pub use session::{Session, SessionConfig};
