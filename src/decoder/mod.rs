//! Report decoders
//!
//! Each supported family encodes analog depth differently. A
//! [`DecoderVariant`] names the layout plus its constants; [`Decoder`] is the
//! stateful instance a session feeds raw reports into.

mod fixed_width;
mod multi_frame;
mod single_byte;

pub use fixed_width::FixedWidthDecoder;
pub use multi_frame::{FrameGeometry, MultiFrameDecoder, PollCommand, PollRequest};
pub use single_byte::SingleByteDecoder;

use std::fmt;

use analogsense_transport::RawReport;
use serde::Serialize;

use crate::diagnostics::{Diagnostic, SharedSink};
use crate::keycode::{key_name, KeyId, UNMAPPED};
use crate::scancode::VendorTable;

/// One depressed key
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActiveKey {
    pub key: KeyId,
    /// Depression depth. Nominally 0.0..=1.0, but multi-frame devices can
    /// report over-travel above 1.0.
    pub magnitude: f32,
}

impl ActiveKey {
    pub fn new(key: KeyId, magnitude: f32) -> Self {
        Self { key, magnitude }
    }

    pub fn name(&self) -> &'static str {
        key_name(self.key)
    }
}

/// Every key down at one sampled instant, in report order
///
/// Key identifiers are not deduplicated.
pub type ActiveKeySnapshot = Vec<ActiveKey>;

/// Capability shared by all decoders
pub trait ReportDecoder {
    /// Decode one input report
    ///
    /// `None` means no complete snapshot yet, or the report was ignored.
    fn on_report(&mut self, report: &RawReport) -> Option<ActiveKeySnapshot>;

    /// Drop any partially assembled state
    fn reset(&mut self);
}

/// Wire layout of a device family
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecoderVariant {
    /// 3-byte records: big-endian u16 canonical code, u8 value
    FixedWidthTerminated,
    /// 2-byte records: u8 vendor code, u8 value; gated on a report id
    SingleByteTerminated { report_id: u8, table: VendorTable },
    /// 3-byte records: u8 vendor code, u8 value, u8 unused; gated on a report id
    SingleByteTerminatedWithPad { report_id: u8, table: VendorTable },
    /// One scan split over several polled reports
    MultiFrameAccumulated {
        geometry: FrameGeometry,
        poll: PollRequest,
    },
}

impl DecoderVariant {
    pub fn name(&self) -> &'static str {
        match self {
            DecoderVariant::FixedWidthTerminated => "fixed-width",
            DecoderVariant::SingleByteTerminated { .. } => "single-byte",
            DecoderVariant::SingleByteTerminatedWithPad { .. } => "single-byte-padded",
            DecoderVariant::MultiFrameAccumulated { .. } => "multi-frame",
        }
    }

    /// Poll request to send periodically while listening, if the device needs one
    pub fn poll_request(&self) -> Option<&PollRequest> {
        match self {
            DecoderVariant::MultiFrameAccumulated { poll, .. } => Some(poll),
            _ => None,
        }
    }

    /// Build a fresh decoder for this layout
    pub fn decoder(&self, sink: SharedSink) -> Decoder {
        match *self {
            DecoderVariant::FixedWidthTerminated => Decoder::FixedWidth(FixedWidthDecoder::new()),
            DecoderVariant::SingleByteTerminated { report_id, table } => {
                Decoder::SingleByte(SingleByteDecoder::new(report_id, 2, table, sink))
            }
            DecoderVariant::SingleByteTerminatedWithPad { report_id, table } => {
                Decoder::SingleByte(SingleByteDecoder::new(report_id, 3, table, sink))
            }
            DecoderVariant::MultiFrameAccumulated { geometry, .. } => {
                Decoder::MultiFrame(MultiFrameDecoder::new(geometry, sink))
            }
        }
    }
}

impl fmt::Display for DecoderVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoder instance for one device
#[derive(Debug)]
pub enum Decoder {
    FixedWidth(FixedWidthDecoder),
    SingleByte(SingleByteDecoder),
    MultiFrame(MultiFrameDecoder),
}

impl ReportDecoder for Decoder {
    fn on_report(&mut self, report: &RawReport) -> Option<ActiveKeySnapshot> {
        match self {
            Decoder::FixedWidth(d) => d.on_report(report),
            Decoder::SingleByte(d) => d.on_report(report),
            Decoder::MultiFrame(d) => d.on_report(report),
        }
    }

    fn reset(&mut self) {
        match self {
            Decoder::FixedWidth(d) => d.reset(),
            Decoder::SingleByte(d) => d.reset(),
            Decoder::MultiFrame(d) => d.reset(),
        }
    }
}

/// Translate a vendor code, substituting [`UNMAPPED`] and reporting misses
fn translate(table: VendorTable, raw: usize, sink: &SharedSink) -> KeyId {
    table.translate(raw).unwrap_or_else(|| {
        sink.report(Diagnostic::UnmappedCode { table, raw });
        UNMAPPED
    })
}

/// Normalize an 8-bit value to 0.0..=1.0
fn unit_magnitude(value: u8) -> f32 {
    f32::from(value) / 255.0
}
