//! Multi-frame scan reassembly
//!
//! Some keyboards split one key scan over several reports, each tagged with a
//! frame index. Payload bytes are indexed linearly across frames:
//! `slot = frame * payload_bytes_per_frame + offset`. These devices only
//! report in response to a poll command.

use std::fmt;

use analogsense_transport::RawReport;
use tracing::trace;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::{translate, ActiveKey, ActiveKeySnapshot, ReportDecoder};
use crate::diagnostics::SharedSink;
use crate::scancode::VendorTable;

/// Frame layout constants for one device family
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGeometry {
    /// Byte offset of the frame index
    pub frame_index_offset: usize,
    /// Bytes before the payload region
    pub header_len: usize,
    /// Slot stride between consecutive frames
    pub payload_bytes_per_frame: usize,
    /// Index that starts a scan
    pub first_frame: u8,
    /// Index that completes a scan
    pub last_frame: u8,
    /// Raw value → magnitude divisor. Not 255: values above it are over-travel.
    pub divisor: f32,
    /// Slot index → key table
    pub table: VendorTable,
}

/// Outbound poll command body (63 bytes, sent after the report id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct PollCommand {
    opcode: u8,
    sub: u8,
    arg: u8,
    _reserved: [u8; 60],
}

impl PollCommand {
    pub const LEN: usize = 63;

    pub const fn new(opcode: u8, sub: u8, arg: u8) -> Self {
        Self {
            opcode,
            sub,
            arg,
            _reserved: [0; 60],
        }
    }
}

/// Poll command plus the report id it goes out on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollRequest {
    pub report_id: u8,
    pub command: PollCommand,
}

impl PollRequest {
    pub fn payload(&self) -> &[u8] {
        self.command.as_bytes()
    }
}

enum State {
    Idle,
    Accumulating { frame: u8, keys: ActiveKeySnapshot },
}

/// Reassembles frames `first..=last` into one snapshot
///
/// A first frame always restarts, discarding anything in flight. Frames in
/// between are appended without sequence checks, so a dropped frame only
/// loses its own keys.
pub struct MultiFrameDecoder {
    geometry: FrameGeometry,
    state: State,
    sink: SharedSink,
}

impl fmt::Debug for MultiFrameDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiFrameDecoder")
            .field("geometry", &self.geometry)
            .field("frame", &self.current_frame())
            .finish_non_exhaustive()
    }
}

impl MultiFrameDecoder {
    pub fn new(geometry: FrameGeometry, sink: SharedSink) -> Self {
        Self {
            geometry,
            state: State::Idle,
            sink,
        }
    }

    /// Index of the last frame accumulated, `None` when idle
    pub fn current_frame(&self) -> Option<u8> {
        match &self.state {
            State::Idle => None,
            State::Accumulating { frame, .. } => Some(*frame),
        }
    }

    fn append_frame(&self, frame: u8, data: &[u8], keys: &mut ActiveKeySnapshot) {
        let g = &self.geometry;
        let Some(payload) = data.get(g.header_len..) else {
            return;
        };
        let base = usize::from(frame) * g.payload_bytes_per_frame;

        for (offset, &value) in payload.iter().enumerate() {
            if value == 0 {
                continue;
            }
            let key = translate(g.table, base + offset, &self.sink);
            keys.push(ActiveKey::new(key, f32::from(value) / g.divisor));
        }
    }
}

impl ReportDecoder for MultiFrameDecoder {
    fn on_report(&mut self, report: &RawReport) -> Option<ActiveKeySnapshot> {
        let data = &report.data;
        let Some(&frame) = data.get(self.geometry.frame_index_offset) else {
            trace!("Short report ({} bytes), ignoring", data.len());
            return None;
        };

        let mut keys = match std::mem::replace(&mut self.state, State::Idle) {
            State::Accumulating { keys, .. } if frame != self.geometry.first_frame => keys,
            _ => Vec::new(),
        };
        self.append_frame(frame, data, &mut keys);

        if frame == self.geometry.last_frame {
            trace!("Scan complete: {} keys", keys.len());
            return Some(keys);
        }
        self.state = State::Accumulating { frame, keys };
        None
    }

    fn reset(&mut self) {
        self.state = State::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Diagnostic, RecordingSink};
    use crate::keycode::UNMAPPED;
    use std::sync::Arc;

    const GEOMETRY: FrameGeometry = FrameGeometry {
        frame_index_offset: 3,
        header_len: 4,
        payload_bytes_per_frame: 59,
        first_frame: 0,
        last_frame: 2,
        divisor: 40.0,
        table: VendorTable::DrunkDeer,
    };

    fn decoder() -> (MultiFrameDecoder, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        (MultiFrameDecoder::new(GEOMETRY, sink.clone()), sink)
    }

    /// 63-byte frame with `(payload offset, value)` pairs set
    fn frame(index: u8, values: &[(usize, u8)]) -> RawReport {
        let mut data = vec![0u8; 63];
        data[0] = 0xB7;
        data[3] = index;
        for &(offset, value) in values {
            data[4 + offset] = value;
        }
        RawReport::unnumbered(data)
    }

    #[test]
    fn test_three_frames_make_one_snapshot() {
        let (mut d, sink) = decoder();
        assert_eq!(d.on_report(&frame(0, &[(0, 20)])), None);
        assert_eq!(d.current_frame(), Some(0));
        assert_eq!(d.on_report(&frame(1, &[(0, 40)])), None);
        let keys = d.on_report(&frame(2, &[(0, 60)])).unwrap();

        // Slots 0, 59 and 118: Esc, empty, Left
        assert_eq!(
            keys,
            vec![
                ActiveKey::new(0x29, 0.5),
                ActiveKey::new(UNMAPPED, 1.0),
                ActiveKey::new(0x50, 1.5),
            ]
        );
        assert!(keys[2].magnitude > 1.0);
        assert_eq!(
            sink.entries(),
            vec![Diagnostic::UnmappedCode { table: VendorTable::DrunkDeer, raw: 59 }]
        );
        assert_eq!(d.current_frame(), None);
    }

    #[test]
    fn test_first_frame_restarts() {
        let (mut d, _) = decoder();
        assert_eq!(d.on_report(&frame(0, &[(0, 10)])), None);
        assert_eq!(d.on_report(&frame(1, &[(5, 10)])), None);

        // Restart without stale keys
        assert_eq!(d.on_report(&frame(0, &[(2, 40)])), None);
        assert_eq!(d.on_report(&frame(1, &[])), None);
        let keys = d.on_report(&frame(2, &[])).unwrap();
        assert_eq!(keys, vec![ActiveKey::new(0x3A, 1.0)]);
    }

    #[test]
    fn test_skipped_middle_frame_still_completes() {
        let (mut d, _) = decoder();
        assert_eq!(d.on_report(&frame(0, &[(43, 8)])), None);
        let keys = d.on_report(&frame(2, &[])).unwrap();
        assert_eq!(keys, vec![ActiveKey::new(0x14, 0.2)]);
    }

    #[test]
    fn test_last_frame_while_idle_emits_its_own_keys() {
        let (mut d, _) = decoder();
        let keys = d.on_report(&frame(2, &[(0, 40)])).unwrap();
        assert_eq!(keys, vec![ActiveKey::new(0x50, 1.0)]);
    }

    #[test]
    fn test_reset_drops_partial_scan() {
        let (mut d, _) = decoder();
        d.on_report(&frame(0, &[(0, 40)]));
        d.reset();
        assert_eq!(d.current_frame(), None);
        d.on_report(&frame(1, &[]));
        let keys = d.on_report(&frame(2, &[])).unwrap();
        assert!(keys.is_empty());
    }

    #[test]
    fn test_short_report_ignored() {
        let (mut d, _) = decoder();
        d.on_report(&frame(0, &[(0, 40)]));
        assert_eq!(d.on_report(&RawReport::unnumbered(vec![0xB7, 0, 0])), None);
        assert_eq!(d.current_frame(), Some(0));

        // Header only: frame counted, no payload
        assert_eq!(d.on_report(&RawReport::unnumbered(vec![0xB7, 0, 0, 1])), None);
        let keys = d.on_report(&frame(2, &[])).unwrap();
        assert_eq!(keys, vec![ActiveKey::new(0x29, 1.0)]);
    }

    #[test]
    fn test_poll_command_layout() {
        let poll = PollRequest {
            report_id: 4,
            command: PollCommand::new(0xB6, 0x03, 0x01),
        };
        let bytes = poll.payload();
        assert_eq!(bytes.len(), PollCommand::LEN);
        assert_eq!(&bytes[..3], &[0xB6, 0x03, 0x01]);
        assert!(bytes[3..].iter().all(|&b| b == 0));
    }
}
