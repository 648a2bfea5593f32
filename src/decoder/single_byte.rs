use std::fmt;

use analogsense_transport::RawReport;
use tracing::trace;

use super::{translate, unit_magnitude, ActiveKey, ActiveKeySnapshot, ReportDecoder};
use crate::diagnostics::SharedSink;
use crate::scancode::VendorTable;

/// Decoder for one-byte vendor codes gated on a report id
///
/// Records are `[code, value]` or `[code, value, reserved]` depending on
/// `stride`. The reserved byte's meaning is unknown and it is skipped.
pub struct SingleByteDecoder {
    report_id: u8,
    stride: usize,
    table: VendorTable,
    sink: SharedSink,
}

impl fmt::Debug for SingleByteDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleByteDecoder")
            .field("report_id", &self.report_id)
            .field("stride", &self.stride)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl SingleByteDecoder {
    /// # Arguments
    /// * `report_id` - Only reports with this id are decoded
    /// * `stride` - Record length in bytes (at least 2)
    /// * `table` - Vendor code table
    /// * `sink` - Receives unmapped-code diagnostics
    pub fn new(report_id: u8, stride: usize, table: VendorTable, sink: SharedSink) -> Self {
        Self {
            report_id,
            stride: stride.max(2),
            table,
            sink,
        }
    }
}

impl ReportDecoder for SingleByteDecoder {
    fn on_report(&mut self, report: &RawReport) -> Option<ActiveKeySnapshot> {
        if report.report_id != Some(self.report_id) {
            trace!("Ignoring report {:?}", report.report_id);
            return None;
        }

        let keys = report
            .data
            .chunks_exact(self.stride)
            .take_while(|rec| rec[0] != 0)
            .map(|rec| {
                let key = translate(self.table, usize::from(rec[0]), &self.sink);
                ActiveKey::new(key, unit_magnitude(rec[1]))
            })
            .collect();
        Some(keys)
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Diagnostic, RecordingSink};
    use crate::keycode::{FN_KEY, UNMAPPED};
    use std::sync::Arc;

    fn decoder(stride: usize) -> (SingleByteDecoder, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let d = SingleByteDecoder::new(7, stride, VendorTable::Razer, sink.clone());
        (d, sink)
    }

    #[test]
    fn test_wrong_report_id_ignored() {
        let (mut d, sink) = decoder(2);
        assert_eq!(d.on_report(&RawReport::numbered(8, vec![0x6E, 0xFF])), None);
        assert_eq!(d.on_report(&RawReport::unnumbered(vec![0x6E, 0xFF])), None);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_two_byte_records() {
        let (mut d, sink) = decoder(2);
        let report = RawReport::numbered(7, vec![0x6E, 0xFF, 0x3B, 0x33, 0x00, 0x00, 0x1F, 0x80]);
        let keys = d.on_report(&report).unwrap();
        assert_eq!(
            keys,
            vec![ActiveKey::new(0x29, 1.0), ActiveKey::new(FN_KEY, 0x33 as f32 / 255.0)]
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_padded_records_skip_reserved_byte() {
        let (mut d, _) = decoder(3);
        // Reserved byte 0x00 must not be taken for a terminator
        let report =
            RawReport::numbered(7, vec![0x1F, 0x80, 0x00, 0x20, 0x40, 0x7F, 0x00, 0x00, 0x00]);
        let keys = d.on_report(&report).unwrap();
        assert_eq!(
            keys,
            vec![
                ActiveKey::new(0x04, 128.0 / 255.0),
                ActiveKey::new(0x16, 64.0 / 255.0),
            ]
        );
    }

    #[test]
    fn test_unmapped_code_warns_and_continues() {
        let (mut d, sink) = decoder(2);
        let keys = d
            .on_report(&RawReport::numbered(7, vec![0x0E, 0x10, 0x0E, 0x20, 0x1F, 0x30]))
            .unwrap();
        assert_eq!(keys.len(), 3);
        assert_eq!(keys[0].key, UNMAPPED);
        assert_eq!(keys[1].key, UNMAPPED);
        assert_eq!(keys[2].key, 0x04);
        assert_eq!(
            sink.entries(),
            vec![
                Diagnostic::UnmappedCode { table: VendorTable::Razer, raw: 0x0E },
                Diagnostic::UnmappedCode { table: VendorTable::Razer, raw: 0x0E },
            ]
        );
    }

    #[test]
    fn test_partial_record_dropped() {
        let (mut d, _) = decoder(3);
        let keys = d.on_report(&RawReport::numbered(7, vec![0x1F, 0x80, 0x00, 0x20])).unwrap();
        assert_eq!(keys.len(), 1);
    }
}
