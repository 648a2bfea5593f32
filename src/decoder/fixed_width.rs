use analogsense_transport::RawReport;

use super::{unit_magnitude, ActiveKey, ActiveKeySnapshot, ReportDecoder};

/// Bytes per record: u16 BE key code, u8 value
const RECORD_LEN: usize = 3;

/// Decoder for reports that already carry canonical key codes
///
/// Stateless; every report is a complete snapshot. A zero key code ends the
/// record list and a trailing partial record is dropped.
#[derive(Debug, Default)]
pub struct FixedWidthDecoder;

impl FixedWidthDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl ReportDecoder for FixedWidthDecoder {
    fn on_report(&mut self, report: &RawReport) -> Option<ActiveKeySnapshot> {
        let keys = report
            .data
            .chunks_exact(RECORD_LEN)
            .map(|rec| (u16::from_be_bytes([rec[0], rec[1]]), rec[2]))
            .take_while(|&(code, _)| code != 0)
            .map(|(code, value)| ActiveKey::new(code, unit_magnitude(value)))
            .collect();
        Some(keys)
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(data: &[u8]) -> ActiveKeySnapshot {
        FixedWidthDecoder::new()
            .on_report(&RawReport::unnumbered(data.to_vec()))
            .expect("fixed-width always yields a snapshot")
    }

    #[test]
    fn test_terminator_ends_scan() {
        let keys = decode(&[0x00, 0x1E, 0x80, 0x00, 0x00, 0x00]);
        assert_eq!(keys, vec![ActiveKey::new(0x001E, 128.0 / 255.0)]);
    }

    #[test]
    fn test_records_after_terminator_ignored() {
        let keys = decode(&[0x00, 0x04, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x05, 0x10]);
        assert_eq!(keys, vec![ActiveKey::new(0x04, 1.0)]);
    }

    #[test]
    fn test_big_endian_codes() {
        let keys = decode(&[0x04, 0x09, 0x33, 0x00, 0xE1, 0x00]);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].key, 0x0409);
        assert_eq!(keys[0].magnitude, 0x33 as f32 / 255.0);
        assert_eq!(keys[1].key, 0x00E1);
        assert_eq!(keys[1].magnitude, 0.0);
    }

    #[test]
    fn test_partial_trailing_record_dropped() {
        let keys = decode(&[0x00, 0x1E, 0x80, 0x00, 0x1F]);
        assert_eq!(keys, vec![ActiveKey::new(0x1E, 128.0 / 255.0)]);
        assert!(decode(&[0x00, 0x1E]).is_empty());
        assert!(decode(&[]).is_empty());
    }

    #[test]
    fn test_report_id_not_gated() {
        let mut decoder = FixedWidthDecoder::new();
        let keys = decoder.on_report(&RawReport::numbered(3, vec![0x00, 0x29, 0xFF]));
        assert_eq!(keys, Some(vec![ActiveKey::new(0x29, 1.0)]));
    }
}
