// Supported analog keyboards
// Rule groups are matched in declaration order; the first hit wins.

use analogsense_transport::{DeviceDescriptor, DeviceFilter};

use crate::decoder::{DecoderVariant, FrameGeometry, PollCommand, PollRequest};
use crate::scancode::VendorTable;

pub const VENDOR_WOOTING: u16 = 0x31E3;
/// Atmel VID used by pre-2020 Wooting firmware
pub const VENDOR_WOOTING_LEGACY: u16 = 0x03EB;
pub const VENDOR_RAZER: u16 = 0x1532;
pub const VENDOR_DRUNKDEER: u16 = 0x352D;
/// Apple VID some DrunkDeer A75 units enumerate with
pub const VENDOR_DRUNKDEER_APPLE: u16 = 0x05AC;

pub const USAGE_PAGE_WOOTING_ANALOG: u16 = 0xFF54;
pub const USAGE_PAGE_DRUNKDEER: u16 = 0xFF00;

pub const REPORT_ID_RAZER_V2: u8 = 7;
pub const REPORT_ID_RAZER_V3: u8 = 11;
pub const REPORT_ID_DRUNKDEER_POLL: u8 = 4;

/// DrunkDeer frame layout: index at byte 3, 59 payload bytes, frames 0..=2
pub const DRUNKDEER_GEOMETRY: FrameGeometry = FrameGeometry {
    frame_index_offset: 3,
    header_len: 4,
    payload_bytes_per_frame: 59,
    first_frame: 0,
    last_frame: 2,
    divisor: 40.0,
    table: VendorTable::DrunkDeer,
};

/// DrunkDeer "read key depths" request
pub const DRUNKDEER_POLL: PollRequest = PollRequest {
    report_id: REPORT_ID_DRUNKDEER_POLL,
    command: PollCommand::new(0xB6, 0x03, 0x01),
};

/// Filters for one decoder variant
#[derive(Debug, Clone, Copy)]
pub struct RuleGroup {
    pub name: &'static str,
    pub variant: DecoderVariant,
    pub filters: &'static [DeviceFilter],
}

impl RuleGroup {
    /// First filter in this group that covers `desc`
    pub fn matching_filter(&self, desc: &DeviceDescriptor) -> Option<&'static DeviceFilter> {
        self.filters.iter().find(|f| f.matches(desc))
    }
}

/// All supported families, highest priority first
pub const SUPPORTED: &[RuleGroup] = &[
    RuleGroup {
        name: "Wooting",
        variant: DecoderVariant::FixedWidthTerminated,
        filters: &[
            DeviceFilter::vendor(VENDOR_WOOTING).usage_page(USAGE_PAGE_WOOTING_ANALOG),
            // Wooting One, legacy firmware
            DeviceFilter::vendor(VENDOR_WOOTING_LEGACY)
                .product(0xFF01)
                .usage_page(USAGE_PAGE_WOOTING_ANALOG),
            // Wooting Two, legacy firmware
            DeviceFilter::vendor(VENDOR_WOOTING_LEGACY)
                .product(0xFF02)
                .usage_page(USAGE_PAGE_WOOTING_ANALOG),
        ],
    },
    RuleGroup {
        name: "Razer Huntsman Analog",
        variant: DecoderVariant::SingleByteTerminated {
            report_id: REPORT_ID_RAZER_V2,
            table: VendorTable::Razer,
        },
        filters: &[
            // Huntsman V2 Analog
            DeviceFilter::vendor(VENDOR_RAZER)
                .product(0x0266)
                .report_id(REPORT_ID_RAZER_V2),
            // Huntsman Mini Analog
            DeviceFilter::vendor(VENDOR_RAZER)
                .product(0x0282)
                .report_id(REPORT_ID_RAZER_V2),
        ],
    },
    RuleGroup {
        name: "Razer Huntsman V3 Pro",
        variant: DecoderVariant::SingleByteTerminatedWithPad {
            report_id: REPORT_ID_RAZER_V3,
            table: VendorTable::Razer,
        },
        filters: &[
            DeviceFilter::vendor(VENDOR_RAZER)
                .product(0x02A6)
                .report_id(REPORT_ID_RAZER_V3),
            // TKL
            DeviceFilter::vendor(VENDOR_RAZER)
                .product(0x02A7)
                .report_id(REPORT_ID_RAZER_V3),
            // Mini
            DeviceFilter::vendor(VENDOR_RAZER)
                .product(0x02B0)
                .report_id(REPORT_ID_RAZER_V3),
        ],
    },
    RuleGroup {
        name: "DrunkDeer",
        variant: DecoderVariant::MultiFrameAccumulated {
            geometry: DRUNKDEER_GEOMETRY,
            poll: DRUNKDEER_POLL,
        },
        filters: &[
            // G65
            DeviceFilter::vendor(VENDOR_DRUNKDEER)
                .product(0x2382)
                .usage_page(USAGE_PAGE_DRUNKDEER),
            // G75
            DeviceFilter::vendor(VENDOR_DRUNKDEER)
                .product(0x2383)
                .usage_page(USAGE_PAGE_DRUNKDEER),
            // G60
            DeviceFilter::vendor(VENDOR_DRUNKDEER)
                .product(0x2384)
                .usage_page(USAGE_PAGE_DRUNKDEER),
            // A75 ISO
            DeviceFilter::vendor(VENDOR_DRUNKDEER_APPLE)
                .product(0x024F)
                .usage_page(USAGE_PAGE_DRUNKDEER),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_group_has_filters() {
        for group in SUPPORTED {
            assert!(!group.filters.is_empty(), "{} has no filters", group.name);
            assert!(
                group.filters.iter().all(|f| f.vendor_id.is_some()),
                "{} has a vendor wildcard",
                group.name
            );
        }
    }

    #[test]
    fn test_priority_order() {
        let names: Vec<_> = SUPPORTED.iter().map(|g| g.name).collect();
        assert_eq!(
            names,
            ["Wooting", "Razer Huntsman Analog", "Razer Huntsman V3 Pro", "DrunkDeer"]
        );
    }

    #[test]
    fn test_only_drunkdeer_polls() {
        let polling: Vec<_> = SUPPORTED
            .iter()
            .filter(|g| g.variant.poll_request().is_some())
            .map(|g| g.name)
            .collect();
        assert_eq!(polling, ["DrunkDeer"]);
    }
}
