//! HID report descriptor parsing
//!
//! Only the parts needed for device matching are extracted: the usage page of
//! each top-level collection and the input report IDs declared inside it.

use crate::types::{CollectionInfo, ReportInfo};

/// Item type field of a short item prefix (HID 1.11, 6.2.2.2)
mod item_type {
    pub const MAIN: u8 = 0;
    pub const GLOBAL: u8 = 1;
    pub const LOCAL: u8 = 2;
}

/// Main item tags
mod main_tag {
    pub const INPUT: u8 = 0x8;
    pub const COLLECTION: u8 = 0xA;
    pub const END_COLLECTION: u8 = 0xC;
}

/// Global item tags
mod global_tag {
    pub const USAGE_PAGE: u8 = 0x0;
    pub const REPORT_ID: u8 = 0x8;
    pub const PUSH: u8 = 0xA;
    pub const POP: u8 = 0xB;
}

/// Local item tags
mod local_tag {
    pub const USAGE: u8 = 0x0;
}

/// Prefix byte announcing a long item
const LONG_ITEM_PREFIX: u8 = 0xFE;

/// Result of parsing a report descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDescriptor {
    /// Top-level collections in declaration order
    pub collections: Vec<CollectionInfo>,
    /// Whether any Report ID item was present (reports are then prefixed by their ID)
    pub uses_report_ids: bool,
}

#[derive(Debug)]
struct Item<'a> {
    kind: u8,
    tag: u8,
    data: &'a [u8],
}

impl Item<'_> {
    /// Unsigned little-endian item value
    fn value(&self) -> u32 {
        self.data
            .iter()
            .rev()
            .fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
    }
}

struct Items<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for Items<'a> {
    type Item = Item<'a>;

    fn next(&mut self) -> Option<Item<'a>> {
        loop {
            let prefix = *self.bytes.get(self.pos)?;

            if prefix == LONG_ITEM_PREFIX {
                // [FE, size, tag, data...] - no long item is defined, skip it
                let size = *self.bytes.get(self.pos + 1)? as usize;
                self.pos += 3 + size;
                continue;
            }

            let size = match prefix & 0x03 {
                3 => 4,
                n => n as usize,
            };
            let start = self.pos + 1;
            let data = self.bytes.get(start..start + size)?;
            self.pos = start + size;

            return Some(Item {
                kind: (prefix >> 2) & 0x03,
                tag: prefix >> 4,
                data,
            });
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct GlobalState {
    usage_page: u16,
    report_id: u8,
}

/// Parse a raw HID report descriptor
///
/// Truncated input ends the parse; whatever was collected up to that point
/// is returned.
pub fn parse_report_descriptor(bytes: &[u8]) -> ParsedDescriptor {
    let mut parsed = ParsedDescriptor::default();
    let mut global = GlobalState::default();
    let mut stack: Vec<GlobalState> = Vec::new();
    let mut usage: Option<u16> = None;
    let mut depth = 0usize;
    let mut current: Option<CollectionInfo> = None;

    for item in (Items { bytes, pos: 0 }) {
        match (item.kind, item.tag) {
            (item_type::GLOBAL, global_tag::USAGE_PAGE) => {
                global.usage_page = item.value() as u16;
            }
            (item_type::GLOBAL, global_tag::REPORT_ID) => {
                global.report_id = item.value() as u8;
                parsed.uses_report_ids = true;
            }
            (item_type::GLOBAL, global_tag::PUSH) => stack.push(global),
            (item_type::GLOBAL, global_tag::POP) => {
                if let Some(saved) = stack.pop() {
                    global = saved;
                }
            }
            (item_type::LOCAL, local_tag::USAGE) => {
                // Extended (4-byte) usages carry their page in the high word
                usage.get_or_insert(item.value() as u16);
            }
            (item_type::MAIN, main_tag::COLLECTION) => {
                if depth == 0 {
                    current = Some(CollectionInfo::new(
                        global.usage_page,
                        usage.unwrap_or_default(),
                    ));
                }
                depth += 1;
                usage = None;
            }
            (item_type::MAIN, main_tag::END_COLLECTION) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some(done) = current.take() {
                        parsed.collections.push(done);
                    }
                }
                usage = None;
            }
            (item_type::MAIN, main_tag::INPUT) => {
                if let Some(ref mut collection) = current {
                    if !collection.has_input_report(global.report_id) {
                        collection.input_reports.push(ReportInfo {
                            report_id: global.report_id,
                        });
                    }
                }
                usage = None;
            }
            (item_type::MAIN, _) => usage = None,
            _ => {}
        }
    }

    if let Some(open) = current {
        parsed.collections.push(open);
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Keyboard + vendor analog collection, numbered reports
    const NUMBERED: &[u8] = &[
        0x05, 0x01, // Usage Page (Generic Desktop)
        0x09, 0x06, // Usage (Keyboard)
        0xA1, 0x01, // Collection (Application)
        0x85, 0x01, //   Report ID (1)
        0x75, 0x08, //   Report Size (8)
        0x95, 0x08, //   Report Count (8)
        0x81, 0x02, //   Input (Data,Var,Abs)
        0xC0, // End Collection
        0x06, 0x00, 0xFF, // Usage Page (Vendor 0xFF00)
        0x09, 0x01, // Usage (1)
        0xA1, 0x01, // Collection (Application)
        0x85, 0x07, //   Report ID (7)
        0x09, 0x02, //   Usage (2)
        0xA1, 0x00, //   Collection (Physical)
        0x81, 0x02, //     Input
        0xC0, //   End Collection
        0x85, 0x0B, //   Report ID (11)
        0x81, 0x02, //   Input
        0x85, 0x04, //   Report ID (4)
        0x91, 0x02, //   Output
        0xC0, // End Collection
    ];

    #[test]
    fn test_numbered_collections() {
        let parsed = parse_report_descriptor(NUMBERED);
        assert!(parsed.uses_report_ids);
        assert_eq!(parsed.collections.len(), 2);

        let keyboard = &parsed.collections[0];
        assert_eq!(keyboard.usage_page, 0x0001);
        assert_eq!(keyboard.usage, 0x0006);
        assert!(keyboard.has_input_report(1));

        let vendor = &parsed.collections[1];
        assert_eq!(vendor.usage_page, 0xFF00);
        assert_eq!(vendor.usage, 0x0001);
        assert!(vendor.has_input_report(7));
        assert!(vendor.has_input_report(11));
        // Output reports are not input reports
        assert!(!vendor.has_input_report(4));
    }

    #[test]
    fn test_unnumbered_reports_use_id_zero() {
        let desc = [
            0x06, 0x54, 0xFF, // Usage Page (0xFF54)
            0x09, 0x01, // Usage (1)
            0xA1, 0x01, // Collection
            0x81, 0x02, //   Input
            0xC0,
        ];
        let parsed = parse_report_descriptor(&desc);
        assert!(!parsed.uses_report_ids);
        assert_eq!(parsed.collections[0].usage_page, 0xFF54);
        assert!(parsed.collections[0].has_input_report(0));
    }

    #[test]
    fn test_push_pop_restores_usage_page() {
        let desc = [
            0x05, 0x0C, // Usage Page (Consumer)
            0xA4, // Push
            0x06, 0x00, 0xFF, // Usage Page (Vendor)
            0xB4, // Pop
            0x09, 0x01, // Usage
            0xA1, 0x01, // Collection
            0xC0,
        ];
        let parsed = parse_report_descriptor(&desc);
        assert_eq!(parsed.collections[0].usage_page, 0x000C);
    }

    #[test]
    fn test_truncated_descriptor_does_not_panic() {
        let parsed = parse_report_descriptor(&NUMBERED[..23]);
        // First collection completed, second opened but cut off mid-item
        assert_eq!(parsed.collections.len(), 2);
        assert_eq!(parsed.collections[1].usage_page, 0xFF00);

        assert_eq!(parse_report_descriptor(&[0x06, 0x00]), ParsedDescriptor::default());
    }

    #[test]
    fn test_long_items_are_skipped() {
        let desc = [
            0xFE, 0x02, 0x10, 0xAA, 0xBB, // Long item, 2 data bytes
            0x05, 0x01, // Usage Page
            0xA1, 0x01, // Collection
            0xC0,
        ];
        let parsed = parse_report_descriptor(&desc);
        assert_eq!(parsed.collections.len(), 1);
        assert_eq!(parsed.collections[0].usage_page, 0x0001);
    }
}
