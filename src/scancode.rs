//! Vendor code translation tables
//!
//! Wooting reports canonical HID usages directly. Razer reports its own
//! one-byte scancodes, and DrunkDeer reports a linear matrix slot index; both
//! are translated here.

use crate::keycode::{KeyId, FN_KEY};

/// Razer analog scancode → canonical key identifier
const RAZER_TABLE: &[(u8, KeyId)] = &[
    (0x6E, 0x29), // Escape
    (0x70, 0x3A), // F1
    (0x71, 0x3B), // F2
    (0x72, 0x3C), // F3
    (0x73, 0x3D), // F4
    (0x74, 0x3E), // F5
    (0x75, 0x3F), // F6
    (0x76, 0x40), // F7
    (0x77, 0x41), // F8
    (0x78, 0x42), // F9
    (0x79, 0x43), // F10
    (0x7A, 0x44), // F11
    (0x7B, 0x45), // F12
    (0x01, 0x35), // `
    (0x02, 0x1E), // 1
    (0x03, 0x1F), // 2
    (0x04, 0x20), // 3
    (0x05, 0x21), // 4
    (0x06, 0x22), // 5
    (0x07, 0x23), // 6
    (0x08, 0x24), // 7
    (0x09, 0x25), // 8
    (0x0A, 0x26), // 9
    (0x0B, 0x27), // 0
    (0x0C, 0x2D), // -
    (0x0D, 0x2E), // =
    (0x0F, 0x2A), // Backspace
    (0x10, 0x2B), // Tab
    (0x11, 0x14), // Q
    (0x12, 0x1A), // W
    (0x13, 0x08), // E
    (0x14, 0x15), // R
    (0x15, 0x17), // T
    (0x16, 0x1C), // Y
    (0x17, 0x18), // U
    (0x18, 0x0C), // I
    (0x19, 0x12), // O
    (0x1A, 0x13), // P
    (0x1B, 0x2F), // [
    (0x1C, 0x30), // ]
    (0x2B, 0x28), // Enter
    (0x1E, 0x39), // Caps Lock
    (0x1F, 0x04), // A
    (0x20, 0x16), // S
    (0x21, 0x07), // D
    (0x22, 0x09), // F
    (0x23, 0x0A), // G
    (0x24, 0x0B), // H
    (0x25, 0x0D), // J
    (0x26, 0x0E), // K
    (0x27, 0x0F), // L
    (0x28, 0x33), // ;
    (0x29, 0x34), // '
    (0x2A, 0x31), // Backslash
    (0x2C, 0xE1), // Left Shift
    (0x2D, 0x64), // Intl Backslash
    (0x2E, 0x1D), // Z
    (0x2F, 0x1B), // X
    (0x30, 0x06), // C
    (0x31, 0x19), // V
    (0x32, 0x05), // B
    (0x33, 0x11), // N
    (0x34, 0x10), // M
    (0x35, 0x36), // ,
    (0x36, 0x37), // .
    (0x37, 0x38), // /
    (0x39, 0xE5), // Right Shift
    (0x3A, 0xE0), // Left Ctrl
    (0x7F, 0xE3), // Left Meta
    (0x3C, 0xE2), // Left Alt
    (0x3D, 0x2C), // Space
    (0x3E, 0xE6), // Right Alt
    (0x3B, FN_KEY), // Fn
    (0x81, 0x65), // Context Menu
    (0x40, 0xE4), // Right Ctrl
    (0x7C, 0x46), // Print Screen
    (0x7D, 0x48), // Pause
    (0x7E, 0x47), // Scroll Lock
    (0x4B, 0x49), // Insert
    (0x50, 0x4A), // Home
    (0x55, 0x4B), // Page Up
    (0x4C, 0x4C), // Delete
    (0x51, 0x4D), // End
    (0x56, 0x4E), // Page Down
    (0x53, 0x52), // Up Arrow
    (0x4F, 0x50), // Left Arrow
    (0x54, 0x51), // Down Arrow
    (0x59, 0x4F), // Right Arrow
    (0x5A, 0x53), // Num Lock
    (0x5F, 0x54), // Numpad /
    (0x64, 0x55), // Numpad *
    (0x69, 0x56), // Numpad -
    (0x5B, 0x5F), // Numpad 7
    (0x60, 0x60), // Numpad 8
    (0x65, 0x61), // Numpad 9
    (0x6A, 0x57), // Numpad +
    (0x5C, 0x5C), // Numpad 4
    (0x61, 0x5D), // Numpad 5
    (0x66, 0x5E), // Numpad 6
    (0x5D, 0x59), // Numpad 1
    (0x62, 0x5A), // Numpad 2
    (0x67, 0x5B), // Numpad 3
    (0x6C, 0x58), // Numpad Enter
    (0x63, 0x62), // Numpad 0
    (0x68, 0x63), // Numpad .
];

/// Number of slots in one DrunkDeer matrix row
pub const DRUNKDEER_ROW_LEN: usize = 21;

/// DrunkDeer linear slot index → canonical key identifier
///
/// Six rows of 21 columns; 0 marks an empty slot.
#[rustfmt::skip]
const DRUNKDEER_SLOTS: [KeyId; 6 * DRUNKDEER_ROW_LEN] = [
    // Row 0 (0-20): Esc, F-row, Del
    0x29, 0x00, 0x3A, 0x3B, 0x3C, 0x3D, 0x3E, 0x3F, 0x40, 0x41, 0x42,
    0x43, 0x44, 0x45, 0x4C, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    // Row 1 (21-41): number row, Backspace, Home
    0x35, 0x1E, 0x1F, 0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27,
    0x2D, 0x2E, 0x00, 0x2A, 0x4A, 0x00, 0x00, 0x00, 0x00, 0x00,
    // Row 2 (42-62): Tab row, PgUp
    0x2B, 0x14, 0x1A, 0x08, 0x15, 0x17, 0x1C, 0x18, 0x0C, 0x12, 0x13,
    0x2F, 0x30, 0x00, 0x31, 0x4B, 0x00, 0x00, 0x00, 0x00, 0x00,
    // Row 3 (63-83): Caps row, Enter, PgDn
    0x39, 0x04, 0x16, 0x07, 0x09, 0x0A, 0x0B, 0x0D, 0x0E, 0x0F, 0x33,
    0x34, 0x00, 0x00, 0x28, 0x4E, 0x00, 0x00, 0x00, 0x00, 0x00,
    // Row 4 (84-104): Shift row, Up, End
    0xE1, 0x64, 0x1D, 0x1B, 0x06, 0x19, 0x05, 0x11, 0x10, 0x36, 0x37,
    0x38, 0x00, 0xE5, 0x52, 0x4D, 0x00, 0x00, 0x00, 0x00, 0x00,
    // Row 5 (105-125): modifiers, Space, arrows
    0xE0, 0xE3, 0xE2, 0x00, 0x00, 0x00, 0x2C, 0x00, 0x00, 0x00, 0xE6,
    FN_KEY, 0xE4, 0x50, 0x51, 0x4F, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Which vendor table a translation went through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorTable {
    /// Razer one-byte scancodes
    Razer,
    /// DrunkDeer matrix slot indices
    DrunkDeer,
}

impl VendorTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorTable::Razer => "razer",
            VendorTable::DrunkDeer => "drunkdeer",
        }
    }

    /// Translate a raw vendor code; `None` if the table has no entry
    pub fn translate(&self, raw: usize) -> Option<KeyId> {
        match self {
            VendorTable::Razer => u8::try_from(raw).ok().and_then(razer_to_hid),
            VendorTable::DrunkDeer => drunkdeer_slot_to_hid(raw),
        }
    }
}

/// Translate a Razer scancode
pub fn razer_to_hid(scancode: u8) -> Option<KeyId> {
    RAZER_TABLE
        .iter()
        .find(|(raw, _)| *raw == scancode)
        .map(|&(_, key)| key)
}

/// All Razer scancodes with a translation, in table order
pub fn razer_entries() -> impl Iterator<Item = (u8, KeyId)> {
    RAZER_TABLE.iter().copied()
}

/// Translate a DrunkDeer slot index; empty and out-of-range slots are `None`
pub fn drunkdeer_slot_to_hid(slot: usize) -> Option<KeyId> {
    DRUNKDEER_SLOTS.get(slot).copied().filter(|&key| key != 0)
}
