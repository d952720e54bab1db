// CLASSIFICATION: COMMUNITY
// Filename: event.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Native `struct input_event` records as read from `/dev/input/event*`.

use std::mem::size_of;

/// Event type for absolute axis reports.
pub const EV_ABS: u16 = 0x03;
/// Absolute X axis code.
pub const ABS_X: u16 = 0x00;
/// Absolute Y axis code.
pub const ABS_Y: u16 = 0x01;

// The kernel stamps events with two `__kernel_ulong_t` fields.
const STAMP_BYTES: usize = 2 * size_of::<libc::c_ulong>();

/// Size of one record on this architecture.
pub const EVENT_SIZE: usize = STAMP_BYTES + 8;

/// The type/code/value triple of an input event; the timestamp is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub type_: u16,
    pub code: u16,
    pub value: i32,
}

impl InputEvent {
    pub fn new(type_: u16, code: u16, value: i32) -> Self {
        Self { type_, code, value }
    }

    /// Decode a native record.
    pub fn from_bytes(raw: &[u8; EVENT_SIZE]) -> Self {
        let field = &raw[STAMP_BYTES..];
        Self {
            type_: u16::from_ne_bytes([field[0], field[1]]),
            code: u16::from_ne_bytes([field[2], field[3]]),
            value: i32::from_ne_bytes([field[4], field[5], field[6], field[7]]),
        }
    }

    /// Encode as a native record with a zero timestamp.
    pub fn to_bytes(&self) -> [u8; EVENT_SIZE] {
        let mut raw = [0u8; EVENT_SIZE];
        raw[STAMP_BYTES..STAMP_BYTES + 2].copy_from_slice(&self.type_.to_ne_bytes());
        raw[STAMP_BYTES + 2..STAMP_BYTES + 4].copy_from_slice(&self.code.to_ne_bytes());
        raw[STAMP_BYTES + 4..].copy_from_slice(&self.value.to_ne_bytes());
        raw
    }

    pub fn is_abs(&self, code: u16) -> bool {
        self.type_ == EV_ABS && self.code == code
    }
}
