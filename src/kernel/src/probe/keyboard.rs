//! Keyboard controller status and scancode polling.

use ferrox_common::KbdStatus;
use ferrox_hal::PortIo;

/// Keyboard controller data port.
const DATA_PORT: u16 = 0x60;
/// Keyboard controller status port.
const STATUS_PORT: u16 = 0x64;

/// Reads the raw controller status byte.
pub fn status(ports: &mut impl PortIo) -> u8 {
    ports.read(STATUS_PORT)
}

/// Decodes a status byte into its flag set.
pub fn decode_status(status: u8) -> KbdStatus {
    KbdStatus::from_bits_truncate(status)
}

/// Polls for a pending scancode.
///
/// Returns the data byte when the output-buffer-full flag is set, `None`
/// otherwise. Never blocks; the session loop calls this every iteration.
pub fn poll_scancode(ports: &mut impl PortIo) -> Option<u8> {
    if status(ports) & KbdStatus::OBF.bits() != 0 {
        Some(ports.read(DATA_PORT))
    } else {
        None
    }
}
