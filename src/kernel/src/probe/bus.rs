//! Bus configuration space enumeration.
//!
//! Uses the legacy configuration mechanism: a 32-bit address composed from
//! bus/device/function/offset goes out through the address port, then the
//! identification word comes back through the data port. Both transfers are
//! byte-sequenced, least significant byte first.

use alloc::vec::Vec;
use ferrox_common::DeviceRecord;
use ferrox_hal::PortIo;

/// Configuration address port base (four sequential byte ports).
const CONFIG_ADDRESS: u16 = 0x0CF8;
/// Configuration data port base (four sequential byte ports).
const CONFIG_DATA: u16 = 0x0CFC;

/// Enable bit in the configuration address.
const ENABLE: u32 = 0x8000_0000;

/// Identification word read from an empty slot.
const NO_DEVICE: u32 = 0xFFFF_FFFF;

/// Buses covered by the scan.
const BUS_RANGE: u8 = 2;
/// Device slots per bus.
const DEVICES_PER_BUS: u8 = 32;

/// Builds the configuration address for one register.
///
/// Bit 31: enable. Bits 23-16: bus. Bits 15-11: device. Bits 10-8:
/// function. Bits 7-0: register offset, masked to a 4-byte boundary.
pub fn config_address(bus: u8, device: u8, function: u8, offset: u8) -> u32 {
    ENABLE
        | (bus as u32) << 16
        | (device as u32) << 11
        | (function as u32) << 8
        | (offset & 0xFC) as u32
}

/// Reads one 32-bit configuration register.
pub fn read_config(
    ports: &mut impl PortIo,
    bus: u8,
    device: u8,
    function: u8,
    offset: u8,
) -> u32 {
    let address = config_address(bus, device, function, offset);
    for (i, byte) in address.to_le_bytes().iter().enumerate() {
        ports.write(CONFIG_ADDRESS + i as u16, *byte);
    }

    let mut word = [0u8; 4];
    for (i, byte) in word.iter_mut().enumerate() {
        *byte = ports.read(CONFIG_DATA + i as u16);
    }
    u32::from_le_bytes(word)
}

/// Scans function 0 of every device slot on the covered buses.
///
/// Slots whose identification word reads all-ones or all-zeroes are absent
/// and excluded from the result. Records keep scan order.
pub fn enumerate(ports: &mut impl PortIo) -> Vec<DeviceRecord> {
    let mut devices = Vec::new();
    for bus in 0..BUS_RANGE {
        for device in 0..DEVICES_PER_BUS {
            let word = read_config(ports, bus, device, 0, 0);
            if word != NO_DEVICE && word != 0 {
                devices.push(DeviceRecord {
                    bus,
                    device,
                    vendor_id: (word & 0xFFFF) as u16,
                    device_id: (word >> 16) as u16,
                });
            }
        }
    }
    devices
}
