//! Display controller register probing.

use ferrox_common::DisplayRegisters;
use ferrox_hal::PortIo;

/// CRTC index port.
const CRTC_INDEX: u16 = 0x3D4;
/// CRTC data port.
const CRTC_DATA: u16 = 0x3D5;
/// Misc output register read port.
const MISC_OUTPUT: u16 = 0x3CC;

/// CRTC horizontal total register index.
const REG_HORIZONTAL_TOTAL: u8 = 0x00;
/// CRTC vertical total register index.
const REG_VERTICAL_TOTAL: u8 = 0x06;

/// Bit 0 of misc output selects color addressing.
const MISC_COLOR: u8 = 0x01;

/// Reads one indexed CRTC register through the index/data port pair.
pub fn read_crtc(ports: &mut impl PortIo, index: u8) -> u8 {
    ports.write(CRTC_INDEX, index);
    ports.read(CRTC_DATA)
}

/// Reads the timing totals and derives the color/monochrome mode flag.
///
/// Raw register values, no validation beyond the read itself.
pub fn registers(ports: &mut impl PortIo) -> DisplayRegisters {
    let horizontal_total = read_crtc(ports, REG_HORIZONTAL_TOTAL);
    let vertical_total = read_crtc(ports, REG_VERTICAL_TOTAL);
    let misc_output = ports.read(MISC_OUTPUT);

    DisplayRegisters {
        horizontal_total,
        vertical_total,
        misc_output,
        color: misc_output & MISC_COLOR != 0,
    }
}
