//! Raw I/O port access for x86_64.

use ferrox_hal::PortIo;
use x86_64::instructions::port::Port;

/// The machine's I/O port space.
///
/// Zero-sized handle implementing the byte-granular port primitive over the
/// real `in`/`out` instructions.
#[derive(Debug, Default)]
pub struct PortSpace;

impl PortSpace {
    /// Creates the port space handle.
    pub const fn new() -> Self {
        PortSpace
    }
}

impl PortIo for PortSpace {
    fn read(&mut self, port: u16) -> u8 {
        // SAFETY: Reading a byte from an I/O port does not corrupt memory.
        // The probe routines only address well-defined controller ports.
        unsafe { Port::<u8>::new(port).read() }
    }

    fn write(&mut self, port: u16, value: u8) {
        // SAFETY: The probe routines only write index/address bytes to
        // well-defined controller ports; none of those writes can violate
        // memory safety.
        unsafe { Port::<u8>::new(port).write(value) }
    }
}
