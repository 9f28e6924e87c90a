//! x86_64 architecture support.
//!
//! Provides the VGA text writer, serial output, and the real implementations
//! of the hardware primitives the probe library runs on.

pub mod cpu;
pub mod phys;
pub mod ports;
pub mod serial;
pub mod vga;

pub use cpu::Cpuid;
pub use phys::PhysWindow;
pub use ports::PortSpace;
pub use serial::SERIAL;
pub use vga::{Color, Writer};

/// Halts the CPU until the next interrupt.
///
/// Used in idle loops to reduce power consumption.
#[inline]
pub fn hlt() {
    x86_64::instructions::hlt();
}

/// Halts the CPU in an infinite loop.
///
/// Used after unrecoverable errors (panics).
pub fn halt_loop() -> ! {
    loop {
        hlt();
    }
}
