//! Ferrox Kernel
//!
//! An interactive bare-metal console over live hardware probes: type a
//! command, get CPU, memory, display, keyboard, clock, or bus state straight
//! from the hardware.
//!
//! # Architecture
//!
//! The kernel is structured into the following modules:
//! - `arch`: platform drivers and the real hardware primitive implementations
//! - `probe`: hardware introspection routines, generic over the HAL traits
//! - `terminal`: scancode decoding, line editing, command dispatch
//! - `boot`: boot banner and status log
//!
//! # Safety
//!
//! This is a `#![no_std]` kernel. All unsafe code is documented with safety
//! invariants explaining why the usage is correct.

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(target_arch = "x86_64")]
pub mod allocator;
pub mod arch;
pub mod boot;
pub mod logger;
#[cfg(target_arch = "x86_64")]
pub mod memory;
pub mod probe;
pub mod terminal;
pub mod tests;
pub mod testutil;

/// Initializes core kernel subsystems.
///
/// Called early in the boot process to set up essential services.
pub fn init() {
    #[cfg(target_arch = "x86_64")]
    {
        arch::x86_64::serial::init();
        logger::init();
    }
}
