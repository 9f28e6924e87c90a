//! Hardware probe library.
//!
//! Independent probes over the machine's introspectable state: CPU identity
//! and features, installed memory extent, display controller registers,
//! keyboard controller status, real-time clock, and bus device enumeration.
//!
//! Every probe is a plain function generic over the HAL traits, so the
//! command handlers that call them run unchanged against simulated hardware.

pub mod bus;
pub mod clock;
pub mod cpu;
pub mod display;
pub mod keyboard;
pub mod memory;

use ferrox_hal::{CpuLeaves, MemoryCells, PortIo};

/// The bundle of hardware capabilities one session probes through.
///
/// The polling loop owns a single instance and hands it to the shell by
/// reference; tests build one out of simulated parts.
pub struct Machine<P, C, M> {
    /// Byte-granular port I/O.
    pub ports: P,
    /// CPU identification leaves.
    pub cpu: C,
    /// Physical memory words.
    pub memory: M,
}

impl<P: PortIo, C: CpuLeaves, M: MemoryCells> Machine<P, C, M> {
    /// Bundles the three capabilities.
    pub fn new(ports: P, cpu: C, memory: M) -> Self {
        Machine { ports, cpu, memory }
    }
}
