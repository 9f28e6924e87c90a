//! Shared types for the Ferrox kernel.
//!
//! Probe result values and the console error taxonomy live here so the
//! kernel's probe library, command handlers, and tests agree on one set of
//! typed results.

#![no_std]

pub mod error;
pub mod probe;

pub use error::ConsoleError;
pub use probe::{ClockTime, CpuIdentity, DeviceRecord, DisplayRegisters, KbdStatus, Uptime};
