//! Architecture-specific implementations.
//!
//! Everything that touches real hardware lives under here. Only x86_64 is
//! supported at the moment.

#[cfg(target_arch = "x86_64")]
pub mod x86_64;

#[cfg(target_arch = "x86_64")]
pub use x86_64::*;
