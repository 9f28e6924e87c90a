//! Terminal subsystem for Ferrox.
//!
//! Everything between a raw scancode and a rendered command report.
//!
//! # Architecture
//!
//! - `keyboard`: scancode decoder with the shift modifier state
//! - `shell`: bounded line buffer, echo, dispatch
//! - `commands`: command vocabulary and report handlers

pub mod commands;
pub mod keyboard;
pub mod shell;

pub use commands::Command;
pub use keyboard::KeyDecoder;
pub use shell::{LineBuffer, Shell};
