//! Boot logging with colored status indicators.
//!
//! Provides Linux-style boot messages with colored status brackets. The
//! session owns the display writer, so every helper takes it by reference.

pub mod banner;

use crate::arch::x86_64::vga::{Color, Writer};
use core::fmt::Write as _;

/// Boot status indicators.
#[derive(Debug, Clone, Copy)]
pub enum Status {
    /// Success - `[ OK ]` in green
    Ok,
    /// Failure - `[FAIL]` in red
    Fail,
    /// Warning - `[WARN]` in yellow
    Warn,
    /// Informational - `[INFO]` in cyan
    Info,
}

/// Log a boot stage with status.
///
/// Format: `[ OK ] Message text`
pub fn log(con: &mut Writer, status: Status, message: &str) {
    print_status(con, status);
    let _ = writeln!(con, " {}", message);
}

/// Log an indented detail line (for sub-items).
///
/// Format: `       Detail text` (aligned with message after status)
pub fn log_detail(con: &mut Writer, message: &str) {
    let _ = writeln!(con, "       {}", message);
}

fn print_status(con: &mut Writer, status: Status) {
    let (text, color) = match status {
        Status::Ok => ("[ OK ]", Color::LightGreen),
        Status::Fail => ("[FAIL]", Color::LightRed),
        Status::Warn => ("[WARN]", Color::Yellow),
        Status::Info => ("[INFO]", Color::LightCyan),
    };
    con.set_color(color, Color::Black);
    let _ = con.write_str(text);
    con.set_color(Color::White, Color::Black);
}
