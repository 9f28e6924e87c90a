//! Boot banner and branding.

use crate::arch::x86_64::vga::{Color, Writer};
use core::fmt::Write as _;

/// Print the Ferrox boot banner.
pub fn print_banner(con: &mut Writer) {
    con.set_color(Color::Cyan, Color::Black);
    let _ = con.write_str("  _____                         \n");
    let _ = con.write_str(" |  ___|__ _ __ _ __ _____  __  \n");
    let _ = con.write_str(" | |_ / _ \\ '__| '__/ _ \\ \\/ /  \n");
    let _ = con.write_str(" |  _|  __/ |  | | | (_) >  <   \n");
    let _ = con.write_str(" |_|  \\___|_|  |_|  \\___/_/\\_\\  \n");
    let _ = con.write_str("\n");
    con.set_color(Color::White, Color::Black);
    let _ = con.write_str(" Ferrox v0.1.0\n\n");
}
