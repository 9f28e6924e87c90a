//! Built-in console commands.
//!
//! The vocabulary splits into bare commands matched exactly and prefixed
//! commands that carry raw argument text. Handlers run the probes and format
//! their results into fixed report templates.

use crate::probe::{self, Machine};
use alloc::string::{String, ToString};
use core::fmt::Write as _;
use ferrox_common::{ClockTime, ConsoleError};
use ferrox_hal::{Console, CpuLeaves, MemoryCells, PortIo};

/// Arithmetic operation selector for the calculator commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathOp {
    /// `add`
    Add,
    /// `sub`
    Sub,
    /// `mul`
    Mul,
    /// `div`
    Div,
}

/// Console command types.
#[derive(Debug, Clone)]
pub enum Command {
    /// Clear the screen.
    Clear,
    /// Echo text back to the console.
    Echo {
        /// The raw text after the command word.
        text: String,
    },
    /// Arithmetic on two integers.
    Math {
        /// Which operation to perform.
        op: MathOp,
        /// Left operand.
        lhs: i32,
        /// Right operand.
        rhs: i32,
    },
    /// Show the command catalog.
    Info,
    /// CPU identity and features.
    CpuInfo,
    /// Memory map summary.
    MemInfo,
    /// Memory statistics.
    MemStat,
    /// Keyboard controller status.
    KbdStat,
    /// Display controller registers.
    VgaInfo,
    /// Enumerate bus devices.
    DevList,
    /// Time since boot.
    Uptime,
    /// System overview.
    SysInfo,
    /// Fixed I/O port map.
    PortList,
    /// Input that matched nothing.
    Unknown(String),
}

/// Prefixed commands and their operations, tried in order after the exact
/// matches fail.
const MATH_PREFIXES: [(&str, MathOp); 4] = [
    ("add ", MathOp::Add),
    ("sub ", MathOp::Sub),
    ("mul ", MathOp::Mul),
    ("div ", MathOp::Div),
];

impl Command {
    /// Parses one submitted line.
    ///
    /// Exact matches first, then the prefixed commands; an empty line parses
    /// to nothing. Anything left over is reported as unknown, carrying the
    /// literal input text.
    pub fn parse(line: &str) -> Option<Command> {
        match line {
            "" => return None,
            "clear" => return Some(Command::Clear),
            "info" => return Some(Command::Info),
            "cpuinfo" => return Some(Command::CpuInfo),
            "meminfo" => return Some(Command::MemInfo),
            "memstat" => return Some(Command::MemStat),
            "kbdstat" => return Some(Command::KbdStat),
            "vgainfo" => return Some(Command::VgaInfo),
            "devlist" => return Some(Command::DevList),
            "uptime" => return Some(Command::Uptime),
            "sysinfo" => return Some(Command::SysInfo),
            "portlist" => return Some(Command::PortList),
            _ => {}
        }

        if let Some(text) = line.strip_prefix("echo ") {
            return Some(Command::Echo {
                text: text.to_string(),
            });
        }
        for (prefix, op) in MATH_PREFIXES {
            if let Some(args) = line.strip_prefix(prefix) {
                let (lhs, rhs) = parse_two_numbers(args);
                return Some(Command::Math { op, lhs, rhs });
            }
        }

        Some(Command::Unknown(line.to_string()))
    }

    /// Executes the command, writing its report to the console.
    pub fn execute<W, P, C, M>(
        self,
        con: &mut W,
        machine: &mut Machine<P, C, M>,
        boot_time: ClockTime,
    ) where
        W: Console,
        P: PortIo,
        C: CpuLeaves,
        M: MemoryCells,
    {
        match self {
            Command::Clear => con.clear(),
            Command::Echo { text } => {
                let _ = writeln!(con, "{}", text);
            }
            Command::Math { op, lhs, rhs } => cmd_math(con, op, lhs, rhs),
            Command::Info => cmd_info(con),
            Command::CpuInfo => cmd_cpuinfo(con, &mut machine.cpu),
            Command::MemInfo => cmd_meminfo(con, &mut machine.memory),
            Command::MemStat => cmd_memstat(con, &mut machine.memory),
            Command::KbdStat => cmd_kbdstat(con, &mut machine.ports),
            Command::VgaInfo => cmd_vgainfo(con, &mut machine.ports),
            Command::DevList => cmd_devlist(con, &mut machine.ports),
            Command::Uptime => cmd_uptime(con, &mut machine.ports, boot_time),
            Command::SysInfo => cmd_sysinfo(con, machine),
            Command::PortList => cmd_portlist(con),
            Command::Unknown(text) => {
                let _ = writeln!(con, "{}: {}", ConsoleError::UnknownCommand, text);
                let _ = writeln!(con, "Type 'info' for available commands");
            }
        }
    }
}

/// Scans two whitespace-delimited integers from raw argument text.
///
/// Leading spaces are skipped before each number; each scan stops at the
/// next space or the end of the text. Missing or malformed numbers parse
/// as zero.
fn parse_two_numbers(args: &str) -> (i32, i32) {
    let rest = args.trim_start_matches(' ');
    let (lhs, rest) = scan_int(rest);
    let rest = rest.trim_start_matches(' ');
    let (rhs, _) = scan_int(rest);
    (lhs, rhs)
}

/// Splits off the token before the first space and parses it.
fn scan_int(text: &str) -> (i32, &str) {
    let end = text.find(' ').unwrap_or(text.len());
    let (token, rest) = text.split_at(end);
    (parse_int(token), rest)
}

/// Parses an optional minus sign followed by decimal digits; scanning stops
/// at the first non-digit, and no digits at all means zero.
fn parse_int(token: &str) -> i32 {
    let bytes = token.as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        _ => (false, bytes),
    };

    let mut value: i32 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.wrapping_mul(10).wrapping_add((b - b'0') as i32);
    }
    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

/// Performs one arithmetic command.
fn cmd_math(con: &mut impl Console, op: MathOp, lhs: i32, rhs: i32) {
    if op == MathOp::Div && rhs == 0 {
        let _ = writeln!(con, "{}", ConsoleError::DivisionByZero);
        return;
    }

    let (label, value) = match op {
        MathOp::Add => ("Sum", lhs.wrapping_add(rhs)),
        MathOp::Sub => ("Difference", lhs.wrapping_sub(rhs)),
        MathOp::Mul => ("Product", lhs.wrapping_mul(rhs)),
        MathOp::Div => ("Quotient", lhs.wrapping_div(rhs)),
    };
    let _ = writeln!(con, "{}: {}", label, value);
}

/// Shows the command catalog.
fn cmd_info(con: &mut impl Console) {
    let _ = writeln!(con, "=== Available Commands ===");
    let _ = writeln!(con);
    let _ = writeln!(con, "[Basic Commands]");
    let _ = writeln!(con, "clear - Clear the screen");
    let _ = writeln!(con, "echo - Display text");
    let _ = writeln!(con, "add - Add two numbers");
    let _ = writeln!(con, "sub - Subtract y from x");
    let _ = writeln!(con, "mul - Multiply two numbers");
    let _ = writeln!(con, "div - Divide x by y");
    let _ = writeln!(con);
    let _ = writeln!(con, "[System Monitoring]");
    let _ = writeln!(con, "sysinfo - System overview");
    let _ = writeln!(con, "uptime - System uptime");
    let _ = writeln!(con, "memstat - Memory statistics");
    let _ = writeln!(con);
    let _ = writeln!(con, "[Device Management]");
    let _ = writeln!(con, "kbdstat - Keyboard status");
    let _ = writeln!(con, "vgainfo - VGA information");
    let _ = writeln!(con, "devlist - List devices");
    let _ = writeln!(con);
    let _ = writeln!(con, "[Hardware Detection]");
    let _ = writeln!(con, "cpuinfo - CPU information");
    let _ = writeln!(con, "meminfo - Memory map");
    let _ = writeln!(con, "portlist - I/O port list");
}

/// Reports CPU identity and features.
fn cmd_cpuinfo(con: &mut impl Console, cpu: &mut impl CpuLeaves) {
    let identity = match probe::cpu::identify(cpu) {
        Some(identity) => identity,
        None => {
            let _ = writeln!(con, "{}", ConsoleError::UnsupportedFeature);
            return;
        }
    };

    let _ = writeln!(con, "=== CPU INFORMATION ===");
    let _ = writeln!(con, "Vendor: {}", identity.vendor_str());
    if !identity.brand_str().is_empty() {
        let _ = writeln!(con, "Brand: {}", identity.brand_str());
    }
    let _ = writeln!(con, "Features (EDX): 0x{:08X}", identity.features_edx);
    let _ = writeln!(con, "Features (ECX): 0x{:08X}", identity.features_ecx);

    let _ = con.write_str("\nSupported: ");
    for (bit, name) in probe::cpu::EDX_FEATURES {
        if identity.features_edx & (1 << bit) != 0 {
            let _ = write!(con, "{} ", name);
        }
    }
    for (bit, name) in probe::cpu::ECX_FEATURES {
        if identity.features_ecx & (1 << bit) != 0 {
            let _ = write!(con, "{} ", name);
        }
    }
    let _ = con.write_str("\n");
}

/// Reports the memory map summary.
fn cmd_meminfo(con: &mut impl Console, memory: &mut impl MemoryCells) {
    let _ = writeln!(con, "=== MEMORY INFORMATION ===");
    let total_mb = probe::memory::extent_mb(memory);
    let _ = writeln!(con, "Total RAM detected: {} MB", total_mb);
    let _ = writeln!(con, "Lower Memory: 640 KB (conventional)");
    let _ = writeln!(con, "Video Memory: 0xA0000-0xBFFFF (VGA)");
    let _ = writeln!(con, "Extended Memory: {} MB", total_mb - 1);
}

/// Reports memory statistics.
fn cmd_memstat(con: &mut impl Console, memory: &mut impl MemoryCells) {
    let _ = writeln!(con, "=== MEMORY STATISTICS ===");
    let total_kb = probe::memory::extent_mb(memory) * 1024;
    let _ = writeln!(con, "Total: {} KB", total_kb);
    let _ = writeln!(con, "Kernel: ~1 MB");
    let _ = writeln!(con, "Available: ~{} KB", total_kb - 1024);
}

/// Reports the keyboard controller status byte.
fn cmd_kbdstat(con: &mut impl Console, ports: &mut impl PortIo) {
    let raw = probe::keyboard::status(ports);
    let flags = probe::keyboard::decode_status(raw);

    let _ = writeln!(con, "=== KEYBOARD STATUS ===");
    let _ = writeln!(con, "Status Register: 0x{:02X}", raw);
    let _ = writeln!(con, "Flags: {}", flags);
    let _ = writeln!(con);
    let _ = writeln!(con, "Bit Details:");
    let obf = if raw & 0x01 != 0 { "Output buffer full" } else { "Empty" };
    let _ = writeln!(con, " Bit 0 (OBF): {}", obf);
    let ibf = if raw & 0x02 != 0 { "Input buffer full" } else { "Empty" };
    let _ = writeln!(con, " Bit 1 (IBF): {}", ibf);
    let sys = if raw & 0x04 != 0 { "System flag set" } else { "Clear" };
    let _ = writeln!(con, " Bit 2 (SYS): {}", sys);
}

/// Reports the display controller registers.
fn cmd_vgainfo(con: &mut impl Console, ports: &mut impl PortIo) {
    let regs = probe::display::registers(ports);

    let _ = writeln!(con, "=== VGA INFORMATION ===");
    let mode = if regs.color { "Color" } else { "Monochrome" };
    let _ = writeln!(con, "Mode: {}", mode);
    let _ = writeln!(con, "Text Mode: 80x25");
    let _ = writeln!(con, "Video Memory: 0xB8000");
    let _ = writeln!(con);
    let _ = writeln!(con, "CRTC Registers:");
    let _ = writeln!(con, " Horizontal Total: {}", regs.horizontal_total);
    let _ = writeln!(con, " Vertical Total: {}", regs.vertical_total);
    let _ = writeln!(con);
    let _ = writeln!(con, "Misc Output: 0x{:02X}", regs.misc_output);
}

/// Lists standard devices and enumerates the bus.
fn cmd_devlist(con: &mut impl Console, ports: &mut impl PortIo) {
    let _ = writeln!(con, "=== DETECTED DEVICES ===");
    let _ = writeln!(con);
    let _ = writeln!(con, "[Standard Devices]");
    let _ = writeln!(con, " - PIC (8259): IRQ Controller");
    let _ = writeln!(con, " - PIT (8253): Timer");
    let _ = writeln!(con, " - Keyboard Controller (8042)");
    let _ = writeln!(con, " - VGA Controller");
    let _ = writeln!(con, " - RTC/CMOS");
    let _ = writeln!(con);
    let _ = writeln!(con, "[PCI Devices]");
    let _ = writeln!(con, "Scanning PCI bus...");

    let devices = probe::bus::enumerate(ports);
    log::info!("bus scan found {} device(s)", devices.len());
    for dev in &devices {
        let _ = writeln!(
            con,
            " Bus {}, Device {}: VID=0x{:04X}, DID=0x{:04X}",
            dev.bus, dev.device, dev.vendor_id, dev.device_id
        );
    }
    if devices.is_empty() {
        let _ = writeln!(con, " No PCI devices detected");
    }
}

/// Reports the current clock reading and time since boot.
fn cmd_uptime(con: &mut impl Console, ports: &mut impl PortIo, boot_time: ClockTime) {
    let now = probe::clock::read_time(ports);

    let _ = writeln!(con, "=== SYSTEM UPTIME ===");
    let _ = writeln!(con, "Current RTC Time: {}", now);
    let _ = writeln!(con, "System Uptime: {}", probe::clock::uptime(boot_time, now));
}

/// Reports the one-screen system overview.
fn cmd_sysinfo<W, P, C, M>(con: &mut W, machine: &mut Machine<P, C, M>)
where
    W: Console,
    P: PortIo,
    C: CpuLeaves,
    M: MemoryCells,
{
    let _ = writeln!(con, "=== SYSTEM INFORMATION ===");
    let _ = writeln!(con);
    let _ = writeln!(con, "OS: Ferrox");
    let _ = writeln!(con, "Architecture: x86_64");

    if let Some(identity) = probe::cpu::identify(&mut machine.cpu) {
        let _ = writeln!(con, "CPU: {}", identity.vendor_str());
    }

    let _ = writeln!(con, "RAM: {} MB", probe::memory::extent_mb(&mut machine.memory));
    let _ = writeln!(con, "Time: {}", probe::clock::read_time(&mut machine.ports));
}

/// Shows the fixed I/O port map.
fn cmd_portlist(con: &mut impl Console) {
    let _ = writeln!(con, "=== I/O PORT MAP ===");
    let _ = writeln!(con);
    let _ = writeln!(con, "[DMA Controller]");
    let _ = writeln!(con, " 0x00-0x0F: DMA channels 0-3");
    let _ = writeln!(con, " 0xC0-0xDF: DMA channels 4-7");
    let _ = writeln!(con);
    let _ = writeln!(con, "[Interrupt Controllers]");
    let _ = writeln!(con, " 0x20-0x21: Master PIC (8259)");
    let _ = writeln!(con, " 0xA0-0xA1: Slave PIC (8259)");
    let _ = writeln!(con);
    let _ = writeln!(con, "[Timer]");
    let _ = writeln!(con, " 0x40-0x43: PIT (8253)");
    let _ = writeln!(con);
    let _ = writeln!(con, "[Keyboard]");
    let _ = writeln!(con, " 0x60: Data port");
    let _ = writeln!(con, " 0x64: Command/Status port");
    let _ = writeln!(con);
    let _ = writeln!(con, "[RTC/CMOS]");
    let _ = writeln!(con, " 0x70: Index register");
    let _ = writeln!(con, " 0x71: Data register");
    let _ = writeln!(con);
    let _ = writeln!(con, "[VGA]");
    let _ = writeln!(con, " 0x3C0-0x3CF: VGA registers");
    let _ = writeln!(con, " 0x3D4-0x3D5: CRT controller");
    let _ = writeln!(con);
    let _ = writeln!(con, "[PCI]");
    let _ = writeln!(con, " 0xCF8: Config address");
    let _ = writeln!(con, " 0xCFC: Config data");
}
