//! Kernel-level self tests.
//!
//! Runs at boot against simulated hardware and reports over serial; any
//! failed assertion panics, which the boot path surfaces before halting.

use crate::probe::{self, Machine};
use crate::serial_println;
use crate::terminal::keyboard::{KeyDecoder, BACKSPACE_CHAR, SHIFTED, UNSHIFTED};
use crate::terminal::shell::{LineBuffer, Shell};
use crate::testutil::sim::{SimConsole, SimCpu, SimMemory, SimPorts};
use alloc::format;
use alloc::string::String;
use ferrox_common::ClockTime;
use ferrox_hal::LeafRegisters;

/// Runs all kernel tests.
pub fn run_all() {
    serial_println!("Running kernel tests...");

    test_decoder_tables();
    test_shift_modifier();
    test_line_buffer_bounds();
    test_line_overflow_and_edit();
    test_arithmetic_commands();
    test_echo_and_clear();
    test_unknown_command();
    test_config_address();
    test_bus_enumeration();
    test_memory_probe();
    test_clock_conversion();
    test_uptime();
    test_keyboard_status();
    test_cpu_identity();
    test_display_registers();

    serial_println!("All kernel tests passed!");
}

/// A machine assembled entirely from simulated parts.
fn sim_machine() -> Machine<SimPorts, SimCpu, SimMemory> {
    Machine::new(SimPorts::new(), SimCpu::genuine(), SimMemory::new(64))
}

/// Types one line into a fresh session and returns the captured output.
fn dispatch(line: &str) -> String {
    let mut machine = sim_machine();
    let mut con = SimConsole::new();
    let mut shell = Shell::new(ClockTime::default());
    for b in line.bytes() {
        shell.handle_char(b, &mut con, &mut machine);
    }
    shell.handle_char(b'\n', &mut con, &mut machine);
    con.output
}

fn test_decoder_tables() {
    serial_println!("test_decoder_tables... ");

    for (sc, &expected) in UNSHIFTED.iter().enumerate() {
        let mut keys = KeyDecoder::new();
        let decoded = keys.decode(sc as u8);
        if sc == 0x0E {
            assert_eq!(decoded, Some(BACKSPACE_CHAR));
        } else if expected != 0 {
            assert_eq!(decoded, Some(expected));
        } else if sc != 0x2A && sc != 0x36 {
            assert_eq!(decoded, None);
        }
    }

    for (sc, &expected) in SHIFTED.iter().enumerate() {
        let mut keys = KeyDecoder::new();
        assert_eq!(keys.decode(0x2A), None);
        let decoded = keys.decode(sc as u8);
        if sc == 0x0E {
            assert_eq!(decoded, Some(BACKSPACE_CHAR));
        } else if expected != 0 {
            assert_eq!(decoded, Some(expected));
        } else if sc != 0x2A && sc != 0x36 {
            assert_eq!(decoded, None);
        }
    }

    // Codes past the table range produce nothing.
    let mut keys = KeyDecoder::new();
    assert_eq!(keys.decode(0x3B), None);
    assert_eq!(keys.decode(0x7F), None);

    serial_println!("[ok]");
}

fn test_shift_modifier() {
    serial_println!("test_shift_modifier... ");

    let mut keys = KeyDecoder::new();
    assert!(!keys.shift_active());
    keys.decode(0x2A);
    assert!(keys.shift_active());
    keys.decode(0xAA);
    assert!(!keys.shift_active());
    keys.decode(0x36);
    assert!(keys.shift_active());
    keys.decode(0xB6);
    assert!(!keys.shift_active());

    // No other scancode touches the modifier, in either direction.
    keys.decode(0x10);
    keys.decode(0x90);
    keys.decode(0x0E);
    assert!(!keys.shift_active());
    keys.decode(0x2A);
    keys.decode(0x10);
    keys.decode(0x90);
    assert!(keys.shift_active());

    serial_println!("[ok]");
}

fn test_line_buffer_bounds() {
    serial_println!("test_line_buffer_bounds... ");

    let mut line = LineBuffer::new();
    for i in 0..79u8 {
        assert!(line.push(b'a' + i % 26));
    }
    assert_eq!(line.len(), 79);
    assert!(!line.push(b'x'));
    assert_eq!(line.len(), 79);

    assert!(line.pop());
    assert_eq!(line.len(), 78);
    line.clear();
    assert!(line.is_empty());
    assert!(!line.pop());

    serial_println!("[ok]");
}

fn test_line_overflow_and_edit() {
    serial_println!("test_line_overflow_and_edit... ");

    let mut machine = sim_machine();
    let mut con = SimConsole::new();
    let mut shell = Shell::new(ClockTime::default());

    // 79 characters fit; the 80th is dropped without echo.
    for _ in 0..79 {
        shell.handle_char(b'a', &mut con, &mut machine);
    }
    assert_eq!(shell.line().len(), 79);
    shell.handle_char(b'b', &mut con, &mut machine);
    assert_eq!(shell.line().len(), 79);
    assert!(!con.output.contains('b'));

    // The full 79-character line is dispatched and echoed back verbatim.
    shell.handle_char(b'\n', &mut con, &mut machine);
    assert!(con.output.contains(&"a".repeat(79)));
    assert_eq!(shell.line().len(), 0);

    // Backspace on an empty buffer never reaches the display.
    let erased_before = con.backspaces;
    shell.handle_char(BACKSPACE_CHAR, &mut con, &mut machine);
    assert_eq!(con.backspaces, erased_before);

    // Backspace mid-line edits the pending command.
    let mut con = SimConsole::new();
    for b in "addx".bytes() {
        shell.handle_char(b, &mut con, &mut machine);
    }
    shell.handle_char(BACKSPACE_CHAR, &mut con, &mut machine);
    for b in " 1 2".bytes() {
        shell.handle_char(b, &mut con, &mut machine);
    }
    shell.handle_char(b'\n', &mut con, &mut machine);
    assert!(con.output.contains("Sum: 3"));

    serial_println!("[ok]");
}

fn test_arithmetic_commands() {
    serial_println!("test_arithmetic_commands... ");

    assert!(dispatch("add 3 4").contains("Sum: 7"));
    assert!(dispatch("sub 10 4").contains("Difference: 6"));
    assert!(dispatch("mul 6 7").contains("Product: 42"));
    assert!(dispatch("div 10 5").contains("Quotient: 2"));

    let div0 = dispatch("div 10 0");
    assert!(div0.contains("Error: Division by zero!"));
    assert!(!div0.contains("Quotient"));

    // Malformed or missing arguments parse as zero, never reject.
    assert!(dispatch("add foo 9").contains("Sum: 9"));
    assert!(dispatch("mul 5").contains("Product: 0"));
    assert!(dispatch("sub  7  2").contains("Difference: 5"));
    assert!(dispatch("add -3 10").contains("Sum: 7"));

    serial_println!("[ok]");
}

fn test_echo_and_clear() {
    serial_println!("test_echo_and_clear... ");

    assert!(dispatch("echo hello world").contains("hello world"));

    let mut machine = sim_machine();
    let mut con = SimConsole::new();
    let mut shell = Shell::new(ClockTime::default());
    for b in "clear".bytes() {
        shell.handle_char(b, &mut con, &mut machine);
    }
    shell.handle_char(b'\n', &mut con, &mut machine);
    assert_eq!(con.clears, 1);

    serial_println!("[ok]");
}

fn test_unknown_command() {
    serial_println!("test_unknown_command... ");

    let out = dispatch("foo");
    assert!(out.contains("Unknown command: foo"));
    assert!(out.contains("'info'"));

    // An empty line just yields a fresh prompt.
    let out = dispatch("");
    assert!(!out.contains("Unknown command"));

    serial_println!("[ok]");
}

fn test_config_address() {
    serial_println!("test_config_address... ");

    assert_eq!(probe::bus::config_address(0, 0, 0, 0), 0x8000_0000);
    assert_eq!(probe::bus::config_address(1, 2, 0, 0x07), 0x8001_1004);
    assert_eq!(probe::bus::config_address(0, 31, 7, 0xFC), 0x8000_FFFC);

    serial_println!("[ok]");
}

fn test_bus_enumeration() {
    serial_println!("test_bus_enumeration... ");

    let mut ports = SimPorts::new();
    ports.config_space.insert((0, 2), 0x1234_8086);
    ports.config_space.insert((0, 3), 0); // reads all-zeroes: absent
    ports.config_space.insert((1, 5), 0x100E_8086);

    let devices = probe::bus::enumerate(&mut ports);
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].bus, 0);
    assert_eq!(devices[0].device, 2);
    assert_eq!(devices[0].vendor_id, 0x8086);
    assert_eq!(devices[0].device_id, 0x1234);
    assert_eq!(devices[1].bus, 1);
    assert_eq!(devices[1].device, 5);
    assert_eq!(devices[1].device_id, 0x100E);

    // An empty bus yields an empty sequence, never placeholders.
    let mut ports = SimPorts::new();
    assert!(probe::bus::enumerate(&mut ports).is_empty());

    serial_println!("[ok]");
}

fn test_memory_probe() {
    serial_println!("test_memory_probe... ");

    let boundaries: alloc::vec::Vec<u64> = (1..=64u64).map(|mb| mb * 0x10_0000).collect();

    let mut memory = SimMemory::new(64);
    memory.seed(0x20_0000, 0xDEAD_BEEF);
    memory.seed(0x30_0000, 0x1234_5678);
    let before: alloc::vec::Vec<u32> = boundaries.iter().map(|&a| memory.word_at(a)).collect();

    let extent = probe::memory::extent_mb(&mut memory);
    assert_eq!(extent, 63);
    // Every tested word is restored, on the success and failure paths alike.
    let after: alloc::vec::Vec<u32> = boundaries.iter().map(|&a| memory.word_at(a)).collect();
    assert_eq!(after, before);

    // A 2 MB machine fails at the very first boundary, contents intact.
    let mut memory = SimMemory::new(2);
    memory.seed(0x10_0000, 0xCAFE_F00D);
    assert_eq!(probe::memory::extent_mb(&mut memory), 1);
    assert_eq!(memory.word_at(0x10_0000), 0xCAFE_F00D);

    serial_println!("[ok]");
}

fn test_clock_conversion() {
    serial_println!("test_clock_conversion... ");

    assert_eq!(probe::clock::bcd_to_binary(0x00), 0);
    assert_eq!(probe::clock::bcd_to_binary(0x23), 23);
    assert_eq!(probe::clock::bcd_to_binary(0x59), 59);

    // BCD mode converts; the wait drains the update-in-progress flag first.
    let mut ports = SimPorts::new();
    ports.cmos[0x00] = 0x30;
    ports.cmos[0x02] = 0x45;
    ports.cmos[0x04] = 0x12;
    ports.cmos[0x0B] = 0x00;
    ports.uip_reads = 3;
    let time = probe::clock::read_time(&mut ports);
    assert_eq!(
        time,
        ClockTime {
            hour: 12,
            minute: 45,
            second: 30
        }
    );

    // Binary mode passes values through untouched.
    let mut ports = SimPorts::new();
    ports.cmos[0x00] = 42;
    ports.cmos[0x02] = 7;
    ports.cmos[0x04] = 23;
    let time = probe::clock::read_time(&mut ports);
    assert_eq!(
        time,
        ClockTime {
            hour: 23,
            minute: 7,
            second: 42
        }
    );

    serial_println!("[ok]");
}

fn test_uptime() {
    serial_println!("test_uptime... ");

    // Midnight wraparound.
    let boot = ClockTime {
        hour: 23,
        minute: 59,
        second: 50,
    };
    let now = ClockTime {
        hour: 0,
        minute: 0,
        second: 10,
    };
    let up = probe::clock::uptime(boot, now);
    assert_eq!((up.hours, up.minutes, up.seconds), (0, 0, 20));

    // Plain forward difference.
    let boot = ClockTime {
        hour: 1,
        minute: 0,
        second: 0,
    };
    let now = ClockTime {
        hour: 3,
        minute: 30,
        second: 5,
    };
    let up = probe::clock::uptime(boot, now);
    assert_eq!((up.hours, up.minutes, up.seconds), (2, 30, 5));

    serial_println!("[ok]");
}

fn test_keyboard_status() {
    serial_println!("test_keyboard_status... ");

    assert_eq!(
        format!("{}", probe::keyboard::decode_status(0xE1)),
        "OBF AUXB TIMEOUT PERR"
    );
    assert_eq!(
        format!("{}", probe::keyboard::decode_status(0x1F)),
        "OBF IBF SYS CMD"
    );
    assert_eq!(format!("{}", probe::keyboard::decode_status(0x00)), "");

    // Polling: nothing pending reads as no scancode; a pending byte is
    // consumed exactly once.
    let mut ports = SimPorts::new();
    assert_eq!(probe::keyboard::poll_scancode(&mut ports), None);
    ports.scancode = Some(0x1E);
    assert_eq!(probe::keyboard::poll_scancode(&mut ports), Some(0x1E));
    assert_eq!(probe::keyboard::poll_scancode(&mut ports), None);

    serial_println!("[ok]");
}

fn test_cpu_identity() {
    serial_println!("test_cpu_identity... ");

    let mut cpu = SimCpu::genuine();
    let identity = probe::cpu::identify(&mut cpu).expect("identification available");
    assert_eq!(identity.vendor_str(), "GenuineIntel");
    assert_eq!(identity.brand_str(), "Ferrox Virtual CPU @ 1.00GHz");
    assert_ne!(identity.features_edx & 1, 0);
    assert_ne!(identity.features_ecx & 1, 0);

    // Unsupported identification degrades to no identity at all.
    let mut cpu = SimCpu::genuine();
    cpu.supported = false;
    assert!(probe::cpu::identify(&mut cpu).is_none());

    // Without the extended range the brand string stays empty.
    let mut cpu = SimCpu::genuine();
    cpu.leaves.insert(
        0x8000_0000,
        LeafRegisters {
            eax: 0x8000_0001,
            ..Default::default()
        },
    );
    let identity = probe::cpu::identify(&mut cpu).expect("identification available");
    assert!(identity.brand_str().is_empty());

    serial_println!("[ok]");
}

fn test_display_registers() {
    serial_println!("test_display_registers... ");

    let mut ports = SimPorts::new();
    ports.crtc[0x00] = 0x5F;
    ports.crtc[0x06] = 0x0D;
    ports.misc_output = 0x67;
    let regs = probe::display::registers(&mut ports);
    assert_eq!(regs.horizontal_total, 0x5F);
    assert_eq!(regs.vertical_total, 0x0D);
    assert_eq!(regs.misc_output, 0x67);
    assert!(regs.color);

    let mut ports = SimPorts::new();
    ports.misc_output = 0x66;
    assert!(!probe::display::registers(&mut ports).color);

    serial_println!("[ok]");
}
