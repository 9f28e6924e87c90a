//! Real-time clock reading and uptime derivation.

use ferrox_common::{ClockTime, Uptime};
use ferrox_hal::PortIo;

/// CMOS index port.
const CMOS_INDEX: u16 = 0x70;
/// CMOS data port.
const CMOS_DATA: u16 = 0x71;

/// Seconds register.
const REG_SECONDS: u8 = 0x00;
/// Minutes register.
const REG_MINUTES: u8 = 0x02;
/// Hours register.
const REG_HOURS: u8 = 0x04;
/// Status register A; bit 7 is the update-in-progress flag.
const REG_STATUS_A: u8 = 0x0A;
/// Status register B; bit 2 set means the time registers are binary.
const REG_STATUS_B: u8 = 0x0B;

const UPDATE_IN_PROGRESS: u8 = 0x80;
const BINARY_MODE: u8 = 0x04;

/// Seconds in a day, for the midnight wraparound.
const SECONDS_PER_DAY: i32 = 86_400;

/// Reads one CMOS register through the index/data pair.
pub fn read_register(ports: &mut impl PortIo, reg: u8) -> u8 {
    ports.write(CMOS_INDEX, reg);
    ports.read(CMOS_DATA)
}

/// Converts a binary-coded-decimal byte to binary.
pub fn bcd_to_binary(value: u8) -> u8 {
    (value >> 4) * 10 + (value & 0x0F)
}

/// Reads the current time of day, normalized to binary.
///
/// Spins while the clock reports an update in progress. The wait has no
/// timeout: if the hardware never clears the flag this never returns. That
/// is the clock's documented contract, not a condition handled here.
pub fn read_time(ports: &mut impl PortIo) -> ClockTime {
    while read_register(ports, REG_STATUS_A) & UPDATE_IN_PROGRESS != 0 {}

    let mut second = read_register(ports, REG_SECONDS);
    let mut minute = read_register(ports, REG_MINUTES);
    let mut hour = read_register(ports, REG_HOURS);

    if read_register(ports, REG_STATUS_B) & BINARY_MODE == 0 {
        second = bcd_to_binary(second);
        minute = bcd_to_binary(minute);
        hour = bcd_to_binary(hour);
    }

    ClockTime { hour, minute, second }
}

/// Elapsed time between the boot snapshot and a current reading.
///
/// A negative difference means the clock rolled past midnight since boot;
/// one day is added before splitting into hours, minutes and seconds.
pub fn uptime(boot: ClockTime, now: ClockTime) -> Uptime {
    let mut elapsed = now.as_seconds() - boot.as_seconds();
    if elapsed < 0 {
        elapsed += SECONDS_PER_DAY;
    }
    let elapsed = elapsed as u32;

    Uptime {
        hours: elapsed / 3600,
        minutes: elapsed % 3600 / 60,
        seconds: elapsed % 60,
    }
}
