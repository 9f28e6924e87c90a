//! Typed results produced by the hardware probes.
//!
//! All of these are ephemeral values: a probe computes one on demand and the
//! invoking command handler discards it after formatting its report.

use bitflags::bitflags;
use core::fmt;

/// CPU identity as reported by the identification instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuIdentity {
    /// 12-byte vendor id assembled from the base leaf.
    pub vendor: [u8; 12],
    /// 48-byte brand string; all zeroes when the extended leaf range is
    /// unavailable.
    pub brand: [u8; 48],
    /// Feature bits from leaf 1, EDX.
    pub features_edx: u32,
    /// Feature bits from leaf 1, ECX.
    pub features_ecx: u32,
}

impl CpuIdentity {
    /// The vendor id as text.
    pub fn vendor_str(&self) -> &str {
        core::str::from_utf8(&self.vendor).unwrap_or("")
    }

    /// The brand string as text, cut at the first NUL byte.
    ///
    /// Empty when the processor does not implement the brand string leaves.
    pub fn brand_str(&self) -> &str {
        let end = self.brand.iter().position(|&b| b == 0).unwrap_or(self.brand.len());
        core::str::from_utf8(&self.brand[..end]).unwrap_or("")
    }
}

/// One reading of the real-time clock, already normalized to binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockTime {
    /// Hour, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Second, 0-59.
    pub second: u8,
}

impl ClockTime {
    /// Seconds since midnight.
    pub fn as_seconds(self) -> i32 {
        self.hour as i32 * 3600 + self.minute as i32 * 60 + self.second as i32
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Elapsed time since the boot snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uptime {
    /// Whole hours elapsed.
    pub hours: u32,
    /// Minutes past the hour.
    pub minutes: u32,
    /// Seconds past the minute.
    pub seconds: u32,
}

impl fmt::Display for Uptime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hours, {} minutes, {} seconds",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// Raw display controller state read from the CRTC and misc output ports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayRegisters {
    /// CRTC horizontal total register.
    pub horizontal_total: u8,
    /// CRTC vertical total register.
    pub vertical_total: u8,
    /// Misc output register, undecoded.
    pub misc_output: u8,
    /// Bit 0 of misc output: color (true) vs monochrome (false) addressing.
    pub color: bool,
}

/// One device discovered during bus enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceRecord {
    /// Bus number.
    pub bus: u8,
    /// Device number on the bus.
    pub device: u8,
    /// Vendor id, low 16 bits of the identification word.
    pub vendor_id: u16,
    /// Device id, high 16 bits of the identification word.
    pub device_id: u16,
}

bitflags! {
    /// Keyboard controller status flags, one per status register bit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KbdStatus: u8 {
        /// Output buffer full: a byte is waiting on the data port.
        const OBF     = 1 << 0;
        /// Input buffer full: the controller has not consumed the last write.
        const IBF     = 1 << 1;
        /// System flag, set after a successful self test.
        const SYS     = 1 << 2;
        /// Last write went to the command port rather than the data port.
        const CMD     = 1 << 3;
        /// Output buffer holds auxiliary (mouse) data.
        const AUXB    = 1 << 5;
        /// Transmission timeout.
        const TIMEOUT = 1 << 6;
        /// Parity error on the serial line.
        const PERR    = 1 << 7;
    }
}

impl KbdStatus {
    const TOKENS: [(KbdStatus, &'static str); 7] = [
        (KbdStatus::OBF, "OBF"),
        (KbdStatus::IBF, "IBF"),
        (KbdStatus::SYS, "SYS"),
        (KbdStatus::CMD, "CMD"),
        (KbdStatus::AUXB, "AUXB"),
        (KbdStatus::TIMEOUT, "TIMEOUT"),
        (KbdStatus::PERR, "PERR"),
    ];
}

impl fmt::Display for KbdStatus {
    /// Renders the set flags as space-separated tokens in bit order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (flag, name) in Self::TOKENS {
            if self.contains(flag) {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}
