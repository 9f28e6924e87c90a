//! Simulated hardware.
//!
//! HAL implementations backed by plain data structures, so the probes and
//! the dispatcher run without any real port access. The port model covers
//! exactly the controllers the probes talk to; everything else reads as
//! zero and swallows writes.

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use ferrox_hal::{Console, CpuLeaves, LeafRegisters, MemoryCells, PortIo};

/// One megabyte, the memory probe's stride.
const MEGABYTE: u64 = 0x10_0000;

/// Simulated I/O port space.
///
/// Models the CMOS index/data pair, the keyboard controller, the CRTC
/// index/data pair, the misc output register, and the bus configuration
/// mechanism.
pub struct SimPorts {
    /// CMOS register file, addressed through the latched index.
    pub cmos: [u8; 128],
    /// Reads of status register A that still report update-in-progress
    /// before the flag clears.
    pub uip_reads: u8,
    /// Keyboard controller status byte (the output-buffer bit is derived
    /// from `scancode`).
    pub kbd_status: u8,
    /// Pending scancode, consumed by a data port read.
    pub scancode: Option<u8>,
    /// CRTC register file, addressed through the latched index.
    pub crtc: [u8; 25],
    /// Misc output register.
    pub misc_output: u8,
    /// Identification words keyed by (bus, device) at function 0; absent
    /// slots read all-ones.
    pub config_space: BTreeMap<(u8, u8), u32>,
    cmos_index: u8,
    crtc_index: u8,
    config_address: [u8; 4],
}

impl SimPorts {
    /// Creates a port space with an idle keyboard controller, a binary-mode
    /// clock, a color display, and an empty bus.
    pub fn new() -> Self {
        let mut cmos = [0u8; 128];
        cmos[0x0B] = 0x04; // binary mode unless a test says otherwise
        SimPorts {
            cmos,
            uip_reads: 0,
            kbd_status: 0x14,
            scancode: None,
            crtc: [0; 25],
            misc_output: 0x67,
            config_space: BTreeMap::new(),
            cmos_index: 0,
            crtc_index: 0,
            config_address: [0; 4],
        }
    }
}

impl Default for SimPorts {
    fn default() -> Self {
        Self::new()
    }
}

impl PortIo for SimPorts {
    fn read(&mut self, port: u16) -> u8 {
        match port {
            // Keyboard controller data: consumes the pending scancode.
            0x60 => self.scancode.take().unwrap_or(0),
            // Keyboard controller status.
            0x64 => {
                let mut status = self.kbd_status;
                if self.scancode.is_some() {
                    status |= 0x01;
                }
                status
            }
            // CMOS data for the latched register.
            0x71 => {
                let reg = (self.cmos_index & 0x7F) as usize;
                if reg == 0x0A && self.uip_reads > 0 {
                    self.uip_reads -= 1;
                    0x80
                } else {
                    self.cmos[reg]
                }
            }
            // Misc output.
            0x3CC => self.misc_output,
            // CRTC data for the latched register.
            0x3D5 => self.crtc.get(self.crtc_index as usize).copied().unwrap_or(0),
            // Configuration data: one byte of the addressed slot's word.
            0xCFC..=0xCFF => {
                let address = u32::from_le_bytes(self.config_address);
                let bus = (address >> 16) as u8;
                let device = ((address >> 11) & 0x1F) as u8;
                let function = ((address >> 8) & 0x07) as u8;
                let word = if function == 0 {
                    self.config_space
                        .get(&(bus, device))
                        .copied()
                        .unwrap_or(0xFFFF_FFFF)
                } else {
                    0xFFFF_FFFF
                };
                word.to_le_bytes()[(port - 0xCFC) as usize]
            }
            _ => 0,
        }
    }

    fn write(&mut self, port: u16, value: u8) {
        match port {
            0x70 => self.cmos_index = value,
            0x3D4 => self.crtc_index = value,
            0xCF8..=0xCFB => self.config_address[(port - 0xCF8) as usize] = value,
            _ => {}
        }
    }
}

/// Simulated CPU identification leaves.
pub struct SimCpu {
    /// Whether the identification instruction reports as available.
    pub supported: bool,
    /// Leaf table; missing leaves read as all-zero registers.
    pub leaves: BTreeMap<u32, LeafRegisters>,
}

impl SimCpu {
    /// Creates a supported CPU with no leaves populated.
    pub fn new() -> Self {
        SimCpu {
            supported: true,
            leaves: BTreeMap::new(),
        }
    }

    /// Canonical simulated processor: vendor `GenuineIntel`, a brand string,
    /// and the classic feature bits.
    pub fn genuine() -> Self {
        let mut cpu = SimCpu::new();
        cpu.leaves.insert(
            0,
            LeafRegisters {
                eax: 0x0D,
                ebx: u32::from_le_bytes(*b"Genu"),
                ecx: u32::from_le_bytes(*b"ntel"),
                edx: u32::from_le_bytes(*b"ineI"),
            },
        );
        // FPU, TSC, MSR, MMX, SSE, SSE2 in EDX; SSE3 in ECX.
        cpu.leaves.insert(
            1,
            LeafRegisters {
                edx: 1 | 1 << 4 | 1 << 5 | 1 << 23 | 1 << 25 | 1 << 26,
                ecx: 1,
                ..Default::default()
            },
        );
        cpu.set_brand("Ferrox Virtual CPU @ 1.00GHz");
        cpu
    }

    /// Populates the extended range with a brand string of at most 48 bytes.
    pub fn set_brand(&mut self, brand: &str) {
        let mut bytes = [0u8; 48];
        bytes[..brand.len()].copy_from_slice(brand.as_bytes());

        self.leaves.insert(
            0x8000_0000,
            LeafRegisters {
                eax: 0x8000_0004,
                ..Default::default()
            },
        );
        for i in 0..3 {
            let chunk = &bytes[i * 16..(i + 1) * 16];
            let word = |range: core::ops::Range<usize>| {
                u32::from_le_bytes(chunk[range].try_into().expect("4-byte fragment"))
            };
            self.leaves.insert(
                0x8000_0002 + i as u32,
                LeafRegisters {
                    eax: word(0..4),
                    ebx: word(4..8),
                    ecx: word(8..12),
                    edx: word(12..16),
                },
            );
        }
    }
}

impl Default for SimCpu {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuLeaves for SimCpu {
    fn supported(&mut self) -> bool {
        self.supported
    }

    fn query(&mut self, leaf: u32) -> LeafRegisters {
        self.leaves.get(&leaf).copied().unwrap_or_default()
    }
}

/// Simulated physical memory with a fixed installed extent.
///
/// Addresses past the installed extent behave like an open bus: reads
/// return all-ones and writes land nowhere.
pub struct SimMemory {
    installed_mb: u32,
    words: BTreeMap<u64, u32>,
}

impl SimMemory {
    /// Creates a memory of the given installed size; untouched words read
    /// as zero.
    pub fn new(installed_mb: u32) -> Self {
        SimMemory {
            installed_mb,
            words: BTreeMap::new(),
        }
    }

    /// Presets one word, for round-trip assertions.
    pub fn seed(&mut self, addr: u64, value: u32) {
        self.words.insert(addr, value);
    }

    /// The word currently observable at an address, without going through
    /// the mutable access path.
    pub fn word_at(&self, addr: u64) -> u32 {
        if addr >= self.installed_mb as u64 * MEGABYTE {
            0xFFFF_FFFF
        } else {
            self.words.get(&addr).copied().unwrap_or(0)
        }
    }
}

impl MemoryCells for SimMemory {
    fn read_word(&mut self, addr: u64) -> u32 {
        if addr >= self.installed_mb as u64 * MEGABYTE {
            0xFFFF_FFFF
        } else {
            self.words.get(&addr).copied().unwrap_or(0)
        }
    }

    fn write_word(&mut self, addr: u64, value: u32) {
        if addr < self.installed_mb as u64 * MEGABYTE {
            self.words.insert(addr, value);
        }
    }
}

/// Console that captures everything written to it.
pub struct SimConsole {
    /// Accumulated output.
    pub output: String,
    /// Number of screen clears.
    pub clears: usize,
    /// Number of erased cells.
    pub backspaces: usize,
}

impl SimConsole {
    /// Creates an empty capture console.
    pub fn new() -> Self {
        SimConsole {
            output: String::new(),
            clears: 0,
            backspaces: 0,
        }
    }
}

impl Default for SimConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for SimConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.output.push_str(s);
        Ok(())
    }
}

impl Console for SimConsole {
    fn clear(&mut self) {
        self.clears += 1;
        self.output.clear();
    }

    fn backspace(&mut self) {
        self.backspaces += 1;
        self.output.pop();
    }
}
