//! Physical memory word access through the bootloader's offset mapping.

use core::ptr;
use ferrox_hal::MemoryCells;
use x86_64::VirtAddr;

/// Word-granular physical memory access.
///
/// The bootloader maps all physical memory at a fixed virtual offset
/// (`map_physical_memory`), so a physical address is reachable as
/// `offset + addr`. The memory probe is the only user.
#[derive(Debug)]
pub struct PhysWindow {
    offset: VirtAddr,
}

impl PhysWindow {
    /// Creates a window over the offset mapping reported by the bootloader.
    pub fn new(physical_memory_offset: VirtAddr) -> Self {
        PhysWindow {
            offset: physical_memory_offset,
        }
    }

    fn cell(&self, addr: u64) -> *mut u32 {
        (self.offset + addr).as_mut_ptr()
    }
}

impl MemoryCells for PhysWindow {
    fn read_word(&mut self, addr: u64) -> u32 {
        // SAFETY: The offset mapping covers the physical address space, and
        // the probe addresses megabyte-aligned words, so the access is
        // aligned and within the mapping. Volatile because the value must
        // come from memory, not a cached read.
        unsafe { ptr::read_volatile(self.cell(addr)) }
    }

    fn write_word(&mut self, addr: u64, value: u32) {
        // SAFETY: Same mapping argument as `read_word`. The memory probe
        // restores the original word after every test write, so no live data
        // is lost.
        unsafe { ptr::write_volatile(self.cell(addr), value) }
    }
}
