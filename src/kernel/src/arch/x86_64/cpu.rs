//! CPU identification primitive for x86_64.

use core::arch::asm;
use core::arch::x86_64::__cpuid_count;
use ferrox_hal::{CpuLeaves, LeafRegisters};

/// RFLAGS bit toggled by the availability test.
const RFLAGS_ID: u64 = 1 << 21;

/// The CPUID instruction as a leaf source.
#[derive(Debug, Default)]
pub struct Cpuid;

impl Cpuid {
    /// Creates the leaf source handle.
    pub const fn new() -> Self {
        Cpuid
    }
}

impl CpuLeaves for Cpuid {
    /// Tests whether the ID bit in RFLAGS can be flipped.
    ///
    /// The bit is only writable on processors that implement CPUID; the
    /// original flag state is restored before returning.
    fn supported(&mut self) -> bool {
        let original: u64;
        let toggled: u64;
        // SAFETY: Pure register manipulation. RFLAGS is saved first and
        // restored at the end, so no flag state leaks out of the test.
        unsafe {
            asm!(
                "pushfq",
                "pop {orig}",
                "mov {tog}, {orig}",
                "xor {tog}, 0x200000",
                "push {tog}",
                "popfq",
                "pushfq",
                "pop {tog}",
                "push {orig}",
                "popfq",
                orig = out(reg) original,
                tog = out(reg) toggled,
            );
        }
        (original ^ toggled) & RFLAGS_ID != 0
    }

    fn query(&mut self, leaf: u32) -> LeafRegisters {
        // SAFETY: Callers gate on `supported()` before querying leaves, and
        // CPUID with an out-of-range leaf returns defined (zero or highest
        // basic leaf) values rather than faulting.
        let regs = unsafe { __cpuid_count(leaf, 0) };
        LeafRegisters {
            eax: regs.eax,
            ebx: regs.ebx,
            ecx: regs.ecx,
            edx: regs.edx,
        }
    }
}
