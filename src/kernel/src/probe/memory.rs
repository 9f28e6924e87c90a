//! Installed memory extent probing.

use ferrox_hal::MemoryCells;

/// Pattern written to the first word of each megabyte boundary under test.
pub const TEST_PATTERN: u32 = 0xAA55_AA55;

/// One megabyte.
const MEGABYTE: u64 = 0x10_0000;

/// Upper bound of the scan, in megabyte indexes.
const SCAN_LIMIT_MB: u32 = 256;

/// Scans upward from the 2 MB boundary and reports installed memory in MB.
///
/// Each step writes the test pattern to the boundary word, waits for the
/// write to settle, verifies the read-back, and restores the original word.
/// The restore happens on every step, including the one that fails
/// verification, so memory contents survive the scan either way. The scan
/// stops at the first boundary that fails, or at the upper bound.
///
/// # Precondition
///
/// Nothing else may access the scanned words while the probe runs. The
/// restore keeps contents intact, but the scan itself is not
/// concurrency-safe and must stay on the single session loop.
pub fn extent_mb(memory: &mut impl MemoryCells) -> u32 {
    let mut mb = 1;
    while mb < SCAN_LIMIT_MB {
        let addr = MEGABYTE + mb as u64 * MEGABYTE;
        let original = memory.read_word(addr);

        memory.write_word(addr, TEST_PATTERN);
        settle();
        let verified = memory.read_word(addr) == TEST_PATTERN;
        memory.write_word(addr, original);

        if !verified {
            break;
        }
        mb += 1;
    }
    mb
}

/// Settling delay between the test write and the read-back.
fn settle() {
    for _ in 0..100 {
        core::hint::spin_loop();
    }
}
