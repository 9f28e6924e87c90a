//! CPU identity and feature probing.

use ferrox_common::CpuIdentity;
use ferrox_hal::CpuLeaves;

/// Base leaf holding the vendor id.
const LEAF_VENDOR: u32 = 0;
/// Leaf holding the feature words.
const LEAF_FEATURES: u32 = 1;
/// Extended range root; its EAX reports the highest extended leaf.
const LEAF_EXTENDED_MAX: u32 = 0x8000_0000;
/// First of the three brand string leaves.
const LEAF_BRAND_BASE: u32 = 0x8000_0002;
/// Highest leaf the brand string needs.
const LEAF_BRAND_LAST: u32 = 0x8000_0004;

/// Feature names keyed by bit position in the leaf 1 EDX word.
pub const EDX_FEATURES: &[(u32, &str)] = &[
    (0, "FPU"),
    (4, "TSC"),
    (5, "MSR"),
    (23, "MMX"),
    (25, "SSE"),
    (26, "SSE2"),
];

/// Feature names keyed by bit position in the leaf 1 ECX word.
pub const ECX_FEATURES: &[(u32, &str)] = &[(0, "SSE3")];

/// Queries vendor id, brand string and feature words.
///
/// Returns `None` when the identification instruction is unavailable. The
/// brand string stays empty when the processor does not implement the
/// extended leaf range.
pub fn identify(cpu: &mut impl CpuLeaves) -> Option<CpuIdentity> {
    if !cpu.supported() {
        return None;
    }

    // Vendor id: three 4-byte register fragments, EBX then EDX then ECX.
    let base = cpu.query(LEAF_VENDOR);
    let mut vendor = [0u8; 12];
    vendor[0..4].copy_from_slice(&base.ebx.to_le_bytes());
    vendor[4..8].copy_from_slice(&base.edx.to_le_bytes());
    vendor[8..12].copy_from_slice(&base.ecx.to_le_bytes());

    // Brand string: 16 bytes per leaf, EAX/EBX/ECX/EDX in order.
    let mut brand = [0u8; 48];
    if cpu.query(LEAF_EXTENDED_MAX).eax >= LEAF_BRAND_LAST {
        for i in 0..3 {
            let leaf = cpu.query(LEAF_BRAND_BASE + i as u32);
            let chunk = &mut brand[i * 16..(i + 1) * 16];
            chunk[0..4].copy_from_slice(&leaf.eax.to_le_bytes());
            chunk[4..8].copy_from_slice(&leaf.ebx.to_le_bytes());
            chunk[8..12].copy_from_slice(&leaf.ecx.to_le_bytes());
            chunk[12..16].copy_from_slice(&leaf.edx.to_le_bytes());
        }
    }

    let features = cpu.query(LEAF_FEATURES);
    Some(CpuIdentity {
        vendor,
        brand,
        features_edx: features.edx,
        features_ecx: features.ecx,
    })
}
