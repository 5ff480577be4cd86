//! Bit primitives for 64-bit key masks.
//!
//! The whole engine works on `u64` masks where bit i stands for the key at
//! layout index i. These helpers isolate the handful of single-bit
//! extractions the codec, comparator and enumerators are built on.

/// Returns the mask of the lowest set bit, or 0 for an empty mask.
#[must_use]
pub const fn lsb_mask(mask: u64) -> u64 {
    mask & mask.wrapping_neg()
}

/// Returns the mask of the highest set bit, or 0 for an empty mask.
#[must_use]
pub const fn msb_mask(mask: u64) -> u64 {
    if mask == 0 {
        0
    } else {
        1 << (63 - mask.leading_zeros())
    }
}

/// Returns the index of the lowest set bit, if any.
#[must_use]
pub const fn lsb_index(mask: u64) -> Option<u32> {
    if mask == 0 {
        None
    } else {
        Some(mask.trailing_zeros())
    }
}

/// Returns the index of the highest set bit, if any.
#[must_use]
pub const fn msb_index(mask: u64) -> Option<u32> {
    if mask == 0 {
        None
    } else {
        Some(63 - mask.leading_zeros())
    }
}

/// Returns the contiguous mask spanning from the lowest to the highest set
/// bit of `mask` (inclusive). 0 for an empty mask.
///
/// A mask is a contiguous block exactly when `span_mask(mask) == mask`.
#[must_use]
pub const fn span_mask(mask: u64) -> u64 {
    if mask == 0 {
        return 0;
    }
    // All bits <= msb, minus all bits < lsb.
    let high = (msb_mask(mask) << 1).wrapping_sub(1);
    let low = lsb_mask(mask) - 1;
    high & !low
}

/// Returns the mask of the `count` low bits, saturating at all 64.
#[must_use]
pub const fn low_bits(count: u32) -> u64 {
    if count >= 64 {
        u64::MAX
    } else {
        (1 << count) - 1
    }
}
