//! The stroke value type: an immutable bitmask over a layout's key space.
//!
//! A [`Stroke`] is deliberately just the mask. Everything that needs the
//! layout (text rendering, key lookup, digit predicates) lives on
//! [`StrokeSystem`](crate::StrokeSystem), so the binding between a stroke
//! and the profile it is interpreted against stays explicit.

use std::cmp::Ordering;
use std::ops::{BitAnd, BitOr, Sub};

use crate::bits;

/// One chord of simultaneously pressed keys, as a bitmask.
///
/// Bit i is set exactly when the key at layout index i is part of the
/// chord. Strokes are immutable: every operation returns a new value. Two
/// strokes are equal iff their masks are equal, and equal strokes hash
/// identically, so strokes work as set and map keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Stroke(u64);

impl Stroke {
    /// The stroke with no keys pressed. Its canonical text is empty.
    pub const EMPTY: Self = Self(0);

    /// Wraps a raw mask. Callers must already know the mask fits the
    /// layout; [`StrokeSystem::stroke_from_bits`] is the validating entry
    /// point.
    ///
    /// [`StrokeSystem::stroke_from_bits`]: crate::StrokeSystem::stroke_from_bits
    pub(crate) const fn from_raw(mask: u64) -> Self {
        Self(mask)
    }

    /// The raw bitmask.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Whether no keys are pressed.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The number of pressed keys.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Keys pressed in either stroke.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Keys pressed in both strokes.
    #[must_use]
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Keys pressed in `self` but not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Whether every key of `other` is also pressed in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Index of the lowest (leftmost) pressed key, if any.
    #[must_use]
    pub const fn first_index(self) -> Option<u32> {
        bits::lsb_index(self.0)
    }

    /// Index of the highest (rightmost) pressed key, if any.
    #[must_use]
    pub const fn last_index(self) -> Option<u32> {
        bits::msb_index(self.0)
    }

    /// Whether every key of `self` sits strictly left of every key of
    /// `other`.
    ///
    /// `a.is_prefix_of(b) == b.is_suffix_of(a)`; the empty stroke is a
    /// prefix of any non-empty stroke, and nothing is a prefix of the
    /// empty stroke.
    #[must_use]
    pub const fn is_prefix_of(self, other: Self) -> bool {
        bits::msb_mask(self.0) < bits::lsb_mask(other.0)
    }

    /// Whether every key of `self` sits strictly right of every key of
    /// `other`.
    #[must_use]
    pub const fn is_suffix_of(self, other: Self) -> bool {
        bits::lsb_mask(self.0) > bits::msb_mask(other.0)
    }

    /// Iterates the pressed key indices in increasing (left-to-right)
    /// order.
    #[must_use]
    pub const fn iter_indices(self) -> Indices {
        Indices(self.0)
    }
}

/// Canonical left-to-right stroke order.
///
/// Compare only the disagreeing keys of the two masks, falling back to a
/// stroke's own full mask when it holds none of them; whichever selected
/// mask has its lowest bit at the smaller key index sorts first. The
/// fallback is what orders a stroke that is a strict subset of the other
/// by its own true leftmost key instead of by nothing.
impl Ord for Stroke {
    fn cmp(&self, other: &Self) -> Ordering {
        let disagree = self.0 ^ other.0;
        if disagree == 0 {
            return Ordering::Equal;
        }
        let own = match self.0 & disagree {
            0 => self.0,
            picked => picked,
        };
        let theirs = match other.0 & disagree {
            0 => other.0,
            picked => picked,
        };
        bits::lsb_mask(own).cmp(&bits::lsb_mask(theirs))
    }
}

impl PartialOrd for Stroke {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl BitOr for Stroke {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitAnd for Stroke {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersect(rhs)
    }
}

impl Sub for Stroke {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.difference(rhs)
    }
}

/// Iterator over the pressed key indices of a stroke, lowest bit first.
#[derive(Debug, Clone)]
pub struct Indices(u64);

impl Iterator for Indices {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let index = bits::lsb_index(self.0)?;
        self.0 &= self.0 - 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for Indices {}
