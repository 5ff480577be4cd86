//! Lazy enumeration of stroke intervals and suffix extensions.
//!
//! Both iterators step raw integer values, so every intermediate bit
//! pattern is a valid stroke of the configuration. They are `Clone`, so a
//! sequence can be restarted from a kept copy.

use crate::bits;
use crate::error::StrokeError;
use crate::stroke::Stroke;
use crate::system::{StrokeInput, StrokeSystem};

/// Iterator over every stroke in an integer interval, in increasing
/// order. Created by [`StrokeSystem::stroke_range`].
#[derive(Debug, Clone)]
pub struct StrokeRange {
    next: u64,
    last: u64,
    done: bool,
}

impl Iterator for StrokeRange {
    type Item = Stroke;

    fn next(&mut self) -> Option<Stroke> {
        if self.done {
            return None;
        }
        let value = self.next;
        if value == self.last {
            self.done = true;
        } else {
            self.next = value + 1;
        }
        Some(Stroke::from_raw(value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let count = usize::try_from(self.last - self.next)
            .ok()
            .and_then(|count| count.checked_add(1));
        (count.unwrap_or(usize::MAX), count)
    }
}

/// Iterator over the suffix extensions of a stroke, in increasing integer
/// order. Created by [`StrokeSystem::suffixes`].
#[derive(Debug, Clone)]
pub struct Suffixes {
    prefix: u64,
    shift: u32,
    next: u64,
    max: u64,
    stop: u64,
    done: bool,
}

impl Iterator for Suffixes {
    type Item = Stroke;

    fn next(&mut self) -> Option<Stroke> {
        if self.done || self.next > self.max {
            return None;
        }
        let value = self.prefix | (self.next << self.shift);
        self.next += 1;
        if value == self.stop {
            self.done = true;
        }
        Some(Stroke::from_raw(value))
    }
}

impl StrokeSystem {
    /// Enumerates every stroke in `[start, stop)` in increasing integer
    /// order; with `stop = None`, enumeration runs through the full key
    /// mask inclusive. An interval whose stop does not exceed its start is
    /// empty.
    ///
    /// Both bounds accept any [`StrokeInput`] shape and are validated
    /// against this configuration.
    pub fn stroke_range<'a>(
        &self,
        start: impl Into<StrokeInput<'a>>,
        stop: Option<StrokeInput<'a>>,
    ) -> Result<StrokeRange, StrokeError> {
        let start = self.stroke(start)?.raw();
        let (last, empty) = match stop {
            Some(stop) => {
                let stop = self.stroke(stop)?.raw();
                (stop.wrapping_sub(1), stop <= start)
            }
            None => (self.full_stroke().raw(), false),
        };
        Ok(StrokeRange {
            next: start,
            last,
            done: empty,
        })
    }

    /// Enumerates every stroke formed by adding a non-empty subset of the
    /// keys strictly to the right of `stroke`'s highest key, in
    /// increasing integer order. For the empty stroke that is every
    /// non-empty stroke of the layout.
    ///
    /// With a `stop`, enumeration ends (inclusive) once that stroke value
    /// is produced.
    pub fn suffixes<'a>(
        &self,
        stroke: impl Into<StrokeInput<'a>>,
        stop: Option<StrokeInput<'a>>,
    ) -> Result<Suffixes, StrokeError> {
        let prefix = self.stroke(stroke)?.raw();
        let shift = bits::msb_index(prefix).map_or(0, |index| index + 1);
        let count = self.key_count() as u32 - shift.min(self.key_count() as u32);
        let max = bits::low_bits(count);
        // With no key above the prefix, max is 0 and shift can reach 64;
        // checked_shl keeps the degenerate stop at the prefix itself.
        let stop = match stop {
            Some(stop) => self.stroke(stop)?.raw(),
            None => prefix | max.checked_shl(shift).unwrap_or(0),
        };
        Ok(Suffixes {
            prefix,
            shift,
            next: 1,
            max,
            stop,
            done: false,
        })
    }
}
