use alloc::vec::Vec;

use thiserror::Error;

use crate::error::DecompressionError;

/// A back-reference reached further back than the window holds.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("distance {distance} outside window of {capacity} bytes")]
pub struct DistanceOutOfRange {
    pub distance: usize,
    pub capacity: usize,
}

/// Fixed-capacity ring of the most recently produced output bytes.
///
/// Every byte the decoder emits goes through [`Window::write_byte`], so a
/// back-reference can overlap the bytes it is producing and a match may be
/// longer than the window itself.
///
/// The backing storage starts zeroed. Reading further back than the number of
/// bytes written so far yields those zeroes instead of failing; this only
/// happens with malformed input.
#[derive(Debug, Clone)]
pub struct Window {
    buf: Vec<u8>,
    pos: usize,
    filled: usize,
}

impl Window {
    /// Creates a window able to resolve distances `1..=max_displacement + 1`.
    ///
    /// Fails with [`DecompressionError::InvalidWindowSize`] when the capacity
    /// overflows or cannot be allocated.
    pub fn new(max_displacement: usize) -> Result<Self, DecompressionError> {
        let invalid = DecompressionError::InvalidWindowSize { max_displacement };
        let capacity = max_displacement.checked_add(1).ok_or(invalid.clone())?;

        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity).map_err(|_| invalid)?;
        buf.resize(capacity, 0);

        Ok(Self {
            buf,
            pos: 0,
            filled: 0,
        })
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of bytes currently recoverable, `min(written, capacity)`.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.filled
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.filled == 0
    }

    #[inline]
    pub fn write_byte(&mut self, value: u8) {
        self.buf[self.pos] = value;
        self.pos += 1;
        if self.pos == self.buf.len() {
            self.pos = 0;
        }
        if self.filled < self.buf.len() {
            self.filled += 1;
        }
    }

    /// Returns the byte written `distance` positions ago (`1` is the last byte).
    #[must_use]
    pub fn get(&self, distance: usize) -> Option<u8> {
        if distance == 0 || distance > self.filled {
            return None;
        }
        Some(self.buf[self.index_behind(distance)])
    }

    /// Maps an encoded displacement to a copy distance. Zero selects the full window.
    #[must_use]
    pub fn resolve_distance(&self, displacement: usize) -> usize {
        if displacement == 0 {
            self.capacity()
        } else {
            displacement
        }
    }

    /// Copies `length` bytes starting `displacement` bytes behind the write cursor,
    /// appending each one to `sink` and feeding it back into the window.
    pub fn copy_backreference(
        &mut self,
        displacement: usize,
        length: usize,
        sink: &mut Vec<u8>,
    ) -> Result<(), DistanceOutOfRange> {
        let capacity = self.capacity();
        let distance = self.resolve_distance(displacement);
        if distance > capacity {
            return Err(DistanceOutOfRange { distance, capacity });
        }

        sink.reserve(length);
        let mut src = self.index_behind(distance);
        for _ in 0..length {
            let value = self.buf[src];
            sink.push(value);
            self.write_byte(value);
            src += 1;
            if src == capacity {
                src = 0;
            }
        }

        Ok(())
    }

    #[inline]
    fn index_behind(&self, distance: usize) -> usize {
        (self.pos + self.buf.len() - distance) % self.buf.len()
    }
}
