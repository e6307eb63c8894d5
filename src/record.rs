use crate::error::DecompressionError;

type Result<T> = core::result::Result<T, DecompressionError>;

// --- Flag Layout ---

/// Flag value that ends a stream (or a sub-stream in multi-stream mode).
const FLAG_TERMINATOR: u8 = 0x00;

/// Set on every match flag. Bits 6-5 carry the length, bits 4-0 the high displacement bits.
const FLAG_MATCH: u8 = 0x80;

/// Set (with bit 7 clear) on every run-length flag.
const FLAG_RLE: u8 = 0x40;

/// Run-length flag bit selecting the 12-bit length form.
const RLE_EXTENDED: u8 = 0x10;

/// Raw flag bit selecting the 13-bit length form.
const RAW_EXTENDED: u8 = 0x20;

/// Top three bits of a continuation flag.
const CONTINUE_MASK: u8 = 0xE0;
const CONTINUE_TAG: u8 = 0x60;

/// Shortest match a match flag can encode; bit 2 of the length is always set.
const MIN_MATCH: usize = 4;

/// Bias added to every run length.
const MIN_RUN: usize = 4;

/// Sequential reader over the compressed input.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Offset of the next unread byte.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let byte = self
            .peek()
            .ok_or(DecompressionError::UnexpectedEof { offset: self.pos })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Consumes exactly `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(DecompressionError::UnexpectedEof {
                offset: self.input.len(),
            });
        }
        Ok(self.take_up_to(len))
    }

    /// Consumes at most `len` bytes, returning fewer when the input runs out.
    pub fn take_up_to(&mut self, len: usize) -> &'a [u8] {
        let end = self.pos + len.min(self.remaining());
        let slice = &self.input[self.pos..end];
        self.pos = end;
        slice
    }
}

/// One decoded record header.
///
/// Raw payload bytes are not part of the record; they follow it in the input
/// and are consumed by whoever applies the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Terminator,
    Raw { length: usize },
    Rle { length: usize, value: u8 },
    LzMatch { length: usize, displacement: usize },
    /// Extends the preceding match with the same displacement.
    LzContinue { length: usize },
}

impl Record {
    /// Decodes the record introduced by `flag`, reading its operand bytes from `cursor`.
    ///
    /// `flag` must already have been consumed. `after_match` is set when the
    /// previous record was a match or continuation; only then can a `0x6x`
    /// flag be a continuation instead of a run.
    pub fn parse(flag: u8, after_match: bool, cursor: &mut Cursor<'_>) -> Result<Self> {
        if flag == FLAG_TERMINATOR {
            return Ok(Self::Terminator);
        }

        if after_match {
            if let Some(record) = Self::continuation(flag) {
                return Ok(record);
            }
        }

        if flag & FLAG_MATCH != 0 {
            let low = cursor.read_u8()?;
            return Ok(Self::LzMatch {
                length: usize::from(flag >> 5) | MIN_MATCH,
                displacement: (usize::from(flag & 0x1F) << 8) | usize::from(low),
            });
        }

        if flag & FLAG_RLE != 0 {
            let length = if flag & RLE_EXTENDED == 0 {
                usize::from(flag & 0x0F) + MIN_RUN
            } else {
                let ext = cursor.read_u8()?;
                (usize::from(flag & 0x0F) << 8) + usize::from(ext) + MIN_RUN
            };
            let value = cursor.read_u8()?;
            return Ok(Self::Rle { length, value });
        }

        let length = if flag & RAW_EXTENDED == 0 {
            usize::from(flag & 0x1F)
        } else {
            let ext = cursor.read_u8()?;
            (usize::from(flag & 0x1F) << 8) + usize::from(ext)
        };
        Ok(Self::Raw { length })
    }

    /// Interprets `flag` as a continuation of the previous match, if it is one.
    #[must_use]
    pub const fn continuation(flag: u8) -> Option<Self> {
        if flag & CONTINUE_MASK == CONTINUE_TAG {
            Some(Self::LzContinue {
                length: (flag & 0x1F) as usize,
            })
        } else {
            None
        }
    }

    /// Number of output bytes the record produces.
    #[must_use]
    pub const fn output_len(&self) -> usize {
        match *self {
            Self::Terminator => 0,
            Self::Raw { length }
            | Self::Rle { length, .. }
            | Self::LzMatch { length, .. }
            | Self::LzContinue { length } => length,
        }
    }
}
