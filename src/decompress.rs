use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::config::DecodeConfig;
use crate::error::DecompressionError;
use crate::record::{Cursor, Record};
use crate::window::Window;

type Result<T> = core::result::Result<T, DecompressionError>;

/// Decompresses a single stream with the default configuration.
///
/// Output is appended to `output`. On error, `output` keeps every byte that
/// was produced before the failing record.
pub fn decompress(input: &[u8], output: &mut Vec<u8>) -> Result<()> {
    decompress_with(input, output, &DecodeConfig::default())
}

/// Decompresses `input` into `output` according to `config`.
///
/// Decoding ends at the terminator flag (unless multi-stream mode is on), at
/// the end of the input, or once `config.target_size` bytes have been appended.
pub fn decompress_with(input: &[u8], output: &mut Vec<u8>, config: &DecodeConfig) -> Result<()> {
    // Heuristic capacity reservation to reduce allocation churn.
    let heuristic_cap = config
        .target_size
        .map_or(input.len(), |target| target.min(input.len().saturating_mul(8)));
    output.reserve(heuristic_cap);

    Session::new(input, output, config)?.run()
}

/// Convenience wrapper returning a fresh vector. Partial output is discarded on error.
pub fn decompress_to_vec(input: &[u8], config: &DecodeConfig) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decompress_with(input, &mut output, config)?;
    Ok(output)
}

/// Whether the driver should keep dispatching after a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Stop,
}

/// State of one decode invocation.
struct Session<'a, 'o> {
    cursor: Cursor<'a>,
    window: Window,
    output: &'o mut Vec<u8>,
    config: DecodeConfig,
    /// Length of `output` before decoding started; the target size counts from here.
    start_len: usize,
    /// Displacement of the last match, reused by continuation records.
    displacement: usize,
    /// Whether the previous record was a match or continuation.
    after_match: bool,
}

impl<'a, 'o> Session<'a, 'o> {
    fn new(input: &'a [u8], output: &'o mut Vec<u8>, config: &DecodeConfig) -> Result<Self> {
        let start_len = output.len();
        Ok(Self {
            cursor: Cursor::new(input),
            window: Window::new(config.max_displacement)?,
            output,
            config: *config,
            start_len,
            displacement: 0,
            after_match: false,
        })
    }

    fn run(&mut self) -> Result<()> {
        loop {
            if self.remaining_budget() == Some(0) {
                trace!(offset = self.cursor.position(), "target size reached");
                return Ok(());
            }

            let flag_offset = self.cursor.position();
            let Ok(flag) = self.cursor.read_u8() else {
                return Ok(());
            };

            let record = match Record::parse(flag, self.after_match, &mut self.cursor) {
                Ok(record) => record,
                Err(err) => return self.end_of_stream(err),
            };
            self.after_match = matches!(record, Record::LzMatch { .. } | Record::LzContinue { .. });

            let step = match record {
                Record::Terminator => {
                    if !self.config.multi_stream {
                        return Ok(());
                    }
                    self.reset_window()?;
                    Step::Continue
                }
                Record::Raw { length } => self.apply_raw(length)?,
                Record::Rle { length, value } => self.apply_rle(length, value),
                Record::LzMatch {
                    length,
                    displacement,
                } => {
                    self.displacement = displacement;
                    self.apply_match(length, flag_offset)?
                }
                Record::LzContinue { length } => self.apply_match(length, flag_offset)?,
            };

            if step == Step::Stop {
                return Ok(());
            }
        }
    }

    /// Bytes still allowed before the target size is hit, if there is one.
    fn remaining_budget(&self) -> Option<usize> {
        let produced = self.output.len() - self.start_len;
        self.config
            .target_size
            .map(|target| target.saturating_sub(produced))
    }

    /// Clamps a record length to the budget. The flag is set when the record was cut short.
    fn clamp(&self, length: usize) -> (usize, bool) {
        match self.remaining_budget() {
            Some(budget) if budget < length => {
                trace!(length, budget, "truncating record at target size");
                (budget, true)
            }
            _ => (length, false),
        }
    }

    fn end_of_stream(&self, err: DecompressionError) -> Result<()> {
        if self.config.is_lenient() {
            debug!(error = %err, "input truncated, keeping partial output");
            Ok(())
        } else {
            Err(err)
        }
    }

    fn reset_window(&mut self) -> Result<()> {
        trace!(
            offset = self.cursor.position(),
            "sub-stream terminator, resetting window"
        );
        self.window = Window::new(self.config.max_displacement)?;
        self.displacement = 0;
        self.after_match = false;
        Ok(())
    }

    fn emit_literals(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
        for &b in bytes {
            self.window.write_byte(b);
        }
    }

    fn apply_raw(&mut self, length: usize) -> Result<Step> {
        let (count, truncated) = self.clamp(length);

        let payload = match self.cursor.take(count) {
            Ok(payload) => payload,
            Err(err) => {
                if self.config.is_lenient() {
                    let partial = self.cursor.take_up_to(count);
                    self.emit_literals(partial);
                }
                return self.end_of_stream(err).map(|()| Step::Stop);
            }
        };
        self.emit_literals(payload);

        Ok(if truncated { Step::Stop } else { Step::Continue })
    }

    fn apply_rle(&mut self, length: usize, value: u8) -> Step {
        let (count, truncated) = self.clamp(length);

        self.output.resize(self.output.len() + count, value);
        for _ in 0..count {
            self.window.write_byte(value);
        }

        if truncated { Step::Stop } else { Step::Continue }
    }

    /// Copies a match (or continuation) of `length` bytes at the current displacement.
    fn apply_match(&mut self, length: usize, flag_offset: usize) -> Result<Step> {
        let (count, truncated) = self.clamp(length);
        if count == 0 {
            return Ok(if truncated { Step::Stop } else { Step::Continue });
        }

        self.window
            .copy_backreference(self.displacement, count, self.output)
            .map_err(|e| DecompressionError::InvalidDistance {
                distance: e.distance,
                capacity: e.capacity,
                offset: flag_offset,
            })?;

        Ok(if truncated { Step::Stop } else { Step::Continue })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn consumed(input: &[u8], config: &DecodeConfig) -> (Vec<u8>, usize) {
        let mut output = Vec::new();
        let mut session = Session::new(input, &mut output, config).unwrap();
        session.run().unwrap();
        let pos = session.cursor.position();
        (output, pos)
    }

    #[test]
    fn test_continuation_consumes_one_byte() {
        let config = DecodeConfig::default();

        // Raw "AB", match distance 2 length 4.
        let (out, pos) = consumed(&[0x02, b'A', b'B', 0x80, 0x02], &config);
        assert_eq!(out, b"ABABAB");
        assert_eq!(pos, 5);

        // Same plus a continuation of 2: one more byte of input, two more of output.
        let (out, pos) = consumed(&[0x02, b'A', b'B', 0x80, 0x02, 0x62], &config);
        assert_eq!(out, b"ABABABAB");
        assert_eq!(pos, 6);
    }

    #[test]
    fn test_non_continuation_is_next_flag() {
        let (out, pos) = consumed(
            &[0x01, b'x', 0x80, 0x01, 0x61, 0x01, b'y'],
            &DecodeConfig::default(),
        );
        assert_eq!(out, b"xxxxxxy");
        assert_eq!(pos, 7);
    }

    #[test]
    fn test_target_stops_before_next_record() {
        let config = DecodeConfig::default().with_target_size(Some(2));
        let (out, pos) = consumed(&[0x40, b'Z', 0x01, b'Q'], &config);
        assert_eq!(out, b"ZZ");
        assert_eq!(pos, 2);
    }

    #[test]
    fn test_target_counts_from_existing_output() {
        let mut output = vec![0xEE; 3];
        let config = DecodeConfig::default().with_target_size(Some(2));
        decompress_with(&[0x03, 1, 2, 3], &mut output, &config).unwrap();
        assert_eq!(output, [0xEE, 0xEE, 0xEE, 1, 2]);
    }

    #[test]
    fn test_window_reset_clears_displacement() {
        let config = DecodeConfig::default().with_multi_stream(true);
        let mut output = Vec::new();
        let mut session = Session::new(&[0x01, b'a', 0x80, 0x01, 0x00], &mut output, &config)
            .unwrap();
        session.run().unwrap();
        assert_eq!(session.displacement, 0);
        assert!(!session.after_match);
        assert!(session.window.is_empty());
    }
}
