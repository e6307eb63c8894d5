use crate::config::DecodeConfig;
use crate::record::{Cursor, Record};

/// Returns the number of bytes a full decode of `input` would produce.
///
/// Walks the records exactly like the decoder but only accumulates lengths,
/// so no window or output buffer is allocated. A truncated trailing record
/// ends the count instead of failing; a raw payload cut short still counts the
/// bytes that are present. Only `config.multi_stream` is consulted.
#[must_use]
pub fn decompressed_size(input: &[u8], config: &DecodeConfig) -> usize {
    let mut cursor = Cursor::new(input);
    let mut total = 0usize;
    let mut after_match = false;

    while let Ok(flag) = cursor.read_u8() {
        let Ok(record) = Record::parse(flag, after_match, &mut cursor) else {
            break;
        };
        after_match = matches!(record, Record::LzMatch { .. } | Record::LzContinue { .. });

        match record {
            Record::Terminator => {
                if !config.multi_stream {
                    break;
                }
            }
            Record::Raw { length } => {
                total += cursor.take_up_to(length).len();
            }
            Record::Rle { .. } | Record::LzMatch { .. } | Record::LzContinue { .. } => {
                total += record.output_len();
            }
        }
    }

    total
}
