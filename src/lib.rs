//! # Orphen LZ Decompression
//!
//! `orphen_lz` is a safe, pure-Rust decoder for the headerless LZ format used
//! to pack script and asset data in *Orphen* game archives.
//!
//! A stream is a sequence of records, each introduced by a flag byte:
//!
//! | Flag            | Record                                             |
//! |-----------------|----------------------------------------------------|
//! | `0x00`          | terminator                                         |
//! | `0x01..=0x3F`   | raw literals, 5- or 13-bit length                  |
//! | `0x40..=0x7F`   | run of one byte, 4- or 12-bit length (+4)          |
//! | `0x80..=0xFF`   | match, length 4-7, 13-bit displacement             |
//! | `0x60..=0x7F`   | directly after a match: continue at same distance  |
//!
//! Back-references resolve through an 8 KiB circular window.
//!
//! ## Example
//!
//! ```rust
//! extern crate alloc;
//! use orphen_lz::{decompress, decompressed_size, DecodeConfig};
//! use alloc::vec::Vec;
//!
//! // Raw "ABC", then a 4-byte match at distance 3, then the terminator.
//! let compressed_data = [0x03, b'A', b'B', b'C', 0x80, 0x03, 0x00];
//!
//! let mut buffer = Vec::new();
//! decompress(&compressed_data, &mut buffer).expect("Decompression failed");
//! assert_eq!(buffer, b"ABCABCA");
//! assert_eq!(decompressed_size(&compressed_data, &DecodeConfig::default()), 7);
//! ```

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod decompress;
pub mod error;
pub mod record;
pub mod size;
pub mod window;

pub use config::{DEFAULT_MAX_DISPLACEMENT, DecodeConfig, EndOfStream};
pub use decompress::{decompress, decompress_to_vec, decompress_with};
pub use error::DecompressionError;
pub use record::{Cursor, Record};
pub use size::decompressed_size;
pub use window::{DistanceOutOfRange, Window};
