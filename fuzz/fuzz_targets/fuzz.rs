#![no_main]

use libfuzzer_sys::fuzz_target;
use orphen_lz::{DecodeConfig, EndOfStream, decompress_with, decompressed_size};

/// Verifies that the decoder safely handles arbitrary, potentially malformed input.
///
/// # Invariant
/// The decoder must return either `Ok(_)` or `Err(_)`. It must **never** panic,
/// whatever the input or configuration.
fn verify_decompression_robustness(data: &[u8], config: &DecodeConfig) {
    let mut output = Vec::new();
    let _ = decompress_with(data, &mut output, config);
}

/// Verifies that the size-only scan agrees with a lenient decode.
///
/// # Invariant
/// `decompressed_size(data) == decompress(data).len()` for every input when
/// truncated records are tolerated, in both single- and multi-stream mode.
///
/// # Panics
/// Panics on disagreement or if lenient decoding fails, signalling a fuzzing failure.
fn verify_size_agreement(data: &[u8], multi_stream: bool) {
    let config = DecodeConfig::default()
        .with_multi_stream(multi_stream)
        .with_end_of_stream(EndOfStream::Lenient);

    let mut output = Vec::new();
    if let Err(e) = decompress_with(data, &mut output, &config) {
        panic!("Lenient decode failed: {e:?}\nInput len: {}", data.len());
    }

    let scanned = decompressed_size(data, &config);
    if scanned != output.len() {
        panic!(
            "Size mismatch!\nInput len: {}\nScanned: {}\nDecoded: {}",
            data.len(),
            scanned,
            output.len()
        );
    }
}

fuzz_target!(|data: &[u8]| {
    // The first byte picks a small window so distance errors get exercised too.
    let (selector, body) = data.split_first().map_or((0, data), |(s, b)| (*s, b));
    let small_window = DecodeConfig::default().with_max_displacement(usize::from(selector) * 32);

    // 1. Robustness: random noise must not crash the decoder.
    verify_decompression_robustness(body, &DecodeConfig::default());
    verify_decompression_robustness(body, &small_window.with_target_size(Some(4096)));

    // 2. Correctness: the size scanner tracks the decoder exactly.
    verify_size_agreement(body, selector & 1 == 1);
});
