use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use orphen_lz::{DecodeConfig, decompress, decompressed_size};
use std::hint::black_box;

/// Size of the decompressed payload every scenario targets.
const SIZE: usize = 64 * 1024;

/// Emits raw records of at most 31 bytes, the cheapest literal form.
fn push_raw(stream: &mut Vec<u8>, payload: &[u8]) {
    for chunk in payload.chunks(0x1F) {
        stream.push(chunk.len() as u8);
        stream.extend_from_slice(chunk);
    }
}

/// Generates an incompressible stream: pseudo-random literals only.
///
/// Uses a fixed-seed LCG so runs are reproducible.
fn generate_literals(size: usize) -> Vec<u8> {
    let mut payload = Vec::with_capacity(size);
    let mut seed: u64 = 0xDEAD_BEEF;
    for _ in 0..size {
        seed = (seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223)) & 0xFFFF_FFFF;
        payload.push((seed >> 24) as u8);
    }

    let mut stream = Vec::with_capacity(size + size / 31 + 1);
    push_raw(&mut stream, &payload);
    stream.push(0x00);
    stream
}

/// Generates a stream of maximal run-length records.
fn generate_runs(size: usize) -> Vec<u8> {
    let mut stream = Vec::new();
    let mut remaining = size;
    let mut value = 0u8;
    while remaining >= 4099 {
        stream.extend_from_slice(&[0x5F, 0xFF, value]);
        remaining -= 4099;
        value = value.wrapping_add(1);
    }
    push_raw(&mut stream, &vec![value; remaining]);
    stream.push(0x00);
    stream
}

/// Generates repeated text: one sentence of literals, then matches and continuations.
///
/// Represents typical script data, dominated by back-references.
fn generate_text(size: usize) -> Vec<u8> {
    let text = b"The quick brown fox jumps over the lazy dog. ";
    let mut stream = Vec::new();
    push_raw(&mut stream, text);

    let mut produced = text.len();
    let disp = text.len();
    while produced + 7 + 31 <= size {
        // Match len 7 at distance `disp`, followed by one full continuation.
        stream.extend_from_slice(&[0xE0 | (disp >> 8) as u8, disp as u8, 0x7F]);
        produced += 7 + 31;
    }
    stream.push(0x00);
    stream
}

/// Benchmarks full decoding. Throughput is based on the decompressed size.
fn bench_decompression(c: &mut Criterion) {
    let mut group = c.benchmark_group("Orphen LZ Decompression");

    let scenarios = [
        ("Literals", generate_literals(SIZE)),
        ("Runs", generate_runs(SIZE)),
        ("Text", generate_text(SIZE)),
    ];

    for (name, compressed_data) in &scenarios {
        let decompressed_len = decompressed_size(compressed_data, &DecodeConfig::default());
        let bench_name = format!("{name} 64KB");

        group.throughput(Throughput::Bytes(decompressed_len as u64));
        group.bench_function(&bench_name, |b| {
            let mut output = Vec::with_capacity(SIZE);
            b.iter(|| {
                output.clear();
                decompress(black_box(compressed_data), black_box(&mut output)).unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmarks the size-only scan over the same inputs.
fn bench_size_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("Orphen LZ Size Scan");
    let config = DecodeConfig::default();

    let scenarios = [
        ("Literals", generate_literals(SIZE)),
        ("Runs", generate_runs(SIZE)),
        ("Text", generate_text(SIZE)),
    ];

    for (name, compressed_data) in &scenarios {
        group.throughput(Throughput::Bytes(compressed_data.len() as u64));
        group.bench_function(format!("{name} 64KB"), |b| {
            b.iter(|| decompressed_size(black_box(compressed_data), &config));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decompression, bench_size_scan);
criterion_main!(benches);
