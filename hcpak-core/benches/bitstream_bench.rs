//! Performance benchmarks for the HCPAK bit channel
//!
//! This benchmark suite evaluates:
//! - Byte-path vs bit-path write throughput
//! - Unaligned byte writes (shift-and-OR split path)
//! - Read throughput for bits, bytes and 32-bit words

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hcpak_core::{BitReader, BitWriter};
use std::hint::black_box;
use std::io::Cursor;

/// Generate test data patterns for benchmarking
mod test_data {
    /// Random data - varied byte values
    pub fn random(size: usize) -> Vec<u8> {
        // Simple PRNG for reproducible random data
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            // Linear congruential generator
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }
}

/// Standard data sizes for benchmarking
mod data_sizes {
    pub const SMALL: usize = 4 * 1024; // 4 KB
    pub const LARGE: usize = 256 * 1024; // 256 KB
}

/// Benchmark the different write paths
fn bench_write_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitwriter");

    for (size_name, size) in [("4KB", data_sizes::SMALL), ("256KB", data_sizes::LARGE)] {
        let data = test_data::random(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            BenchmarkId::new("aligned_bytes", size_name),
            &data,
            |b, data| {
                b.iter(|| {
                    let mut out = Vec::with_capacity(data.len());
                    let mut writer = BitWriter::new(&mut out);
                    writer.write_bytes(black_box(data)).unwrap();
                    writer.finish().unwrap();
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("unaligned_bytes", size_name),
            &data,
            |b, data| {
                b.iter(|| {
                    let mut out = Vec::with_capacity(data.len() + 1);
                    let mut writer = BitWriter::new(&mut out);
                    writer.write_bit(true).unwrap();
                    writer.write_bytes(black_box(data)).unwrap();
                    writer.finish().unwrap();
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("single_bits", size_name),
            &data,
            |b, data| {
                b.iter(|| {
                    let mut out = Vec::with_capacity(data.len());
                    let mut writer = BitWriter::new(&mut out);
                    for &byte in black_box(data) {
                        for i in 0..8 {
                            writer.write_bit(byte & (0x80 >> i) != 0).unwrap();
                        }
                    }
                    writer.finish().unwrap();
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the different read paths
fn bench_read_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitreader");

    let size = data_sizes::LARGE;
    let data = test_data::random(size);
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::from_parameter("bits"), &data, |b, data| {
        b.iter(|| {
            let mut reader = BitReader::new(Cursor::new(data));
            let mut ones = 0u64;
            while let Some(bit) = reader.read_bit().unwrap() {
                ones += u64::from(bit);
            }
            black_box(ones);
        });
    });

    group.bench_with_input(BenchmarkId::from_parameter("bytes"), &data, |b, data| {
        b.iter(|| {
            let mut reader = BitReader::new(Cursor::new(data));
            let mut sum = 0u64;
            while let Some(byte) = reader.read_byte().unwrap() {
                sum += u64::from(byte);
            }
            black_box(sum);
        });
    });

    group.bench_with_input(BenchmarkId::from_parameter("u32"), &data, |b, data| {
        b.iter(|| {
            let mut reader = BitReader::new(Cursor::new(data));
            let mut acc = 0u32;
            while let Some(word) = reader.read_u32().unwrap() {
                acc ^= word;
            }
            black_box(acc);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_write_paths, bench_read_paths);
criterion_main!(benches);
