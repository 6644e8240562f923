//! Performance benchmarks for HCPAK Huffman coding
//!
//! This benchmark suite evaluates:
//! - Compression and decompression throughput on text, random and skewed data
//! - Tree construction and code generation for a full 257-symbol alphabet

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hcpak_huffman::{EOF_SYMBOL, HuffmanTree, Symbol, compress, decompress};
use std::hint::black_box;

/// Generate test data patterns for benchmarking
mod test_data {
    /// Text data - English-like text with repetition
    pub fn text(size: usize) -> Vec<u8> {
        let sample = b"The quick brown fox jumps over the lazy dog. \
                       Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
        sample.iter().cycle().take(size).copied().collect()
    }

    /// Random data - varied byte values
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Skewed data - few dominant byte values
    pub fn skewed(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0xFEDCBA9876543210;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            let r = (seed >> 40) as u32 % 100;
            data.push(match r {
                0..=59 => b'a',
                60..=84 => b'b',
                85..=94 => b'c',
                _ => (seed >> 32) as u8,
            });
        }
        data
    }
}

/// Standard data sizes for benchmarking
mod data_sizes {
    pub const SMALL: usize = 4 * 1024; // 4 KB
    pub const MEDIUM: usize = 64 * 1024; // 64 KB
    pub const LARGE: usize = 1024 * 1024; // 1 MB
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");

    for (size_name, size) in [
        ("4KB", data_sizes::SMALL),
        ("64KB", data_sizes::MEDIUM),
        ("1MB", data_sizes::LARGE),
    ] {
        group.throughput(Throughput::Bytes(size as u64));

        for (pattern, data) in [
            ("text", test_data::text(size)),
            ("random", test_data::random(size)),
            ("skewed", test_data::skewed(size)),
        ] {
            group.bench_with_input(
                BenchmarkId::new(pattern, size_name),
                &data,
                |b, data| {
                    b.iter(|| compress(black_box(data)).unwrap());
                },
            );
        }
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");

    for (size_name, size) in [("64KB", data_sizes::MEDIUM), ("1MB", data_sizes::LARGE)] {
        group.throughput(Throughput::Bytes(size as u64));

        for (pattern, data) in [
            ("text", test_data::text(size)),
            ("random", test_data::random(size)),
        ] {
            let compressed = compress(&data).unwrap();
            group.bench_with_input(
                BenchmarkId::new(pattern, size_name),
                &compressed,
                |b, compressed| {
                    b.iter(|| decompress(black_box(compressed)).unwrap());
                },
            );
        }
    }

    group.finish();
}

fn bench_tree_build(c: &mut Criterion) {
    let symbols: Vec<(Symbol, u64)> = (0..256u16)
        .map(|s| (s, 1 + u64::from(s) * 37 % 1000))
        .chain(std::iter::once((EOF_SYMBOL, 1)))
        .collect();

    c.bench_function("tree_build_257", |b| {
        b.iter(|| HuffmanTree::build(black_box(&symbols)).unwrap());
    });
}

criterion_group!(benches, bench_compress, bench_decompress, bench_tree_build);
criterion_main!(benches);
