//! Round-trip tests for HCPAK compression.

use hcpak_huffman::{
    EOF_SYMBOL, FrequencyTable, HuffmanTree, MAGIC, compress, compress_stream, decompress,
    decompress_stream, read_header,
};
use std::fs::File;

fn lcg_bytes(size: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..size)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            (state >> 33) as u8
        })
        .collect()
}

fn roundtrip(input: &[u8]) -> Vec<u8> {
    let compressed = compress(input).unwrap();
    assert_eq!(&compressed[..5], MAGIC);
    let decompressed = decompress(&compressed).unwrap();
    assert_eq!(decompressed, input);
    compressed
}

#[test]
fn test_single_byte() {
    roundtrip(b"A");
}

#[test]
fn test_all_same_byte() {
    let input = vec![255u8; 5000];
    let compressed = roundtrip(&input);
    // One header entry and one bit per byte.
    assert!(compressed.len() < 6 + 5 + 5000 / 8 + 2);
}

#[test]
fn test_all_byte_values() {
    let input: Vec<u8> = (0..=255u8).collect();
    let compressed = roundtrip(&input);

    // 256 distinct symbols are stored as 255 in the count byte.
    assert_eq!(compressed[5], 255);
    let header = read_header(&compressed[..]).unwrap();
    assert_eq!(header.table(), FrequencyTable::from_bytes(&input));
}

#[test]
fn test_text() {
    let mut input = Vec::new();
    while input.len() < 100_000 {
        input.extend_from_slice(b"The quick brown fox jumps over the lazy dog. ");
    }
    let compressed = roundtrip(&input);
    assert!(compressed.len() < input.len() * 5 / 8);
}

#[test]
fn test_random_data_many_sizes() {
    for (i, size) in [1usize, 2, 3, 7, 255, 256, 4095, 4096, 4097, 8192, 50_000]
        .into_iter()
        .enumerate()
    {
        roundtrip(&lcg_bytes(size, 0x9E37_79B9_7F4A_7C15 ^ i as u64));
    }
}

#[test]
fn test_skewed_distribution() {
    // Geometric-looking distribution produces long codes.
    let mut input = Vec::new();
    for (byte, count) in (0u8..20).zip((0..20).map(|i| 1usize << (19 - i).min(16))) {
        input.extend(std::iter::repeat_n(byte, count));
    }
    let compressed = roundtrip(&input);

    let header = read_header(&compressed[..]).unwrap();
    let tree = HuffmanTree::build(&header.symbol_weights()).unwrap();
    assert!(tree.depth() >= 10);
    assert!(tree.code(EOF_SYMBOL).is_some());
}

#[test]
fn test_payload_size_matches_code_lengths() {
    let input = lcg_bytes(10_000, 42);
    let mut compressed = Vec::new();
    let report = compress_stream(&input[..], &mut compressed).unwrap();

    let header = read_header(&compressed[..]).unwrap();
    let tree = HuffmanTree::build(&header.symbol_weights()).unwrap();
    // Every leaf weight times its code length, EOF leaf included.
    assert_eq!(report.payload_bits, tree.weighted_length());
    assert_eq!(report.compressed_bytes(), compressed.len() as u64);
}

#[test]
fn test_compression_is_deterministic() {
    let input = lcg_bytes(3000, 7);
    assert_eq!(compress(&input).unwrap(), compress(&input).unwrap());
}

#[test]
fn test_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("input.bin");
    let packed = dir.path().join("input.bin.hc");
    let restored = dir.path().join("input.bin.out");

    let input = lcg_bytes(20_000, 1234);
    std::fs::write(&original, &input).unwrap();

    let report = compress_stream(
        File::open(&original).unwrap(),
        File::create(&packed).unwrap(),
    )
    .unwrap();
    assert_eq!(report.original_bytes, input.len() as u64);
    assert_eq!(
        std::fs::metadata(&packed).unwrap().len(),
        report.compressed_bytes()
    );

    let report = decompress_stream(
        File::open(&packed).unwrap(),
        File::create(&restored).unwrap(),
    )
    .unwrap();
    assert_eq!(report.bytes_written, input.len() as u64);
    assert_eq!(std::fs::read(&restored).unwrap(), input);
}
