//! Bit channel integration tests over real files and odd buffer sizes.

use hcpak_core::{BitReader, BitWriter};
use std::fs::File;
use std::io::Cursor;

/// Writes the reference sequence: "HCPAK", bits 0011, "e", "f", 123456,
/// five bits of 0xFF, bits 1010.
fn write_reference<W: std::io::Write>(writer: &mut BitWriter<W>) {
    writer.write_bytes(b"HCPAK").expect("write magic");
    for bit in [false, false, true, true] {
        writer.write_bit(bit).expect("write bit");
    }
    writer.write_byte(b'e').expect("write e");
    writer.write_byte(b'f').expect("write f");
    writer.write_u32(123_456).expect("write u32");
    writer.write_bits(&[0xFF], 5).expect("write bits");
    for bit in [true, false, true, false] {
        writer.write_bit(bit).expect("write bit");
    }
    writer.finish().expect("finish");
}

fn check_reference<R: std::io::Read>(reader: &mut BitReader<R>) {
    assert_eq!(
        reader.read_bytes(5).expect("read magic").as_deref(),
        Some(&b"HCPAK"[..])
    );
    for expected in [false, false, true, true] {
        assert_eq!(reader.read_bit().expect("read bit"), Some(expected));
    }
    assert_eq!(reader.read_byte().expect("read e"), Some(b'e'));
    assert_eq!(reader.read_byte().expect("read f"), Some(b'f'));
    assert_eq!(reader.read_u32().expect("read u32"), Some(123_456));
    for _ in 0..5 {
        assert_eq!(reader.read_bit().expect("read bit"), Some(true));
    }
    for expected in [true, false, true, false] {
        assert_eq!(reader.read_bit().expect("read bit"), Some(expected));
    }
}

#[test]
fn test_reference_sequence_through_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bitfile.test");

    {
        let file = File::create(&path).expect("create");
        let mut writer = BitWriter::new(file);
        write_reference(&mut writer);
    }

    let file = File::open(&path).expect("open");
    let mut reader = BitReader::new(file);
    check_reference(&mut reader);

    // Reading past the end reports end of input.
    assert_eq!(reader.read_byte().expect("read past end"), None);

    // Rewinding replays the same data.
    reader.rewind();
    assert_eq!(
        reader.read_bytes(5).expect("read magic").as_deref(),
        Some(&b"HCPAK"[..])
    );
}

#[test]
fn test_reference_sequence_small_buffers() {
    for capacity in [1, 2, 3, 7, 13] {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::with_capacity(&mut output, capacity);
            write_reference(&mut writer);
        }
        // 101 bits of payload round up to 13 bytes.
        assert_eq!(output.len(), 13, "capacity {capacity}");

        for refill in [1, 2, 5, 4096] {
            let mut reader = BitReader::with_refill_len(Cursor::new(output.clone()), refill);
            check_reference(&mut reader);
            assert_eq!(reader.read_byte().expect("read past end"), None);
        }
    }
}

#[test]
fn test_rewind_is_idempotent_across_refills() {
    let data: Vec<u8> = (0..10_000u32).map(|i| (i * 7 + 3) as u8).collect();
    let mut reader = BitReader::with_refill_len(Cursor::new(data), 64);

    let mut first = Vec::new();
    for _ in 0..500 {
        first.push(reader.read_byte().expect("read"));
        first.push(reader.read_bit().expect("read").map(u8::from));
    }

    reader.rewind();
    let mut second = Vec::new();
    for _ in 0..500 {
        second.push(reader.read_byte().expect("read"));
        second.push(reader.read_bit().expect("read").map(u8::from));
    }

    assert_eq!(first, second);
}

#[test]
fn test_bit_copy_matches_byte_copy() {
    let data: Vec<u8> = (0..3000u32).map(|i| (i % 251) as u8).collect();

    let mut by_bits = Vec::new();
    {
        let mut reader = BitReader::with_refill_len(Cursor::new(data.clone()), 100);
        let mut writer = BitWriter::with_capacity(&mut by_bits, 64);
        while let Some(bit) = reader.read_bit().expect("read") {
            writer.write_bit(bit).expect("write");
        }
        writer.finish().expect("finish");
    }

    let mut by_words = Vec::new();
    {
        let mut reader = BitReader::new(Cursor::new(data.clone()));
        let mut writer = BitWriter::new(&mut by_words);
        while let Some(word) = reader.read_u32().expect("read") {
            writer.write_u32(word).expect("write");
        }
        writer.finish().expect("finish");
    }

    assert_eq!(by_bits, data);
    assert_eq!(by_words, data);
}
