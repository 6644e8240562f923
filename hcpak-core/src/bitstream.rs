//! Buffered bit-level I/O over byte streams.
//!
//! This module provides `BitReader` and `BitWriter`, the two halves of the
//! bit channel used by the HCPAK codec. A channel is bound to exactly one
//! underlying stream in exactly one direction, so a write on a reading
//! channel (or a rewind of a writing one) does not type-check.
//!
//! # Bit Ordering
//!
//! HCPAK packs bits MSB-first: bit offset 0 is the most significant bit of
//! the byte under the cursor. Multi-byte integers are written big-endian so
//! that files are portable between hosts.
//!
//! # Buffering
//!
//! The writer owns a fixed buffer that is written out whenever the cursor
//! reaches its end, after which the buffer is zero-filled again (single
//! bits are ORed into cleared bytes). The reader never discards data: every
//! refill appends to its buffer, which is what makes [`BitReader::rewind`]
//! possible without touching the underlying stream again.
//!
//! # Example
//!
//! ```
//! use hcpak_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     writer.write_bit(true).unwrap();
//!     writer.write_byte(0xA5).unwrap();
//!     writer.finish().unwrap();
//! }
//! assert_eq!(output, vec![0xD2, 0x80]);
//!
//! let mut reader = BitReader::new(Cursor::new(output));
//! assert_eq!(reader.read_bit().unwrap(), Some(true));
//! assert_eq!(reader.read_byte().unwrap(), Some(0xA5));
//! ```

use crate::error::Result;
use std::io::{self, Read, Write};

/// Default buffer size, and the unit in which a reader pulls fresh data.
pub const BUFFER_LEN: usize = 4096;

/// A buffered, MSB-first bit reader over any `Read` implementation.
///
/// Read operations return `Ok(None)` when the input is exhausted and `Err`
/// only when the underlying stream fails.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Every byte read so far; `buffer.len()` marks the end of valid data.
    buffer: Vec<u8>,
    /// Cursor byte position.
    pos: usize,
    /// Bit offset within the byte at `pos` (0 = MSB).
    bit_pos: u8,
    /// Number of bytes requested from the stream per refill.
    refill_len: usize,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self::with_refill_len(reader, BUFFER_LEN)
    }

    /// Create a `BitReader` that pulls `refill_len` bytes at a time.
    ///
    /// # Panics
    ///
    /// Panics if `refill_len` is zero.
    pub fn with_refill_len(reader: R, refill_len: usize) -> Self {
        assert!(refill_len > 0, "refill length must be non-zero");
        Self {
            reader,
            buffer: Vec::with_capacity(refill_len),
            pos: 0,
            bit_pos: 0,
            refill_len,
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Get a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consume this `BitReader` and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Current cursor position in bits from the start of the stream.
    pub fn bit_position(&self) -> u64 {
        self.pos as u64 * 8 + u64::from(self.bit_pos)
    }

    /// Number of bytes read from the stream and held in the buffer.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Allocated size of the buffer.
    pub fn buffer_capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Append up to one refill unit of fresh data to the buffer.
    ///
    /// Storage doubles whenever the free tail is smaller than one refill
    /// unit. Returns the number of bytes appended; 0 means end of input.
    fn refill(&mut self) -> Result<usize> {
        let valid_end = self.buffer.len();

        if self.buffer.capacity() - valid_end < self.refill_len {
            let target = (self.buffer.capacity() * 2).max(valid_end + self.refill_len);
            self.buffer.reserve_exact(target - valid_end);
        }

        self.buffer.resize(valid_end + self.refill_len, 0);
        let read = loop {
            match self.reader.read(&mut self.buffer[valid_end..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.buffer.truncate(valid_end);
                    return Err(e.into());
                }
            }
        };
        self.buffer.truncate(valid_end + read);

        Ok(read)
    }

    /// Make sure the cursor points at valid data, refilling if needed.
    ///
    /// Returns `false` when the cursor sits at the end of the input.
    #[inline]
    fn ensure_data(&mut self) -> Result<bool> {
        if self.pos < self.buffer.len() {
            return Ok(true);
        }
        self.refill()?;
        Ok(self.pos < self.buffer.len())
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        if !self.ensure_data()? {
            return Ok(None);
        }

        let bit = self.buffer[self.pos] & (0x80 >> self.bit_pos) != 0;
        self.bit_pos += 1;
        if self.bit_pos > 7 {
            self.bit_pos = 0;
            self.pos += 1;
        }

        Ok(Some(bit))
    }

    /// Read the next 8 bits as a byte.
    ///
    /// When the cursor is not byte-aligned the byte straddles two buffer
    /// positions. If the input ends between them, `Ok(None)` is returned
    /// and the high part stays consumed: the reader is not restored.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        if !self.ensure_data()? {
            return Ok(None);
        }

        if self.bit_pos == 0 {
            let byte = self.buffer[self.pos];
            self.pos += 1;
            return Ok(Some(byte));
        }

        let offset = self.bit_pos;
        let high = self.buffer[self.pos] << offset;
        self.pos += 1;

        if !self.ensure_data()? {
            return Ok(None);
        }
        let low = self.buffer[self.pos] >> (8 - offset);

        Ok(Some(high | low))
    }

    /// Read `count` bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<Option<Vec<u8>>> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            match self.read_byte()? {
                Some(byte) => out.push(byte),
                None => return Ok(None),
            }
        }
        Ok(Some(out))
    }

    /// Read a big-endian 32-bit integer.
    pub fn read_u32(&mut self) -> Result<Option<u32>> {
        let mut bytes = [0u8; 4];
        for byte in &mut bytes {
            match self.read_byte()? {
                Some(b) => *byte = b,
                None => return Ok(None),
            }
        }
        Ok(Some(u32::from_be_bytes(bytes)))
    }

    /// Move the cursor back to the start of the stream.
    ///
    /// Previously read data stays resident, so nothing is re-read from the
    /// underlying stream.
    pub fn rewind(&mut self) {
        self.pos = 0;
        self.bit_pos = 0;
    }
}

/// A buffered, MSB-first bit writer over any `Write` implementation.
///
/// Call [`finish`](BitWriter::finish) when done; it writes the partially
/// filled trailing byte (zero padded) and flushes the underlying writer.
/// Dropping an unfinished writer finishes it on a best-effort basis.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Fixed-size output buffer.
    buffer: Vec<u8>,
    /// Cursor byte position.
    pos: usize,
    /// Bit offset within the byte at `pos` (0 = MSB).
    bit_pos: u8,
    /// Bytes handed to the underlying writer so far.
    bytes_flushed: u64,
    /// Set once the trailing byte has been written out.
    finished: bool,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self::with_capacity(writer, BUFFER_LEN)
    }

    /// Create a `BitWriter` with a buffer of `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(writer: W, capacity: usize) -> Self {
        assert!(capacity > 0, "buffer capacity must be non-zero");
        Self {
            writer,
            buffer: vec![0; capacity],
            pos: 0,
            bit_pos: 0,
            bytes_flushed: 0,
            finished: false,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Total number of bits written so far.
    ///
    /// After [`finish`](BitWriter::finish) this includes the zero padding of
    /// the last byte.
    pub fn bits_written(&self) -> u64 {
        (self.bytes_flushed + self.pos as u64) * 8 + u64::from(self.bit_pos)
    }

    /// Write the buffer up to the cursor, including a partially filled
    /// byte, then reset the cursor and clear the buffer.
    fn flush_buffer(&mut self) -> Result<()> {
        let len = if self.bit_pos != 0 {
            self.pos + 1
        } else {
            self.pos
        };

        if len > 0 {
            self.writer.write_all(&self.buffer[..len])?;
            self.bytes_flushed += len as u64;
        }

        self.buffer.fill(0);
        self.pos = 0;
        Ok(())
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        debug_assert!(!self.finished, "write after finish");

        let mask = 0x80 >> self.bit_pos;
        if bit {
            self.buffer[self.pos] |= mask;
        } else {
            self.buffer[self.pos] &= !mask;
        }

        self.bit_pos += 1;
        if self.bit_pos > 7 {
            self.bit_pos = 0;
            self.pos += 1;
            if self.pos >= self.buffer.len() {
                self.flush_buffer()?;
            }
        }

        Ok(())
    }

    /// Write 8 bits.
    ///
    /// Aligned writes store the byte directly. Unaligned writes split it:
    /// the high `8 - offset` bits fill the current byte and the remaining
    /// low bits start the next one.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        debug_assert!(!self.finished, "write after finish");

        if self.bit_pos == 0 {
            self.buffer[self.pos] = byte;
            self.pos += 1;
            if self.pos >= self.buffer.len() {
                self.flush_buffer()?;
            }
            return Ok(());
        }

        let offset = self.bit_pos;
        self.buffer[self.pos] |= byte >> offset;
        if self.pos + 1 >= self.buffer.len() {
            // The current byte is complete, so the flush writes it whole.
            self.flush_buffer()?;
        } else {
            self.pos += 1;
        }
        self.buffer[self.pos] = byte << (8 - offset);

        Ok(())
    }

    /// Write a slice of bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Write the first `count` bits of `bits`, MSB-first.
    ///
    /// Whole bytes go through the byte path; the trailing partial byte is
    /// written bit by bit from its most significant bit.
    pub fn write_bits(&mut self, bits: &[u8], count: usize) -> Result<()> {
        debug_assert!(count <= bits.len() * 8, "bit count exceeds buffer");

        let whole = count / 8;
        for &byte in &bits[..whole] {
            self.write_byte(byte)?;
        }

        let remainder = count % 8;
        if remainder > 0 {
            let last = bits[whole];
            for i in 0..remainder {
                self.write_bit(last & (0x80 >> i) != 0)?;
            }
        }

        Ok(())
    }

    /// Write a 32-bit integer in big-endian order.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Write out everything buffered, including the zero-padded trailing
    /// byte, and flush the underlying writer.
    ///
    /// Calling `finish` more than once is a no-op.
    pub fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.flush_buffer()?;
        self.bit_pos = 0;
        self.writer.flush()?;
        self.finished = true;
        Ok(())
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        // Best-effort finish on drop
        if !self.finished {
            let _ = self.finish();
        }
    }
}
