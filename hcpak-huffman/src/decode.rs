//! Huffman decompression.

use crate::encode::savings;
use crate::format::{EOF_SYMBOL, Header};
use crate::tree::HuffmanTree;
use hcpak_core::bitstream::{BitReader, BitWriter};
use hcpak_core::error::{HcpakError, Result};
use std::io::{Read, Write};

/// Summary of a decompression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecompressReport {
    /// Size of the file header.
    pub header_bytes: u64,
    /// Payload bits consumed, end-of-stream code included.
    pub payload_bits: u64,
    /// Bytes written to the output.
    pub bytes_written: u64,
    /// Bytes announced by the header's frequency table.
    pub expected_bytes: u64,
}

impl DecompressReport {
    /// Percentage of space the coded payload saved relative to the output.
    pub fn space_savings(&self) -> f64 {
        savings(self.payload_bits, self.bytes_written)
    }

    /// Whether the output size matches the frequency table.
    pub fn is_consistent(&self) -> bool {
        self.bytes_written == self.expected_bytes
    }
}

/// Huffman decoder for one stream.
///
/// Walks the tree one input bit at a time. A leaf emits its byte and resets
/// the walk to the root; the end-of-stream leaf stops decoding.
#[derive(Debug)]
pub struct HuffmanDecoder {
    tree: HuffmanTree,
    bits_read: u64,
    symbols_decoded: u64,
    done: bool,
}

impl HuffmanDecoder {
    /// Rebuild the tree for the frequencies in `header`.
    pub fn new(header: &Header) -> Result<Self> {
        Ok(Self {
            tree: HuffmanTree::build(&header.symbol_weights())?,
            bits_read: 0,
            symbols_decoded: 0,
            done: false,
        })
    }

    /// The underlying tree.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// Payload bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Bytes decoded so far.
    pub fn symbols_decoded(&self) -> u64 {
        self.symbols_decoded
    }

    /// Whether the end-of-stream code has been read.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Decode the next byte, or `None` once the end-of-stream code is read.
    ///
    /// Running out of input in the middle of a code is an error; nothing is
    /// returned for the incomplete code.
    pub fn decode_byte<R: Read>(&mut self, reader: &mut BitReader<R>) -> Result<Option<u8>> {
        if self.done {
            return Ok(None);
        }

        let mut node = self.tree.root();
        loop {
            let Some(bit) = reader.read_bit()? else {
                return Err(HcpakError::truncated(
                    reader.bit_position(),
                    self.symbols_decoded,
                ));
            };
            self.bits_read += 1;

            node = self
                .tree
                .child(node, bit)
                .ok_or_else(|| HcpakError::invalid_huffman(reader.bit_position()))?;

            match self.tree.node(node).symbol() {
                Some(EOF_SYMBOL) => {
                    self.done = true;
                    log::trace!("end-of-stream code after {} payload bits", self.bits_read);
                    return Ok(None);
                }
                Some(symbol) => {
                    self.symbols_decoded += 1;
                    return Ok(Some(symbol as u8));
                }
                None => {}
            }
        }
    }

    /// Decode until the end-of-stream code, writing every byte to `writer`.
    pub fn decode_into<R: Read, W: Write>(
        &mut self,
        reader: &mut BitReader<R>,
        writer: &mut BitWriter<W>,
    ) -> Result<u64> {
        while let Some(byte) = self.decode_byte(reader)? {
            writer.write_byte(byte)?;
        }
        Ok(self.symbols_decoded)
    }
}

/// Decompress `input` into `output` and finish `output`.
///
/// On error the bytes decoded so far have already been handed to `output`.
pub fn decompress_channels<R: Read, W: Write>(
    input: &mut BitReader<R>,
    output: &mut BitWriter<W>,
) -> Result<DecompressReport> {
    let header = Header::read(input)?;
    let mut decoder = HuffmanDecoder::new(&header)?;

    let bytes_written = decoder.decode_into(input, output)?;
    output.finish()?;

    let report = DecompressReport {
        header_bytes: header.encoded_len() as u64,
        payload_bits: decoder.bits_read(),
        bytes_written,
        expected_bytes: header.original_len(),
    };
    if !report.is_consistent() {
        log::warn!(
            "decoded {} bytes, header announced {}",
            report.bytes_written,
            report.expected_bytes
        );
    }
    log::debug!(
        "decompressed {} payload bits into {} bytes",
        report.payload_bits,
        report.bytes_written
    );

    Ok(report)
}

/// Decompress `input` into `output`.
pub fn decompress_stream<R: Read, W: Write>(input: R, output: W) -> Result<DecompressReport> {
    let mut reader = BitReader::new(input);
    let mut writer = BitWriter::new(output);
    decompress_channels(&mut reader, &mut writer)
}

/// Decompress a byte slice.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decompress_stream(data, &mut output)?;
    Ok(output)
}

/// Read only the header of a compressed stream.
pub fn read_header<R: Read>(input: R) -> Result<Header> {
    Header::read(&mut BitReader::new(input))
}
