//! Huffman compression.

use crate::format::{EOF_SYMBOL, Header};
use crate::frequency::FrequencyTable;
use crate::tree::{Code, CodeTable, HuffmanTree, Symbol};
use hcpak_core::bitstream::{BitReader, BitWriter};
use hcpak_core::error::{HcpakError, Result};
use std::io::{Read, Write};

/// Summary of a compression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompressReport {
    /// Bytes read from the input.
    pub original_bytes: u64,
    /// Size of the file header.
    pub header_bytes: u64,
    /// Bits of coded payload, end-of-stream code included.
    pub payload_bits: u64,
    /// Distinct byte values in the input.
    pub symbols: usize,
    /// Longest code in the tree.
    pub max_code_len: usize,
}

impl CompressReport {
    /// Total size of the compressed output.
    pub fn compressed_bytes(&self) -> u64 {
        self.header_bytes + self.payload_bits.div_ceil(8)
    }

    /// Percentage of space saved by the coded payload relative to the input.
    pub fn space_savings(&self) -> f64 {
        savings(self.payload_bits, self.original_bytes)
    }
}

pub(crate) fn savings(payload_bits: u64, original_bytes: u64) -> f64 {
    if original_bytes == 0 {
        return 0.0;
    }
    100.0 * (1.0 - payload_bits as f64 / (8.0 * original_bytes as f64))
}

/// Huffman encoder for one stream.
#[derive(Debug)]
pub struct HuffmanEncoder {
    tree: HuffmanTree,
    codes: CodeTable,
    bits_written: u64,
}

impl HuffmanEncoder {
    /// Build the tree and code table for the frequencies in `header`.
    pub fn new(header: &Header) -> Result<Self> {
        let tree = HuffmanTree::build(&header.symbol_weights())?;
        let codes = tree.code_table();
        Ok(Self {
            tree,
            codes,
            bits_written: 0,
        })
    }

    /// The underlying tree.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// Payload bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    fn put_code<W: Write>(&mut self, symbol: Symbol, writer: &mut BitWriter<W>) -> Result<()> {
        let code: &Code = self.codes.get(symbol).ok_or_else(|| {
            HcpakError::invalid_header(format!("symbol {symbol} is not in the frequency table"))
        })?;
        writer.write_bits(code.bits(), code.len())?;
        self.bits_written += code.len() as u64;
        Ok(())
    }

    /// Write the code of `byte`.
    #[inline]
    pub fn encode_byte<W: Write>(&mut self, byte: u8, writer: &mut BitWriter<W>) -> Result<()> {
        self.put_code(Symbol::from(byte), writer)
    }

    /// Write the end-of-stream code.
    pub fn finish<W: Write>(&mut self, writer: &mut BitWriter<W>) -> Result<()> {
        self.put_code(EOF_SYMBOL, writer)
    }
}

/// Compress everything left in `input` into `output` and finish `output`.
///
/// The input is read twice: once to count byte frequencies, then again
/// after a rewind to encode. The reader keeps all data resident, so the
/// underlying stream is only read once.
pub fn compress_channels<R: Read, W: Write>(
    input: &mut BitReader<R>,
    output: &mut BitWriter<W>,
) -> Result<CompressReport> {
    let table = FrequencyTable::from_reader(input)?;
    let header = Header::from_table(&table)?;
    log::debug!(
        "frequency table: {} distinct bytes, {} bytes total",
        header.symbol_count(),
        table.total()
    );

    header.write(output)?;

    let mut encoder = HuffmanEncoder::new(&header)?;
    log::debug!(
        "Huffman tree: {} leaves, depth {}",
        encoder.tree().leaf_count(),
        encoder.tree().depth()
    );

    input.rewind();
    while let Some(byte) = input.read_byte()? {
        encoder.encode_byte(byte, output)?;
    }
    encoder.finish(output)?;
    output.finish()?;

    let report = CompressReport {
        original_bytes: table.total(),
        header_bytes: header.encoded_len() as u64,
        payload_bits: encoder.bits_written(),
        symbols: header.symbol_count(),
        max_code_len: encoder.tree().depth(),
    };
    log::debug!(
        "compressed {} bytes into {} header bytes and {} payload bits",
        report.original_bytes,
        report.header_bytes,
        report.payload_bits
    );

    Ok(report)
}

/// Compress `input` into `output`.
pub fn compress_stream<R: Read, W: Write>(input: R, output: W) -> Result<CompressReport> {
    let mut reader = BitReader::new(input);
    let mut writer = BitWriter::new(output);
    compress_channels(&mut reader, &mut writer)
}

/// Compress a byte slice.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    compress_stream(data, &mut output)?;
    Ok(output)
}
