//! HCPAK file format.
//!
//! ```text
//! offset 0      5 bytes   magic "HCPAK"
//! offset 5      1 byte    N - 1, N = number of table entries (1..=256)
//! offset 6      N * 5     entries: symbol (1 byte), frequency (u32, big-endian)
//! offset 6+5N   ...       Huffman-coded bitstream, MSB-first, ending with
//!                         the code of the end-of-stream symbol
//! ```
//!
//! The end-of-stream symbol is not stored in the table. Both sides append it
//! after the table entries with frequency 1, so both build the same tree.

use crate::frequency::FrequencyTable;
use crate::tree::Symbol;
use hcpak_core::bitstream::{BitReader, BitWriter};
use hcpak_core::error::{HcpakError, Result};
use std::io::{Read, Write};

/// Magic bytes at the start of every compressed file.
pub const MAGIC: &[u8; 5] = b"HCPAK";

/// File name suffix of compressed files, without the dot.
pub const SUFFIX: &str = "hc";

/// The synthetic end-of-stream symbol.
pub const EOF_SYMBOL: Symbol = 256;

/// Byte values plus the end-of-stream symbol.
pub const MAX_SYMBOLS: usize = 257;

/// Upper bound on a code length with [`MAX_SYMBOLS`] leaves.
pub const MAX_CODE_BITS: usize = 256;

/// Size of the magic plus the entry count byte.
pub const HEADER_PREFIX_LEN: usize = MAGIC.len() + 1;

/// Size of one table entry.
pub const TABLE_ENTRY_LEN: usize = 5;

/// The frequency table as stored in the file header.
///
/// Entries keep the order they have on disk, which is the order the tree
/// leaves are created in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    entries: Vec<(u8, u32)>,
}

impl Header {
    /// Build the header for a frequency table, in ascending byte order.
    pub fn from_table(table: &FrequencyTable) -> Result<Self> {
        if table.is_empty() {
            return Err(HcpakError::EmptyInput);
        }
        let entries = table
            .entries()
            .map(|(symbol, count)| {
                u32::try_from(count)
                    .map(|count| (symbol, count))
                    .map_err(|_| HcpakError::frequency_overflow(symbol, count))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Table entries, in file order.
    pub fn entries(&self) -> &[(u8, u32)] {
        &self.entries
    }

    /// Number of table entries (the end-of-stream symbol excluded).
    pub fn symbol_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of bytes the compressed stream decodes to.
    pub fn original_len(&self) -> u64 {
        self.entries.iter().map(|&(_, count)| u64::from(count)).sum()
    }

    /// Encoded size of the header in bytes.
    pub fn encoded_len(&self) -> usize {
        HEADER_PREFIX_LEN + TABLE_ENTRY_LEN * self.entries.len()
    }

    /// The frequencies as a table.
    pub fn table(&self) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for &(symbol, count) in &self.entries {
            table.set(symbol, u64::from(count));
        }
        table
    }

    /// Tree input: every entry in file order, then the end-of-stream symbol
    /// with weight 1.
    pub fn symbol_weights(&self) -> Vec<(Symbol, u64)> {
        self.entries
            .iter()
            .map(|&(symbol, count)| (Symbol::from(symbol), u64::from(count)))
            .chain(std::iter::once((EOF_SYMBOL, 1)))
            .collect()
    }

    /// Write the header.
    pub fn write<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        let last = self
            .entries
            .len()
            .checked_sub(1)
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(|| {
                HcpakError::invalid_header(format!(
                    "{} table entries, expected 1 to 256",
                    self.entries.len()
                ))
            })?;

        writer.write_bytes(MAGIC)?;
        writer.write_byte(last)?;
        for &(symbol, count) in &self.entries {
            writer.write_byte(symbol)?;
            writer.write_u32(count)?;
        }
        Ok(())
    }

    /// Read and validate a header.
    pub fn read<R: Read>(reader: &mut BitReader<R>) -> Result<Self> {
        let magic = reader
            .read_bytes(MAGIC.len())?
            .ok_or_else(|| HcpakError::unexpected_eof("magic"))?;
        if magic != MAGIC {
            return Err(HcpakError::invalid_magic(&MAGIC[..], magic));
        }

        let count = reader
            .read_byte()?
            .ok_or_else(|| HcpakError::unexpected_eof("symbol count"))?;
        let count = usize::from(count) + 1;

        let mut seen = [false; 256];
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let symbol = reader
                .read_byte()?
                .ok_or_else(|| HcpakError::unexpected_eof("table entry"))?;
            let freq = reader
                .read_u32()?
                .ok_or_else(|| HcpakError::unexpected_eof("table entry"))?;

            if freq == 0 {
                return Err(HcpakError::invalid_header(format!(
                    "zero frequency for byte {symbol:#04x}"
                )));
            }
            if std::mem::replace(&mut seen[usize::from(symbol)], true) {
                return Err(HcpakError::invalid_header(format!(
                    "duplicate entry for byte {symbol:#04x}"
                )));
            }
            entries.push((symbol, freq));
        }

        log::debug!(
            "read header: {} symbols, {} original bytes",
            entries.len(),
            entries.iter().map(|&(_, c)| u64::from(c)).sum::<u64>()
        );

        Ok(Self { entries })
    }
}
