//! Byte frequency counting.

use hcpak_core::bitstream::BitReader;
use hcpak_core::error::Result;
use std::io::Read;

/// Observed count of every byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Count the bytes of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.record(byte);
        }
        table
    }

    /// Count every byte remaining in `reader`.
    ///
    /// The bytes stay resident in the reader's buffer, so the caller can
    /// [`rewind`](BitReader::rewind) and read them again.
    pub fn from_reader<R: Read>(reader: &mut BitReader<R>) -> Result<Self> {
        let mut table = Self::new();
        while let Some(byte) = reader.read_byte()? {
            table.record(byte);
        }
        Ok(table)
    }

    /// Record one occurrence of `byte`.
    #[inline]
    pub fn record(&mut self, byte: u8) {
        self.counts[usize::from(byte)] += 1;
    }

    /// Set the count of `byte`.
    pub fn set(&mut self, byte: u8, count: u64) {
        self.counts[usize::from(byte)] = count;
    }

    /// Count of `byte`.
    pub fn get(&self, byte: u8) -> u64 {
        self.counts[usize::from(byte)]
    }

    /// Number of byte values with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Whether no byte was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Non-zero entries in ascending byte order.
    pub fn entries(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0..=u8::MAX)
            .zip(self.counts.iter())
            .filter(|&(_, &count)| count > 0)
            .map(|(byte, &count)| (byte, count))
    }
}
