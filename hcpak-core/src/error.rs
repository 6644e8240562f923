//! Error types for HCPAK operations.
//!
//! A single error type covers every fatal condition of a compression or
//! decompression run: I/O failures of the underlying streams, malformed
//! compressed input, and caller errors such as compressing an empty file.
//! Nothing in the codec recovers from these locally; they are propagated
//! to the caller, which aborts the run.

use std::io;
use thiserror::Error;

/// The main error type for HCPAK operations.
#[derive(Debug, Error)]
pub enum HcpakError {
    /// I/O error from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic number in the file header.
    #[error("Magic mismatch on input: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Input ended inside a fixed-size structure.
    #[error("Input too short: unexpected end of input while reading {context}")]
    UnexpectedEof {
        /// What was being read when the input ran out.
        context: &'static str,
    },

    /// Structurally invalid header.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// A bit sequence led to a missing edge of the code tree.
    #[error("Code not found at bit position {bit_position}, file corrupted?")]
    InvalidHuffmanCode {
        /// Bit position where the invalid code was found.
        bit_position: u64,
    },

    /// The coded bitstream ended before the end-of-stream code.
    #[error(
        "Truncated bitstream: input ended at bit position {bit_position} \
         before the end-of-stream code ({symbols_decoded} symbols decoded)"
    )]
    TruncatedStream {
        /// Bit position where the input ran out.
        bit_position: u64,
        /// Number of symbols fully decoded before the input ran out.
        symbols_decoded: u64,
    },

    /// Compressing empty input is not supported.
    #[error("Compressing empty files is not supported")]
    EmptyInput,

    /// A byte value occurs too often for the 32-bit frequency field.
    #[error("Frequency of byte {symbol:#04x} ({count}) does not fit in 32 bits")]
    FrequencyOverflow {
        /// The byte value.
        symbol: u8,
        /// Its observed count.
        count: u64,
    },

    /// Extract-min on an empty heap.
    #[error("Heap underflow")]
    HeapUnderflow,
}

/// Result type alias for HCPAK operations.
pub type Result<T> = std::result::Result<T, HcpakError>;

impl HcpakError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(context: &'static str) -> Self {
        Self::UnexpectedEof { context }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create an invalid Huffman code error.
    pub fn invalid_huffman(bit_position: u64) -> Self {
        Self::InvalidHuffmanCode { bit_position }
    }

    /// Create a truncated stream error.
    pub fn truncated(bit_position: u64, symbols_decoded: u64) -> Self {
        Self::TruncatedStream {
            bit_position,
            symbols_decoded,
        }
    }

    /// Create a frequency overflow error.
    pub fn frequency_overflow(symbol: u8, count: u64) -> Self {
        Self::FrequencyOverflow { symbol, count }
    }

    /// Whether the error describes malformed compressed input rather than
    /// an I/O failure or a caller error.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidMagic { .. }
                | Self::UnexpectedEof { .. }
                | Self::InvalidHeader { .. }
                | Self::InvalidHuffmanCode { .. }
                | Self::TruncatedStream { .. }
        )
    }
}
