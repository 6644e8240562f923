//! # HCPAK Core
//!
//! Core components for the HCPAK Huffman file compressor.
//!
//! This crate provides the building blocks shared by the codec and the
//! command-line tool:
//!
//! - [`bitstream`]: Buffered MSB-first bit I/O over byte streams
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Tool                                                │
//! │     hcpak CLI: suffix policy, in-place file handling    │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Frequency table, header, Huffman tree, coding loop  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, HcpakError                     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use hcpak_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     writer.write_bytes(b"HCPAK").unwrap();
//!     writer.write_u32(42).unwrap();
//!     writer.finish().unwrap();
//! }
//!
//! let mut reader = BitReader::new(Cursor::new(output));
//! assert_eq!(reader.read_bytes(5).unwrap().as_deref(), Some(&b"HCPAK"[..]));
//! assert_eq!(reader.read_u32().unwrap(), Some(42));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BUFFER_LEN, BitReader, BitWriter};
pub use error::{HcpakError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{HcpakError, Result};
}
