//! # HCPAK Huffman
//!
//! Static order-0 Huffman coding and the HCPAK single-file format.
//!
//! A file is compressed in two passes over the same buffered input: the
//! first counts byte frequencies, the second writes each byte's code. The
//! output starts with a header holding the frequency table, so the
//! decompressor can rebuild the identical tree. A synthetic end-of-stream
//! symbol with frequency 1 terminates the coded bitstream.
//!
//! - [`heap`]: Binary min-heap used to pick the two lightest nodes
//! - [`tree`]: Arena Huffman tree and iterative code generation
//! - [`frequency`]: Byte frequency counting
//! - [`format`]: File header and wire constants
//! - [`encode`] / [`decode`]: The compression and decompression pipelines
//!
//! ## Example
//!
//! ```rust
//! use hcpak_huffman::{compress, decompress};
//!
//! let data = b"abracadabra, abracadabra";
//! let compressed = compress(data).unwrap();
//! assert_eq!(&compressed[..5], b"HCPAK");
//!
//! let restored = decompress(&compressed).unwrap();
//! assert_eq!(restored, data);
//! ```
//!
//! ## Streams
//!
//! ```rust
//! use hcpak_huffman::{compress_stream, decompress_stream};
//!
//! let mut compressed = Vec::new();
//! let report = compress_stream(&b"mississippi"[..], &mut compressed).unwrap();
//! assert_eq!(report.original_bytes, 11);
//!
//! let mut restored = Vec::new();
//! decompress_stream(&compressed[..], &mut restored).unwrap();
//! assert_eq!(restored, b"mississippi");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod decode;
pub mod encode;
pub mod format;
pub mod frequency;
pub mod heap;
pub mod tree;

// Re-exports
pub use decode::{
    DecompressReport, HuffmanDecoder, decompress, decompress_channels, decompress_stream,
    read_header,
};
pub use encode::{CompressReport, HuffmanEncoder, compress, compress_channels, compress_stream};
pub use format::{EOF_SYMBOL, Header, MAGIC, MAX_CODE_BITS, MAX_SYMBOLS, SUFFIX};
pub use frequency::FrequencyTable;
pub use heap::{MinHeap, Weighted};
pub use tree::{Code, CodeTable, HuffmanTree, Node, NodeId, Symbol};
