//! List command implementation.

use super::CmdResult;
use crate::utils::format_size;
use hcpak_huffman::{Header, read_header};
use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;

/// JSON serializable table entry.
#[derive(Debug, Serialize)]
struct SymbolJson {
    byte: u8,
    count: u32,
}

/// JSON output for a compressed file header.
#[derive(Debug, Serialize)]
struct HeaderJson {
    file: String,
    symbols: usize,
    original_size: u64,
    compressed_size: u64,
    header_size: usize,
    ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequencies: Option<Vec<SymbolJson>>,
}

impl HeaderJson {
    fn new(path: &Path, header: &Header, compressed_size: u64, verbose: bool) -> Self {
        Self {
            file: path.display().to_string(),
            symbols: header.symbol_count(),
            original_size: header.original_len(),
            compressed_size,
            header_size: header.encoded_len(),
            ratio: ratio(header.original_len(), compressed_size),
            frequencies: verbose.then(|| {
                header
                    .entries()
                    .iter()
                    .map(|&(byte, count)| SymbolJson { byte, count })
                    .collect()
            }),
        }
    }
}

fn ratio(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}

fn printable(byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        format!("'{}'", byte as char)
    } else {
        String::new()
    }
}

/// Print the header summary of a compressed file.
pub fn cmd_list(input: &Path, json: bool, verbose: bool) -> CmdResult {
    let file = File::open(input).map_err(|e| format!("{}: {}", input.display(), e))?;
    let header = read_header(file)?;
    let compressed_size = fs::metadata(input)?.len();

    if json {
        let output = HeaderJson::new(input, &header, compressed_size, verbose);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let original = header.original_len();
    println!(
        "{:>10} {:>10} {:>6} {:>7}  Name",
        "Original", "Compressed", "Ratio", "Symbols"
    );
    println!("{}", "-".repeat(60));
    println!(
        "{:>10} {:>10} {:>5.1}% {:>7}  {}",
        original,
        compressed_size,
        ratio(original, compressed_size),
        header.symbol_count(),
        input.display()
    );

    if verbose {
        println!();
        println!(
            "Header: {} ({} table entries)",
            format_size(header.encoded_len() as u64),
            header.symbol_count()
        );
        println!("{:>6} {:>10}", "Byte", "Count");
        for &(byte, count) in header.entries() {
            println!("{:>6} {:>10}  {}", format!("{byte:#04x}"), count, printable(byte));
        }
    }

    Ok(())
}
