//! Decompress command implementation.

use super::{CmdResult, FileOptions};
use crate::utils::{
    check_output, create_progress_bar, decompressed_path, finish_in_place, format_size,
};
use hcpak_huffman::decompress_stream;
use std::fs::{self, File};
use std::path::Path;

/// Decompress `input.hc` into `input`, removing `input.hc` unless kept.
///
/// On failure the input is left alone and the partial output stays on disk.
pub fn cmd_decompress(input: &Path, options: &FileOptions) -> CmdResult {
    let output = decompressed_path(input, options.force)?;
    check_output(&output, options.force)?;

    let len = fs::metadata(input)
        .map_err(|e| format!("{}: {}", input.display(), e))?
        .len();
    let reader = File::open(input).map_err(|e| format!("{}: {}", input.display(), e))?;
    let writer = File::create(&output).map_err(|e| format!("{}: {}", output.display(), e))?;

    let pb = create_progress_bar(len, options.progress);
    pb.set_message("decompressing");
    let result = decompress_stream(pb.wrap_read(reader), writer);
    pb.finish_and_clear();
    let report = result?;

    finish_in_place(input, &output, options.keep)?;

    if options.verbose {
        eprintln!(
            "Decompressing '{}' ... done, {:.1}% ({} -> {}).",
            input.display(),
            report.space_savings(),
            format_size(len),
            format_size(report.bytes_written)
        );
    }

    Ok(())
}
