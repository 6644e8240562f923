//! Compress command implementation.

use super::{CmdResult, FileOptions};
use crate::utils::{
    check_output, compressed_path, create_progress_bar, finish_in_place, format_size,
};
use hcpak_core::HcpakError;
use hcpak_huffman::compress_stream;
use std::fs::{self, File};
use std::path::Path;

/// Compress `input` into `input.hc`, removing `input` unless kept.
pub fn cmd_compress(input: &Path, options: &FileOptions) -> CmdResult {
    let output = compressed_path(input, options.force)?;

    let metadata =
        fs::metadata(input).map_err(|e| format!("{}: {}", input.display(), e))?;
    if metadata.is_file() && metadata.len() == 0 {
        return Err(HcpakError::EmptyInput.into());
    }
    check_output(&output, options.force)?;

    let reader = File::open(input).map_err(|e| format!("{}: {}", input.display(), e))?;
    let writer = File::create(&output).map_err(|e| format!("{}: {}", output.display(), e))?;

    let pb = create_progress_bar(metadata.len(), options.progress);
    pb.set_message("compressing");
    let result = compress_stream(pb.wrap_read(reader), writer);
    pb.finish_and_clear();
    let report = result?;

    finish_in_place(input, &output, options.keep)?;

    if options.verbose {
        eprintln!(
            "Compressing '{}' ... done, {:.1}% ({} -> {}).",
            input.display(),
            report.space_savings(),
            format_size(report.original_bytes),
            format_size(report.compressed_bytes())
        );
    }

    Ok(())
}
