//! Utility functions for the CLI.

use dialoguer::Confirm;
use filetime::FileTime;
use hcpak_huffman::SUFFIX;
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

/// Create a byte progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// Whether `path` ends in the compressed-file suffix.
pub fn has_suffix(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SUFFIX)
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Output name for compressing `input`: `input` plus `.hc`.
pub fn compressed_path(input: &Path, force: bool) -> Result<PathBuf, String> {
    if has_suffix(input) && !force {
        return Err("File already compressed, refusing to compress.".to_string());
    }
    Ok(append_suffix(input, SUFFIX))
}

/// Output name for decompressing `input`: `input` without `.hc`, or
/// `input.out` when forced on a name without the suffix.
pub fn decompressed_path(input: &Path, force: bool) -> Result<PathBuf, String> {
    if has_suffix(input) {
        return Ok(input.with_extension(""));
    }
    if force {
        return Ok(append_suffix(input, "out"));
    }
    Err("Input file has unknown suffix, refusing to decompress.".to_string())
}

/// Make sure `output` may be written.
///
/// An existing file is only replaced with `force`, or after the user agrees
/// on an interactive terminal.
pub fn check_output(output: &Path, force: bool) -> Result<(), String> {
    if force || !output.exists() {
        return Ok(());
    }

    if io::stdin().is_terminal() && io::stderr().is_terminal() {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists; overwrite?", output.display()))
            .default(false)
            .interact()
            .map_err(|e| e.to_string())?;
        if overwrite {
            return Ok(());
        }
    }

    Err(format!("{} already exists, not overwritten.", output.display()))
}

/// Give `output` the permissions and timestamps of `input`, then remove
/// `input` unless it is kept.
pub fn finish_in_place(input: &Path, output: &Path, keep: bool) -> io::Result<()> {
    let metadata = fs::metadata(input)?;
    filetime::set_file_times(
        output,
        FileTime::from_last_access_time(&metadata),
        FileTime::from_last_modification_time(&metadata),
    )?;
    fs::set_permissions(output, metadata.permissions())?;

    if !keep {
        fs::remove_file(input)?;
    }
    Ok(())
}

/// Format a byte count for humans.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
