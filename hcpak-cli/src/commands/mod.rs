//! Command implementations for the hcpak CLI.

pub mod compress;
pub mod decompress;
pub mod list;

pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use list::cmd_list;
pub use test::cmd_test;

/// Options shared by the commands that read and write files.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileOptions {
    /// Ignore the suffix policy and overwrite existing output.
    pub force: bool,
    /// Keep the input file after success.
    pub keep: bool,
    /// Show a progress bar.
    pub progress: bool,
    /// Print a summary line per file.
    pub verbose: bool,
}

/// Error type of the command layer.
pub type CmdResult<T = ()> = Result<T, Box<dyn std::error::Error>>;
