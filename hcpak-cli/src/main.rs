//! hcpak - Huffman single-file compressor
//!
//! Compresses `FILE` into `FILE.hc` and back, in place, in the style of
//! `compress` and `gzip`.

mod commands;
mod logger;
mod utils;

use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::Shell;
use commands::{FileOptions, cmd_compress, cmd_decompress, cmd_list, cmd_test};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hcpak")]
#[command(
    author,
    version,
    about = "Compress or decompress files using Huffman's algorithm"
)]
#[command(long_about = "
Compress or decompress files using Huffman's algorithm.
Compression and decompression are done in place: the input file is
replaced by the output file unless --keep is given.

Examples:
  hcpak report.txt            # writes report.txt.hc, removes report.txt
  hcpak -d report.txt.hc      # writes report.txt, removes report.txt.hc
  hcpak -k report.txt         # keeps report.txt
  hcpak -t report.txt.hc      # checks integrity without writing files
  hcpak -l --json report.txt.hc
")]
struct Cli {
    /// File to compress or decompress
    #[arg(required_unless_present = "completions")]
    file: Option<PathBuf>,

    /// Decompress input file
    #[arg(short, long)]
    decompress: bool,

    /// Ignore the .hc suffix policy and overwrite existing output
    #[arg(short, long)]
    force: bool,

    /// Keep the input file
    #[arg(short, long)]
    keep: bool,

    /// Test compressed file integrity
    #[arg(short, long, conflicts_with_all = ["decompress", "list"])]
    test: bool,

    /// Show the header of a compressed file
    #[arg(short, long, conflicts_with = "decompress")]
    list: bool,

    /// Output the listing as JSON (machine-readable)
    #[arg(long, requires = "list")]
    json: bool,

    /// Show progress bar
    #[arg(short = 'P', long)]
    progress: bool,

    /// Verbose output (-v summary, -vv debug log, -vvv trace log)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "hcpak", &mut io::stdout());
        return;
    }

    logger::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> commands::CmdResult {
    let file = cli.file.as_deref().ok_or("no input file given")?;
    let options = FileOptions {
        force: cli.force,
        keep: cli.keep,
        progress: cli.progress,
        verbose: cli.verbose > 0,
    };

    if cli.list {
        cmd_list(file, cli.json, options.verbose)
    } else if cli.test {
        cmd_test(file, &options)
    } else if cli.decompress {
        cmd_decompress(file, &options)
    } else {
        cmd_compress(file, &options)
    }
}
