use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use huffpack::{analyze_frequencies, CodeTable, HuffmanCodec};
use log::info;

#[derive(Parser, Debug)]
#[command(version, about = "Huffman compression for files", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file into a container.
    Compress {
        input: PathBuf,

        #[arg(short, long, default_value = "compressed.bin")]
        output: PathBuf,

        /// Print the code assigned to each byte.
        #[arg(long)]
        show_codes: bool,
    },
    /// Restore a file from a container.
    Decompress {
        #[arg(default_value = "compressed.bin")]
        input: PathBuf,

        #[arg(short, long, default_value = "decompressed.txt")]
        output: PathBuf,
    },
    /// Compress, decompress and compare against the input.
    Roundtrip {
        input: PathBuf,

        #[arg(long, default_value = "compressed.bin")]
        compressed: PathBuf,

        #[arg(long, default_value = "decompressed.txt")]
        output: PathBuf,
    },
    /// Print the code table for a file without writing anything.
    Codes { input: PathBuf },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn print_codes(table: &CodeTable) {
    for (symbol, code) in table.iter() {
        println!("{:?}: {}", symbol as char, code);
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn show_codes(input: &Path) -> Result<()> {
    let data = read_file(input)?;
    if analyze_frequencies(&data).is_empty() {
        info!("{} is empty, no codes", input.display());
        return Ok(());
    }
    let codec = HuffmanCodec::from_bytes(&data)?;
    print_codes(codec.code_table());
    Ok(())
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Compress {
            input,
            output,
            show_codes: codes,
        } => {
            if codes {
                show_codes(&input)?;
            }
            HuffmanCodec::compress_file(&input, &output)
                .with_context(|| format!("compressing {}", input.display()))?;
        }
        Command::Decompress { input, output } => {
            HuffmanCodec::decompress_file(&input, &output)
                .with_context(|| format!("decompressing {}", input.display()))?;
        }
        Command::Roundtrip {
            input,
            compressed,
            output,
        } => {
            HuffmanCodec::compress_file(&input, &compressed)
                .with_context(|| format!("compressing {}", input.display()))?;
            HuffmanCodec::decompress_file(&compressed, &output)
                .with_context(|| format!("decompressing {}", compressed.display()))?;

            let original = read_file(&input)?;
            let restored = read_file(&output)?;
            if original != restored {
                bail!(
                    "{} does not match {} after roundtrip",
                    output.display(),
                    input.display()
                );
            }
            info!("roundtrip ok: {} bytes", original.len());
        }
        Command::Codes { input } => show_codes(&input)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("restored.txt");
        let err = read_file(&missing).unwrap_err();
        assert!(format!("{err:#}").contains("restored.txt"));
    }
}
