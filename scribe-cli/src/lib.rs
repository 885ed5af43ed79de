//! # Scribe CLI
//!
//! Reads notebook blocks as JSON and writes an Excalidraw drawing or an
//! Obsidian note.
//!
//! ## Usage
//!
//! ```bash
//! scribe page.json > page.excalidraw
//! scribe page.json --format obsidian -o "Page.excalidraw.md"
//! cat page.json | scribe --seed 7 --strict
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `ConvertConfig` - What to read, what to produce, where to write it
//! - `convert` / `run` - Translation and output, kept out of `main` for tests

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use scribe_core::{obsidian, Block, RandomGenerator, Translation, Translator};

/// Output flavor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain `.excalidraw` JSON.
    #[default]
    Excalidraw,
    /// Obsidian note for the Excalidraw plugin.
    Obsidian,
}

/// Command-line arguments for scribe.
#[derive(Debug, Clone, Parser)]
#[command(name = "scribe")]
#[command(about = "Convert notebook blocks to Excalidraw drawings and Obsidian notes")]
#[command(version)]
pub struct CliArgs {
    /// JSON file with an array of blocks (`-` or omitted reads stdin)
    pub input: Option<PathBuf>,

    /// Write output here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Excalidraw, env = "SCRIBE_FORMAT")]
    pub format: OutputFormat,

    /// Seed for reproducible element ids and seeds
    #[arg(long, env = "SCRIBE_SEED")]
    pub seed: Option<u64>,

    /// Fail if any block cannot be converted
    #[arg(long)]
    pub strict: bool,
}

/// Where blocks are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Standard input.
    Stdin,
    /// A file.
    File(PathBuf),
}

/// Conversion configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Block source.
    pub input: Input,
    /// Output file; `None` writes to stdout.
    pub output: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Generator seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Abort on the first failed block instead of dropping it.
    pub strict: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertConfig {
    /// Create a configuration reading stdin and writing Excalidraw JSON to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: Input::Stdin,
            output: None,
            format: OutputFormat::Excalidraw,
            seed: None,
            strict: false,
        }
    }
}

impl From<CliArgs> for ConvertConfig {
    fn from(args: CliArgs) -> Self {
        let input = match args.input {
            Some(path) if path.as_os_str() != "-" => Input::File(path),
            _ => Input::Stdin,
        };
        Self {
            input,
            output: args.output,
            format: args.format,
            seed: args.seed,
            strict: args.strict,
        }
    }
}

/// Parse a JSON array of blocks.
///
/// # Errors
///
/// Returns an error if the text is not a valid block array.
pub fn parse_blocks(json: &str) -> anyhow::Result<Vec<Block>> {
    serde_json::from_str(json).context("Input is not a JSON array of blocks")
}

/// Translate blocks and render them in the configured format.
///
/// # Errors
///
/// Returns an error if a block fails in strict mode or rendering fails.
pub fn convert(blocks: &[Block], config: &ConvertConfig) -> anyhow::Result<String> {
    let translation = translate(blocks, config.seed);
    tracing::info!(
        "Converted {} of {} blocks ({} skipped, {} failed)",
        translation.document.element_count(),
        blocks.len(),
        translation.skipped,
        translation.failures.len()
    );

    let document = if config.strict {
        translation.into_result()?
    } else {
        if !translation.is_complete() {
            tracing::warn!(
                "{} block(s) dropped; use --strict to fail instead",
                translation.failures.len()
            );
        }
        translation.into_document()
    };

    let rendered = match config.format {
        OutputFormat::Excalidraw => document.to_json()?,
        OutputFormat::Obsidian => obsidian::wrap(&document)?,
    };
    Ok(rendered)
}

fn translate(blocks: &[Block], seed: Option<u64>) -> Translation {
    match seed {
        Some(seed) => Translator::new(RandomGenerator::seeded(seed)).translate(blocks),
        None => scribe_core::translate(blocks),
    }
}

/// Read, convert and write according to `config`.
///
/// # Errors
///
/// Returns an error if reading, conversion or writing fails.
pub fn run(config: &ConvertConfig) -> anyhow::Result<()> {
    let json = match &config.input {
        Input::File(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        Input::Stdin => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let blocks = parse_blocks(&json)?;
    let rendered = convert(&blocks, config)?;

    match &config.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = CliArgs::try_parse_from(["scribe"]).expect("should parse");
        let config = ConvertConfig::from(args);
        assert_eq!(config, ConvertConfig::new());
    }

    #[test]
    fn test_args_full() {
        let args = CliArgs::try_parse_from([
            "scribe",
            "page.json",
            "--format",
            "obsidian",
            "-o",
            "Page.excalidraw.md",
            "--seed",
            "9",
            "--strict",
        ])
        .expect("should parse");
        let config = ConvertConfig::from(args);

        assert_eq!(config.input, Input::File(PathBuf::from("page.json")));
        assert_eq!(config.output, Some(PathBuf::from("Page.excalidraw.md")));
        assert_eq!(config.format, OutputFormat::Obsidian);
        assert_eq!(config.seed, Some(9));
        assert!(config.strict);
    }

    #[test]
    fn test_dash_reads_stdin() {
        let args = CliArgs::try_parse_from(["scribe", "-"]).expect("should parse");
        assert_eq!(ConvertConfig::from(args).input, Input::Stdin);
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(CliArgs::try_parse_from(["scribe", "--format", "svg"]).is_err());
    }

    #[test]
    fn test_parse_blocks_error_has_context() {
        let err = parse_blocks("{}").expect_err("object is not an array");
        assert!(err.to_string().contains("JSON array of blocks"));
    }
}
