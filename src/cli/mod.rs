//! Command-line interface for oligo-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **search**: Rank degenerate variants of every query oligo against a corpus
//! - **count**: Count corpus hits for explicit degenerate patterns
//!
//! ## Usage
//!
//! ```text
//! # Top 5 three-wildcard variants of each query, CSV report
//! oligo-solver search query_oligos.fasta master_oligos.fasta -f csv -o results.csv
//!
//! # Fewer wildcards, wider fixed flanks, explicit shard and worker counts
//! oligo-solver search queries.fa corpus.fa -k 2 --flanking-size 3 --shards 4 --threads 16
//!
//! # Verify a single degenerate oligo
//! oligo-solver count master_oligos.fasta ACG.ACGTTGCA.TGCAAT
//! ```

use std::fs::OpenOptions;
use std::io::{BufWriter, StdoutLock, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tempfile::NamedTempFile;

pub mod count;
pub mod search;

#[derive(Parser)]
#[command(name = "oligo-solver")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Rank degenerate oligo variants by exact-match hits against a sequence corpus")]
#[command(
    long_about = "oligo-solver searches a corpus of fixed-length sequences for degenerate variants of query oligos.\n\nFor every query it wildcards each combination of k positions inside the searchable window, counts the corpus sequences matching each resulting pattern, and reports the highest-scoring patterns."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank degenerate variants of query oligos against a corpus
    Search(search::SearchArgs),

    /// Count corpus hits for explicit degenerate patterns
    Count(count::CountArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
    Csv,
}

impl OutputFormat {
    /// Field delimiter for the delimited formats
    fn delimiter(self) -> Option<u8> {
        match self {
            Self::Tsv => Some(b'\t'),
            Self::Csv => Some(b','),
            Self::Text | Self::Json => None,
        }
    }
}

/// Destination for results.
///
/// File output is staged in a temporary file next to the target and only
/// renamed over it by [`commit`](Self::commit), so a failed run leaves any
/// existing file untouched.
pub struct OutputSink {
    inner: SinkInner,
}

enum SinkInner {
    Stdout(BufWriter<StdoutLock<'static>>),
    File {
        writer: BufWriter<NamedTempFile>,
        target: PathBuf,
    },
}

impl OutputSink {
    /// Open a file sink when `path` is given, stdout otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is not writable or no staging file can
    /// be created in its directory.
    pub fn open(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self {
                inner: SinkInner::Stdout(BufWriter::new(std::io::stdout().lock())),
            });
        };

        let context = || format!("Cannot create output file {}", path.display());
        if path.exists() {
            // Opened without truncation
            OpenOptions::new()
                .write(true)
                .open(path)
                .with_context(context)?;
        }
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staging = NamedTempFile::new_in(dir).with_context(context)?;

        Ok(Self {
            inner: SinkInner::File {
                writer: BufWriter::new(staging),
                target: path.to_path_buf(),
            },
        })
    }

    /// Flush everything written and, for file output, move it onto the target.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing or the final rename fails.
    pub fn commit(self) -> anyhow::Result<()> {
        match self.inner {
            SinkInner::Stdout(mut writer) => writer.flush().context("Failed to write results"),
            SinkInner::File { writer, target } => {
                let staging = writer
                    .into_inner()
                    .map_err(|e| e.into_error())
                    .context("Failed to write results")?;
                staging
                    .persist(&target)
                    .map_err(|e| e.error)
                    .with_context(|| format!("Cannot write output file {}", target.display()))?;
                Ok(())
            }
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            SinkInner::Stdout(w) => w.write(buf),
            SinkInner::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.inner {
            SinkInner::Stdout(w) => w.flush(),
            SinkInner::File { writer, .. } => writer.flush(),
        }
    }
}

/// Build a delimited writer that emits `header` before any record
fn delimited_writer<W: Write>(
    sink: W,
    delimiter: u8,
    header: &[&str],
) -> anyhow::Result<csv::Writer<W>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(sink);
    writer.write_record(header)?;
    Ok(writer)
}
