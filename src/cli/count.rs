use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::cli::search::load_corpus;
use crate::cli::{delimited_writer, OutputFormat, OutputSink};
use crate::core::symbol::encode_sequence;
use crate::core::types::percent_hit;
use crate::matching::kernel::{count_corpus, CompiledPattern};
use crate::utils::validation::normalize_sequence;

#[derive(Args)]
pub struct CountArgs {
    /// Master corpus of fixed-length sequences (FASTA, optionally gzipped)
    #[arg(required = true)]
    pub corpus: PathBuf,

    /// Degenerate patterns; any character other than A, C, G, T is a wildcard
    #[arg(required = true, num_args = 1..)]
    pub patterns: Vec<String>,

    /// Number of corpus shards (defaults to all available compute units)
    #[arg(long)]
    pub shards: Option<usize>,

    /// Write results to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct PatternCount {
    #[serde(rename = "Pattern")]
    pattern: String,

    #[serde(rename = "Match_Count")]
    count: u64,

    #[serde(rename = "Percent_Hit")]
    percent_hit: String,
}

/// Execute count subcommand
///
/// # Errors
///
/// Returns an error if the corpus cannot be loaded, a pattern length differs
/// from the corpus sequence length, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CountArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut sink = OutputSink::open(args.output.as_deref())?;
    let corpus = load_corpus(&args.corpus, args.shards)?;

    if verbose {
        eprintln!(
            "Corpus: {} sequences (length {}) in {} shard(s)",
            corpus.total_sequences(),
            corpus.sequence_length(),
            corpus.shard_count()
        );
    }

    let mut counts = Vec::with_capacity(args.patterns.len());
    for raw in &args.patterns {
        let pattern = normalize_sequence(raw);
        let compiled = CompiledPattern::new(&encode_sequence(&pattern));
        let count = count_corpus(&corpus, &compiled)
            .with_context(|| format!("Cannot count pattern '{raw}'"))?;
        let percent = percent_hit(count, corpus.total_sequences());
        counts.push(PatternCount {
            pattern,
            count,
            percent_hit: format!("{percent:.2}"),
        });
    }

    match format {
        OutputFormat::Text => {
            for c in &counts {
                writeln!(sink, "{}\t{}\t{}%", c.pattern, c.count, c.percent_hit)?;
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "corpus_sequences": corpus.total_sequences(),
                "patterns": counts
                    .iter()
                    .map(|c| serde_json::json!({
                        "pattern": c.pattern,
                        "count": c.count,
                        "percent_hit": percent_hit(c.count, corpus.total_sequences()),
                    }))
                    .collect::<Vec<_>>(),
            });
            writeln!(sink, "{}", serde_json::to_string_pretty(&output)?)?;
        }
        OutputFormat::Tsv | OutputFormat::Csv => {
            let delimiter = format.delimiter().unwrap_or(b',');
            let mut writer = delimited_writer(
                &mut sink,
                delimiter,
                &["Pattern", "Match_Count", "Percent_Hit"],
            )?;
            for c in &counts {
                writer.serialize(c)?;
            }
            writer.flush()?;
        }
    }

    sink.commit()?;
    Ok(())
}
