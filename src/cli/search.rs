use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::cli::{delimited_writer, OutputFormat, OutputSink};
use crate::core::config::SearchConfig;
use crate::core::symbol::{encode_sequence, EncodedSequence};
use crate::core::types::{QueryRecord, ResultRow};
use crate::corpus::compute::{available_compute_units, resolve_shard_count};
use crate::corpus::shard::{CorpusError, CorpusShardSet};
use crate::matching::orchestrator::{Orchestrator, SearchOutcome};
use crate::parsing::fasta::read_records;
use crate::utils::validation::{filter_uniform_length, is_unambiguous};

/// Header of the delimited result formats
pub const RESULT_HEADER: [&str; 5] = [
    "Query_ID",
    "Degenerate_Pattern",
    "Ambiguous_Positions",
    "Match_Count",
    "Percent_Hit",
];

#[derive(Args)]
pub struct SearchArgs {
    /// Query oligos (FASTA, optionally gzipped)
    #[arg(required = true)]
    pub queries: PathBuf,

    /// Master corpus of fixed-length sequences (FASTA, optionally gzipped)
    #[arg(required = true)]
    pub corpus: PathBuf,

    /// Bases kept fixed at each end of a query [default: 1]
    #[arg(long)]
    pub flanking_size: Option<usize>,

    /// Number of wildcard positions per pattern [default: 3]
    #[arg(short = 'k', long)]
    pub num_ambiguities: Option<usize>,

    /// Number of patterns reported per query [default: 5]
    #[arg(short = 'n', long)]
    pub top_n: Option<usize>,

    /// Number of corpus shards (defaults to all available compute units)
    #[arg(long)]
    pub shards: Option<usize>,

    /// Number of concurrent query workers (defaults to available parallelism)
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// JSON file with search parameters; command-line flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write results to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Corpus facts reported alongside results
struct CorpusSummary<'a> {
    path: &'a Path,
    sequences: usize,
    sequence_length: usize,
    shards: usize,
}

/// Execute search subcommand
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the output cannot be
/// opened, an input cannot be read, or the corpus cannot be built.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SearchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;

    // Fail on an unwritable destination before any work is done
    let mut sink = OutputSink::open(args.output.as_deref())?;

    let corpus = load_corpus(&args.corpus, config.shards)?;
    let queries = read_records(&args.queries)
        .with_context(|| format!("Cannot read queries from {}", args.queries.display()))?;

    if verbose {
        eprintln!(
            "Loaded {} queries; corpus of {} sequences (length {}) in {} shard(s)",
            queries.len(),
            corpus.total_sequences(),
            corpus.sequence_length(),
            corpus.shard_count()
        );
    }

    let workers = config
        .workers
        .unwrap_or_else(|| available_compute_units().max(1));
    let outcome = Orchestrator::new(&corpus, config.params(), workers).run(&queries)?;

    let summary = CorpusSummary {
        path: &args.corpus,
        sequences: corpus.total_sequences(),
        sequence_length: corpus.sequence_length(),
        shards: corpus.shard_count(),
    };

    match format {
        OutputFormat::Text => write_text_results(&mut sink, &outcome)?,
        OutputFormat::Json => write_json_results(&mut sink, &outcome, &config, &summary)?,
        OutputFormat::Tsv | OutputFormat::Csv => {
            let delimiter = format.delimiter().unwrap_or(b',');
            write_delimited_results(&mut sink, &outcome.rows, delimiter)?;
        }
    }
    sink.commit()?;

    print_summary(&outcome, &queries);
    Ok(())
}

/// Defaults, overlaid by the config file, overlaid by flags
fn resolve_config(args: &SearchArgs) -> anyhow::Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::load_from_file(path)
            .with_context(|| format!("Cannot load config {}", path.display()))?,
        None => SearchConfig::default(),
    };

    if let Some(v) = args.flanking_size {
        config.flanking_size = v;
    }
    if let Some(v) = args.num_ambiguities {
        config.num_ambiguities = v;
    }
    if let Some(v) = args.top_n {
        config.top_n = v;
    }
    if args.shards.is_some() {
        config.shards = args.shards;
    }
    if args.threads.is_some() {
        config.workers = args.threads;
    }

    config.validate()?;
    Ok(config)
}

/// Read, length-filter, encode and shard the master corpus
pub(crate) fn load_corpus(path: &Path, shards: Option<usize>) -> anyhow::Result<CorpusShardSet> {
    let records = read_records(path)
        .with_context(|| format!("Cannot read corpus from {}", path.display()))?;

    let filter = filter_uniform_length(records).ok_or(CorpusError::EmptyCorpus)?;
    if !filter.dropped.is_empty() {
        warn!(
            "Dropped {} corpus sequence(s) whose length differs from {} (first: {})",
            filter.dropped.len(),
            filter.length,
            filter.dropped[0]
        );
    }

    let ambiguous = filter
        .kept
        .iter()
        .filter(|r| !is_unambiguous(&r.sequence))
        .count();
    if ambiguous > 0 {
        info!("{ambiguous} corpus sequence(s) contain non-ACGT symbols");
    }

    let encoded: Vec<EncodedSequence> = filter
        .kept
        .iter()
        .map(|r| encode_sequence(&r.sequence))
        .collect();

    let shard_count = resolve_shard_count(shards, available_compute_units());
    Ok(CorpusShardSet::build(&encoded, shard_count)?)
}

fn write_text_results(sink: &mut dyn Write, outcome: &SearchOutcome) -> anyhow::Result<()> {
    if outcome.rows.is_empty() {
        writeln!(sink, "No results.")?;
        return Ok(());
    }

    let id_width = outcome
        .rows
        .iter()
        .map(|r| r.query_id.len())
        .max()
        .unwrap_or(0)
        .max("Query".len());
    let pattern_width = outcome
        .rows
        .iter()
        .map(|r| r.pattern.chars().count())
        .max()
        .unwrap_or(0)
        .max("Pattern".len());

    writeln!(
        sink,
        "{:<id_width$}  {:<pattern_width$}  {:<12}  {:>10}  {:>7}",
        "Query", "Pattern", "Positions", "Count", "% Hit"
    )?;
    writeln!(sink, "{}", "-".repeat(id_width + pattern_width + 41))?;
    for row in &outcome.rows {
        writeln!(
            sink,
            "{:<id_width$}  {:<pattern_width$}  {:<12}  {:>10}  {:>7.2}",
            row.query_id, row.pattern, row.positions, row.count, row.percent_hit
        )?;
    }
    Ok(())
}

fn write_json_results(
    sink: &mut dyn Write,
    outcome: &SearchOutcome,
    config: &SearchConfig,
    corpus: &CorpusSummary<'_>,
) -> anyhow::Result<()> {
    let results: Vec<serde_json::Value> = outcome
        .rows
        .iter()
        .map(|r| {
            serde_json::json!({
                "query_id": r.query_id,
                "pattern": r.pattern,
                "positions": r.positions,
                "count": r.count,
                "percent_hit": r.percent_hit,
            })
        })
        .collect();

    let failed: Vec<serde_json::Value> = outcome
        .failed
        .iter()
        .map(|f| serde_json::json!({ "query_id": f.query_id, "message": f.message }))
        .collect();

    let output = serde_json::json!({
        "corpus": {
            "path": corpus.path.display().to_string(),
            "sequences": corpus.sequences,
            "sequence_length": corpus.sequence_length,
            "shards": corpus.shards,
        },
        "parameters": {
            "flanking_size": config.flanking_size,
            "num_ambiguities": config.num_ambiguities,
            "top_n": config.top_n,
        },
        "summary": {
            "queries": outcome.total_queries(),
            "completed": outcome.completed,
            "skipped": outcome.skipped.len(),
            "failed": outcome.failed.len(),
        },
        "skipped": outcome.skipped,
        "failed": failed,
        "results": results,
    });

    writeln!(sink, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn write_delimited_results(
    sink: &mut dyn Write,
    rows: &[ResultRow],
    delimiter: u8,
) -> anyhow::Result<()> {
    let mut writer = delimited_writer(sink, delimiter, &RESULT_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_summary(outcome: &SearchOutcome, queries: &[QueryRecord]) {
    eprintln!(
        "Processed {} queries: {} completed, {} skipped (too short), {} failed; {} result rows",
        queries.len(),
        outcome.completed,
        outcome.skipped.len(),
        outcome.failed.len(),
        outcome.rows.len()
    );
    if !outcome.is_complete() {
        eprintln!("Failed queries were excluded from the results:");
        for failure in &outcome.failed {
            eprintln!("  failed: {}: {}", failure.query_id, failure.message);
        }
    }
}
