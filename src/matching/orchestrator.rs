use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::core::config::SearchParams;
use crate::core::types::{QueryRecord, ResultRow};
use crate::corpus::shard::CorpusShardSet;
use crate::matching::analyzer::{AnalyzeError, MatchResult, QueryAnalyzer};

/// Completed tasks between progress reports
pub const PROGRESS_INTERVAL: usize = 100;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Worker pool needs at least one worker")]
    NoWorkers,

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A query whose analysis failed and was excluded from the results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFailure {
    pub query_id: String,
    pub message: String,
}

/// Aggregate of a full search run
#[derive(Debug, Default)]
pub struct SearchOutcome {
    /// Rows of every completed query, in query input order
    pub rows: Vec<ResultRow>,

    /// Queries analyzed successfully (including those with no results)
    pub completed: usize,

    /// Queries too short for the requested ambiguities
    pub skipped: Vec<String>,

    pub failed: Vec<QueryFailure>,
}

impl SearchOutcome {
    #[must_use]
    pub fn total_queries(&self) -> usize {
        self.completed + self.skipped.len() + self.failed.len()
    }

    /// True when every query either completed or was skipped
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

enum TaskOutcome {
    Completed(Vec<ResultRow>),
    Skipped,
    Failed(String),
}

/// Runs one independent analysis per query on a fixed-size worker pool
pub struct Orchestrator<'a> {
    corpus: &'a CorpusShardSet,
    params: SearchParams,
    workers: usize,
}

impl<'a> Orchestrator<'a> {
    pub fn new(corpus: &'a CorpusShardSet, params: SearchParams, workers: usize) -> Self {
        Self {
            corpus,
            params,
            workers,
        }
    }

    /// Analyze every query and collect the results.
    ///
    /// Per-query failures, including panics, are logged and recorded in the
    /// outcome; they never abort the run.
    ///
    /// # Errors
    ///
    /// Returns `OrchestratorError::NoWorkers` if the pool size is zero, or
    /// `OrchestratorError::ThreadPool` if the pool cannot be created.
    pub fn run(&self, queries: &[QueryRecord]) -> Result<SearchOutcome, OrchestratorError> {
        let analyzer = QueryAnalyzer::new(self.corpus, self.params);
        self.run_with(queries, |query| analyzer.try_analyze(query))
    }

    /// Run `task` once per query on the worker pool
    fn run_with<F>(&self, queries: &[QueryRecord], task: F) -> Result<SearchOutcome, OrchestratorError>
    where
        F: Fn(&QueryRecord) -> Result<Vec<MatchResult>, AnalyzeError> + Sync,
    {
        if self.workers == 0 {
            return Err(OrchestratorError::NoWorkers);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("oligo-worker-{i}"))
            .build()?;

        info!(
            "Starting analysis of {} queries on {} worker(s)",
            queries.len(),
            self.workers
        );

        let finished = AtomicUsize::new(0);
        let total = queries.len();

        let outcomes: Vec<TaskOutcome> = pool.install(|| {
            queries
                .par_iter()
                .map(|query| {
                    let outcome = self.run_task(&task, query);
                    let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
                    if done % PROGRESS_INTERVAL == 0 || done == total {
                        info!("Completed {done}/{total} queries");
                    }
                    outcome
                })
                .collect()
        });

        let mut summary = SearchOutcome::default();
        for (query, outcome) in queries.iter().zip(outcomes) {
            match outcome {
                TaskOutcome::Completed(rows) => {
                    summary.completed += 1;
                    summary.rows.extend(rows);
                }
                TaskOutcome::Skipped => summary.skipped.push(query.id.clone()),
                TaskOutcome::Failed(message) => summary.failed.push(QueryFailure {
                    query_id: query.id.clone(),
                    message,
                }),
            }
        }

        info!(
            "Analysis complete: {} completed, {} skipped, {} failed, {} result rows",
            summary.completed,
            summary.skipped.len(),
            summary.failed.len(),
            summary.rows.len()
        );

        Ok(summary)
    }

    fn run_task<F>(&self, task: &F, query: &QueryRecord) -> TaskOutcome
    where
        F: Fn(&QueryRecord) -> Result<Vec<MatchResult>, AnalyzeError>,
    {
        let result = panic::catch_unwind(AssertUnwindSafe(|| task(query)));
        let total = self.corpus.total_sequences();

        match result {
            Ok(Ok(results)) => TaskOutcome::Completed(
                results
                    .iter()
                    .map(|r| r.to_row(&query.id, total))
                    .collect(),
            ),
            Ok(Err(AnalyzeError::QueryTooShort(e))) => {
                warn!("Query {} (length {}) skipped: {e}", query.id, query.len());
                TaskOutcome::Skipped
            }
            Ok(Err(e)) => {
                error!("Query {} failed: {e}", query.id);
                TaskOutcome::Failed(e.to_string())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("Query {} panicked: {message}", query.id);
                TaskOutcome::Failed(message)
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
