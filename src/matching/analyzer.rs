use thiserror::Error;
use tracing::{debug, warn};

use crate::core::config::SearchParams;
use crate::core::symbol::{encode_sequence, WILDCARD_CHAR};
use crate::core::types::{percent_hit, AmbiguitySet, QueryRecord, ResultRow};
use crate::corpus::shard::CorpusShardSet;
use crate::matching::enumerate::{AmbiguityEnumerator, EnumerateError};
use crate::matching::kernel::{count_corpus, CompiledPattern, MatchError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error(transparent)]
    QueryTooShort(#[from] EnumerateError),

    #[error(transparent)]
    Match(#[from] MatchError),
}

/// One degenerate pattern and its corpus-wide hit count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Query text with `.` at each ambiguity position
    pub pattern: String,

    /// Wildcarded positions (0-based)
    pub ambiguity: AmbiguitySet,

    /// Number of corpus sequences the pattern matches
    pub count: u64,
}

impl MatchResult {
    /// Output row for this result, relative to a corpus of `total` sequences
    #[must_use]
    pub fn to_row(&self, query_id: &str, total: usize) -> ResultRow {
        ResultRow {
            query_id: query_id.to_string(),
            pattern: self.pattern.clone(),
            positions: self.ambiguity.to_string(),
            count: self.count,
            percent_hit: percent_hit(self.count, total),
        }
    }
}

/// Ranks the degenerate variants of a single query against a shared corpus
pub struct QueryAnalyzer<'a> {
    corpus: &'a CorpusShardSet,
    params: SearchParams,
}

impl<'a> QueryAnalyzer<'a> {
    pub fn new(corpus: &'a CorpusShardSet, params: SearchParams) -> Self {
        Self { corpus, params }
    }

    /// Top-N degenerate patterns for `query`, highest count first.
    ///
    /// A query too short to hold the requested ambiguities is skipped with a
    /// warning and yields no results.
    ///
    /// # Errors
    ///
    /// Returns `AnalyzeError::Match` if the query length differs from the
    /// corpus sequence length.
    pub fn analyze(&self, query: &QueryRecord) -> Result<Vec<MatchResult>, AnalyzeError> {
        match self.try_analyze(query) {
            Err(AnalyzeError::QueryTooShort(e)) => {
                warn!("Query {} (length {}) skipped: {e}", query.id, query.len());
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Like [`analyze`](Self::analyze), but reports a too-short query as an error.
    ///
    /// # Errors
    ///
    /// Returns `AnalyzeError::QueryTooShort` if the searchable window cannot
    /// hold the requested ambiguities, or `AnalyzeError::Match` on a length
    /// mismatch with the corpus.
    pub fn try_analyze(&self, query: &QueryRecord) -> Result<Vec<MatchResult>, AnalyzeError> {
        let chars: Vec<char> = query.sequence.chars().collect();
        let enumerator = AmbiguityEnumerator::new(
            chars.len(),
            self.params.flanking_size,
            self.params.num_ambiguities,
        )?;

        debug!(
            "Query {}: {} candidate patterns over window {:?}",
            query.id,
            enumerator.candidate_count(),
            enumerator.window()
        );

        let encoded = encode_sequence(&query.sequence);
        let mut counted: Vec<(AmbiguitySet, u64)> = Vec::new();

        for ambiguity in &enumerator {
            let pattern = CompiledPattern::new(&encoded.with_wildcards(ambiguity.positions()));
            let count = count_corpus(self.corpus, &pattern)?;
            counted.push((ambiguity, count));
        }

        // Stable: ties keep enumeration order
        counted.sort_by(|a, b| b.1.cmp(&a.1));
        counted.truncate(self.params.top_n);

        Ok(counted
            .into_iter()
            .map(|(ambiguity, count)| MatchResult {
                pattern: pattern_text(&chars, &ambiguity),
                ambiguity,
                count,
            })
            .collect())
    }
}

/// Query text with `.` at every ambiguity position
fn pattern_text(query: &[char], ambiguity: &AmbiguitySet) -> String {
    query
        .iter()
        .enumerate()
        .map(|(i, &c)| if ambiguity.contains(i) { WILDCARD_CHAR } else { c })
        .collect()
}
