//! Degenerate pattern matching engine.
//!
//! - [`kernel`]: masked-equality count of one pattern over a shard, and the
//!   parallel sum over all shards
//! - [`enumerate`]: lexicographic enumeration of wildcard position sets
//! - [`analyzer`]: per-query ranking of every degenerate variant, top-N retention
//! - [`orchestrator`]: many independent query analyses on a bounded worker pool
//!
//! ## Matching Algorithm
//!
//! For a query of length L, `flanking_size` f and `num_ambiguities` k:
//!
//! 1. **Enumerate**: every k-subset of positions in `[f, L - f)`, in
//!    lexicographic order
//! 2. **Substitute**: wildcard the query at those positions to form a pattern
//! 3. **Count**: a corpus row matches when it equals the pattern at every
//!    non-wildcard position; per-shard counts are summed
//! 4. **Rank**: stable sort by count descending, keep the first `top_n`
//!
//! Ranking is independent of shard count and worker count.
//!
//! ## Example
//!
//! ```rust
//! use oligo_solver::core::config::SearchParams;
//! use oligo_solver::core::symbol::encode_sequence;
//! use oligo_solver::core::types::QueryRecord;
//! use oligo_solver::corpus::shard::CorpusShardSet;
//! use oligo_solver::matching::analyzer::QueryAnalyzer;
//!
//! let rows: Vec<_> = ["ACGTAC", "ACGTAG", "TTGTAC", "ACGAAC", "GGGGGG"]
//!     .iter()
//!     .map(|s| encode_sequence(s))
//!     .collect();
//! let corpus = CorpusShardSet::build(&rows, 2).unwrap();
//!
//! let params = SearchParams { flanking_size: 1, num_ambiguities: 1, top_n: 5 };
//! let analyzer = QueryAnalyzer::new(&corpus, params);
//! let results = analyzer.analyze(&QueryRecord::new("q1", "ACGTAC")).unwrap();
//!
//! assert_eq!(results[0].pattern, "ACG.AC");
//! assert_eq!(results[0].count, 2);
//! ```

pub mod analyzer;
pub mod enumerate;
pub mod kernel;
pub mod orchestrator;
