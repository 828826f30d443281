//! # oligo-solver
//!
//! A library for ranking degenerate oligo variants by how many sequences of a
//! large corpus they match exactly.
//!
//! Given a query oligo, every combination of `k` positions inside its
//! searchable window (the query minus `flanking_size` bases at each end) is
//! replaced with a wildcard. Each resulting pattern is counted against a
//! sharded, read-only corpus of fixed-length sequences, and the `top_n`
//! patterns with the most hits are reported. Thousands of queries are
//! analyzed concurrently on a bounded worker pool.
//!
//! ## Features
//!
//! - **Masked-equality kernel**: wildcard pattern positions match anything,
//!   fixed positions require exact equality
//! - **Sharded corpus**: counts are summed across disjoint shards and are
//!   independent of the shard layout
//! - **Deterministic ranking**: stable sort by count, ties in lexicographic
//!   order of wildcard positions
//! - **Isolated failures**: a failing query is logged and excluded; the run continues
//!
//! ## Example
//!
//! ```rust
//! use oligo_solver::{CorpusShardSet, Orchestrator, QueryRecord, SearchParams};
//! use oligo_solver::core::symbol::encode_sequence;
//!
//! let rows: Vec<_> = ["ACGTAC", "ACGTAG", "TTGTAC", "ACGAAC", "GGGGGG"]
//!     .iter()
//!     .map(|s| encode_sequence(s))
//!     .collect();
//! let corpus = CorpusShardSet::build(&rows, 2).unwrap();
//!
//! let params = SearchParams { flanking_size: 1, num_ambiguities: 1, top_n: 5 };
//! let queries = vec![QueryRecord::new("q1", "ACGTAC")];
//! let outcome = Orchestrator::new(&corpus, params, 4).run(&queries).unwrap();
//!
//! for row in &outcome.rows {
//!     println!("{}\t{}\t{}\t{}", row.query_id, row.pattern, row.positions, row.count);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Alphabet, records, result rows and configuration
//! - [`corpus`]: Corpus encoding and sharding
//! - [`matching`]: Kernel, enumeration, per-query analysis and orchestration
//! - [`parsing`]: FASTA record reader
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod corpus;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::config::{SearchConfig, SearchParams};
pub use crate::core::types::{AmbiguitySet, QueryRecord, ResultRow, SequenceRecord};
pub use corpus::shard::CorpusShardSet;
pub use matching::analyzer::{MatchResult, QueryAnalyzer};
pub use matching::orchestrator::{Orchestrator, SearchOutcome};
