//! Encoded, sharded corpus storage.
//!
//! The master sequence set is encoded once and split into contiguous,
//! disjoint shards, one per compute unit. The resulting
//! [`CorpusShardSet`](shard::CorpusShardSet) is immutable and is passed by
//! reference to every matching call.
//!
//! ## Example
//!
//! ```rust
//! use oligo_solver::core::symbol::encode_sequence;
//! use oligo_solver::corpus::shard::CorpusShardSet;
//!
//! let rows: Vec<_> = ["ACGTAC", "ACGTAG", "TTGTAC"]
//!     .iter()
//!     .map(|s| encode_sequence(s))
//!     .collect();
//!
//! let corpus = CorpusShardSet::build(&rows, 2).unwrap();
//! assert_eq!(corpus.total_sequences(), 3);
//! assert_eq!(corpus.shards()[1].row_count(), 2);
//! ```

pub mod compute;
pub mod shard;
