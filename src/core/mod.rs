//! Core data types for degenerate oligo search.
//!
//! - [`Symbol`](symbol::Symbol), [`EncodedSequence`](symbol::EncodedSequence): the
//!   five-letter alphabet every sequence is encoded into before matching
//! - [`SequenceRecord`](types::SequenceRecord) / [`QueryRecord`](types::QueryRecord):
//!   `(id, sequence)` pairs supplied by a reader
//! - [`AmbiguitySet`](types::AmbiguitySet): wildcard positions of one pattern
//! - [`ResultRow`](types::ResultRow): one reported `(query, pattern, positions, count)` row
//! - [`SearchConfig`](config::SearchConfig): run parameters
//!
//! ## Alphabet
//!
//! | Input | Symbol |
//! |-------|--------|
//! | `A` `C` `G` `T` | the matching base |
//! | `.`, `N`, anything else | `Wildcard` |
//!
//! A wildcard in a pattern matches any corpus symbol. A wildcard in a corpus
//! row only matches a wildcard (or a wildcard pattern position).

pub mod config;
pub mod symbol;
pub mod types;
