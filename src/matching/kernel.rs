use rayon::prelude::*;
use thiserror::Error;

use crate::core::symbol::{EncodedSequence, Symbol};
use crate::corpus::shard::{CorpusShard, CorpusShardSet};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("Pattern length {found} does not match corpus sequence length {expected}")]
    LengthMismatch { expected: usize, found: usize },
}

/// A pattern reduced to its fixed (non-wildcard) columns.
///
/// Wildcard columns are satisfied by every row, so a row matches exactly
/// when it agrees with the pattern at every fixed column.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    length: usize,
    fixed: Vec<(usize, Symbol)>,
}

impl CompiledPattern {
    #[must_use]
    pub fn new(pattern: &EncodedSequence) -> Self {
        let fixed = pattern
            .as_slice()
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_wildcard())
            .map(|(i, s)| (i, *s))
            .collect();
        Self {
            length: pattern.len(),
            fixed,
        }
    }

    fn len(&self) -> usize {
        self.length
    }

    #[inline]
    fn matches(&self, row: &[Symbol]) -> bool {
        self.fixed.iter().all(|&(col, sym)| row[col] == sym)
    }
}

/// Count the rows of one shard that satisfy `pattern` at every column
///
/// # Errors
///
/// Returns `MatchError::LengthMismatch` if the pattern length differs from
/// the shard row length.
pub fn count_matches(shard: &CorpusShard, pattern: &CompiledPattern) -> Result<u64, MatchError> {
    if pattern.len() != shard.width() {
        return Err(MatchError::LengthMismatch {
            expected: shard.width(),
            found: pattern.len(),
        });
    }
    Ok(shard.rows().filter(|row| pattern.matches(row)).count() as u64)
}

/// Corpus-wide hit count: the pattern is dispatched to every shard in
/// parallel and the partial counts are summed.
///
/// # Errors
///
/// Returns `MatchError::LengthMismatch` if the pattern length differs from
/// the corpus sequence length.
pub fn count_corpus(corpus: &CorpusShardSet, pattern: &CompiledPattern) -> Result<u64, MatchError> {
    if pattern.len() != corpus.sequence_length() {
        return Err(MatchError::LengthMismatch {
            expected: corpus.sequence_length(),
            found: pattern.len(),
        });
    }
    corpus
        .shards()
        .par_iter()
        .map(|shard| count_matches(shard, pattern))
        .try_reduce(|| 0, |a, b| Ok(a + b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::symbol::encode_sequence;
    use proptest::prelude::*;

    const CORPUS: [&str; 5] = ["ACGTAC", "ACGTAG", "TTGTAC", "ACGAAC", "GGGGGG"];

    fn build(seqs: &[&str], shards: usize) -> CorpusShardSet {
        let rows: Vec<EncodedSequence> = seqs.iter().map(|s| encode_sequence(s)).collect();
        CorpusShardSet::build(&rows, shards).unwrap()
    }

    fn compile(pattern: &str) -> CompiledPattern {
        CompiledPattern::new(&encode_sequence(pattern))
    }

    /// Reference scan comparing every column of every row
    fn naive_count(seqs: &[String], pattern: &str) -> u64 {
        let pattern = encode_sequence(pattern);
        seqs.iter()
            .filter(|s| {
                encode_sequence(s)
                    .as_slice()
                    .iter()
                    .zip(pattern.as_slice())
                    .all(|(r, p)| p.is_wildcard() || r == p)
            })
            .count() as u64
    }

    #[test]
    fn test_exact_pattern_matches_duplicates_only() {
        let corpus = build(&CORPUS, 1);
        assert_eq!(count_corpus(&corpus, &compile("ACGTAC")).unwrap(), 1);
        assert_eq!(count_corpus(&corpus, &compile("CCCCCC")).unwrap(), 0);

        let dup = build(&["ACGT", "ACGT", "ACGA"], 2);
        assert_eq!(count_corpus(&dup, &compile("ACGT")).unwrap(), 2);
    }

    #[test]
    fn test_wildcard_positions() {
        let corpus = build(&CORPUS, 2);
        assert_eq!(count_corpus(&corpus, &compile("ACG.AC")).unwrap(), 2);
        assert_eq!(count_corpus(&corpus, &compile("A.GTAC")).unwrap(), 1);
        assert_eq!(count_corpus(&corpus, &compile("..GTA.")).unwrap(), 3);
    }

    #[test]
    fn test_all_wildcards_match_everything() {
        let corpus = build(&CORPUS, 3);
        assert_eq!(count_corpus(&corpus, &compile("......")).unwrap(), 5);
        // N is a wildcard too
        assert_eq!(count_corpus(&corpus, &compile("NNNNNN")).unwrap(), 5);
    }

    #[test]
    fn test_corpus_wildcard_only_matches_pattern_wildcard() {
        let corpus = build(&["ANGT", "ACGT"], 1);
        assert_eq!(count_corpus(&corpus, &compile("ACGT")).unwrap(), 1);
        assert_eq!(count_corpus(&corpus, &compile("A.GT")).unwrap(), 2);
    }

    #[test]
    fn test_length_mismatch() {
        let corpus = build(&CORPUS, 2);
        let err = count_corpus(&corpus, &compile("ACGT")).unwrap_err();
        assert_eq!(
            err,
            MatchError::LengthMismatch {
                expected: 6,
                found: 4
            }
        );
        let err = count_matches(&corpus.shards()[0], &compile("ACGTACG")).unwrap_err();
        assert!(matches!(err, MatchError::LengthMismatch { found: 7, .. }));
    }

    #[test]
    fn test_empty_shard_counts_zero() {
        let corpus = build(&["AC", "GT"], 4);
        assert_eq!(count_matches(&corpus.shards()[0], &compile("..")).unwrap(), 0);
        assert_eq!(count_corpus(&corpus, &compile("..")).unwrap(), 2);
    }

    fn base() -> impl Strategy<Value = char> {
        prop_oneof![Just('A'), Just('C'), Just('G'), Just('T'), Just('N')]
    }

    fn pattern_char() -> impl Strategy<Value = char> {
        prop_oneof![Just('A'), Just('C'), Just('G'), Just('T'), Just('.')]
    }

    proptest! {
        #[test]
        fn prop_sharding_invariance(
            (seqs, pattern) in (1usize..8).prop_flat_map(|len| (
                prop::collection::vec(
                    prop::collection::vec(base(), len).prop_map(|v| v.into_iter().collect::<String>()),
                    1..40,
                ),
                prop::collection::vec(pattern_char(), len).prop_map(|v| v.into_iter().collect::<String>()),
            )),
            shards in 1usize..12,
        ) {
            let expected = naive_count(&seqs, &pattern);
            let refs: Vec<&str> = seqs.iter().map(String::as_str).collect();
            let compiled = compile(&pattern);

            let sharded = build(&refs, shards);
            prop_assert_eq!(count_corpus(&sharded, &compiled).unwrap(), expected);

            let per_shard: u64 = sharded
                .shards()
                .iter()
                .map(|s| count_matches(s, &compiled).unwrap())
                .sum();
            prop_assert_eq!(per_shard, expected);
        }
    }
}
