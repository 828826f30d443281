use std::ops::Range;

use thiserror::Error;
use tracing::{debug, info};

use crate::core::symbol::{EncodedSequence, Symbol};
use crate::corpus::compute::ComputeUnit;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CorpusError {
    #[error("Corpus is empty: no sequences to search")]
    EmptyCorpus,

    #[error("No compute units available to hold corpus shards")]
    NoComputeUnitsAvailable,

    #[error("Corpus sequence {index} has length {found}, expected {expected}")]
    RaggedCorpus {
        index: usize,
        expected: usize,
        found: usize,
    },
}

/// An immutable block of equal-length encoded rows bound to one compute unit
#[derive(Debug)]
pub struct CorpusShard {
    unit: ComputeUnit,
    /// Index of the first row within the whole corpus
    offset: usize,
    rows: usize,
    width: usize,
    /// Row-major, `len = rows * width`
    symbols: Vec<Symbol>,
}

impl CorpusShard {
    fn from_rows(unit: ComputeUnit, offset: usize, width: usize, rows: &[EncodedSequence]) -> Self {
        let mut symbols = Vec::with_capacity(rows.len() * width);
        for row in rows {
            symbols.extend_from_slice(row.as_slice());
        }
        Self {
            unit,
            offset,
            rows: rows.len(),
            width,
            symbols,
        }
    }

    #[must_use]
    pub fn unit(&self) -> ComputeUnit {
        self.unit
    }

    /// Row range this shard covers within the corpus
    #[must_use]
    pub fn row_range(&self) -> Range<usize> {
        self.offset..self.offset + self.row_count()
    }

    /// Length of every row
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Iterate over rows as symbol slices
    pub fn rows(&self) -> impl Iterator<Item = &[Symbol]> + '_ {
        RowIter {
            shard: self,
            next: 0,
        }
    }
}

struct RowIter<'a> {
    shard: &'a CorpusShard,
    next: usize,
}

impl<'a> Iterator for RowIter<'a> {
    type Item = &'a [Symbol];

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.shard.rows {
            return None;
        }
        let width = self.shard.width;
        let start = self.next * width;
        self.next += 1;
        Some(&self.shard.symbols[start..start + width])
    }
}

/// The encoded corpus, partitioned into disjoint shards.
///
/// Built once and never mutated; analyses share it by reference.
#[derive(Debug)]
pub struct CorpusShardSet {
    shards: Vec<CorpusShard>,
    sequence_length: usize,
    total: usize,
}

impl CorpusShardSet {
    /// Encode-and-partition step: split `sequences` into `shard_count`
    /// contiguous shards.
    ///
    /// Every shard but the last gets `total / shard_count` rows; the last
    /// absorbs the remainder.
    ///
    /// # Errors
    ///
    /// Returns `CorpusError::EmptyCorpus` if `sequences` is empty,
    /// `CorpusError::NoComputeUnitsAvailable` if `shard_count` is zero, or
    /// `CorpusError::RaggedCorpus` if the sequences do not share one length.
    pub fn build(sequences: &[EncodedSequence], shard_count: usize) -> Result<Self, CorpusError> {
        let first = sequences.first().ok_or(CorpusError::EmptyCorpus)?;
        if shard_count == 0 {
            return Err(CorpusError::NoComputeUnitsAvailable);
        }

        let sequence_length = first.len();
        if let Some((index, seq)) = sequences
            .iter()
            .enumerate()
            .find(|(_, s)| s.len() != sequence_length)
        {
            return Err(CorpusError::RaggedCorpus {
                index,
                expected: sequence_length,
                found: seq.len(),
            });
        }

        let total = sequences.len();
        let shards: Vec<CorpusShard> = partition(total, shard_count)
            .into_iter()
            .enumerate()
            .map(|(i, range)| {
                let shard = CorpusShard::from_rows(
                    ComputeUnit(i),
                    range.start,
                    sequence_length,
                    &sequences[range.clone()],
                );
                debug!(
                    "Loaded {} sequences onto {} (rows {}..{})",
                    range.len(),
                    shard.unit(),
                    range.start,
                    range.end
                );
                shard
            })
            .collect();

        info!(
            "Built corpus of {total} sequences (length {sequence_length}) across {} shard(s)",
            shards.len()
        );

        Ok(Self {
            shards,
            sequence_length,
            total,
        })
    }

    #[must_use]
    pub fn shards(&self) -> &[CorpusShard] {
        &self.shards
    }

    #[must_use]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Length shared by every corpus row
    #[must_use]
    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    #[must_use]
    pub fn total_sequences(&self) -> usize {
        self.total
    }
}

/// Contiguous row ranges for `shard_count` shards over `total` rows
#[must_use]
pub fn partition(total: usize, shard_count: usize) -> Vec<Range<usize>> {
    if shard_count == 0 {
        return Vec::new();
    }
    let base = total / shard_count;
    (0..shard_count)
        .map(|i| {
            let start = i * base;
            let end = if i + 1 < shard_count { (i + 1) * base } else { total };
            start..end
        })
        .collect()
}
