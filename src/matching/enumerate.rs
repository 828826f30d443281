use std::ops::Range;

use thiserror::Error;

use crate::core::types::AmbiguitySet;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnumerateError {
    #[error("Searchable window of {window} positions is too short for {required} ambiguities")]
    QueryTooShort { window: usize, required: usize },
}

/// Generates every size-k set of wildcard positions inside a query's
/// searchable window, in lexicographic order of position tuples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguityEnumerator {
    window: Range<usize>,
    k: usize,
}

impl AmbiguityEnumerator {
    /// The window is `[flanking_size, query_length - flanking_size)`.
    ///
    /// # Errors
    ///
    /// Returns `EnumerateError::QueryTooShort` if the window holds fewer than
    /// `k` positions.
    pub fn new(query_length: usize, flanking_size: usize, k: usize) -> Result<Self, EnumerateError> {
        let end = query_length.saturating_sub(flanking_size);
        let start = flanking_size.min(end);
        let window = start..end;
        if window.len() < k {
            return Err(EnumerateError::QueryTooShort {
                window: window.len(),
                required: k,
            });
        }
        Ok(Self { window, k })
    }

    #[must_use]
    pub fn window(&self) -> Range<usize> {
        self.window.clone()
    }

    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window.len()
    }

    /// Number of sets the enumeration yields, C(W, k)
    #[must_use]
    pub fn candidate_count(&self) -> u128 {
        binomial(self.window_size(), self.k)
    }

    #[must_use]
    pub fn iter(&self) -> Combinations {
        Combinations {
            offset: self.window.start,
            n: self.window_size(),
            indices: (0..self.k).collect(),
            done: false,
        }
    }
}

impl IntoIterator for &AmbiguityEnumerator {
    type Item = AmbiguitySet;
    type IntoIter = Combinations;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Enumerate ambiguity sets for a query of `query_length`
///
/// # Errors
///
/// Returns `EnumerateError::QueryTooShort` if the searchable window holds
/// fewer than `k` positions.
pub fn enumerate(
    query_length: usize,
    flanking_size: usize,
    k: usize,
) -> Result<Combinations, EnumerateError> {
    AmbiguityEnumerator::new(query_length, flanking_size, k).map(|e| e.iter())
}

/// Lazy lexicographic k-combinations of `n` window positions
#[derive(Debug, Clone)]
pub struct Combinations {
    offset: usize,
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Iterator for Combinations {
    type Item = AmbiguitySet;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let k = self.indices.len();
        let current = AmbiguitySet::new(self.indices.iter().map(|i| i + self.offset).collect());

        // Advance: find the rightmost index that can still move right
        match (0..k).rev().find(|&i| self.indices[i] != i + self.n - k) {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }

        Some(current)
    }
}

/// Binomial coefficient C(n, k), 0 when `k > n`.
///
/// Saturates at `u128::MAX` when the intermediate product overflows.
#[must_use]
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // Exact at every step: result holds C(n, i) before the update
        result = match result.checked_mul((n - i) as u128) {
            Some(product) => product / (i + 1) as u128,
            None => return u128::MAX,
        };
    }
    result
}
