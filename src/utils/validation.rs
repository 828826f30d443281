//! Centralized validation and helper functions.

use crate::core::types::SequenceRecord;

/// Normalize raw sequence text: strip whitespace and uppercase.
///
/// # Examples
///
/// ```
/// use oligo_solver::utils::validation::normalize_sequence;
///
/// assert_eq!(normalize_sequence("acgt N\n"), "ACGTN");
/// ```
#[must_use]
pub fn normalize_sequence(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// True when every character is one of the four unambiguous bases
#[must_use]
pub fn is_unambiguous(sequence: &str) -> bool {
    sequence.chars().all(|c| matches!(c, 'A' | 'C' | 'G' | 'T'))
}

/// Result of restricting a record set to one sequence length
#[derive(Debug)]
pub struct LengthFilter {
    /// Records of the retained length, in input order
    pub kept: Vec<SequenceRecord>,

    /// Length shared by the kept records
    pub length: usize,

    /// Ids of the records that were dropped
    pub dropped: Vec<String>,
}

/// Keep only records whose length equals the first record's length.
///
/// Returns `None` for an empty input.
#[must_use]
pub fn filter_uniform_length(records: Vec<SequenceRecord>) -> Option<LengthFilter> {
    let length = records.first()?.len();
    let (kept, dropped): (Vec<_>, Vec<_>) = records.into_iter().partition(|r| r.len() == length);
    Some(LengthFilter {
        kept,
        length,
        dropped: dropped.into_iter().map(|r| r.id).collect(),
    })
}
