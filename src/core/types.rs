use std::fmt;

use serde::{Serialize, Serializer};

/// An `(id, sequence)` record as supplied by a sequence reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub sequence: String,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
        }
    }

    /// Length in characters
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// A query oligo: the unit of independent work in a search
pub type QueryRecord = SequenceRecord;

/// Strictly increasing, 0-based positions that are wildcarded in one pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AmbiguitySet(Vec<usize>);

impl AmbiguitySet {
    pub fn new(positions: Vec<usize>) -> Self {
        debug_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        Self(positions)
    }

    #[must_use]
    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, position: usize) -> bool {
        self.0.binary_search(&position).is_ok()
    }
}

/// Renders 1-based positions joined with `-`, e.g. `2-5-9`
impl fmt::Display for AmbiguitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pos) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "-")?;
            }
            write!(f, "{}", pos + 1)?;
        }
        Ok(())
    }
}

/// One output row of a search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    #[serde(rename = "Query_ID")]
    pub query_id: String,

    #[serde(rename = "Degenerate_Pattern")]
    pub pattern: String,

    /// 1-based, `-`-joined
    #[serde(rename = "Ambiguous_Positions")]
    pub positions: String,

    #[serde(rename = "Match_Count")]
    pub count: u64,

    #[serde(rename = "Percent_Hit", serialize_with = "serialize_percent")]
    pub percent_hit: f64,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde signature
fn serialize_percent<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value:.2}"))
}

/// Percentage of the corpus hit by `count`, rounded to two decimals.
///
/// Returns 0 for an empty corpus.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Counts are far below 2^52
pub fn percent_hit(count: u64, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 * 100.0 / total as f64;
    (raw * 100.0).round() / 100.0
}
