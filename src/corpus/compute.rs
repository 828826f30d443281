use std::fmt;
use std::num::NonZeroUsize;

/// A compute unit a corpus shard is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComputeUnit(pub usize);

impl fmt::Display for ComputeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit:{}", self.0)
    }
}

/// Number of compute units this host can run shard kernels on.
///
/// Returns 0 when the parallelism of the host cannot be determined.
#[must_use]
pub fn available_compute_units() -> usize {
    std::thread::available_parallelism().map_or(0, NonZeroUsize::get)
}

/// Resolve the shard count for a run: the requested count, or every
/// available unit when none was requested, never more than are available.
#[must_use]
pub fn resolve_shard_count(requested: Option<usize>, available: usize) -> usize {
    requested.unwrap_or(available).min(available)
}
