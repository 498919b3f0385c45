use crate::args::PositiveUsize;

/// Size of the next wave: never above the concurrency ceiling, never more
/// than what is left, and zero only once nothing is left.
#[must_use]
pub fn next_batch_size(remaining_attempts: u64, concurrency_limit: PositiveUsize) -> usize {
    let limit = concurrency_limit.get();
    usize::try_from(remaining_attempts).map_or(limit, |remaining| remaining.min(limit))
}
