use super::types::{CallOutcome, RunResult};

/// Merges one wave of outcomes into the run statistics.
///
/// Order-independent: any permutation of the same outcomes produces the same
/// result. Min/max are seeded by the first recorded outcome, whatever its
/// latency, including a zero-duration call. Total and average time are left
/// to the engine, which measures them around the whole run.
pub fn fold<I>(result: &mut RunResult, outcomes: I)
where
    I: IntoIterator<Item = CallOutcome>,
{
    let mut any = false;
    for outcome in outcomes {
        any = true;
        let bucket = result
            .status_buckets
            .entry(outcome.status_code)
            .or_default();
        bucket.total_count = bucket.total_count.saturating_add(1);
        bucket.cumulative_elapsed = bucket.cumulative_elapsed.saturating_add(outcome.elapsed);

        result.min_elapsed = Some(
            result
                .min_elapsed
                .map_or(outcome.elapsed, |min| min.min(outcome.elapsed)),
        );
        result.max_elapsed = Some(
            result
                .max_elapsed
                .map_or(outcome.elapsed, |max| max.max(outcome.elapsed)),
        );
    }
    if any {
        result.waves = result.waves.saturating_add(1);
    }
}
