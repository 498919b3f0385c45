use std::collections::BTreeMap;
use std::time::Duration;

use url::Url;

/// Why an attempt ended without an HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallErrorKind {
    Timeout,
    Connect,
    Request,
}

impl CallErrorKind {
    #[must_use]
    pub fn classify(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            CallErrorKind::Timeout
        } else if err.is_connect() {
            CallErrorKind::Connect
        } else {
            CallErrorKind::Request
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CallErrorKind::Timeout => "timeout",
            CallErrorKind::Connect => "connect",
            CallErrorKind::Request => "request",
        }
    }
}

impl std::fmt::Display for CallErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallOutcome {
    pub status_code: u16,
    pub elapsed: Duration,
    pub error: Option<CallErrorKind>,
}

impl CallOutcome {
    #[must_use]
    pub const fn completed(status_code: u16, elapsed: Duration) -> Self {
        Self {
            status_code,
            elapsed,
            error: None,
        }
    }

    #[must_use]
    pub const fn failed(status_code: u16, error: CallErrorKind, elapsed: Duration) -> Self {
        Self {
            status_code,
            elapsed,
            error: Some(error),
        }
    }

    #[must_use]
    pub const fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Count and summed latency of every attempt that ended with one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusBucket {
    pub(super) total_count: u64,
    pub(super) cumulative_elapsed: Duration,
}

impl StatusBucket {
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    #[must_use]
    pub const fn cumulative_elapsed(&self) -> Duration {
        self.cumulative_elapsed
    }

    #[must_use]
    pub const fn cumulative_elapsed_secs(&self) -> f64 {
        self.cumulative_elapsed.as_secs_f64()
    }

    /// Mean latency of the calls in this bucket.
    #[must_use]
    pub fn average_elapsed(&self) -> Duration {
        divide_duration(self.cumulative_elapsed, self.total_count)
    }
}

/// Statistics of one benchmark run.
///
/// Built empty when a run starts, filled wave by wave through
/// [`fold`](super::fold), and finalized once by the engine. Only the
/// read-only accessors are public.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub(super) target_url: Url,
    pub(super) attempts: u64,
    pub(super) waves: u64,
    pub(super) status_buckets: BTreeMap<u16, StatusBucket>,
    pub(super) total_elapsed: Duration,
    pub(super) average_elapsed: Duration,
    pub(super) min_elapsed: Option<Duration>,
    pub(super) max_elapsed: Option<Duration>,
}

impl RunResult {
    #[must_use]
    pub const fn new(target_url: Url, attempts: u64) -> Self {
        Self {
            target_url,
            attempts,
            waves: 0,
            status_buckets: BTreeMap::new(),
            total_elapsed: Duration::ZERO,
            average_elapsed: Duration::ZERO,
            min_elapsed: None,
            max_elapsed: None,
        }
    }

    /// Stamps the wall-clock run time and derives the average from it.
    ///
    /// The average is run time divided by requested attempts, which tracks
    /// effective throughput under concurrency rather than per-call latency.
    pub(crate) fn finalize(&mut self, total_elapsed: Duration) {
        self.total_elapsed = total_elapsed;
        self.average_elapsed = divide_duration(total_elapsed, self.attempts);
    }

    #[must_use]
    pub const fn target_url(&self) -> &Url {
        &self.target_url
    }

    #[must_use]
    pub const fn attempts(&self) -> u64 {
        self.attempts
    }

    #[must_use]
    pub const fn waves(&self) -> u64 {
        self.waves
    }

    #[must_use]
    pub const fn status_buckets(&self) -> &BTreeMap<u16, StatusBucket> {
        &self.status_buckets
    }

    #[must_use]
    pub fn status(&self, status_code: u16) -> Option<&StatusBucket> {
        self.status_buckets.get(&status_code)
    }

    /// Sum of bucket counts; equals [`attempts`](Self::attempts) after a
    /// completed run.
    #[must_use]
    pub fn recorded_attempts(&self) -> u64 {
        self.status_buckets
            .values()
            .fold(0u64, |acc, bucket| acc.saturating_add(bucket.total_count))
    }

    #[must_use]
    pub const fn total_elapsed(&self) -> Duration {
        self.total_elapsed
    }

    #[must_use]
    pub const fn average_elapsed(&self) -> Duration {
        self.average_elapsed
    }

    #[must_use]
    pub const fn min_elapsed(&self) -> Option<Duration> {
        self.min_elapsed
    }

    #[must_use]
    pub const fn max_elapsed(&self) -> Option<Duration> {
        self.max_elapsed
    }

    #[must_use]
    pub const fn total_elapsed_secs(&self) -> f64 {
        self.total_elapsed.as_secs_f64()
    }

    #[must_use]
    pub const fn average_elapsed_secs(&self) -> f64 {
        self.average_elapsed.as_secs_f64()
    }

    /// Fastest call in seconds, `0.0` before any outcome was recorded.
    #[must_use]
    pub fn min_elapsed_secs(&self) -> f64 {
        self.min_elapsed.unwrap_or_default().as_secs_f64()
    }

    /// Slowest call in seconds, `0.0` before any outcome was recorded.
    #[must_use]
    pub fn max_elapsed_secs(&self) -> f64 {
        self.max_elapsed.unwrap_or_default().as_secs_f64()
    }
}

fn divide_duration(total: Duration, count: u64) -> Duration {
    total
        .as_nanos()
        .checked_div(u128::from(count))
        .and_then(|nanos| u64::try_from(nanos).ok())
        .map_or(Duration::ZERO, Duration::from_nanos)
}
