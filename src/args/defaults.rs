use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("callit/", env!("CARGO_PKG_VERSION"));

/// Attempts issued when the command line does not name a count.
pub(crate) const DEFAULT_ATTEMPTS: u64 = 10;
/// Concurrency ceiling when the command line does not name one.
pub(crate) const DEFAULT_CONCURRENCY: usize = 10;
/// Client-side timeout applied to every call unless `--timeout` overrides it.
pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
