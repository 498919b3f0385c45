use clap::Parser;
use std::time::Duration;

use super::defaults::{DEFAULT_ATTEMPTS, DEFAULT_CONCURRENCY};
use super::parsers::{parse_duration_arg, parse_header, parse_positive_u64, parse_positive_usize};
use super::types::{HttpMethod, OutputFormat, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Benchmark an HTTP endpoint: issue a number of attempts in bounded concurrent waves and summarize status codes and latencies."
)]
pub struct CallArgs {
    /// Target URL to benchmark
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Total number of requests to issue
    #[arg(
        value_name = "ATTEMPTS",
        default_value_t = default_attempts(),
        value_parser = parse_positive_u64
    )]
    pub attempts: PositiveU64,

    /// Maximum number of requests in flight at once
    #[arg(
        value_name = "CONCURRENCY",
        default_value_t = default_concurrency(),
        value_parser = parse_positive_usize
    )]
    pub concurrency: PositiveUsize,

    /// Total number of requests; overrides ATTEMPTS (useful with --curl/--config)
    #[arg(
        long = "attempts",
        short = 'n',
        value_name = "N",
        value_parser = parse_positive_u64,
        conflicts_with = "attempts"
    )]
    pub attempts_flag: Option<PositiveU64>,

    /// Requests in flight at once; overrides CONCURRENCY
    #[arg(
        long = "concurrency",
        short = 'C',
        value_name = "N",
        value_parser = parse_positive_usize,
        conflicts_with = "concurrency"
    )]
    pub concurrency_flag: Option<PositiveUsize>,

    /// HTTP method to use
    #[arg(long, short = 'X', ignore_case = true)]
    pub method: Option<HttpMethod>,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body
    #[arg(long, short)]
    pub data: Option<String>,

    /// Build the request from a curl command instead of URL/flags
    #[arg(long = "curl", conflicts_with_all = ["url", "method", "headers", "data"])]
    pub curl: Option<String>,

    /// Path to config file (TOML/JSON). Defaults to ./callit.toml or ./callit.json if present.
    #[arg(
        long,
        short,
        conflicts_with_all = ["url", "method", "headers", "data", "curl"]
    )]
    pub config: Option<String>,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = "30s",
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Result output format
    #[arg(long = "output-format", value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    /// Enable verbose logging (sets log level to debug unless overridden by CALLIT_LOG/RUST_LOG)
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl CallArgs {
    #[must_use]
    pub fn attempts(&self) -> PositiveU64 {
        self.attempts_flag.unwrap_or(self.attempts)
    }

    #[must_use]
    pub fn concurrency(&self) -> PositiveUsize {
        self.concurrency_flag.unwrap_or(self.concurrency)
    }

    /// True when any request shaping flag was given alongside the URL.
    #[must_use]
    pub fn has_request_template(&self) -> bool {
        self.method.is_some() || !self.headers.is_empty() || self.data.is_some()
    }
}

fn default_attempts() -> PositiveU64 {
    PositiveU64::try_from(DEFAULT_ATTEMPTS).unwrap_or(PositiveU64::MIN)
}

fn default_concurrency() -> PositiveUsize {
    PositiveUsize::try_from(DEFAULT_CONCURRENCY).unwrap_or(PositiveUsize::MIN)
}
