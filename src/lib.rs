//! Core library for the `callit` CLI.
//!
//! `callit` issues a fixed number of HTTP requests against one endpoint, at
//! most `concurrency` of them at a time, and reports a status-code histogram
//! with min/avg/max/total latency. The pieces are usable on their own:
//! [`http::RequestSpec`] describes the call, [`engine::make_it`] (or
//! [`engine::Engine`] with a custom [`http::BatchExecutor`]) runs it, and
//! [`metrics::RunResult`] holds the finalized statistics.
pub mod args;
pub mod config;
pub mod curl;
pub mod engine;
pub mod error;
pub mod http;
pub mod metrics;
pub mod shutdown;
