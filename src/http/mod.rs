//! Request description, client setup, and the concurrent call executor.
mod client;
mod executor;
mod spec;


pub use client::{ClientSettings, PreparedRequest, build_client};
pub use executor::{BatchExecutor, HttpBatchExecutor, TRANSPORT_FAILURE_STATUS};
pub use spec::{HeaderValues, NamedRequest, RequestSpec, RequestTemplate, parse_target_url};
