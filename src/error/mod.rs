mod app;
mod config;
mod curl;
mod engine;
mod http;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use curl::CurlError;
pub use engine::EngineError;
pub use http::HttpError;
pub use validation::ValidationError;
