use thiserror::Error;

use super::ValidationError;

#[derive(Debug, Error)]
pub enum CurlError {
    #[error("curl command must not be empty.")]
    Empty,
    #[error("Command must start with 'curl'.")]
    NotCurl,
    #[error("Unterminated {quote} quote in curl command.")]
    UnterminatedQuote { quote: char },
    #[error("Option '{option}' requires a value.")]
    MissingValue { option: String },
    #[error("curl command has no URL.")]
    MissingUrl,
    #[error("curl command has multiple URLs ('{first}' and '{second}').")]
    MultipleUrls { first: String, second: String },
    #[error("Reading '{option}' data from a file is not supported ('{value}').")]
    FileData { option: String, value: String },
    #[error("Unsupported curl option '{option}'.")]
    UnsupportedOption { option: String },
    #[error("Invalid request in curl command: {source}")]
    InvalidRequest {
        #[source]
        source: ValidationError,
    },
}
