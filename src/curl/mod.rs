//! Import of requests written as curl command lines.
mod parse;
mod tokenize;


pub use parse::{CURL_CASE_NAME, parse_curl_command, validate_curl_command};
pub use tokenize::tokenize;
