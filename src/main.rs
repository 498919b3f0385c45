mod args;
mod config;
mod curl;
mod engine;
mod entry;
mod error;
mod http;
mod metrics;
mod shutdown;
mod system;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
