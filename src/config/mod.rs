//! Configuration loading and request case resolution.
mod apply;
mod loader;
pub mod types;

#[cfg(test)]
mod tests;

pub use apply::{apply_config, resolve_case};
pub use loader::{DEFAULT_CONFIG_FILES, load_config, load_config_file};
