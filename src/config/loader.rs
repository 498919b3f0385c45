use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ConfigError;

use super::types::ConfigFile;

/// Config filenames looked up in the working directory, in order.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["callit.toml", "callit.json"];

#[derive(Debug, Clone, Copy)]
enum Format {
    Toml,
    Json,
}

/// Loads the config at `path`, or the first default config file present.
///
/// Returns `Ok(None)` when no path is given and no default file exists.
///
/// # Errors
///
/// Returns an error when the chosen file cannot be read or decoded.
pub fn load_config(path: Option<&str>) -> Result<Option<ConfigFile>, ConfigError> {
    let chosen = match path {
        Some(path) => Some(Path::new(path)),
        None => DEFAULT_CONFIG_FILES
            .into_iter()
            .map(Path::new)
            .find(|candidate| candidate.exists()),
    };
    chosen.map(load_config_file).transpose()
}

/// Reads and decodes one config file, picking the format from its extension.
///
/// # Errors
///
/// Returns an error when the extension is not `.toml`/`.json`, the file
/// cannot be read, or its content does not decode.
pub fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let format = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Format::Toml,
        Some("json") => Format::Json,
        Some(ext) => {
            return Err(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            });
        }
        None => return Err(ConfigError::MissingExtension),
    };
    let content = std::fs::read_to_string(path).map_err(|err| ConfigError::ReadConfig {
        path: path.to_path_buf(),
        source: err,
    })?;
    debug!("Loading {:?} config from {}", format, path.display());
    decode(path, format, &content)
}

fn decode<T>(path: &Path, format: Format, content: &str) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    match format {
        Format::Toml => toml::from_str(content).map_err(|err| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source: err,
        }),
        Format::Json => serde_json::from_str(content).map_err(|err| ConfigError::ParseJson {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}
