use std::collections::BTreeMap;

use serde::Deserialize;

/// A config file: either a bare list of cases (`callit.json` style) or a
/// document with a `requests` list (`[[requests]]` in TOML).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ConfigFile {
    Cases(Vec<RequestCase>),
    Document { requests: Vec<RequestCase> },
}

impl ConfigFile {
    #[must_use]
    pub fn into_cases(self) -> Vec<RequestCase> {
        match self {
            ConfigFile::Cases(cases) | ConfigFile::Document { requests: cases } => cases,
        }
    }
}

/// One request case. Keys are accepted lowercase or in the capitalized form
/// (`Name`, `URL`, `Header`) older `callit.json` files use.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
pub struct RequestCase {
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Method")]
    pub method: String,
    #[serde(default, alias = "URL", alias = "Url")]
    pub url: String,
    #[serde(default, alias = "Body")]
    pub body: String,
    #[serde(default, alias = "headers", alias = "Header", alias = "Headers")]
    pub header: BTreeMap<String, Vec<String>>,
    #[serde(default, alias = "Host")]
    pub host: String,
}
