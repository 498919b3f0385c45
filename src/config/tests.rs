use std::collections::BTreeMap;

use tempfile::tempdir;

use super::types::{ConfigFile, RequestCase};
use super::{apply_config, load_config, load_config_file, resolve_case};
use crate::args::HttpMethod;
use crate::error::{ConfigError, ValidationError};
use crate::http::RequestSpec;

fn case(name: &str, method: &str, url: &str) -> RequestCase {
    RequestCase {
        name: name.to_owned(),
        method: method.to_owned(),
        url: url.to_owned(),
        ..RequestCase::default()
    }
}

fn write_config(
    name: &str,
    content: &str,
) -> Result<(tempfile::TempDir, std::path::PathBuf), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join(name);
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;
    Ok((dir, path))
}

#[test]
fn parse_toml_config_with_multiple_requests() -> Result<(), String> {
    let (_dir, path) = write_config(
        "callit.toml",
        r#"
[[requests]]
name = "Health"
url = "http://localhost:3000/health"

[[requests]]
name = "Create item"
method = "post"
url = "http://localhost:3000/items"
body = '{"name":"widget"}'
host = "api.internal"

[requests.header]
Content-Type = ["application/json"]
X-Trace = ["a", "b"]
"#,
    )?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    let requests = apply_config(config).map_err(|err| err.to_string())?;
    if requests.len() != 2 {
        return Err(format!("Expected 2 requests, got {}", requests.len()));
    }

    let health = requests.first().ok_or("missing first request")?;
    if health.name.as_deref() != Some("Health") || health.spec.method() != HttpMethod::Get {
        return Err(format!("Unexpected first request: {:?}", health));
    }

    let create = requests.get(1).ok_or("missing second request")?;
    let RequestSpec::Templated(template) = &create.spec else {
        return Err("Config cases should be templated".to_owned());
    };
    if template.method() != HttpMethod::Post {
        return Err(format!("Expected POST, got {}", template.method()));
    }
    if template.body().as_ref() != br#"{"name":"widget"}"# {
        return Err(format!("Unexpected body: {:?}", template.body()));
    }
    if template.headers().get("host") != Some(&vec!["api.internal".to_owned()]) {
        return Err(format!("Missing host header: {:?}", template.headers()));
    }
    if template.headers().get("X-Trace").map(Vec::len) != Some(2) {
        return Err(format!("Expected two X-Trace values: {:?}", template.headers()));
    }
    Ok(())
}

#[test]
fn parse_json_config_as_array() -> Result<(), String> {
    let (_dir, path) = write_config(
        "callit.json",
        r#"[
  {"name": "Google", "url": "https://www.google.com/"},
  {"name": "Delete", "method": "DELETE", "url": "http://localhost/items/1",
   "headers": {"Authorization": ["Bearer token"]}}
]"#,
    )?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    let cases = config.into_cases();
    let expected_headers = BTreeMap::from([(
        "Authorization".to_owned(),
        vec!["Bearer token".to_owned()],
    )]);
    match cases.as_slice() {
        [first, second] if first.name == "Google" && second.header == expected_headers => Ok(()),
        other => Err(format!("Unexpected cases: {:?}", other)),
    }
}

#[test]
fn capitalized_json_keys_are_accepted() -> Result<(), String> {
    let (_dir, path) = write_config(
        "callit.json",
        r#"[{"Name": "Capitalized", "Method": "PUT", "URL": "http://localhost/items/2",
  "Body": "{}", "Header": {"X-Trace": ["7"]}, "Host": "api.internal"}]"#,
    )?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    let requests = apply_config(config).map_err(|err| err.to_string())?;
    let [request] = requests.as_slice() else {
        return Err(format!("Expected one request, got {:?}", requests));
    };
    if request.name.as_deref() != Some("Capitalized") {
        return Err(format!("Unexpected name: {:?}", request.name));
    }
    let RequestSpec::Templated(template) = &request.spec else {
        return Err("Config cases should be templated".to_owned());
    };
    if template.method() != HttpMethod::Put || template.url().path() != "/items/2" {
        return Err(format!("Unexpected request: {:?}", template));
    }
    if template.body().as_ref() != b"{}" {
        return Err(format!("Unexpected body: {:?}", template.body()));
    }
    if template.headers().get("X-Trace") != Some(&vec!["7".to_owned()]) {
        return Err(format!("Missing trace header: {:?}", template.headers()));
    }
    if template.headers().get("host") != Some(&vec!["api.internal".to_owned()]) {
        return Err(format!("Missing host header: {:?}", template.headers()));
    }
    Ok(())
}

#[test]
fn explicit_config_path_is_loaded() -> Result<(), String> {
    let (_dir, path) = write_config(
        "suite.json",
        r#"[{"name": "One", "url": "http://localhost/"}]"#,
    )?;
    let path = path.to_str().ok_or("non-utf8 temp path")?;
    let config = load_config(Some(path))
        .map_err(|err| err.to_string())?
        .ok_or("explicit config was not loaded")?;
    let cases = config.into_cases();
    if cases.len() != 1 {
        return Err(format!("Unexpected cases: {:?}", cases));
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let (_dir, path) = write_config("callit.yaml", "requests: []")?;
    match load_config_file(&path) {
        Err(ConfigError::UnsupportedExtension { ext }) if ext == "yaml" => Ok(()),
        other => Err(format!("Expected UnsupportedExtension, got {:?}", other)),
    }
}

#[test]
fn missing_extension_is_rejected() -> Result<(), String> {
    let (_dir, path) = write_config("callit", "[]")?;
    match load_config_file(&path) {
        Err(ConfigError::MissingExtension) => Ok(()),
        other => Err(format!("Expected MissingExtension, got {:?}", other)),
    }
}

#[test]
fn empty_config_has_no_requests() -> Result<(), ConfigError> {
    match apply_config(ConfigFile::Cases(Vec::new())) {
        Err(ConfigError::NoRequests) => Ok(()),
        Err(err) => Err(err),
        Ok(_) => Err(ConfigError::from("Expected NoRequests")),
    }
}

#[test]
fn case_without_name_is_rejected() -> Result<(), ConfigError> {
    match resolve_case(3, case("  ", "GET", "http://localhost/")) {
        Err(ConfigError::MissingName { index: 3 }) => Ok(()),
        Err(err) => Err(err),
        Ok(_) => Err(ConfigError::from("Expected MissingName")),
    }
}

#[test]
fn case_with_unknown_method_is_rejected() -> Result<(), ConfigError> {
    match resolve_case(0, case("Ashe", "ASHE", "http://localhost/")) {
        Err(ConfigError::InvalidRequest {
            name,
            source: ValidationError::UnsupportedMethod { value },
        }) if name == "Ashe" && value == "ASHE" => Ok(()),
        Err(err) => Err(err),
        Ok(_) => Err(ConfigError::from("Expected UnsupportedMethod")),
    }
}

#[test]
fn case_with_relative_url_is_rejected() -> Result<(), ConfigError> {
    match resolve_case(0, case("Mars", "", "survivingmars.com")) {
        Err(ConfigError::InvalidRequest {
            source: ValidationError::InvalidUrl { .. },
            ..
        }) => Ok(()),
        Err(err) => Err(err),
        Ok(_) => Err(ConfigError::from("Expected InvalidUrl")),
    }
}

#[test]
fn case_with_empty_url_is_rejected() -> Result<(), ConfigError> {
    match resolve_case(0, case("Nothing", "GET", "")) {
        Err(ConfigError::InvalidRequest {
            source: ValidationError::EmptyUrl,
            ..
        }) => Ok(()),
        Err(err) => Err(err),
        Ok(_) => Err(ConfigError::from("Expected EmptyUrl")),
    }
}

#[test]
fn first_invalid_case_fails_the_whole_file() -> Result<(), ConfigError> {
    let config = ConfigFile::Document {
        requests: vec![
            case("Good", "GET", "http://localhost/"),
            case("Bad", "FETCH", "http://localhost/"),
        ],
    };
    match apply_config(config) {
        Err(ConfigError::InvalidRequest { name, .. }) if name == "Bad" => Ok(()),
        Err(err) => Err(err),
        Ok(_) => Err(ConfigError::from("Expected the bad case to fail")),
    }
}
