use ::http::header::HOST;

use crate::args::HttpMethod;
use crate::error::{ConfigError, ValidationError};
use crate::http::{NamedRequest, RequestTemplate};

use super::types::{ConfigFile, RequestCase};

/// Validates every case of a config file, failing on the first bad one.
///
/// # Errors
///
/// Returns an error when the file has no cases or any case is invalid.
pub fn apply_config(config: ConfigFile) -> Result<Vec<NamedRequest>, ConfigError> {
    let cases = config.into_cases();
    if cases.is_empty() {
        return Err(ConfigError::NoRequests);
    }
    cases
        .into_iter()
        .enumerate()
        .map(|(index, case)| resolve_case(index, case))
        .collect()
}

/// Turns one config case into a request.
///
/// A case needs a name and an absolute http(s) URL; the method defaults to
/// GET and a non-empty `host` becomes the `Host` header.
///
/// # Errors
///
/// Returns an error describing the first rule the case breaks.
pub fn resolve_case(index: usize, case: RequestCase) -> Result<NamedRequest, ConfigError> {
    let RequestCase {
        name,
        method,
        url,
        body,
        mut header,
        host,
    } = case;
    let name = name.trim().to_owned();
    if name.is_empty() {
        return Err(ConfigError::MissingName { index });
    }

    let invalid = |source: ValidationError| ConfigError::InvalidRequest {
        name: name.clone(),
        source,
    };
    let method = if method.trim().is_empty() {
        HttpMethod::Get
    } else {
        method.parse::<HttpMethod>().map_err(invalid)?
    };
    if !host.trim().is_empty() {
        header.insert(HOST.as_str().to_owned(), vec![host.trim().to_owned()]);
    }
    let template = RequestTemplate::new(method, &url, header, body).map_err(invalid)?;

    Ok(NamedRequest {
        name: Some(name),
        spec: template.into(),
    })
}
