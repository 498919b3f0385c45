use std::collections::BTreeMap;

use bytes::Bytes;
use ::http::header::{HeaderName, HeaderValue};
use url::Url;

use crate::args::HttpMethod;
use crate::error::ValidationError;

/// Header map as written by users: one name, any number of values.
pub type HeaderValues = BTreeMap<String, Vec<String>>;

/// What to send on every attempt of a run.
///
/// A bare target URL becomes [`RequestSpec::Default`] (a plain GET with no
/// headers or body). Anything built from flags, a config case, or a curl
/// command becomes [`RequestSpec::Templated`]. The choice is made once, at
/// construction, and the value is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSpec {
    Default(Url),
    Templated(RequestTemplate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTemplate {
    method: HttpMethod,
    url: Url,
    headers: HeaderValues,
    body: Bytes,
}

impl RequestTemplate {
    /// Validates and builds a request template.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is not an absolute http(s) URL or a
    /// header name/value cannot be sent on the wire.
    pub fn new(
        method: HttpMethod,
        url: &str,
        headers: HeaderValues,
        body: impl Into<Bytes>,
    ) -> Result<Self, ValidationError> {
        let url = parse_target_url(url)?;
        validate_headers(&headers)?;
        Ok(Self {
            method,
            url,
            headers,
            body: body.into(),
        })
    }

    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub const fn headers(&self) -> &HeaderValues {
        &self.headers
    }

    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }
}

impl RequestSpec {
    /// Builds the default GET request for a target URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is empty, relative, not http(s), or has
    /// no host.
    pub fn for_url(url: &str) -> Result<Self, ValidationError> {
        parse_target_url(url).map(RequestSpec::Default)
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        match self {
            RequestSpec::Default(url) => url,
            RequestSpec::Templated(template) => template.url(),
        }
    }

    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        match self {
            RequestSpec::Default(_) => HttpMethod::Get,
            RequestSpec::Templated(template) => template.method(),
        }
    }
}

impl From<RequestTemplate> for RequestSpec {
    fn from(template: RequestTemplate) -> Self {
        RequestSpec::Templated(template)
    }
}

/// A request together with the label it is reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRequest {
    pub name: Option<String>,
    pub spec: RequestSpec,
}

impl NamedRequest {
    #[must_use]
    pub const fn unnamed(spec: RequestSpec) -> Self {
        Self { name: None, spec }
    }
}

/// Parses a benchmark target. Only absolute http/https URLs with a host are
/// accepted.
///
/// # Errors
///
/// Returns a [`ValidationError`] describing why the URL was rejected.
pub fn parse_target_url(raw: &str) -> Result<Url, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    let url = Url::parse(trimmed).map_err(|err| ValidationError::InvalidUrl {
        url: trimmed.to_owned(),
        source: err,
    })?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::UnsupportedScheme {
                scheme: other.to_owned(),
            });
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::UrlMissingHost);
    }
    Ok(url)
}

fn validate_headers(headers: &HeaderValues) -> Result<(), ValidationError> {
    for (name, values) in headers {
        HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
            ValidationError::InvalidHeaderName {
                header: name.clone(),
                source: err,
            }
        })?;
        for value in values {
            HeaderValue::from_str(value).map_err(|err| ValidationError::InvalidHeaderValue {
                header: name.clone(),
                source: err,
            })?;
        }
    }
    Ok(())
}
