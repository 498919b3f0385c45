use std::time::Duration;

use reqwest::{
    Client, Request,
    header::{HeaderName, HeaderValue},
};
use tracing::error;

use crate::args::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT};
use crate::error::{AppError, AppResult, EngineError, HttpError, ValidationError};

use super::spec::{RequestSpec, RequestTemplate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSettings {
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Builds the HTTP client shared by every call of a run.
///
/// # Errors
///
/// Returns an error when the TLS backend or client cannot be initialised.
pub fn build_client(settings: &ClientSettings) -> AppResult<Client> {
    Client::builder()
        .timeout(settings.request_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| {
            error!("Failed to build HTTP client: {}", err);
            AppError::http(HttpError::BuildClientFailed { source: err })
        })
}

/// A client plus a fully built request, ready to be cloned once per call.
#[derive(Debug)]
pub struct PreparedRequest {
    client: Client,
    template: Request,
}

impl PreparedRequest {
    /// Turns a [`RequestSpec`] into a wire request.
    ///
    /// # Errors
    ///
    /// Returns an error when reqwest rejects the request or the body cannot
    /// be replayed for every attempt.
    pub fn new(client: Client, spec: &RequestSpec) -> AppResult<Self> {
        let builder = match spec {
            RequestSpec::Default(url) => client.get(url.clone()),
            RequestSpec::Templated(template) => templated_builder(&client, template)?,
        };
        let template = builder
            .build()
            .map_err(|err| AppError::http(HttpError::BuildRequestFailed { source: err }))?;
        if template.try_clone().is_none() {
            return Err(AppError::engine(EngineError::RequestNotCloneable));
        }
        Ok(Self { client, template })
    }

    /// Hands out a client handle and a fresh copy of the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request body cannot be cloned.
    pub(crate) fn next_call(&self) -> AppResult<(Client, Request)> {
        let request = self
            .template
            .try_clone()
            .ok_or_else(|| AppError::engine(EngineError::RequestNotCloneable))?;
        Ok((self.client.clone(), request))
    }

    #[must_use]
    pub const fn request(&self) -> &Request {
        &self.template
    }
}

fn templated_builder(
    client: &Client,
    template: &RequestTemplate,
) -> AppResult<reqwest::RequestBuilder> {
    let mut builder = client.request(template.method().to_reqwest(), template.url().clone());
    for (name, values) in template.headers() {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
            AppError::validation(ValidationError::InvalidHeaderName {
                header: name.clone(),
                source: err,
            })
        })?;
        for value in values {
            let header_value = HeaderValue::from_str(value).map_err(|err| {
                AppError::validation(ValidationError::InvalidHeaderValue {
                    header: name.clone(),
                    source: err,
                })
            })?;
            builder = builder.header(header_name.clone(), header_value);
        }
    }
    if !template.body().is_empty() {
        builder = builder.body(template.body().clone());
    }
    Ok(builder)
}
