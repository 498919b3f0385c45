use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::args::{HttpMethod, parse_header};
use crate::error::CurlError;
use crate::http::{HeaderValues, NamedRequest, RequestTemplate};

use super::tokenize::tokenize;

/// Label given to requests imported from a curl command.
pub const CURL_CASE_NAME: &str = "Parsed from cURL";

/// Switches that change nothing about the request on the wire.
const IGNORED_FLAGS: [&str; 16] = [
    "--compressed",
    "--silent",
    "--show-error",
    "--insecure",
    "--location",
    "--verbose",
    "--include",
    "--fail",
    "--http1.1",
    "--http2",
    "--no-buffer",
    "--globoff",
    "--raw",
    "--progress-bar",
    "--ipv4",
    "--ipv6",
];
/// Short switches that may be clustered, as in `-sSL`.
const IGNORED_SHORT_FLAGS: &str = "sSkLvifN#g046";
/// Options whose value only affects curl's own output or retry behavior.
const IGNORED_WITH_VALUE: [&str; 10] = [
    "-o",
    "--output",
    "-m",
    "--max-time",
    "--connect-timeout",
    "-w",
    "--write-out",
    "--retry",
    "--retry-delay",
    "--max-redirs",
];

#[derive(Debug, Default)]
struct CurlRequest {
    method: Option<HttpMethod>,
    url: Option<String>,
    headers: HeaderValues,
    data: Vec<String>,
    head: bool,
    get: bool,
}

impl CurlRequest {
    fn push_header(&mut self, raw: &str) -> Result<(), CurlError> {
        let (name, value) =
            parse_header(raw).map_err(|err| CurlError::InvalidRequest { source: err })?;
        self.headers.entry(name).or_default().push(value);
        Ok(())
    }

    fn set_header_if_absent(&mut self, name: &str, value: &str) {
        let present = self
            .headers
            .keys()
            .any(|existing| existing.eq_ignore_ascii_case(name));
        if !present {
            self.headers.insert(name.to_owned(), vec![value.to_owned()]);
        }
    }

    fn set_url(&mut self, url: &str) -> Result<(), CurlError> {
        if let Some(first) = self.url.as_ref() {
            return Err(CurlError::MultipleUrls {
                first: first.clone(),
                second: url.to_owned(),
            });
        }
        self.url = Some(url.to_owned());
        Ok(())
    }

    fn into_named_request(self) -> Result<NamedRequest, CurlError> {
        let CurlRequest {
            method,
            url,
            headers,
            data,
            head,
            get,
        } = self;
        let url = url.ok_or(CurlError::MissingUrl)?;
        let mut url = with_default_scheme(&url);
        let mut body = data.join("&");

        if get && !body.is_empty() {
            let separator = if url.contains('?') { '&' } else { '?' };
            url.push(separator);
            url.push_str(&body);
            body.clear();
        }

        let method = method.unwrap_or(if head {
            HttpMethod::Head
        } else if !body.is_empty() {
            HttpMethod::Post
        } else {
            HttpMethod::Get
        });

        let template = RequestTemplate::new(method, &url, headers, body)
            .map_err(|err| CurlError::InvalidRequest { source: err })?;
        Ok(NamedRequest {
            name: Some(CURL_CASE_NAME.to_owned()),
            spec: template.into(),
        })
    }
}

/// Parses a curl command line into a request.
///
/// # Errors
///
/// Returns an error when the command is empty, does not start with `curl`,
/// has unbalanced quotes, an unknown option, no URL or several URLs, or
/// describes a request that fails validation.
pub fn parse_curl_command(command: &str) -> Result<NamedRequest, CurlError> {
    let words = tokenize(command.trim())?;
    let mut words = words.into_iter();
    match words.next() {
        None => return Err(CurlError::Empty),
        Some(first) if first.eq_ignore_ascii_case("curl") => {}
        Some(_) => return Err(CurlError::NotCurl),
    }

    let mut request = CurlRequest::default();
    while let Some(word) = words.next() {
        let (option, mut inline_value) = split_option(&word);
        let mut value = |option: &str| -> Result<String, CurlError> {
            match inline_value.take() {
                Some(inline) => Ok(inline),
                None => words.next().ok_or_else(|| CurlError::MissingValue {
                    option: option.to_owned(),
                }),
            }
        };

        match option {
            "-X" | "--request" => {
                let raw = value(option)?;
                let method = raw
                    .parse::<HttpMethod>()
                    .map_err(|err| CurlError::InvalidRequest { source: err })?;
                request.method = Some(method);
            }
            "-H" | "--header" => {
                let raw = value(option)?;
                request.push_header(&raw)?;
            }
            "-d" | "--data" | "--data-raw" | "--data-binary" | "--data-ascii" => {
                request.data.push(value(option)?);
            }
            "--data-urlencode" => {
                let raw = value(option)?;
                request.data.push(url_encode_data(option, &raw)?);
            }
            "--json" => {
                request.data.push(value(option)?);
                request.set_header_if_absent("Content-Type", "application/json");
                request.set_header_if_absent("Accept", "application/json");
            }
            "-A" | "--user-agent" => {
                let agent = value(option)?;
                request.set_header_if_absent("User-Agent", &agent);
            }
            "-e" | "--referer" => {
                let referer = value(option)?;
                request.set_header_if_absent("Referer", &referer);
            }
            "-b" | "--cookie" => {
                let cookie = value(option)?;
                request
                    .headers
                    .entry("Cookie".to_owned())
                    .or_default()
                    .push(cookie);
            }
            "-u" | "--user" => {
                let credentials = value(option)?;
                let encoded = STANDARD.encode(credentials.as_bytes());
                request.set_header_if_absent("Authorization", &format!("Basic {}", encoded));
            }
            "--url" => {
                let url = value(option)?;
                request.set_url(&url)?;
            }
            "-I" | "--head" => request.head = true,
            "-G" | "--get" => request.get = true,
            _ if IGNORED_WITH_VALUE.contains(&option) => {
                let skipped = value(option)?;
                debug!("Ignoring curl option {} {}", option, skipped);
            }
            _ if IGNORED_FLAGS.contains(&option) || is_ignored_short_cluster(option) => {
                debug!("Ignoring curl flag {}", option);
            }
            _ if option.starts_with('-') && option.len() > 1 => {
                return Err(CurlError::UnsupportedOption {
                    option: option.to_owned(),
                });
            }
            _ => request.set_url(&word)?,
        }
    }

    request.into_named_request()
}

/// Checks that a string is a curl command this tool can replay.
///
/// # Errors
///
/// Returns the same errors as [`parse_curl_command`].
pub fn validate_curl_command(command: &str) -> Result<(), CurlError> {
    let trimmed = command.trim();
    if trimmed.is_empty() {
        return Err(CurlError::Empty);
    }
    let starts_with_curl = trimmed
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("curl"));
    if !starts_with_curl {
        return Err(CurlError::NotCurl);
    }
    parse_curl_command(trimmed).map(|_| ())
}

/// Splits `--long=value` and attached short values such as `-XPOST`.
fn split_option(word: &str) -> (&str, Option<String>) {
    if let Some(long) = word.strip_prefix("--") {
        if let Some((name, value)) = long.split_once('=') {
            let option_len = name.len().saturating_add(2);
            return (word.get(..option_len).unwrap_or(word), Some(value.to_owned()));
        }
        return (word, None);
    }
    let mut chars = word.chars();
    if chars.next() == Some('-')
        && let Some(flag) = chars.next()
        && matches!(flag, 'X' | 'H' | 'd' | 'A' | 'e' | 'b' | 'u' | 'o' | 'm' | 'w')
        && word.len() > 2
    {
        return (word.get(..2).unwrap_or(word), word.get(2..).map(str::to_owned));
    }
    (word, None)
}

/// Encodes a `--data-urlencode` value: `content`, `=content` or
/// `name=content`, where only the content is percent-encoded.
fn url_encode_data(option: &str, raw: &str) -> Result<String, CurlError> {
    match raw.split_once('=') {
        Some(("", content)) => Ok(urlencoding::encode(content).into_owned()),
        Some((name, content)) => Ok(format!("{}={}", name, urlencoding::encode(content))),
        None if raw.contains('@') => Err(CurlError::FileData {
            option: option.to_owned(),
            value: raw.to_owned(),
        }),
        None => Ok(urlencoding::encode(raw).into_owned()),
    }
}

fn is_ignored_short_cluster(option: &str) -> bool {
    option
        .strip_prefix('-')
        .filter(|flags| !flags.is_empty() && !flags.starts_with('-'))
        .is_some_and(|flags| flags.chars().all(|flag| IGNORED_SHORT_FLAGS.contains(flag)))
}

fn with_default_scheme(url: &str) -> String {
    if url.contains("://") {
        url.to_owned()
    } else {
        format!("http://{}", url)
    }
}
