use std::time::Duration;

use clap::Parser;

use super::parsers::{parse_duration_arg, parse_header};
use super::*;
use crate::error::ValidationError;

fn parse_args<const N: usize>(args: [&str; N]) -> Result<CallArgs, String> {
    CallArgs::try_parse_from(std::iter::once("callit").chain(args))
        .map_err(|err| format!("parse failed: {}", err))
}

#[test]
fn defaults_apply_when_only_url_given() -> Result<(), String> {
    let args = parse_args(["http://localhost:3000"])?;
    if args.url.as_deref() != Some("http://localhost:3000") {
        return Err(format!("Unexpected url: {:?}", args.url));
    }
    if args.attempts().get() != 10 || args.concurrency().get() != 10 {
        return Err(format!(
            "Unexpected defaults: {} attempts, {} concurrency",
            args.attempts(),
            args.concurrency()
        ));
    }
    if args.request_timeout != Duration::from_secs(30) {
        return Err(format!("Unexpected timeout: {:?}", args.request_timeout));
    }
    if args.output_format != OutputFormat::Text || args.has_request_template() {
        return Err("Unexpected output format or request template".to_owned());
    }
    Ok(())
}

#[test]
fn positional_attempts_and_concurrency() -> Result<(), String> {
    let args = parse_args(["http://localhost", "100", "7"])?;
    if args.attempts().get() != 100 || args.concurrency().get() != 7 {
        return Err(format!(
            "Unexpected values: {} attempts, {} concurrency",
            args.attempts(),
            args.concurrency()
        ));
    }
    Ok(())
}

#[test]
fn attempt_flags_work_without_url() -> Result<(), String> {
    let args = parse_args(["--curl", "curl http://localhost/", "-n", "25", "-C", "5"])?;
    if args.url.is_some() {
        return Err(format!("Unexpected url: {:?}", args.url));
    }
    if args.attempts().get() != 25 || args.concurrency().get() != 5 {
        return Err(format!(
            "Unexpected values: {} attempts, {} concurrency",
            args.attempts(),
            args.concurrency()
        ));
    }
    Ok(())
}

#[test]
fn zero_attempts_and_concurrency_are_rejected() -> Result<(), String> {
    if parse_args(["http://localhost", "0"]).is_ok() {
        return Err("Expected zero attempts to be rejected".to_owned());
    }
    if parse_args(["http://localhost", "10", "0"]).is_ok() {
        return Err("Expected zero concurrency to be rejected".to_owned());
    }
    if parse_args(["http://localhost", "ten"]).is_ok() {
        return Err("Expected a non-number to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn request_flags_build_a_template() -> Result<(), String> {
    let args = parse_args([
        "http://localhost",
        "-X",
        "post",
        "-H",
        "Content-Type: application/json",
        "-H",
        "X-Trace: 1",
        "-d",
        "{}",
        "--timeout",
        "1500ms",
        "--output-format",
        "json",
    ])?;
    if args.method != Some(HttpMethod::Post) {
        return Err(format!("Unexpected method: {:?}", args.method));
    }
    if args.headers.len() != 2 || !args.has_request_template() {
        return Err(format!("Unexpected headers: {:?}", args.headers));
    }
    if args.request_timeout != Duration::from_millis(1500) {
        return Err(format!("Unexpected timeout: {:?}", args.request_timeout));
    }
    if args.output_format != OutputFormat::Json {
        return Err(format!("Unexpected format: {:?}", args.output_format));
    }
    Ok(())
}

#[test]
fn curl_conflicts_with_url_and_request_flags() -> Result<(), String> {
    if parse_args(["--curl", "curl http://a/", "http://b/"]).is_ok() {
        return Err("Expected --curl and URL to conflict".to_owned());
    }
    if parse_args(["--curl", "curl http://a/", "-X", "POST"]).is_ok() {
        return Err("Expected --curl and -X to conflict".to_owned());
    }
    Ok(())
}

#[test]
fn config_conflicts_with_url_and_request_flags() -> Result<(), String> {
    if parse_args(["--config", "suite.toml", "http://b/"]).is_ok() {
        return Err("Expected --config and URL to conflict".to_owned());
    }
    if parse_args(["-c", "suite.toml", "-d", "x=1"]).is_ok() {
        return Err("Expected --config and -d to conflict".to_owned());
    }
    let args = parse_args(["-c", "suite.toml", "-n", "20", "-C", "4"])?;
    if args.config.as_deref() != Some("suite.toml") || args.attempts().get() != 20 {
        return Err(format!("Unexpected args: {:?}", args));
    }
    Ok(())
}

#[test]
fn header_parser_requires_a_name() -> Result<(), ValidationError> {
    let (name, value) = parse_header("Accept:  text/plain ")?;
    if name != "Accept" || value != "text/plain" {
        return Err(ValidationError::from(format!("{}: {}", name, value)));
    }
    match parse_header(": nameless") {
        Err(ValidationError::InvalidHeaderFormat { .. }) => {}
        other => return Err(ValidationError::from(format!("{:?}", other))),
    }
    match parse_header("no-colon") {
        Err(ValidationError::InvalidHeaderFormat { .. }) => Ok(()),
        other => Err(ValidationError::from(format!("{:?}", other))),
    }
}

#[test]
fn duration_parser_units() -> Result<(), String> {
    let cases = [
        ("250ms", Duration::from_millis(250)),
        ("5", Duration::from_secs(5)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
    ];
    for (raw, expected) in cases {
        let parsed = parse_duration_arg(raw).map_err(|err| err.to_string())?;
        if parsed != expected {
            return Err(format!("{} parsed as {:?}", raw, parsed));
        }
    }
    for raw in ["", "fast", "10y", "0s"] {
        if parse_duration_arg(raw).is_ok() {
            return Err(format!("Expected {:?} to be rejected", raw));
        }
    }
    Ok(())
}

#[test]
fn method_parsing_is_case_insensitive() -> Result<(), ValidationError> {
    for (raw, expected) in [
        ("get", HttpMethod::Get),
        ("Patch", HttpMethod::Patch),
        (" OPTIONS ", HttpMethod::Options),
    ] {
        let parsed: HttpMethod = raw.parse()?;
        if parsed != expected {
            return Err(ValidationError::from(format!("{} -> {}", raw, parsed)));
        }
    }
    match "ASHE".parse::<HttpMethod>() {
        Err(ValidationError::UnsupportedMethod { value }) if value == "ASHE" => Ok(()),
        other => Err(ValidationError::from(format!("{:?}", other))),
    }
}
