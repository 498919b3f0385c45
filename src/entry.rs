use std::ffi::OsString;
use std::path::Path;

use clap::{CommandFactory, FromArgMatches};
use tracing::{error, warn};

use crate::args::{CallArgs, OutputFormat};
use crate::config::{DEFAULT_CONFIG_FILES, apply_config, load_config};
use crate::curl::parse_curl_command;
use crate::engine::{RunPlan, make_it};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{ClientSettings, HeaderValues, NamedRequest, RequestSpec, RequestTemplate};
use crate::shutdown::ShutdownReceiver;
use crate::system::shutdown_handlers::{setup_signal_shutdown_handler, shutdown_channel};
use crate::system::summary_output::print_result;

pub(crate) fn run() -> AppResult<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    crate::system::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(ValidationError::RuntimeBuildFailed { source: err }))?;

    runtime.block_on(run_async(args))
}

fn parse_args() -> AppResult<Option<CallArgs>> {
    let mut cmd = CallArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = CallArgs::from_arg_matches(&matches)?;

    Ok(Some(args))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

async fn run_async(args: CallArgs) -> AppResult<()> {
    let requests = resolve_requests(&args)?;
    let plan = RunPlan {
        attempts: args.attempts().get(),
        concurrency: args.concurrency(),
    };
    let settings = ClientSettings {
        request_timeout: args.request_timeout,
    };

    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let outcome = run_requests(
        &requests,
        plan,
        &settings,
        &mut shutdown_rx,
        args.output_format,
    )
    .await;

    signal_handle.abort();
    outcome
}

async fn run_requests(
    requests: &[NamedRequest],
    plan: RunPlan,
    settings: &ClientSettings,
    shutdown_rx: &mut ShutdownReceiver,
    output_format: OutputFormat,
) -> AppResult<()> {
    for request in requests {
        match make_it(&request.spec, plan, settings, shutdown_rx).await {
            Ok(result) => print_result(&result, request.name.as_deref(), output_format)?,
            Err(err) => {
                if err.is_cancelled() {
                    warn!("{}", err);
                } else {
                    error!("Run against {} failed: {}", request.spec.url(), err);
                }
                return Err(err);
            }
        }
    }
    Ok(())
}

/// Works out what to benchmark from the command line.
///
/// `--curl` wins, then an explicit `--config`, then the CLI URL. Both are
/// rejected by clap alongside a URL; the default config files are only
/// consulted when no URL was given.
pub(crate) fn resolve_requests(args: &CallArgs) -> AppResult<Vec<NamedRequest>> {
    if let Some(command) = args.curl.as_deref() {
        return Ok(vec![parse_curl_command(command)?]);
    }

    let config_path = args.config.as_deref();
    if (config_path.is_some() || args.url.is_none())
        && let Some(config) = load_config(config_path)?
    {
        return Ok(apply_config(config)?);
    }

    let Some(url) = args.url.as_deref() else {
        error!("Missing URL (pass a URL, --curl, or a config file).");
        return Err(AppError::validation(ValidationError::MissingUrl));
    };

    let spec = if args.has_request_template() {
        let mut headers = HeaderValues::new();
        for (name, value) in &args.headers {
            headers.entry(name.clone()).or_default().push(value.clone());
        }
        let body = args.data.clone().unwrap_or_default();
        RequestSpec::from(RequestTemplate::new(
            args.method.unwrap_or_default(),
            url,
            headers,
            body,
        )?)
    } else {
        RequestSpec::for_url(url)?
    };
    Ok(vec![NamedRequest::unnamed(spec)])
}
