use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Env vars consulted for a filter directive, first match wins.
const LOG_ENV_VARS: [&str; 2] = ["CALLIT_LOG", "RUST_LOG"];

/// Installs the global stderr subscriber. Calling it again keeps the first one.
pub fn init_logging(verbose: bool, no_color: bool) {
    let directive = LOG_ENV_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok());
    let filter = log_filter(directive.as_deref(), verbose);

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

/// Filter for the run. Without a directive only our own events pass at
/// info (debug with `--verbose`); client libraries stay at warn.
pub(crate) fn log_filter(directive: Option<&str>, verbose: bool) -> EnvFilter {
    let fallback = if verbose {
        "warn,callit=debug"
    } else {
        "warn,callit=info"
    };
    directive
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}
