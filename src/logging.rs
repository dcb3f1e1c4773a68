use crate::config::Config;
use log::{debug, error, info, warn};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let timeout = config.timeout.unwrap_or(30);
    let concurrency = config.concurrency_limit();
    let follow_redirects = config.follow_redirects.unwrap_or(true);
    let secondary_probe = config.secondary_probe.unwrap_or(false);

    info!(
        "Configuration: concurrency={concurrency}, timeout={timeout}s, follow_redirects={follow_redirects}"
    );
    info!("Secondary probe: enabled={secondary_probe}");
    if let Some(ref primary) = config.primary_domain {
        info!("Primary domain: {primary}");
    }
    if let Some(ref alternate) = config.alternate_base {
        info!("Alternate base: {alternate}");
    }
}

/// Log batch information
pub fn log_batch_info(record_count: usize, input: &str, output: &str) {
    info!("Probing {record_count} record(s) from {input}, writing to {output}");
}

/// Log individual probe classifications for debugging
pub fn log_probe_result(url: &str, effective_status: u16, redirect_to: Option<&str>) {
    match redirect_to {
        Some(target) => debug!("{url} -> {effective_status} (redirects to {target})"),
        None => debug!("{url} -> {effective_status}"),
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
