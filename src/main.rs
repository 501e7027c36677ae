//! Entry point for the folio viewer.
//!
//! - Load configuration from `conf/config.toml`.
//! - Load site content from the path given on the command line, or the
//!   configured default.
//! - Attach a section tracker to the content's sections and launch the GUI.

mod app;

use crate::app::run_app;
use anyhow::{Context, Result, anyhow};
use folio_core::config::{LogLevel, load_config};
use folio_core::content::load_content;
use folio_core::tracker::{SectionTracker, TrackerOptions};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let config = load_config(Path::new("conf/config.toml"));
    let rust_log = env::var(EnvFilter::DEFAULT_ENV).ok();
    match config_log_override(rust_log.as_deref(), config.log_level) {
        Some(level) => set_log_level(reload_handle, level),
        None => info!("RUST_LOG is set; ignoring config.log_level"),
    }

    let content_path = match parse_args()? {
        Some(path) => path,
        None => PathBuf::from(&config.content_path),
    };
    info!(
        path = %content_path.display(),
        level = %config.log_level,
        "Starting folio"
    );
    let content = load_content(&content_path);

    let tracker = SectionTracker::with_options(content.section_ids(), TrackerOptions::from(&config))
        .context("Failed to attach section tracking")?;
    info!(
        feed = %config.feed_url,
        center_offset_fraction = config.center_offset_fraction,
        nav_header_height = config.nav_header_height,
        "Active tracker configuration"
    );

    run_app(config, content, tracker).context("Failed to start the GUI")?;
    Ok(())
}

fn parse_args() -> Result<Option<PathBuf>> {
    let Some(path) = env::args().nth(1) else {
        return Ok(None);
    };
    let path = PathBuf::from(path);
    if !path.exists() {
        return Err(anyhow!(
            "Content file not found: {}\nUsage: folio [path-to-content.toml]",
            path.display()
        ));
    }
    Ok(Some(path))
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

/// Level from the config file, unless `RUST_LOG` already chose one.
fn config_log_override(rust_log: Option<&str>, configured: LogLevel) -> Option<&'static str> {
    match rust_log {
        Some(filter) if !filter.trim().is_empty() => None,
        _ => Some(configured.as_filter_str()),
    }
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Log level set from config");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_takes_precedence_over_config() {
        assert_eq!(config_log_override(Some("trace"), LogLevel::Warn), None);
        assert_eq!(config_log_override(None, LogLevel::Warn), Some("warn"));
        assert_eq!(config_log_override(Some("  "), LogLevel::Info), Some("info"));
    }
}
