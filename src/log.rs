use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
};

use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use crate::{config, ClientError};

const LOG_FILE: &str = "habbofutbol.log";

/// Sets up the tracing subscriber for the client.
///
/// Debug builds print pretty logs for this crate (plus whatever `RUST_LOG` asks for) to stderr.
/// Release builds append errors to `habbofutbol.log` in the user's data directory.
pub fn setup_tracing() -> Result<(), ClientError> {
    if cfg!(debug_assertions) {
        let filter = EnvFilter::from_default_env()
            .add_directive("none".parse()?)
            .add_directive("habbofutbol=info".parse()?);

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::NONE)
            .with_writer(std::io::stderr)
            .pretty()
            .init();

        return Ok(());
    }

    let log_file = open_log_file(&log_file_path())?;

    tracing_subscriber::fmt::fmt()
        .with_span_events(FmtSpan::NONE)
        .with_max_level(LevelFilter::ERROR)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .init();

    Ok(())
}

fn log_file_path() -> PathBuf {
    config::data_dir()
        .map(|dir| dir.join(LOG_FILE))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE))
}

/// Open the log for appending, creating its directory on first use.
fn open_log_file(path: &Path) -> Result<File, ClientError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}
