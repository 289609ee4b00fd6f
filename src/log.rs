// src/log.rs
//! Subscriber setup for the binary. The library only emits `tracing` events.
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{fmt, prelude::*, util::TryInitError, EnvFilter};

#[derive(Debug, Error)]
pub enum LogError {
    #[error("could not open log file: {0}")]
    File(#[from] std::io::Error),
    #[error(transparent)]
    Init(#[from] TryInitError),
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "vct_scrape=info",
        1 => "vct_scrape=debug",
        _ => "vct_scrape=trace,reqwest=debug",
    }
}

/// Install the global subscriber: stderr always, plus an append-only file
/// when `log_file` is given. `RUST_LOG` overrides `verbosity`.
pub fn init(verbosity: u8, log_file: Option<&Path>) -> Result<(), LogError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let stderr = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let file = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let f = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(f)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .try_init()?;
    Ok(())
}
