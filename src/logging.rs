//! File logging
//!
//! The terminal belongs to the game while it runs, so log lines go to a file.
//! `RUST_LOG` picks the filter; without it everything at INFO and above is kept.

use anyhow::{Context, Result, anyhow};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber, writing plain-text lines to `path`
pub fn init_file_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("Failed to install log subscriber: {err}"))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("snake.log");

        let err = init_file_logging(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to create log file"));
    }
}
