use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING_INIT: Once = Once::new();

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to stderr. Used by the CLI.
pub(crate) fn init_stderr(level: &str) {
    LOGGING_INIT.call_once(|| {
        let _ = fmt()
            .with_env_filter(filter(level))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

/// Log to a file so output does not land on the TUI.
pub(crate) fn init_file(level: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    LOGGING_INIT.call_once(|| {
        let _ = fmt()
            .with_env_filter(filter(level))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init();
    });
    Ok(())
}
