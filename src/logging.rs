use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    /// The TUI owns the terminal; without a log file nothing is written.
    Off,
}

/// Keeps the file writer flushing until dropped.
#[must_use]
pub struct LogGuard {
    _worker: Option<WorkerGuard>,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init(target: LogTarget) -> Result<LogGuard> {
    match target {
        LogTarget::Off => Ok(LogGuard { _worker: None }),
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!("init logging: {}", e))?;
            Ok(LogGuard { _worker: None })
        }
        LogTarget::File(path) => {
            let (dir, name) = split_log_path(&path)?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("create log dir {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(&dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow::anyhow!("init logging: {}", e))?;
            Ok(LogGuard {
                _worker: Some(guard),
            })
        }
    }
}

fn split_log_path(path: &Path) -> Result<(PathBuf, std::ffi::OsString)> {
    let name = path
        .file_name()
        .with_context(|| format!("log path {} has no file name", path.display()))?
        .to_os_string();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, name))
}
