// File-based logging - tracing output goes to stderr and a timestamped log file.
//
// Creates a new log file on every app launch:
//   <data_dir>/com.vistagram.app/logs/vistagram-2026-03-01_14-30-00.log
//
// Keeps last 5 log files, deletes older ones.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_PREFIX: &str = "vistagram-";
const KEEP_LOGS: usize = 5;

static INIT: Once = Once::new();

/// Initialize logging. Call once at app startup; later calls do nothing.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. If the log file
/// cannot be created, logging still goes to stderr.
pub fn init(logs_dir: &Path) {
    INIT.call_once(|| {
        if let Err(e) = setup_logging(logs_dir) {
            eprintln!("Warning: Failed to initialize file logging: {}", e);
        }
    });
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn setup_logging(logs_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let log_file = match open_log_file(logs_dir) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: Logging to stderr only: {}", e);
            None
        }
    };

    let file_layer = log_file.map(|(file, _)| {
        fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .try_init()?;

    tracing::info!(logs_dir = %logs_dir.display(), "Logging initialized");
    Ok(())
}

/// Rotate old logs and open a fresh file for this launch
fn open_log_file(logs_dir: &Path) -> Result<(fs::File, PathBuf), io::Error> {
    fs::create_dir_all(logs_dir)?;

    // Leave room for the file about to be created
    rotate_logs(logs_dir, KEEP_LOGS.saturating_sub(1))?;

    let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
    let log_file_path = logs_dir.join(format!("{}{}.log", LOG_PREFIX, timestamp));

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    Ok((file, log_file_path))
}

/// Delete old log files, keeping the most recent `keep` files.
fn rotate_logs(logs_dir: &Path, keep: usize) -> Result<(), io::Error> {
    let mut log_files: Vec<(PathBuf, std::time::SystemTime)> = Vec::new();

    for entry in fs::read_dir(logs_dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_ours = path.extension().and_then(|e| e.to_str()) == Some("log")
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(LOG_PREFIX))
                .unwrap_or(false);

        if is_ours {
            if let Ok(metadata) = entry.metadata() {
                let modified = metadata.modified().unwrap_or(std::time::UNIX_EPOCH);
                log_files.push((path, modified));
            }
        }
    }

    // Newest first; the timestamped name breaks mtime ties
    log_files.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    for (path, _) in log_files.iter().skip(keep) {
        let _ = fs::remove_file(path);
    }

    Ok(())
}

/// Get the logs directory path.
pub fn logs_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("com.vistagram.app").join("logs"))
}
