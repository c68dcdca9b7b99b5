//! Tracing initialization: every invocation appends to pipet.log.
//!
//! stdout is reserved for filter output and stderr for user-facing
//! messages, so diagnostics only ever go to the log file.

use std::sync::Mutex;

use crate::path_utils;

/// Initialize tracing to `{data_dir}/pipet.log` (append mode).
///
/// Level defaults to `info` and follows `RUST_LOG` when set. If the log file
/// cannot be opened, events go to the null device instead.
pub fn init_file_tracing() {
    use tracing_subscriber::EnvFilter;

    let log_path = path_utils::log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let writer: Box<dyn std::io::Write + Send> = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => Box::new(file),
        Err(_) => Box::new(std::io::sink()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(writer))
        .with_target(true)
        .with_ansi(false)
        .init();
}
