use std::path::PathBuf;

use crate::constants::ENV_CONFIG;

/// Centralised cross-platform data directory.
/// Linux: ~/.config/pipet/
/// macOS: ~/Library/Application Support/pipet/
/// Windows: %APPDATA%/pipet/
pub fn data_dir() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
    });
    base.join("pipet")
}

/// Settings file: `$PIPET_CONFIG` if set, else {data_dir}/config.json
pub fn config_path() -> PathBuf {
    match std::env::var(ENV_CONFIG) {
        Ok(p) if !p.is_empty() => PathBuf::from(expand_tilde(&p)),
        _ => data_dir().join("config.json"),
    }
}

/// Log file: {data_dir}/pipet.log
pub fn log_path() -> PathBuf {
    data_dir().join("pipet.log")
}

/// Expand ~ to home directory in paths.
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") || path == "~" {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
