pub mod config;
pub mod generate;
pub mod prompt;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pipet::config::Settings;
use pipet::host::{EditorHost, FileHost, LineRange, Selection, StdioHost, WriteMode};

/// Where the selection comes from. Without `--file`, stdin is the selection.
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Source file holding the selection
    #[arg(long, short)]
    pub file: Option<PathBuf>,
    /// Selected lines, 1-based: START, START:END or START: (whole file if omitted)
    #[arg(long, short, requires = "file")]
    pub lines: Option<LineRange>,
}

/// Load settings: config file, then environment, then CLI flags.
pub fn load_settings(model: Option<String>, api_key: Option<String>) -> Result<Settings> {
    let path = pipet::path_utils::config_path();
    let mut settings = Settings::load(&path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;
    settings.apply_env();
    settings.apply_overrides(api_key, model);
    Ok(settings)
}

/// Read the selection without setting up a full host edit.
pub fn read_selection(args: &SelectionArgs) -> Result<Option<Selection>> {
    match &args.file {
        Some(path) => {
            let host = FileHost::open(path, args.lines, WriteMode::Stdout)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Ok(host.selection())
        }
        None => {
            let host = StdioHost::from_stdin().context("Failed to read stdin")?;
            Ok(host.selection())
        }
    }
}
