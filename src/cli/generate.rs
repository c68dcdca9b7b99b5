use anyhow::{Context, Result};
use clap::Args;

use pipet::gemini::GeminiClient;
use pipet::host::{FileHost, StdioHost, WriteMode};
use pipet::pipeline::run_filter;
use pipet::{run_command, CommandKind, Outcome};

use super::SelectionArgs;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
    /// Print the edited file instead of rewriting it
    #[arg(long, requires = "file")]
    pub stdout: bool,
    /// Model name (overrides config and PIPET_MODEL)
    #[arg(long)]
    pub model: Option<String>,
    /// Gemini API key (overrides config and GEMINI_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,
}

/// `pipet comment|review|summarize`: generate a block and insert it.
pub fn run(kind: CommandKind, args: GenerateArgs) -> Result<Outcome> {
    let settings = super::load_settings(args.model, args.api_key)?;
    let client = GeminiClient::new(settings.endpoint(), settings.timeout());

    let outcome = match &args.selection.file {
        Some(path) => {
            let mode = if args.stdout { WriteMode::Stdout } else { WriteMode::InPlace };
            let mut host = FileHost::open(path, args.selection.lines, mode)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            run_command(kind, &settings, &mut host, &client)
                .with_context(|| format!("{} generation failed", kind))?
        }
        None => {
            let mut host = StdioHost::from_stdin().context("Failed to read stdin")?;
            run_filter(kind, &settings, &mut host, &client)
                .with_context(|| format!("{} generation failed", kind))?
        }
    };

    Ok(outcome)
}
