mod cli;

use clap::{Parser, Subcommand};

use cli::generate::GenerateArgs;
use cli::SelectionArgs;
use pipet::{CommandKind, Outcome};

#[derive(Parser)]
#[command(
    name = "pipet",
    version,
    about = "Gemini-written code comments, reviews and summaries as block comments"
)]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert a one-sentence comment above the selection
    Comment(GenerateArgs),
    /// Insert a code review above the selection
    Review(GenerateArgs),
    /// Insert a short summary above the selection
    Summarize(GenerateArgs),
    /// Print the prompt a command would send, without calling the model
    Prompt {
        /// comment, review or summarize
        kind: CommandKind,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Display the full configuration
    Show,
    /// Get a config value (dot notation: google.gemini.textModel)
    Get {
        /// Config key (dot notation)
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key (dot notation)
        key: String,
        /// Value (JSON: 30, "string", or a bare string)
        value: String,
    },
}

fn main() {
    let app = App::parse();
    pipet::tracing_init::init_file_tracing();

    let result = match app.command {
        Commands::Comment(args) => generate(CommandKind::Comment, args),
        Commands::Review(args) => generate(CommandKind::Review, args),
        Commands::Summarize(args) => generate(CommandKind::Summary, args),
        Commands::Prompt { kind, selection } => cli::prompt::run(kind, &selection),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::config::run_show(),
            ConfigAction::Get { key } => cli::config::run_get(&key),
            ConfigAction::Set { key, value } => cli::config::run_set(&key, &value),
        },
    };

    if let Err(e) = result {
        tracing::error!(error = %format!("{:#}", e), "Command failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// The missing-key message has already been shown by the pipeline; only the
/// exit status is left to set.
fn generate(kind: CommandKind, args: GenerateArgs) -> anyhow::Result<()> {
    match cli::generate::run(kind, args)? {
        Outcome::Inserted { .. } | Outcome::NoActiveEditor => Ok(()),
        Outcome::MissingApiKey => std::process::exit(1),
    }
}
