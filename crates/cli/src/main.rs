//! HookStudio CLI — the main entry point.
//!
//! Commands:
//! - `onboard`  — Initialize config directory
//! - `generate` — One generation for a mode, printed to stdout
//! - `studio`   — Interactive session across modes
//! - `history`  — List or clear saved generations

use clap::{Parser, Subcommand};
use hookstudio_core::Mode;

mod commands;

#[derive(Parser)]
#[command(
    name = "hookstudio",
    about = "HookStudio — hooks, scripts, captions, hashtags and weekly plans for short-form video",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Keep history in memory only for this run
    #[arg(long, global = true)]
    ephemeral: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Onboard,

    /// Generate content once and print it
    Generate {
        /// hooks, scripts, captions, hashtags or planner
        #[arg(short, long, default_value = "hooks")]
        mode: Mode,

        /// Theme or niche of the video
        #[arg(short, long)]
        topic: String,

        /// Target audience
        #[arg(short, long)]
        audience: String,

        /// Tone of voice
        #[arg(long)]
        tone: Option<String>,

        /// Extra context for the prompt
        #[arg(short, long)]
        info: Option<String>,
    },

    /// Start an interactive studio session
    Studio,

    /// Show or clear generation history
    History {
        /// Only entries of this mode
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Delete all saved entries
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Generate {
            mode,
            topic,
            audience,
            tone,
            info,
        } => {
            let request = commands::generate::GenerateArgs {
                mode,
                topic,
                audience,
                tone,
                info,
            };
            commands::generate::run(request, cli.ephemeral).await?
        }
        Commands::Studio => commands::studio::run(cli.ephemeral).await?,
        Commands::History { mode, clear } => commands::history::run(mode, clear, cli.ephemeral)?,
    }

    Ok(())
}
