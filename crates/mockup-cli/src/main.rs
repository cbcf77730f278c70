mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mockup", about = "AI product mockup studio")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a batch of mockups from a product image
    Generate(commands::generate::GenerateArgs),
    /// Print the prompt a configuration compiles to
    Prompt(commands::prompt::PromptArgs),
    /// Print or save a default studio config
    Config(commands::config::ConfigArgs),
    /// List the predefined options for every category
    Choices,
    /// Show what an upload would be sent as
    Inspect(commands::inspect::InspectArgs),
    /// Interactive session: generate, browse, edit and view mockups
    Studio(commands::studio::StudioArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Prompt(args) => commands::prompt::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Choices => commands::choices::run(),
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::Studio(args) => commands::studio::run(args),
    }
}
