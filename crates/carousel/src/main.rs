//! Carousel CLI - researched social carousels from hosted AI services.
//!
//! Takes a topic, an audience, and a tone, asks a text-generation service for
//! a nine-slide carousel, and optionally illustrates every slide.
//!
//! # Usage
//!
//! ```bash
//! # Serve the web form
//! carousel serve --bind 127.0.0.1:8501
//!
//! # One-shot generation
//! carousel generate --topic "Benefits of Turmeric" --audience "Women 25-45" --tone scientific-warm
//!
//! # View configuration
//! carousel config show
//! ```

use clap::{Parser, Subcommand};
use std::io::IsTerminal;

mod cli;
mod logging;
mod web;

/// Carousel - researched social carousels from hosted AI services.
#[derive(Parser, Debug)]
#[command(name = "carousel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(short, long, global = true, env = "CAROUSEL_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the carousel web form
    Serve(cli::serve::ServeArgs),

    /// Generate one carousel and print it
    Generate(cli::generate::GenerateArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = startup_config(&cli)?;
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Carousel v{}", carousel_core::VERSION);

    match cli.command {
        Some(Commands::Serve(args)) => cli::serve::execute(args, config).await,
        Some(Commands::Generate(args)) => cli::generate::execute(args, config).await,
        Some(Commands::Config(args)) => cli::config::execute(args, cli.config.as_deref()).await,
        None if std::io::stdin().is_terminal() => cli::interactive::run(config).await,
        None => anyhow::bail!("No command given. Run `carousel --help` for usage."),
    }
}

/// Load the config for this invocation.
///
/// A missing default-location file already yields defaults. Any other load
/// failure is fatal, except under `config`, which must still be able to show
/// the path and rewrite a broken file.
fn startup_config(cli: &Cli) -> anyhow::Result<carousel_core::Config> {
    match cli::load_config(cli.config.as_deref()) {
        Ok(config) => Ok(config),
        Err(e) if matches!(cli.command, Some(Commands::Config(_))) => {
            // Logging isn't initialized yet.
            eprintln!("Warning: Failed to load config: {e}");
            Ok(carousel_core::Config::default())
        }
        Err(e) => Err(anyhow::Error::new(e).context(format!(
            "Failed to load config from {}",
            cli::config_path(cli.config.as_deref()).display()
        ))),
    }
}
