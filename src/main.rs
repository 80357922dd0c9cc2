mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use output::ColorWhen;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "har2postman")]
#[command(author, version, about = "Convert HAR files into Postman collections")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    color: ColorWhen,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a HAR file into a collection
    Convert(commands::ConvertCmd),

    /// Check that a file is a valid HAR document
    Validate(commands::ValidateCmd),

    /// Show the collection name a HAR file converts to
    Metadata(commands::MetadataCmd),

    /// List the supported conversion options
    Options(commands::OptionsCmd),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let color = cli.color.should_color();

    // Configure colored output
    if !color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Convert(cmd) => cmd.run(color),
        Commands::Validate(cmd) => cmd.run(color),
        Commands::Metadata(cmd) => cmd.run(color),
        Commands::Options(cmd) => cmd.run(color),
    }
}
