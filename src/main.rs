// src/main.rs

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging; RUST_LOG wins over -v
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Inspect { recipe }) => commands::cmd_inspect(&recipe),
        Some(Commands::Version {
            recipe,
            checkout,
            git,
        }) => commands::cmd_version(&recipe, &checkout, &git),
        Some(Commands::Build { args }) => commands::cmd_build(&args),
        Some(Commands::Package { args, output }) => commands::cmd_package(&args, &output),
        Some(Commands::Create { args, output }) => commands::cmd_create(&args, &output),
        Some(Commands::Info {
            recipe,
            options,
            json,
        }) => commands::cmd_info(&recipe, &options, json),
        Some(Commands::Completions { shell }) => commands::cmd_completions(shell),
        None => {
            // No command provided, show help
            println!("Pantry v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'pantry --help' for usage information");
            Ok(())
        }
    }
}
