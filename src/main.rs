// Aspex - ArchivesSpace Bulk Export Tool
// Copyright (c) 2025 Aspex Contributors
// Licensed under the MIT License

use aspex::cli::{Cli, Commands};
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let log_level = cli.log_level.as_deref().unwrap_or("info").to_string();

    // Logging is initialized inside the export command once the work
    // directory is known, so the log file can live alongside the exports
    let exit_code = match execute_command(&cli, &log_level).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, log_level: &str) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config, log_level).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
    }
}
