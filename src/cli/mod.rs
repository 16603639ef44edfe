//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Aspex using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Aspex - ArchivesSpace bulk exporter
#[derive(Parser, Debug)]
#[command(name = "aspex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "aspex.toml", env = "ASPEX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ASPEX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export finding aids or MARC21 records from ArchivesSpace
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["aspex", "export", "--environment", "dev"]);
        assert_eq!(cli.config, "aspex.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from([
            "aspex",
            "--config",
            "custom.toml",
            "export",
            "--environment",
            "dev",
        ]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from([
            "aspex",
            "--log-level",
            "debug",
            "export",
            "--environment",
            "dev",
        ]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_export_flags() {
        let cli = Cli::parse_from([
            "aspex",
            "export",
            "--environment",
            "prod",
            "--format",
            "marc",
            "--repository",
            "2",
            "--resource",
            "150",
            "--workers",
            "4",
            "--validate",
            "--reformat",
        ]);

        let Commands::Export(args) = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(args.environment, "prod");
        assert_eq!(args.format, Some("marc".to_string()));
        assert_eq!(args.repository, 2);
        assert_eq!(args.resource, 150);
        assert_eq!(args.workers, Some(4));
        assert!(args.validate);
        assert!(args.reformat);
        assert!(!args.unpublished_resources);
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["aspex", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }
}
