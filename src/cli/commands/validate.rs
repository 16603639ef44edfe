//! Validate-config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match load_config(config_path) {
            Ok(config) => {
                println!("Configuration is valid: {config_path}");
                println!(
                    "  Environments: {}",
                    config
                        .environments
                        .keys()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                println!("  Default format: {}", config.export.format);
                println!("  Default workers: {}", config.export.workers);
                println!("  Export location: {}", config.export.export_location);
                Ok(0)
            }
            Err(e) => {
                eprintln!("Configuration validation failed: {e}");
                Ok(2)
            }
        }
    }
}
