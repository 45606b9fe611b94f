//! Init command - writes a starter shinsa configuration

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use shinsa_core::config::CONFIG_FILENAME;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# shinsa configuration file
# See https://github.com/kzn-tools/shinsa for documentation

# Regex patterns for paths to include in review.
# When no include patterns are given, every discovered Python file is reviewed.
# include = ['^src/', '^app/']

# Regex patterns for paths to exclude from review. Excludes win over includes.
# exclude = ['^build/', '_pb2\.py$']
"#;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl InitArgs {
    pub fn run(&self) -> Result<()> {
        let config_path = Path::new(CONFIG_FILENAME);

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Config file '{}' already exists. Use --force to overwrite.",
                CONFIG_FILENAME
            );
        }

        fs::write(config_path, DEFAULT_CONFIG)?;
        println!(
            "{} Created {} configuration file",
            "✓".green().bold(),
            CONFIG_FILENAME.cyan()
        );
        Ok(())
    }
}
