//! Configuration commands

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::context::AppContext;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration as YAML
    Show,

    /// Print config and data file locations
    Path,
}

impl ConfigCommand {
    pub fn execute(self, ctx: &AppContext) -> Result<()> {
        match self {
            ConfigCommand::Show => {
                let yaml = serde_yaml_ng::to_string(&ctx.config)
                    .context("Failed to render configuration")?;
                print!("{yaml}");

                let key_status = if ctx.config.api_key().is_some() {
                    "set"
                } else {
                    "not set"
                };
                println!("# {} is {}", ctx.config.api_key_env, key_status);
            }
            ConfigCommand::Path => {
                let exists = if ctx.config_path.exists() {
                    ""
                } else {
                    " (not created, using defaults)"
                };
                println!("config:    {}{}", ctx.config_path.display(), exists);
                println!("favorites: {}", ctx.favorites_path().display());
            }
        }
        Ok(())
    }
}
