//! Config command
//!
//! Usage: resultslip config init [--path <FILE>] [--force]
//!        resultslip config show

use clap::{Args, Subcommand};
use resultslip_core::errors::{ExError, ExErrorKind};
use resultslip_core::{AppConfig, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

impl ConfigArgs {
    pub fn is_init(&self) -> bool {
        matches!(self.command, ConfigCommand::Init { .. })
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a configuration file with the default settings
    Init {
        /// Where to write (default: the --config path)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration as TOML
    Show,
}

/// Execute config command
///
/// `effective` is the loaded configuration; `init` runs without one.
pub fn execute(args: &ConfigArgs, config_path: &Path, effective: Option<&AppConfig>) -> Result<()> {
    match &args.command {
        ConfigCommand::Init { path, force } => {
            let target = path.as_deref().unwrap_or(config_path);
            init(target, *force)?;
            println!("Wrote default configuration to {}", target.display());
            Ok(())
        }
        ConfigCommand::Show => {
            let text = match effective {
                Some(config) => config.to_toml_string()?,
                None => AppConfig::load(config_path, false)?.to_toml_string()?,
            };
            print!("{}", text);
            Ok(())
        }
    }
}

/// Write the default configuration to `target`
pub fn init(target: &Path, force: bool) -> Result<()> {
    if target.exists() && !force {
        return Err(ExError::new(ExErrorKind::Config)
            .with_op("config_init")
            .with_message(format!(
                "{} already exists (use --force to overwrite)",
                target.display()
            )));
    }

    let text = AppConfig::default().to_toml_string()?;
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(target, text)?;
    Ok(())
}
