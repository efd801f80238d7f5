//! Subcommand implementations

pub mod add;
pub mod config;
pub mod migrate;
pub mod show;
pub mod slip;

use crate::shell::Shell;
use resultslip_core::{AppConfig, Result, SlipRenderer};
use resultslip_store::ResultStore;

/// Open the store and renderer described by `config`
pub fn open_services(config: &AppConfig) -> Result<(ResultStore, SlipRenderer)> {
    let store = ResultStore::open(&config.database)?;
    let renderer = SlipRenderer::new(config.slip.clone());
    Ok((store, renderer))
}

/// Run the interactive menu on stdin/stdout
pub fn run_shell(config: &AppConfig) -> Result<()> {
    let (store, renderer) = open_services(config)?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Shell::new(stdin.lock(), stdout.lock(), &store, &renderer).run()
}
