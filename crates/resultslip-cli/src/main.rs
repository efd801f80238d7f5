//! ResultSlip CLI
//!
//! Command-line interface for recording student marks and generating
//! result slips. Without a subcommand the interactive menu shell starts.

use clap::{Parser, Subcommand};
use resultslip_core::config::DEFAULT_CONFIG_FILE;
use resultslip_core::core_types::correlation::RequestContext;
use resultslip_core::logging_facility;
use resultslip_core::AppConfig;
use std::path::PathBuf;

mod commands;
mod input;
mod shell;

#[derive(Debug, Parser)]
#[command(name = "resultslip")]
#[command(about = "ResultSlip - Student marks and result slips", long_about = None)]
struct Cli {
    /// Configuration file; must exist when given. Without it, `resultslip.toml`
    /// is read if present, then defaults and RESULTSLIP__* variables apply.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Shell,
    /// Save one student's results
    Add(commands::add::AddArgs),
    /// Generate a student's result slip
    Slip(commands::slip::SlipArgs),
    /// Print a stored record with total, average and grade
    Show(commands::show::ShowArgs),
    /// Apply pending database migrations
    Migrate,
    /// Configuration file operations
    Config(commands::config::ConfigArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let (config_path, config_required) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    // `config init` must work even when the existing file is broken.
    if let Some(Commands::Config(args)) = &cli.command {
        if args.is_init() {
            let result = commands::config::execute(args, &config_path, None);
            exit_on_error(result);
            return;
        }
    }

    let config = match AppConfig::load(&config_path, config_required) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    logging_facility::init(config.logging.profile, config.logging.filter.as_deref());

    let result = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => commands::run_shell(&config),
        Commands::Add(args) => in_request("add", || commands::add::execute(args, &config)),
        Commands::Slip(args) => in_request("slip", || commands::slip::execute(args, &config)),
        Commands::Show(args) => in_request("show", || commands::show::execute(args, &config)),
        Commands::Migrate => in_request("migrate", || commands::migrate::execute(&config)),
        Commands::Config(args) => commands::config::execute(&args, &config_path, Some(&config)),
    };

    exit_on_error(result);
}

/// Run one non-interactive command inside its own correlation span
fn in_request<T>(origin: &'static str, f: impl FnOnce() -> T) -> T {
    let ctx = RequestContext::new(origin);
    let span = ctx.span();
    let _guard = span.enter();
    f()
}

fn exit_on_error(result: resultslip_core::Result<()>) {
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
