//! Slip command
//!
//! Usage: resultslip slip <ID> [--output <FILE>]

use clap::Args;
use resultslip_core::{AppConfig, LogoStatus, Result, SlipError};
use resultslip_engine::{generate_slip, SlipOutcome};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SlipArgs {
    /// Student ID
    pub student_id: String,

    /// Output file path (default: <output_dir>/<ID>_ResultSlip.pdf)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute slip command
pub fn execute(args: SlipArgs, config: &AppConfig) -> Result<()> {
    let (store, renderer) = super::open_services(config)?;

    match generate_slip(&store, &renderer, &args.student_id, args.output.as_deref())? {
        SlipOutcome::Generated(report) => {
            if let LogoStatus::Missing(path) = &report.logo {
                eprintln!("Warning: Logo file not found at {}", path.display());
            }
            if let Some(path) = &report.destination {
                println!("Result slip saved to: {}", path.display());
            }
            Ok(())
        }
        SlipOutcome::NotFound => Err(SlipError::StudentNotFound {
            student_id: args.student_id,
        }
        .into()),
    }
}
