//! Add command
//!
//! Usage: resultslip add --id <ID> --name <NAME> --mark <UNIT=SCORE>...

use crate::input::{parse_mark_pair, require};
use clap::Args;
use resultslip_core::{AppConfig, Result, StudentRecord};
use resultslip_engine::save_results;
use resultslip_store::ResultStore;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Student ID
    #[arg(long)]
    pub id: String,

    /// Student name
    #[arg(long)]
    pub name: String,

    /// Unit mark as UNIT=SCORE; repeat for several units
    #[arg(short, long = "mark", value_parser = parse_mark_pair)]
    pub marks: Vec<(String, f64)>,
}

/// Execute add command
pub fn execute(args: AddArgs, config: &AppConfig) -> Result<()> {
    let record = build_record(args)?;
    let store = ResultStore::open(&config.database)?;

    save_results(&store, &record)?;
    println!("Student results saved successfully.");
    Ok(())
}

/// Same normalisation as the shell: id and name trimmed and required
fn build_record(args: AddArgs) -> Result<StudentRecord> {
    let student_id = require("Student ID", &args.id)?;
    let name = require("Student Name", &args.name)?;

    let mut record = StudentRecord::new(student_id, name);
    for (unit, score) in args.marks {
        record.add_subject(unit, score);
    }
    Ok(record)
}
