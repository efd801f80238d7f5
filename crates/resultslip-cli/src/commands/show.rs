//! Show command
//!
//! Usage: resultslip show <ID> [--json]

use clap::Args;
use resultslip_core::errors::{ExError, ExErrorKind};
use resultslip_core::{AppConfig, Result};
use resultslip_engine::{show_record, RecordSummary};
use resultslip_store::ResultStore;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Student ID
    pub student_id: String,

    /// Print the record as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute show command
pub fn execute(args: ShowArgs, config: &AppConfig) -> Result<()> {
    let store = ResultStore::open(&config.database)?;
    let summary = show_record(&store, &args.student_id)?;

    if args.json {
        let json = serde_json::to_string_pretty(&summary).map_err(|e| {
            ExError::new(ExErrorKind::Internal)
                .with_op("show_json")
                .with_message(e.to_string())
        })?;
        println!("{}", json);
    } else {
        print!("{}", format_summary(&summary));
    }
    Ok(())
}

/// Plain-text rendering of a record, laid out like the slip
pub fn format_summary(summary: &RecordSummary) -> String {
    let unit_width = summary
        .marks
        .keys()
        .map(|unit| unit.chars().count())
        .max()
        .unwrap_or(0)
        .max("Unit".len());

    let mut out = String::new();
    out.push_str(&format!("Student ID: {}\n", summary.student_id));
    out.push_str(&format!("Name: {}\n", summary.name));
    out.push_str(&format!("{:<width$}  Marks\n", "Unit", width = unit_width));
    for (unit, score) in &summary.marks {
        out.push_str(&format!("{:<width$}  {}\n", unit, score, width = unit_width));
    }
    out.push_str(&format!("Total Marks: {}\n", summary.total));
    out.push_str(&format!("Average Marks: {:.2}\n", summary.average));
    out.push_str(&format!("Grade: {}\n", summary.grade));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use resultslip_core::StudentRecord;

    #[test]
    fn test_format_summary() {
        let summary = RecordSummary::from(
            StudentRecord::new("S1", "Jane")
                .with_subject("Math", 85.0)
                .with_subject("Physics", 95.0),
        );

        let text = format_summary(&summary);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Student ID: S1",
                "Name: Jane",
                "Unit     Marks",
                "Math     85",
                "Physics  95",
                "Total Marks: 180",
                "Average Marks: 90.00",
                "Grade: A",
            ]
        );
    }
}
