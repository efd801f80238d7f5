//! Interactive menu shell
//!
//! Line-oriented loop over any `BufRead`/`Write` pair. Each menu operation
//! runs in its own correlation span; an error ends that operation only and
//! the menu is shown again.

use crate::input::{parse_count, parse_score, require};
use resultslip_core::core_types::correlation::RequestContext;
use resultslip_core::errors::{ExError, ExErrorKind};
use resultslip_core::{LogoStatus, Result, SlipRenderer, StudentRecord};
use resultslip_engine::{generate_slip, save_results, SlipOutcome};
use resultslip_store::ResultStore;
use std::io::{BufRead, Write};

const MENU: &str = "Choose an operation:\n1. Add Student Results\n2. Generate Result Slip\n3. Exit\n";

/// Menu entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    AddResults,
    GenerateSlip,
    Exit,
    Invalid(String),
}

impl MenuChoice {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => MenuChoice::AddResults,
            "2" => MenuChoice::GenerateSlip,
            "3" => MenuChoice::Exit,
            other => MenuChoice::Invalid(other.to_string()),
        }
    }
}

pub struct Shell<'a, R, W> {
    input: R,
    output: W,
    store: &'a ResultStore,
    renderer: &'a SlipRenderer,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(input: R, output: W, store: &'a ResultStore, renderer: &'a SlipRenderer) -> Self {
        Self {
            input,
            output,
            store,
            renderer,
        }
    }

    /// Run the menu until `3` or end of input
    ///
    /// # Errors
    /// * `Io` - the terminal could not be read or written
    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.output, "{}", MENU)?;
            let Some(line) = self.prompt("Enter choice: ")? else {
                writeln!(self.output)?;
                writeln!(self.output, "Exiting program. Goodbye!")?;
                return Ok(());
            };

            let result = match MenuChoice::parse(&line) {
                MenuChoice::AddResults => self.in_request("add_results", Self::add_results),
                MenuChoice::GenerateSlip => self.in_request("generate_slip", Self::generate_slip),
                MenuChoice::Exit => {
                    writeln!(self.output, "Exiting program. Goodbye!")?;
                    return Ok(());
                }
                MenuChoice::Invalid(_) => {
                    writeln!(self.output, "Invalid choice! Please enter 1, 2, or 3.")?;
                    Ok(())
                }
            };

            if let Err(e) = result {
                self.report(&e)?;
            }
        }
    }

    fn in_request(
        &mut self,
        origin: &'static str,
        op: fn(&mut Self) -> Result<()>,
    ) -> Result<()> {
        let ctx = RequestContext::new(origin);
        let span = ctx.span();
        let _guard = span.enter();
        op(self)
    }

    fn add_results(&mut self) -> Result<()> {
        let student_id = require("Student ID", &self.ask("Enter Student ID: ")?)?;
        let name = require("Student Name", &self.ask("Enter Student Name: ")?)?;
        let count = parse_count("number of units", &self.ask("Number of units: ")?)?;

        let mut record = StudentRecord::new(student_id, name);
        for i in 0..count {
            let unit = require("Unit name", &self.ask(&format!("Unit {} Name: ", i + 1))?)?;
            let score = parse_score(&self.ask(&format!("Marks for {}: ", unit))?)?;
            record.add_subject(unit, score);
        }

        save_results(self.store, &record)?;
        writeln!(self.output, "Student results saved successfully.")?;
        Ok(())
    }

    fn generate_slip(&mut self) -> Result<()> {
        let student_id = require("Student ID", &self.ask("Enter Student ID: ")?)?;

        match generate_slip(self.store, self.renderer, &student_id, None)? {
            SlipOutcome::Generated(report) => {
                if let LogoStatus::Missing(path) = &report.logo {
                    writeln!(
                        self.output,
                        "Warning: Logo file not found at {}",
                        path.display()
                    )?;
                }
                if let Some(path) = &report.destination {
                    writeln!(self.output, "Result slip saved to: {}", path.display())?;
                }
            }
            SlipOutcome::NotFound => writeln!(self.output, "Student record not found!")?,
        }
        Ok(())
    }

    fn report(&mut self, err: &ExError) -> Result<()> {
        match err.kind() {
            ExErrorKind::NotFound => writeln!(self.output, "Student record not found!")?,
            ExErrorKind::InvalidInput
            | ExErrorKind::Storage
            | ExErrorKind::Render
            | ExErrorKind::Config => writeln!(self.output, "Error: {}", describe(err))?,
            ExErrorKind::Io | ExErrorKind::Internal => {
                tracing::error!(err_code = err.code(), "shell operation failed: {}", err);
                writeln!(self.output, "Error: {}", describe(err))?
            }
        }
        Ok(())
    }

    /// Print `text` and read one line; `None` at end of input
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Like `prompt`, but end of input aborts the current operation
    fn ask(&mut self, text: &str) -> Result<String> {
        self.prompt(text)?.ok_or_else(|| {
            ExError::new(ExErrorKind::Io)
                .with_op("read_input")
                .with_message("input ended before the operation was complete")
        })
    }
}

fn describe(err: &ExError) -> String {
    if err.message().is_empty() {
        err.to_string()
    } else {
        err.message().to_string()
    }
}
