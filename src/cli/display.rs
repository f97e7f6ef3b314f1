use console::style;

use crate::runner::{BackupOutcome, RunReport};

pub struct Display;

impl Display {
    pub fn new() -> Self {
        Self
    }

    pub fn print_run_report(&self, label: &str, report: &RunReport) {
        match report.outcome {
            BackupOutcome::Succeeded => {
                self.print_success(&format!("Backup “{}” completed", label));
                if !report.log_truncated {
                    self.print_warning("Log file was not truncated");
                }
            }
            BackupOutcome::Failed { code: Some(code) } => {
                self.print_error(&format!("Backup “{}” failed (exit code {})", label, code));
            }
            BackupOutcome::Failed { code: None } => {
                self.print_error(&format!("Backup “{}” failed", label));
            }
        }

        if let Some(excerpt) = report.failure_excerpt() {
            for line in excerpt.lines() {
                eprintln!("  {}", style(line).dim());
            }
        }
    }

    pub fn print_success(&self, message: &str) {
        eprintln!("{} {}", style("✓").green().bold(), message);
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red().bold(), message);
    }

    pub fn print_warning(&self, message: &str) {
        eprintln!("{} {}", style("!").yellow().bold(), message);
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
