//! Output formatting - ASCII-only terminal output

use itsd_shared::automation::safe::{SafeCommand, SafeCommandOutput};
use itsd_shared::knowledge::SnapshotReport;
use itsd_shared::QueryAnswer;
use owo_colors::OwoColorize;
use serde::Serialize;

pub const SEPARATOR: &str = "--------------------------------------------------";

/// Terminal printer; colors are applied only when enabled
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, text: &str) -> String {
        if self.color {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn command(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    /// Full answer: response, then automation suggestions
    pub fn display_answer(&self, answer: &QueryAnswer) {
        println!();
        println!("{}", self.header("Copilot Response:"));
        println!("{}", self.dim(SEPARATOR));
        println!("{}", answer.response);

        if let Some(steps) = answer.automation_suggestions.as_deref().filter(|s| !s.is_empty()) {
            println!();
            println!("{}", self.header("Automation Suggestions:"));
            for step in steps {
                println!("  * {}", step.description);
                println!("    Command: {}", self.command(&step.command));
            }
        }

        println!("{}", self.dim(SEPARATOR));
    }

    /// Response text only (status / disk shortcuts)
    pub fn display_response(&self, answer: &QueryAnswer) {
        println!("{}", answer.response);
    }

    pub fn display_safe_output(&self, out: &SafeCommandOutput) {
        println!("{} {}", self.dim("$"), self.command(&out.command));
        println!("{}", out.output);
    }

    pub fn display_safe_list(&self) {
        println!("{}", self.header("[SAFE COMMANDS]"));
        for cmd in SafeCommand::ALL {
            println!("  {:<16} {}", cmd.key(), self.command(cmd.command()));
        }
    }

    pub fn display_report(&self, path: &str, report: &SnapshotReport) {
        println!("{} {}", self.header("[KB]"), path);
        for line in report.summary_lines() {
            println!("  {}", line);
        }
        println!();
        if report.is_complete() {
            self.display_success("Knowledge base is ready to use");
        } else {
            self.display_warning(&format!(
                "{} section(s) missing, loaded as empty",
                report.missing.len()
            ));
        }
    }

    pub fn display_success(&self, message: &str) {
        if self.color {
            println!("{} {}", "[OK]".bright_green(), message);
        } else {
            println!("[OK] {}", message);
        }
    }

    pub fn display_warning(&self, message: &str) {
        if self.color {
            println!("{} {}", "[WARNING]".yellow(), message);
        } else {
            println!("[WARNING] {}", message);
        }
    }

    pub fn display_error(&self, message: &str) {
        if self.color {
            eprintln!("{} {}", "[ERROR]".bright_red(), message.red());
        } else {
            eprintln!("[ERROR] {}", message);
        }
    }
}

/// Pretty JSON to stdout
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
