//! Output formatting for the CLI.
//!
//! Handles human-readable and JSON output formats.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use lsync_core::LocalePath;
use serde::Serialize;
use serde_json::json;

use crate::OutputFormat;

const YELLOW: &str = "\x1b[33;1m";
const RESET: &str = "\x1b[0m";

/// Direction of a transfer line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Push,
    Pull,
}

/// Output handler for CLI commands.
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Print a success message (green in human format).
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            match self.format {
                OutputFormat::Human => println!("\x1b[32m{}\x1b[0m", msg),
                OutputFormat::Json => println!("{}", json!({"type": "success", "message": msg})),
            }
        }
    }

    pub fn info(&self, msg: &str) {
        if !self.quiet {
            match self.format {
                OutputFormat::Human => println!("{}", msg),
                OutputFormat::Json => println!("{}", json!({"type": "info", "message": msg})),
            }
        }
    }

    /// Print a warning message (yellow in human format).
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            match self.format {
                OutputFormat::Human => eprintln!("\x1b[33m{}\x1b[0m", msg),
                OutputFormat::Json => eprintln!("{}", json!({"type": "warning", "message": msg})),
            }
        }
    }

    /// Print an error message (red in human format, always shown).
    pub fn error(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => eprintln!("\x1b[31;1mERROR: {}\x1b[0m", msg),
            OutputFormat::Json => eprintln!("{}", json!({"type": "error", "message": msg})),
        }
    }

    /// Print a whole result as JSON. Only used in JSON format.
    pub fn json<T: Serialize>(&self, value: &T) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string(value)?);
        Ok(())
    }

    /// `From: <local> To: <locale>` on push, reversed on pull.
    /// `local` is the path as it should be shown.
    pub fn transfer(&self, method: Method, local: &str, locale_path: &LocalePath) {
        if self.quiet || self.is_json() {
            return;
        }
        println!("{}", transfer_line(method, local, locale_path));
    }

    /// A spinner on stderr, hidden in quiet and JSON modes.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet || self.is_json() {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(msg.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }
}

/// `name (code)`, either part alone, or `?` when neither is known.
pub fn locale_label(locale_path: &LocalePath) -> String {
    match (locale_path.locale_name.as_str(), locale_path.locale_code.as_str()) {
        ("", "") => "?".to_string(),
        (name, "") => name.to_string(),
        ("", code) => format!("({code})"),
        (name, code) => format!("{name} ({code})"),
    }
}

fn transfer_line(method: Method, local: &str, locale_path: &LocalePath) -> String {
    let remote = format!("{YELLOW}{}{RESET}", locale_label(locale_path));
    let local = format!("{YELLOW}{local}{RESET}");
    let (from, to) = match method {
        Method::Push => (local, remote),
        Method::Pull => (remote, local),
    };
    format!("From: {from} To: {to}")
}
