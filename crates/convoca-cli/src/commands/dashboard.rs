use std::path::Path;

use chrono::NaiveDate;
use convoca_core::dashboard::summarize;

use crate::commands::common::{format_dashboard_lines, load_collections};
use crate::error::CliError;

pub fn run_dashboard(file: &Path, as_json: bool, today: NaiveDate) -> Result<(), CliError> {
    let collections = load_collections(file)?;
    let summary = summarize(&collections, today);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    for line in format_dashboard_lines(&summary) {
        println!("{line}");
    }
    let attention = summary.attention_needed();
    if !attention.is_empty() {
        println!();
        println!("Requieren atención:");
        for entry in attention {
            println!("  {} - {}", entry.name, entry.deadline.text);
        }
    }

    Ok(())
}
