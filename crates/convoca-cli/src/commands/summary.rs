use std::path::Path;

use chrono::NaiveDate;
use convoca_core::dashboard::summarize_collection;

use crate::commands::common::{format_summary_lines, load_collection};
use crate::error::CliError;

pub fn run_summary(file: &Path, as_json: bool, today: NaiveDate) -> Result<(), CliError> {
    let collection = load_collection(file)?;
    let summary = summarize_collection(&collection, today);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for line in format_summary_lines(&summary) {
            println!("{line}");
        }
    }

    Ok(())
}
