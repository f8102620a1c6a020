//! History and checklist exports shared by all clients.

use std::fmt::Write as _;

use chrono::{NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::deadline::evaluate_deadline;
use crate::models::{Collection, HistoryEntry};
use crate::progress::calculate_progress;

/// Output format for a collection's history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryFormat {
    Json,
    Csv,
}

/// Output format for a checklist report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Json,
    Markdown,
}

impl HistoryFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl ReportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Serializable history row used in JSON and CSV exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub timestamp: String,
    pub user: String,
    pub action: String,
    pub details: String,
}

#[must_use]
pub fn history_to_row(entry: &HistoryEntry) -> HistoryRow {
    HistoryRow {
        timestamp: entry.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        user: entry.user.clone(),
        action: entry.action.as_str().to_string(),
        details: entry.details.clone().unwrap_or_default(),
    }
}

/// Rows in chronological order (stable for equal timestamps).
fn history_rows(collection: &Collection) -> Vec<HistoryRow> {
    let mut entries = collection.history.iter().collect::<Vec<_>>();
    entries.sort_by_key(|entry| entry.timestamp);
    entries.into_iter().map(history_to_row).collect()
}

pub fn render_history_json(collection: &Collection) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&history_rows(collection))
}

/// Render history as CSV with a Spanish header row.
#[must_use]
pub fn render_history_csv(collection: &Collection) -> String {
    let mut output = String::from("fecha,usuario,accion,detalles\n");
    for row in history_rows(collection) {
        let _ = writeln!(
            output,
            "{},{},{},{}",
            csv_field(&row.timestamp),
            csv_field(&row.user),
            csv_field(&row.action),
            csv_field(&row.details)
        );
    }
    output
}

pub fn render_history_export(
    collection: &Collection,
    format: HistoryFormat,
) -> serde_json::Result<String> {
    match format {
        HistoryFormat::Json => render_history_json(collection),
        HistoryFormat::Csv => Ok(render_history_csv(collection)),
    }
}

/// Quote a CSV field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistReport {
    pub id: String,
    pub name: String,
    pub completed: usize,
    pub total: usize,
    pub percentage: f64,
    pub deadline: String,
    pub items: Vec<ChecklistReportItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistReportItem {
    pub name: String,
    pub status: String,
    pub file_name: Option<String>,
    pub guide: Option<String>,
}

#[must_use]
pub fn checklist_report(collection: &Collection, today: NaiveDate) -> ChecklistReport {
    let progress = calculate_progress(collection);
    ChecklistReport {
        id: collection.id.to_string(),
        name: collection.name.clone(),
        completed: progress.completed,
        total: progress.total,
        percentage: progress.percentage,
        deadline: evaluate_deadline(collection.end_date, today).text,
        items: collection
            .documents
            .iter()
            .map(|doc| ChecklistReportItem {
                name: doc.name.clone(),
                status: doc.status.as_str().to_string(),
                file_name: doc.file_name.clone(),
                guide: doc.guide.as_ref().map(|guide| guide.file_name.clone()),
            })
            .collect(),
    }
}

#[must_use]
pub fn render_report_markdown(collection: &Collection, today: NaiveDate) -> String {
    let report = checklist_report(collection, today);
    let progress = calculate_progress(collection);
    let mut output = String::new();

    let _ = writeln!(output, "# {}", report.name);
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "Progreso: {}/{} ({}%)",
        report.completed,
        report.total,
        progress.rounded()
    );
    let _ = writeln!(output, "Fecha límite: {}", report.deadline);
    let _ = writeln!(output);
    for item in &report.items {
        let mark = if item.status == "completed" { "x" } else { " " };
        let _ = write!(output, "- [{mark}] {}", item.name);
        if let Some(file_name) = &item.file_name {
            let _ = write!(output, " ({file_name})");
        }
        if let Some(guide) = &item.guide {
            let _ = write!(output, " [guía: {guide}]");
        }
        output.push('\n');
    }

    output
}

pub fn render_report_export(
    collection: &Collection,
    format: ReportFormat,
    today: NaiveDate,
) -> serde_json::Result<String> {
    match format {
        ReportFormat::Json => serde_json::to_string_pretty(&checklist_report(collection, today)),
        ReportFormat::Markdown => Ok(render_report_markdown(collection, today)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(
    kind: &str,
    collection: &Collection,
    extension: &str,
    timestamp_ms: i64,
) -> String {
    let slug = collection
        .id
        .as_str()
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '-' })
        .collect::<String>();
    format!("convoca-{kind}-{slug}-{timestamp_ms}.{extension}")
}
