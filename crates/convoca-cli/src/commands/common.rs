use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use convoca_core::api::{decode_collection, decode_collections};
use convoca_core::dashboard::{CollectionSummary, DashboardSummary};
use convoca_core::deadline::today_local;
use convoca_core::models::{Collection, CollectionId, Document};
use convoca_core::permissions::PermissionRecord;
use convoca_core::util::compact_text;

use crate::error::CliError;

const STDIN_PATH: &str = "-";

/// Parse `--today`, falling back to the local calendar day.
pub fn resolve_today(raw: Option<&str>) -> Result<NaiveDate, CliError> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| CliError::InvalidDate(value.to_string())),
        _ => Ok(today_local()),
    }
}

pub fn normalize_collection_id(id: &str) -> Result<CollectionId, CliError> {
    id.parse::<CollectionId>()
        .map_err(|_| CliError::EmptyCollectionId)
}

pub fn read_payload(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == STDIN_PATH {
        let mut buffer = String::new();
        io::stdin().lock().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }

    std::fs::read_to_string(path).map_err(|error| CliError::Input {
        path: path.display().to_string(),
        message: error.to_string(),
    })
}

pub fn load_collection(path: &Path) -> Result<Collection, CliError> {
    Ok(decode_collection(&read_payload(path)?)?)
}

pub fn load_collections(path: &Path) -> Result<Vec<Collection>, CliError> {
    Ok(decode_collections(&read_payload(path)?)?)
}

/// Write rendered output to stdout, a file, or a directory.
///
/// A directory target gets `default_file_name` appended.
pub fn write_output(
    rendered: &str,
    output_path: Option<&Path>,
    default_file_name: impl FnOnce() -> String,
) -> Result<Option<PathBuf>, CliError> {
    let Some(path) = output_path else {
        println!("{rendered}");
        return Ok(None);
    };

    let target = if path.is_dir() {
        path.join(default_file_name())
    } else {
        path.to_path_buf()
    };
    std::fs::write(&target, rendered)?;
    println!("{}", target.display());
    Ok(Some(target))
}

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn format_summary_lines(summary: &CollectionSummary) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({})", summary.name, summary.id),
        format!(
            "Progreso: {}/{} ({}%)",
            summary.progress.completed,
            summary.progress.total,
            summary.progress.rounded()
        ),
        format!(
            "Fecha límite: {} [{}]",
            summary.deadline.text,
            summary.deadline.status.as_str()
        ),
    ];
    if let Some(end_date) = summary.end_date {
        lines.push(format!("Cierre: {}", end_date.format("%Y-%m-%d")));
    }
    lines
}

pub fn format_dashboard_lines(summary: &DashboardSummary) -> Vec<String> {
    let mut lines = vec![
        format!("Convocatorias: {}", summary.collections),
        format!(
            "Documentos: {}/{}  promedio {:.1}%",
            summary.documents_completed, summary.documents_total, summary.average_progress
        ),
        format!(
            "safe={} warning={} critical={} overdue={}",
            summary.by_status.safe,
            summary.by_status.warning,
            summary.by_status.critical,
            summary.by_status.overdue
        ),
        String::new(),
    ];

    for entry in &summary.entries {
        let name = truncate(&compact_text(&entry.name), 32);
        lines.push(format!(
            "{:<8}  {name:<32}  {:>3}%  {}",
            entry.deadline.status.as_str(),
            entry.progress.rounded(),
            entry.deadline.text
        ));
    }

    lines
}

pub fn format_checklist_lines(documents: &[Document]) -> Vec<String> {
    documents
        .iter()
        .map(|doc| {
            let mark = if doc.is_completed() { "x" } else { " " };
            let file = doc.file_name.as_deref().unwrap_or("-");
            format!("[{mark}] {:<13}  {:<32}  {file}", doc.id.as_str(), truncate(&doc.name, 32))
        })
        .collect()
}

pub fn format_permission_lines(record: &PermissionRecord) -> Vec<String> {
    let flags = [
        ("can_view", record.can_view),
        ("can_create", record.can_create),
        ("can_edit", record.can_edit),
        ("can_delete", record.can_delete),
        ("can_add_collaborators", record.can_add_collaborators),
        ("can_remove_collaborators", record.can_remove_collaborators),
        ("can_upload_documents", record.can_upload_documents),
        ("can_delete_documents", record.can_delete_documents),
        ("can_manage_checklist", record.can_manage_checklist),
        ("can_view_history", record.can_view_history),
    ];

    let mut lines = vec![format!(
        "template: {}",
        record.template_name().unwrap_or("custom")
    )];
    lines.extend(
        flags
            .iter()
            .map(|(name, allowed)| format!("{name:<26} {}", if *allowed { "yes" } else { "no" })),
    );
    lines
}

pub fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = value.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}
