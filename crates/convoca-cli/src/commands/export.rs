use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use convoca_core::export::{
    render_history_export, render_report_export, suggested_export_file_name, HistoryFormat,
    ReportFormat,
};

use crate::cli::{HistoryExportFormat, ReportExportFormat};
use crate::commands::common::{load_collection, now_ms, write_output};
use crate::error::CliError;

impl From<HistoryExportFormat> for HistoryFormat {
    fn from(format: HistoryExportFormat) -> Self {
        match format {
            HistoryExportFormat::Json => Self::Json,
            HistoryExportFormat::Csv => Self::Csv,
        }
    }
}

impl From<ReportExportFormat> for ReportFormat {
    fn from(format: ReportExportFormat) -> Self {
        match format {
            ReportExportFormat::Json => Self::Json,
            ReportExportFormat::Markdown => Self::Markdown,
        }
    }
}

pub fn run_history(
    file: &Path,
    format: HistoryExportFormat,
    output_path: Option<&Path>,
) -> Result<Option<PathBuf>, CliError> {
    let collection = load_collection(file)?;
    let format = HistoryFormat::from(format);
    let rendered = render_history_export(&collection, format)?;

    write_output(&rendered, output_path, || {
        suggested_export_file_name("historial", &collection, format.extension(), now_ms())
    })
}

pub fn run_report(
    file: &Path,
    format: ReportExportFormat,
    output_path: Option<&Path>,
    today: NaiveDate,
) -> Result<Option<PathBuf>, CliError> {
    let collection = load_collection(file)?;
    let format = ReportFormat::from(format);
    let rendered = render_report_export(&collection, format, today)?;

    write_output(&rendered, output_path, || {
        suggested_export_file_name("reporte", &collection, format.extension(), now_ms())
    })
}
