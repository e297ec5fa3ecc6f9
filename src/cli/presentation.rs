//! CLI presentation: text and json formatters per command.

use crate::classify::ClassificationReport;
use crate::diagnose::StaticDiagnostic;
use crate::error::PreviewError;
use crate::refresh::PreviewStatus;
use comfy_table::Table;
use owo_colors::OwoColorize;

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, PreviewError> {
    serde_json::to_string_pretty(value).map_err(|e| PreviewError::ConfigError(e.to_string()))
}

pub fn format_classification_text(report: &ClassificationReport) -> String {
    let mut out = format!("Mode: {}\n", report.mode.label().bold());
    if report.hits.is_empty() {
        out.push_str("No framework markers found");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Path", "Marker", "Kind"]);
    for hit in &report.hits {
        table.add_row(vec![
            hit.path.clone(),
            hit.marker.clone(),
            format!("{:?}", hit.kind),
        ]);
    }
    out.push_str(&table.to_string());
    out
}

pub fn format_classification_json(report: &ClassificationReport) -> Result<String, PreviewError> {
    to_json(report)
}

pub fn format_check_text(script_path: Option<&str>, diagnostic: Option<&StaticDiagnostic>) -> String {
    let subject = script_path.unwrap_or("(no script entry)");
    match diagnostic {
        Some(diagnostic) => format!(
            "{} {}\n  {} [{}]",
            "error".red().bold(),
            subject,
            diagnostic.message,
            diagnostic.rule.dimmed()
        ),
        None => format!("{} {}", "ok".green().bold(), subject),
    }
}

pub fn format_status_text(status: &PreviewStatus) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["State".to_string(), status.state.clone()]);
    table.add_row(vec!["Mode".to_string(), status.mode.clone()]);
    table.add_row(vec![
        "Error".to_string(),
        status.error_message.clone().unwrap_or_else(|| "-".to_string()),
    ]);
    table.add_row(vec!["Console".to_string(), status.console_count.to_string()]);
    table.add_row(vec![
        "Fingerprint".to_string(),
        status.document_fingerprint.chars().take(16).collect(),
    ]);
    table.to_string()
}

pub fn format_status_json(status: &PreviewStatus) -> Result<String, PreviewError> {
    to_json(status)
}
