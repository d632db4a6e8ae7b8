//! Report stream formatting and file persistence

use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::config::ReportConfig;
use crate::report::{AuditEntry, AuditReport, ReportError};

/// Formats the lines of one report stream
///
/// One line per entry in the shape `{address} - {status}`, closed by a
/// summary line carrying the count and the moment of writing.
///
/// # Arguments
///
/// * `entries` - The entries belonging to this stream
/// * `label` - What the summary line calls the entries ("valid", "broken")
/// * `timestamp` - The moment recorded on the summary line
pub fn format_stream(entries: &[&AuditEntry], label: &str, timestamp: &str) -> String {
    let mut out = String::new();

    for entry in entries {
        out.push_str(&format!("{} - {}\n", entry.address, entry.status));
    }
    out.push_str(&format!(
        "Total {}: {} at {}\n",
        label,
        entries.len(),
        timestamp
    ));

    out
}

/// Appends both report streams to their configured files.
///
/// Streams are append-only, so repeated runs accumulate, each batch closed
/// by its own summary line. Both files share one timestamp.
pub fn write_report(report: &AuditReport, config: &ReportConfig) -> Result<(), ReportError> {
    let timestamp = Utc::now().to_rfc3339();

    let successes: Vec<&AuditEntry> = report.successes().collect();
    let failures: Vec<&AuditEntry> = report.failures().collect();

    append_stream(
        Path::new(&config.success_path),
        &format_stream(&successes, "valid", &timestamp),
    )?;
    append_stream(
        Path::new(&config.failure_path),
        &format_stream(&failures, "broken", &timestamp),
    )?;

    tracing::info!(
        "Report written: {} valid to {}, {} broken to {}",
        successes.len(),
        config.success_path,
        failures.len(),
        config.failure_path
    );

    Ok(())
}

fn append_stream(path: &Path, content: &str) -> Result<(), ReportError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ReportError::Io {
            path: path.display().to_string(),
            source,
        })?;

    file.write_all(content.as_bytes())
        .map_err(|source| ReportError::Io {
            path: path.display().to_string(),
            source,
        })
}
