// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
    collections::HashMap,
};

use crate::config::consts::PER_USER_SUFFIX;
use crate::config::options::{ExportFormat, ExportOptions, ExportType};
use crate::core::sanitize::sanitize_filename;
use crate::csv::rows_to_string;
use crate::error::{Error, Result};
use crate::stats::Record;

/// Render records in the chosen format. JSON is an array of objects keyed
/// `username`, `followers`, `likes`, `following`, `videos`.
pub fn to_export_string(records: &[Record], format: ExportFormat, include_headers: bool) -> Result<String> {
    match format.delim() {
        Some(sep) => {
            let rows: Vec<Vec<String>> = records.iter().map(Record::to_row).collect();
            let headers = Record::headers();
            let headers = include_headers.then_some(headers.as_slice());
            Ok(rows_to_string(&rows, headers, sep))
        }
        None => {
            let mut text = serde_json::to_string_pretty(records)?;
            text.push('\n');
            Ok(text)
        }
    }
}

/// Write everything according to `export`. Returns the paths written.
pub fn write_export(export: &ExportOptions, records: &[Record]) -> Result<Vec<PathBuf>> {
    match export.export_type {
        ExportType::SingleFile => Ok(vec![write_export_single(export, records)?]),
        ExportType::PerUser => write_export_per_user(export, records),
    }
}

/// Write a single export file based on ExportOptions (path, headers policy, format).
/// Returns the final path written to.
pub fn write_export_single(export: &ExportOptions, records: &[Record]) -> Result<PathBuf> {
    let path = export.out_path();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let contents = to_export_string(records, export.format, export.include_headers)?;
    fs::write(&path, contents)?;
    logf!("Export: {} record(s) -> {}", records.len(), path.display());
    Ok(path)
}

/// One pretty JSON object per user, `<dir>/<username>_data.json`. The format
/// setting does not apply here.
pub fn write_export_per_user(export: &ExportOptions, records: &[Record]) -> Result<Vec<PathBuf>> {
    let outdir = export.out_path();
    ensure_directory(&outdir)?;

    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut written = Vec::with_capacity(records.len());

    for (n, record) in records.iter().enumerate() {
        let stem = join!(&sanitize_filename(&record.username, n), PER_USER_SUFFIX);
        let path = resolve_filename(&outdir, &stem, &mut seen, ExportFormat::Json.ext());

        let mut text = serde_json::to_string_pretty(record)?;
        text.push('\n');
        fs::write(&path, text)?;
        logd!("Export: {} -> {}", record.username, path.display());
        written.push(path);
    }

    logf!("Export: {} file(s) in {}", written.len(), outdir.display());
    Ok(written)
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::InvalidInput(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Duplicate handling **only within this run**
pub fn resolve_filename(
    dir: &Path,
    stem: &str,                        // already sanitized, no extension
    seen_names: &mut HashMap<String, usize>,
    ext: &str,
) -> PathBuf {
    let count = seen_names.entry(stem.to_string()).or_insert(0);

    // First occurrence: "<stem>.ext"
    // Subsequent:       "<stem> (N).ext" with N starting at 2
    let filename = if *count == 0 {
        format!("{stem}.{ext}")
    } else {
        format!("{stem} ({}).{ext}", *count + 1)
    };

    *count += 1;
    dir.join(filename)
}

/// Usernames from a list file: one per line, blank lines and `#` comments skipped.
pub fn read_username_list(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| s!(l))
        .collect())
}
