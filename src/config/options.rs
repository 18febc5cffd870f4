// src/config/options.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use super::consts::*;
use crate::error::{Error, Result};

/// Everything a run needs. Loaded from TOML; every section and key is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppOptions {
    pub extract: ExtractOptions,
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

impl AppOptions {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let opts: Self = toml::from_str(text)?;
        opts.extract.thresholds.validate()?;
        Ok(opts)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        let opts = Self::from_toml_str(&text)?;
        logd!("Config: loaded {}", path.display());
        Ok(opts)
    }
}

/* ---------------- Extraction ---------------- */

/// Geometric calibration for one widget layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    /// How far above its label a digit may sit.
    pub max_rows_above: u32,
    /// How far left/right of its label a digit may sit.
    pub max_col_offset: u32,
    /// Ghost distance in the whole-page layout pass.
    pub layout_dup_distance: u32,
    /// Ghost distance in the keyword-anchored pass.
    pub keyword_dup_distance: u32,
    /// Container levels walked by the keyword-anchored pass.
    pub max_ancestor_depth: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_rows_above: LABEL_MAX_ROWS_ABOVE,
            max_col_offset: LABEL_MAX_COL_OFFSET,
            layout_dup_distance: LAYOUT_DUP_DISTANCE,
            keyword_dup_distance: KEYWORD_DUP_DISTANCE,
            max_ancestor_depth: KEYWORD_MAX_DEPTH,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<()> {
        if self.max_ancestor_depth > MAX_ANCESTOR_DEPTH_LIMIT {
            return Err(Error::Config(format!(
                "max_ancestor_depth {} exceeds {}",
                self.max_ancestor_depth, MAX_ANCESTOR_DEPTH_LIMIT
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractOptions {
    pub thresholds: Thresholds,
    /// Skip the keyword-anchored pass entirely.
    pub layout_only: bool,
}

/* ---------------- Capture / retry ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrapeOptions {
    /// Directory holding `<username>.json` captures.
    pub snapshot_dir: PathBuf,
    /// Wait before every capture so counters can settle.
    pub settle_ms: u64,
    /// Captures per user while any stat is still unresolved.
    pub attempts: usize,
    pub workers: usize,
    pub pause_ms: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            snapshot_dir: PathBuf::from(DEFAULT_SNAPSHOT_DIR),
            settle_ms: SETTLE_MS,
            attempts: CAPTURE_ATTEMPTS,
            workers: WORKERS,
            pause_ms: REQUEST_PAUSE_MS,
        }
    }
}

/* ---------------- Export ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportType {
    SingleFile,
    /// One JSON document per user: `<username>_data.json`.
    PerUser,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Field separator for the delimited formats.
    pub fn delim(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            ExportFormat::Json => None,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            other => Err(Error::InvalidInput(format!("Unknown format: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub export_type: ExportType,
    pub include_headers: bool,
    out_path: OutputPath,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            export_type: ExportType::SingleFile,
            include_headers: false,
            out_path: OutputPath::default(),
        }
    }
}

impl ExportOptions {
    /// Single file: `<dir>/<stem>.<ext>`. Per user: the directory itself.
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        match self.export_type {
            ExportType::SingleFile => {
                let ext = self.out_path.ext.as_deref().unwrap_or(self.format.ext());
                path.push(join!(&self.out_path.file_stem, ".", ext));
            }
            ExportType::PerUser => { /* directory only */ }
        }
        path
    }

    /// Split user text into dir + stem. An explicit extension is kept even if
    /// the format changes later.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        let p = Path::new(s);

        match self.export_type {
            ExportType::SingleFile => {
                self.out_path.dir = p.parent().map(Path::to_path_buf).unwrap_or_default();
                if let Some(stem) = p.file_stem() {
                    self.out_path.file_stem = stem.to_string_lossy().into_owned();
                }
                self.out_path.ext = p.extension().map(|e| e.to_string_lossy().into_owned());
            }
            ExportType::PerUser => {
                self.out_path.dir = PathBuf::from(s);
                self.out_path.ext = None;
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
struct OutputPath {
    dir: PathBuf,
    file_stem: String, // without extension
    ext: Option<String>,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: s!(DEFAULT_FILE),
            ext: None,
        }
    }
}
