// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod extract;
pub mod specs;

pub mod csv;
pub mod file;
pub mod progress;
pub mod provider;
pub mod scrape;
pub mod snapshot;
pub mod stats;

pub use error::{Error, Result};
pub use extract::{extract, extract_with_report, Extractor, Issue, Report};
pub use snapshot::{Element, Node, Position, Snapshot};
pub use stats::{ExtractionResult, Record, StatKind, StatValue};
