// src/provider.rs
//
// Where snapshots come from. Driving a browser is someone else's job; this
// crate only needs something that hands back captured text + positions.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::snapshot::Snapshot;

/// Produces the page state for one user at one instant.
///
/// `attempt` counts from 0; a live capturer ignores it, a replay uses it to
/// hand back successive captures.
pub trait SnapshotProvider: Send + Sync {
    fn capture(&self, username: &str, attempt: usize) -> Result<Snapshot>;
}

/// Read every capture in a snapshot file, oldest first. On disk a capture
/// file holds one snapshot object or an array of successive ones.
pub fn load_captures(path: &Path) -> Result<Vec<Snapshot>> {
    let text = fs::read_to_string(path)?;
    let captures = match serde_json::from_str::<Value>(&text)? {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value::<Snapshot>(item)
                    .map_err(|e| Error::Snapshot(format!("{}: capture #{i}: {e}", path.display())))
            })
            .collect::<Result<Vec<_>>>()?,
        single => vec![serde_json::from_value::<Snapshot>(single)?],
    };
    if captures.is_empty() {
        return Err(Error::Snapshot(format!("{}: no captures", path.display())));
    }
    let source = path.display().to_string();
    Ok(captures
        .into_iter()
        .map(|s| if s.source().is_some() { s } else { s.with_source(source.clone()) })
        .collect())
}

/// Replays captures saved as `<dir>/<username>.json`.
/// Attempt `n` gets capture `n`; past the end the last capture repeats.
pub struct FixtureProvider {
    dir: PathBuf,
}

impl FixtureProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, username: &str) -> PathBuf {
        self.dir.join(join!(username, ".json"))
    }
}

impl SnapshotProvider for FixtureProvider {
    fn capture(&self, username: &str, attempt: usize) -> Result<Snapshot> {
        let path = self.path_for(username);
        if !path.is_file() {
            return Err(Error::NotFound(format!("no capture for {username} at {}", path.display())));
        }
        let mut captures = load_captures(&path)?;
        let ix = attempt.min(captures.len() - 1);
        logd!("Capture: {username} attempt {attempt} -> {} #{ix}", path.display());
        Ok(captures.swap_remove(ix))
    }
}

/// In-memory captures, handed out in order per user. Handy for embedding
/// callers that capture elsewhere, and for tests.
#[derive(Default)]
pub struct MemoryProvider {
    captures: Mutex<Vec<(String, Vec<Snapshot>)>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, username: &str, captures: Vec<Snapshot>) {
        if let Ok(mut all) = self.captures.lock() {
            all.retain(|(u, _)| u != username);
            all.push((s!(username), captures));
        }
    }
}

impl SnapshotProvider for MemoryProvider {
    fn capture(&self, username: &str, attempt: usize) -> Result<Snapshot> {
        let all = self
            .captures
            .lock()
            .map_err(|_| Error::Snapshot(s!("capture store poisoned")))?;
        let (_, caps) = all
            .iter()
            .find(|(u, _)| u == username)
            .ok_or_else(|| Error::NotFound(format!("no capture for {username}")))?;
        caps.get(attempt.min(caps.len().saturating_sub(1)))
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("no capture for {username}")))
    }
}
