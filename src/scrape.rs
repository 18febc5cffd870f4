// src/scrape.rs
use std::{
    thread, time::Duration,
    sync::{ mpsc, Arc, atomic::{ AtomicUsize, Ordering }}
};

use crate::{
    config::options::{ ExtractOptions, ScrapeOptions },
    core::sanitize::clean_username,
    error::{ Error, Result },
    extract::{ Extractor, Report },
    progress::Progress,
    provider::SnapshotProvider,
    stats::Record,
};

/// What one user's scrape produced.
#[derive(Clone, Debug)]
pub struct UserScrape {
    pub record: Record,
    /// Report for the capture the record came from.
    pub report: Report,
    /// Which capture (1-based) the record came from.
    pub captures: usize,
}

/// Settle, capture, extract; capture again while anything is unresolved.
/// Keeps the most complete reading (earliest wins a tie). A failed capture
/// is skipped; the call fails only when every capture failed.
pub fn scrape_user(
    provider: &dyn SnapshotProvider,
    extractor: &Extractor,
    username: &str,
    opts: &ScrapeOptions,
) -> Result<UserScrape> {
    let username = clean_username(username)?;
    let attempts = opts.attempts.max(1);

    let mut best: Option<(Report, usize)> = None;
    let mut last_err: Option<Error> = None;
    for attempt in 0..attempts {
        if opts.settle_ms > 0 {
            thread::sleep(Duration::from_millis(opts.settle_ms)); // let counters stop rolling
        }
        let snap = match provider.capture(&username, attempt) {
            Ok(snap) => snap,
            Err(e) => {
                logw!("Scrape: {username} attempt {}/{attempts} failed: {e}", attempt + 1);
                last_err = Some(e);
                continue;
            }
        };
        let report = extractor.extract_with_report(&snap);
        let resolved = report.result.resolved_count();
        logf!("Scrape: {username} attempt {}/{attempts}: {resolved}/4 resolved", attempt + 1);

        let better = best.as_ref().map_or(true, |(b, _)| resolved > b.result.resolved_count());
        if better {
            best = Some((report, attempt + 1));
        }
        if best.as_ref().is_some_and(|(b, _)| b.result.is_complete()) {
            break;
        }
        if attempt + 1 < attempts {
            logd!("Scrape: {username} still missing {:?}, capturing again", best.as_ref().map(|(b, _)| b.result.unresolved()));
        }
    }

    // Only a user with no successful capture at all is an error
    let Some((report, captures)) = best else {
        return Err(last_err.unwrap_or_else(|| Error::NotFound(format!("no capture for {username}"))));
    };
    for issue in &report.issues {
        logd!("Scrape: {username}: {issue}");
    }
    Ok(UserScrape {
        record: Record { username, stats: report.result.clone() },
        report,
        captures,
    })
}

/// Per-user result of a batch: the scrape, or why it failed.
pub type BatchItem = (String, std::result::Result<UserScrape, String>);

/// Scrape many users on a small worker pool. Results come back in input
/// order; one user failing never stops the others.
pub fn collect(
    provider: Arc<dyn SnapshotProvider>,
    usernames: &[String],
    extract: &ExtractOptions,
    scrape: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Vec<BatchItem> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(usernames.len());
        p.log("Reading counters…");
    }

    // Concurrency
    type Done = (usize, std::result::Result<UserScrape, String>);

    let users = Arc::new(usernames.to_vec());
    let counter = Arc::new(AtomicUsize::new(0));
    let extractor = Arc::new(Extractor::new(extract));
    let (res_tx, res_rx) = mpsc::channel::<Done>();

    let workers = scrape.workers.min(users.len()).max(1);

    for _ in 0..workers {
        let users = Arc::clone(&users);
        let idx = Arc::clone(&counter);
        let provider = Arc::clone(&provider);
        let extractor = Arc::clone(&extractor);
        let opts = scrape.clone();
        let tx = res_tx.clone();

        thread::spawn(
            move || {
                loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= users.len() {
                        break;
                    }
                    let result = scrape_user(provider.as_ref(), &extractor, &users[i], &opts)
                        .map_err(|e| e.to_string());
                    if tx.send((i, result)).is_err() {
                        break;
                    }
                    if opts.pause_ms > 0 {
                        thread::sleep(Duration::from_millis(opts.pause_ms)); // be polite
                    }
                }
            }
        );
    }
    drop(res_tx); // main thread is sole receiver now

    // Aggregate results
    let mut slots: Vec<Option<std::result::Result<UserScrape, String>>> = vec![None; users.len()];
    for _ in 0..users.len() {
        match res_rx.recv() {
            Ok((i, result)) => {
                if let Some(p) = progress.as_deref_mut() {
                    match &result {
                        Ok(_) => {}
                        Err(msg) => p.log(&format!("{}: {msg}", users[i])),
                    }
                    p.item_done(&users[i]);
                }
                slots[i] = Some(result);
            }
            Err(_) => break, // workers ended early; bail gracefully
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    users
        .iter()
        .cloned()
        .zip(slots)
        .map(|(u, slot)| (u, slot.unwrap_or_else(|| Err(s!("worker exited before finishing")))))
        .collect()
}
