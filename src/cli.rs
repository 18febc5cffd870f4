// src/cli.rs
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::config::options::{AppOptions, ExportFormat, ExportType};
use crate::error::{Error, Result};
use crate::file;
use crate::log::{self, LogTarget};
use crate::progress::{Progress, StderrProgress};
use crate::provider::{FixtureProvider, SnapshotProvider};
use crate::scrape;
use crate::stats::Record;

/// Read Followers / Likes / Following / Videos out of captured profile pages.
#[derive(Parser, Debug)]
#[command(name = "tc-scrape", version, about, long_about = None)]
pub struct Cli {
    /// Usernames to read (a leading '@' is fine)
    pub usernames: Vec<String>,

    /// File with one username per line ('#' starts a comment)
    #[arg(long, value_name = "FILE")]
    pub users_file: Option<PathBuf>,

    /// Directory holding <username>.json captures
    #[arg(long, value_name = "DIR")]
    pub snapshots: Option<PathBuf>,

    /// TOML options file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Captures per user while anything is unresolved
    #[arg(long)]
    pub attempts: Option<usize>,

    /// Wait before each capture, in milliseconds
    #[arg(long)]
    pub settle_ms: Option<u64>,

    #[arg(long)]
    pub workers: Option<usize>,

    /// csv | tsv | json
    #[arg(long)]
    pub format: Option<ExportFormat>,

    /// Output file, or directory with --per-user. '-' prints to stdout.
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<String>,

    /// One <username>_data.json per user
    #[arg(long)]
    pub per_user: bool,

    #[arg(long)]
    pub include_headers: bool,

    /// Skip the keyword fallback pass
    #[arg(long)]
    pub layout_only: bool,

    /// Print a plausibility verdict per counter
    #[arg(long)]
    pub check: bool,

    /// Log to a file instead of stderr (default .store/debug.log)
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    pub log_file: Option<Option<PathBuf>>,

    /// -v debug, -vv trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    fn log_filter(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("tc_scrape=debug"),
            _ => Some("tc_scrape=trace"),
        }
    }

    /// Config file first, then flags on top.
    fn options(&self) -> Result<AppOptions> {
        let mut opts = match &self.config {
            Some(path) => AppOptions::load(path)?,
            None => AppOptions::default(),
        };

        if let Some(dir) = &self.snapshots { opts.scrape.snapshot_dir = dir.clone(); }
        if let Some(n) = self.attempts { opts.scrape.attempts = n; }
        if let Some(ms) = self.settle_ms { opts.scrape.settle_ms = ms; }
        if let Some(n) = self.workers { opts.scrape.workers = n; }
        if let Some(f) = self.format { opts.export.format = f; }
        if self.per_user { opts.export.export_type = ExportType::PerUser; }
        if self.include_headers { opts.export.include_headers = true; }
        if self.layout_only { opts.extract.layout_only = true; }

        // set_path reads export_type, so it goes last
        if let Some(out) = self.out.as_deref().filter(|o| *o != "-") {
            opts.export.set_path(out);
        }
        Ok(opts)
    }

    fn to_stdout(&self) -> bool {
        match self.out.as_deref() {
            Some("-") => true,
            Some(_) => false,
            None => self.config.is_none() && !self.per_user,
        }
    }

    fn usernames(&self) -> Result<Vec<String>> {
        let mut users = self.usernames.clone();
        if let Some(path) = &self.users_file {
            users.extend(file::read_username_list(path)?);
        }
        if users.is_empty() {
            return Err(Error::InvalidInput(s!("No usernames given")));
        }
        Ok(users)
    }
}

pub fn run(args: Cli) -> Result<()> {
    let target = match &args.log_file {
        None => LogTarget::Stderr,
        Some(None) => LogTarget::debug_file(),
        Some(Some(path)) => LogTarget::File(path.clone()),
    };
    log::init(&target, args.log_filter())?;

    let opts = args.options()?;
    let users = args.usernames()?;
    logd!("CLI: {} user(s), snapshots in {}", users.len(), opts.scrape.snapshot_dir.display());

    let provider: Arc<dyn SnapshotProvider> = Arc::new(FixtureProvider::new(&opts.scrape.snapshot_dir));
    let mut progress = StderrProgress::default();
    let progress = (users.len() > 1).then_some(&mut progress as &mut dyn Progress);

    let results = scrape::collect(provider, &users, &opts.extract, &opts.scrape, progress);

    let mut records = Vec::with_capacity(results.len());
    let mut failed = 0;
    for (user, result) in results {
        match result {
            Ok(done) => records.push(done.record),
            Err(msg) => {
                loge!("{user}: {msg}");
                failed += 1;
            }
        }
    }
    if records.is_empty() {
        return Err(Error::NotFound(format!("no stats read for {failed} user(s)")));
    }
    if failed > 0 {
        logw!("{failed} user(s) skipped");
    }

    if args.to_stdout() {
        print!("{}", file::to_export_string(&records, opts.export.format, opts.export.include_headers)?);
    } else {
        for path in file::write_export(&opts.export, &records)? {
            eprintln!("Wrote {}", path.display());
        }
    }

    if args.check {
        for record in &records {
            eprintln!("{}", check_line(record));
        }
    }
    Ok(())
}

/// `amy: Followers 12,850 (looks good), Likes Not found (missing), …`
pub fn check_line(record: &Record) -> String {
    let parts: Vec<String> = record
        .stats
        .iter()
        .map(|(kind, value)| format!("{kind} {value} ({})", kind.plausibility(value)))
        .collect();
    format!("{}: {}", record.username, parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{StatKind, StatValue};

    #[test]
    fn flags_override_config_defaults() {
        let cli = Cli::parse_from([
            "tc-scrape", "amy", "--attempts", "5", "--format", "json", "--per-user", "-o", "dumps",
        ]);
        let opts = cli.options().unwrap();
        assert_eq!(opts.scrape.attempts, 5);
        assert_eq!(opts.export.format, ExportFormat::Json);
        assert_eq!(opts.export.out_path(), PathBuf::from("dumps"));
        assert!(!cli.to_stdout());
    }

    #[test]
    fn stdout_by_default() {
        let cli = Cli::parse_from(["tc-scrape", "amy"]);
        assert!(cli.to_stdout());
        assert!(Cli::parse_from(["tc-scrape", "amy", "-o", "-"]).to_stdout());
    }

    #[test]
    fn log_file_value_is_optional() {
        let cli = Cli::parse_from(["tc-scrape", "amy", "--log-file"]);
        assert_eq!(cli.log_file, Some(None));
        let cli = Cli::parse_from(["tc-scrape", "--log-file", "run.log", "amy"]);
        assert_eq!(cli.log_file, Some(Some(PathBuf::from("run.log"))));
        assert_eq!(cli.usernames, vec![s!("amy")]);
    }

    #[test]
    fn bad_format_rejected() {
        assert!(Cli::try_parse_from(["tc-scrape", "amy", "--format", "xml"]).is_err());
    }

    #[test]
    fn no_users_is_an_error() {
        let cli = Cli::parse_from(["tc-scrape"]);
        assert!(matches!(cli.usernames(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn check_line_lists_every_counter() {
        let mut record = Record { username: s!("amy"), stats: Default::default() };
        record.stats.set(StatKind::Followers, StatValue::Found(s!("12,850")));
        let line = check_line(&record);
        assert!(line.starts_with("amy: Followers 12,850 (looks good)"));
        assert!(line.contains("Videos Not found (missing)"));
    }
}
