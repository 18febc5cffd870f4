// src/config/consts.rs

// Counter layout (position units, as reported by the page)
// Digit rows sit above their caption, never below it.
pub const LABEL_MAX_ROWS_ABOVE: u32 = 100;
pub const LABEL_MAX_COL_OFFSET: u32 = 200;

// Ghost-digit collapse distance, per pass
pub const LAYOUT_DUP_DISTANCE: u32 = 10;
pub const KEYWORD_DUP_DISTANCE: u32 = 5;

// Keyword fallback: parent, grandparent, great-grandparent
pub const KEYWORD_MAX_DEPTH: usize = 3;
pub const MAX_ANCESTOR_DEPTH_LIMIT: usize = 8;

// Output
pub const NOT_FOUND: &str = "Not found";
pub const MAX_USERNAME_LEN: usize = 50;

// Logs
pub const LOG_FILE: &str = ".store/debug.log";
pub const DEFAULT_LOG_FILTER: &str = "tc_scrape=info";

// Captures
pub const DEFAULT_SNAPSHOT_DIR: &str = "snapshots";
pub const SETTLE_MS: u64 = 12_000; // counters roll for several seconds
pub const CAPTURE_ATTEMPTS: usize = 2;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "stats";
pub const PER_USER_SUFFIX: &str = "_data";

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
