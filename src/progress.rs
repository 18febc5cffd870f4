// src/progress.rs
/// Lightweight progress reporting for batch scrapes and exports.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of users (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one user is finished, successfully or not.
    fn item_done(&mut self, _username: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints `[n/total] username` lines to stderr.
#[derive(Default)]
pub struct StderrProgress {
    total: usize,
    done: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, username: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {username}", self.done, self.total);
    }
}
