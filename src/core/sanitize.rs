// src/core/sanitize.rs
use crate::config::consts::MAX_USERNAME_LEN;
use crate::error::{Error, Result};

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Trim and check a username before it is used for lookup or file names.
pub fn clean_username(raw: &str) -> Result<String> {
    let name = raw.trim().trim_start_matches('@');
    if name.is_empty() {
        return Err(Error::InvalidInput(s!("Username is required")));
    }
    if name.chars().count() > MAX_USERNAME_LEN {
        return Err(Error::InvalidInput(format!("Username too long (max {MAX_USERNAME_LEN})")));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(Error::InvalidInput(format!("Username contains whitespace: {:?}", normalize_ws(name))));
    }
    Ok(s!(name))
}

/// File-name stem for a user; falls back to `user_<n>` when nothing survives.
pub fn sanitize_filename(name: &str, n: usize) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || (ch == '.' && !out.is_empty()) { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch=='-' || ch=='_' { if !(last_us && ch=='_') { out.push(ch); } last_us = ch=='_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { format!("user_{}", n) } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usernames() {
        assert_eq!(clean_username("  @rafiedotid ").unwrap(), "rafiedotid");
        assert!(clean_username("   ").is_err());
        assert!(clean_username(&"x".repeat(51)).is_err());
        assert!(clean_username(&"x".repeat(50)).is_ok());
        assert!(clean_username("two words").is_err());
    }

    #[test]
    fn filenames() {
        assert_eq!(sanitize_filename("rafie.dot_id", 0), "rafie.dot_id");
        assert_eq!(sanitize_filename("../../etc", 3), "etc");
        assert_eq!(sanitize_filename("///", 7), "user_7");
    }
}
