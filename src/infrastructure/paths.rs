//! Path utilities for the Zellij sandbox environment.
//!
//! In the sandbox the host filesystem is mounted under `/host`, which usually
//! resolves to the user's home directory.

use std::path::PathBuf;

/// Returns the data directory for Mealdeck storage.
///
/// Located at `/host/.local/share/zellij/mealdeck`, typically
/// `~/.local/share/zellij/mealdeck` on the host. The key-value store
/// `store.json` and the trace file live here.
///
/// # Examples
///
/// ```
/// use mealdeck::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/mealdeck");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("mealdeck")
}

/// Expands a leading `~` to the sandbox's `/host` mount.
///
/// # Examples
///
/// ```
/// use mealdeck::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/mine.toml"), "/host/themes/mine.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_only_expands_at_start() {
        assert_eq!(expand_tilde("~/a/~b"), "/host/a/~b");
        assert_eq!(expand_tilde("~user/x"), "~user/x");
    }

    #[test]
    fn data_dir_is_under_host() {
        assert!(get_data_dir().starts_with("/host"));
        assert!(get_data_dir().ends_with("mealdeck"));
    }
}
