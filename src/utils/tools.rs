//! Locating external tool binaries

use std::path::{Path, PathBuf};
use tracing::warn;

/// Directories probed when PATH lookup comes up empty.
const COMMON_BIN_DIRS: &[&str] = &[
    "/opt/homebrew/bin",
    "/usr/local/bin",
    "/usr/bin",
    "~/.local/bin",
];

/// Locate a tool binary.
///
/// Search order:
/// 1. Explicit configured path
/// 2. System PATH
/// 3. Common installation directories
///
/// An explicit path never falls through: a configured but broken path is a
/// misconfiguration the operator has to see.
pub fn find_binary(name: &str, explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() && is_executable(path) {
            return Some(path.to_path_buf());
        }
        warn!(
            "configured {} path {} is not an executable file",
            name,
            path.display()
        );
        return None;
    }

    if let Ok(path) = which::which(name) {
        return Some(path);
    }

    for dir in COMMON_BIN_DIRS {
        let base = if let Some(rest) = dir.strip_prefix("~/") {
            match dirs::home_dir() {
                Some(home) => home.join(rest),
                None => continue,
            }
        } else {
            PathBuf::from(dir)
        };

        let candidate = base.join(name);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }

    None
}

/// Check if a file has any executable bit set
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match std::fs::metadata(path) {
        Ok(metadata) => metadata.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_binary_in_path() {
        let result = find_binary("yt-dlp", None);
        println!("yt-dlp found at: {:?}", result);
        // Don't assert - yt-dlp might not be installed in CI
    }

    #[test]
    fn test_is_executable() {
        let path = Path::new("/bin/ls");
        if path.exists() {
            assert!(is_executable(path));
        }
    }

    #[test]
    fn test_explicit_path_must_be_executable() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("yt-dlp");
        std::fs::write(&plain, b"not a binary").unwrap();

        assert!(find_binary("yt-dlp", Some(&plain)).is_none());
    }

    #[test]
    fn test_explicit_path_wins() {
        let ls = Path::new("/bin/ls");
        if ls.exists() {
            assert_eq!(find_binary("ls", Some(ls)), Some(ls.to_path_buf()));
        }
    }
}
