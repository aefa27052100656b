//! Default values for repolist configuration.
//!
//! Centralized so the library, the CLI and the catalog parser agree.

use std::env;
use std::path::{Path, PathBuf};

/// File name looked up when no catalog is given explicitly.
pub const DEFAULT_CATALOG_FILENAME: &str = "repolist.yaml";

/// Environment variable naming the catalog file.
pub const CATALOG_ENV: &str = "REPOLIST_CATALOG";

/// Rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Characters of description shown before truncation.
pub const DEFAULT_MAX_DESC_LEN: usize = 80;

/// Age marker path, relative to each repository.
pub const DEFAULT_AGEFILE: &str = "info/web/last-modified";

pub const DEFAULT_ROOT_TITLE: &str = "Git repository browser";

/// Returns the per-user catalog location.
///
/// - Linux: `~/.config/repolist/repolist.yaml`
/// - macOS: `~/Library/Application Support/repolist/repolist.yaml`
/// - Windows: `{FOLDERID_RoamingAppData}\repolist\repolist.yaml`
///
/// Falls back to a relative `.repolist/repolist.yaml` when the platform config
/// directory cannot be determined.
pub fn user_catalog_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".repolist"))
        .join("repolist")
        .join(DEFAULT_CATALOG_FILENAME)
}

/// Pick the catalog file to load.
///
/// Precedence: the explicit path, then `REPOLIST_CATALOG`, then
/// `repolist.yaml` in `working_dir` if it exists, then [`user_catalog_path`].
pub fn resolve_catalog_path(explicit: Option<&Path>, working_dir: &Path) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(from_env) = env::var_os(CATALOG_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(from_env);
    }
    let local = working_dir.join(DEFAULT_CATALOG_FILENAME);
    if local.exists() {
        return local;
    }
    user_catalog_path()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_user_catalog_path_file_name() {
        let path = user_catalog_path();
        assert!(path.ends_with("repolist/repolist.yaml"));
    }

    #[test]
    #[serial]
    fn test_explicit_path_wins() {
        env::set_var(CATALOG_ENV, "/from/env.yaml");
        let path = resolve_catalog_path(Some(Path::new("/explicit.yaml")), Path::new("/tmp"));
        env::remove_var(CATALOG_ENV);
        assert_eq!(path, PathBuf::from("/explicit.yaml"));
    }

    #[test]
    #[serial]
    fn test_env_beats_working_dir() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join(DEFAULT_CATALOG_FILENAME), "repos: []").unwrap();

        env::set_var(CATALOG_ENV, "/from/env.yaml");
        let path = resolve_catalog_path(None, temp.path());
        env::remove_var(CATALOG_ENV);
        assert_eq!(path, PathBuf::from("/from/env.yaml"));
    }

    #[test]
    #[serial]
    fn test_working_dir_then_user_dir() {
        env::remove_var(CATALOG_ENV);
        let temp = tempfile::tempdir().unwrap();
        assert_eq!(resolve_catalog_path(None, temp.path()), user_catalog_path());

        std::fs::write(temp.path().join(DEFAULT_CATALOG_FILENAME), "repos: []").unwrap();
        assert_eq!(
            resolve_catalog_path(None, temp.path()),
            temp.path().join(DEFAULT_CATALOG_FILENAME)
        );
    }
}
