//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_catalog(catalogs::SECTIONED);
//!     fixture.command().arg("list").assert().success();
//! }
//! ```

use assert_cmd::Command;
use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::catalogs;
    pub use super::TestFixture;
}

/// Catalog files used across tests. Repository paths are relative to the
/// fixture directory, which is the working directory of the command.
#[allow(dead_code)]
pub mod catalogs {
    /// Two sections, one top-level repository and one hidden repository.
    pub const SECTIONED: &str = r#"
repos:
  - url: git
    path: repos/git.git
    desc: The Git core
    owner: junio
    section: core
  - url: cgit
    path: repos/cgit.git
    desc: A web frontend
    owner: jason
    section: web
  - url: private
    path: repos/private.git
    hide: true
  - url: tools/scripts
    path: repos/scripts.git
    desc: Helper scripts
"#;

    /// Five visible repositories over two sections with section paging on.
    pub const PAGED_SECTIONS: &str = r#"
settings:
  page-size: 2
  section-sort: paged
repos:
  - { url: git, path: repos/git.git, section: core }
  - { url: libgit2, path: repos/libgit2.git, section: core }
  - { url: cgit, path: repos/cgit.git, section: web }
  - { url: gitweb, path: repos/gitweb.git, section: web }
  - { url: scripts, path: repos/scripts.git }
"#;

    /// Two entries sharing one path.
    pub const DUPLICATE_PATHS: &str = r#"
repos:
  - url: one
    path: repos/shared.git
  - url: two
    path: repos/shared.git
"#;

    /// A TOML catalog.
    pub const TOML: &str = r#"
[settings]
page-size = 10
section-sort = "off"

[[repos]]
url = "git"
path = "repos/git.git"
section = "core"
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "repos: [unclosed";

    /// A catalog whose settings cannot be used.
    pub const ZERO_PAGE_SIZE: &str = r#"
settings:
  page-size: 0
repos:
  - url: git
    path: repos/git.git
"#;

    /// Every repository is hidden or ignored.
    pub const ALL_HIDDEN: &str = r#"
repos:
  - url: a
    path: repos/a.git
    hide: true
  - url: b
    path: repos/b.git
    ignore: true
"#;
}

/// A temporary directory holding a catalog and, optionally, repository files.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `repolist.yaml` with the given content.
    pub fn with_catalog(self, content: &str) -> Self {
        self.with_file("repolist.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the default catalog file.
    #[allow(dead_code)]
    pub fn catalog_path(&self) -> PathBuf {
        self.temp_dir.path().join("repolist.yaml")
    }

    /// A `repolist` command running in the fixture directory, with styling
    /// off and no catalog inherited from the environment.
    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("repolist");
        cmd.current_dir(self.path())
            .env_remove("REPOLIST_CATALOG")
            .env_remove("RUST_LOG")
            .args(["--color", "never"]);
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
