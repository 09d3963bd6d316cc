// Shared helpers for integration tests.
//
// Provides a temporary code path, module root and settings document, plus a
// fluent builder for module source trees, so each integration test can set
// up an isolated environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use psmod_cli::cli::GlobalOpts;
use psmod_cli::commands::CommandSetup;
use psmod_cli::platform::{Env, Os, Platform};

/// An isolated installer environment backed by a [`tempfile::TempDir`].
///
/// Layout:
/// - `code/`            code path holding module source trees
/// - `modules/`         module root installs land in (created lazily)
/// - `settings.json`    settings document (absent until written)
pub struct IntegrationTestContext {
    /// Temporary directory holding everything.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a new context with an empty code directory.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("code")).expect("create code dir");
        Self { root }
    }

    /// The code path directory.
    pub fn code_path(&self) -> PathBuf {
        self.root.path().join("code")
    }

    /// The module root directory.
    pub fn module_root(&self) -> PathBuf {
        self.root.path().join("modules")
    }

    /// The settings document location.
    pub fn settings_path(&self) -> PathBuf {
        self.root.path().join("settings.json")
    }

    /// Global options pointing at this context.
    pub fn global(&self) -> GlobalOpts {
        GlobalOpts {
            config: Some(self.settings_path()),
            module_root: Some(self.module_root()),
            ..GlobalOpts::default()
        }
    }

    /// Command setup for this context with the given global options.
    pub fn setup_with(&self, global: &GlobalOpts) -> CommandSetup {
        CommandSetup::new(global, Platform::new(Os::Linux, Env::default()))
    }

    /// Command setup for this context with default flags.
    pub fn setup(&self) -> CommandSetup {
        self.setup_with(&self.global())
    }

    /// Write a settings document whose `PSCodePath` is this context's code path.
    pub fn write_settings(&self) {
        let doc = serde_json::json!({ "PSCodePath": self.code_path() });
        std::fs::write(self.settings_path(), doc.to_string()).expect("write settings");
    }

    /// Begin a module source tree named `dir` under the code path.
    pub fn module(&self, dir: &str) -> ModuleBuilder {
        ModuleBuilder {
            root: self.code_path().join(dir),
        }
    }
}

/// Fluent builder for a module source tree.
pub struct ModuleBuilder {
    root: PathBuf,
}

impl ModuleBuilder {
    /// Write `<name>.psd1` with `ModuleVersion = '<version>'`.
    pub fn manifest(self, name: &str, version: &str) -> Self {
        self.file(
            &format!("{name}.psd1"),
            &format!("@{{\n    RootModule = '{name}.psm1'\n    ModuleVersion = '{version}'\n}}\n"),
        )
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn file(self, rel: &str, content: &str) -> Self {
        let path = self.root.join(rel);
        std::fs::create_dir_all(path.parent().expect("file has parent")).expect("create dirs");
        std::fs::write(&path, content).expect("write file");
        self
    }

    /// Create an empty directory at `rel`.
    pub fn dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.root.join(rel)).expect("create dir");
        self
    }

    /// Finish and return the module's source directory.
    pub fn build(self) -> PathBuf {
        std::fs::create_dir_all(&self.root).expect("create module dir");
        self.root
    }
}

/// Relative paths of every entry below `root`, sorted, `/`-separated.
pub fn tree(root: &Path) -> Vec<String> {
    if !root.exists() {
        return Vec::new();
    }
    let mut out: Vec<String> = walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| {
            e.expect("walk")
                .path()
                .strip_prefix(root)
                .expect("under root")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    out.sort();
    out
}
