//! Ignore-file handling: turns `.gitignore` / `.psignore` rules into the set
//! of absolute paths an install must not copy.
//!
//! Rules are plain glob patterns (`*`, `?`, `[...]`, `**`) resolved against
//! a directory on disk rather than matched against a walk. A rule declared
//! in directory `D` is resolved against `D` and against every directory
//! below it, so a root `.psignore` line `build` removes `build` at any depth.
//! Ignore files themselves are always excluded.
use glob::{MatchOptions, Pattern};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::InstallError;

/// File names recognised as ignore files.
pub const IGNORE_FILE_NAMES: [&str; 2] = [".gitignore", ".psignore"];

/// One pattern line from an ignore file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRule {
    pattern: String,
    dir_only: bool,
}

impl IgnoreRule {
    /// Parse a single line.
    ///
    /// Returns `None` for blank lines, `#` comments, negations (`!pattern`,
    /// which are not supported) and lines that reduce to nothing once a
    /// leading or trailing `/` is removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use psmod_cli::ignore::IgnoreRule;
    ///
    /// assert!(IgnoreRule::parse("# comment").is_none());
    /// assert!(IgnoreRule::parse("   ").is_none());
    /// assert_eq!(IgnoreRule::parse("build/").unwrap().pattern(), "build");
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        if line.starts_with('!') {
            tracing::debug!("negated ignore pattern not supported: {line}");
            return None;
        }
        let dir_only = line.ends_with('/');
        let pattern = line.trim_start_matches('/').trim_end_matches('/');
        if pattern.is_empty() {
            return None;
        }
        Some(Self {
            pattern: pattern.to_string(),
            dir_only,
        })
    }

    /// The pattern text with any anchoring `/` removed.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// `true` if the rule was written with a trailing `/`.
    #[must_use]
    pub const fn dir_only(&self) -> bool {
        self.dir_only
    }

    /// Expand the rule relative to `dir`, returning the existing matches.
    ///
    /// The pattern is matched one path component at a time against the
    /// entries actually present on disk, so directory names need not be
    /// valid UTF-8. Rules that match nothing, and rules that are not valid
    /// globs, yield an empty list.
    #[must_use]
    pub fn resolve(&self, dir: &Path) -> Vec<PathBuf> {
        let components: Vec<&str> = self
            .pattern
            .split('/')
            .filter(|c| !c.is_empty() && *c != ".")
            .collect();
        if components.is_empty() {
            return Vec::new();
        }

        let mut current = vec![dir.to_path_buf()];
        for component in components {
            let mut next = Vec::new();
            for base in &current {
                match expand_component(base, component) {
                    Ok(found) => next.extend(found),
                    Err(e) => {
                        tracing::debug!("invalid ignore pattern '{}': {e}", self.pattern);
                        return Vec::new();
                    }
                }
            }
            next.sort();
            next.dedup();
            current = next;
            if current.is_empty() {
                break;
            }
        }
        current.retain(|p| !self.dir_only || p.is_dir());
        current
    }
}

/// Entries of `base` matched by a single pattern component.
///
/// `**` stands for `base` and every directory below it. A component with no
/// glob characters is looked up directly, which also finds dangling links.
fn expand_component(base: &Path, component: &str) -> Result<Vec<PathBuf>, glob::PatternError> {
    if component == "**" {
        return Ok(WalkDir::new(base)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_dir())
            .map(walkdir::DirEntry::into_path)
            .collect());
    }
    if Pattern::escape(component) == component {
        let candidate = base.join(component);
        return Ok(if candidate.symlink_metadata().is_ok() {
            vec![candidate]
        } else {
            Vec::new()
        });
    }

    let pattern = Pattern::new(component)?;
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    let Ok(entries) = std::fs::read_dir(base) else {
        return Ok(Vec::new());
    };
    Ok(entries
        .filter_map(Result::ok)
        .filter(|e| pattern.matches_with(&e.file_name().to_string_lossy(), options))
        .map(|e| e.path())
        .collect())
}

/// A parsed ignore file.
#[derive(Debug, Clone)]
pub struct IgnoreFile {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Rules in file order.
    pub rules: Vec<IgnoreRule>,
}

impl IgnoreFile {
    /// Read and parse the ignore file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::Io`] if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, InstallError> {
        let content = std::fs::read_to_string(path).map_err(|e| InstallError::io(path, e))?;
        Ok(Self::parse(path, &content))
    }

    /// Parse ignore-file `content` as if read from `path`.
    ///
    /// A leading UTF-8 byte order mark is ignored.
    #[must_use]
    pub fn parse(path: &Path, content: &str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        Self {
            path: path.to_path_buf(),
            rules: content.lines().filter_map(IgnoreRule::parse).collect(),
        }
    }
}

/// Absolute paths excluded from a copy.
///
/// Membership is exact: a child of an excluded directory is not itself a
/// member, callers skip excluded directories wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    paths: BTreeSet<PathBuf>,
}

impl ExclusionSet {
    /// `true` if `path` is excluded.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    /// Number of excluded paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// `true` if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Excluded paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    fn insert(&mut self, path: PathBuf) {
        self.paths.insert(path);
    }
}

impl<'a> IntoIterator for &'a ExclusionSet {
    type Item = &'a PathBuf;
    type IntoIter = std::collections::btree_set::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Compute the exclusion set for the source tree rooted at `root`.
///
/// `root` should be absolute; results are built by joining onto it, so they
/// compare equal to paths produced by walking the same root. Every directory
/// is visited, excluded ones included, and directory symlinks are followed.
///
/// # Errors
///
/// Returns an error if a directory cannot be listed or an ignore file
/// cannot be read. Dangling links and symlink loops are skipped here; the
/// copy walk decides whether they matter.
pub fn resolve(root: &Path) -> Result<ExclusionSet, InstallError> {
    let mut set = ExclusionSet::default();
    let mut scoped: HashMap<PathBuf, Vec<IgnoreRule>> = HashMap::new();

    let dirs = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_type().is_dir());
    for entry in dirs {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_unfollowable_link(&err) => {
                tracing::debug!("skipping unfollowable link: {err}");
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        let dir = entry.path();
        let mut rules = if entry.depth() == 0 {
            Vec::new()
        } else {
            dir.parent()
                .and_then(|p| scoped.get(p))
                .cloned()
                .unwrap_or_default()
        };
        rules.extend(load_ignore_files(dir, &mut set)?);

        for rule in &rules {
            for matched in rule.resolve(dir) {
                set.insert(matched);
            }
        }
        scoped.insert(dir.to_path_buf(), rules);
    }

    tracing::debug!("{} path(s) excluded under {}", set.len(), root.display());
    Ok(set)
}

/// `true` for a dangling symlink or a link back to an ancestor.
fn is_unfollowable_link(err: &walkdir::Error) -> bool {
    err.loop_ancestor().is_some()
        || err
            .io_error()
            .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
}

/// Read the ignore files directly inside `dir`, excluding each one.
fn load_ignore_files(dir: &Path, set: &mut ExclusionSet) -> Result<Vec<IgnoreRule>, InstallError> {
    let mut rules = Vec::new();
    for name in IGNORE_FILE_NAMES {
        let path = dir.join(name);
        if path.is_file() {
            let file = IgnoreFile::load(&path)?;
            tracing::debug!("{}: {} rule(s)", file.path.display(), file.rules.len());
            set.insert(path);
            rules.extend(file.rules);
        }
    }
    Ok(rules)
}
