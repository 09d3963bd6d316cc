//! Module manifest (`<Name>.psd1`) discovery and version extraction.
use std::path::{Path, PathBuf};

use crate::error::InstallError;

/// Manifest file extension.
pub const MANIFEST_EXTENSION: &str = "psd1";

/// Key holding the module version inside a manifest.
const VERSION_KEY: &str = "ModuleVersion";

/// A located and parsed module manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleManifest {
    /// Module name with the manifest file's on-disk casing.
    pub name: String,
    /// Value of `ModuleVersion`, kept verbatim.
    pub version: String,
    /// Absolute path of the manifest file.
    pub path: PathBuf,
}

impl ModuleManifest {
    /// Locate `<name>.psd1` directly inside `dir` and read its version.
    ///
    /// The file name is matched case-insensitively (an exact match is
    /// preferred), and the returned [`name`](Self::name) is taken from the
    /// file actually found. A caller that typed `mymodule` for a directory
    /// holding `MyModule.psd1` therefore gets `MyModule` back.
    ///
    /// # Errors
    ///
    /// - [`InstallError::ManifestNotFound`] when no such file exists
    /// - [`InstallError::ManifestEncoding`] when the bytes are not text
    /// - [`InstallError::VersionMissing`] when it has no `ModuleVersion`
    /// - [`InstallError::Io`] when the directory or file cannot be read
    pub fn discover(dir: &Path, name: &str) -> Result<Self, InstallError> {
        let path = find_manifest(dir, name)?.ok_or_else(|| InstallError::ManifestNotFound {
            module: name.to_string(),
            dir: dir.to_path_buf(),
        })?;
        let canonical = path
            .file_stem()
            .map_or_else(|| name.to_string(), |s| s.to_string_lossy().into_owned());

        let bytes = std::fs::read(&path).map_err(|e| InstallError::io(&path, e))?;
        let content = decode_manifest(&bytes).ok_or_else(|| InstallError::ManifestEncoding {
            manifest: path.clone(),
        })?;
        let version = parse_module_version(&content).ok_or_else(|| {
            InstallError::VersionMissing {
                manifest: path.clone(),
            }
        })?;

        Ok(Self {
            name: canonical,
            version,
            path,
        })
    }
}

/// Decode manifest bytes.
///
/// PowerShell editors commonly save `.psd1` files as UTF-16 with a byte
/// order mark, so both UTF-16 orders are accepted alongside UTF-8 (with or
/// without a BOM). Returns `None` for anything else.
fn decode_manifest(bytes: &[u8]) -> Option<String> {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8(rest.to_vec()).ok();
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        return decode_utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        return decode_utf16(rest, u16::from_be_bytes);
    }
    String::from_utf8(bytes.to_vec()).ok()
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    let (pairs, rest) = bytes.as_chunks::<2>();
    if !rest.is_empty() {
        return None;
    }
    let units: Vec<u16> = pairs.iter().copied().map(unit).collect();
    String::from_utf16(&units).ok()
}

/// Find the manifest file for `name` in `dir`, preferring exact casing.
fn find_manifest(dir: &Path, name: &str) -> Result<Option<PathBuf>, InstallError> {
    let wanted = format!("{name}.{MANIFEST_EXTENSION}");
    let entries = std::fs::read_dir(dir).map_err(|e| InstallError::io(dir, e))?;

    let mut fallback = None;
    for entry in entries {
        let entry = entry.map_err(|e| InstallError::io(dir, e))?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if !entry.path().is_file() {
            continue;
        }
        if file_name == wanted {
            return Ok(Some(entry.path()));
        }
        if fallback.is_none() && file_name.eq_ignore_ascii_case(&wanted) {
            fallback = Some(entry.path());
        }
    }
    Ok(fallback)
}

/// Extract the `ModuleVersion` value from manifest source.
///
/// Accepts the usual PowerShell data-file forms:
///
/// ```text
/// ModuleVersion = '1.2.0'
/// ModuleVersion="1.2.0";
/// moduleversion = 1.2
/// ```
///
/// Keys are matched case-insensitively and `#` comment lines are skipped.
/// The value is returned verbatim apart from the surrounding quotes.
///
/// # Examples
///
/// ```
/// use psmod_cli::manifest::parse_module_version;
///
/// let src = "@{\n  RootModule = 'Foo.psm1'\n  ModuleVersion = '2.1.0'\n}";
/// assert_eq!(parse_module_version(src).as_deref(), Some("2.1.0"));
/// ```
#[must_use]
pub fn parse_module_version(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let trimmed = line.trim().trim_start_matches("@{").trim_start();
        if trimmed.starts_with('#') {
            return None;
        }
        let (key, value) = trimmed.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case(VERSION_KEY) {
            return None;
        }
        let value = strip_inline_comment(value.trim())
            .trim()
            .trim_end_matches(';')
            .trim_end_matches('}')
            .trim();
        let unquoted = unquote(value);
        (!unquoted.is_empty()).then(|| unquoted.to_string())
    })
}

/// Drop a trailing `# comment` that is not inside quotes.
fn strip_inline_comment(value: &str) -> &str {
    let mut quote = None;
    for (i, c) in value.char_indices() {
        match (quote, c) {
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, '#') => return value.get(..i).unwrap_or(value),
            _ => {}
        }
    }
    value
}

fn unquote(value: &str) -> &str {
    for q in ['\'', '"'] {
        if let Some(inner) = value.strip_prefix(q).and_then(|v| v.strip_suffix(q)) {
            return inner;
        }
    }
    value
}
