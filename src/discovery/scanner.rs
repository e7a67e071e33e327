//! File system scanner for token sources.
//!
//! Expands glob patterns and walks directories to find token files
//! (`.json`, `.yaml`, `.yml`).

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use walkdir::WalkDir;

use crate::error::{Result, TokensError};
use crate::tokens::SourceFormat;

/// Result of scanning for token sources.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Token files, in discovery order, without duplicates.
    pub files: IndexSet<PathBuf>,
    /// Files that matched a pattern but have an unsupported extension.
    pub skipped: Vec<PathBuf>,
    /// Patterns that matched nothing.
    pub unmatched: Vec<String>,
}

impl ScanResult {
    /// Create a new empty scan result.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Merge another scan result into this one. Files already present keep
    /// their original position.
    pub fn merge(&mut self, other: ScanResult) {
        self.files.extend(other.files);
        for path in other.skipped {
            if !self.skipped.contains(&path) {
                self.skipped.push(path);
            }
        }
        self.unmatched.extend(other.unmatched);
    }

    fn add_file(&mut self, path: PathBuf) {
        if detect_format(&path).is_some() {
            self.files.insert(path);
        } else if !self.skipped.contains(&path) {
            self.skipped.push(path);
        }
    }
}

/// Detect the token source format from a file path.
pub fn detect_format(path: &Path) -> Option<SourceFormat> {
    let ext = path.extension()?.to_str()?;
    SourceFormat::from_extension(ext)
}

/// Recursively collect token files below `dir`, sorted by path.
///
/// Files with other extensions are ignored silently; a directory is taken to
/// mean "whatever tokens live in here".
pub fn scan_directory(dir: &Path) -> ScanResult {
    let mut result = ScanResult::new();

    if !dir.exists() {
        return result;
    }

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if entry.file_type().is_dir() {
            continue;
        }
        if detect_format(path).is_some() {
            result.files.insert(path.to_path_buf());
        }
    }

    result
}

/// Expand a single pattern relative to `root`.
pub fn scan_pattern(pattern: &str, root: &Path) -> Result<ScanResult> {
    let literal = root.join(strip_current_dir(pattern));
    if literal.is_dir() {
        let mut result = scan_directory(&literal);
        if result.is_empty() {
            result.unmatched.push(pattern.to_string());
        }
        return Ok(result);
    }

    let anchored = anchor_pattern(pattern, root);
    let paths = glob::glob(&anchored).map_err(|e| TokensError::Pattern {
        message: format!("'{}': {}", pattern, e),
        help: Some("Patterns use glob syntax, e.g. tokens/**/*.json".to_string()),
    })?;

    let mut result = ScanResult::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_dir() => continue,
            Ok(path) => result.add_file(path),
            Err(e) => log::warn!("cannot read {}: {}", e.path().display(), e.error()),
        }
    }

    if result.is_empty() && result.skipped.is_empty() {
        result.unmatched.push(pattern.to_string());
    }

    Ok(result)
}

/// Expand every pattern in order and merge the results.
pub fn scan_sources(patterns: &[String], root: &Path) -> Result<ScanResult> {
    let mut result = ScanResult::new();

    for pattern in patterns {
        let scan = scan_pattern(pattern, root)?;
        log::debug!("pattern '{}' matched {} file(s)", pattern, scan.total());
        result.merge(scan);
    }

    Ok(result)
}

/// Turn a relative pattern into one rooted at `root`.
fn anchor_pattern(pattern: &str, root: &Path) -> String {
    if Path::new(pattern).is_absolute() {
        return pattern.to_string();
    }

    let relative = strip_current_dir(pattern);
    if relative.is_empty() || relative == "." {
        return glob::Pattern::escape(&root.to_string_lossy());
    }

    let root = glob::Pattern::escape(&root.to_string_lossy());
    let root = root.trim_end_matches('/');
    format!("{}/{}", root, relative)
}

fn strip_current_dir(pattern: &str) -> &str {
    let mut relative = pattern;
    while let Some(rest) = relative.strip_prefix("./") {
        relative = rest;
    }
    relative
}
