//! Token source discovery and loading.
//!
//! Resolves the file arguments and configured `sources` (paths, directories
//! or glob patterns) into loaded token trees.
//!
//! # Example
//!
//! ```ignore
//! use tokens_to::discovery::discover;
//!
//! let result = discover(&["tokens/**/*.json".to_string()], ".")?;
//! println!("Found {} token files", result.scan.total());
//!
//! let sources = result.load()?;
//! ```

mod loader;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use loader::{load_source, load_sources, TokenSources};
pub use scanner::{detect_format, scan_directory, scan_pattern, scan_sources, ScanResult};

/// Result of discovering token sources.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// Directory relative patterns were resolved against.
    pub root: PathBuf,

    /// Scan results with discovered files.
    pub scan: ScanResult,
}

impl DiscoveryResult {
    /// Parse every discovered file.
    pub fn load(&self) -> Result<TokenSources> {
        load_sources(&self.scan)
    }
}

/// Discover token files matching `patterns`, resolved against `root`.
pub fn discover(patterns: &[String], root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();
    let scan = scan_sources(patterns, &root)?;

    Ok(DiscoveryResult { root, scan })
}

/// Discover and load in one step.
pub fn resolve_sources(patterns: &[String], root: impl AsRef<Path>) -> Result<TokenSources> {
    discover(patterns, root)?.load()
}
